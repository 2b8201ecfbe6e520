use axum::extract::FromRef;
use migration::MigratorTrait;
use sea_orm::prelude::*;

use crate::db::{self, DatabaseConfig};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub async fn new(db_url: String) -> AppState {
        let db = db::set_up_db(DatabaseConfig::new(db_url))
            .await
            .expect("Failed to set up database");
        Self::new_with_db(db).await
    }

    pub async fn new_with_db(db: DatabaseConnection) -> AppState {
        migration::Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
        AppState { db }
    }

    pub async fn new_test_app() -> AppState {
        Self::new("sqlite::memory:".into()).await
    }
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(app_state: &AppState) -> DatabaseConnection {
        app_state.db.clone()
    }
}
