pub mod applications;
pub mod auth;
pub mod commands;
pub mod committees;
pub mod config;
pub mod db;
pub mod delegations;
pub mod forms;
pub mod response;
pub mod staff;
pub mod state;
pub mod users;
pub mod validate;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub async fn app() -> Router {
    app_with_state(AppState::new(config::read_config().db_url).await).await
}

pub async fn app_with_state(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(applications::router())
        .merge(committees::router())
        .merge(delegations::router())
        .merge(staff::router());

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
