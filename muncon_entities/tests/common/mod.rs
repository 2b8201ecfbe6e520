use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection, DbErr, Statement};

pub async fn set_up_db(with_mock_data: bool) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    db.execute(Statement::from_sql_and_values(
        db.get_database_backend(),
        "PRAGMA foreign_keys = ON;",
        vec![],
    ))
    .await?;
    migration::Migrator::up(&db, None).await.unwrap();

    if with_mock_data {
        muncon_entities::mock::seed_mock_conference(&db).await?;
    }

    Ok(db)
}
