use sea_orm_migration::prelude::*;
pub use sea_orm_migration::prelude::{MigrationTrait, MigratorTrait};

mod m20250512_000001_create_registration_tables;
mod m20250530_000002_add_applications;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250512_000001_create_registration_tables::Migration),
            Box::new(m20250530_000002_add_applications::Migration),
        ]
    }
}
