//! Migrator creating the four admin tables.
//! Each migration only ensures its table exists (`IF NOT EXISTS`).
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_services;
mod m20240101_000002_create_gallery;
mod m20240101_000003_create_docs;
mod m20240101_000004_create_contacts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_services::Migration),
            Box::new(m20240101_000002_create_gallery::Migration),
            Box::new(m20240101_000003_create_docs::Migration),
            Box::new(m20240101_000004_create_contacts::Migration),
        ]
    }
}
