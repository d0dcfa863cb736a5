#![cfg(test)]
use std::path::PathBuf;

use migration::MigratorTrait;
use models::db::connect_in_memory;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::storage::file_store::FileStore;

/// Fresh migrated in-memory database; every call gets its own schema.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// File store rooted in a unique temp directory.
pub fn temp_store() -> (FileStore, PathBuf) {
    let root = std::env::temp_dir().join(format!("svc_uploads_{}", Uuid::new_v4()));
    (FileStore::new(&root), root)
}
