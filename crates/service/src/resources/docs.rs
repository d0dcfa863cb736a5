use std::sync::Arc;

use models::docs;
use sea_orm::{DatabaseConnection, Set};
use tracing::{info, instrument};

use super::{
    upload::{UploadPolicy, UploadResource},
    UploadedFile,
};
use crate::{errors::ServiceError, storage::file_store::FileStore};

/// Documents keep the client's file name for display.
pub struct DocsUploads;

impl UploadPolicy for DocsUploads {
    type Record = docs::ActiveModel;
    const LABEL: &'static str = "document";

    fn new_record(&self, original_name: &str, stored_path: String) -> docs::ActiveModel {
        docs::ActiveModel {
            name: Set(original_name.to_owned()),
            file: Set(stored_path),
            ..Default::default()
        }
    }
}

pub type DocsResource = UploadResource<DocsUploads>;

impl DocsResource {
    pub fn new(db: DatabaseConnection, files: Arc<FileStore>) -> Self {
        Self::with_policy(db, files, DocsUploads)
    }

    /// Store the new file, then point the record at it. The new file is
    /// written before the identity is checked, and the previous file stays
    /// on disk either way.
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name))]
    pub async fn replace_file(&self, id: i32, upload: UploadedFile) -> Result<docs::Model, ServiceError> {
        let stored = self.files.save(&mut &upload.data[..], &upload.file_name).await?;
        let changes = DocsUploads.new_record(&upload.file_name, stored);
        if self.repo.update_by_id(id, changes).await? == 0 {
            return Err(ServiceError::not_found(DocsUploads::LABEL));
        }
        let updated = self.reload(id).await?;
        info!(id, file = %updated.file, "document file replaced");
        Ok(updated)
    }
}
