//! Shared lifecycle of the upload-backed resources (gallery and docs).

use std::sync::Arc;

use sea_orm::{ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, IntoActiveModel};
use tracing::{info, instrument};

use super::UploadedFile;
use crate::{
    errors::ServiceError,
    repository::{IdOf, ModelOf, Repository},
    storage::file_store::FileStore,
};

/// Builds the record stored for one uploaded file.
pub trait UploadPolicy: Send + Sync {
    type Record: ActiveModelTrait + ActiveModelBehavior + Send + 'static;

    /// Name used in log lines and not-found messages.
    const LABEL: &'static str;

    fn new_record(&self, original_name: &str, stored_path: String) -> Self::Record;
}

pub struct UploadResource<P: UploadPolicy> {
    pub(super) repo: Repository<P::Record>,
    pub(super) files: Arc<FileStore>,
    policy: P,
}

impl<P> UploadResource<P>
where
    P: UploadPolicy,
    ModelOf<P::Record>: IntoActiveModel<P::Record> + Send + Sync,
    IdOf<P::Record>: From<i32>,
{
    pub fn with_policy(db: DatabaseConnection, files: Arc<FileStore>, policy: P) -> Self {
        Self { repo: Repository::new(db), files, policy }
    }

    pub async fn list(&self) -> Result<Vec<ModelOf<P::Record>>, ServiceError> {
        self.repo.find_all().await
    }

    /// Store every file in order and create one record per file.
    ///
    /// The first failure aborts the batch; files and records already written
    /// stay in place.
    #[instrument(skip_all, fields(resource = P::LABEL, count = uploads.len()))]
    pub async fn upload_batch(
        &self,
        uploads: Vec<UploadedFile>,
    ) -> Result<Vec<ModelOf<P::Record>>, ServiceError> {
        let mut created = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let stored = self.files.save(&mut &upload.data[..], &upload.file_name).await?;
            let record = self.policy.new_record(&upload.file_name, stored);
            created.push(self.repo.create(record).await?);
        }
        info!(stored = created.len(), "upload batch stored");
        Ok(created)
    }

    /// The stored file is left on disk.
    #[instrument(skip(self), fields(resource = P::LABEL))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if self.repo.delete_by_id(id).await? == 0 {
            return Err(ServiceError::not_found(P::LABEL));
        }
        info!(id, "record deleted");
        Ok(())
    }

    /// Refetch after an update that touched exactly one row.
    pub(super) async fn reload(&self, id: i32) -> Result<ModelOf<P::Record>, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(P::LABEL))
    }
}
