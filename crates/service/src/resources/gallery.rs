use std::sync::Arc;

use models::gallery;
use sea_orm::{DatabaseConnection, Set};
use serde::Deserialize;
use tracing::{info, instrument};

use super::upload::{UploadPolicy, UploadResource};
use crate::{errors::ServiceError, storage::file_store::FileStore};

/// New images are visible until hidden explicitly.
pub struct GalleryUploads;

impl UploadPolicy for GalleryUploads {
    type Record = gallery::ActiveModel;
    const LABEL: &'static str = "gallery item";

    fn new_record(&self, _original_name: &str, stored_path: String) -> gallery::ActiveModel {
        gallery::ActiveModel {
            filename: Set(stored_path),
            hidden: Set(false),
            ..Default::default()
        }
    }
}

pub type GalleryResource = UploadResource<GalleryUploads>;

/// Body of the visibility toggle; a missing key means `false`.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct HiddenInput {
    #[serde(default)]
    pub hidden: bool,
}

impl GalleryResource {
    pub fn new(db: DatabaseConnection, files: Arc<FileStore>) -> Self {
        Self::with_policy(db, files, GalleryUploads)
    }

    #[instrument(skip(self))]
    pub async fn set_hidden(&self, id: i32, hidden: bool) -> Result<gallery::Model, ServiceError> {
        let changes = gallery::ActiveModel { hidden: Set(hidden), ..Default::default() };
        if self.repo.update_by_id(id, changes).await? == 0 {
            return Err(ServiceError::not_found(GalleryUploads::LABEL));
        }
        let updated = self.reload(id).await?;
        info!(id, hidden, "gallery visibility changed");
        Ok(updated)
    }
}
