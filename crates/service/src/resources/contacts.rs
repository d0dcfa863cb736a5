use models::contacts;
use sea_orm::{DatabaseConnection, Set};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{errors::ServiceError, repository::Repository};

/// Full replacement of the contact details; absent keys decode as empty.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactsInput {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub work_schedule: String,
    pub social_media_vk: String,
    pub social_media_ya: String,
    pub social_media_two_gis: String,
}

impl ContactsInput {
    fn into_active_model(self) -> contacts::ActiveModel {
        contacts::ActiveModel {
            address: Set(self.address),
            phone: Set(self.phone),
            email: Set(self.email),
            website: Set(self.website),
            work_schedule: Set(self.work_schedule),
            social_media_vk: Set(self.social_media_vk),
            social_media_ya: Set(self.social_media_ya),
            social_media_two_gis: Set(self.social_media_two_gis),
            ..Default::default()
        }
    }
}

/// Singleton record: the table holds zero or one row.
#[derive(Clone)]
pub struct ContactsResource {
    repo: Repository<contacts::ActiveModel>,
}

impl ContactsResource {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { repo: Repository::new(db) }
    }

    /// Zero or one rows.
    pub async fn list(&self) -> Result<Vec<contacts::Model>, ServiceError> {
        Ok(self.repo.find_first().await?.into_iter().collect())
    }

    /// Create the singleton on first call, otherwise overwrite every field.
    #[instrument(skip_all)]
    pub async fn upsert(&self, input: ContactsInput) -> Result<contacts::Model, ServiceError> {
        contacts::validate_required(&input.address, &input.phone, &input.email)?;
        let Some(existing) = self.repo.find_first().await? else {
            let created = self.repo.create(input.into_active_model()).await?;
            info!(id = created.id, "contacts created");
            return Ok(created);
        };
        if self.repo.update_by_id(existing.id, input.into_active_model()).await? == 0 {
            return Err(ServiceError::not_found("contacts"));
        }
        let updated = self
            .repo
            .find_by_id(existing.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("contacts"))?;
        info!(id = updated.id, "contacts updated");
        Ok(updated)
    }
}
