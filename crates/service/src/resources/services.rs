use models::services;
use sea_orm::{DatabaseConnection, Set};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{errors::ServiceError, repository::Repository};

/// Request body for creating or updating a service. Absent keys decode as
/// empty strings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServiceInput {
    pub eng: String,
    pub title: String,
    pub src: String,
    pub prices: String,
    pub text: String,
}

impl ServiceInput {
    fn into_active_model(self) -> services::ActiveModel {
        services::ActiveModel {
            eng: Set(self.eng),
            title: Set(self.title),
            src: Set(self.src),
            prices: Set(self.prices),
            text: Set(self.text),
            ..Default::default()
        }
    }
}

#[derive(Clone)]
pub struct ServicesResource {
    repo: Repository<services::ActiveModel>,
}

impl ServicesResource {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { repo: Repository::new(db) }
    }

    pub async fn list(&self) -> Result<Vec<services::Model>, ServiceError> {
        self.repo.find_all().await
    }

    /// All five fields must be non-empty.
    #[instrument(skip_all)]
    pub async fn create(&self, input: ServiceInput) -> Result<services::Model, ServiceError> {
        services::validate_required(&input.eng, &input.title, &input.src, &input.prices, &input.text)?;
        let created = self.repo.create(input.into_active_model()).await?;
        info!(id = created.id, eng = %created.eng, "service created");
        Ok(created)
    }

    /// Overwrite the five mutable fields of an existing service.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: ServiceInput) -> Result<services::Model, ServiceError> {
        if self.repo.update_by_id(id, input.into_active_model()).await? == 0 {
            return Err(ServiceError::not_found("service"));
        }
        let updated = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("service"))?;
        info!(id, "service updated");
        Ok(updated)
    }
}
