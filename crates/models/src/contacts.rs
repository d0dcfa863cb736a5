use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};

/// Contact details of the facility. The table holds at most one row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip)]
    pub id: i32,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    #[sea_orm(column_type = "Text")]
    pub work_schedule: String,
    pub social_media_vk: String,
    pub social_media_ya: String,
    pub social_media_two_gis: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_required(address: &str, phone: &str, email: &str) -> Result<(), ModelError> {
    errors::require_non_empty(&[("address", address), ("phone", phone), ("email", email)])
}
