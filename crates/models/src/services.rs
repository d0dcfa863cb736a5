use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};

/// A service offered by the facility, as listed on the public site.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub eng: String,
    pub title: String,
    pub src: String,
    #[sea_orm(column_type = "Text")]
    pub prices: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// All five text fields are mandatory when a service is created.
pub fn validate_required(eng: &str, title: &str, src: &str, prices: &str, text: &str) -> Result<(), ModelError> {
    errors::require_non_empty(&[
        ("eng", eng),
        ("title", title),
        ("src", src),
        ("prices", prices),
        ("text", text),
    ])
}
