use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "docs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Display name, taken from the uploaded file's original name.
    pub name: String,
    /// Public path of the stored copy.
    pub file: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
