//! Create `contacts` table.
//!
//! Holds a single row; the surrogate key exists only so the row can be addressed.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(pk_auto(Contacts::Id))
                    .col(string(Contacts::Address))
                    .col(string(Contacts::Phone))
                    .col(string(Contacts::Email))
                    .col(string(Contacts::Website).default(""))
                    .col(text(Contacts::WorkSchedule).default(""))
                    .col(string(Contacts::SocialMediaVk).default(""))
                    .col(string(Contacts::SocialMediaYa).default(""))
                    .col(string(Contacts::SocialMediaTwoGis).default(""))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Contacts::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Contacts {
    Table,
    Id,
    Address,
    Phone,
    Email,
    Website,
    WorkSchedule,
    SocialMediaVk,
    SocialMediaYa,
    SocialMediaTwoGis,
}
