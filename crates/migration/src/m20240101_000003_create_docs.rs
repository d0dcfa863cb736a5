//! Create `docs` table.
//! `name` keeps the client's original filename, `file` the public path of the stored copy.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Docs::Table)
                    .if_not_exists()
                    .col(pk_auto(Docs::Id))
                    .col(string_len(Docs::Name, 512))
                    .col(string_len(Docs::File, 512))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Docs::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Docs { Table, Id, Name, File }
