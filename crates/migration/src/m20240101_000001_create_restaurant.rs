//! Create `restaurant` table.
//!
//! `name` is the natural primary key; every lookup, delete and patch is keyed by it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Restaurant::Table)
                    .if_not_exists()
                    .col(string(Restaurant::Name).primary_key())
                    .col(string(Restaurant::Address))
                    .col(string(Restaurant::Phone))
                    .col(double_null(Restaurant::Rating))
                    .col(timestamp_with_time_zone(Restaurant::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Restaurant::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Restaurant::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Restaurant {
    Table,
    Name,
    Address,
    Phone,
    Rating,
    CreatedAt,
    UpdatedAt,
}
