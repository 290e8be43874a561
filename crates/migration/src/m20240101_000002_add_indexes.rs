use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Restaurant: list order follows creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_restaurant_created_at")
                    .table(Restaurant::Table)
                    .col(Restaurant::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_restaurant_created_at")
                    .table(Restaurant::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Restaurant {
    Table,
    CreatedAt,
}
