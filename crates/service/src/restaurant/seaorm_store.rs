use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};
use tracing::{info, instrument};

use models::restaurant::{self, Entity as RestaurantEntity};

use super::domain::{NewRestaurant, Restaurant, RestaurantPatch};
use super::repository::RestaurantStore;
use crate::errors::StoreError;

fn read_err(e: DbErr) -> StoreError { StoreError::StorageRead(e.to_string()) }
fn write_err(e: DbErr) -> StoreError { StoreError::StorageWrite(e.to_string()) }

/// SeaORM-backed store over the `restaurant` table.
///
/// Reads are one statement each. Delete and patch look the row up first and
/// then write it; there is no surrounding transaction.
pub struct SeaOrmRestaurantStore {
    pub db: DatabaseConnection,
}

impl SeaOrmRestaurantStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn find(&self, name: &str) -> Result<Option<restaurant::Model>, StoreError> {
        RestaurantEntity::find_by_id(name.to_string()).one(&self.db).await.map_err(read_err)
    }
}

#[async_trait]
impl RestaurantStore for SeaOrmRestaurantStore {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Restaurant>, StoreError> {
        let rows = RestaurantEntity::find()
            .order_by_asc(restaurant::Column::CreatedAt)
            .order_by_asc(restaurant::Column::Name)
            .all(&self.db)
            .await
            .map_err(read_err)?;
        Ok(rows.into_iter().map(Restaurant::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_by_name(&self, name: &str) -> Result<Option<Restaurant>, StoreError> {
        Ok(self.find(name).await?.map(Restaurant::from))
    }

    #[instrument(skip(self, record), fields(name = %record.name))]
    async fn insert(&self, record: NewRestaurant) -> Result<Restaurant, StoreError> {
        record.validate()?;
        let created = restaurant::create(&self.db, &record.name, &record.address, &record.phone, record.rating).await?;
        info!(name = %created.name, "restaurant_inserted");
        Ok(created.into())
    }

    #[instrument(skip(self))]
    async fn delete_by_name(&self, name: &str) -> Result<Restaurant, StoreError> {
        let Some(existing) = self.find(name).await? else {
            return Err(StoreError::not_found(name));
        };
        let res = RestaurantEntity::delete_by_id(name.to_string())
            .exec(&self.db)
            .await
            .map_err(write_err)?;
        if res.rows_affected == 0 {
            // removed by someone else between the lookup and the delete
            return Err(StoreError::not_found(name));
        }
        info!(name = %existing.name, "restaurant_deleted");
        Ok(existing.into())
    }

    #[instrument(skip(self, patch))]
    async fn patch_by_name(&self, name: &str, patch: RestaurantPatch) -> Result<Restaurant, StoreError> {
        let Some(existing) = self.find(name).await? else {
            return Err(StoreError::not_found(name));
        };
        let mut am: restaurant::ActiveModel = existing.into();
        if let Some(address) = patch.address { am.address = Set(address); }
        if let Some(phone) = patch.phone { am.phone = Set(phone); }
        if let Some(rating) = patch.rating { am.rating = Set(rating); }
        am.updated_at = Set(Utc::now().into());

        let updated = am.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => StoreError::not_found(name),
            other => write_err(other),
        })?;
        info!(name = %updated.name, "restaurant_patched");
        Ok(updated.into())
    }
}
