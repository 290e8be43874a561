use async_trait::async_trait;

use super::domain::{NewRestaurant, Restaurant, RestaurantPatch};
use crate::errors::StoreError;

/// Durable CRUD over the restaurant collection, keyed by exact `name`.
/// Implementations can be file-backed or database-backed.
#[async_trait]
pub trait RestaurantStore: Send + Sync {
    /// Every record, in storage order.
    async fn list_all(&self) -> Result<Vec<Restaurant>, StoreError>;

    /// `Ok(None)` when no record matches; absence is not an error here.
    async fn get_by_name(&self, name: &str) -> Result<Option<Restaurant>, StoreError>;

    /// Persist a new record and return it as stored.
    async fn insert(&self, record: NewRestaurant) -> Result<Restaurant, StoreError>;

    /// Remove the first record with this name and return it; `NotFound` otherwise.
    async fn delete_by_name(&self, name: &str) -> Result<Restaurant, StoreError>;

    /// Overwrite only the supplied fields; `NotFound` if no record matches.
    async fn patch_by_name(&self, name: &str, patch: RestaurantPatch) -> Result<Restaurant, StoreError>;
}
