//! Startup wiring for the restaurant store.
//!
//! Picks the backend named in `[storage]` and hands back a shared trait
//! object so the HTTP layer never knows which one it talks to.

use std::sync::Arc;

use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use tracing::info;

use crate::restaurant::{FileRestaurantStore, RestaurantStore, SeaOrmRestaurantStore};

/// Build the configured store; runs pending migrations for the database backend
/// unless `database.run_migrations` is off.
pub async fn open_store(cfg: &AppConfig) -> anyhow::Result<Arc<dyn RestaurantStore>> {
    match cfg.storage.backend {
        StorageBackend::File => {
            let store = FileRestaurantStore::open(&cfg.storage.data_file)
                .await?
                .reject_duplicate_names(cfg.storage.reject_duplicate_names);
            info!(
                backend = "file",
                path = %store.path().display(),
                reject_duplicate_names = cfg.storage.reject_duplicate_names,
                "restaurant store ready"
            );
            Ok(Arc::new(store))
        }
        StorageBackend::Database => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            if cfg.database.run_migrations {
                migration::Migrator::up(&db, None).await?;
                info!("migrations applied");
            }
            info!(backend = "database", "restaurant store ready");
            Ok(Arc::new(SeaOrmRestaurantStore::new(db)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restaurant::NewRestaurant;

    #[tokio::test]
    async fn file_backend_is_built_from_config() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("svc_runtime_{}", uuid::Uuid::new_v4()));
        let mut cfg = AppConfig::default();
        cfg.storage.data_file = dir.join("restaurants.json");
        cfg.storage.reject_duplicate_names = true;

        let store = open_store(&cfg).await?;
        assert!(cfg.storage.data_file.exists());

        let r = NewRestaurant { name: "A".into(), address: "x".into(), phone: "1".into(), rating: None };
        store.insert(r.clone()).await?;
        assert!(store.insert(r).await.is_err());

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn database_backend_migrates_in_memory_sqlite() -> Result<(), anyhow::Error> {
        let mut cfg = AppConfig::default();
        cfg.storage.backend = StorageBackend::Database;
        cfg.database.url = "sqlite::memory:".into();
        cfg.database.max_connections = 1;
        cfg.database.min_connections = 1;

        let store = open_store(&cfg).await?;
        assert!(store.list_all().await?.is_empty());
        Ok(())
    }
}
