#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{config_from_env_or_memory, connect_with_config};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Fresh connection for the current test's runtime.
///
/// Uses `DATABASE_URL` when set, otherwise a private in-memory SQLite
/// database. In-memory databases live and die with their connection, so
/// they are migrated on every call; a shared server is migrated once.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut cfg = config_from_env_or_memory();
    let in_memory = cfg.url.starts_with("sqlite::memory:");
    if !in_memory {
        cfg.max_connections = cfg.max_connections.max(20);
        cfg.min_connections = cfg.min_connections.min(1);
        cfg.acquire_timeout_secs = 10;
    }

    let db = connect_with_config(&cfg).await?;
    if in_memory {
        migration::Migrator::up(&db, None).await?;
    } else {
        MIGRATED
            .get_or_try_init(|| async { migration::Migrator::up(&db, None).await })
            .await?;
    }
    Ok(db)
}
