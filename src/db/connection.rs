use std::sync::Arc;

use anyhow::Result;
use sea_orm::DatabaseConnection;
use tracing::info;

use super::providers::{DbProviders, PostgresDbProvider, SqliteDbProvider};
use crate::config::DatabaseConfig;

pub const ENTITY_REGISTRY_PATTERN: &str = "qbank::db::entities::*";

pub fn default_providers() -> Result<DbProviders> {
    DbProviders::new()
        .with_provider(Arc::new(SqliteDbProvider))?
        .with_provider(Arc::new(PostgresDbProvider))
}

/// Connects via the provider matching the configured url scheme and syncs the
/// schema from the entity registry.
pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let providers = default_providers()?;
    let provider = providers.provider_for_url(&cfg.url)?;

    let db = provider.connect(cfg).await?;
    provider.post_connect(&db, cfg).await?;

    info!(backend = provider.id().as_str(), "syncing database schema from entities");
    sync_schema(&db).await?;
    Ok(db)
}

pub async fn sync_schema(db: &DatabaseConnection) -> Result<()> {
    db.get_schema_registry(ENTITY_REGISTRY_PATTERN).sync(db).await?;
    Ok(())
}
