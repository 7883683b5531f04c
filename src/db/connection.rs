use anyhow::Context;
use sea_orm::DatabaseConnection;
use tracing::info;

use super::providers::{self, DbProviders};
use crate::config::DatabaseConfig;

const ENTITY_MODULES: &str = "rental_data::db::entities::*";

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let registry = providers::default_registry()?;
    connect_with(&registry, cfg).await
}

pub async fn connect_with(
    registry: &DbProviders,
    cfg: &DatabaseConfig,
) -> anyhow::Result<DatabaseConnection> {
    let provider = registry.provider_for_url(&cfg.url)?;
    let backend = provider.kind().as_str();

    let db = provider.connect(cfg).await?;
    provider
        .post_connect(&db, cfg)
        .await
        .with_context(|| format!("{backend} post-connect setup failed"))?;
    info!(backend, "connected to database");

    if cfg.sync_schema {
        sync_schema(&db).await?;
    }
    Ok(db)
}

/// Creates missing tables, columns and foreign keys for every entity under
/// `db::entities`.
pub async fn sync_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    info!("syncing database schema from entities");
    db.get_schema_registry(ENTITY_MODULES)
        .sync(db)
        .await
        .context("schema sync failed")?;
    Ok(())
}
