use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_orm::{Database, DatabaseConnection};

use super::connect_options;
use super::registry::{BackendKind, DbProvider};
use crate::config::DatabaseConfig;

pub struct PostgresDbProvider;

#[async_trait]
impl DbProvider for PostgresDbProvider {
    fn kind(&self) -> BackendKind {
        BackendKind::Postgres
    }

    fn supports_url(&self, url: &str) -> bool {
        let scheme = url.trim().to_ascii_lowercase();
        ["postgres://", "postgresql://"]
            .iter()
            .any(|prefix| scheme.starts_with(prefix))
    }

    async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
        let options = connect_options(cfg, (cfg.max_connections, cfg.min_idle));
        Database::connect(options)
            .await
            .context("failed to connect to postgres")
    }

    // The pool connects lazily past `min_idle`; fail fast on a dead server.
    async fn post_connect(&self, db: &DatabaseConnection, _cfg: &DatabaseConfig) -> Result<()> {
        db.ping().await.context("postgres did not answer ping")
    }
}
