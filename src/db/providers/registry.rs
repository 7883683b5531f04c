use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use sea_orm::{DatabaseBackend, DatabaseConnection};

use crate::config::DatabaseConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Postgres,
    Sqlite,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Postgres => "postgres",
            BackendKind::Sqlite => "sqlite",
        }
    }

    pub fn backend(self) -> DatabaseBackend {
        match self {
            BackendKind::Postgres => DatabaseBackend::Postgres,
            BackendKind::Sqlite => DatabaseBackend::Sqlite,
        }
    }
}

/// A relational store the repositories can run against.
#[async_trait]
pub trait DbProvider: Send + Sync {
    fn kind(&self) -> BackendKind;
    fn supports_url(&self, url: &str) -> bool;
    async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection>;
    async fn post_connect(&self, _db: &DatabaseConnection, _cfg: &DatabaseConfig) -> Result<()> {
        Ok(())
    }
}

/// Providers in registration order; the first one accepting a URL wins.
#[derive(Default)]
pub struct DbProviders {
    providers: Vec<Arc<dyn DbProvider>>,
}

impl DbProviders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, provider: Arc<dyn DbProvider>) -> Result<Self> {
        self.add(provider)?;
        Ok(self)
    }

    pub fn add(&mut self, provider: Arc<dyn DbProvider>) -> Result<()> {
        let kind = provider.kind();
        if self.providers.iter().any(|known| known.kind() == kind) {
            bail!("database provider already registered: {}", kind.as_str());
        }
        self.providers.push(provider);
        Ok(())
    }

    pub fn kinds(&self) -> Vec<BackendKind> {
        self.providers.iter().map(|provider| provider.kind()).collect()
    }

    pub fn provider_for_url(&self, url: &str) -> Result<Arc<dyn DbProvider>> {
        self.providers
            .iter()
            .find(|provider| provider.supports_url(url))
            .cloned()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "unsupported database url '{}'; expected postgres://, postgresql:// or sqlite:",
                    redact_url(url)
                )
            })
    }
}

pub(crate) fn redact_url(url: &str) -> String {
    let trimmed = url.trim();
    if let Some((scheme, _)) = trimmed.split_once("://") {
        format!("{scheme}://<redacted>")
    } else if let Some((scheme, _)) = trimmed.split_once(':') {
        format!("{scheme}:<redacted>")
    } else {
        "<invalid-url>".to_string()
    }
}
