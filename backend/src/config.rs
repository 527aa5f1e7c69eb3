//! Database configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

/// Errors raised when settings cannot produce a pool configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatabaseSettingsError {
    /// No URL was supplied by any configuration source.
    #[error("database URL is not configured; set FILMORATE_DB_URL or pass --url")]
    MissingUrl,
    /// More idle connections were requested than the pool may open.
    #[error("min_idle ({min_idle}) exceeds max_connections ({max_connections})")]
    IdleExceedsMax {
        /// Requested idle connections.
        min_idle: u32,
        /// Configured pool ceiling.
        max_connections: u32,
    },
}

/// Connection settings for the PostgreSQL store.
///
/// Values come from CLI arguments, `FILMORATE_DB_*` environment variables
/// and configuration files, in OrthoConfig's precedence order.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FILMORATE_DB")]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL.
    pub url: Option<String>,
    /// Upper bound on pooled connections.
    #[ortho_config(default = 10)]
    pub max_connections: u32,
    /// Connections kept open while idle.
    #[ortho_config(default = 2)]
    pub min_idle: u32,
    /// Checkout timeout in seconds.
    #[ortho_config(default = 30)]
    pub connect_timeout_secs: u64,
}

impl DatabaseSettings {
    /// Return the configured URL.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseSettingsError::MissingUrl`] when no URL is set or it
    /// is blank.
    pub fn database_url(&self) -> Result<&str, DatabaseSettingsError> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(DatabaseSettingsError::MissingUrl)
    }

    /// Build the pool configuration for these settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing or `min_idle` exceeds
    /// `max_connections`.
    pub fn to_pool_config(&self) -> Result<PoolConfig, DatabaseSettingsError> {
        let url = self.database_url()?;
        if self.min_idle > self.max_connections {
            return Err(DatabaseSettingsError::IdleExceedsMax {
                min_idle: self.min_idle,
                max_connections: self.max_connections,
            });
        }
        Ok(PoolConfig::new(url)
            .with_max_size(self.max_connections)
            .with_min_idle(Some(self.min_idle))
            .with_connection_timeout(Duration::from_secs(self.connect_timeout_secs)))
    }
}
