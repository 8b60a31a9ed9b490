//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `INVENTORY_*` environment variables, command-line flags
//! or a config file. Every value is optional and falls back to the
//! constants below.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_TOKEN_TTL_HOURS: u32 = 24;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Raised when a configured value cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
}

/// Runtime settings for the inventory service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "INVENTORY")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// HS256 secret for session tokens; a random one is generated when absent.
    pub token_secret: Option<String>,
    /// Session token lifetime in hours.
    pub token_ttl_hours: Option<u32>,
    /// bcrypt work factor.
    pub bcrypt_cost: Option<u32>,
    /// Create the default users and items when their collections are empty.
    pub seed_defaults: Option<bool>,
    /// Client request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    /// Non-blank database URL, if configured.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, falling back to the default.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Non-empty token secret, if configured.
    pub fn token_secret(&self) -> Option<&[u8]> {
        self.token_secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .map(str::as_bytes)
    }

    /// Session token lifetime.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(
            self.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS),
        ))
    }

    /// bcrypt cost, falling back to [`bcrypt::DEFAULT_COST`].
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST)
    }

    /// Whether default data is seeded at startup; on unless disabled.
    pub fn seed_defaults(&self) -> bool {
        self.seed_defaults.unwrap_or(true)
    }

    /// Client request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}
