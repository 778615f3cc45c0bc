//! Configuration types for the cBioPortal MCP server.
//!
//! All settings come from environment variables and are read exactly once at
//! process start. The resulting [`AppConfig`] is an immutable snapshot that is
//! passed explicitly to whoever needs it.
//!
//! # Variables
//!
//! - **MCP / identity**: `CLICKHOUSE_MCP_SERVER_TRANSPORT`, `CLICKHOUSE_MCP_BIND_HOST`,
//!   `CLICKHOUSE_MCP_BIND_PORT`, `CLICKHOUSE_USER`, `CLICKHOUSE_DATABASE`
//! - **Connection**: `CLICKHOUSE_HOST`, `CLICKHOUSE_PORT`, `CLICKHOUSE_PASSWORD`,
//!   `CLICKHOUSE_SECURE`, `CLICKHOUSE_VERIFY`, `CLICKHOUSE_CONNECT_TIMEOUT`,
//!   `CLICKHOUSE_SEND_RECEIVE_TIMEOUT`

pub mod clickhouse;
pub mod mcp;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub use clickhouse::ClickHouseConfig;
pub use mcp::{McpConfig, Transport};

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Unknown transport name.
    #[error("Invalid transport '{value}'. Valid options: {valid}")]
    InvalidTransport { value: String, valid: String },

    /// A variable that must be numeric was not.
    #[error("{var} must be a number, got '{value}'")]
    InvalidNumber { var: String, value: String },

    /// A variable that must be a boolean was not.
    #[error("{var} must be a boolean (true/false), got '{value}'")]
    InvalidBool { var: String, value: String },
}

/// Complete process configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// MCP server settings and the identity under verification.
    #[serde(default)]
    pub mcp: McpConfig,

    /// ClickHouse connection settings.
    #[serde(default)]
    pub clickhouse: ClickHouseConfig,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// `from_env` is this with `std::env::var`; tests pass a map instead.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            mcp: McpConfig::from_lookup(&lookup)?,
            clickhouse: ClickHouseConfig::from_lookup(&lookup)?,
        })
    }
}

/// Variable lookup shared by the section loaders.
pub(crate) type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

pub(crate) fn read_string(lookup: Lookup<'_>, var: &str, default: &str) -> String {
    lookup(var).unwrap_or_else(|| default.to_string())
}

pub(crate) fn read_number<T: FromStr>(
    lookup: Lookup<'_>,
    var: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            var: var.to_string(),
            value: raw,
        }),
    }
}

pub(crate) fn read_bool(lookup: Lookup<'_>, var: &str, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var: var.to_string(),
            value: raw,
        }),
    }
}
