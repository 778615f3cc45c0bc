//! ClickHouse connection configuration.
//!
//! The server talks to ClickHouse over its HTTP interface. The user and
//! database are not repeated here; they live in [`McpConfig`](super::McpConfig)
//! because they are also what the privilege gate verifies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::{ConfigError, Lookup, read_bool, read_number, read_string};

/// Configuration for the ClickHouse HTTP connection.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClickHouseConfig {
    /// Hostname of the ClickHouse server.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP(S) port of the ClickHouse server.
    #[serde(default = "default_secure_port")]
    pub port: u16,

    /// Password for the configured user. Never serialized.
    #[serde(default, skip_serializing)]
    pub password: String,

    /// Use HTTPS.
    #[serde(default = "default_true")]
    pub secure: bool,

    /// Verify the server certificate when using HTTPS.
    #[serde(default = "default_true")]
    pub verify: bool,

    /// Timeout in seconds for establishing a connection.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Timeout in seconds for a whole request/response round trip.
    #[serde(default = "default_send_receive_timeout")]
    pub send_receive_timeout_secs: u64,
}

impl Default for ClickHouseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_secure_port(),
            password: String::new(),
            secure: true,
            verify: true,
            connect_timeout_secs: default_connect_timeout(),
            send_receive_timeout_secs: default_send_receive_timeout(),
        }
    }
}

impl fmt::Debug for ClickHouseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickHouseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &"<redacted>")
            .field("secure", &self.secure)
            .field("verify", &self.verify)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("send_receive_timeout_secs", &self.send_receive_timeout_secs)
            .finish()
    }
}

impl ClickHouseConfig {
    pub(crate) fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let secure = read_bool(lookup, "CLICKHOUSE_SECURE", true)?;
        // The default port follows the scheme.
        let port_default = if secure {
            default_secure_port()
        } else {
            default_plain_port()
        };

        Ok(Self {
            host: read_string(lookup, "CLICKHOUSE_HOST", &default_host()),
            port: read_number(lookup, "CLICKHOUSE_PORT", port_default)?,
            password: read_string(lookup, "CLICKHOUSE_PASSWORD", ""),
            secure,
            verify: read_bool(lookup, "CLICKHOUSE_VERIFY", true)?,
            connect_timeout_secs: read_number(
                lookup,
                "CLICKHOUSE_CONNECT_TIMEOUT",
                default_connect_timeout(),
            )?,
            send_receive_timeout_secs: read_number(
                lookup,
                "CLICKHOUSE_SEND_RECEIVE_TIMEOUT",
                default_send_receive_timeout(),
            )?,
        })
    }

    /// Base URL of the HTTP interface, e.g. `https://localhost:8443/`.
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}:{}/", scheme, self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn send_receive_timeout(&self) -> Duration {
        Duration::from_secs(self.send_receive_timeout_secs)
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_secure_port() -> u16 {
    8443
}

fn default_plain_port() -> u16 {
    8123
}

fn default_true() -> bool {
    true
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_send_receive_timeout() -> u64 {
    300
}
