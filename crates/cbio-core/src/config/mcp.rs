//! MCP server configuration.
//!
//! Besides the transport settings, this section carries the database identity
//! and application schema that the startup privilege gate verifies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{ConfigError, Lookup, read_number, read_string};

/// Configuration for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpConfig {
    /// Transport type: "stdio", "http" or "sse".
    #[serde(default)]
    pub transport: Transport,

    /// Host to bind to (only used for HTTP and SSE).
    #[serde(default = "default_bind_host")]
    pub bind_host: String,

    /// Port to bind to (only used for HTTP and SSE).
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// ClickHouse user the server runs as.
    #[serde(default = "default_user")]
    pub user: String,

    /// ClickHouse database the server runs against.
    #[serde(default = "default_database")]
    pub database: String,
}

/// MCP transport type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Standard input/output transport (for Claude Desktop, etc.).
    #[default]
    Stdio,
    /// Streamable HTTP transport.
    Http,
    /// Server-sent events transport.
    Sse,
}

impl Transport {
    /// Every supported transport, in documentation order.
    pub const ALL: [Transport; 3] = [Transport::Stdio, Transport::Http, Transport::Sse];

    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Stdio => "stdio",
            Transport::Http => "http",
            Transport::Sse => "sse",
        }
    }

    /// Whether this transport listens on a host/port.
    pub fn is_network(&self) -> bool {
        matches!(self, Transport::Http | Transport::Sse)
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transport {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Transport::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| ConfigError::InvalidTransport {
                value: lowered,
                valid: Transport::ALL
                    .iter()
                    .map(|t| format!("\"{}\"", t))
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            bind_host: default_bind_host(),
            bind_port: default_bind_port(),
            user: default_user(),
            database: default_database(),
        }
    }
}

impl McpConfig {
    pub(crate) fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let transport = match lookup("CLICKHOUSE_MCP_SERVER_TRANSPORT") {
            Some(raw) => raw.parse()?,
            None => Transport::default(),
        };

        Ok(Self {
            transport,
            bind_host: read_string(lookup, "CLICKHOUSE_MCP_BIND_HOST", &default_bind_host()),
            bind_port: read_number(lookup, "CLICKHOUSE_MCP_BIND_PORT", default_bind_port())?,
            user: read_string(lookup, "CLICKHOUSE_USER", &default_user()),
            database: read_string(lookup, "CLICKHOUSE_DATABASE", &default_database()),
        })
    }

    /// Bind address for network transports, `None` for stdio.
    pub fn bind_addr(&self) -> Option<String> {
        self.transport
            .is_network()
            .then(|| format!("{}:{}", self.bind_host, self.bind_port))
    }
}

fn default_bind_host() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8000
}

fn default_user() -> String {
    "app_user".to_string()
}

fn default_database() -> String {
    "cgds_public_2025_06_24".to_string()
}
