//! Shared types for the cBioPortal MCP server.
//!
//! - [`config`]: process configuration, read once from the environment.
//! - [`executor`]: the seam through which every crate talks to ClickHouse.

// Configuration types shared across all crates
pub mod config;

// Query execution seam
pub mod executor;

// Re-export commonly used types for convenience
pub use config::{AppConfig, ClickHouseConfig, ConfigError, McpConfig, Transport};
pub use executor::{QueryError, QueryExecutor, QueryResult};
