//! CLI command implementations for the cBioPortal MCP server.

pub mod check;
pub mod schema;
pub mod tools;

use anyhow::{Context, Result};
use cbio_adapter_clickhouse::ClickHouseAdapter;
use cbio_core::{AppConfig, QueryExecutor};
use cbio_grants::ensure_db_permissions;
use std::sync::Arc;

/// Load configuration from the environment.
pub fn load_config() -> Result<AppConfig> {
    AppConfig::from_env().context("Invalid CLICKHOUSE_* configuration")
}

/// Connect to ClickHouse and pass the privilege gate.
///
/// Nothing may query the database through the returned executor before the
/// gate has passed.
pub async fn gated_executor(config: &AppConfig) -> Result<Arc<dyn QueryExecutor>> {
    let adapter =
        ClickHouseAdapter::from_config(config).context("Failed to create ClickHouse client")?;
    let executor: Arc<dyn QueryExecutor> = Arc::new(adapter);

    ensure_db_permissions(executor.clone(), &config.mcp).await?;
    Ok(executor)
}
