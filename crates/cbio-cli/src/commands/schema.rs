//! `cbio-mcp schema` command implementation.

use anyhow::{Context, Result};
use cbio_adapter_clickhouse::introspect::introspect_schema_json;

use super::{gated_executor, load_config};

/// Print a JSON snapshot of the configured database.
pub async fn run() -> Result<()> {
    let config = load_config()?;
    let executor = gated_executor(&config).await?;

    let snapshot = introspect_schema_json(executor.as_ref())
        .await
        .with_context(|| format!("Failed to introspect database {}", config.mcp.database))?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
