//! `cbio-mcp check` command implementation.

use anyhow::Result;

use super::{gated_executor, load_config};

/// Run the privilege gate and report the outcome.
pub async fn run() -> Result<()> {
    let config = load_config()?;

    println!("🔍 Checking ClickHouse privileges...");
    println!("   Server:    {}", config.clickhouse.base_url());
    println!("   User:      {}", config.mcp.user);
    println!("   Database:  {}", config.mcp.database);
    match config.mcp.bind_addr() {
        Some(addr) => println!("   Transport: {} ({})", config.mcp.transport, addr),
        None => println!("   Transport: {}", config.mcp.transport),
    }
    println!();

    gated_executor(&config).await?;

    println!("✅ All permission checks passed!");
    Ok(())
}
