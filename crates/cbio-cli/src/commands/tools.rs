//! Tools introspection and invocation commands.
//!
//! `cbio-mcp tools list` - List available tools (offline).
//! `cbio-mcp tools describe` - Show the full definition of one tool (offline).
//! `cbio-mcp tools call` - Run a tool after the privilege gate passes.

use anyhow::{Result, anyhow};
use cbio_mcp::{CallToolParams, ServerInfo, ToolDefinition, ToolExecutor, ToolRegistry};

use super::{gated_executor, load_config};

/// List the available tools.
pub fn list(verbose: bool) -> Result<()> {
    let info = ServerInfo::current();
    let registry = ToolRegistry::clickhouse();

    println!("\n🧬 {} v{}", info.name, info.version);

    if verbose && let Some(instructions) = &info.instructions {
        println!("\n📜 Instructions:");
        for line in instructions.lines() {
            println!("   {}", line);
        }
    }

    println!("\n🔧 Available Tools ({}):", registry.len());
    for tool in registry.list() {
        print_summary(tool);
        if verbose {
            println!(
                "     Schema: {}",
                serde_json::to_string_pretty(&tool.input_schema)?
            );
        }
    }

    println!();
    Ok(())
}

fn print_summary(tool: &ToolDefinition) {
    let badge = if tool.is_read_only() { "read" } else { "write" };
    println!("   • {} ({})", tool.name, badge);

    if let Some(first_line) = tool.description.as_deref().and_then(|d| d.lines().next()) {
        println!("     {}", first_line);
    }
}

/// Show detailed schema for a specific tool.
pub fn describe(name: &str) -> Result<()> {
    let registry = ToolRegistry::clickhouse();
    let tool = registry
        .get(name)
        .ok_or_else(|| anyhow!("Tool '{}' not found. Available: {}", name, registry.names().join(", ")))?;

    println!("\nTool: {}", tool.name);

    if let Some(desc) = &tool.description {
        println!("\nDescription:\n{}", desc);
    }

    println!("\nInput Schema:");
    println!("{}", serde_json::to_string_pretty(&tool.input_schema)?);

    if let Some(annotations) = &tool.annotations {
        println!("\nAnnotations:");
        if let Some(title) = &annotations.title {
            println!("  • title: {}", title);
        }
        if let Some(read_only) = annotations.read_only {
            println!("  • readOnlyHint: {}", read_only);
        }
        if let Some(open_world) = annotations.open_world {
            println!("  • openWorldHint: {}", open_world);
        }
    }

    println!();
    Ok(())
}

/// Call a tool and print its JSON response on stdout.
pub async fn call(name: &str, arguments: Option<&str>) -> Result<()> {
    // Reject bad input before touching the database.
    let params = CallToolParams::parse(name, arguments)?;
    ToolRegistry::clickhouse().validate_call(&params.name, &params.arguments)?;

    let config = load_config()?;
    let executor = gated_executor(&config).await?;
    let tools = ToolExecutor::new(executor);

    let response = tools.call(&params.name, &params.arguments).await?;
    let output = response
        .payload()
        .cloned()
        .unwrap_or(serde_json::Value::Null);

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
