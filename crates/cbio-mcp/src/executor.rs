//! Tool execution engine.
//!
//! Maps a tool call to a SELECT statement, runs it through the configured
//! [`QueryExecutor`] and shapes the rows into the tool's response object.

use anyhow::{Context, bail};
use cbio_adapter_clickhouse::introspect::{LIST_TABLES_QUERY, list_table_columns_query};
use cbio_core::QueryExecutor;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::error::McpError;
use crate::protocol::CallToolResponse;
use crate::tools::{LIST_TABLE_COLUMNS, LIST_TABLES, RUN_SELECT_QUERY, ToolRegistry};

/// Reject anything that is not a SELECT statement.
pub fn ensure_select(query: &str) -> anyhow::Result<()> {
    if !query.trim().to_uppercase().starts_with("SELECT") {
        bail!(
            "Non select queries are forbidden: '{}'. Skipping the query.",
            query
        );
    }
    Ok(())
}

/// Runs the ClickHouse tools against a database.
pub struct ToolExecutor {
    executor: Arc<dyn QueryExecutor>,
    registry: ToolRegistry,
}

impl ToolExecutor {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            executor,
            registry: ToolRegistry::clickhouse(),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute a tool call.
    ///
    /// Returns `Err` only for an unknown tool or missing arguments; a tool
    /// that fails while running yields an `error_message` response.
    pub async fn call(&self, name: &str, arguments: &Value) -> Result<CallToolResponse, McpError> {
        self.registry.validate_call(name, arguments)?;

        let outcome = match name {
            RUN_SELECT_QUERY => {
                let query = string_argument(name, arguments, "query")?;
                self.run_select_query(query)
                    .await
                    .map(|rows| json!({ "rows": rows }))
            }
            LIST_TABLES => {
                info!("{}: called", LIST_TABLES);
                self.run_select_query(LIST_TABLES_QUERY)
                    .await
                    .map(|tables| json!({ "tables": tables }))
            }
            LIST_TABLE_COLUMNS => {
                let table = string_argument(name, arguments, "table")?;
                info!(table, "{}: called", LIST_TABLE_COLUMNS);
                self.list_table_columns(table)
                    .await
                    .map(|columns| json!({ "columns": columns }))
            }
            _ => {
                return Err(McpError::ToolNotFound {
                    name: name.to_string(),
                });
            }
        };

        Ok(match outcome {
            Ok(value) => {
                debug!(tool = name, result = %value, "tool call succeeded");
                CallToolResponse::json(value)
            }
            Err(e) => {
                let message = format!("{:#}", e);
                error!("{}: {}", name, message);
                CallToolResponse::error_message(message)
            }
        })
    }

    /// Run a SELECT and return its rows as objects keyed by column name.
    pub async fn run_select_query(&self, query: &str) -> anyhow::Result<Vec<Value>> {
        ensure_select(query)?;
        let result = self.executor.execute(query).await?;
        // A FORMAT clause overrides JSONCompact and the column names are lost.
        if result.columns.is_empty() && !result.is_empty() {
            bail!(
                "Query returned {} row(s) without column names; remove any FORMAT clause",
                result.len()
            );
        }
        Ok(result.records())
    }

    async fn list_table_columns(&self, table: &str) -> anyhow::Result<Vec<Value>> {
        let query = list_table_columns_query(table)?;
        self.run_select_query(&query)
            .await
            .with_context(|| format!("listing columns of {}", table))
    }
}

fn string_argument<'a>(tool: &str, arguments: &'a Value, field: &str) -> Result<&'a str, McpError> {
    match arguments.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(McpError::InvalidArguments {
            tool: tool.to_string(),
            reason: format!("'{}' must be a string, got {}", field, other),
        }),
        None => Err(McpError::InvalidArguments {
            tool: tool.to_string(),
            reason: format!("Missing required field: {}", field),
        }),
    }
}
