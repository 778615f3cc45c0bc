//! Tool registry for MCP tools.
//!
//! [`ToolRegistry::clickhouse`] holds the three read-only ClickHouse tools;
//! execution lives in the `executor` module.

use crate::error::McpError;
use crate::protocol::{ToolAnnotations, ToolDefinition};
use serde_json::{Value, json};
use std::collections::HashMap;

pub const RUN_SELECT_QUERY: &str = "clickhouse_run_select_query";
pub const LIST_TABLES: &str = "clickhouse_list_tables";
pub const LIST_TABLE_COLUMNS: &str = "clickhouse_list_table_columns";

/// Registry of available MCP tools.
#[derive(Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolDefinition>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registry with every ClickHouse tool.
    pub fn clickhouse() -> Self {
        let mut registry = Self::new();
        registry.register(run_select_query_tool());
        registry.register(list_tables_tool());
        registry.register(list_table_columns_tool());
        registry
    }

    /// Register a tool.
    pub fn register(&mut self, tool: ToolDefinition) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    /// List all tools, ordered by name.
    pub fn list(&self) -> Vec<&ToolDefinition> {
        let mut tools: Vec<_> = self.tools.values().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Look up a tool and check its required arguments without running it.
    pub fn validate_call(&self, name: &str, arguments: &Value) -> Result<&ToolDefinition, McpError> {
        let tool = self.get(name).ok_or_else(|| McpError::ToolNotFound {
            name: name.to_string(),
        })?;

        for field in tool.required_arguments() {
            let expected = tool.input_schema["properties"][field]["type"].as_str();
            let reason = match arguments.get(field) {
                None => format!("Missing required field: {}", field),
                Some(value) if expected == Some("string") && !value.is_string() => {
                    format!("'{}' must be a string, got {}", field, value)
                }
                Some(_) => continue,
            };
            return Err(McpError::InvalidArguments {
                tool: name.to_string(),
                reason,
            });
        }
        Ok(tool)
    }

    /// Get tool names, ordered.
    pub fn names(&self) -> Vec<&str> {
        self.list().into_iter().map(|t| t.name.as_str()).collect()
    }
}

fn read_only(title: &str) -> Option<ToolAnnotations> {
    Some(ToolAnnotations {
        title: Some(title.to_string()),
        read_only: Some(true),
        open_world: Some(false),
    })
}

fn run_select_query_tool() -> ToolDefinition {
    ToolDefinition {
        name: RUN_SELECT_QUERY.to_string(),
        description: Some(
            "Execute a ClickHouse SQL SELECT query.\n\n\
             Returns:\n\
             - On success: an object with a single field \"rows\" containing an array of result rows.\n\
             - On failure: an object with a single field \"error_message\" describing the error."
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "A single ClickHouse SELECT statement."
                }
            },
            "required": ["query"]
        }),
        annotations: read_only("Run SELECT query"),
    }
}

fn list_tables_tool() -> ToolDefinition {
    ToolDefinition {
        name: LIST_TABLES.to_string(),
        description: Some(
            "Retrieve a list of all tables in the current database.\n\n\
             Returns:\n\
             - On success: an object with a single field \"tables\" containing objects with \
             name, primary_key, total_rows and comment (when available).\n\
             - On failure: an object with a single field \"error_message\" describing the error."
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {}
        }),
        annotations: read_only("List tables"),
    }
}

fn list_table_columns_tool() -> ToolDefinition {
    ToolDefinition {
        name: LIST_TABLE_COLUMNS.to_string(),
        description: Some(
            "Retrieve a list of all columns for the table in the current database.\n\n\
             Returns:\n\
             - On success: an object with a single field \"columns\" containing objects with \
             name, type (ClickHouse data type) and comment (when available).\n\
             - On failure: an object with a single field \"error_message\" describing the error."
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "table": {
                    "type": "string",
                    "description": "Table name in the current database.",
                    "pattern": "^[A-Za-z0-9_.-]+$"
                }
            },
            "required": ["table"]
        }),
        annotations: read_only("List table columns"),
    }
}
