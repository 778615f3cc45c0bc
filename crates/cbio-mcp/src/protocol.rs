//! MCP protocol types.
//!
//! Only the pieces needed to describe and call tools.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::McpError;

/// Guidance handed to agents when they connect.
pub const SERVER_INSTRUCTIONS: &str = "\
You are the cBioPortal MCP Server. You provide structured, reliable access to \
cBioPortal cancer genomics data stored in ClickHouse.

1. Always respond truthfully and rely on the underlying database resources.
2. If requested data is unavailable or a query cannot be executed, say so; \
do not guess or fabricate results.
3. Use the tools to run read-only SELECT queries and to explore tables and columns.
4. Never attempt to modify the database. INSERT, UPDATE, DELETE and DDL are forbidden.
5. Use only tables and columns that exist, and read their comments to pick the right ones.
6. Return results as JSON, including row counts and status messages where relevant.
7. Questions that cannot be answered from the database are out of scope.";

/// MCP server info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl ServerInfo {
    pub fn current() -> Self {
        Self {
            name: "cBioPortal MCP Server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
        }
    }
}

/// MCP tool definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<ToolAnnotations>,
}

impl ToolDefinition {
    /// Names listed under `required` in the input schema.
    pub fn required_arguments(&self) -> Vec<&str> {
        self.input_schema["required"]
            .as_array()
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn is_read_only(&self) -> bool {
        self.annotations
            .as_ref()
            .and_then(|a| a.read_only)
            .unwrap_or(false)
    }
}

/// Tool annotations (MCP hints).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolAnnotations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "readOnlyHint", skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(rename = "openWorldHint", skip_serializing_if = "Option::is_none")]
    pub open_world: Option<bool>,
}

/// Call tool request parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl CallToolParams {
    /// Build params from a tool name and optional raw JSON arguments.
    ///
    /// Missing arguments become `{}`. Arguments must be a JSON object.
    pub fn parse(name: impl Into<String>, raw_arguments: Option<&str>) -> Result<Self, McpError> {
        let name = name.into();
        let arguments = match raw_arguments {
            Some(raw) => serde_json::from_str(raw)?,
            None => Value::Object(Map::new()),
        };
        if !arguments.is_object() {
            return Err(McpError::InvalidArguments {
                tool: name,
                reason: "arguments must be a JSON object".to_string(),
            });
        }
        Ok(Self { name, arguments })
    }
}

/// Call tool response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolResponse {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl CallToolResponse {
    /// A successful response carrying `value`.
    pub fn json(value: Value) -> Self {
        Self {
            content: vec![ToolContent::Json { json: value }],
            is_error: None,
        }
    }

    /// A failed tool run, reported as `{"error_message": ...}`.
    pub fn error_message(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Json {
                json: json!({ "error_message": message.into() }),
            }],
            is_error: Some(true),
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// The first JSON payload, if any.
    pub fn payload(&self) -> Option<&Value> {
        self.content.first().map(|c| match c {
            ToolContent::Json { json } => json,
        })
    }
}

/// Tool response content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "json")]
    Json { json: Value },
}
