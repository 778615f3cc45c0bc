//! Error types for the MCP crate.

use thiserror::Error;

/// Errors raised before a tool gets to run.
///
/// Failures while a tool runs are reported in the tool's own response.
#[derive(Debug, Error)]
pub enum McpError {
    /// Tool not found.
    #[error("tool not found: {name}")]
    ToolNotFound { name: String },

    /// Invalid arguments for tool.
    #[error("invalid arguments for tool {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    /// Serialization error.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
