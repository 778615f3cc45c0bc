//! # cbio-mcp
//!
//! Tools the cBioPortal MCP server exposes to agents. All of them are
//! read-only and run through a [`cbio_core::QueryExecutor`]:
//!
//! | Tool | Arguments | Success payload |
//! |------|-----------|-----------------|
//! | `clickhouse_run_select_query` | `query` | `{"rows": [...]}` |
//! | `clickhouse_list_tables` | none | `{"tables": [...]}` |
//! | `clickhouse_list_table_columns` | `table` | `{"columns": [...]}` |
//!
//! A tool that fails while running answers `{"error_message": "..."}` instead
//! of raising. Only an unknown tool name or malformed arguments become a
//! [`McpError`].
//!
//! ## Example Usage
//!
//! ```ignore
//! use cbio_mcp::ToolExecutor;
//! use serde_json::json;
//!
//! let tools = ToolExecutor::new(executor);
//! let response = tools
//!     .call("clickhouse_run_select_query", &json!({"query": "SELECT 1"}))
//!     .await?;
//! ```

pub mod error;
pub mod executor;
pub mod protocol;
pub mod tools;

pub use error::McpError;
pub use executor::{ToolExecutor, ensure_select};
pub use protocol::{CallToolParams, CallToolResponse, ServerInfo, ToolAnnotations, ToolContent, ToolDefinition};
pub use tools::ToolRegistry;
