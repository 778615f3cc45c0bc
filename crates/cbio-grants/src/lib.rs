//! Startup privilege gate for the cBioPortal MCP server.
//!
//! The MCP server must run as a ClickHouse user that can read the application
//! database and the schema catalog, and nothing more. [`PrivilegeVerifier`]
//! enforces that contract with `CHECK GRANT` before any tool is served; a
//! failure is a [`PermissionError`] the host process treats as fatal.
//!
//! ```ignore
//! use cbio_grants::PrivilegeVerifier;
//!
//! let verifier = PrivilegeVerifier::with_executor(executor);
//! verifier.verify(&config.mcp).await?;
//! ```

pub mod catalog;
pub mod error;
pub mod inspector;
pub mod privilege;
pub mod scope;
pub mod verifier;

pub use catalog::CatalogTable;
pub use error::{PermissionError, PermissionErrorKind};
pub use inspector::{GrantCheck, GrantInspector, check_grant_statement};
pub use privilege::Privilege;
pub use scope::{Scope, ScopeError};
pub use verifier::{PrivilegeVerifier, ensure_db_permissions};
