//! Permission error raised by the startup gate.
//!
//! Every gate failure produces the same error type. The message is meant to be
//! printed as-is to an operator: a summary line, one or more `- ` lines naming
//! what is missing or excessive, and a statement that fixes it.

use std::fmt;

use crate::catalog::CatalogTable;
use crate::privilege::{self, Privilege};

/// Error returned when the database user does not satisfy the privilege contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionError {
    /// Which gate failed.
    pub kind: PermissionErrorKind,
    /// The ClickHouse user that was checked.
    pub user: String,
    /// What the gate found: the missing scope, the excess privileges, or the
    /// missing catalog tables. Sorted where order is not fixed.
    pub subjects: Vec<String>,
    /// Statement an operator can run to fix the problem.
    pub remediation: String,
    /// Full multi-line message.
    pub message: String,
}

impl PermissionError {
    /// `SELECT ON <database>.*` is missing.
    pub fn missing_minimum_privilege(user: &str, database: &str) -> Self {
        let scope = format!("{}.*", database);
        let remediation = format!("GRANT SELECT ON {} TO {};", scope, user);
        let message = format!(
            "Permission check failed: ClickHouse user '{user}' lacks required privileges.\n\
             - Missing: SELECT ON {scope} for user '{user}'.\n\
             Grant minimally:\n  {remediation}"
        );
        Self {
            kind: PermissionErrorKind::MissingMinimumPrivilege,
            user: user.to_string(),
            subjects: vec![scope],
            remediation,
            message,
        }
    }

    /// One or more forbidden privileges are granted on `*.*`.
    pub fn excess_privilege(user: &str, privileges: &[Privilege]) -> Self {
        let joined = privilege::join_sorted(privileges);
        let remediation = format!("REVOKE {} ON *.* FROM {};", joined, user);
        let message = format!(
            "Permission check failed: ClickHouse user '{user}' has excessive privileges.\n\
             - Forbidden privileges detected on *.*: {joined}\n\
             The MCP ClickHouse user must be strictly read-only. \
             Revoke these permissions, e.g.:\n  {remediation}"
        );
        Self {
            kind: PermissionErrorKind::ExcessPrivilege,
            user: user.to_string(),
            subjects: joined.split(", ").map(str::to_string).collect(),
            remediation,
            message,
        }
    }

    /// `SELECT` on one or more catalog tables is missing.
    pub fn missing_introspection_privilege(user: &str, tables: &[CatalogTable]) -> Self {
        let names: Vec<&str> = tables.iter().map(CatalogTable::qualified_name).collect();
        let joined = names.join(", ");
        let remediation = format!("GRANT SELECT ON {} TO {};", joined, user);
        let message = format!(
            "Permission check failed: ClickHouse user '{user}' lacks required system table access.\n\
             Schema discovery reads table and column listings from the system catalog.\n\
             - Missing SELECT on: {joined}\n\
             Grant these permissions, e.g.:\n  {remediation}"
        );
        Self {
            kind: PermissionErrorKind::MissingIntrospectionPrivilege,
            user: user.to_string(),
            subjects: names.into_iter().map(str::to_string).collect(),
            remediation,
            message,
        }
    }
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PermissionError {}

/// Which part of the privilege contract was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionErrorKind {
    /// No read access to the application database.
    MissingMinimumPrivilege,
    /// Write or administrative privileges on `*.*`.
    ExcessPrivilege,
    /// No read access to `system.tables` and/or `system.columns`.
    MissingIntrospectionPrivilege,
}
