//! ClickHouse privilege vocabulary used by the startup gate.

use std::fmt;

/// A privilege name as understood by `CHECK GRANT`.
///
/// The enum is closed: the only way to change what the gate looks for is to
/// change this file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Privilege {
    Select,
    Insert,
    Alter,
    Create,
    Drop,
    Truncate,
    Optimize,
    AccessManagement,
    System,
    All,
}

impl Privilege {
    /// Privileges the MCP user must not hold on `*.*`.
    pub const FORBIDDEN: [Privilege; 9] = [
        Privilege::Insert,
        Privilege::Alter,
        Privilege::Create,
        Privilege::Drop,
        Privilege::Truncate,
        Privilege::Optimize,
        Privilege::AccessManagement,
        Privilege::System,
        Privilege::All,
    ];

    /// SQL spelling of the privilege.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Privilege::Select => "SELECT",
            Privilege::Insert => "INSERT",
            Privilege::Alter => "ALTER",
            Privilege::Create => "CREATE",
            Privilege::Drop => "DROP",
            Privilege::Truncate => "TRUNCATE",
            Privilege::Optimize => "OPTIMIZE",
            Privilege::AccessManagement => "ACCESS MANAGEMENT",
            Privilege::System => "SYSTEM",
            Privilege::All => "ALL",
        }
    }

    pub fn is_forbidden(&self) -> bool {
        Self::FORBIDDEN.contains(self)
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Sort privileges by SQL name and join them with `", "`.
///
/// Error messages and the suggested `REVOKE` use this so output is stable
/// regardless of check order.
pub fn join_sorted(privileges: &[Privilege]) -> String {
    let mut names: Vec<&str> = privileges.iter().map(Privilege::as_sql).collect();
    names.sort_unstable();
    names.dedup();
    names.join(", ")
}
