//! Grant scopes (`db.*`, `system.tables`, `*.*`).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when building a scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("grant scope must not be empty")]
    Empty,
}

/// Target of a grant check.
///
/// Always trimmed and never empty; a bare `*` is stored as `*.*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Scope(String);

impl Scope {
    /// Parse a scope string, normalizing `*` to `*.*`.
    pub fn parse(raw: &str) -> Result<Self, ScopeError> {
        match raw.trim() {
            "" => Err(ScopeError::Empty),
            "*" => Ok(Self::all()),
            trimmed => Ok(Self(trimmed.to_string())),
        }
    }

    /// `*.*`
    pub fn all() -> Self {
        Self("*.*".to_string())
    }

    /// Every table of one database: `<database>.*`.
    pub fn database(database: &str) -> Result<Self, ScopeError> {
        let database = database.trim();
        if database.is_empty() {
            return Err(ScopeError::Empty);
        }
        Ok(Self(format!("{}.*", database)))
    }

    /// Scope for a fixed, already-qualified catalog table name.
    pub(crate) fn catalog(qualified_name: &'static str) -> Self {
        Self(qualified_name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Scope {
    type Error = ScopeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        scope.0
    }
}
