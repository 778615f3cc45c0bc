//! Grant inspector: answers "does the current user hold P on S?".
//!
//! Uses ClickHouse's `CHECK GRANT <privilege> ON <scope>`, which returns a
//! single `1`/`0` cell. The projection may come back without column names, so
//! only the first cell of the first row is read.
//!
//! Failures never propagate. A statement that could not be evaluated yields
//! [`GrantCheck::Inconclusive`], which counts as not granted: an unknown
//! answer must never open the gate.

use cbio_core::{QueryExecutor, QueryResult};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::privilege::Privilege;
use crate::scope::Scope;

/// Outcome of one grant check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantCheck {
    /// The server answered `1`.
    Granted,
    /// The server answered anything else, or nothing.
    NotGranted,
    /// The check could not be evaluated.
    Inconclusive,
}

impl GrantCheck {
    /// Collapse to a boolean. Only [`GrantCheck::Granted`] is `true`.
    pub fn is_granted(&self) -> bool {
        matches!(self, GrantCheck::Granted)
    }

    /// Interpret a `CHECK GRANT` result.
    pub fn from_result(result: &QueryResult) -> Self {
        match result.first_cell() {
            Some(cell) if cell_is_one(cell) => GrantCheck::Granted,
            _ => GrantCheck::NotGranted,
        }
    }
}

/// True iff the cell, read as an integer, is exactly 1.
///
/// Fractional values such as `1.5` are not truncated and never grant.
fn cell_is_one(cell: &Value) -> bool {
    match cell {
        Value::Number(n) => {
            n.as_i64() == Some(1) || n.as_u64() == Some(1) || n.as_f64() == Some(1.0)
        }
        Value::String(s) => s.trim().parse::<i64>() == Ok(1),
        Value::Bool(b) => *b,
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

/// Build the `CHECK GRANT` statement for one privilege and scope.
pub fn check_grant_statement(privilege: Privilege, scope: &Scope) -> String {
    format!("CHECK GRANT {} ON {}", privilege.as_sql(), scope)
}

/// Issues grant checks through a [`QueryExecutor`].
#[derive(Clone)]
pub struct GrantInspector {
    executor: Arc<dyn QueryExecutor>,
}

impl GrantInspector {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Check one privilege on one scope. One statement per call.
    pub async fn check(&self, privilege: Privilege, scope: &Scope) -> GrantCheck {
        let statement = check_grant_statement(privilege, scope);
        debug!(statement = %statement, "checking grant");

        match self.executor.execute(&statement).await {
            Ok(result) => GrantCheck::from_result(&result),
            Err(e) => {
                warn!(
                    privilege = %privilege,
                    scope = %scope,
                    error = %e,
                    "CHECK GRANT failed (treating as not granted)"
                );
                GrantCheck::Inconclusive
            }
        }
    }

    pub async fn is_granted(&self, privilege: Privilege, scope: &Scope) -> bool {
        self.check(privilege, scope).await.is_granted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cbio_core::QueryError;
    use serde_json::json;
    use std::sync::Mutex;

    /// Returns one canned response and records every statement.
    struct Canned {
        response: fn() -> Result<QueryResult, QueryError>,
        seen: Mutex<Vec<String>>,
    }

    impl Canned {
        fn new(response: fn() -> Result<QueryResult, QueryError>) -> Arc<Self> {
            Arc::new(Self {
                response,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl QueryExecutor for Canned {
        async fn execute(&self, statement: &str) -> Result<QueryResult, QueryError> {
            self.seen.lock().unwrap().push(statement.to_string());
            (self.response)()
        }
    }

    fn cell(value: Value) -> QueryResult {
        QueryResult::from_rows(vec![vec![value]])
    }

    #[test]
    fn test_only_exact_one_is_granted() {
        assert!(GrantCheck::from_result(&cell(json!(1))).is_granted());
        assert!(GrantCheck::from_result(&cell(json!("1"))).is_granted());
        assert!(GrantCheck::from_result(&cell(json!(" 1 "))).is_granted());
        assert!(GrantCheck::from_result(&cell(json!(1.0))).is_granted());

        for value in [
            json!(0),
            json!(-1),
            json!(2),
            json!(1.5),
            json!("yes"),
            json!("1.0"),
            json!(""),
            json!(null),
            json!([1]),
            json!({"granted": 1}),
        ] {
            assert_eq!(
                GrantCheck::from_result(&cell(value.clone())),
                GrantCheck::NotGranted,
                "value {} must not grant",
                value
            );
        }
    }

    #[test]
    fn test_empty_shapes_are_not_granted() {
        assert_eq!(
            GrantCheck::from_result(&QueryResult::default()),
            GrantCheck::NotGranted
        );
        assert_eq!(
            GrantCheck::from_result(&QueryResult::from_rows(vec![vec![]])),
            GrantCheck::NotGranted
        );
    }

    #[test]
    fn test_first_row_wins() {
        let result = QueryResult::new(
            vec!["result".to_string()],
            vec![vec![json!(0)], vec![json!(1)]],
        );
        assert!(!GrantCheck::from_result(&result).is_granted());
    }

    #[tokio::test]
    async fn test_transport_error_is_inconclusive() {
        let executor = Canned::new(|| Err(QueryError::Transport("connection refused".into())));
        let inspector = GrantInspector::new(executor.clone());

        let check = inspector.check(Privilege::Insert, &Scope::all()).await;
        assert!(matches!(check, GrantCheck::Inconclusive));
        assert!(!check.is_granted());
    }

    #[tokio::test]
    async fn test_server_error_is_not_granted() {
        let executor = Canned::new(|| {
            Err(QueryError::Server {
                status: 400,
                message: "Syntax error".into(),
            })
        });
        let inspector = GrantInspector::new(executor);
        assert!(!inspector.is_granted(Privilege::Select, &Scope::all()).await);
    }

    #[tokio::test]
    async fn test_bare_star_is_queried_as_star_star() {
        let executor = Canned::new(|| Ok(cell(json!(1))));
        let inspector = GrantInspector::new(executor.clone());

        let scope = Scope::parse("*").unwrap();
        assert!(inspector.is_granted(Privilege::All, &scope).await);

        let seen = executor.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), ["CHECK GRANT ALL ON *.*"]);
    }

    #[test]
    fn test_statement_uses_sql_spelling() {
        assert_eq!(
            check_grant_statement(Privilege::AccessManagement, &Scope::all()),
            "CHECK GRANT ACCESS MANAGEMENT ON *.*"
        );
    }
}
