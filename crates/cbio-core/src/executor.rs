//! Query execution seam.
//!
//! Every component that needs the database goes through [`QueryExecutor`].
//! A result is an ordered list of rows of cells; column names are optional
//! because some introspection statements (e.g. `CHECK GRANT`) return an
//! unnamed projection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Tabular result of one statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Column names, possibly empty.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Rows in server order.
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// A result without column metadata.
    pub fn from_rows(rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns: Vec::new(),
            rows,
        }
    }

    /// First cell of the first row, if there is one.
    pub fn first_cell(&self) -> Option<&Value> {
        self.rows.first().and_then(|row| row.first())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Rows as JSON objects keyed by column name.
    ///
    /// Cells that are `null` or the empty string are left out, and cells past
    /// the last known column are dropped.
    pub fn records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let record: Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(row)
                    .filter(|(_, cell)| !is_blank(cell))
                    .map(|(name, cell)| (name.clone(), cell.clone()))
                    .collect();
                Value::Object(record)
            })
            .collect()
    }
}

fn is_blank(cell: &Value) -> bool {
    match cell {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Errors from executing a statement.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The request never produced a response (connect, TLS, timeout…).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with an error.
    #[error("server returned HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Runs a statement against the database.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, statement: &str) -> Result<QueryResult, QueryError>;
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for Arc<T> {
    async fn execute(&self, statement: &str) -> Result<QueryResult, QueryError> {
        (**self).execute(statement).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl QueryExecutor for Echo {
        async fn execute(&self, statement: &str) -> Result<QueryResult, QueryError> {
            Ok(QueryResult::from_rows(vec![vec![json!(statement)]]))
        }
    }

    #[test]
    fn test_first_cell() {
        assert!(QueryResult::default().first_cell().is_none());
        assert!(QueryResult::from_rows(vec![vec![]]).first_cell().is_none());

        let result = QueryResult::from_rows(vec![vec![json!(1), json!(2)], vec![json!(3)]]);
        assert_eq!(result.first_cell(), Some(&json!(1)));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_records_skip_blank_cells() {
        let result = QueryResult::new(
            vec!["name".into(), "type".into(), "comment".into()],
            vec![
                vec![json!("attribute_name"), json!("String"), json!("")],
                vec![json!("count"), json!("UInt64"), json!(null)],
                vec![json!("x"), json!(0), json!("note"), json!("extra")],
            ],
        );
        let records = result.records();
        assert_eq!(records[0], json!({"name": "attribute_name", "type": "String"}));
        assert_eq!(records[1], json!({"name": "count", "type": "UInt64"}));
        assert_eq!(records[2], json!({"name": "x", "type": 0, "comment": "note"}));
    }

    #[test]
    fn test_records_without_columns_are_empty_objects() {
        let result = QueryResult::from_rows(vec![vec![json!(1)]]);
        assert_eq!(result.records(), [json!({})]);
    }

    #[tokio::test]
    async fn test_arc_dyn_executor_delegates() {
        let executor: Arc<dyn QueryExecutor> = Arc::new(Echo);
        let result = executor.execute("SELECT 1").await.unwrap();
        assert_eq!(result.first_cell(), Some(&json!("SELECT 1")));
    }
}
