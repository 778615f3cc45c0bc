//! Tool calls against an in-memory ClickHouse stand-in.

use async_trait::async_trait;
use cbio_adapter_clickhouse::parse_response;
use cbio_core::{QueryError, QueryExecutor, QueryResult};
use cbio_mcp::{McpError, ToolExecutor};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeClickHouse {
    statements: Mutex<Vec<String>>,
}

impl FakeClickHouse {
    fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for FakeClickHouse {
    async fn execute(&self, statement: &str) -> Result<QueryResult, QueryError> {
        self.statements.lock().unwrap().push(statement.to_string());

        if statement.ends_with("FORMAT TabSeparated") {
            return parse_response("cancer_study\t412\nsample\t9\n");
        }
        if statement.ends_with("FORMAT Null") {
            return parse_response("");
        }
        if statement.contains("FROM system.tables") {
            return Ok(QueryResult::new(
                vec![
                    "name".into(),
                    "primary_key".into(),
                    "total_rows".into(),
                    "comment".into(),
                ],
                vec![
                    vec![json!("cancer_study"), json!("cancer_study_id"), json!("412"), json!("Studies")],
                    vec![json!("sample_derived"), json!(""), json!(null), json!("")],
                ],
            ));
        }
        if statement.contains("FROM system.columns") {
            return Ok(QueryResult::new(
                vec!["name".into(), "type".into(), "comment".into()],
                vec![vec![json!("sample_unique_id"), json!("String"), json!("")]],
            ));
        }
        if statement.contains("missing_table") {
            return Err(QueryError::Server {
                status: 404,
                message: "Code: 60. DB::Exception: Table app_db.missing_table does not exist"
                    .to_string(),
            });
        }
        Ok(QueryResult::new(
            vec!["n".into()],
            vec![vec![json!(1)], vec![json!(2)]],
        ))
    }
}

fn tools() -> (Arc<FakeClickHouse>, ToolExecutor) {
    let fake = Arc::new(FakeClickHouse::default());
    let tools = ToolExecutor::new(fake.clone());
    (fake, tools)
}

fn payload(response: &cbio_mcp::CallToolResponse) -> Value {
    response.payload().cloned().unwrap_or(Value::Null)
}

#[tokio::test]
async fn test_run_select_query_returns_rows() {
    let (fake, tools) = tools();
    let response = tools
        .call("clickhouse_run_select_query", &json!({"query": "SELECT number AS n FROM numbers(2)"}))
        .await
        .unwrap();

    assert!(!response.is_error());
    assert_eq!(payload(&response), json!({"rows": [{"n": 1}, {"n": 2}]}));
    assert_eq!(fake.statements(), ["SELECT number AS n FROM numbers(2)"]);
}

#[tokio::test]
async fn test_non_select_never_reaches_the_database() {
    let (fake, tools) = tools();
    let response = tools
        .call("clickhouse_run_select_query", &json!({"query": "DROP TABLE sample"}))
        .await
        .unwrap();

    assert!(response.is_error());
    assert_eq!(
        payload(&response)["error_message"],
        "Non select queries are forbidden: 'DROP TABLE sample'. Skipping the query."
    );
    assert!(fake.statements().is_empty());
}

#[tokio::test]
async fn test_database_failure_becomes_error_message() {
    let (_, tools) = tools();
    let response = tools
        .call("clickhouse_run_select_query", &json!({"query": "SELECT * FROM missing_table"}))
        .await
        .unwrap();

    assert!(response.is_error());
    let message = payload(&response)["error_message"].as_str().unwrap().to_string();
    assert!(message.contains("HTTP 404"), "{}", message);
    assert!(message.contains("does not exist"), "{}", message);
}

#[tokio::test]
async fn test_explicit_format_without_column_names_is_an_error() {
    let (fake, tools) = tools();
    let response = tools
        .call(
            "clickhouse_run_select_query",
            &json!({"query": "SELECT name, total_rows FROM system.tables FORMAT TabSeparated"}),
        )
        .await
        .unwrap();

    assert!(response.is_error());
    let message = payload(&response)["error_message"].as_str().unwrap().to_string();
    assert!(message.contains("without column names"), "{}", message);
    assert!(message.contains("2 row(s)"), "{}", message);
    assert_eq!(fake.statements().len(), 1);
}

#[tokio::test]
async fn test_empty_result_without_columns_is_not_an_error() {
    let (_, tools) = tools();
    let response = tools
        .call("clickhouse_run_select_query", &json!({"query": "SELECT 1 FORMAT Null"}))
        .await
        .unwrap();

    assert!(!response.is_error());
    assert_eq!(payload(&response), json!({"rows": []}));
}

#[tokio::test]
async fn test_list_tables_omits_blank_cells() {
    let (fake, tools) = tools();
    let response = tools.call("clickhouse_list_tables", &json!({})).await.unwrap();

    assert_eq!(
        payload(&response),
        json!({"tables": [
            {"name": "cancer_study", "primary_key": "cancer_study_id", "total_rows": "412", "comment": "Studies"},
            {"name": "sample_derived"}
        ]})
    );
    assert_eq!(
        fake.statements(),
        ["SELECT name, primary_key, total_rows, comment FROM system.tables WHERE database = currentDatabase()"]
    );
}

#[tokio::test]
async fn test_list_table_columns() {
    let (fake, tools) = tools();
    let response = tools
        .call("clickhouse_list_table_columns", &json!({"table": "sample"}))
        .await
        .unwrap();

    assert_eq!(
        payload(&response),
        json!({"columns": [{"name": "sample_unique_id", "type": "String"}]})
    );
    assert_eq!(
        fake.statements(),
        ["SELECT name, type, comment FROM system.columns WHERE table='sample' and database = currentDatabase()"]
    );
}

#[tokio::test]
async fn test_list_table_columns_rejects_injection() {
    let (fake, tools) = tools();
    let response = tools
        .call("clickhouse_list_table_columns", &json!({"table": "x' OR '1'='1"}))
        .await
        .unwrap();

    assert!(response.is_error());
    assert_eq!(
        payload(&response)["error_message"],
        "Invalid table name: x' OR '1'='1"
    );
    assert!(fake.statements().is_empty());
}

#[tokio::test]
async fn test_unknown_tool_and_bad_arguments_are_errors() {
    let (_, tools) = tools();

    let err = tools.call("clickhouse_drop_table", &json!({})).await.unwrap_err();
    assert!(matches!(err, McpError::ToolNotFound { ref name } if name == "clickhouse_drop_table"));

    let err = tools
        .call("clickhouse_run_select_query", &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, McpError::InvalidArguments { .. }));

    let err = tools
        .call("clickhouse_list_table_columns", &json!({"table": 7}))
        .await
        .unwrap_err();
    assert!(matches!(err, McpError::InvalidArguments { .. }));
}
