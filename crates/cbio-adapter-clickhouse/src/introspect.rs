use cbio_core::QueryExecutor;
use chrono::Utc;
use serde_json::{Value, json};
use tracing::warn;

/// Tables of the current database, as exposed to agents.
pub const LIST_TABLES_QUERY: &str = "SELECT name, primary_key, total_rows, comment \
     FROM system.tables WHERE database = currentDatabase()";

/// Reject anything that is not a plain (optionally dotted) identifier.
///
/// The name ends up inside a string literal, so quotes, whitespace and
/// backslashes are never allowed.
pub fn validate_table_name(table: &str) -> anyhow::Result<()> {
    if table.is_empty()
        || !table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
    {
        anyhow::bail!("Invalid table name: {}", table);
    }
    Ok(())
}

/// Columns of one table in the current database.
pub fn list_table_columns_query(table: &str) -> anyhow::Result<String> {
    validate_table_name(table)?;
    Ok(format!(
        "SELECT name, type, comment FROM system.columns \
         WHERE table='{}' and database = currentDatabase()",
        table
    ))
}

/// Introspect the current ClickHouse database into a stable JSON snapshot.
pub async fn introspect_schema_json(executor: &dyn QueryExecutor) -> anyhow::Result<Value> {
    let version = executor.execute("SELECT version()").await?;
    let version = version
        .first_cell()
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
        .to_string();

    let tables = executor.execute(LIST_TABLES_QUERY).await?;
    let mut tables_json = Vec::new();

    for mut table in tables.records() {
        let Some(name) = table.get("name").and_then(|v| v.as_str()).map(str::to_string) else {
            continue;
        };

        // Names outside the allow-list cannot be queried safely.
        let query = match list_table_columns_query(&name) {
            Ok(query) => query,
            Err(e) => {
                warn!(table = %name, error = %e, "skipping table in schema snapshot");
                continue;
            }
        };
        let columns = executor.execute(&query).await?;

        if let Some(obj) = table.as_object_mut() {
            obj.insert("columns".to_string(), Value::Array(columns.records()));
        }
        tables_json.push(table);
    }

    Ok(json!({
        "captured_at": Utc::now().to_rfc3339(),
        "database": {
            "kind": "clickhouse",
            "version": version
        },
        "tables": tables_json
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cbio_core::{QueryError, QueryResult};

    #[test]
    fn test_table_name_validation() {
        assert!(list_table_columns_query("clinical_data_derived").is_ok());
        assert!(list_table_columns_query("db.table-1").is_ok());
        for bad in ["", "a b", "x'--", "\"t\"", "t\\", "t;DROP"] {
            assert!(list_table_columns_query(bad).is_err(), "{:?} accepted", bad);
        }
    }

    #[test]
    fn test_list_columns_query_text() {
        assert_eq!(
            list_table_columns_query("sample").unwrap(),
            "SELECT name, type, comment FROM system.columns \
             WHERE table='sample' and database = currentDatabase()"
        );
    }

    struct Catalog;

    #[async_trait]
    impl QueryExecutor for Catalog {
        async fn execute(&self, statement: &str) -> Result<QueryResult, QueryError> {
            if statement == "SELECT version()" {
                return Ok(QueryResult::from_rows(vec![vec![json!("24.8.1")]]));
            }
            if statement == LIST_TABLES_QUERY {
                return Ok(QueryResult::new(
                    vec!["name".into(), "total_rows".into()],
                    vec![
                        vec![json!("cancer_study"), json!("12")],
                        vec![json!("legacy table"), json!("3")],
                    ],
                ));
            }
            if statement.contains("legacy") {
                return Err(QueryError::Server {
                    status: 400,
                    message: "unexpected statement".to_string(),
                });
            }
            Ok(QueryResult::new(
                vec!["name".into(), "type".into()],
                vec![vec![json!("cancer_study_identifier"), json!("String")]],
            ))
        }
    }

    #[tokio::test]
    async fn test_introspect_schema_json() {
        let snapshot = introspect_schema_json(&Catalog).await.unwrap();
        assert_eq!(snapshot["database"]["version"], "24.8.1");
        assert_eq!(snapshot["tables"][0]["name"], "cancer_study");
        assert_eq!(
            snapshot["tables"][0]["columns"][0]["name"],
            "cancer_study_identifier"
        );
    }

    #[tokio::test]
    async fn test_unsafe_table_names_are_skipped() {
        let snapshot = introspect_schema_json(&Catalog).await.unwrap();
        let tables = snapshot["tables"].as_array().unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0]["name"], "cancer_study");
    }
}
