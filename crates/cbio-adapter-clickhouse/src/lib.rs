//! ClickHouse adapter over the HTTP interface.
//!
//! Statements are POSTed as the request body with `default_format=JSONCompact`,
//! so every result comes back as `{"meta": [...], "data": [[...], ...]}`.
//! Bodies that are not JSON (some statements ignore the default format) are
//! read as TabSeparated text.

use async_trait::async_trait;
use cbio_core::{AppConfig, ClickHouseConfig, QueryError, QueryExecutor, QueryResult};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

pub mod introspect;

const RESULT_FORMAT: &str = "JSONCompact";

pub struct ClickHouseAdapter {
    client: reqwest::Client,
    base_url: String,
    user: String,
    password: String,
    database: String,
}

impl ClickHouseAdapter {
    /// Build an adapter authenticating as `user` against `database`.
    pub fn new(config: &ClickHouseConfig, user: &str, database: &str) -> Result<Self, QueryError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.send_receive_timeout())
            .danger_accept_invalid_certs(!config.verify)
            .build()
            .map_err(|e| QueryError::Transport(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            user: user.to_string(),
            password: config.password.clone(),
            database: database.to_string(),
        })
    }

    /// Build an adapter for the user and database the MCP server runs as.
    pub fn from_config(config: &AppConfig) -> Result<Self, QueryError> {
        Self::new(&config.clickhouse, &config.mcp.user, &config.mcp.database)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl QueryExecutor for ClickHouseAdapter {
    async fn execute(&self, statement: &str) -> Result<QueryResult, QueryError> {
        debug!(statement, "executing ClickHouse statement");

        let response = self
            .client
            .post(&self.base_url)
            .query(&[
                ("database", self.database.as_str()),
                ("default_format", RESULT_FORMAT),
            ])
            .basic_auth(&self.user, Some(&self.password))
            .body(statement.to_string())
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Transport(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(QueryError::Server {
                status: status.as_u16(),
                message: body.trim().to_string(),
            });
        }

        parse_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct CompactResponse {
    #[serde(default)]
    meta: Vec<ColumnMeta>,
    #[serde(default)]
    data: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ColumnMeta {
    name: String,
}

/// Decode a response body into a [`QueryResult`].
pub fn parse_response(body: &str) -> Result<QueryResult, QueryError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(QueryResult::default());
    }

    if trimmed.starts_with('{') {
        let parsed: CompactResponse =
            serde_json::from_str(trimmed).map_err(|e| QueryError::Decode(e.to_string()))?;
        let columns = parsed.meta.into_iter().map(|c| c.name).collect();
        return Ok(QueryResult::new(columns, parsed.data));
    }

    // TabSeparated: no header, one row per line.
    let rows = trimmed
        .lines()
        .map(|line| {
            line.split('\t')
                .map(|cell| Value::String(cell.to_string()))
                .collect()
        })
        .collect();
    Ok(QueryResult::from_rows(rows))
}
