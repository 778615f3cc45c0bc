//! Startup privilege gate.
//!
//! Runs a fixed sequence of grant checks against the configured ClickHouse
//! user before the server accepts any work:
//!
//! 1. `SELECT ON <database>.*` must be granted. Fails on its own.
//! 2. No privilege in [`Privilege::FORBIDDEN`] may be granted on `*.*`.
//!    All hits are reported together.
//! 3. `SELECT ON system.tables` must be granted.
//! 4. `SELECT ON system.columns` must be granted.
//!    Gates 3 and 4 are reported together.
//!
//! The first failing gate ends the run. Checks are issued one at a time and
//! never retried.

use cbio_core::{McpConfig, QueryExecutor};
use std::sync::Arc;
use tracing::{info, warn};

use crate::catalog::CatalogTable;
use crate::error::PermissionError;
use crate::inspector::GrantInspector;
use crate::privilege::Privilege;
use crate::scope::Scope;

/// Verifies that a ClickHouse user is read-only and correctly scoped.
#[derive(Clone)]
pub struct PrivilegeVerifier {
    inspector: GrantInspector,
}

impl PrivilegeVerifier {
    pub fn new(inspector: GrantInspector) -> Self {
        Self { inspector }
    }

    pub fn with_executor(executor: Arc<dyn QueryExecutor>) -> Self {
        Self::new(GrantInspector::new(executor))
    }

    /// Run every gate for the user and database in `config`.
    ///
    /// Holds no state between calls; running it twice against an unchanged
    /// grant set gives the same result.
    pub async fn verify(&self, config: &McpConfig) -> Result<(), PermissionError> {
        let user = config.user.as_str();
        let database = config.database.as_str();

        info!(user, database, "Checking ClickHouse privileges");

        self.check_minimum(user, database).await?;
        self.check_excess(user).await?;
        self.check_catalog(user).await?;

        info!(user, database, "ClickHouse permission checks passed");
        Ok(())
    }

    async fn check_minimum(&self, user: &str, database: &str) -> Result<(), PermissionError> {
        let granted = match Scope::database(database) {
            Ok(scope) => self.inspector.is_granted(Privilege::Select, &scope).await,
            Err(e) => {
                warn!(database, error = %e, "cannot build application scope");
                false
            }
        };

        if granted {
            Ok(())
        } else {
            Err(PermissionError::missing_minimum_privilege(user, database))
        }
    }

    async fn check_excess(&self, user: &str) -> Result<(), PermissionError> {
        let all = Scope::all();
        let mut granted = Vec::new();
        for privilege in Privilege::FORBIDDEN {
            if self.inspector.is_granted(privilege, &all).await {
                granted.push(privilege);
            }
        }

        if granted.is_empty() {
            Ok(())
        } else {
            Err(PermissionError::excess_privilege(user, &granted))
        }
    }

    async fn check_catalog(&self, user: &str) -> Result<(), PermissionError> {
        let mut missing = Vec::new();
        for table in CatalogTable::REQUIRED {
            if !self.inspector.is_granted(Privilege::Select, &table.scope()).await {
                missing.push(table);
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PermissionError::missing_introspection_privilege(user, &missing))
        }
    }
}

/// Verify `config` using `executor`. Convenience for one-shot startup use.
pub async fn ensure_db_permissions(
    executor: Arc<dyn QueryExecutor>,
    config: &McpConfig,
) -> Result<(), PermissionError> {
    PrivilegeVerifier::with_executor(executor).verify(config).await
}
