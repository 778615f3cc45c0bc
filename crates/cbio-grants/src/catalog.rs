//! System catalog tables needed for schema discovery.

use crate::scope::Scope;

/// A `system.*` table the MCP user must be able to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogTable {
    /// `system.tables`
    Tables,
    /// `system.columns`
    Columns,
}

impl CatalogTable {
    /// Checked in this order.
    pub const REQUIRED: [CatalogTable; 2] = [CatalogTable::Tables, CatalogTable::Columns];

    pub fn qualified_name(&self) -> &'static str {
        match self {
            CatalogTable::Tables => "system.tables",
            CatalogTable::Columns => "system.columns",
        }
    }

    pub fn scope(&self) -> Scope {
        Scope::catalog(self.qualified_name())
    }
}
