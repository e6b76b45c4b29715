//! Named tables served by the grid endpoints.

use crate::columns::ColumnMap;
use crate::render::RowFormatter;
use datagrid_query::GridSource;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A source plus the column map and optional formatter it is served with.
pub struct RegisteredTable {
    pub source: Arc<dyn GridSource>,
    pub columns: ColumnMap,
    pub formatter: Option<Arc<dyn RowFormatter>>,
}

impl RegisteredTable {
    pub fn new(source: Arc<dyn GridSource>, columns: ColumnMap) -> Self {
        Self {
            source,
            columns,
            formatter: None,
        }
    }

    pub fn with_formatter(mut self, formatter: Arc<dyn RowFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }
}

#[derive(Default)]
pub struct TableRegistry {
    tables: BTreeMap<String, Arc<RegisteredTable>>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `table` under `name`, replacing any previous entry.
    pub fn with_table(mut self, name: impl Into<String>, table: RegisteredTable) -> Self {
        self.tables.insert(name.into(), Arc::new(table));
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<RegisteredTable>> {
        self.tables.get(name).cloned()
    }

    /// Tables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegisteredTable)> {
        self.tables
            .iter()
            .map(|(name, table)| (name.as_str(), table.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
