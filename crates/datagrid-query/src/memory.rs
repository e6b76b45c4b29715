//! In-process `GridSource` over a vector of rows.

use crate::error::Result;
use crate::traits::GridSource;
use crate::types::{display_value, DataRow, GridQuery, OrderKey, SortDirection};
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<DataRow>,
}

impl MemorySource {
    pub fn new(rows: Vec<DataRow>) -> Self {
        Self { rows }
    }

    /// Build from JSON objects; non-object values are skipped.
    pub fn from_json(values: impl IntoIterator<Item = Value>) -> Self {
        let rows = values
            .into_iter()
            .filter_map(|value| match value {
                Value::Object(map) => Some(map.into_iter().collect()),
                _ => None,
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn select(&self, query: &GridQuery) -> Vec<&DataRow> {
        let mut selected: Vec<&DataRow> =
            self.rows.iter().filter(|row| query.matches(row)).collect();
        if !query.order.is_empty() {
            // stable, so rows equal on every key keep their source order
            selected.sort_by(|a, b| compare_rows(a, b, &query.order));
        }
        selected
    }
}

fn compare_rows(a: &DataRow, b: &DataRow, keys: &[OrderKey]) -> Ordering {
    for key in keys {
        let ordering = compare_values(a.get(&key.field), b.get(&key.field));
        let ordering = match key.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Nulls first, numbers numerically, everything else by text.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => x.to_string().cmp(&y.to_string()),
        },
        (Some(x), Some(y)) => display_value(x).cmp(&display_value(y)),
    }
}

#[async_trait]
impl GridSource for MemorySource {
    fn source_type(&self) -> &'static str {
        "memory"
    }

    async fn count(&self, query: &GridQuery) -> Result<u64> {
        Ok(self.rows.iter().filter(|row| query.matches(row)).count() as u64)
    }

    async fn fetch(&self, query: &GridQuery, offset: u64, limit: u64) -> Result<Vec<DataRow>> {
        let selected = self.select(query);
        debug!(
            matched = selected.len(),
            offset, limit, "Slicing in-memory rows"
        );
        Ok(selected
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}
