use crate::error::TableError;
use datagrid_query::{display_value, DataRow, DESCENDING_MARKER};
use std::collections::BTreeMap;

/// Display column index → source field name.
///
/// Indices are always `0..len`. A field may carry a leading `-` to make it
/// sort descending unless the client asks otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    fields: Vec<String>,
}

impl ColumnMap {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from explicit indices, rejecting gaps.
    pub fn from_indexed(map: BTreeMap<usize, String>) -> Result<Self, TableError> {
        for (expected, index) in map.keys().enumerate() {
            if *index != expected {
                return Err(TableError::NonContiguousColumns { missing: expected });
            }
        }
        Ok(Self {
            fields: map.into_values().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Field name as declared, marker included.
    pub fn field(&self, index: i64) -> Result<&str, TableError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.fields.get(i))
            .map(String::as_str)
            .ok_or(TableError::UnknownColumn { index })
    }

    /// Field name with any sort marker removed, as stored in the source.
    pub fn source_field(&self, index: i64) -> Result<&str, TableError> {
        self.field(index).map(bare_field)
    }

    /// Comma-joined declared names, the `sColumns` value.
    pub fn joined(&self) -> String {
        self.fields.join(",")
    }

    /// Row values in column order. Absent fields render as empty strings so
    /// every row has exactly `len()` cells.
    pub fn project(&self, row: &DataRow) -> Vec<String> {
        self.fields
            .iter()
            .map(|field| {
                row.get(bare_field(field))
                    .map(display_value)
                    .unwrap_or_default()
            })
            .collect()
    }
}

fn bare_field(field: &str) -> &str {
    field.strip_prefix(DESCENDING_MARKER).unwrap_or(field)
}
