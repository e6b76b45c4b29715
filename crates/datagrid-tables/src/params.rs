//! Grid-control query parameters (`iDisplayStart`, `sSearch_3`, ...).

use crate::error::TableError;
use datagrid_core::GridConfig;
use std::collections::HashMap;

/// Upper bound for `iColumns` and `iSortingCols`.
pub const MAX_GRID_COLUMNS: i64 = 1024;

const FLAG_TRUE: &str = "true";

/// One `iSortCol_N` / `sSortDir_N` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortInstruction {
    pub column: i64,
    pub direction: String,
    /// `bSortable_<column>` was `"true"`
    pub sortable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    pub columns: usize,
    /// Page size after clamping
    pub display_length: u64,
    pub display_start: u64,
    pub sorting: Vec<SortInstruction>,
    /// `bSearchable_i` for `i in 0..columns`
    pub searchable: Vec<bool>,
    pub global_search: String,
    /// `sSearch_i` for `i in 0..columns`
    pub column_search: Vec<String>,
    pub echo: i64,
}

impl RequestParameters {
    pub fn parse(
        query: &HashMap<String, String>,
        config: &GridConfig,
    ) -> Result<Self, TableError> {
        let columns = bounded_count(query, "iColumns")?;
        let default_length = i64::try_from(config.default_page_size).unwrap_or(i64::MAX);
        let display_length =
            config.clamp_page_size(int_param(query, "iDisplayLength", default_length)?);

        let display_start = int_param(query, "iDisplayStart", 0)?;
        let display_start = u64::try_from(display_start).map_err(|_| {
            TableError::invalid_parameter(
                "iDisplayStart",
                display_start.to_string(),
                "must not be negative",
            )
        })?;

        let sorting = (0..bounded_count(query, "iSortingCols")?)
            .map(|n| -> Result<SortInstruction, TableError> {
                let column = int_param(query, &format!("iSortCol_{}", n), 0)?;
                Ok(SortInstruction {
                    column,
                    direction: str_param(query, &format!("sSortDir_{}", n), "asc").to_string(),
                    sortable: flag(query, &format!("bSortable_{}", column)),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let searchable = (0..columns)
            .map(|i| flag(query, &format!("bSearchable_{}", i)))
            .collect();
        let column_search = (0..columns)
            .map(|i| str_param(query, &format!("sSearch_{}", i), "").to_string())
            .collect();

        Ok(Self {
            columns,
            display_length,
            display_start,
            sorting,
            searchable,
            global_search: str_param(query, "sSearch", "").to_string(),
            column_search,
            echo: int_param(query, "sEcho", 0)?,
        })
    }

    /// Offset one past the last row of the requested page.
    pub fn display_end(&self) -> u64 {
        self.display_start.saturating_add(self.display_length)
    }

    /// Indices of searchable columns, in order.
    pub fn searchable_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.searchable
            .iter()
            .enumerate()
            .filter(|(_, searchable)| **searchable)
            .map(|(i, _)| i)
    }

    /// `(column, text)` pairs with a non-empty per-column search on a
    /// searchable column.
    pub fn column_searches(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.column_search
            .iter()
            .enumerate()
            .filter(|(i, text)| !text.is_empty() && self.searchable[*i])
            .map(|(i, text)| (i, text.as_str()))
    }
}

fn str_param<'a>(query: &'a HashMap<String, String>, name: &str, default: &'a str) -> &'a str {
    query.get(name).map(String::as_str).unwrap_or(default)
}

fn flag(query: &HashMap<String, String>, name: &str) -> bool {
    query.get(name).is_some_and(|v| v == FLAG_TRUE)
}

fn int_param(query: &HashMap<String, String>, name: &str, default: i64) -> Result<i64, TableError> {
    match query.get(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| TableError::invalid_parameter(name, raw.as_str(), "expected an integer")),
    }
}

/// Counts below zero mean none; counts above `MAX_GRID_COLUMNS` are rejected.
fn bounded_count(query: &HashMap<String, String>, name: &str) -> Result<usize, TableError> {
    let value = int_param(query, name, 0)?;
    if value > MAX_GRID_COLUMNS {
        return Err(TableError::invalid_parameter(
            name,
            value.to_string(),
            "exceeds the column limit",
        ));
    }
    Ok(value.max(0) as usize)
}
