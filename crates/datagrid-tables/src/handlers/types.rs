use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::registry::TableRegistry;
use crate::services::TableQueryService;

pub struct AppState {
    pub table_service: Arc<TableQueryService>,
    pub registry: Arc<TableRegistry>,
}

pub fn create_tables_app_state(
    table_service: Arc<TableQueryService>,
    registry: Arc<TableRegistry>,
) -> Arc<AppState> {
    Arc::new(AppState {
        table_service,
        registry,
    })
}

/// One page of grid data in the shape legacy grid widgets expect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GridEnvelope {
    /// Page rows, each aligned to `sColumns`
    #[serde(rename = "aaData")]
    #[schema(example = json!([["John Carter", "john@example.com", "Oslo", "42"]]))]
    pub aa_data: Vec<Vec<String>>,
    /// The request's `sEcho`, unchanged
    #[serde(rename = "sEcho")]
    #[schema(example = 3)]
    pub s_echo: i64,
    /// Rows in the table before searching
    #[serde(rename = "iTotalRecords")]
    #[schema(example = 5)]
    pub i_total_records: u64,
    /// Rows left after searching
    #[serde(rename = "iTotalDisplayRecords")]
    #[schema(example = 1)]
    pub i_total_display_records: u64,
    /// Column names joined with commas
    #[serde(rename = "sColumns")]
    #[schema(example = "name,email,city,age")]
    pub s_columns: String,
}

/// A table that can be queried through the grid endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TableInfo {
    #[schema(example = "people")]
    pub name: String,
    /// Column names in display order
    pub columns: Vec<String>,
    /// Backend serving the rows
    #[schema(example = "sea-orm")]
    pub source: String,
    /// Whether a custom formatter replaces the JSON envelope
    pub formatted: bool,
}
