//! Server-side grid endpoints
//!
//! Translates the legacy grid-control query parameters (`iDisplayStart`,
//! `iSortCol_0`, `sSearch`, ...) into a [`datagrid_query::GridQuery`], runs
//! it against a registered [`datagrid_query::GridSource`] and answers with
//! the `aaData` envelope or a custom [`RowFormatter`] body.

pub mod columns;
pub mod error;
pub mod handlers;
pub mod params;
pub mod registry;
pub mod render;
pub mod services;

pub use columns::ColumnMap;
pub use error::TableError;
pub use handlers::{
    configure_routes, create_tables_app_state, AppState, GridEnvelope, TableInfo, TablesApiDoc,
};
pub use params::{RequestParameters, SortInstruction};
pub use registry::{RegisteredTable, TableRegistry};
pub use render::{RenderContext, RenderError, RowFormatter};
pub use services::{GridPage, TableQueryService};
