use super::types::{AppState, GridEnvelope, TableInfo};
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use datagrid_core::error_builder::not_found;
use datagrid_core::problemdetails::{Problem, ProblemDetails};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, warn};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(list_tables, get_table_rows),
    components(schemas(GridEnvelope, TableInfo, ProblemDetails)),
    info(
        title = "Tables API",
        description = "Server-side paging, sorting and searching for grid widgets. \
        Each registered table answers the legacy grid-control query parameters.",
        version = "1.0.0"
    ),
    tags(
        (name = "Tables", description = "Grid data endpoints")
    )
)]
pub struct TablesApiDoc;

pub fn configure_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tables", get(list_tables))
        .route("/tables/{table}/rows", get(get_table_rows))
}

/// List registered tables
#[utoipa::path(
    tag = "Tables",
    get,
    path = "/tables",
    responses(
        (status = 200, description = "Registered tables", body = Vec<TableInfo>)
    )
)]
async fn list_tables(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let tables: Vec<TableInfo> = app_state
        .registry
        .iter()
        .map(|(name, table)| TableInfo {
            name: name.to_string(),
            columns: table.columns.fields().to_vec(),
            source: table.source.source_type().to_string(),
            formatted: table.formatter.is_some(),
        })
        .collect();
    Json(tables)
}

/// Fetch one page of a table
///
/// Unknown query parameters are ignored. `bSortable_N` is keyed by the
/// column index named in `iSortCol_*`, not by the instruction index.
#[utoipa::path(
    tag = "Tables",
    get,
    path = "/tables/{table}/rows",
    params(
        ("table" = String, Path, description = "Registered table name"),
        ("iColumns" = Option<i64>, Query, description = "Number of columns"),
        ("iDisplayStart" = Option<i64>, Query, description = "Offset of the first row"),
        ("iDisplayLength" = Option<i64>, Query, description = "Page size, clamped to at most 100"),
        ("iSortingCols" = Option<i64>, Query, description = "Number of sort instructions"),
        ("iSortCol_0" = Option<i64>, Query, description = "Column index of sort instruction 0 (repeat per instruction)"),
        ("sSortDir_0" = Option<String>, Query, description = "`asc` or `desc` for sort instruction 0"),
        ("bSortable_0" = Option<String>, Query, description = "`true` when column 0 may be sorted"),
        ("bSearchable_0" = Option<String>, Query, description = "`true` when column 0 takes part in searches"),
        ("sSearch" = Option<String>, Query, description = "Global search text"),
        ("sSearch_0" = Option<String>, Query, description = "Search text for column 0"),
        ("sEcho" = Option<i64>, Query, description = "Correlation token echoed back")
    ),
    responses(
        (status = 200, description = "Page of rows", body = GridEnvelope),
        (status = 400, description = "Malformed parameter or unknown column", body = ProblemDetails,
            content_type = "application/problem+json"),
        (status = 404, description = "Table not registered", body = ProblemDetails,
            content_type = "application/problem+json"),
        (status = 500, description = "Query or formatter failure", body = ProblemDetails,
            content_type = "application/problem+json")
    )
)]
async fn get_table_rows(
    State(app_state): State<Arc<AppState>>,
    Path(table): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, Problem> {
    let Some(registered) = app_state.registry.get(&table) else {
        return Err(not_found()
            .detail(format!("Table '{}' is not registered", table))
            .value("table", &table)
            .build());
    };

    app_state
        .table_service
        .handle(
            &query,
            registered.source.as_ref(),
            &registered.columns,
            registered.formatter.as_deref(),
        )
        .await
        .map_err(|e| {
            if e.is_client_error() {
                warn!("Rejected grid request for table {}: {}", table, e);
            } else {
                error!("Failed to query table {}: {}", table, e);
            }
            Problem::from(e)
        })
}
