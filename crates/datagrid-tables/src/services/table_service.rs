use crate::columns::ColumnMap;
use crate::error::TableError;
use crate::handlers::types::GridEnvelope;
use crate::params::{RequestParameters, SortInstruction};
use crate::render::{RenderContext, RenderError, RowFormatter};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;
use datagrid_core::{add_never_cache_headers, CountMode, GridConfig};
use datagrid_query::{predicate, DataRow, FilterExpr, GridQuery, GridSource, Operator, OrderKey};
use std::collections::HashMap;
use tracing::debug;

/// One page of a table, ready to be serialized or rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPage {
    pub echo: i64,
    pub total_records: u64,
    pub total_display_records: u64,
    pub columns: Vec<String>,
    pub column_list: String,
    pub display_start: u64,
    pub display_length: u64,
    /// Source rows with every field
    pub records: Vec<DataRow>,
    /// `records` projected to the column map
    pub rows: Vec<Vec<String>>,
}

impl GridPage {
    pub fn display_end(&self) -> u64 {
        self.display_start.saturating_add(self.display_length)
    }

    pub fn render_context(&self) -> RenderContext<'_> {
        RenderContext {
            echo: self.echo,
            total_records: self.total_records,
            total_display_records: self.total_display_records,
            columns: &self.columns,
            column_list: &self.column_list,
            display_start: self.display_start,
            display_end: self.display_end(),
            display_length: self.display_length,
            records: &self.records,
            rows: &self.rows,
        }
    }

    pub fn into_envelope(self) -> GridEnvelope {
        GridEnvelope {
            aa_data: self.rows,
            s_echo: self.echo,
            i_total_records: self.total_records,
            i_total_display_records: self.total_display_records,
            s_columns: self.column_list,
        }
    }
}

/// Turns grid-control parameters into a query against a `GridSource`.
pub struct TableQueryService {
    config: GridConfig,
}

impl TableQueryService {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn parse(&self, query: &HashMap<String, String>) -> Result<RequestParameters, TableError> {
        RequestParameters::parse(query, &self.config)
    }

    /// Order keys and filters for a request.
    ///
    /// Unsortable sort instructions are skipped. The global search is an OR
    /// over searchable columns; per-column searches are AND-ed together and
    /// with the global search.
    pub fn build_query(
        &self,
        params: &RequestParameters,
        columns: &ColumnMap,
    ) -> Result<GridQuery, TableError> {
        let mut order = Vec::with_capacity(params.sorting.len());
        for instruction in params.sorting.iter().filter(|s| s.sortable) {
            order.push(order_key(instruction, columns)?);
        }
        let mut query = GridQuery::new().order_by(order);

        if !params.global_search.is_empty() {
            let mut any = Vec::new();
            for index in params.searchable_columns() {
                any.push(predicate(
                    columns.source_field(index as i64)?,
                    Operator::IContains,
                    params.global_search.as_str(),
                ));
            }
            query = query.filter(FilterExpr::any(any));
        }

        let mut all = Vec::new();
        for (index, text) in params.column_searches() {
            all.push(predicate(
                columns.source_field(index as i64)?,
                Operator::IContains,
                text,
            ));
        }
        if !all.is_empty() {
            query = query.filter(FilterExpr::all(all));
        }

        Ok(query)
    }

    /// Count, slice and project one page.
    pub async fn query_page(
        &self,
        params: &RequestParameters,
        source: &dyn GridSource,
        columns: &ColumnMap,
    ) -> Result<GridPage, TableError> {
        let query = self.build_query(params, columns)?;

        let total_display_records = source.count(&query).await?;
        let total_records = match self.config.count_mode {
            CountMode::Accurate if query.is_filtered() => source.count(&query.unfiltered()).await?,
            _ => total_display_records,
        };

        let records = if params.display_length == 0 {
            Vec::new()
        } else {
            source
                .fetch(&query, params.display_start, params.display_length)
                .await?
        };
        let rows = records.iter().map(|row| columns.project(row)).collect();

        let order: Vec<String> = query.order.iter().map(ToString::to_string).collect();
        debug!(
            source = source.source_type(),
            order = %order.join(","),
            filters = query.filters.len(),
            total_records,
            total_display_records,
            returned = records.len(),
            "Grid page assembled"
        );

        Ok(GridPage {
            echo: params.echo,
            total_records,
            total_display_records,
            columns: columns.fields().to_vec(),
            column_list: columns.joined(),
            display_start: params.display_start,
            display_length: params.display_length,
            records,
            rows,
        })
    }

    /// Full request cycle: parse, query, then serialize as the JSON envelope
    /// or through `formatter`. The response is never cacheable.
    pub async fn handle(
        &self,
        query: &HashMap<String, String>,
        source: &dyn GridSource,
        columns: &ColumnMap,
        formatter: Option<&dyn RowFormatter>,
    ) -> Result<Response, TableError> {
        let params = self.parse(query)?;
        let page = self.query_page(&params, source, columns).await?;

        let mut response = match formatter {
            Some(formatter) => {
                let body = formatter.render(&page.render_context())?;
                let mut response = body.into_response();
                let content_type = HeaderValue::from_str(formatter.content_type())
                    .map_err(|e| RenderError::new(e.to_string()))?;
                response.headers_mut().insert(CONTENT_TYPE, content_type);
                response
            }
            None => Json(page.into_envelope()).into_response(),
        };
        add_never_cache_headers(response.headers_mut());
        Ok(response)
    }
}

fn order_key(instruction: &SortInstruction, columns: &ColumnMap) -> Result<OrderKey, TableError> {
    let declared = OrderKey::parse(columns.field(instruction.column)?);
    Ok(match instruction.direction.as_str() {
        "desc" => OrderKey::desc(declared.field),
        "asc" => OrderKey::asc(declared.field),
        // any other direction keeps the column's declared default
        _ => declared,
    })
}
