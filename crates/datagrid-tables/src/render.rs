//! Custom response bodies for tables that do not use the default envelope.

use datagrid_query::DataRow;
use thiserror::Error;

/// Content type the legacy grid endpoint used for rendered bodies.
pub const DEFAULT_RENDER_CONTENT_TYPE: &str = "application/javascript";

#[derive(Error, Debug)]
#[error("Row formatter failed: {0}")]
pub struct RenderError(pub String);

impl RenderError {
    pub fn new(msg: impl Into<String>) -> Self {
        RenderError(msg.into())
    }
}

/// Everything a formatter may use, and nothing else.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// `sEcho` from the request
    pub echo: i64,
    pub total_records: u64,
    pub total_display_records: u64,
    /// Declared column names in display order
    pub columns: &'a [String],
    /// `columns` joined with commas
    pub column_list: &'a str,
    /// First row offset of this page
    pub display_start: u64,
    /// One past the last requested offset
    pub display_end: u64,
    pub display_length: u64,
    /// Page records as returned by the source, all fields present
    pub records: &'a [DataRow],
    /// Page records projected to `columns` and stringified
    pub rows: &'a [Vec<String>],
}

/// Renders a full response body from a page of rows.
pub trait RowFormatter: Send + Sync {
    fn content_type(&self) -> &str {
        DEFAULT_RENDER_CONTENT_TYPE
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError>;
}

impl<F> RowFormatter for F
where
    F: Fn(&RenderContext<'_>) -> Result<String, RenderError> + Send + Sync,
{
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        self(ctx)
    }
}
