use crate::error::Result;
use crate::types::{DataRow, GridQuery};
use async_trait::async_trait;

/// A record collection a grid can page through.
///
/// Implementations receive the whole `GridQuery` on every call and must apply
/// its filters and ordering themselves; the handler never post-processes rows.
#[async_trait]
pub trait GridSource: Send + Sync {
    /// Short name of the backend, used in logs
    fn source_type(&self) -> &'static str;

    /// Number of rows matching the query's filters
    async fn count(&self, query: &GridQuery) -> Result<u64>;

    /// Rows `[offset, offset + limit)` of the filtered, ordered collection
    async fn fetch(&self, query: &GridQuery, offset: u64, limit: u64) -> Result<Vec<DataRow>>;
}
