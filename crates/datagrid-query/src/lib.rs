//! # datagrid-query
//!
//! Backend-neutral query model for paged, sorted, searched table views.
//!
//! - **GridSource**: trait every backend implements (`count` + `fetch`)
//! - **GridQuery**: order keys and filters accumulated for one request
//! - **FilterExpr**: composable predicates built with [`predicate`]
//! - **MemorySource**: in-process implementation over `Vec<DataRow>`
//!
//! ## Example
//!
//! ```rust
//! use datagrid_query::{predicate, FilterExpr, GridQuery, Operator, OrderKey};
//!
//! let query = GridQuery::new()
//!     .order_by([OrderKey::parse("-age")])
//!     .filter(FilterExpr::any([
//!         predicate("name", Operator::IContains, "jo"),
//!         predicate("email", Operator::IContains, "jo"),
//!     ]));
//! assert!(query.is_filtered());
//! ```
//!
//! The sea-orm backend lives in `datagrid-query-sea`.

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{DataError, Result};
pub use memory::MemorySource;
pub use traits::GridSource;
pub use types::{
    display_value, predicate, DataRow, FilterExpr, GridQuery, Operator, OrderKey, SortDirection,
    DESCENDING_MARKER,
};
