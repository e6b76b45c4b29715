//! HTTP handlers for table grids

pub mod handler;
pub mod types;

pub use handler::{configure_routes, TablesApiDoc};
pub use types::*;
