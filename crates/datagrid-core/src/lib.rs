//! Core utilities and types shared across all datagrid crates

pub mod cache;
pub mod config;
pub mod error;
pub mod error_builder;
pub mod openapi;
pub mod problemdetails;
pub use problemdetails::ProblemDetails;

// Re-export commonly used types
pub use cache::*;
pub use config::*;
pub use error::*;
pub use error_builder::*;

// Re-export external dependencies
pub use anyhow;
pub use chrono;
pub use serde;
pub use serde_json;
pub use thiserror;
pub use tracing;
