use thiserror::Error;

/// Unified error type for all grid data source operations
#[derive(Error, Debug)]
pub enum DataError {
    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A filter or ordering referenced a field the source does not have
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Row could not be converted into a `DataRow`
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DataError {
    pub fn unknown_field(field: impl Into<String>) -> Self {
        DataError::UnknownField(field.into())
    }

    pub fn query_failed(msg: impl Into<String>) -> Self {
        DataError::QueryFailed(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
