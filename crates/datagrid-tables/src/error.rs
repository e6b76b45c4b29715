use crate::render::RenderError;
use datagrid_core::error_builder::{bad_request, internal_server_error};
use datagrid_core::problemdetails::Problem;
use datagrid_query::DataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("{name}: {reason}, got {value:?}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: &'static str,
    },

    #[error("Column {index} is not part of this table")]
    UnknownColumn { index: i64 },

    #[error("Column map has no entry for index {missing}")]
    NonContiguousColumns { missing: usize },

    #[error(transparent)]
    Source(#[from] DataError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl TableError {
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: &'static str,
    ) -> Self {
        TableError::InvalidParameter {
            name: name.into(),
            value: value.into(),
            reason,
        }
    }

    /// Whether the client caused this error.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TableError::InvalidParameter { .. } | TableError::UnknownColumn { .. }
        )
    }
}

impl From<TableError> for Problem {
    fn from(error: TableError) -> Self {
        let detail = error.to_string();
        match error {
            TableError::InvalidParameter { name, .. } => bad_request()
                .problem_type("invalid-parameter")
                .title("Invalid Grid Parameter")
                .detail(detail)
                .value("parameter", name)
                .build(),
            TableError::UnknownColumn { index } => bad_request()
                .problem_type("unknown-column")
                .title("Unknown Column")
                .detail(detail)
                .value("column", index)
                .build(),
            TableError::NonContiguousColumns { .. } => internal_server_error()
                .problem_type("invalid-column-map")
                .title("Invalid Column Map")
                .detail(detail)
                .build(),
            TableError::Source(_) => internal_server_error()
                .problem_type("query-failed")
                .title("Table Query Error")
                .detail(detail)
                .build(),
            TableError::Render(_) => internal_server_error()
                .problem_type("render-failed")
                .title("Row Formatter Error")
                .detail(detail)
                .build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_parameter_errors_are_bad_requests() {
        let problem: Problem =
            TableError::invalid_parameter("iDisplayStart", "ten", "expected an integer").into();
        assert_eq!(problem.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(
            problem.body["detail"],
            "iDisplayStart: expected an integer, got \"ten\""
        );
        assert_eq!(problem.body["parameter"], "iDisplayStart");
        assert_eq!(problem.body["error_code"], "BAD_REQUEST");

        let problem: Problem = TableError::UnknownColumn { index: 9 }.into();
        assert_eq!(problem.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(problem.body["column"], 9);
    }

    #[test]
    fn test_source_errors_are_server_errors() {
        let error = TableError::from(DataError::unknown_field("salary"));
        assert!(!error.is_client_error());

        let problem: Problem = error.into();
        assert_eq!(problem.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(problem.title(), Some("Table Query Error"));
        assert_eq!(problem.body["error_code"], "INTERNAL_SERVER_ERROR");
    }
}
