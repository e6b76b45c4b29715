use axum::http::StatusCode;
use datagrid_core::error_builder::{
    bad_request, internal_server_error, not_found, ErrorBuilder, PROBLEM_TYPE_BASE,
};

#[test]
fn test_error_builder_basic() {
    let error = ErrorBuilder::new(StatusCode::BAD_REQUEST)
        .type_("https://example.com/probs/invalid-parameter")
        .title("Invalid Grid Parameter")
        .detail("iDisplayLength: expected an integer")
        .instance("/tables/people/rows")
        .build();

    assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
    assert_eq!(
        error.body.get("type").unwrap().as_str().unwrap(),
        "https://example.com/probs/invalid-parameter"
    );
    assert_eq!(error.title(), Some("Invalid Grid Parameter"));
    assert_eq!(
        error.body.get("detail").unwrap().as_str().unwrap(),
        "iDisplayLength: expected an integer"
    );
    assert_eq!(
        error.body.get("instance").unwrap().as_str().unwrap(),
        "/tables/people/rows"
    );
    assert!(error.body.contains_key("timestamp"));
}

#[test]
fn test_error_builder_with_values() {
    let error = ErrorBuilder::new(StatusCode::BAD_REQUEST)
        .title("Unknown Column")
        .value("column", 7)
        .value("parameter", "iSortCol_0")
        .build();

    assert_eq!(error.body.get("column").unwrap().as_i64(), Some(7));
    assert_eq!(
        error.body.get("parameter").unwrap().as_str(),
        Some("iSortCol_0")
    );
}

#[test]
fn test_problem_type_uses_base() {
    let error = ErrorBuilder::new(StatusCode::NOT_FOUND)
        .problem_type("unknown-table")
        .build();

    assert_eq!(
        error.body.get("type").unwrap().as_str().unwrap(),
        format!("{}/unknown-table", PROBLEM_TYPE_BASE)
    );
}

#[test]
fn test_common_builders() {
    let error = internal_server_error().build();
    assert_eq!(error.status_code, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        error.body.get("error_code").unwrap().as_str().unwrap(),
        "INTERNAL_SERVER_ERROR"
    );

    let error = not_found().detail("Table 'orders' is not registered").build();
    assert_eq!(error.status_code, StatusCode::NOT_FOUND);
    assert_eq!(
        error.body.get("detail").unwrap().as_str().unwrap(),
        "Table 'orders' is not registered"
    );

    let error = bad_request().build();
    assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
    assert_eq!(error.title(), Some("Bad Request"));
}
