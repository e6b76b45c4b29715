//! OpenAPI schema utilities for merging per-crate API documentation

use utoipa::openapi::OpenApi;

/// Merges additional OpenAPI schemas into `base`.
///
/// Paths, component schemas and responses, and tags are combined. Entries in
/// later schemas replace same-named entries already present.
///
/// # Example
///
/// ```rust,ignore
/// use utoipa::OpenApi;
/// use datagrid_core::openapi::merge_openapi_schemas;
///
/// let merged = merge_openapi_schemas(ApiDoc::openapi(), vec![TablesApiDoc::openapi()]);
/// ```
pub fn merge_openapi_schemas(mut base: OpenApi, schemas: Vec<OpenApi>) -> OpenApi {
    for schema in schemas {
        base.paths.paths.extend(schema.paths.paths);

        if let Some(components) = schema.components {
            let base_components = base.components.get_or_insert_with(Default::default);
            base_components.schemas.extend(components.schemas);
            base_components.responses.extend(components.responses);
        }

        if let Some(tags) = schema.tags {
            base.tags.get_or_insert_with(Vec::new).extend(tags);
        }
    }

    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::{
        path::OperationBuilder, HttpMethod, InfoBuilder, OpenApiBuilder, PathItem, PathsBuilder,
    };

    fn doc(title: &str, path: &str) -> OpenApi {
        OpenApiBuilder::new()
            .info(InfoBuilder::new().title(title).version("1.0.0").build())
            .paths(
                PathsBuilder::new()
                    .path(
                        path,
                        PathItem::new(
                            HttpMethod::Get,
                            OperationBuilder::new().summary(Some(title)).build(),
                        ),
                    )
                    .build(),
            )
            .build()
    }

    #[test]
    fn test_merge_keeps_base_info() {
        let result = merge_openapi_schemas(doc("Datagrid", "/health"), vec![]);
        assert_eq!(result.info.title, "Datagrid");
    }

    #[test]
    fn test_merge_paths() {
        let result = merge_openapi_schemas(
            doc("Datagrid", "/health"),
            vec![doc("Tables", "/tables/{table}/rows")],
        );

        assert!(result.paths.paths.contains_key("/health"));
        assert!(result.paths.paths.contains_key("/tables/{table}/rows"));
    }
}
