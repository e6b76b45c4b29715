use super::DatabaseArgs;
use axum::Router;
use clap::Args;
use datagrid_core::openapi::merge_openapi_schemas;
use datagrid_core::{CountMode, GridConfig, ServiceError, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use datagrid_entities::people;
use datagrid_query_sea::EntitySource;
use datagrid_tables::{
    configure_routes, create_tables_app_state, ColumnMap, RegisteredTable, TableQueryService,
    TableRegistry, TablesApiDoc,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Display columns of the `people` grid, in order
pub const PEOPLE_COLUMNS: [&str; 4] = ["name", "email", "city", "age"];

#[derive(OpenApi)]
#[openapi(info(
    title = "Datagrid API",
    description = "Server-side data for grid widgets",
    version = "1.0.0"
))]
struct ApiDoc;

#[derive(Args)]
pub struct ServeCommand {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1:3000", env = "DATAGRID_ADDRESS")]
    pub address: String,

    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Rows per page when the request omits iDisplayLength
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, env = "DATAGRID_DEFAULT_PAGE_SIZE")]
    pub default_page_size: u64,

    /// Upper bound for iDisplayLength, at most 100
    #[arg(long, default_value_t = MAX_PAGE_SIZE, env = "DATAGRID_MAX_PAGE_SIZE")]
    pub max_page_size: u64,

    /// How iTotalRecords is counted: accurate, legacy
    #[arg(long, default_value_t = CountMode::Accurate, env = "DATAGRID_COUNT_MODE")]
    pub count_mode: CountMode,
}

impl ServeCommand {
    pub fn grid_config(&self) -> anyhow::Result<GridConfig> {
        if self.max_page_size > MAX_PAGE_SIZE {
            return Err(ServiceError::Configuration {
                message: format!(
                    "max page size {} exceeds the hard limit of {}",
                    self.max_page_size, MAX_PAGE_SIZE
                ),
            }
            .into());
        }
        if self.default_page_size > self.max_page_size {
            return Err(ServiceError::Configuration {
                message: format!(
                    "default page size {} exceeds the maximum of {}",
                    self.default_page_size, self.max_page_size
                ),
            }
            .into());
        }
        Ok(GridConfig {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
            count_mode: self.count_mode,
        })
    }

    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run())
    }

    async fn run(self) -> anyhow::Result<()> {
        let grid_config = self.grid_config()?;

        debug!("Initializing database connection...");
        let db = datagrid_database::establish_connection(&self.database.config()).await?;

        let registry = TableRegistry::new().with_table(
            "people",
            RegisteredTable::new(
                Arc::new(EntitySource::<people::Entity>::new(db)),
                ColumnMap::new(PEOPLE_COLUMNS),
            ),
        );
        let app = build_app(grid_config, registry);

        let listener = TcpListener::bind(&self.address).await?;
        info!(
            "Datagrid server listening on {} (count mode: {})",
            self.address, self.count_mode
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Datagrid server exited");
        Ok(())
    }
}

fn create_openapi() -> utoipa::openapi::OpenApi {
    merge_openapi_schemas(ApiDoc::openapi(), vec![TablesApiDoc::openapi()])
}

/// Table routes, Swagger UI and request tracing.
pub fn build_app(config: GridConfig, registry: TableRegistry) -> Router {
    let state = create_tables_app_state(
        Arc::new(TableQueryService::new(config)),
        Arc::new(registry),
    );

    Router::new()
        .merge(configure_routes().with_state(state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", create_openapi()))
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    info!("Received Ctrl+C, shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use datagrid_query::MemorySource;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn registry() -> TableRegistry {
        TableRegistry::new().with_table(
            "people",
            RegisteredTable::new(
                Arc::new(MemorySource::from_json([
                    json!({"name": "John", "email": "john@example.com", "city": "Oslo", "age": 42}),
                ])),
                ColumnMap::new(PEOPLE_COLUMNS),
            ),
        )
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_openapi_document_lists_table_routes() {
        let (status, doc) =
            get_json(build_app(GridConfig::default(), registry()), "/api-docs/openapi.json").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(doc["info"]["title"], "Datagrid API");
        assert!(doc["paths"].get("/tables").is_some());
        assert!(doc["paths"].get("/tables/{table}/rows").is_some());
        assert!(doc["components"]["schemas"].get("GridEnvelope").is_some());
        assert!(doc["components"]["schemas"].get("ProblemDetails").is_some());
        assert_eq!(
            doc["paths"]["/tables/{table}/rows"]["get"]["responses"]["404"]["content"]
                ["application/problem+json"]["schema"]["$ref"],
            "#/components/schemas/ProblemDetails"
        );
    }

    #[tokio::test]
    async fn test_people_rows() {
        let (status, body) = get_json(
            build_app(GridConfig::default(), registry()),
            "/tables/people/rows?sEcho=1",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sColumns"], "name,email,city,age");
        assert_eq!(body["aaData"], json!([["John", "john@example.com", "Oslo", "42"]]));
    }

    fn command(default_page_size: u64, max_page_size: u64) -> ServeCommand {
        ServeCommand {
            address: "127.0.0.1:0".to_string(),
            database: DatabaseArgs {
                database_url: "sqlite::memory:".to_string(),
                max_connections: 1,
                min_connections: 1,
            },
            default_page_size,
            max_page_size,
            count_mode: CountMode::Accurate,
        }
    }

    #[test]
    fn test_default_page_size_must_fit() {
        assert!(command(50, 20).grid_config().is_err());
    }

    #[test]
    fn test_max_page_size_is_capped() {
        let err = command(10, 500).grid_config().unwrap_err();
        assert!(err.to_string().contains("hard limit of 100"));

        assert_eq!(command(10, 100).grid_config().unwrap().max_page_size, 100);
    }

    #[tokio::test]
    async fn test_page_never_exceeds_hard_cap() {
        let rows = (0..150).map(|i| json!({"name": format!("person {}", i)}));
        let registry = TableRegistry::new().with_table(
            "people",
            RegisteredTable::new(
                Arc::new(MemorySource::from_json(rows)),
                ColumnMap::new(PEOPLE_COLUMNS),
            ),
        );
        let config = GridConfig {
            max_page_size: 500,
            ..GridConfig::default()
        };

        let (status, body) = get_json(
            build_app(config, registry),
            "/tables/people/rows?iDisplayLength=1000",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["aaData"].as_array().unwrap().len(), 100);
        assert_eq!(body["iTotalDisplayRecords"], 150);
    }
}
