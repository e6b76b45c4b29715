pub mod seed;
pub mod serve;

pub use seed::SeedCommand;
pub use serve::ServeCommand;

use clap::Args;
use datagrid_core::DatabaseConfig;

/// Connection flags shared by every command that opens the database
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database connection URL
    #[arg(long, env = "DATAGRID_DATABASE_URL")]
    pub database_url: String,

    /// Maximum pooled connections
    #[arg(long, default_value_t = 10, env = "DATAGRID_MAX_CONNECTIONS")]
    pub max_connections: u32,

    /// Minimum pooled connections
    #[arg(long, default_value_t = 1, env = "DATAGRID_MIN_CONNECTIONS")]
    pub min_connections: u32,
}

impl DatabaseArgs {
    pub fn config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            max_connections: self.max_connections,
            min_connections: self.min_connections,
        }
    }
}
