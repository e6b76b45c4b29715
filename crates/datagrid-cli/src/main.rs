//! Datagrid CLI
//!
//! Serves registered tables over HTTP and manages the demo database.

mod commands;

use clap::{Parser, Subcommand};
use commands::{SeedCommand, ServeCommand};
use tracing_subscriber::{layer::SubscriberExt, Layer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "DATAGRID_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log format: compact, full
    #[arg(
        long,
        default_value = "compact",
        env = "DATAGRID_LOG_FORMAT",
        global = true
    )]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve(ServeCommand),
    /// Insert the demo people rows
    Seed(SeedCommand),
}

fn env_filter(log_level: &str) -> anyhow::Result<tracing_subscriber::EnvFilter> {
    // RUST_LOG wins when set
    if std::env::var("RUST_LOG").is_ok() {
        return Ok(tracing_subscriber::EnvFilter::try_from_default_env()?);
    }

    Ok(tracing_subscriber::EnvFilter::try_new(format!(
        "datagrid={level},\
         datagrid_cli={level},\
         datagrid_core={level},\
         datagrid_database={level},\
         datagrid_migrations={level},\
         datagrid_query={level},\
         datagrid_query_sea={level},\
         datagrid_tables={level},\
         tower_http={level},\
         sqlx=warn,\
         sea_orm=warn,\
         sea_orm_migration=warn,\
         hyper=warn,\
         tower=warn",
        level = log_level
    ))?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let fmt_layer = match cli.log_format.as_str() {
        "full" => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
        _ => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter(&cli.log_level)?)
        .with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Serve(serve_cmd) => serve_cmd.execute(),
        Commands::Seed(seed_cmd) => seed_cmd.execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datagrid_core::CountMode;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "datagrid",
            "--log-level",
            "debug",
            "serve",
            "--database-url",
            "sqlite::memory:",
            "--count-mode",
            "legacy",
            "--max-page-size",
            "50",
        ])
        .unwrap();

        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Commands::Serve(cmd) => {
                assert_eq!(cmd.address, "127.0.0.1:3000");
                let config = cmd.grid_config().unwrap();
                assert_eq!(config.count_mode, CountMode::Legacy);
                assert_eq!(config.max_page_size, 50);
                assert_eq!(config.default_page_size, 10);
            }
            Commands::Seed(_) => panic!("expected serve"),
        }
    }

    #[test]
    fn test_unknown_count_mode_is_rejected() {
        let result = Cli::try_parse_from([
            "datagrid",
            "serve",
            "--database-url",
            "sqlite::memory:",
            "--count-mode",
            "fuzzy",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_env_filter_accepts_levels() {
        assert!(env_filter("warn").is_ok());
    }
}
