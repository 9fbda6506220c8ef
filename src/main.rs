//! Main entry point for the application.
//!
//! This module parses the command line, loads environment variables and
//! configuration, initializes logging, opens the student database and serves
//! the HTTP API until a shutdown signal arrives.

mod api;
mod cli;
mod config;
mod constants;
mod db;
mod errors;
mod schema;
mod utils;
mod validation;

use clap::Parser;
use db::Database;
use tracing::{error, info, warn};

/// Main entry point that initializes and runs the application.
///
/// # Initialization steps:
/// 1. Parse CLI arguments
/// 2. Load environment variables and configuration
/// 3. Initialize logging system
/// 4. Open the database and create the schema
/// 5. Serve the API
#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Fatal error: {}", e);
        eprintln!("school-api: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: cli::Cli) -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = dotenvy::dotenv();

    let config_path = cli.config;
    let mut config = config::load_config(config_path.as_deref())?;
    config.apply_env_overrides()?;
    config.apply_cli_overrides(cli.host, cli.port, cli.database_path);
    config.validate()?;

    let log_dir = config.log_to_file.then_some(config.log_dir.as_str());
    utils::init_logging(&cli.logging_level, log_dir);

    if let Err(e) = dotenv {
        warn!("Failed to load .env file: {}", e);
    }
    match config_path {
        Some(path) => info!("Loaded configuration from {}", path),
        None => info!("No configuration file given, using defaults"),
    }

    let database = Database::new(&config)?;
    database.init_schema()?;

    info!("Starting API server on {}:{}", config.host, config.port);
    api::server::launch_server(&config, database).await
}
