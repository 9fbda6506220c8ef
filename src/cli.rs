use clap::Parser;

/// Command line interface for the application
#[derive(Parser, Debug)]
#[command(name = "school-api", about = "HTTP API for managing student records")]
pub struct Cli {
    /// Path to an optional YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to bind the HTTP server to, overrides the configuration file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind the HTTP server to, overrides the configuration file
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path of the SQLite database file, overrides the configuration file
    #[arg(long)]
    pub database_path: Option<String>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    /// Default: "info"
    #[arg(long, default_value_t = String::from("info"))]
    pub logging_level: String,
}
