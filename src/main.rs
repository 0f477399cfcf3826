//! edufeedback - online learning feedback service
//!
//! Collects student and teacher feedback through web forms, scores the
//! open-ended answers for sentiment and gives administrators charts and
//! CSV/JSON exports.

mod cli;

use clap::{Parser, Subcommand};
use edufeedback_core::error::Result;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(name = "edufeedback")]
#[command(about = "Online learning feedback collection and analysis", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Database path (overrides configuration and default)
    #[arg(long, env = "FEEDBACK_DB_PATH")]
    db_path: Option<String>,

    /// Configuration file (default: ./feedback.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web service
    Serve {
        /// Listen address (default from configuration, e.g. 0.0.0.0:5000)
        #[arg(long)]
        addr: Option<String>,
    },

    /// Create the database and run migrations
    Init {
        /// Database path to initialize
        #[arg(long)]
        database: Option<String>,
    },

    /// Export feedback records
    Export {
        /// student or teacher
        #[arg(long)]
        kind: String,

        /// csv or json
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show record counts and distributions
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::new(format!(
        "edufeedback={lvl},edufeedback_core={lvl},tower_http={lvl},libsql=warn",
        lvl = level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("edufeedback v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = cli::helpers::load_config(cli.config.as_deref())?;
    let db_path = cli::helpers::get_db_path(cli.db_path, &config);

    match cli.command {
        Commands::Serve { addr } => cli::serve::handle(addr, config, db_path).await,
        Commands::Init { database } => cli::init::handle(database, db_path).await,
        Commands::Export {
            kind,
            format,
            output,
        } => cli::export::handle(kind, format, output, db_path).await,
        Commands::Stats { json } => cli::stats::handle(json, db_path).await,
    }
}
