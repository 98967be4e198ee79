//! CLI commands implementation.

mod analyze;
mod config_cmd;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings, LoadOptions};

#[derive(Parser)]
#[command(name = "docscan")]
#[command(about = "Analyze documents with Azure Form Recognizer")]
#[command(version)]
pub struct Cli {
    /// Config file (TOML, YAML, or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a local file or a document URL and print the result
    Analyze(analyze::AnalyzeArgs),

    /// Start the web UI
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default from config, 127.0.0.1:8501)
        bind: Option<String>,
    },

    /// Show the resolved configuration
    Config,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(&LoadOptions {
        config_path: cli.config.clone(),
    })
    .await?;
    tracing::debug!("Resolved settings: {:?}", settings);

    match cli.command {
        Commands::Analyze(args) => analyze::cmd_analyze(&settings, args).await,
        Commands::Serve { bind } => serve::cmd_serve(&settings, bind.as_deref()).await,
        Commands::Config => config_cmd::cmd_config_show(&settings),
    }
}
