//! Partlens CLI - identify mechanical parts from a photo.
//!
//! Partlens downsizes a photo locally, sends it to the detection backend,
//! and shows the catalog code, confidence, inventory status and annotated
//! image it gets back.
//!
//! # Usage
//!
//! ```bash
//! # Scan a photo against the configured backend
//! partlens scan part.jpg
//!
//! # Same, as an HTML result card
//! partlens scan part.jpg --format html --endpoint http://10.0.0.5:5052
//!
//! # Downscale only
//! partlens resize part.jpg -o part-small.jpg
//!
//! # Render a saved backend response
//! partlens render response.json
//!
//! # View configuration
//! partlens config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// Partlens - identify mechanical parts from a photo.
#[derive(Parser, Debug)]
#[command(name = "partlens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "PARTLENS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Downsize a photo, send it for detection and show the result
    Scan(cli::scan::ScanArgs),

    /// Downsize a photo to an upload-ready JPEG without sending it
    Resize(cli::resize::ResizeArgs),

    /// Render a saved detection response
    Render(cli::render::RenderArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.as_deref().map(cli::config::expand_path);

    // An explicit --config must load; the default location falls back to defaults.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match &config_path {
        Some(path) => partlens_core::Config::load_from(path)?,
        None => match partlens_core::Config::load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load config: {e}\n  \
                     Using default configuration. Check your config file with `partlens config path`."
                );
                partlens_core::Config::default()
            }
        },
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Partlens v{}", partlens_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Scan(args) => cli::scan::execute(args, config).await,
        Commands::Resize(args) => cli::resize::execute(args, config).await,
        Commands::Render(args) => cli::render::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, config, config_path).await,
    }
}
