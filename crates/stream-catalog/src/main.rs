//! Maintenance tool for video stream catalogs
//!
//! Usage:
//!   stream-catalog show                      - Summarise every stream
//!   stream-catalog check                     - Validate the catalog
//!   stream-catalog normalize [--output OUT]  - Rewrite with defaults filled in
//!   stream-catalog export --output OUT       - Export the catalog as JSON
//!   stream-catalog controls --stream NAME    - List the controls of one stream

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stream_catalog::{commands, CatalogConfig};
use telemetry::LogConfig;
use tracing::error;

#[derive(Parser)]
#[command(name = "stream-catalog")]
#[command(about = "Inspect and maintain video stream catalogs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog file
    #[arg(long, global = true, env = "STREAM_CATALOG_PATH")]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a summary of every stream
    Show,

    /// Load the catalog and report problems
    Check,

    /// Load and save back, materialising defaults
    Normalize {
        /// Write here instead of overwriting the catalog
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Export the plain catalog tree as JSON
    Export {
        /// Output file path
        #[arg(long)]
        output: PathBuf,

        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },

    /// List the controls of one stream with their applied values
    Controls {
        /// Stream name
        #[arg(long)]
        stream: String,
    },
}

fn main() -> Result<()> {
    telemetry::init_structured_logging(LogConfig::new("stream-catalog"))?;
    let cli = Cli::parse();

    let config = CatalogConfig::from_env()?.with_override(cli.catalog);
    let path = config.catalog_path.as_path();

    match cli.command {
        Commands::Show => {
            let summaries = commands::show(path)?;
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        Commands::Check => {
            if let Err(err) = commands::check(path) {
                error!(path = %path.display(), error = %format!("{err:#}"), "catalog is invalid");
                return Err(err);
            }
        }
        Commands::Normalize { output } => {
            commands::normalize(path, output.as_deref())?;
        }
        Commands::Export { output, pretty } => {
            commands::export(path, &output, pretty)?;
        }
        Commands::Controls { stream } => {
            let rows = commands::controls(path, &stream)?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    Ok(())
}
