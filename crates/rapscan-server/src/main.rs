//! Roblox inventory valuation service - entry point.
//!
//! Scans a user's inventory across the Roblox endpoints, prices the
//! sellable items, and serves the summary over HTTP.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use rapscan_server::{init_logging, AppConfig, Application};

/// Roblox inventory valuation service
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via RAPSCAN_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging()?;

    info!("Starting rapscan v{}", env!("CARGO_PKG_VERSION"));

    // CLI path must exist; the ambient path tolerates absence.
    let config = match args.config {
        Some(path) => {
            info!(config_path = %path, "Loading configuration");
            AppConfig::from_file(&path)?
        }
        None => AppConfig::load()?,
    };

    info!(
        addr = %config.server.bind_addr(),
        enrichment = ?config.pipeline.enrichment,
        "Configuration loaded"
    );

    let app = Application::new(config)?;
    app.run().await?;

    Ok(())
}
