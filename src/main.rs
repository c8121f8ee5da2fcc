// src/main.rs - Scan program export
use clap::Parser;

use scanrig::cli::Cli;
use scanrig::config::{self, MachineParameters};
use scanrig::exporter::Exporter;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let cli = Cli::parse();

    // Initialize logging
    let level = match cli.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .init();

    tracing::info!("Starting scanrig {}", env!("CARGO_PKG_VERSION"));

    let mut params = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            config::load_config(path).map_err(|e| {
                tracing::error!("Failed to load config from '{}': {}", path.display(), e);
                Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>
            })?
        }
        None => MachineParameters::default(),
    };
    cli.overrides.apply(&mut params);

    let exporter = Exporter::new(cli.output.export_options());
    if let Err(e) = exporter.run(&params) {
        tracing::error!("Export failed: {}", e);
        return Err(Box::new(e));
    }

    Ok(())
}
