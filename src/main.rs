//! s3emu-router - S3 request router with a probe backend
//!
//! Serves the S3 REST surface and answers every request with the operation it
//! was routed to.

use clap::Parser;
use s3emu_router::handler::ProbeHandler;
use s3emu_router::metrics::server::MetricsServer;
use s3emu_router::{config::Config, logging, server::Server};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// s3emu-router - routing front end for an S3-compatible emulator
#[derive(Parser, Debug)]
#[command(name = "s3emu-router")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides server.address
    #[arg(short, long)]
    address: Option<String>,

    /// Log level (trace, debug, info, warn, error), overrides logging.level
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(address) = args.address {
        config.server.address = address;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    config.validate()?;

    logging::init(&config.logging)?;
    info!("Starting s3emu-router v{}", s3emu_router::VERSION);
    if let Some(path) = &args.config {
        info!("Loaded configuration from {:?}", path);
    }

    let mut metrics_server = if config.metrics.enabled {
        let mut server = MetricsServer::new(&config.metrics);
        server.start().await?;
        Some(server)
    } else {
        None
    };

    let server = Server::bind(config, Arc::new(ProbeHandler::new())).await?;
    server
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    if let Some(metrics_server) = metrics_server.as_mut() {
        metrics_server.shutdown().await;
    }

    Ok(())
}
