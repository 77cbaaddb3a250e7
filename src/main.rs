use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use navmind::{NavMindConfig, TripPlanner, telemetry, web};

/// NavMind: AI-powered travel planner dashboard
#[derive(Debug, Parser)]
#[command(name = "navmind", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "NAVMIND_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets may live in a .env file next to the binary
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = NavMindConfig::load_from_path(cli.config)?;

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    telemetry::init(&config.logging)?;
    tracing::debug!("Loaded configuration: {:?}", config);

    let planner = TripPlanner::from_config(&config)?;
    web::run(&config.server, Arc::new(planner)).await
}
