//! Lookup service binary for namesake.

use clap::Parser;
use namesake::{SearchServer, ServiceConfig, build_resolver};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// namesake: baby-name lookup over HTTP.
#[derive(Parser)]
#[command(name = "namesake", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind, overriding the config file.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding the config file.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Users can override with RUST_LOG=debug to see everything.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("namesake=info,namesake_lookup=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = if let Some(ref path) = cli.config {
        ServiceConfig::from_file(path)?
    } else {
        ServiceConfig::default()
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let resolver = build_resolver(&config)?;
    let server = SearchServer::start(resolver, &config).await?;
    info!(origin = %config.lookup.base_url, "namesake v{} ready", env!("CARGO_PKG_VERSION"));

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    server.shutdown();
    Ok(())
}
