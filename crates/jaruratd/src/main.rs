//! Jarurat Care Daemon - support intake API
//!
//! Accepts support requests and volunteer sign-ups, triages each request,
//! and stores everything under the data directory.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use jaruratd::config::Config;
use jaruratd::server;
use jaruratd::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jaruratd")]
#[command(about = "Jarurat Care support intake API", long_about = None)]
#[command(version)]
struct Args {
    /// Config file (default: $JARURAT_CONFIG or /etc/jarurat/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides [server].bind
    #[arg(long)]
    bind: Option<String>,

    /// Data directory, overrides [server].data_dir
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Write a default config file to this path and exit
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Some(path) = args.write_default_config {
        return Config::save_default(&path);
    }

    info!("Jarurat Care daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(args.config.as_deref());
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(data_dir) = args.data_dir {
        config.server.data_dir = data_dir;
    }
    info!("Data directory: {}", config.server.data_dir.display());

    let state = AppState::from_config(config)?;
    server::run(Arc::new(state)).await
}
