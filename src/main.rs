// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod registry;
mod sampler;
mod scheduler;
mod server;
mod store;

use registry::SourceRegistry;
use scheduler::Scheduler;
use store::SeriesStore;

#[derive(Parser, Debug)]
#[command(name = "streamwatch")]
#[command(about = "Polls live-stream viewer counts and serves the history as a chart")]
struct Args {
    /// Path to the stream configuration file
    #[arg(short, long, default_value = "scrobbler.config.json")]
    config: PathBuf,

    /// Path to the historical data file
    #[arg(long, default_value = "scrobbler.historical.json")]
    history: PathBuf,

    /// Address to serve the chart and data API on
    #[arg(short, long, default_value = "0.0.0.0:8989")]
    listen: String,

    /// Seconds between polling cycles
    #[arg(short, long, default_value = "20")]
    interval: u64,

    /// YouTube API key (required when any YouTube stream is configured)
    #[arg(long, env = "YOUTUBE_API_KEY")]
    youtube_api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = config::load(&args.config)?;
    let registry = SourceRegistry::from_config(&config, args.youtube_api_key.as_deref())?;
    info!(streams = registry.len(), "configured viewer-count sources");

    let store = Arc::new(SeriesStore::load(&args.history)?);
    info!(
        samples = store.len(),
        path = %args.history.display(),
        "loaded historical data"
    );

    let scheduler = Scheduler::new(registry, store.clone(), Duration::from_secs(args.interval));
    let _scheduler = scheduler.start();

    server::run(&args.listen, store).await
}
