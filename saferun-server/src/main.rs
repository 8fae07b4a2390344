//! saferun server - HTTP boundary for circular route recommendation

mod api;
mod artifact;
mod config;
mod state;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "saferun-server", version, about = "Recommends circular running routes")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Address to listen on, overrides the configuration
    #[arg(long)]
    bind: Option<std::net::SocketAddr>,
    /// Node attribute table (CSV)
    #[arg(long)]
    nodes: Option<PathBuf>,
    /// Edge list (CSV)
    #[arg(long)]
    edges: Option<PathBuf>,
    /// Write every recommendation as GeoJSON to this file
    #[arg(long)]
    geojson_output: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut ServerConfig) {
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(nodes) = self.nodes {
            config.nodes_path = nodes;
        }
        if let Some(edges) = self.edges {
            config.edges_path = edges;
        }
        if self.geojson_output.is_some() {
            config.geojson_output = self.geojson_output;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("saferun_server=info,saferun_core=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let mut config = ServerConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    tracing::info!("Loading route model");
    let model_config = config.model_config();
    let model = tokio::task::spawn_blocking(move || saferun_core::create_route_model(&model_config))
        .await
        .context("model loading task panicked")?
        .context("failed to load graph and safety data")?;
    tracing::info!("{model} ready");

    let state = Arc::new(AppState::new(model, &config));
    let app = api::router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!("Listening on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
