//! Queue depth dashboard service.
//!
//! Environment variables:
//! - DATABASE_URL - CI database connection string (overrides the config file)
//! - QUEUE_DEPTH_CONFIG - optional YAML config file
//! - QUEUE_DEPTH_ADDR - listen address (default: 0.0.0.0:8080)
//! - QUEUE_DEPTH_LOG - log level (default: info)

use anyhow::Context;
use queue_depth::Config;
use queue_depth_server::QueueDepthServer;
use queue_depth_store::SqlStore;
use std::sync::Arc;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

fn load_config() -> anyhow::Result<Config> {
  let mut config = match std::env::var("QUEUE_DEPTH_CONFIG") {
    Ok(path) => Config::from_file(&path).with_context(|| format!("Failed to load {}", path))?,
    Err(_) => Config::default(),
  };

  config.database.apply_env();
  config.validate()?;

  Ok(config)
}

async fn shutdown_signal() {
  if let Err(err) = tokio::signal::ctrl_c().await {
    log::error!("Failed to listen for shutdown signal: {}", err);
    return;
  }

  log::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv::dotenv().ok();
  queue_depth_logger::init_logger();

  let config = load_config()?;
  log::info!(
    "Tracking {} branches for {} ({}/{})",
    config.branches.len(),
    config.owner,
    config.component,
    config.project
  );

  let store = SqlStore::connect(&config.database)
    .await
    .context("Failed to connect to the CI database")?;

  let addr = std::env::var("QUEUE_DEPTH_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
  let server = QueueDepthServer::new(Arc::new(store), Arc::new(config));

  server.serve_with_shutdown(&addr, shutdown_signal()).await?;

  Ok(())
}
