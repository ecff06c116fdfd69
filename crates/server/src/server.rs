use crate::{dashboard_handler, health_handler, report_handler, AppState};
use axum::{routing::get, Router};
use queue_depth::{Config, QueueDepthReporter, Result, SharedStore};
use std::{future::Future, sync::Arc};

#[derive(Clone)]
pub struct QueueDepthServer {
  reporter: QueueDepthReporter,
}

impl QueueDepthServer {
  pub fn new(store: SharedStore, config: Arc<Config>) -> Self {
    QueueDepthServer {
      reporter: QueueDepthReporter::new(store, config),
    }
  }

  pub fn router(&self) -> Router {
    let state = AppState {
      reporter: self.reporter.clone(),
    };

    Router::new()
      .route("/", get(dashboard_handler))
      .route("/queue-depth", get(dashboard_handler))
      .route("/api/queue-depth", get(report_handler))
      .route("/health", get(health_handler))
      .with_state(state)
  }

  pub async fn serve(&self, addr: &str) -> Result<()> {
    self.serve_with_shutdown(addr, std::future::pending()).await
  }

  pub async fn serve_with_shutdown<F>(&self, addr: &str, shutdown: F) -> Result<()>
  where
    F: Future<Output = ()> + Send + 'static,
  {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Queue depth server listening on {}", addr);

    axum::serve(listener, self.router())
      .with_graceful_shutdown(shutdown)
      .await?;

    log::info!("Queue depth server stopped");

    Ok(())
  }
}
