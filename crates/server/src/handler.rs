//! HTTP handlers for the dashboard.
//!
//! - GET / and GET /queue-depth - HTML dashboard
//! - GET /api/queue-depth - the same report as JSON
//! - GET /health - liveness probe

use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::{Html, IntoResponse, Response},
  Json,
};
use queue_depth::{render_html, Error, QueueDepthReporter, QueueReport};

#[derive(Clone)]
pub struct AppState {
  pub reporter: QueueDepthReporter,
}

/// Raw query string pairs. Kept as a list so a repeated `type` is not a
/// rejection; the last value wins.
pub type QueryPairs = Vec<(String, String)>;

pub const JOB_TYPE_PARAM: &str = "type";

pub fn requested_job_type(pairs: &[(String, String)]) -> Option<&str> {
  pairs
    .iter()
    .rev()
    .find(|(key, _)| key == JOB_TYPE_PARAM)
    .map(|(_, value)| value.as_str())
}

async fn build_report(
  state: &AppState,
  pairs: &[(String, String)],
) -> Result<QueueReport, RenderError> {
  let job_type = state.reporter.config().job_type(requested_job_type(pairs));

  state.reporter.report(&job_type).await.map_err(RenderError)
}

pub async fn dashboard_handler(
  State(state): State<AppState>,
  Query(pairs): Query<QueryPairs>,
) -> Result<Html<String>, RenderError> {
  let report = build_report(&state, &pairs).await?;

  Ok(Html(render_html(&report)))
}

pub async fn report_handler(
  State(state): State<AppState>,
  Query(pairs): Query<QueryPairs>,
) -> Result<Json<QueueReport>, RenderError> {
  let report = build_report(&state, &pairs).await?;

  Ok(Json(report))
}

pub async fn health_handler() -> &'static str {
  "ok"
}

/// A failed render. The page is never sent half built; the client gets a
/// plain text diagnostic instead.
#[derive(Debug)]
pub struct RenderError(pub Error);

impl IntoResponse for RenderError {
  fn into_response(self) -> Response {
    log::error!("Failed to render queue depths: {}", self.0);

    (
      StatusCode::INTERNAL_SERVER_ERROR,
      format!("Could not compute queue depths: {}\n", self.0),
    )
      .into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn pairs(raw: &[(&str, &str)]) -> QueryPairs {
    raw
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect()
  }

  #[test]
  fn test_last_type_wins() {
    assert_eq!(
      requested_job_type(&pairs(&[("type", "build"), ("type", "test")])),
      Some("test")
    );
    assert_eq!(
      requested_job_type(&pairs(&[("type", "test"), ("other", "x")])),
      Some("test")
    );
    assert_eq!(requested_job_type(&pairs(&[("other", "x")])), None);
  }
}
