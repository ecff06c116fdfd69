use crate::{JobType, Platform, QueueScope, QueuedJob, Result, SeverityBand, Store};
use serde::Serialize;

/// Backlog of one job type on one platform at the moment it was computed.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueueDepth {
  pub platform: Platform,
  pub job_type: JobType,
  /// Queued jobs, oldest run first.
  pub listing: Vec<QueuedJob>,
}

impl QueueDepth {
  pub fn depth(&self) -> usize {
    self.listing.len()
  }

  pub fn band(&self) -> SeverityBand {
    SeverityBand::classify(self.depth())
  }
}

/// Counts the queued jobs of `job_type` on `platform` across every run in
/// `scope`. The platform is looked up by its stored identifier, namespace
/// included. A platform with nothing queued has depth 0.
pub async fn compute_queue_depth(
  store: &dyn Store,
  scope: &QueueScope,
  platform: &Platform,
  job_type: &JobType,
) -> Result<QueueDepth> {
  let mut listing = store.queued_jobs(scope, platform, job_type).await?;

  // Listing order is oldest run first, whatever order the store used.
  listing.retain(|job| &job.platform == platform && &job.job_type == job_type);
  listing.sort_by_key(|job| job.run_id);

  let depth = QueueDepth {
    platform: platform.clone(),
    job_type: job_type.clone(),
    listing,
  };

  log::debug!(
    "Queue depth of {} on {}: {} ({})",
    job_type,
    platform,
    depth.depth(),
    depth.band().to_string()
  );

  Ok(depth)
}
