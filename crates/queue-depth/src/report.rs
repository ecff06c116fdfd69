use crate::{
  compute_queue_depth, list_platforms, resolve_latest_run, Config, Error, JobType, Platform,
  QueueDepth, QueueScope, QueuedJob, Result, RunId, RunQuery, SeverityBand, SharedStore,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinSet;

/// One colored cell of a branch row.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlatformCell {
  pub platform: Platform,
  pub display_name: String,
  pub depth: usize,
  pub band: SeverityBand,
  pub listing: Vec<QueuedJob>,
}

impl From<QueueDepth> for PlatformCell {
  fn from(queue_depth: QueueDepth) -> Self {
    PlatformCell {
      display_name: queue_depth.platform.display_name().to_string(),
      depth: queue_depth.depth(),
      band: queue_depth.band(),
      platform: queue_depth.platform,
      listing: queue_depth.listing,
    }
  }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BranchReport {
  pub branch: String,
  /// Latest run of the branch, `None` when the branch has no runs.
  pub run_id: Option<RunId>,
  pub cells: Vec<PlatformCell>,
}

impl BranchReport {
  pub fn empty(branch: impl Into<String>, run_id: Option<RunId>) -> Self {
    BranchReport {
      branch: branch.into(),
      run_id,
      cells: vec![],
    }
  }

  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }

  pub fn cell(&self, display_name: &str) -> Option<&PlatformCell> {
    self.cells.iter().find(|c| c.display_name == display_name)
  }
}

/// Snapshot of every tracked branch, in configuration order.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueueReport {
  pub job_type: JobType,
  pub generated_at: DateTime<Utc>,
  pub branches: Vec<BranchReport>,
}

impl QueueReport {
  pub fn branch(&self, branch: &str) -> Option<&BranchReport> {
    self.branches.iter().find(|b| b.branch == branch)
  }
}

/// Builds [`QueueReport`]s. Branches and platforms are computed concurrently
/// and joined back in a fixed order. The first store failure aborts every
/// outstanding query and fails the whole report.
#[derive(Clone)]
pub struct QueueDepthReporter {
  store: SharedStore,
  config: Arc<Config>,
}

impl QueueDepthReporter {
  pub fn new(store: SharedStore, config: Arc<Config>) -> Self {
    QueueDepthReporter { store, config }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub async fn report(&self, job_type: &JobType) -> Result<QueueReport> {
    let timeout = self.config.render_timeout;

    tokio::time::timeout(timeout, self.collect(job_type))
      .await
      .map_err(|_| {
        Error::timeout(format!(
          "queue depth report did not finish within {}",
          humantime::format_duration(timeout)
        ))
      })?
  }

  async fn collect(&self, job_type: &JobType) -> Result<QueueReport> {
    log::info!(
      "Computing {} queue depths for {} branches",
      job_type,
      self.config.branches.len()
    );

    let tasks = self.config.branches.iter().map(|branch| {
      let reporter = self.clone();
      let job_type = job_type.clone();
      let branch = branch.clone();

      async move { reporter.branch_report(&job_type, &branch).await }
    });

    let branches = join_ordered(tasks).await?;

    Ok(QueueReport {
      job_type: job_type.clone(),
      generated_at: Utc::now(),
      branches,
    })
  }

  /// Row for a single branch: latest run, its platforms, and the depth of
  /// each platform.
  pub async fn branch_report(&self, job_type: &JobType, branch: &str) -> Result<BranchReport> {
    let query = RunQuery::for_branch(&self.config, job_type, branch);

    let Some(run_id) = resolve_latest_run(self.store.as_ref(), &query).await? else {
      return Ok(BranchReport::empty(branch, None));
    };

    let platforms = list_platforms(
      self.store.as_ref(),
      run_id,
      &self.config.owner,
      self.config.platform_order,
    )
    .await?;

    let scope = QueueScope::from_config(&self.config);
    let tasks = platforms.into_iter().map(|platform| {
      let store = self.store.clone();
      let scope = scope.clone();
      let job_type = job_type.clone();

      async move { compute_queue_depth(store.as_ref(), &scope, &platform, &job_type).await }
    });

    let cells = join_ordered(tasks)
      .await?
      .into_iter()
      .map(PlatformCell::from)
      .collect();

    Ok(BranchReport {
      branch: branch.to_string(),
      run_id: Some(run_id),
      cells,
    })
  }
}

/// Runs every future on the runtime and returns their outputs in input order.
/// Returns on the first error; dropping the set aborts whatever is still
/// running.
async fn join_ordered<I, F, T>(futures: I) -> Result<Vec<T>>
where
  I: IntoIterator<Item = F>,
  F: std::future::Future<Output = Result<T>> + Send + 'static,
  T: Send + 'static,
{
  let mut set = JoinSet::new();
  let mut count = 0;

  for (index, future) in futures.into_iter().enumerate() {
    set.spawn(async move { (index, future.await) });
    count += 1;
  }

  let mut results: Vec<Option<T>> = (0..count).map(|_| None).collect();

  while let Some(joined) = set.join_next().await {
    let (index, result) =
      joined.map_err(|e| Error::error(format!("Queue depth task failed: {}", e)))?;

    match result {
      Ok(value) => results[index] = Some(value),
      Err(err) => {
        log::error!("Aborting queue depth report: {}", err);
        set.abort_all();
        return Err(err);
      }
    }
  }

  results
    .into_iter()
    .collect::<Option<Vec<T>>>()
    .ok_or_else(|| Error::error("Queue depth task finished without a result"))
}
