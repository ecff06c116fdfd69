use crate::{mask_password, store_error, QUEUED_STATE};
use queue_depth::{
  async_trait, DatabaseConfig, Error, JobType, Platform, QueueScope, QueuedJob, Result, RunId,
  RunQuery, Store,
};
use sqlx::{any::AnyPoolOptions, AnyPool};
use std::time::Duration;

const LATEST_RUN_SQL: &str = "SELECT runid
  FROM Run
  WHERE component = ?
    AND project = ?
    AND run_type = ?
    AND user = ?
    AND description LIKE ? ESCAPE '!'
  ORDER BY runid DESC
  LIMIT 1";

const RUN_PLATFORMS_SQL: &str = "SELECT DISTINCT Task.platform
  FROM Task
  JOIN Run ON Task.runid = Run.runid
  WHERE Task.runid = ?
    AND Run.user = ?";

const QUEUED_JOBS_SQL: &str = "SELECT Task.runid, Run.description, Task.platform, Task.job_type
  FROM Task
  JOIN Run ON Task.runid = Run.runid
  WHERE Task.platform = ?
    AND Task.job_type = ?
    AND Task.state = ?
    AND Run.component = ?
    AND Run.project = ?
    AND Run.user = ?
  ORDER BY Task.runid ASC";

/// [`Store`] over a pooled SQL connection. MySQL in production; any driver
/// compiled into `sqlx::any` works, which is how the tests use SQLite.
#[derive(Clone)]
pub struct SqlStore {
  pool: AnyPool,
}

impl SqlStore {
  pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
    Self::connect_with(config.url()?, config.max_connections, config.acquire_timeout).await
  }

  pub async fn connect_with(
    url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
  ) -> Result<Self> {
    if max_connections == 0 {
      return Err(Error::config_error("max_connections must be > 0"));
    }

    sqlx::any::install_default_drivers();
    log::info!("Connecting to {}", mask_password(url));

    let pool = AnyPoolOptions::new()
      .max_connections(max_connections)
      .acquire_timeout(acquire_timeout)
      .connect(url)
      .await
      .map_err(store_error)?;

    Ok(Self { pool })
  }

  /// Wraps an existing pool. The caller must have installed the `any`
  /// drivers.
  pub fn from_pool(pool: AnyPool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &AnyPool {
    &self.pool
  }

  /// Round trip to the database, used by health checks.
  pub async fn ping(&self) -> Result<()> {
    sqlx::query("SELECT 1")
      .execute(&self.pool)
      .await
      .map_err(store_error)?;

    Ok(())
  }

  pub async fn close(&self) {
    self.pool.close().await;
  }
}

fn run_id_from_row(value: i64) -> Result<RunId> {
  RunId::try_from(value)
}

fn run_id_param(run_id: RunId) -> Result<i64> {
  i64::try_from(run_id.inner())
    .map_err(|_| Error::query_failed(format!("RunId {} does not fit the runid column", run_id)))
}

#[async_trait]
impl Store for SqlStore {
  async fn latest_run(&self, query: &RunQuery) -> Result<Option<RunId>> {
    log::trace!("Resolving latest run: {:?}", query);

    let run_id: Option<i64> = sqlx::query_scalar(LATEST_RUN_SQL)
      .bind(query.component.clone())
      .bind(query.project.clone())
      .bind(query.run_type.as_str().to_string())
      .bind(query.owner.clone())
      .bind(query.branch.like_pattern())
      .fetch_optional(&self.pool)
      .await
      .map_err(store_error)?;

    run_id.map(run_id_from_row).transpose()
  }

  async fn run_platforms(&self, run_id: RunId, owner: &str) -> Result<Vec<Platform>> {
    let platforms: Vec<String> = sqlx::query_scalar(RUN_PLATFORMS_SQL)
      .bind(run_id_param(run_id)?)
      .bind(owner.to_string())
      .fetch_all(&self.pool)
      .await
      .map_err(store_error)?;

    Ok(platforms.into_iter().map(Platform::from).collect())
  }

  async fn queued_jobs(
    &self,
    scope: &QueueScope,
    platform: &Platform,
    job_type: &JobType,
  ) -> Result<Vec<QueuedJob>> {
    let rows: Vec<(i64, String, String, String)> = sqlx::query_as(QUEUED_JOBS_SQL)
      .bind(platform.stored().to_string())
      .bind(job_type.as_str().to_string())
      .bind(QUEUED_STATE.to_string())
      .bind(scope.component.clone())
      .bind(scope.project.clone())
      .bind(scope.owner.clone())
      .fetch_all(&self.pool)
      .await
      .map_err(store_error)?;

    rows
      .into_iter()
      .map(|(run_id, description, platform, job_type)| {
        Ok(QueuedJob {
          run_id: run_id_from_row(run_id)?,
          description,
          platform: Platform::from(platform),
          job_type: JobType::new(job_type),
        })
      })
      .collect()
  }
}
