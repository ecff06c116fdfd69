use crate::{Config, JobType, Platform, QueuedJob, Result, Run, RunId};
use std::sync::Arc;

/// How a run's branch is recognised. Branch names are not a column of their
/// own in the CI database; they are the leading text of the run description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchMatch {
  Prefix(String),
}

impl BranchMatch {
  /// Escape character used by [`BranchMatch::like_pattern`].
  pub const LIKE_ESCAPE: char = '!';

  pub fn prefix(prefix: impl Into<String>) -> Self {
    BranchMatch::Prefix(prefix.into())
  }

  /// ASCII case-insensitive prefix test, the way `LIKE` compares under
  /// SQLite and MySQL's default `_ci` collations.
  pub fn matches(&self, description: &str) -> bool {
    match self {
      BranchMatch::Prefix(prefix) => description
        .get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false),
    }
  }

  /// SQL `LIKE` pattern, to be used with `ESCAPE '!'`. Wildcards inside the
  /// branch name are matched literally.
  pub fn like_pattern(&self) -> String {
    match self {
      BranchMatch::Prefix(prefix) => {
        let mut pattern = String::with_capacity(prefix.len() + 1);
        for c in prefix.chars() {
          if matches!(c, '%' | '_') || c == Self::LIKE_ESCAPE {
            pattern.push(Self::LIKE_ESCAPE);
          }
          pattern.push(c);
        }
        pattern.push('%');
        pattern
      }
    }
  }

  pub fn branch(&self) -> &str {
    match self {
      BranchMatch::Prefix(prefix) => prefix,
    }
  }
}

/// Selects the runs of one tracked branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunQuery {
  pub component: String,
  pub project: String,
  pub run_type: JobType,
  pub owner: String,
  pub branch: BranchMatch,
}

impl RunQuery {
  pub fn for_branch(config: &Config, run_type: &JobType, branch: impl Into<String>) -> Self {
    RunQuery {
      component: config.component.clone(),
      project: config.project.clone(),
      run_type: run_type.clone(),
      owner: config.owner.clone(),
      branch: BranchMatch::prefix(branch),
    }
  }

  pub fn matches(&self, run: &Run) -> bool {
    run.component == self.component
      && run.project == self.project
      && run.run_type == self.run_type.as_str()
      && run.owner == self.owner
      && self.branch.matches(&run.description)
  }
}

/// Runs whose queued tasks count towards the backlog. Not tied to a single
/// run id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueScope {
  pub component: String,
  pub project: String,
  pub owner: String,
}

impl QueueScope {
  pub fn from_config(config: &Config) -> Self {
    QueueScope {
      component: config.component.clone(),
      project: config.project.clone(),
      owner: config.owner.clone(),
    }
  }

  pub fn matches(&self, run: &Run) -> bool {
    run.component == self.component && run.project == self.project && run.owner == self.owner
  }
}

/// # Store
/// Read-only access to the CI database. Every method is a single query; an
/// `Err` means the store could not answer and aborts the render. Missing data
/// is `None` or an empty `Vec`, never an error.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
  /// The highest run id matching `query`.
  async fn latest_run(&self, query: &RunQuery) -> Result<Option<RunId>>;

  /// Platforms of the tasks of `run_id`, for runs owned by `owner`, in the
  /// order the store returns them. May include duplicates and `local`.
  async fn run_platforms(&self, run_id: RunId, owner: &str) -> Result<Vec<Platform>>;

  /// Tasks in the queued state for `platform` and `job_type`, across every
  /// run within `scope`.
  async fn queued_jobs(
    &self,
    scope: &QueueScope,
    platform: &Platform,
    job_type: &JobType,
  ) -> Result<Vec<QueuedJob>>;
}

pub type SharedStore = Arc<dyn Store>;
