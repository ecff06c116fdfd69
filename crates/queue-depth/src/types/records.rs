use crate::{JobType, Platform, RunId, TaskState};
use serde::{Deserialize, Serialize};

/// One invocation of the CI pipeline. The branch is encoded as a prefix of
/// `description`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Run {
  pub run_id: RunId,
  pub component: String,
  pub project: String,
  pub run_type: String,
  pub owner: String,
  pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
  pub run_id: RunId,
  pub platform: Platform,
  pub job_type: JobType,
  pub state: TaskState,
}

/// A queued task as shown in the drill-down listing of a platform cell.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QueuedJob {
  pub run_id: RunId,
  pub description: String,
  pub platform: Platform,
  pub job_type: JobType,
}

impl QueuedJob {
  /// Single line summary, e.g. `1234 trunk-nightly`.
  pub fn summary(&self) -> String {
    format!("{} {}", self.run_id, self.description)
  }
}
