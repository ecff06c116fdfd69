use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_JOB_TYPE: &str = "build";

/// Kind of job being reported on, e.g. `build` or `test`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct JobType(String);

impl JobType {
  pub fn new(job_type: impl Into<String>) -> Self {
    JobType(job_type.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Default for JobType {
  fn default() -> Self {
    JobType(DEFAULT_JOB_TYPE.to_string())
  }
}

impl fmt::Display for JobType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Task state as written by the CI executor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum TaskState {
  Queued,
  Running,
  Completed,
  Failed,
  Other(String),
}

impl TaskState {
  /// Queued but not yet started.
  pub fn is_queued(&self) -> bool {
    matches!(self, TaskState::Queued)
  }

  pub fn as_str(&self) -> &str {
    match self {
      TaskState::Queued => "queued",
      TaskState::Running => "running",
      TaskState::Completed => "completed",
      TaskState::Failed => "failed",
      TaskState::Other(state) => state,
    }
  }
}

impl From<String> for TaskState {
  fn from(s: String) -> Self {
    match s.trim().to_ascii_lowercase().as_str() {
      "queued" => TaskState::Queued,
      "running" => TaskState::Running,
      "completed" => TaskState::Completed,
      "failed" => TaskState::Failed,
      _ => TaskState::Other(s),
    }
  }
}

impl From<&str> for TaskState {
  fn from(s: &str) -> Self {
    TaskState::from(s.to_string())
  }
}

impl From<TaskState> for String {
  fn from(state: TaskState) -> Self {
    state.as_str().to_string()
  }
}

impl fmt::Display for TaskState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_job_type_default() {
    assert_eq!(JobType::default(), JobType::new("build"));
    assert_eq!(JobType::default().to_string(), "build");
  }

  #[test]
  fn test_task_state_from_string() {
    assert_eq!(TaskState::from("queued"), TaskState::Queued);
    assert_eq!(TaskState::from("QUEUED"), TaskState::Queued);
    assert_eq!(TaskState::from("running"), TaskState::Running);
    assert_eq!(TaskState::from("completed"), TaskState::Completed);
    assert_eq!(TaskState::from("failed"), TaskState::Failed);
    assert_eq!(
      TaskState::from("held"),
      TaskState::Other("held".to_string())
    );
  }

  #[test]
  fn test_only_queued_is_queued() {
    assert!(TaskState::Queued.is_queued());
    assert!(!TaskState::Running.is_queued());
    assert!(!TaskState::Completed.is_queued());
    assert!(!TaskState::Failed.is_queued());
    assert!(!TaskState::Other("queued-ish".to_string()).is_queued());
  }

  #[test]
  fn test_task_state_as_str() {
    assert_eq!(TaskState::Queued.as_str(), "queued");
    assert_eq!(TaskState::Other("held".to_string()).as_str(), "held");
  }
}
