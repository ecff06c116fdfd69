use crate::{
  JobType, Platform, QueueScope, QueuedJob, Result, Run, RunId, RunQuery, Store, Task, TaskState,
};
use parking_lot::RwLock;
use std::{collections::HashMap, sync::Arc};

#[derive(Default)]
struct MemoryStoreState {
  runs: HashMap<RunId, Run>,
  tasks: Vec<Task>,
}

/// A [`Store`] kept in process memory. Useful for demos and tests; the
/// production store is SQL backed.
#[derive(Clone, Default)]
pub struct MemoryStore {
  state: Arc<RwLock<MemoryStoreState>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a run, replacing any run with the same id.
  pub fn add_run(&self, run: Run) {
    self.state.write().runs.insert(run.run_id, run);
  }

  pub fn add_task(&self, task: Task) {
    self.state.write().tasks.push(task);
  }

  /// Moves every task of `run_id` on `platform` to `state`, the way the CI
  /// executor would. Returns how many tasks changed.
  pub fn set_task_state(&self, run_id: RunId, platform: &Platform, state: TaskState) -> usize {
    let mut inner = self.state.write();
    let mut changed = 0;

    for task in inner
      .tasks
      .iter_mut()
      .filter(|t| t.run_id == run_id && &t.platform == platform)
    {
      task.state = state.clone();
      changed += 1;
    }

    changed
  }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
  async fn latest_run(&self, query: &RunQuery) -> Result<Option<RunId>> {
    let state = self.state.read();

    Ok(
      state
        .runs
        .values()
        .filter(|run| query.matches(run))
        .map(|run| run.run_id)
        .max(),
    )
  }

  async fn run_platforms(&self, run_id: RunId, owner: &str) -> Result<Vec<Platform>> {
    let state = self.state.read();

    let owned = state
      .runs
      .get(&run_id)
      .map(|run| run.owner == owner)
      .unwrap_or(false);

    if !owned {
      return Ok(vec![]);
    }

    let mut platforms: Vec<Platform> = vec![];
    for task in state.tasks.iter().filter(|t| t.run_id == run_id) {
      if !platforms.contains(&task.platform) {
        platforms.push(task.platform.clone());
      }
    }

    Ok(platforms)
  }

  async fn queued_jobs(
    &self,
    scope: &QueueScope,
    platform: &Platform,
    job_type: &JobType,
  ) -> Result<Vec<QueuedJob>> {
    let state = self.state.read();

    let mut jobs: Vec<QueuedJob> = state
      .tasks
      .iter()
      .filter(|t| t.state.is_queued() && &t.platform == platform && &t.job_type == job_type)
      .filter_map(|task| {
        let run = state.runs.get(&task.run_id)?;
        if !scope.matches(run) {
          return None;
        }

        Some(QueuedJob {
          run_id: task.run_id,
          description: run.description.clone(),
          platform: task.platform.clone(),
          job_type: task.job_type.clone(),
        })
      })
      .collect();

    jobs.sort_by_key(|job| job.run_id);

    Ok(jobs)
  }
}
