use crate::{Result, RunId, RunQuery, Store};

/// Finds the most recent run of a branch: the highest run id among runs that
/// match component, project, run type and owner exactly and whose description
/// starts with the branch name.
///
/// `Ok(None)` means the branch has no runs yet. That is an ordinary outcome
/// and callers report the branch as empty.
pub async fn resolve_latest_run(store: &dyn Store, query: &RunQuery) -> Result<Option<RunId>> {
  let run_id = store.latest_run(query).await?;

  match run_id {
    Some(run_id) => log::debug!(
      "Branch `{}` ({}) resolved to run {}",
      query.branch.branch(),
      query.run_type,
      run_id
    ),
    None => log::info!(
      "No {} run found for branch `{}` owned by {}",
      query.run_type,
      query.branch.branch(),
      query.owner
    ),
  }

  Ok(run_id)
}
