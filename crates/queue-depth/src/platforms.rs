use crate::{Platform, PlatformOrder, Result, RunId, Store};

/// Distinct distributable platforms that took part in `run_id`. `local` tasks
/// are dropped and duplicates collapsed. An empty list is a valid answer.
pub async fn list_platforms(
  store: &dyn Store,
  run_id: RunId,
  owner: &str,
  order: PlatformOrder,
) -> Result<Vec<Platform>> {
  let discovered = store.run_platforms(run_id, owner).await?;
  log::trace!("Run {} reported platforms: {:?}", run_id, discovered);

  let mut platforms: Vec<Platform> = Vec::with_capacity(discovered.len());
  for platform in discovered {
    if platform.is_distributable() && !platforms.contains(&platform) {
      platforms.push(platform);
    }
  }

  if order == PlatformOrder::Lexicographic {
    platforms.sort_by(|a, b| a.stored().cmp(b.stored()));
  }

  if platforms.is_empty() {
    log::info!("Run {} has no distributable platforms", run_id);
  }

  Ok(platforms)
}
