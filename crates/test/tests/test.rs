#[queue_depth_test::test(mysql)]
fn mysql_required() -> Result<(), ()> {
  log::info!("Hello, world!");
  log::trace!("Hello, world!");

  Ok(())
}

#[queue_depth_test::test]
fn sync_test() {
  log::debug!("Hello, world!");
}

#[queue_depth_test::test]
async fn async_test() -> Result<(), ()> {
  log::info!("Hello, world!");
  log::warn!("Hello, world!");
  log::error!("Hello, world!");
  log::debug!("Hello, world!");
  log::trace!("Hello, world!");

  tokio::task::yield_now().await;

  Ok(())
}
