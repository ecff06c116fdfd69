use queue_depth::{Config, JobType, MemoryStore, Platform, Result, Run, RunId, Task, TaskState};
use queue_depth_server::QueueDepthServer;
use std::sync::Arc;

fn seed(store: &MemoryStore) {
  let platforms = ["nmi:x86_64_rhap_5", "nmi:x86_64_winnt_6.1", "nmi:ppc_aix_5.2", "local"];

  for (offset, description) in ["trunk-nightly", "NMI Ports - trunk"].iter().enumerate() {
    let run_id = RunId::new(1000 + offset as u64);
    store.add_run(Run {
      run_id,
      component: "condor".to_string(),
      project: "condor".to_string(),
      run_type: "build".to_string(),
      owner: "cndrauto".to_string(),
      description: description.to_string(),
    });

    for (index, platform) in platforms.iter().enumerate() {
      store.add_task(Task {
        run_id,
        platform: Platform::parse(*platform),
        job_type: JobType::new("build"),
        state: TaskState::Running,
      });

      // Enough variety to show every band.
      for _ in 0..(index * 3 + offset) {
        store.add_task(Task {
          run_id,
          platform: Platform::parse(*platform),
          job_type: JobType::new("build"),
          state: TaskState::Queued,
        });
      }
    }
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  queue_depth_logger::init_logger();

  let store = MemoryStore::new();
  seed(&store);

  let server = QueueDepthServer::new(Arc::new(store), Arc::new(Config::default()));

  // Open http://127.0.0.1:5338/ in a browser
  server.serve("127.0.0.1:5338").await
}
