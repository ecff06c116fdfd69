/// Tables the store reads, as created by the CI system. Only fixtures and
/// local development databases create them; the store itself never writes.
pub const SCHEMA: [&str; 2] = [
  r#"CREATE TABLE IF NOT EXISTS Run (
  runid BIGINT NOT NULL PRIMARY KEY,
  component VARCHAR(255) NOT NULL,
  project VARCHAR(255) NOT NULL,
  run_type VARCHAR(64) NOT NULL,
  user VARCHAR(64) NOT NULL,
  description VARCHAR(1024) NOT NULL
)"#,
  r#"CREATE TABLE IF NOT EXISTS Task (
  runid BIGINT NOT NULL,
  platform VARCHAR(255) NOT NULL,
  job_type VARCHAR(64) NOT NULL,
  state VARCHAR(32) NOT NULL
)"#,
];

/// Value of `Task.state` for tasks waiting to start.
pub const QUEUED_STATE: &str = "queued";
