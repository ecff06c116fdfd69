use colored::Colorize;
use log::Level;
use std::str::FromStr;
use std::sync::OnceLock;

/// Environment variable read by [`init_logger`] to pick the max level.
pub const LOG_LEVEL_ENV: &str = "QUEUE_DEPTH_LOG";

#[derive(Clone)]
pub struct Logger {
  level: Level,
}

impl Logger {
  pub fn new(level: Level) -> Self {
    Logger { level }
  }

  pub fn level(&self) -> Level {
    self.level
  }
}

impl log::Log for Logger {
  fn enabled(&self, metadata: &log::Metadata) -> bool {
    metadata.level() <= self.level
  }

  fn log(&self, record: &log::Record) {
    if !self.enabled(record.metadata()) {
      return;
    }

    let time = chrono::Local::now()
      .format("%Y-%m-%d %H:%M:%S")
      .to_string()
      .magenta();

    let level = match record.level() {
      Level::Error => "ERROR".red(),
      Level::Warn => "WARN".yellow(),
      Level::Info => "INFO".green(),
      Level::Debug => "DEBUG".blue(),
      Level::Trace => "TRACE".normal(),
    };

    let prefix = match (record.file(), record.line()) {
      (Some(file), Some(line)) => format!("{}:{} ", file, line).cyan(),
      _ => String::new().normal(),
    };

    // Diagnostics go to stderr so the binary's stdout stays clean.
    eprintln!("{}{} {} {}", prefix, time, level, record.args());
  }

  fn flush(&self) {}
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the logger with the level named by `QUEUE_DEPTH_LOG`, or `info`.
pub fn init_logger() {
  let level = std::env::var(LOG_LEVEL_ENV)
    .ok()
    .and_then(|value| Level::from_str(value.trim()).ok())
    .unwrap_or(Level::Info);

  init_logger_with_level(level);
}

/// Installs the logger once per process. Later calls are no-ops, whatever
/// level they ask for.
pub fn init_logger_with_level(level: Level) {
  if LOGGER.get().is_some() {
    return;
  }

  let logger = LOGGER.get_or_init(|| Logger::new(level));

  // Another logger may already be installed by the host process.
  if log::set_logger(logger).is_ok() {
    log::set_max_level(logger.level().to_level_filter());
  }
}
