#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("Store unavailable: {0}")]
  StoreUnavailable(String),

  #[error("Query failed: {0}")]
  QueryFailed(String),

  #[error("Invalid configuration: {0}")]
  ConfigError(String),

  #[error("Timed out: {0}")]
  Timeout(String),

  #[error("IO error: {0}")]
  IOError(#[from] std::io::Error),

  #[error("Error: {0}")]
  Error(String),
}

impl Error {
  pub fn store_unavailable<T: ToString>(message: T) -> Self {
    Self::StoreUnavailable(message.to_string())
  }

  pub fn query_failed<T: ToString>(message: T) -> Self {
    Self::QueryFailed(message.to_string())
  }

  pub fn config_error<T: ToString>(message: T) -> Self {
    Self::ConfigError(message.to_string())
  }

  pub fn timeout<T: ToString>(message: T) -> Self {
    Self::Timeout(message.to_string())
  }

  pub fn io_error(source: std::io::Error) -> Self {
    Self::IOError(source)
  }

  pub fn error<T: ToString>(message: T) -> Self {
    Self::Error(message.to_string())
  }

  /// Whether the backing store failed, which aborts the whole render.
  pub fn is_store_failure(&self) -> bool {
    matches!(self, Self::StoreUnavailable(_) | Self::QueryFailed(_))
  }
}

// implement Eq and PartialEq for Error so that we can compare errors in tests
impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Self::StoreUnavailable(a), Self::StoreUnavailable(b)) => a == b,
      (Self::QueryFailed(a), Self::QueryFailed(b)) => a == b,
      (Self::ConfigError(a), Self::ConfigError(b)) => a == b,
      (Self::Timeout(a), Self::Timeout(b)) => a == b,
      (Self::IOError(a), Self::IOError(b)) => a.kind() == b.kind(),
      (Self::Error(a), Self::Error(b)) => a == b,
      _ => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_eq() {
    assert_eq!(
      Error::store_unavailable("hello"),
      Error::store_unavailable("hello")
    );
    assert_eq!(Error::query_failed("hello"), Error::query_failed("hello"));
    assert_eq!(Error::config_error("hello"), Error::config_error("hello"));
    assert_eq!(Error::timeout("hello"), Error::timeout("hello"));
    assert_eq!(
      Error::io_error(std::io::Error::new(std::io::ErrorKind::Other, "hello")),
      Error::io_error(std::io::Error::new(std::io::ErrorKind::Other, "hello"))
    );
    assert_eq!(Error::error("hello"), Error::error("hello"));
  }

  #[test]
  fn test_ne() {
    assert_ne!(
      Error::store_unavailable("hello"),
      Error::store_unavailable("world")
    );
    assert_ne!(Error::query_failed("hello"), Error::store_unavailable("hello"));
    assert_ne!(Error::config_error("hello"), Error::config_error("world"));
    assert_ne!(
      Error::io_error(std::io::Error::new(std::io::ErrorKind::Other, "hello")),
      Error::io_error(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "world"
      ))
    );
    assert_ne!(Error::error("hello"), Error::timeout("hello"));
  }

  #[test]
  fn test_is_store_failure() {
    assert!(Error::store_unavailable("down").is_store_failure());
    assert!(Error::query_failed("bad sql").is_store_failure());
    assert!(!Error::config_error("no branches").is_store_failure());
    assert!(!Error::timeout("render").is_store_failure());
  }

  #[test]
  fn test_display() {
    assert_eq!(
      Error::store_unavailable("connection refused").to_string(),
      "Store unavailable: connection refused"
    );
  }
}
