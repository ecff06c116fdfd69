use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a CI run. Ids grow monotonically, so a larger id is a more
/// recent run.
#[derive(
  Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
#[serde(transparent)]
pub struct RunId(u64);

impl RunId {
  pub fn new(id: u64) -> Self {
    RunId(id)
  }

  pub fn inner(&self) -> u64 {
    self.0
  }
}

impl fmt::Display for RunId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<u64> for RunId {
  fn from(id: u64) -> Self {
    RunId(id)
  }
}

impl TryFrom<i64> for RunId {
  type Error = Error;

  fn try_from(value: i64) -> Result<Self, Self::Error> {
    u64::try_from(value)
      .map(RunId)
      .map_err(|_| Error::query_failed(format!("RunId cannot be negative: {}", value)))
  }
}

impl TryFrom<&str> for RunId {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    value
      .trim()
      .parse::<u64>()
      .map(RunId)
      .map_err(|_| Error::error(format!("RunId must be a number: {:?}", value)))
  }
}
