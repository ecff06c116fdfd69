use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored platform value for work that runs on the submitting host and is
/// never distributed to a build platform.
pub const LOCAL_PLATFORM: &str = "local";

const NAMESPACE_SEPARATOR: char = ':';

/// An execution environment as recorded on a task, e.g. `nmi:x86_64_rhap_5`.
/// Remote platforms keep the stored identifier untouched, so it can be bound
/// back into queries as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
  Local,
  Remote(String),
}

impl Platform {
  /// Only the exact value `local` is the local sentinel.
  pub fn parse(value: impl Into<String>) -> Self {
    let value = value.into();

    if value == LOCAL_PLATFORM {
      Platform::Local
    } else {
      Platform::Remote(value)
    }
  }

  pub fn remote(name: impl Into<String>) -> Self {
    Platform::Remote(name.into())
  }

  pub fn namespaced(namespace: impl AsRef<str>, name: impl AsRef<str>) -> Self {
    Platform::Remote(format!(
      "{}{}{}",
      namespace.as_ref(),
      NAMESPACE_SEPARATOR,
      name.as_ref()
    ))
  }

  /// Whether jobs on this platform go through the distributed queue.
  pub fn is_distributable(&self) -> bool {
    matches!(self, Platform::Remote(_))
  }

  fn split(&self) -> (Option<&str>, &str) {
    match self {
      Platform::Local => (None, LOCAL_PLATFORM),
      Platform::Remote(stored) => match stored.split_once(NAMESPACE_SEPARATOR) {
        Some((namespace, name)) if !namespace.is_empty() => (Some(namespace), name),
        _ => (None, stored),
      },
    }
  }

  pub fn namespace(&self) -> Option<&str> {
    self.split().0
  }

  /// The identifier exactly as the store records it.
  pub fn stored(&self) -> &str {
    match self {
      Platform::Local => LOCAL_PLATFORM,
      Platform::Remote(stored) => stored,
    }
  }

  /// The name shown in the dashboard, without the namespace prefix.
  pub fn display_name(&self) -> &str {
    self.split().1
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.stored())
  }
}

impl From<String> for Platform {
  fn from(value: String) -> Self {
    Platform::parse(value)
  }
}

impl From<&str> for Platform {
  fn from(value: &str) -> Self {
    Platform::parse(value)
  }
}

impl From<Platform> for String {
  fn from(platform: Platform) -> Self {
    match platform {
      Platform::Local => LOCAL_PLATFORM.to_string(),
      Platform::Remote(stored) => stored,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_local() {
    assert_eq!(Platform::parse("local"), Platform::Local);
    assert!(!Platform::Local.is_distributable());
  }

  #[test]
  fn test_only_exact_local_is_local() {
    assert_eq!(Platform::parse("LOCAL"), Platform::remote("LOCAL"));
    assert_eq!(Platform::parse("local "), Platform::remote("local "));
    assert!(Platform::parse("local ").is_distributable());
  }

  #[test]
  fn test_stored_is_verbatim() {
    let platform = Platform::parse("nmi:linux-x86 ");
    assert_eq!(platform.stored(), "nmi:linux-x86 ");
    assert_eq!(platform.namespace(), Some("nmi"));
    assert_eq!(platform.display_name(), "linux-x86 ");
    assert_ne!(platform, Platform::parse("nmi:linux-x86"));
    assert_eq!(String::from(platform), "nmi:linux-x86 ");
  }

  #[test]
  fn test_parse_namespaced() {
    let platform = Platform::parse("nmi:linux-x86");
    assert_eq!(platform, Platform::namespaced("nmi", "linux-x86"));
    assert_eq!(platform.namespace(), Some("nmi"));
    assert_eq!(platform.display_name(), "linux-x86");
    assert_eq!(platform.stored(), "nmi:linux-x86");
    assert!(platform.is_distributable());
  }

  #[test]
  fn test_parse_bare() {
    let platform = Platform::parse("x86_64_winnt_5.1");
    assert_eq!(platform, Platform::remote("x86_64_winnt_5.1"));
    assert_eq!(platform.namespace(), None);
    assert_eq!(platform.display_name(), "x86_64_winnt_5.1");
    assert_eq!(platform.stored(), "x86_64_winnt_5.1");
  }

  #[test]
  fn test_parse_leading_separator_is_not_a_namespace() {
    let platform = Platform::parse(":odd");
    assert_eq!(platform, Platform::remote(":odd"));
    assert_eq!(platform.stored(), ":odd");
  }

  #[test]
  fn test_display_is_stored_form() {
    assert_eq!(
      Platform::namespaced("nmi", "windows-x64").to_string(),
      "nmi:windows-x64"
    );
    assert_eq!(Platform::Local.to_string(), "local");
  }
}
