use crate::{Error, JobType, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path, time::Duration};

pub const DEFAULT_COMPONENT: &str = "condor";
pub const DEFAULT_PROJECT: &str = "condor";
pub const DEFAULT_OWNER: &str = "cndrauto";
pub const DEFAULT_BRANCHES: [&str; 2] = ["trunk", "NMI Ports - trunk"];
pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// How platforms are ordered within a branch row.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformOrder {
  /// Sorted by stored identifier.
  #[default]
  Lexicographic,
  /// The order the store first reported each platform in.
  Discovery,
}

/// Configuration as written in the YAML file. Everything is optional and
/// falls back to the deployment defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
  pub component: Option<String>,
  pub project: Option<String>,
  pub owner: Option<String>,
  pub branches: Option<Vec<String>>,
  #[serde(rename = "default-job-type")]
  pub default_job_type: Option<String>,
  #[serde(rename = "platform-order")]
  pub platform_order: Option<PlatformOrder>,
  #[serde(rename = "render-timeout")]
  pub render_timeout: Option<String>,
  pub database: Option<UserDatabaseConfig>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct UserDatabaseConfig {
  pub url: Option<String>,
  #[serde(rename = "max-connections")]
  pub max_connections: Option<u32>,
  #[serde(rename = "acquire-timeout")]
  pub acquire_timeout: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
  pub url: Option<String>,
  pub max_connections: u32,
  pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
  fn default() -> Self {
    DatabaseConfig {
      url: None,
      max_connections: DEFAULT_MAX_CONNECTIONS,
      acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
    }
  }
}

impl DatabaseConfig {
  /// Takes the connection url from `DATABASE_URL` when it is set.
  pub fn apply_env(&mut self) {
    if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
      if !url.trim().is_empty() {
        self.url = Some(url);
      }
    }
  }

  pub fn url(&self) -> Result<&str> {
    self
      .url
      .as_deref()
      .ok_or_else(|| Error::config_error("database url is not set"))
  }
}

/// Immutable settings for one deployment, built once at startup and shared by
/// every render.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  pub component: String,
  pub project: String,
  pub owner: String,
  /// Tracked branch prefixes, in display order.
  pub branches: Vec<String>,
  pub default_job_type: JobType,
  pub platform_order: PlatformOrder,
  pub render_timeout: Duration,
  pub database: DatabaseConfig,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      component: DEFAULT_COMPONENT.to_string(),
      project: DEFAULT_PROJECT.to_string(),
      owner: DEFAULT_OWNER.to_string(),
      branches: DEFAULT_BRANCHES.iter().map(|b| b.to_string()).collect(),
      default_job_type: JobType::default(),
      platform_order: PlatformOrder::default(),
      render_timeout: DEFAULT_RENDER_TIMEOUT,
      database: DatabaseConfig::default(),
    }
  }
}

impl Config {
  pub fn builder() -> ConfigBuilder {
    ConfigBuilder::new()
  }

  pub fn from_yaml(yaml: &str) -> Result<Self> {
    let user_config: UserConfig = serde_yaml::from_str(yaml)
      .map_err(|e| Error::config_error(format!("Failed to parse config: {}", e)))?;

    Config::try_from(user_config)
  }

  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    log::debug!("Loading config from {}", path.display());

    let yaml = std::fs::read_to_string(path)?;
    Config::from_yaml(&yaml)
  }

  /// Resolves the job type for a request. Only a missing or empty value
  /// falls back to the configured default; anything else is used as given.
  pub fn job_type(&self, param: Option<&str>) -> JobType {
    match param {
      Some(value) if !value.is_empty() => JobType::new(value),
      _ => self.default_job_type.clone(),
    }
  }

  pub fn validate(&self) -> Result<()> {
    for (key, value) in [
      ("component", &self.component),
      ("project", &self.project),
      ("owner", &self.owner),
    ] {
      if value.trim().is_empty() {
        return Err(Error::config_error(format!("`{}` must not be empty", key)));
      }
    }

    if self.branches.is_empty() {
      return Err(Error::config_error("At least one branch must be tracked"));
    }

    let mut seen = HashSet::new();
    for branch in &self.branches {
      if branch.trim().is_empty() {
        return Err(Error::config_error("Branch names must not be empty"));
      }

      if !seen.insert(branch.as_str()) {
        return Err(Error::config_error(format!(
          "Branch `{}` is tracked more than once",
          branch
        )));
      }
    }

    if self.default_job_type.as_str().trim().is_empty() {
      return Err(Error::config_error("`default-job-type` must not be empty"));
    }

    if self.render_timeout.is_zero() {
      return Err(Error::config_error("`render-timeout` must be positive"));
    }

    if self.database.max_connections == 0 {
      return Err(Error::config_error(
        "`database.max-connections` must be positive",
      ));
    }

    Ok(())
  }
}

fn parse_duration(key: &str, value: &str) -> Result<Duration> {
  humantime::parse_duration(value.trim())
    .map_err(|e| Error::config_error(format!("Invalid `{}` {:?}: {}", key, value, e)))
}

impl TryFrom<UserConfig> for Config {
  type Error = Error;

  fn try_from(user_config: UserConfig) -> Result<Self> {
    let defaults = Config::default();

    let render_timeout = match user_config.render_timeout {
      Some(timeout) => parse_duration("render-timeout", &timeout)?,
      None => defaults.render_timeout,
    };

    let user_database = user_config.database.unwrap_or_default();
    let acquire_timeout = match user_database.acquire_timeout {
      Some(timeout) => parse_duration("database.acquire-timeout", &timeout)?,
      None => defaults.database.acquire_timeout,
    };

    let config = Config {
      component: user_config.component.unwrap_or(defaults.component),
      project: user_config.project.unwrap_or(defaults.project),
      owner: user_config.owner.unwrap_or(defaults.owner),
      branches: user_config.branches.unwrap_or(defaults.branches),
      default_job_type: user_config
        .default_job_type
        .map(JobType::new)
        .unwrap_or(defaults.default_job_type),
      platform_order: user_config.platform_order.unwrap_or(defaults.platform_order),
      render_timeout,
      database: DatabaseConfig {
        url: user_database.url,
        max_connections: user_database
          .max_connections
          .unwrap_or(defaults.database.max_connections),
        acquire_timeout,
      },
    };

    config.validate()?;

    Ok(config)
  }
}

pub struct ConfigBuilder {
  config: Config,
}

impl ConfigBuilder {
  pub fn new() -> Self {
    ConfigBuilder {
      config: Config::default(),
    }
  }

  pub fn component(mut self, component: impl Into<String>) -> Self {
    self.config.component = component.into();
    self
  }

  pub fn project(mut self, project: impl Into<String>) -> Self {
    self.config.project = project.into();
    self
  }

  pub fn owner(mut self, owner: impl Into<String>) -> Self {
    self.config.owner = owner.into();
    self
  }

  pub fn branches<I, S>(mut self, branches: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.config.branches = branches.into_iter().map(Into::into).collect();
    self
  }

  pub fn default_job_type(mut self, job_type: impl Into<String>) -> Self {
    self.config.default_job_type = JobType::new(job_type);
    self
  }

  pub fn platform_order(mut self, order: PlatformOrder) -> Self {
    self.config.platform_order = order;
    self
  }

  pub fn render_timeout(mut self, timeout: Duration) -> Self {
    self.config.render_timeout = timeout;
    self
  }

  pub fn database(mut self, database: DatabaseConfig) -> Self {
    self.config.database = database;
    self
  }

  pub fn build(self) -> Result<Config> {
    self.config.validate()?;

    Ok(self.config)
  }
}

impl Default for ConfigBuilder {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.component, "condor");
    assert_eq!(config.project, "condor");
    assert_eq!(config.owner, "cndrauto");
    assert_eq!(config.branches, vec!["trunk", "NMI Ports - trunk"]);
    assert_eq!(config.default_job_type, JobType::new("build"));
    assert_eq!(config.platform_order, PlatformOrder::Lexicographic);
    assert_eq!(config.render_timeout, Duration::from_secs(30));
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_from_yaml() {
    let yaml = r#"
owner: builder
branches:
  - trunk
  - V7_0-branch
default-job-type: test
platform-order: discovery
render-timeout: 5s
database:
  url: mysql://reader@localhost/nmi
  max-connections: 2
  acquire-timeout: 1m
"#;

    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.component, "condor");
    assert_eq!(config.owner, "builder");
    assert_eq!(config.branches, vec!["trunk", "V7_0-branch"]);
    assert_eq!(config.default_job_type, JobType::new("test"));
    assert_eq!(config.platform_order, PlatformOrder::Discovery);
    assert_eq!(config.render_timeout, Duration::from_secs(5));
    assert_eq!(config.database.url(), Ok("mysql://reader@localhost/nmi"));
    assert_eq!(config.database.max_connections, 2);
    assert_eq!(config.database.acquire_timeout, Duration::from_secs(60));
  }

  #[test]
  fn test_from_empty_yaml_uses_defaults() {
    let config = Config::from_yaml("{}").unwrap();
    assert_eq!(config, Config::default());
  }

  #[test]
  fn test_from_yaml_rejects_unknown_keys() {
    let err = Config::from_yaml("colour: red").unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
  }

  #[test]
  fn test_from_yaml_rejects_bad_duration() {
    let err = Config::from_yaml("render-timeout: soon").unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
  }

  #[test]
  fn test_validate_branches() {
    assert!(Config::builder()
      .branches(Vec::<String>::new())
      .build()
      .is_err());
    assert!(Config::builder().branches(["trunk", "trunk"]).build().is_err());
    assert!(Config::builder().branches(["trunk", " "]).build().is_err());
    assert!(Config::builder().branches(["trunk"]).build().is_ok());
  }

  #[test]
  fn test_validate_owner() {
    let err = Config::builder().owner("").build().unwrap_err();
    assert_eq!(err, Error::config_error("`owner` must not be empty"));
  }

  #[test]
  fn test_job_type_param() {
    let config = Config::builder().default_job_type("test").build().unwrap();
    assert_eq!(config.job_type(None), JobType::new("test"));
    assert_eq!(config.job_type(Some("")), JobType::new("test"));
    assert_eq!(config.job_type(Some("build")), JobType::new("build"));
    assert_eq!(config.job_type(Some(" build")), JobType::new(" build"));
  }

  #[test]
  fn test_database_url_missing() {
    let database = DatabaseConfig::default();
    assert!(database.url().is_err());
  }
}
