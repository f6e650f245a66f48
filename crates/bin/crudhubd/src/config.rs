//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `crudhub.toml` in the working directory unless another path is
//! given. Every field has a sensible default so the file is optional.
//! Environment variables take precedence over file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crudhub_adapter_cache_moka::MokaCacheConfig;
use serde::Deserialize;

/// Config file read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "crudhub.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Result cache settings of generated services.
    pub cache: CacheConfig,
    /// Fixture loaded at startup.
    pub seed: SeedConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Cache configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached results per service.
    pub capacity: u64,
    /// Seconds a cached result stays valid; forever when absent.
    pub ttl_secs: Option<u64>,
    /// Names of the entity types whose generated services are cached.
    pub entities: Vec<String>,
}

/// Startup fixture configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// JSON fixture file.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `path` (or `crudhub.toml`, if present) then
    /// apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if an
    /// override or the resulting configuration is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_optional_file(Path::new(DEFAULT_CONFIG_PATH))?,
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(ConfigError::Parse)
    }

    fn from_optional_file(path: &Path) -> Result<Self, ConfigError> {
        match Self::from_file(path) {
            Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    fn apply_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("CRUDHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("CRUDHUB_SEED") {
            self.seed.path = Some(PathBuf::from(val));
        }
        if let Some(val) = var("CRUDHUB_CACHE_CAPACITY") {
            self.cache.capacity = parse_number("CRUDHUB_CACHE_CAPACITY", &val)?;
        }
        if let Some(val) = var("CRUDHUB_CACHE_TTL_SECS") {
            self.cache.ttl_secs = Some(parse_number("CRUDHUB_CACHE_TTL_SECS", &val)?);
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.capacity == 0 {
            return Err(ConfigError::Validation(
                "cache capacity must be non-zero".to_string(),
            ));
        }
        if self.cache.ttl_secs == Some(0) {
            return Err(ConfigError::Validation(
                "cache ttl_secs must be non-zero when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Sizing of every cache created for a generated service.
    #[must_use]
    pub fn moka_config(&self) -> MokaCacheConfig {
        MokaCacheConfig {
            capacity: self.cache.capacity,
            time_to_live: self.cache.ttl_secs.map(Duration::from_secs),
        }
    }
}

fn parse_number(name: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Validation(format!("{name} must be a number, got {value:?}")))
}

impl CacheConfig {
    /// Whether generated services of `entity` get a cache.
    #[must_use]
    pub fn caches(&self, entity: &str) -> bool {
        self.entities
            .iter()
            .any(|name| name.eq_ignore_ascii_case(entity))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "crudhubd=info,crudhub_app=info".to_string(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            ttl_secs: None,
            entities: vec!["Customer".to_string()],
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
