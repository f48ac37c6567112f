use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::DomainError;

/// Longest snapshot lifetime accepted (100 years, well inside the cache limit)
pub const MAX_CACHE_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where the category catalog is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    #[default]
    File,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub source: CatalogSource,
    /// JSON catalog used by the file source
    pub path: PathBuf,
    /// Connection URL used by the postgres source
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Lifetime of a loaded catalog snapshot
    pub cache_ttl_secs: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: CatalogSource::default(),
            path: PathBuf::from("categories.json"),
            database_url: None,
            max_connections: 5,
            connect_timeout_secs: 30,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { cache_ttl_secs: 300 }
    }
}

impl ResolverConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Snapshot lifetime, rejecting zero and values the cache cannot hold
    pub fn validated_cache_ttl(&self) -> Result<Duration, DomainError> {
        match self.cache_ttl_secs {
            0 => Err(DomainError::configuration(
                "resolver.cache_ttl_secs must be greater than zero",
            )),
            secs if secs > MAX_CACHE_TTL_SECS => Err(DomainError::configuration(format!(
                "resolver.cache_ttl_secs must be at most {} (got {})",
                MAX_CACHE_TTL_SECS, secs
            ))),
            secs => Ok(Duration::from_secs(secs)),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
