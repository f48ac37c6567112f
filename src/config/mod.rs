//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CatalogConfig, CatalogSource, LogFormat, LoggingConfig, ResolverConfig,
    MAX_CACHE_TTL_SECS,
};
