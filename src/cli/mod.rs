//! CLI module for the category resolver
//!
//! Provides operator subcommands over the resolution engine:
//! - `resolve`: resolve labels against the configured catalog
//! - `tokens`: dump the catalog entries and their match tokens
//! - `normalize`: show how a label is normalized and expanded

pub mod normalize;
pub mod resolve;
pub mod tokens;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use config::ConfigError;
use tracing::warn;

use crate::config::{AppConfig, CatalogSource};
use crate::infrastructure::logging;

/// Category resolver - maps free-text labels onto canonical categories
#[derive(Parser)]
#[command(name = "category-resolver")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve one or more labels to category ids
    Resolve(resolve::ResolveArgs),

    /// List catalog entries with their match tokens
    Tokens,

    /// Show normalization and search inputs for a label
    Normalize(normalize::NormalizeArgs),
}

/// Catalog selection shared by all commands
#[derive(Args, Clone, Default)]
pub struct CatalogArgs {
    /// Read the catalog from this JSON file (overrides config)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

/// Load configuration, apply CLI overrides and start logging
pub(crate) fn bootstrap(args: &CatalogArgs) -> AppConfig {
    dotenvy::dotenv().ok();

    let (mut config, load_error) = config_or_default(AppConfig::load());

    if let Some(path) = &args.catalog {
        config.catalog.source = CatalogSource::File;
        config.catalog.path = path.clone();
    }

    logging::init_logging(&config.logging);

    // reported once the subscriber exists
    if let Some(e) = load_error {
        warn!(error = %e, "Invalid configuration, falling back to defaults");
    }

    config
}

/// Fall back to the default configuration, keeping the load error for logging
fn config_or_default(loaded: Result<AppConfig, ConfigError>) -> (AppConfig, Option<ConfigError>) {
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    }
}
