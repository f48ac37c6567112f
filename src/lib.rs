//! Category resolver
//!
//! Resolves free-text category labels (user-typed, suggested or imported)
//! onto exactly one canonical category of a configurable catalog:
//! - Token derivation from category names, slugs and keywords
//! - Stop-word aware search input expansion
//! - Exact-token matching with a partial-match scoring fallback
//! - A TTL snapshot of the catalog with explicit invalidation

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use self::config::AppConfig;
pub use domain::{CategoryId, DomainError};
pub use infrastructure::category::{CategoryMatch, CategoryResolver};

use infrastructure::category::CategoryRepositoryFactory;

/// Build a resolver over the catalog source named in the configuration
pub async fn create_resolver(config: &AppConfig) -> Result<CategoryResolver, DomainError> {
    let ttl = config.resolver.validated_cache_ttl()?;
    let repository = CategoryRepositoryFactory::create(&config.catalog).await?;

    Ok(CategoryResolver::new(repository, ttl))
}
