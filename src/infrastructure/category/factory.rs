//! Catalog repository factory for runtime source selection

use std::sync::Arc;

use tracing::info;

use super::file_repository::FileCategoryRepository;
use super::postgres_repository::{PostgresCategoryRepository, PostgresConfig};
use crate::config::{CatalogConfig, CatalogSource};
use crate::domain::{CategoryRepository, DomainError};

/// Factory for creating catalog repositories
#[derive(Debug)]
pub struct CategoryRepositoryFactory;

impl CategoryRepositoryFactory {
    /// Creates the repository selected by the configuration
    pub async fn create(config: &CatalogConfig) -> Result<Arc<dyn CategoryRepository>, DomainError> {
        match config.source {
            CatalogSource::File => {
                let repository = FileCategoryRepository::new(&config.path);
                info!(path = %repository.path().display(), "Using file category catalog");
                Ok(Arc::new(repository))
            }
            CatalogSource::Postgres => {
                let pg_config = Self::postgres_config(config)?;
                info!("Using PostgreSQL category catalog");
                let repository = PostgresCategoryRepository::connect(&pg_config).await?;
                Ok(Arc::new(repository))
            }
        }
    }

    fn postgres_config(config: &CatalogConfig) -> Result<PostgresConfig, DomainError> {
        let url = config.database_url.as_deref().ok_or_else(|| {
            DomainError::configuration("catalog.database_url is required for the postgres source")
        })?;

        Ok(PostgresConfig::new(url)
            .with_max_connections(config.max_connections)
            .with_connect_timeout(config.connect_timeout_secs))
    }
}
