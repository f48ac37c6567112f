//! Category infrastructure - catalog loading, resolution and catalog stores

mod catalog_loader;
mod factory;
mod file_repository;
mod postgres_repository;
mod resolver;

pub use catalog_loader::{CatalogLoader, DEFAULT_CATALOG_TTL};
pub use factory::CategoryRepositoryFactory;
pub use file_repository::FileCategoryRepository;
pub use postgres_repository::{PostgresCategoryRepository, PostgresConfig};
pub use resolver::{CategoryMatch, CategoryResolver};
