//! Domain layer - Core business logic and entities

pub mod category;
pub mod error;

pub use category::{
    CatalogSnapshot, CategoryEntry, CategoryId, CategoryRecord, CategoryRepository,
    InMemoryCategoryRepository, KeywordPayload, MatchKind,
};
pub use error::DomainError;
