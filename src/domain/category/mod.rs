//! Category domain - catalog records, token derivation and match scoring

mod entity;
mod normalize;
mod repository;
mod scoring;

pub use entity::{CatalogSnapshot, CategoryEntry, CategoryId, CategoryRecord, KeywordPayload};
pub use normalize::{
    build_search_inputs, is_invalid_category_value, is_stop_word, naive_singular,
    normalize_token, strip_category_modifiers,
};
pub use repository::{in_memory::InMemoryCategoryRepository, CategoryRepository};
pub use scoring::{best_scored_entry, score_tokens, MatchKind};

#[cfg(test)]
pub use repository::MockCategoryRepository;
