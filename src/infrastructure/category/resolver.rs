//! Category resolver - maps free-text labels onto canonical category ids

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, instrument};

use super::catalog_loader::CatalogLoader;
use crate::domain::category::{
    best_scored_entry, build_search_inputs, is_invalid_category_value, normalize_token,
};
use crate::domain::{CatalogSnapshot, CategoryId, CategoryRepository, DomainError, MatchKind};

/// Outcome of a successful resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryMatch {
    pub id: CategoryId,
    #[serde(flatten)]
    pub kind: MatchKind,
}

/// Resolves user-typed, suggested or imported category labels
///
/// Construct one per process and share it; it owns the catalog snapshot.
#[derive(Debug)]
pub struct CategoryResolver {
    loader: CatalogLoader,
}

impl CategoryResolver {
    pub fn new(repository: Arc<dyn CategoryRepository>, ttl: Duration) -> Self {
        Self::with_loader(CatalogLoader::new(repository, ttl))
    }

    pub fn with_loader(loader: CatalogLoader) -> Self {
        Self { loader }
    }

    /// Resolve a label to a category id
    pub async fn resolve_category_id(&self, raw_value: &str) -> Result<CategoryId, DomainError> {
        self.resolve(raw_value).await.map(|m| m.id)
    }

    /// Resolve a label, reporting how the category was chosen
    ///
    /// Two passes over the catalog in load order. The first returns the first
    /// entry holding any search input as a literal token, regardless of how
    /// well other entries would score. Only when nothing matches literally is
    /// every entry scored, and the highest positive score wins, earliest entry
    /// first on ties.
    #[instrument(skip(self))]
    pub async fn resolve(&self, raw_value: &str) -> Result<CategoryMatch, DomainError> {
        let normalized = normalize_token(raw_value);

        if normalized.is_empty() || is_invalid_category_value(&normalized) {
            debug!("Rejected empty or placeholder category label");
            return Err(DomainError::CategoryNameEmpty);
        }

        let inputs = build_search_inputs(&normalized);

        if inputs.is_empty() {
            return Err(DomainError::CategoryNameEmpty);
        }

        let snapshot = self.loader.load_categories().await?;

        if let Some(entry) = snapshot
            .entries()
            .iter()
            .find(|entry| entry.matches_any_exactly(&inputs))
        {
            debug!(category_id = %entry.id(), "Exact token match");
            return Ok(CategoryMatch {
                id: entry.id(),
                kind: MatchKind::Exact,
            });
        }

        match best_scored_entry(snapshot.entries(), &inputs) {
            Some((entry, kind)) => {
                debug!(category_id = %entry.id(), %kind, "Scored category match");
                Ok(CategoryMatch {
                    id: entry.id(),
                    kind,
                })
            }
            None => {
                debug!(?inputs, "No category matched");
                Err(DomainError::unknown_category(raw_value))
            }
        }
    }

    /// Force the next resolution to reload the catalog
    pub fn invalidate_category_cache(&self) {
        self.loader.invalidate();
    }

    /// Current catalog snapshot, loading it if needed
    pub async fn snapshot(&self) -> Result<Arc<CatalogSnapshot>, DomainError> {
        self.loader.load_categories().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::{score_tokens, MockCategoryRepository};
    use crate::domain::{CategoryRecord, InMemoryCategoryRepository, KeywordPayload};
    use crate::infrastructure::category::DEFAULT_CATALOG_TTL;

    fn resolver_for(records: Vec<CategoryRecord>) -> CategoryResolver {
        let repo = InMemoryCategoryRepository::new().with_records(records);
        CategoryResolver::new(Arc::new(repo), DEFAULT_CATALOG_TTL)
    }

    fn marketplace_catalog() -> Vec<CategoryRecord> {
        vec![
            CategoryRecord::new(1, "Shoes").with_keywords(KeywordPayload::list(["sneakers", "boots"])),
            CategoryRecord::new(2, "Bags"),
        ]
    }

    fn id(value: i64) -> CategoryId {
        CategoryId::new(value)
    }

    #[tokio::test]
    async fn test_end_to_end_marketplace_catalog() {
        let resolver = resolver_for(marketplace_catalog());

        assert_eq!(resolver.resolve_category_id("Men's Sneakers").await.unwrap(), id(1));
        assert_eq!(resolver.resolve_category_id("bag").await.unwrap(), id(2));

        let err = resolver.resolve_category_id("handbag").await.unwrap_err();
        assert!(matches!(err, DomainError::UnknownCategory { ref value } if value == "handbag"));
    }

    #[tokio::test]
    async fn test_scored_match_reports_score() {
        let resolver = resolver_for(marketplace_catalog());

        let result = resolver.resolve("bag").await.unwrap();
        assert_eq!(result.kind, MatchKind::Scored(4.0));

        let result = resolver.resolve("boots").await.unwrap();
        assert_eq!(result.kind, MatchKind::Exact);
    }

    #[tokio::test]
    async fn test_placeholders_are_rejected() {
        let resolver = resolver_for(marketplace_catalog());

        for label in ["", "   ", "Select", "select a category", "Choose one", "None", "--"] {
            let err = resolver.resolve_category_id(label).await.unwrap_err();
            assert!(
                matches!(err, DomainError::CategoryNameEmpty),
                "expected CategoryNameEmpty for {:?}",
                label
            );
        }
    }

    #[tokio::test]
    async fn test_placeholders_do_not_touch_the_catalog() {
        // no expectations: any fetch would panic
        let mock = MockCategoryRepository::new();
        let resolver = CategoryResolver::new(Arc::new(mock), DEFAULT_CATALOG_TTL);

        let err = resolver.resolve_category_id("Select").await.unwrap_err();
        assert!(matches!(err, DomainError::CategoryNameEmpty));
    }

    #[tokio::test]
    async fn test_unknown_input() {
        let resolver = resolver_for(marketplace_catalog());

        let err = resolver.resolve_category_id("zzqqxx123").await.unwrap_err();
        assert!(matches!(err, DomainError::UnknownCategory { ref value } if value == "zzqqxx123"));
    }

    #[tokio::test]
    async fn test_unknown_keeps_raw_value() {
        let resolver = resolver_for(marketplace_catalog());

        let err = resolver.resolve_category_id("  Zzqq XX! ").await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown category:   Zzqq XX! ");
    }

    #[tokio::test]
    async fn test_stop_words_do_not_change_outcome() {
        let resolver = resolver_for(vec![
            CategoryRecord::new(1, "Clothing").with_keywords(KeywordPayload::list(["mens wear"])),
            CategoryRecord::new(2, "Sneakers"),
        ]);

        let plain = resolver.resolve_category_id("Sneakers").await.unwrap();
        let qualified = resolver.resolve_category_id("Men's Sneakers").await.unwrap();
        let kids = resolver.resolve_category_id("Kids' Unisex Sneakers").await.unwrap();

        assert_eq!(plain, id(2));
        assert_eq!(qualified, plain);
        assert_eq!(kids, plain);
    }

    #[tokio::test]
    async fn test_plural_keyword_matches_singular_input() {
        let resolver = resolver_for(vec![
            CategoryRecord::new(4, "Outerwear").with_keywords(KeywordPayload::list(["jackets"])),
        ]);

        let result = resolver.resolve("jacket").await.unwrap();
        assert_eq!(result.id, id(4));
        assert_eq!(result.kind, MatchKind::Exact);
    }

    #[tokio::test]
    async fn test_exact_match_dominates_scoring() {
        let resolver = resolver_for(vec![
            CategoryRecord::new(1, "Baggage").with_keywords(KeywordPayload::list(["bagpacks"])),
            CategoryRecord::new(2, "Bag"),
        ]);

        let snapshot = resolver.snapshot().await.unwrap();
        let inputs = vec!["bag".to_string()];
        let partial = score_tokens(snapshot.entries()[0].tokens(), &inputs);
        assert!(partial.is_finite() && partial > 0.0);

        let result = resolver.resolve("bag").await.unwrap();
        assert_eq!(result.id, id(2));
        assert_eq!(result.kind, MatchKind::Exact);
    }

    #[tokio::test]
    async fn test_tie_break_prefers_earlier_entry() {
        let resolver = resolver_for(vec![
            CategoryRecord::new(20, "Bags"),
            CategoryRecord::new(10, "Bags"),
        ]);

        let result = resolver.resolve("bag").await.unwrap();
        assert_eq!(result.id, id(20));
        assert_eq!(result.kind, MatchKind::Scored(4.0));
    }

    #[tokio::test]
    async fn test_exact_pass_takes_first_entry_sharing_a_token() {
        let resolver = resolver_for(vec![
            CategoryRecord::new(7, "Vintage").with_keywords(KeywordPayload::list(["watches"])),
            CategoryRecord::new(3, "Watches"),
        ]);

        assert_eq!(resolver.resolve_category_id("watches").await.unwrap(), id(7));
    }

    #[tokio::test]
    async fn test_resolution_is_deterministic() {
        let resolver = resolver_for(vec![
            CategoryRecord::new(1, "Shoes").with_keywords(KeywordPayload::list(["sneakers", "boots"])),
            CategoryRecord::new(2, "Bags").with_slug("bags-and-purses"),
            CategoryRecord::new(3, "Home & Garden"),
        ]);

        for label in ["bag", "Garden tools", "booties", "zzqqxx123", "Select"] {
            let first = resolver.resolve(label).await.map_err(|e| e.to_string());
            let second = resolver.resolve(label).await.map_err(|e| e.to_string());
            assert_eq!(first, second, "label {:?}", label);
        }
    }

    #[tokio::test]
    async fn test_exact_pass_subsumes_infinite_scores() {
        let records = vec![
            CategoryRecord::new(1, "Shoes").with_keywords(KeywordPayload::list(["sneakers", "boots"])),
            CategoryRecord::new(2, "Bags").with_slug("bags-and-purses"),
            CategoryRecord::new(3, "Home & Garden")
                .with_keywords(KeywordPayload::list(["garden tools", "patio furniture"])),
        ];
        let resolver = resolver_for(records);
        let snapshot = resolver.snapshot().await.unwrap();

        for label in ["bag", "purse", "garden", "tools", "furnitures", "booties", "hat"] {
            let inputs = build_search_inputs(&normalize_token(label));
            let exact = snapshot
                .entries()
                .iter()
                .any(|e| e.matches_any_exactly(&inputs));

            if !exact {
                for entry in snapshot.entries() {
                    assert!(score_tokens(entry.tokens(), &inputs).is_finite());
                }
            }
        }
    }

    #[tokio::test]
    async fn test_slug_tokens_are_matched() {
        let resolver = resolver_for(vec![
            CategoryRecord::new(1, "Bags").with_slug("bags-and-purses"),
            CategoryRecord::new(2, "Jewelry"),
        ]);

        // "purses" is a part of the multi-word slug token
        assert_eq!(resolver.resolve_category_id("purses").await.unwrap(), id(1));
    }

    #[tokio::test]
    async fn test_call_within_ttl_does_not_reload() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_list_active()
            .times(1)
            .returning(|| Ok(marketplace_catalog()));

        let resolver = CategoryResolver::new(Arc::new(mock), DEFAULT_CATALOG_TTL);

        resolver.resolve_category_id("sneakers").await.unwrap();
        resolver.resolve_category_id("bag").await.unwrap();
        resolver.resolve_category_id("zzqqxx123").await.unwrap_err();
    }

    #[tokio::test]
    async fn test_call_after_invalidation_reloads() {
        let repo = Arc::new(InMemoryCategoryRepository::new().with_records(marketplace_catalog()));
        let resolver = CategoryResolver::new(repo.clone(), DEFAULT_CATALOG_TTL);

        assert!(resolver.resolve_category_id("hats").await.is_err());

        repo.replace(vec![CategoryRecord::new(5, "Hats")]);

        // still served from the snapshot
        assert!(resolver.resolve_category_id("hats").await.is_err());

        resolver.invalidate_category_cache();
        assert_eq!(resolver.resolve_category_id("hats").await.unwrap(), id(5));
    }

    #[tokio::test]
    async fn test_invalidation_counts_fetches() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_list_active()
            .times(2)
            .returning(|| Ok(marketplace_catalog()));

        let resolver = CategoryResolver::new(Arc::new(mock), DEFAULT_CATALOG_TTL);

        resolver.resolve_category_id("sneakers").await.unwrap();
        resolver.invalidate_category_cache();
        resolver.resolve_category_id("sneakers").await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_list_active()
            .times(1)
            .returning(|| Err(DomainError::storage("connection refused")));

        let resolver = CategoryResolver::new(Arc::new(mock), DEFAULT_CATALOG_TTL);

        let err = resolver.resolve_category_id("shoes").await.unwrap_err();
        assert!(matches!(err, DomainError::Storage { .. }));
        assert!(!err.is_resolution_failure());
    }

    #[tokio::test]
    async fn test_entry_without_tokens_never_matches() {
        let resolver = resolver_for(vec![
            CategoryRecord::new(1, "???"),
            CategoryRecord::new(2, "Toys"),
        ]);

        let snapshot = resolver.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.entries()[0].tokens().is_empty());

        assert_eq!(resolver.resolve_category_id("toy").await.unwrap(), id(2));
    }

    #[tokio::test]
    async fn test_concurrent_resolution_shares_resolver() {
        let resolver = Arc::new(resolver_for(marketplace_catalog()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                tokio::spawn(async move { resolver.resolve_category_id("boots").await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), id(1));
        }
    }

    #[tokio::test]
    async fn test_oversized_ttl_still_resolves() {
        let repo = InMemoryCategoryRepository::new().with_records(marketplace_catalog());
        let resolver = CategoryResolver::new(Arc::new(repo), Duration::from_secs(u64::MAX / 4));

        assert_eq!(resolver.resolve_category_id("boots").await.unwrap(), id(1));
    }
}
