//! Category entity and catalog snapshot types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::normalize::{naive_singular, normalize_token};

/// Opaque identifier of a canonical category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(i64);

impl CategoryId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for CategoryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Auxiliary keyword list as the catalog store happens to hold it
///
/// Stores have kept keywords as a bare string, as an array, or not at all.
/// Arrays may contain non-string junk, which is dropped on extraction.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum KeywordPayload {
    #[default]
    Absent,
    Single(String),
    Many(Vec<serde_json::Value>),
}

impl KeywordPayload {
    /// Build a payload from a list of plain strings
    pub fn list<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Many(
            keywords
                .into_iter()
                .map(|k| serde_json::Value::String(k.into()))
                .collect(),
        )
    }

    /// Flatten into a sequence of strings, keeping only string elements
    pub fn extract_keywords(&self) -> Vec<String> {
        match self {
            Self::Absent => Vec::new(),
            Self::Single(keyword) => vec![keyword.clone()],
            Self::Many(values) => values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        }
    }
}

impl From<serde_json::Value> for KeywordPayload {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::Single(s),
            serde_json::Value::Array(values) => Self::Many(values),
            _ => Self::Absent,
        }
    }
}

impl From<Option<serde_json::Value>> for KeywordPayload {
    fn from(value: Option<serde_json::Value>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

fn default_active() -> bool {
    true
}

/// A category as read from the catalog store
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub keywords: KeywordPayload,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl CategoryRecord {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: None,
            keywords: KeywordPayload::Absent,
            active: true,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_keywords(mut self, keywords: KeywordPayload) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

/// A category prepared for matching, immutable for one cache generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryEntry {
    id: CategoryId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    slug: Option<String>,
    tokens: Vec<String>,
}

impl CategoryEntry {
    /// Derive the matching token set for a catalog record
    ///
    /// Tokens come from the name, the slug and every keyword. Keywords longer
    /// than three characters ending in `s` also contribute their singular form.
    /// Multi-word tokens then contribute each word longer than two characters.
    pub fn from_record(record: &CategoryRecord) -> Self {
        let mut tokens = TokenSet::default();

        tokens.insert(normalize_token(&record.name));

        if let Some(slug) = record.slug.as_deref() {
            tokens.insert(normalize_token(slug));
        }

        for keyword in record.keywords.extract_keywords() {
            let normalized = normalize_token(&keyword);
            let singular = naive_singular(&normalized).map(str::to_string);

            tokens.insert(normalized);

            if let Some(singular) = singular {
                tokens.insert(singular);
            }
        }

        let phrases: Vec<String> = tokens
            .iter()
            .filter(|t| t.contains(' '))
            .cloned()
            .collect();

        for phrase in phrases {
            for part in phrase.split(' ').filter(|p| p.len() > 2) {
                tokens.insert(part.to_string());
            }
        }

        Self {
            id: record.id,
            name: record.name.clone(),
            slug: record.slug.clone(),
            tokens: tokens.into_inner(),
        }
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    /// Tokens in derivation order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn has_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Whether any of the inputs is literally one of this entry's tokens
    pub fn matches_any_exactly(&self, inputs: &[String]) -> bool {
        inputs.iter().any(|input| self.has_token(input))
    }
}

/// Insertion-ordered set of non-empty tokens
#[derive(Debug, Default)]
struct TokenSet(Vec<String>);

impl TokenSet {
    fn insert(&mut self, token: String) {
        if !token.is_empty() && !self.0.contains(&token) {
            self.0.push(token);
        }
    }

    fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// One generation of the loaded catalog
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    entries: Vec<CategoryEntry>,
    loaded_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn new(entries: Vec<CategoryEntry>, ttl: Duration) -> Self {
        let loaded_at = Utc::now();

        Self {
            entries,
            loaded_at,
            expires_at: loaded_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Entries in load order
    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// A snapshot may be reused only while it is non-empty and unexpired
    pub fn is_reusable(&self) -> bool {
        !self.is_empty() && !self.is_expired()
    }
}
