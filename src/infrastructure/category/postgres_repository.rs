//! PostgreSQL category repository implementation

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::{CategoryId, CategoryRecord, CategoryRepository, DomainError, KeywordPayload};

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/marketplace".to_string(),
            max_connections: 5,
            connect_timeout_secs: 30,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }
}

const LIST_ACTIVE_QUERY: &str = r#"
    SELECT id, name, slug, keywords
    FROM categories
    WHERE active = true
    ORDER BY id
"#;

/// PostgreSQL implementation of CategoryRepository
///
/// `keywords` is a JSONB column holding a string, an array or NULL.
#[derive(Debug, Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a new pool and wrap it
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list_active(&self) -> Result<Vec<CategoryRecord>, DomainError> {
        let rows = sqlx::query(LIST_ACTIVE_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list categories: {}", e)))?;

        rows.iter().map(row_to_record).collect()
    }
}

fn row_to_record(row: &PgRow) -> Result<CategoryRecord, DomainError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| DomainError::storage(format!("Invalid category id: {}", e)))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| DomainError::storage(format!("Invalid category name: {}", e)))?;
    let slug: Option<String> = row
        .try_get("slug")
        .map_err(|e| DomainError::storage(format!("Invalid category slug: {}", e)))?;
    let keywords: Option<serde_json::Value> = row
        .try_get("keywords")
        .map_err(|e| DomainError::storage(format!("Invalid category keywords: {}", e)))?;

    Ok(CategoryRecord {
        id: CategoryId::new(id),
        name,
        slug,
        keywords: KeywordPayload::from(keywords),
        active: true,
    })
}
