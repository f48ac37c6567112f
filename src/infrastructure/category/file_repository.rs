//! JSON file category repository

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::{CategoryRecord, CategoryRepository, DomainError};

/// Reads the catalog from a JSON array of category records
///
/// The file is read on every fetch, so edits show up on the next reload.
#[derive(Debug, Clone)]
pub struct FileCategoryRepository {
    path: PathBuf,
}

impl FileCategoryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CategoryRepository for FileCategoryRepository {
    async fn list_active(&self) -> Result<Vec<CategoryRecord>, DomainError> {
        let data = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to read catalog file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let records: Vec<CategoryRecord> = serde_json::from_str(&data).map_err(|e| {
            DomainError::validation(format!(
                "Invalid catalog file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(records.into_iter().filter(|r| r.active).collect())
    }
}
