//! Category catalog repository trait

use async_trait::async_trait;

use super::CategoryRecord;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Read access to the category catalog store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Fetch all active categories, in store order
    async fn list_active(&self) -> Result<Vec<CategoryRecord>, DomainError>;
}

/// In-memory implementation of CategoryRepository
pub mod in_memory {
    use super::*;
    use std::sync::Mutex;

    /// In-memory catalog for testing and development
    #[derive(Debug, Default)]
    pub struct InMemoryCategoryRepository {
        records: Mutex<Vec<CategoryRecord>>,
    }

    impl InMemoryCategoryRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_record(self, record: CategoryRecord) -> Self {
            self.records.lock().unwrap().push(record);
            self
        }

        pub fn with_records(self, records: Vec<CategoryRecord>) -> Self {
            self.records.lock().unwrap().extend(records);
            self
        }

        /// Replace the whole catalog, as an admin edit would
        pub fn replace(&self, records: Vec<CategoryRecord>) {
            *self.records.lock().unwrap() = records;
        }
    }

    #[async_trait]
    impl CategoryRepository for InMemoryCategoryRepository {
        async fn list_active(&self) -> Result<Vec<CategoryRecord>, DomainError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.active)
                .cloned()
                .collect())
        }
    }
}
