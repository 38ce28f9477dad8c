//! # In-Memory Customer Repository
//!
//! In-memory implementation of [`CustomerRepository`] for testing.

use crate::domain::value_objects::CustomerId;
use crate::infrastructure::persistence::traits::{CustomerRepository, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory set of known customer IDs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRepository {
    known: Arc<RwLock<HashSet<CustomerId>>>,
}

impl InMemoryCustomerRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that knows the given customers.
    #[must_use]
    pub fn with_customers(ids: impl IntoIterator<Item = CustomerId>) -> Self {
        Self {
            known: Arc::new(RwLock::new(ids.into_iter().collect())),
        }
    }

    /// Registers a customer.
    pub async fn register(&self, id: CustomerId) {
        self.known.write().await.insert(id);
    }

    /// Forgets a customer. Returns true if it was known.
    pub async fn remove(&self, id: &CustomerId) -> bool {
        self.known.write().await.remove(id)
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn exists(&self, id: &CustomerId) -> RepositoryResult<bool> {
        Ok(self.known.read().await.contains(id))
    }
}
