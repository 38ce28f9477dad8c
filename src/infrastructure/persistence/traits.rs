//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! The quote aggregate is loaded and saved only through these traits; use
//! cases never see the storage technology behind them.
//!
//! # Available Repositories
//!
//! - [`QuoteRepository`]: Persistence for quote aggregates
//! - [`CustomerRepository`]: Existence check for customer references
//!
//! # Examples
//!
//! ```ignore
//! use oficina_quotes::infrastructure::persistence::traits::QuoteRepository;
//!
//! async fn drafts(repo: &impl QuoteRepository) {
//!     let drafts = repo.find_by_status(QuoteStatus::Draft).await.unwrap();
//!     println!("{} drafts", drafts.len());
//! }
//! ```

use crate::domain::entities::Quote;
use crate::domain::value_objects::{CustomerId, QuoteId, QuoteStatus};
use crate::infrastructure::persistence::query::{PaginatedResult, PaginationParams, QuoteFilters};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Optimistic locking conflict: the stored quote is newer than the
    /// one being saved.
    #[error("Version conflict: {entity_type} with id {id} is at version {actual}, expected {expected}")]
    VersionConflict {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
        /// Version being saved.
        expected: u32,
        /// Version in storage.
        actual: u32,
    },

    /// Stored data could not be converted to or from the domain.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    /// Creates a version conflict error.
    #[must_use]
    pub fn version_conflict(
        entity_type: &'static str,
        id: impl Into<String>,
        expected: u32,
        actual: u32,
    ) -> Self {
        Self::VersionConflict {
            entity_type,
            id: id.into(),
            expected,
            actual,
        }
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Returns true if this is a version conflict error.
    #[must_use]
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for quote aggregates.
///
/// Implementations must rebuild aggregates through
/// [`Quote::restore`](crate::domain::entities::Quote::restore) so totals
/// are recomputed on every load.
///
/// Paginated operations order by `created_at` descending.
#[async_trait]
pub trait QuoteRepository: Send + Sync + fmt::Debug {
    /// Saves a quote, inserting or replacing it.
    ///
    /// Returns `RepositoryError::VersionConflict` if the stored quote has a
    /// higher version than `quote`.
    async fn save(&self, quote: &Quote) -> RepositoryResult<()>;

    /// Gets a quote by ID.
    ///
    /// Returns `None` if the quote does not exist.
    async fn find_by_id(&self, id: &QuoteId) -> RepositoryResult<Option<Quote>>;

    /// Finds all quotes for a customer.
    async fn find_by_customer_id(&self, customer_id: &CustomerId)
    -> RepositoryResult<Vec<Quote>>;

    /// Finds all quotes in a status.
    async fn find_by_status(&self, status: QuoteStatus) -> RepositoryResult<Vec<Quote>>;

    /// Lists quotes matching `filters`, one page at a time.
    async fn find_all(
        &self,
        params: PaginationParams,
        filters: &QuoteFilters,
    ) -> RepositoryResult<PaginatedResult<Quote>>;

    /// Finds the revisions cloned from `parent_id`, ordered by version.
    async fn find_versions(&self, parent_id: &QuoteId) -> RepositoryResult<Vec<Quote>>;

    /// Searches quotes by free text.
    ///
    /// Matches the quote id, customer id and item descriptions
    /// case-insensitively; a query naming a status also matches quotes
    /// in that status.
    async fn search(
        &self,
        query: &str,
        params: PaginationParams,
        filters: &QuoteFilters,
    ) -> RepositoryResult<PaginatedResult<Quote>>;

    /// Deletes a quote by ID.
    ///
    /// Returns `Ok(true)` if the quote was deleted, `Ok(false)` if it didn't exist.
    async fn delete(&self, id: &QuoteId) -> RepositoryResult<bool>;

    /// Returns true if a quote with this ID exists.
    async fn exists(&self, id: &QuoteId) -> RepositoryResult<bool>;

    /// Counts all quotes.
    async fn count(&self) -> RepositoryResult<u64>;
}

/// Lookup into the customer context.
///
/// The quote core only needs to know whether a referenced customer exists.
#[async_trait]
pub trait CustomerRepository: Send + Sync + fmt::Debug {
    /// Returns true if the customer exists.
    async fn exists(&self, id: &CustomerId) -> RepositoryResult<bool>;
}
