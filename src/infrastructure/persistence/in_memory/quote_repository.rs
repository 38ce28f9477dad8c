//! # In-Memory Quote Repository
//!
//! In-memory implementation of [`QuoteRepository`].
//!
//! Quotes are stored as [`QuoteRecord`]s, never as live aggregates, so
//! every read goes through `Quote::restore` exactly as a database-backed
//! adapter would.

use crate::domain::entities::Quote;
use crate::domain::value_objects::{CustomerId, QuoteId, QuoteStatus};
use crate::infrastructure::persistence::query::{
    PaginatedResult, PaginationParams, QuoteFilters, paginate,
};
use crate::infrastructure::persistence::record::QuoteRecord;
use crate::infrastructure::persistence::traits::{
    QuoteRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory implementation of [`QuoteRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryQuoteRepository {
    storage: Arc<RwLock<HashMap<QuoteId, QuoteRecord>>>,
}

impl InMemoryQuoteRepository {
    /// Creates a new empty in-memory quote repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of quotes in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all quotes from the repository.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.clear();
    }

    /// Inserts a raw record, bypassing the aggregate.
    ///
    /// Useful for seeding data that was written by another process.
    pub async fn insert_record(&self, record: QuoteRecord) {
        let mut storage = self.storage.write().await;
        storage.insert(record.id, record);
    }

    /// Restores every stored quote accepted by `keep`.
    async fn load_where(&self, keep: impl Fn(&Quote) -> bool) -> RepositoryResult<Vec<Quote>> {
        let storage = self.storage.read().await;
        let mut quotes = Vec::new();
        for record in storage.values() {
            let quote = record.clone().into_domain()?;
            if keep(&quote) {
                quotes.push(quote);
            }
        }
        Ok(quotes)
    }

    fn newest_first(mut quotes: Vec<Quote>) -> Vec<Quote> {
        quotes.sort_by_key(|q| Reverse(q.created_at()));
        quotes
    }
}

impl Default for InMemoryQuoteRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true if `quote` matches the free-text `query`.
///
/// `query` must already be trimmed and lowercased; `status` is the status
/// the query names, if any.
fn matches_search(quote: &Quote, query: &str, status: Option<QuoteStatus>) -> bool {
    quote.id().to_string().to_lowercase().contains(query)
        || quote.customer_id().as_str().to_lowercase().contains(query)
        || status.is_some_and(|s| quote.status() == s)
        || quote.items().iter().any(|item| {
            item.description()
                .is_some_and(|d| d.to_lowercase().contains(query))
        })
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn save(&self, quote: &Quote) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        if let Some(stored) = storage.get(&quote.id())
            && stored.version > quote.version()
        {
            return Err(RepositoryError::version_conflict(
                "Quote",
                quote.id().to_string(),
                quote.version(),
                stored.version,
            ));
        }
        storage.insert(quote.id(), QuoteRecord::from(quote));
        debug!(quote_id = %quote.id(), version = quote.version(), "quote saved");
        Ok(())
    }

    async fn find_by_id(&self, id: &QuoteId) -> RepositoryResult<Option<Quote>> {
        let storage = self.storage.read().await;
        storage
            .get(id)
            .cloned()
            .map(QuoteRecord::into_domain)
            .transpose()
    }

    async fn find_by_customer_id(
        &self,
        customer_id: &CustomerId,
    ) -> RepositoryResult<Vec<Quote>> {
        let quotes = self.load_where(|q| q.customer_id() == customer_id).await?;
        Ok(Self::newest_first(quotes))
    }

    async fn find_by_status(&self, status: QuoteStatus) -> RepositoryResult<Vec<Quote>> {
        let quotes = self.load_where(|q| q.status() == status).await?;
        Ok(Self::newest_first(quotes))
    }

    async fn find_all(
        &self,
        params: PaginationParams,
        filters: &QuoteFilters,
    ) -> RepositoryResult<PaginatedResult<Quote>> {
        let quotes = self.load_where(|q| filters.matches(q)).await?;
        Ok(paginate(Self::newest_first(quotes), params))
    }

    async fn find_versions(&self, parent_id: &QuoteId) -> RepositoryResult<Vec<Quote>> {
        let mut quotes = self
            .load_where(|q| q.parent_id() == Some(*parent_id))
            .await?;
        quotes.sort_by_key(Quote::version);
        Ok(quotes)
    }

    async fn search(
        &self,
        query: &str,
        params: PaginationParams,
        filters: &QuoteFilters,
    ) -> RepositoryResult<PaginatedResult<Quote>> {
        let needle = query.trim().to_lowercase();
        let status = needle.parse::<QuoteStatus>().ok();
        debug!(query = %needle, ?status, "searching quotes");

        let quotes = self
            .load_where(|q| filters.matches(q) && matches_search(q, &needle, status))
            .await?;
        Ok(paginate(Self::newest_first(quotes), params))
    }

    async fn delete(&self, id: &QuoteId) -> RepositoryResult<bool> {
        let mut storage = self.storage.write().await;
        Ok(storage.remove(id).is_some())
    }

    async fn exists(&self, id: &QuoteId) -> RepositoryResult<bool> {
        let storage = self.storage.read().await;
        Ok(storage.contains_key(id))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.len() as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::QuoteItem;
    use crate::domain::value_objects::{Money, QuoteItemType, Timestamp};

    const FEB_6: i64 = 1_770_372_000;
    const DAY: i64 = 86_400;

    fn item(cents: i64, description: Option<&str>) -> QuoteItem {
        QuoteItem::create(
            Money::from_cents(cents),
            1,
            QuoteItemType::Part,
            description.map(str::to_owned),
        )
        .unwrap()
    }

    /// A quote created `days` days after Feb 6 2026.
    fn quote_on(days: i64, customer: &str, status: QuoteStatus, items: Vec<QuoteItem>) -> Quote {
        let created = Timestamp::from_secs(FEB_6 + days * DAY).unwrap();
        Quote::restore(
            QuoteId::new_v4(),
            CustomerId::new(customer),
            None,
            status,
            1,
            items,
            None,
            created,
            created,
        )
        .unwrap()
    }

    mod crud {
        use super::*;

        #[tokio::test]
        async fn new_repository_is_empty() {
            let repo = InMemoryQuoteRepository::new();
            assert!(repo.is_empty());
            assert_eq!(repo.count().await.unwrap(), 0);
        }

        #[tokio::test]
        async fn save_and_find() {
            let repo = InMemoryQuoteRepository::new();
            let quote = quote_on(0, "ana", QuoteStatus::Draft, vec![item(100, None)]);

            repo.save(&quote).await.unwrap();

            assert_eq!(repo.len(), 1);
            assert!(repo.exists(&quote.id()).await.unwrap());
            assert_eq!(repo.find_by_id(&quote.id()).await.unwrap(), Some(quote));
        }

        #[tokio::test]
        async fn save_replaces_existing() {
            let repo = InMemoryQuoteRepository::new();
            let mut quote = quote_on(0, "ana", QuoteStatus::Draft, vec![item(100, None)]);
            repo.save(&quote).await.unwrap();

            quote.submit().unwrap();
            repo.save(&quote).await.unwrap();

            let stored = repo.find_by_id(&quote.id()).await.unwrap().unwrap();
            assert_eq!(stored.status(), QuoteStatus::Submitted);
            assert_eq!(stored.version(), 2);
            assert_eq!(repo.count().await.unwrap(), 1);
        }

        #[tokio::test]
        async fn stale_copy_cannot_overwrite_newer_version() {
            let repo = InMemoryQuoteRepository::new();
            let quote = quote_on(0, "ana", QuoteStatus::Draft, vec![item(100, None)]);
            repo.save(&quote).await.unwrap();

            let mut submitted = quote.clone();
            submitted.submit().unwrap();
            repo.save(&submitted).await.unwrap();

            let mut stale = quote;
            stale.add_item(item(50, None)).unwrap();
            let err = repo.save(&stale).await.unwrap_err();

            assert!(matches!(
                err,
                RepositoryError::VersionConflict { expected: 1, actual: 2, .. }
            ));
            let stored = repo.find_by_id(&stale.id()).await.unwrap().unwrap();
            assert_eq!(stored, submitted);
        }

        #[tokio::test]
        async fn find_missing_returns_none() {
            let repo = InMemoryQuoteRepository::new();
            assert!(repo.find_by_id(&QuoteId::new_v4()).await.unwrap().is_none());
            assert!(!repo.exists(&QuoteId::new_v4()).await.unwrap());
        }

        #[tokio::test]
        async fn delete() {
            let repo = InMemoryQuoteRepository::new();
            let quote = quote_on(0, "ana", QuoteStatus::Draft, vec![]);
            repo.save(&quote).await.unwrap();

            assert!(repo.delete(&quote.id()).await.unwrap());
            assert!(!repo.delete(&quote.id()).await.unwrap());
            assert!(repo.is_empty());
        }

        #[tokio::test]
        async fn tampered_totals_are_recomputed_on_load() {
            let repo = InMemoryQuoteRepository::new();
            let quote = quote_on(0, "ana", QuoteStatus::Draft, vec![item(2_500, None)]);
            let mut record = QuoteRecord::from(&quote);
            record.total = Money::from_cents(999_999);
            repo.insert_record(record).await;

            let loaded = repo.find_by_id(&quote.id()).await.unwrap().unwrap();
            assert_eq!(loaded.total(), Money::from_cents(2_500));
        }

        #[tokio::test]
        async fn clear_removes_everything() {
            let repo = InMemoryQuoteRepository::new();
            repo.save(&quote_on(0, "ana", QuoteStatus::Draft, vec![]))
                .await
                .unwrap();
            repo.clear().await;
            assert!(repo.is_empty());
        }
    }

    mod queries {
        use super::*;

        async fn seeded() -> InMemoryQuoteRepository {
            let repo = InMemoryQuoteRepository::new();
            let quotes = [
                quote_on(0, "ana", QuoteStatus::Draft, vec![item(100, Some("Filtro de óleo"))]),
                quote_on(1, "ana", QuoteStatus::Submitted, vec![item(200, None)]),
                quote_on(2, "bruno", QuoteStatus::Ready, vec![item(300, Some("Pneu aro 15"))]),
                quote_on(3, "carla", QuoteStatus::Draft, vec![]),
            ];
            for quote in &quotes {
                repo.save(quote).await.unwrap();
            }
            repo
        }

        #[tokio::test]
        async fn find_by_customer_and_status() {
            let repo = seeded().await;

            let ana = repo.find_by_customer_id(&CustomerId::new("ana")).await.unwrap();
            assert_eq!(ana.len(), 2);
            assert_eq!(ana[0].status(), QuoteStatus::Submitted);

            let drafts = repo.find_by_status(QuoteStatus::Draft).await.unwrap();
            assert_eq!(drafts.len(), 2);
        }

        #[tokio::test]
        async fn find_all_orders_newest_first_and_paginates() {
            let repo = seeded().await;

            let page = repo
                .find_all(PaginationParams::new(1, 3), &QuoteFilters::none())
                .await
                .unwrap();

            assert_eq!(page.total, 4);
            assert_eq!(page.total_pages, 2);
            assert_eq!(page.data.len(), 3);
            assert_eq!(page.data[0].customer_id().as_str(), "carla");

            let second = repo
                .find_all(PaginationParams::new(2, 3), &QuoteFilters::none())
                .await
                .unwrap();
            assert_eq!(second.data.len(), 1);
            assert_eq!(second.data[0].customer_id().as_str(), "ana");
        }

        #[tokio::test]
        async fn find_all_applies_filters() {
            let repo = seeded().await;

            let filters = QuoteFilters::none()
                .with_customer(CustomerId::new("ana"))
                .with_status(QuoteStatus::Draft);
            let page = repo.find_all(PaginationParams::default(), &filters).await.unwrap();
            assert_eq!(page.total, 1);

            let window = QuoteFilters::none().created_between(
                Timestamp::from_secs(FEB_6 + DAY),
                Timestamp::from_secs(FEB_6 + 2 * DAY),
            );
            let page = repo.find_all(PaginationParams::default(), &window).await.unwrap();
            assert_eq!(page.total, 2);
        }

        #[tokio::test]
        async fn search_matches_item_descriptions_case_insensitively() {
            let repo = seeded().await;
            let page = repo
                .search("  PNEU ", PaginationParams::default(), &QuoteFilters::none())
                .await
                .unwrap();
            assert_eq!(page.total, 1);
            assert_eq!(page.data[0].customer_id().as_str(), "bruno");
        }

        #[tokio::test]
        async fn search_matches_customer_and_id() {
            let repo = seeded().await;

            let page = repo
                .search("ana", PaginationParams::default(), &QuoteFilters::none())
                .await
                .unwrap();
            assert_eq!(page.total, 2);

            let target = repo.find_by_status(QuoteStatus::Ready).await.unwrap()[0].id();
            let id_text = target.to_string();
            let prefix = id_text.get(..8).unwrap();
            let page = repo
                .search(prefix, PaginationParams::default(), &QuoteFilters::none())
                .await
                .unwrap();
            assert!(page.data.iter().any(|q| q.id() == target));
        }

        #[tokio::test]
        async fn search_by_status_name() {
            let repo = seeded().await;
            let page = repo
                .search("ready", PaginationParams::default(), &QuoteFilters::none())
                .await
                .unwrap();
            assert_eq!(page.total, 1);
            assert_eq!(page.data[0].status(), QuoteStatus::Ready);
        }

        #[tokio::test]
        async fn search_respects_filters() {
            let repo = seeded().await;
            let filters = QuoteFilters::none().with_customer(CustomerId::new("bruno"));
            let page = repo
                .search("filtro", PaginationParams::default(), &filters)
                .await
                .unwrap();
            assert_eq!(page.total, 0);
        }

        #[tokio::test]
        async fn find_versions_orders_by_version() {
            let repo = InMemoryQuoteRepository::new();
            let root = quote_on(0, "ana", QuoteStatus::Ready, vec![item(100, None)]);
            let v2 = root.clone_next_version().unwrap();
            let v3 = v2.clone_next_version().unwrap();
            let sibling = root.clone_next_version().unwrap().clone_next_version().unwrap();

            for quote in [&root, &v3, &v2, &sibling] {
                repo.save(quote).await.unwrap();
            }

            let versions = repo.find_versions(&root.id()).await.unwrap();
            assert_eq!(versions.len(), 1);
            assert_eq!(versions[0].id(), v2.id());

            let from_v2 = repo.find_versions(&v2.id()).await.unwrap();
            assert_eq!(from_v2.len(), 1);
            assert_eq!(from_v2[0].version(), 3);
        }
    }
}
