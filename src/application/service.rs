//! # Quote Service
//!
//! Use cases over the quote aggregate.
//!
//! Every write follows the same shape: load through the repository, call
//! one aggregate method, save the result. The aggregate enforces all
//! invariants; the service only parses raw input, maps "not found" cases
//! and logs the outcome.
//!
//! # Examples
//!
//! ```
//! use oficina_quotes::application::QuoteService;
//! use oficina_quotes::application::commands::{CreateQuote, NewQuoteItem};
//! use oficina_quotes::config::PaginationSettings;
//! use oficina_quotes::domain::value_objects::CustomerId;
//! use oficina_quotes::infrastructure::persistence::in_memory::{
//!     InMemoryCustomerRepository, InMemoryQuoteRepository,
//! };
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let service = QuoteService::new(
//!     Arc::new(InMemoryQuoteRepository::new()),
//!     Arc::new(InMemoryCustomerRepository::with_customers([CustomerId::new("c1")])),
//!     PaginationSettings::default(),
//! );
//!
//! let quote = service
//!     .create_quote(CreateQuote::new("c1").with_item(NewQuoteItem::new(Decimal::new(100, 0), 2, "PART")))
//!     .await
//!     .unwrap();
//! let submitted = service.submit_quote(&quote.id().to_string()).await.unwrap();
//! assert_eq!(submitted.version(), 2);
//! # });
//! ```

use crate::application::commands::{
    AddQuoteItem, ChangeQuoteStatus, CreateQuote, ListQuotes, RemoveQuoteItem, SearchQuotes,
    UpdateQuoteDescription, UpdateQuoteItem,
};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::config::PaginationSettings;
use crate::domain::entities::Quote;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{CustomerId, Money, QuoteId, QuoteItemId, QuoteStatus};
use crate::infrastructure::persistence::{
    CustomerRepository, PaginatedResult, PaginationParams, QuoteRepository,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Application service for quotes.
#[derive(Debug, Clone)]
pub struct QuoteService {
    quotes: Arc<dyn QuoteRepository>,
    customers: Arc<dyn CustomerRepository>,
    pagination: PaginationSettings,
}

impl QuoteService {
    /// Creates a service over the given repositories.
    #[must_use]
    pub fn new(
        quotes: Arc<dyn QuoteRepository>,
        customers: Arc<dyn CustomerRepository>,
        pagination: PaginationSettings,
    ) -> Self {
        Self {
            quotes,
            customers,
            pagination,
        }
    }

    // ========== Commands ==========

    /// Opens a new draft quote for an existing customer.
    ///
    /// # Errors
    ///
    /// - `Domain(Validation)` for a blank customer id or an invalid item
    /// - `CustomerNotFound` if the customer does not exist
    #[tracing::instrument(skip(self, cmd), fields(customer_id = %cmd.customer_id))]
    pub async fn create_quote(&self, cmd: CreateQuote) -> ApplicationResult<Quote> {
        let items = cmd
            .items
            .into_iter()
            .map(|item| item.into_item())
            .collect::<ApplicationResult<Vec<_>>>()?;

        let mut builder = Quote::builder(CustomerId::new(cmd.customer_id)).items(items);
        if let Some(description) = cmd.description {
            builder = builder.description(description);
        }
        let quote = builder.build()?;

        if !self.customers.exists(quote.customer_id()).await? {
            warn!("quote rejected: unknown customer");
            return Err(ApplicationError::customer_not_found(quote.customer_id()));
        }

        self.quotes.save(&quote).await?;
        info!(quote_id = %quote.id(), total = %quote.total(), "quote created");
        Ok(quote)
    }

    /// Appends an item to a quote.
    ///
    /// # Errors
    ///
    /// - `QuoteNotFound` if the quote does not exist
    /// - `Domain(ImmutableQuote)` if the quote is not editable
    /// - `Domain(Validation)` if the item is invalid
    #[tracing::instrument(skip(self, cmd), fields(quote_id = %cmd.quote_id))]
    pub async fn add_item(&self, cmd: AddQuoteItem) -> ApplicationResult<Quote> {
        let quote_id = parse_quote_id(&cmd.quote_id)?;
        let item = cmd.item.into_item()?;
        self.modify(quote_id, "add_item", move |quote| quote.add_item(item))
            .await
    }

    /// Replaces an item's fields.
    ///
    /// # Errors
    ///
    /// - `QuoteNotFound` if the quote does not exist
    /// - `Domain(ImmutableQuote)` if the quote is not editable
    /// - `Domain(InvalidQuoteItem)` if the item does not exist
    /// - `Domain(Validation)` if the new values are invalid
    #[tracing::instrument(skip(self, cmd), fields(quote_id = %cmd.quote_id, item_id = %cmd.item_id))]
    pub async fn update_item(&self, cmd: UpdateQuoteItem) -> ApplicationResult<Quote> {
        let quote_id = parse_quote_id(&cmd.quote_id)?;
        let item_id = parse_item_id(&cmd.item_id)?;
        let unit_price = Money::from_decimal(cmd.item.unit_price)
            .map_err(DomainError::from)?;
        let quantity = cmd.item.quantity;
        let category = cmd.item.category;
        let description = cmd.item.description;

        self.modify(quote_id, "update_item", move |quote| {
            quote.update_item_raw(item_id, unit_price, quantity, &category, description)
        })
        .await
    }

    /// Removes an item.
    ///
    /// # Errors
    ///
    /// - `QuoteNotFound` if the quote does not exist
    /// - `Domain(ImmutableQuote)` if the quote is not editable
    /// - `Domain(ItemNotFound)` if the item does not exist
    #[tracing::instrument(skip(self, cmd), fields(quote_id = %cmd.quote_id, item_id = %cmd.item_id))]
    pub async fn remove_item(&self, cmd: RemoveQuoteItem) -> ApplicationResult<Quote> {
        let quote_id = parse_quote_id(&cmd.quote_id)?;
        let item_id = parse_item_id(&cmd.item_id)?;
        self.modify(quote_id, "remove_item", move |quote| {
            quote.remove_item(item_id)
        })
        .await
    }

    /// Sets or clears the description.
    ///
    /// # Errors
    ///
    /// - `QuoteNotFound` if the quote does not exist
    /// - `Domain(ImmutableQuote)` if the quote is not editable
    #[tracing::instrument(skip(self, cmd), fields(quote_id = %cmd.quote_id))]
    pub async fn update_description(
        &self,
        cmd: UpdateQuoteDescription,
    ) -> ApplicationResult<Quote> {
        let quote_id = parse_quote_id(&cmd.quote_id)?;
        let description = cmd.description;
        self.modify(quote_id, "update_description", move |quote| {
            quote.update_description(description)
        })
        .await
    }

    /// Moves a quote to another status.
    ///
    /// # Errors
    ///
    /// - `Validation` if the status name is unknown
    /// - `QuoteNotFound` if the quote does not exist
    /// - `Domain(InvalidStatusTransition)` if the move is not allowed
    #[tracing::instrument(skip(self, cmd), fields(quote_id = %cmd.quote_id, status = %cmd.status))]
    pub async fn change_status(&self, cmd: ChangeQuoteStatus) -> ApplicationResult<Quote> {
        let quote_id = parse_quote_id(&cmd.quote_id)?;
        let target: QuoteStatus = cmd
            .status
            .parse()
            .map_err(|e| ApplicationError::validation(format!("{e}")))?;
        self.modify(quote_id, "change_status", move |quote| {
            quote.change_status(target)
        })
        .await
    }

    /// Submits a draft quote.
    ///
    /// # Errors
    ///
    /// - `QuoteNotFound` if the quote does not exist
    /// - `Domain(QuoteAlreadySubmitted | InvalidStatusTransition | EmptyQuote)`
    #[tracing::instrument(skip(self))]
    pub async fn submit_quote(&self, quote_id: &str) -> ApplicationResult<Quote> {
        let quote_id = parse_quote_id(quote_id)?;
        self.modify(quote_id, "submit", Quote::submit).await
    }

    /// Starts a new draft revision of a quote and stores it.
    ///
    /// The original is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `QuoteNotFound` if the quote does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn revise_quote(&self, quote_id: &str) -> ApplicationResult<Quote> {
        let quote_id = parse_quote_id(quote_id)?;
        let original = self.load(quote_id).await?;
        let revision = original.clone_next_version()?;

        self.quotes.save(&revision).await?;
        info!(
            revision_id = %revision.id(),
            version = revision.version(),
            "quote revision created"
        );
        Ok(revision)
    }

    /// Deletes a quote.
    ///
    /// # Errors
    ///
    /// Returns `QuoteNotFound` if the quote does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn delete_quote(&self, quote_id: &str) -> ApplicationResult<()> {
        let quote_id = parse_quote_id(quote_id)?;
        if !self.quotes.delete(&quote_id).await? {
            return Err(ApplicationError::quote_not_found(quote_id));
        }
        info!("quote deleted");
        Ok(())
    }

    // ========== Queries ==========

    /// Gets a quote by ID.
    ///
    /// # Errors
    ///
    /// Returns `QuoteNotFound` if the quote does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_quote(&self, quote_id: &str) -> ApplicationResult<Quote> {
        let quote_id = parse_quote_id(quote_id)?;
        self.load(quote_id).await
    }

    /// Lists quotes, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Repository` on storage failure.
    #[tracing::instrument(skip(self))]
    pub async fn list_quotes(&self, request: ListQuotes) -> ApplicationResult<PaginatedResult<Quote>> {
        let params = self.page_params(request.page, request.per_page);
        Ok(self.quotes.find_all(params, &request.filters).await?)
    }

    /// Searches quotes by free text, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Repository` on storage failure.
    #[tracing::instrument(skip(self))]
    pub async fn search_quotes(
        &self,
        request: SearchQuotes,
    ) -> ApplicationResult<PaginatedResult<Quote>> {
        let params = self.page_params(request.page, request.per_page);
        Ok(self
            .quotes
            .search(&request.query, params, &request.filters)
            .await?)
    }

    /// Lists all quotes of a customer, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Repository` on storage failure.
    #[tracing::instrument(skip(self))]
    pub async fn list_customer_quotes(&self, customer_id: &str) -> ApplicationResult<Vec<Quote>> {
        Ok(self
            .quotes
            .find_by_customer_id(&CustomerId::new(customer_id))
            .await?)
    }

    /// Lists the revisions cloned from a quote, ordered by version.
    ///
    /// # Errors
    ///
    /// Returns `QuoteNotFound` if the quote does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn list_versions(&self, quote_id: &str) -> ApplicationResult<Vec<Quote>> {
        let quote_id = parse_quote_id(quote_id)?;
        if !self.quotes.exists(&quote_id).await? {
            return Err(ApplicationError::quote_not_found(quote_id));
        }
        Ok(self.quotes.find_versions(&quote_id).await?)
    }

    // ========== Helpers ==========

    async fn load(&self, quote_id: QuoteId) -> ApplicationResult<Quote> {
        self.quotes
            .find_by_id(&quote_id)
            .await?
            .ok_or_else(|| ApplicationError::quote_not_found(quote_id))
    }

    async fn modify<F>(
        &self,
        quote_id: QuoteId,
        operation: &'static str,
        apply: F,
    ) -> ApplicationResult<Quote>
    where
        F: FnOnce(&mut Quote) -> DomainResult<()>,
    {
        let mut quote = self.load(quote_id).await?;

        if let Err(e) = apply(&mut quote) {
            warn!(operation, error = %e, "quote operation rejected");
            return Err(e.into());
        }

        self.quotes.save(&quote).await?;
        info!(
            operation,
            status = %quote.status(),
            version = quote.version(),
            total = %quote.total(),
            "quote updated"
        );
        Ok(quote)
    }

    fn page_params(&self, page: Option<u32>, per_page: Option<u32>) -> PaginationParams {
        PaginationParams::new(
            page.unwrap_or(1),
            per_page.unwrap_or(self.pagination.default_per_page),
        )
        .clamped(self.pagination.max_per_page)
    }
}

fn parse_quote_id(raw: &str) -> ApplicationResult<QuoteId> {
    raw.parse()
        .map_err(|_| ApplicationError::validation(format!("Invalid quote id: {raw}")))
}

fn parse_item_id(raw: &str) -> ApplicationResult<QuoteItemId> {
    raw.parse()
        .map_err(|_| ApplicationError::validation(format!("Invalid item id: {raw}")))
}
