//! # Quote Aggregate Root
//!
//! A versioned, priced proposal for parts and services tied to a customer.
//!
//! The [`Quote`] aggregate exclusively owns its line items. Every mutation
//! goes through the aggregate, which checks editability against the
//! status state machine and recalculates totals before committing.
//!
//! # State Machine
//!
//! ```text
//! Draft → Submitted → Generating → Ready
//!                         ↓   ↑
//!                        Failed
//! ```
//!
//! Items and description may change while the quote is `Draft`,
//! `Submitted` or `Generating`.
//!
//! # Examples
//!
//! ```
//! use oficina_quotes::domain::entities::{Quote, QuoteItem};
//! use oficina_quotes::domain::value_objects::{CustomerId, Money, QuoteItemType, QuoteStatus};
//!
//! let mut quote = Quote::create(CustomerId::new("c1"), None).unwrap();
//! let item = QuoteItem::create(Money::from_cents(10_000), 1, QuoteItemType::Part, None).unwrap();
//!
//! quote.add_item(item).unwrap();
//! quote.submit().unwrap();
//!
//! assert_eq!(quote.status(), QuoteStatus::Submitted);
//! assert_eq!(quote.version(), 2);
//! assert_eq!(quote.total(), Money::from_cents(10_000));
//! ```

use crate::domain::entities::quote_item::QuoteItem;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::services::totals::{QuoteTotals, calculate_quote_totals};
use crate::domain::value_objects::{
    ArithmeticError, CustomerId, Money, QuoteId, QuoteItemId, QuoteItemType, QuoteStatus,
    Timestamp,
};
use serde::Serialize;
use std::fmt;

/// Quote aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Unique identifier.
    id: QuoteId,
    /// Customer the quote is addressed to.
    customer_id: CustomerId,
    /// Quote this one was revised from, if any.
    parent_id: Option<QuoteId>,
    /// Lifecycle status.
    status: QuoteStatus,
    /// Revision number, starting at 1.
    version: u32,
    /// Line items, in insertion order.
    items: Vec<QuoteItem>,
    /// Cached totals, always derived from `items`.
    #[serde(flatten)]
    totals: QuoteTotals,
    /// Free-form description.
    description: Option<String>,
    /// When this quote was created.
    created_at: Timestamp,
    /// When this quote was last updated.
    updated_at: Timestamp,
}

impl Quote {
    /// Creates a new draft quote at version 1 with no items.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the customer id is blank.
    pub fn create(customer_id: CustomerId, description: Option<String>) -> DomainResult<Self> {
        let mut builder = Self::builder(customer_id);
        if let Some(description) = description {
            builder = builder.description(description);
        }
        builder.build()
    }

    /// Returns a builder for constructing a quote with non-default
    /// status, version or initial items.
    #[must_use]
    pub fn builder(customer_id: CustomerId) -> QuoteBuilder {
        QuoteBuilder::new(customer_id)
    }

    /// Reconstructs a quote from storage.
    ///
    /// Fields are not validated, but totals are always recomputed from
    /// `items`; stored totals are never trusted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` if the stored items overflow the
    /// currency representation.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: QuoteId,
        customer_id: CustomerId,
        parent_id: Option<QuoteId>,
        status: QuoteStatus,
        version: u32,
        items: Vec<QuoteItem>,
        description: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> DomainResult<Self> {
        let totals = calculate_quote_totals(&items)?;
        Ok(Self {
            id,
            customer_id,
            parent_id,
            status,
            version,
            items,
            totals,
            description,
            created_at,
            updated_at,
        })
    }

    fn ensure_editable(&self) -> DomainResult<()> {
        if !self.status.is_editable() {
            return Err(DomainError::ImmutableQuote);
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    // ========== Accessors ==========

    /// Returns the quote ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> QuoteId {
        self.id
    }

    /// Returns the customer ID.
    #[inline]
    #[must_use]
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Returns the ID of the quote this one was revised from.
    #[inline]
    #[must_use]
    pub fn parent_id(&self) -> Option<QuoteId> {
        self.parent_id
    }

    /// Returns the current status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> QuoteStatus {
        self.status
    }

    /// Returns the version.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Returns a read-only view of the items.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[QuoteItem] {
        &self.items
    }

    /// Returns the item with the given ID.
    #[must_use]
    pub fn item(&self, item_id: QuoteItemId) -> Option<&QuoteItem> {
        self.items.iter().find(|i| i.id() == item_id)
    }

    /// Returns the sum of all line totals.
    #[inline]
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.totals.subtotal
    }

    /// Returns the amount due.
    #[inline]
    #[must_use]
    pub fn total(&self) -> Money {
        self.totals.total
    }

    /// Returns the legacy `value` field (equal to the total).
    #[inline]
    #[must_use]
    pub fn value(&self) -> Money {
        self.totals.value
    }

    /// Returns all totals.
    #[inline]
    #[must_use]
    pub fn totals(&self) -> QuoteTotals {
        self.totals
    }

    /// Returns the description, if any.
    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns when this quote was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when this quote was last updated.
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ========== Query Methods ==========

    /// Returns the number of items.
    #[inline]
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the quote has at least one item.
    #[inline]
    #[must_use]
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Returns true if items and description may be changed.
    #[inline]
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.status.is_editable()
    }

    /// Returns true if files are ready and the quote is final.
    #[inline]
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.status.is_terminal()
    }

    // ========== Item Mutations ==========

    /// Appends an item.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ImmutableQuote` if the quote is not editable.
    /// Returns `DomainError::Arithmetic` if the new total overflows.
    pub fn add_item(&mut self, item: QuoteItem) -> DomainResult<()> {
        self.ensure_editable()?;

        let totals = calculate_quote_totals(self.items.iter().chain(std::iter::once(&item)))?;

        self.items.push(item);
        self.totals = totals;
        self.touch();
        Ok(())
    }

    /// Removes the item with the given ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ImmutableQuote` if the quote is not editable.
    /// Returns `DomainError::ItemNotFound` if no such item exists.
    pub fn remove_item(&mut self, item_id: QuoteItemId) -> DomainResult<()> {
        self.ensure_editable()?;

        let position = self
            .items
            .iter()
            .position(|i| i.id() == item_id)
            .ok_or(DomainError::ItemNotFound(item_id))?;

        let totals = calculate_quote_totals(self.items.iter().filter(|i| i.id() != item_id))?;

        self.items.remove(position);
        self.totals = totals;
        self.touch();
        Ok(())
    }

    /// Replaces the fields of an existing item, keeping its identity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ImmutableQuote` if the quote is not editable.
    /// Returns `DomainError::InvalidQuoteItem` if no such item exists.
    /// Returns `DomainError::Validation` if the new values are invalid.
    pub fn update_item(
        &mut self,
        item_id: QuoteItemId,
        unit_price: Money,
        quantity: i64,
        category: QuoteItemType,
        description: Option<String>,
    ) -> DomainResult<()> {
        self.replace_item(item_id, |item| {
            item.revise(unit_price, quantity, category, description)
        })
    }

    /// Like [`Quote::update_item`], with the category as raw text.
    ///
    /// Quantity and price are checked before the category.
    ///
    /// # Errors
    ///
    /// Same as [`Quote::update_item`], plus `DomainError::Validation` for
    /// an unknown category.
    pub fn update_item_raw(
        &mut self,
        item_id: QuoteItemId,
        unit_price: Money,
        quantity: i64,
        category: &str,
        description: Option<String>,
    ) -> DomainResult<()> {
        self.replace_item(item_id, |item| {
            item.revise_raw(unit_price, quantity, category, description)
        })
    }

    fn replace_item(
        &mut self,
        item_id: QuoteItemId,
        revise: impl FnOnce(&QuoteItem) -> DomainResult<QuoteItem>,
    ) -> DomainResult<()> {
        self.ensure_editable()?;

        let current = self
            .item(item_id)
            .ok_or_else(|| DomainError::InvalidQuoteItem(format!("item {item_id} not found")))?;
        let replacement = revise(current)?;

        let totals = calculate_quote_totals(
            self.items
                .iter()
                .map(|i| if i.id() == item_id { &replacement } else { i }),
        )?;

        if let Some(slot) = self.items.iter_mut().find(|i| i.id() == item_id) {
            *slot = replacement;
        }
        self.totals = totals;
        self.touch();
        Ok(())
    }

    /// Sets the description.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ImmutableQuote` if the quote is not editable.
    pub fn update_description(&mut self, description: Option<String>) -> DomainResult<()> {
        self.ensure_editable()?;
        self.description = description;
        self.touch();
        Ok(())
    }

    // ========== State Transitions ==========

    /// Moves the quote to `target`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition
    /// table does not allow it.
    pub fn change_status(&mut self, target: QuoteStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.touch();
        Ok(())
    }

    /// Submits a draft for file generation.
    ///
    /// Transitions: Draft → Submitted, incrementing the version.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - `DomainError::QuoteAlreadySubmitted` if already submitted
    /// - `DomainError::InvalidStatusTransition` if not a draft
    /// - `DomainError::EmptyQuote` if there are no items
    pub fn submit(&mut self) -> DomainResult<()> {
        if self.status == QuoteStatus::Submitted {
            return Err(DomainError::QuoteAlreadySubmitted);
        }
        if self.status != QuoteStatus::Draft {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: QuoteStatus::Submitted,
            });
        }
        if self.items.is_empty() {
            return Err(DomainError::EmptyQuote);
        }
        let version = self.next_version()?;

        self.status = QuoteStatus::Submitted;
        self.version = version;
        self.touch();
        Ok(())
    }

    /// Starts a new revision of this quote.
    ///
    /// The returned quote has a new ID, the next version, `Draft` status,
    /// fresh timestamps, and `parent_id` pointing at this quote. Items are
    /// copied by value and keep their IDs. `self` is not modified.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` if the version cannot be incremented.
    pub fn clone_next_version(&self) -> DomainResult<Self> {
        let version = self.next_version()?;
        let now = Timestamp::now();
        Ok(Self {
            id: QuoteId::new_v4(),
            customer_id: self.customer_id.clone(),
            parent_id: Some(self.id),
            status: QuoteStatus::Draft,
            version,
            items: self.items.clone(),
            totals: self.totals,
            description: self.description.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    fn next_version(&self) -> DomainResult<u32> {
        self.version
            .checked_add(1)
            .ok_or(DomainError::Arithmetic(ArithmeticError::Overflow))
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quote({} v{} [{}] {})",
            self.id,
            self.version,
            self.status,
            self.totals.total.formatted()
        )
    }
}

/// Builder for constructing [`Quote`] instances.
///
/// # Examples
///
/// ```
/// use oficina_quotes::domain::entities::{Quote, QuoteItem};
/// use oficina_quotes::domain::value_objects::{CustomerId, Money, QuoteItemType};
///
/// let items = vec![
///     QuoteItem::create(Money::from_cents(10_000), 1, QuoteItemType::Part, None).unwrap(),
///     QuoteItem::create(Money::from_cents(5_000), 2, QuoteItemType::Service, None).unwrap(),
/// ];
///
/// let quote = Quote::builder(CustomerId::new("c1")).items(items).build().unwrap();
/// assert_eq!(quote.total(), Money::from_cents(20_000));
/// ```
#[derive(Debug, Clone)]
pub struct QuoteBuilder {
    customer_id: CustomerId,
    description: Option<String>,
    status: QuoteStatus,
    version: u32,
    items: Vec<QuoteItem>,
}

impl QuoteBuilder {
    /// Creates a builder for a draft at version 1.
    #[must_use]
    pub fn new(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            description: None,
            status: QuoteStatus::Draft,
            version: 1,
            items: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub fn status(mut self, status: QuoteStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the initial version.
    #[must_use]
    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Sets the initial items.
    #[must_use]
    pub fn items(mut self, items: Vec<QuoteItem>) -> Self {
        self.items = items;
        self
    }

    /// Builds the quote.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the customer id is blank or the
    /// version is 0.
    /// Returns `DomainError::Arithmetic` if the items' total overflows.
    pub fn build(self) -> DomainResult<Quote> {
        if self.customer_id.is_blank() {
            return Err(DomainError::validation("Customer id is required"));
        }
        if self.version == 0 {
            return Err(DomainError::validation("Version must be greater than 0"));
        }

        let totals = calculate_quote_totals(&self.items)?;
        let now = Timestamp::now();
        Ok(Quote {
            id: QuoteId::new_v4(),
            customer_id: self.customer_id,
            parent_id: None,
            status: self.status,
            version: self.version,
            items: self.items,
            totals,
            description: self.description,
            created_at: now,
            updated_at: now,
        })
    }
}
