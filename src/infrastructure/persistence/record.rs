//! # Persistence Records
//!
//! Storage-shaped copies of the quote aggregate.
//!
//! Records carry the totals that were current when the quote was saved so
//! that reporting queries can read them, but [`QuoteRecord::into_domain`]
//! ignores them and lets the aggregate recompute from the items.

use crate::domain::entities::{Quote, QuoteItem};
use crate::domain::value_objects::{
    CustomerId, Money, QuoteId, QuoteItemId, QuoteItemType, QuoteStatus, Timestamp,
};
use crate::infrastructure::persistence::traits::{RepositoryError, RepositoryResult};
use serde::{Deserialize, Serialize};

/// Stored form of a [`QuoteItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItemRecord {
    /// Item identifier.
    pub id: QuoteItemId,
    /// Unit price in cents.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
    /// Part or service.
    #[serde(rename = "type")]
    pub category: QuoteItemType,
    /// Free-form description.
    pub description: Option<String>,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last update time.
    pub updated_at: Timestamp,
}

/// Stored form of a [`Quote`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    /// Quote identifier.
    pub id: QuoteId,
    /// Customer reference.
    pub customer_id: String,
    /// Quote this one was revised from.
    pub parent_id: Option<QuoteId>,
    /// Lifecycle status.
    pub status: QuoteStatus,
    /// Revision number.
    pub version: u32,
    /// Line items.
    pub items: Vec<QuoteItemRecord>,
    /// Subtotal at save time.
    pub subtotal: Money,
    /// Total at save time.
    pub total: Money,
    /// Legacy value at save time.
    pub value: Money,
    /// Free-form description.
    pub description: Option<String>,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last update time.
    pub updated_at: Timestamp,
}

impl From<&QuoteItem> for QuoteItemRecord {
    fn from(item: &QuoteItem) -> Self {
        Self {
            id: item.id(),
            unit_price: item.unit_price(),
            quantity: item.quantity(),
            category: item.category(),
            description: item.description().map(str::to_owned),
            created_at: item.created_at(),
            updated_at: item.updated_at(),
        }
    }
}

impl From<QuoteItemRecord> for QuoteItem {
    fn from(record: QuoteItemRecord) -> Self {
        QuoteItem::restore(
            record.id,
            record.unit_price,
            record.quantity,
            record.category,
            record.description,
            Some(record.created_at),
            Some(record.updated_at),
        )
    }
}

impl From<&Quote> for QuoteRecord {
    fn from(quote: &Quote) -> Self {
        Self {
            id: quote.id(),
            customer_id: quote.customer_id().as_str().to_owned(),
            parent_id: quote.parent_id(),
            status: quote.status(),
            version: quote.version(),
            items: quote.items().iter().map(QuoteItemRecord::from).collect(),
            subtotal: quote.subtotal(),
            total: quote.total(),
            value: quote.value(),
            description: quote.description().map(str::to_owned),
            created_at: quote.created_at(),
            updated_at: quote.updated_at(),
        }
    }
}

impl QuoteRecord {
    /// Rebuilds the aggregate, recomputing totals from the items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` if the stored items
    /// cannot form a valid aggregate.
    pub fn into_domain(self) -> RepositoryResult<Quote> {
        let id = self.id;
        Quote::restore(
            self.id,
            CustomerId::new(self.customer_id),
            self.parent_id,
            self.status,
            self.version,
            self.items.into_iter().map(QuoteItem::from).collect(),
            self.description,
            self.created_at,
            self.updated_at,
        )
        .map_err(|e| RepositoryError::serialization(format!("cannot restore quote {id}: {e}")))
    }
}
