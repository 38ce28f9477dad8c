//! # Commands
//!
//! Raw requests accepted by [`QuoteService`](crate::application::QuoteService).
//!
//! Commands carry boundary values as received (string ids, decimal prices,
//! textual categories); the service parses and validates them.

use crate::application::error::ApplicationResult;
use crate::domain::entities::QuoteItem;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::Money;
use crate::infrastructure::persistence::QuoteFilters;
use rust_decimal::Decimal;
use serde::Deserialize;

/// A line item as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuoteItem {
    /// Unit price in reais.
    pub unit_price: Decimal,
    /// Quantity.
    pub quantity: i64,
    /// `PART` or `SERVICE`.
    #[serde(rename = "type")]
    pub category: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

impl NewQuoteItem {
    /// Creates an item request.
    #[must_use]
    pub fn new(unit_price: Decimal, quantity: i64, category: impl Into<String>) -> Self {
        Self {
            unit_price,
            quantity,
            category: category.into(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validates the request into a domain item.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if any field is invalid.
    pub fn into_item(self) -> ApplicationResult<QuoteItem> {
        let unit_price = Money::from_decimal(self.unit_price).map_err(DomainError::from)?;
        Ok(QuoteItem::from_raw(
            unit_price,
            self.quantity,
            &self.category,
            self.description,
        )?)
    }
}

/// Request to open a new quote.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuote {
    /// Customer the quote is for.
    pub customer_id: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Initial items.
    #[serde(default)]
    pub items: Vec<NewQuoteItem>,
}

impl CreateQuote {
    /// Creates a request for an empty quote.
    #[must_use]
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            description: None,
            items: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an initial item.
    #[must_use]
    pub fn with_item(mut self, item: NewQuoteItem) -> Self {
        self.items.push(item);
        self
    }
}

/// Request to append an item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuoteItem {
    /// Target quote.
    pub quote_id: String,
    /// The item.
    pub item: NewQuoteItem,
}

/// Request to replace an item's fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuoteItem {
    /// Target quote.
    pub quote_id: String,
    /// Item to replace.
    pub item_id: String,
    /// New field values.
    pub item: NewQuoteItem,
}

/// Request to remove an item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveQuoteItem {
    /// Target quote.
    pub quote_id: String,
    /// Item to remove.
    pub item_id: String,
}

/// Request to set a quote's description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuoteDescription {
    /// Target quote.
    pub quote_id: String,
    /// New description; `None` clears it.
    #[serde(default)]
    pub description: Option<String>,
}

/// Request to move a quote to another status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeQuoteStatus {
    /// Target quote.
    pub quote_id: String,
    /// Wire name of the new status.
    pub status: String,
}

/// Request for one page of quotes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuotes {
    /// Page number (defaults to 1).
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size (defaults to the configured size).
    #[serde(default)]
    pub per_page: Option<u32>,
    /// Filters.
    #[serde(default)]
    pub filters: QuoteFilters,
}

/// Free-text search request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuotes {
    /// Search text.
    pub query: String,
    /// Page number (defaults to 1).
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size (defaults to the configured size).
    #[serde(default)]
    pub per_page: Option<u32>,
    /// Filters applied on top of the text match.
    #[serde(default)]
    pub filters: QuoteFilters,
}
