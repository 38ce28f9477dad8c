//! # Domain Errors
//!
//! Error types raised by the quote aggregate and its line items.
//!
//! Every failure is synchronous and leaves the aggregate unchanged.
//!
//! # Examples
//!
//! ```
//! use oficina_quotes::domain::errors::DomainError;
//! use oficina_quotes::domain::value_objects::QuoteStatus;
//!
//! let err = DomainError::InvalidStatusTransition {
//!     from: QuoteStatus::Draft,
//!     to: QuoteStatus::Ready,
//! };
//! assert_eq!(err.to_string(), "Invalid status transition from DRAFT to READY");
//! ```

use crate::domain::value_objects::{ArithmeticError, ParseEnumError, QuoteItemId, QuoteStatus};
use thiserror::Error;

/// Domain-level error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A field failed validation.
    #[error("{0}")]
    Validation(String),

    /// The quote can no longer be edited.
    #[error("Quote is immutable after file generation starts")]
    ImmutableQuote,

    /// No item with the given id exists in the quote.
    #[error("Item not found: {0}")]
    ItemNotFound(QuoteItemId),

    /// The item referenced by an update does not exist.
    #[error("Invalid quote item: {0}")]
    InvalidQuoteItem(String),

    /// The requested status transition is not allowed.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status.
        from: QuoteStatus,
        /// Requested status.
        to: QuoteStatus,
    },

    /// The quote is already in the submitted state.
    #[error("Quote was already submitted")]
    QuoteAlreadySubmitted,

    /// The quote has no items.
    #[error("Quote is empty")]
    EmptyQuote,

    /// A money computation overflowed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the error was caused by a missing item.
    #[must_use]
    pub fn is_item_not_found(&self) -> bool {
        matches!(self, Self::ItemNotFound(_) | Self::InvalidQuoteItem(_))
    }

    /// Returns true if the error reflects the quote's lifecycle state
    /// rather than bad input.
    #[must_use]
    pub fn is_state_conflict(&self) -> bool {
        matches!(
            self,
            Self::ImmutableQuote
                | Self::InvalidStatusTransition { .. }
                | Self::QuoteAlreadySubmitted
                | Self::EmptyQuote
        )
    }
}

impl From<ParseEnumError> for DomainError {
    fn from(err: ParseEnumError) -> Self {
        Self::Validation(format!("Invalid item type: {}", err.value()))
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
