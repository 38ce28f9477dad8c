//! # Application Errors
//!
//! Error types for the application layer.
//!
//! These errors represent failures that can occur while running a quote
//! operation: bad raw input, missing quotes or customers, business rule
//! violations raised by the aggregate, and storage failures.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)          - Business rule violations
//! ├── Repository(RepositoryError)  - Storage failures
//! ├── Validation(String)           - Malformed raw input
//! ├── QuoteNotFound(String)        - No quote with that id
//! └── CustomerNotFound(String)     - Referenced customer is unknown
//! ```
//!
//! # Examples
//!
//! ```
//! use oficina_quotes::application::error::{ApplicationError, ErrorKind};
//!
//! let err = ApplicationError::quote_not_found("q-123");
//! assert!(err.is_not_found());
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::RepositoryError;
use std::fmt;
use thiserror::Error;

/// Coarse classification of an [`ApplicationError`].
///
/// An API layer maps each kind to one client-facing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The addressed resource does not exist.
    NotFound,
    /// The input is malformed or violates a field rule.
    Validation,
    /// The request conflicts with the resource's current state.
    Conflict,
    /// The request is well-formed but cannot be applied yet.
    UnprocessableState,
    /// Anything else.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::UnprocessableState => "unprocessable_state",
            Self::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from business logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Quote not found.
    #[error("quote not found: {0}")]
    QuoteNotFound(String),

    /// Customer not found.
    #[error("customer not found: {0}")]
    CustomerNotFound(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a quote not found error.
    #[must_use]
    pub fn quote_not_found(id: impl fmt::Display) -> Self {
        Self::QuoteNotFound(id.to_string())
    }

    /// Creates a customer not found error.
    #[must_use]
    pub fn customer_not_found(id: impl fmt::Display) -> Self {
        Self::CustomerNotFound(id.to_string())
    }

    /// Returns the classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(e) => match e {
                DomainError::Validation(_) | DomainError::Arithmetic(_) => ErrorKind::Validation,
                DomainError::ItemNotFound(_) | DomainError::InvalidQuoteItem(_) => {
                    ErrorKind::NotFound
                }
                DomainError::ImmutableQuote
                | DomainError::InvalidStatusTransition { .. }
                | DomainError::QuoteAlreadySubmitted => ErrorKind::Conflict,
                DomainError::EmptyQuote => ErrorKind::UnprocessableState,
            },
            Self::Repository(e) => match e {
                RepositoryError::VersionConflict { .. } => ErrorKind::Conflict,
                RepositoryError::Serialization(_) => ErrorKind::Internal,
            },
            Self::Validation(_) => ErrorKind::Validation,
            Self::QuoteNotFound(_) | Self::CustomerNotFound(_) => ErrorKind::NotFound,
        }
    }

    /// Returns true if reloading and retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Repository(RepositoryError::VersionConflict { .. }))
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Returns the domain error, if this wraps one.
    #[must_use]
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
