//! # Domain Layer
//!
//! Core business logic for service quotes.
//!
//! - [`entities`]: the [`Quote`](entities::Quote) aggregate and its line items
//! - [`value_objects`]: money, identifiers, status and item type
//! - [`services`]: pure domain computations (totals)
//! - [`errors`]: the domain error taxonomy
//!
//! Nothing in this layer performs I/O.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
