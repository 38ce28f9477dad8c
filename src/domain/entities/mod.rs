//! # Domain Entities
//!
//! Aggregate roots and entities representing core business concepts.
//!
//! ## Aggregates
//!
//! - [`Quote`]: Versioned service quote with status state machine
//!
//! ## Entities
//!
//! - [`QuoteItem`]: Priced part or service line owned by a quote

pub mod quote;
pub mod quote_item;

pub use quote::{Quote, QuoteBuilder};
pub use quote_item::QuoteItem;
