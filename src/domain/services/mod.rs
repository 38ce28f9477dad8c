//! # Domain Services
//!
//! Domain logic that does not belong to a single entity.
//!
//! ## Services
//!
//! - [`totals::calculate_quote_totals`]: Sum of item line totals

pub mod totals;

pub use totals::{QuoteTotals, calculate_quote_totals};
