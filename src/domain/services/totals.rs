//! # Quote Totals
//!
//! Pure aggregation of item line totals.
//!
//! `total` equals `subtotal` until discounts or taxes exist; `value` is
//! kept as an alias of `total` for older consumers.

use crate::domain::entities::QuoteItem;
use crate::domain::value_objects::{ArithmeticResult, CheckedArithmetic, Money};
use serde::{Deserialize, Serialize};

/// Monetary totals of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuoteTotals {
    /// Sum of all line totals.
    pub subtotal: Money,
    /// Amount due.
    pub total: Money,
    /// Legacy alias of `total`.
    pub value: Money,
}

/// Sums the line totals of `items`.
///
/// # Errors
///
/// Returns `ArithmeticError::Overflow` if a line total or the sum does
/// not fit in the currency representation.
pub fn calculate_quote_totals<'a, I>(items: I) -> ArithmeticResult<QuoteTotals>
where
    I: IntoIterator<Item = &'a QuoteItem>,
{
    let subtotal = items
        .into_iter()
        .try_fold(Money::ZERO, |acc, item| acc.safe_add(item.line_total()?))?;

    Ok(QuoteTotals {
        subtotal,
        total: subtotal,
        value: subtotal,
    })
}
