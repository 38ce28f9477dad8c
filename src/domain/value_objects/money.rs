//! # Money Value Object
//!
//! Exact-precision currency amounts stored as integer minor units (cents).
//!
//! Amounts enter and leave the domain as [`Decimal`] values; inside the
//! domain every sum and product is integer arithmetic on cents, so totals
//! never drift.
//!
//! # Examples
//!
//! ```
//! use oficina_quotes::domain::value_objects::Money;
//! use rust_decimal::Decimal;
//!
//! let unit = Money::from_decimal(Decimal::new(19990, 2)).unwrap();
//! assert_eq!(unit.cents(), 19_990);
//!
//! let line = unit.times(3).unwrap();
//! assert_eq!(line.to_decimal(), Decimal::new(59970, 2));
//! assert_eq!(line.formatted(), "R$ 599,70");
//! ```

use crate::domain::value_objects::arithmetic::{
    ArithmeticError, ArithmeticResult, CheckedArithmetic,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

/// Number of minor units in one major unit.
const CENTS_PER_UNIT: i64 = 100;

/// Decimal places carried by the currency.
const SCALE: u32 = 2;

/// A currency amount in integer minor units.
///
/// The value is signed so that invalid (negative) inputs can still be
/// represented and rejected by entity validation with a precise message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units.
    #[inline]
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates an amount from a decimal value in major units.
    ///
    /// The value is rounded to two decimal places, midpoint away from zero.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the amount does not fit in
    /// `i64` cents.
    pub fn from_decimal(value: Decimal) -> ArithmeticResult<Self> {
        let rounded = value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
        let cents = rounded.safe_mul(Decimal::from(CENTS_PER_UNIT))?;
        i64::try_from(cents)
            .map(Self)
            .map_err(|_| ArithmeticError::Overflow)
    }

    /// Returns the amount in minor units.
    #[inline]
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns the amount in major units as a decimal with two places.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, SCALE)
    }

    /// Returns true if the amount is zero.
    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is below zero.
    #[inline]
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiplies the amount by an item quantity.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the product does not fit.
    pub fn times(self, quantity: u32) -> ArithmeticResult<Self> {
        self.0.safe_mul(i64::from(quantity)).map(Self)
    }

    /// Returns the discount amount for a percentage in `0..=100`.
    ///
    /// The discount is rounded to the nearest cent, midpoint away from zero.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::InvalidValue` if `percent` exceeds 100.
    pub fn discount_amount(self, percent: u8) -> ArithmeticResult<Self> {
        if percent > 100 {
            return Err(ArithmeticError::InvalidValue(
                "discount percent must be between 0 and 100",
            ));
        }
        let discount = Decimal::from(self.0)
            .safe_mul(Decimal::from(percent))?
            / Decimal::ONE_HUNDRED;
        let rounded = discount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        i64::try_from(rounded)
            .map(Self)
            .map_err(|_| ArithmeticError::Overflow)
    }

    /// Returns the amount after applying a percentage discount.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::InvalidValue` if `percent` exceeds 100.
    pub fn apply_discount(self, percent: u8) -> ArithmeticResult<Self> {
        let discount = self.discount_amount(percent)?;
        self.safe_sub(discount)
    }

    /// Formats the amount as Brazilian reais, e.g. `R$ 1.234,56`.
    #[must_use]
    pub fn formatted(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / CENTS_PER_UNIT.unsigned_abs();
        let cents = abs % CENTS_PER_UNIT.unsigned_abs();

        let digits = units.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        format!("{sign}R$ {grouped},{cents:02}")
    }
}

impl CheckedArithmetic for Money {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.0.safe_add(rhs.0).map(Self)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.0.safe_sub(rhs.0).map(Self)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.0.safe_mul(rhs.0).map(Self)
    }
}

impl<'a> Sum<&'a Money> for ArithmeticResult<Money> {
    fn sum<I: Iterator<Item = &'a Money>>(mut iter: I) -> Self {
        iter.try_fold(Money::ZERO, |acc, m| acc.safe_add(*m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}
