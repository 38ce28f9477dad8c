//! # Quote Item Entity
//!
//! A single priced line (part or service) within a quote.
//!
//! Items are validated on creation and restored without validation when
//! loaded from trusted storage. Once inside a quote an item only changes
//! through full replacement ([`QuoteItem::revise`]).
//!
//! # Examples
//!
//! ```
//! use oficina_quotes::domain::entities::QuoteItem;
//! use oficina_quotes::domain::value_objects::{Money, QuoteItemType};
//!
//! let item = QuoteItem::create(
//!     Money::from_cents(5_000),
//!     2,
//!     QuoteItemType::Part,
//!     Some("Pastilha de freio".to_string()),
//! )
//! .unwrap();
//!
//! assert_eq!(item.line_total().unwrap(), Money::from_cents(10_000));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    ArithmeticResult, Money, QuoteItemId, QuoteItemType, Timestamp,
};
use serde::Serialize;
use std::fmt;

/// A validated quote line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteItem {
    id: QuoteItemId,
    unit_price: Money,
    quantity: u32,
    category: QuoteItemType,
    description: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl QuoteItem {
    /// Creates a new item with validation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if quantity is not positive, if the
    /// unit price is negative, or if the line total does not fit the
    /// currency representation.
    pub fn create(
        unit_price: Money,
        quantity: i64,
        category: QuoteItemType,
        description: Option<String>,
    ) -> DomainResult<Self> {
        let quantity = Self::validate(unit_price, quantity)?;
        let now = Timestamp::now();
        Ok(Self {
            id: QuoteItemId::new_v4(),
            unit_price,
            quantity,
            category,
            description,
            created_at: now,
            updated_at: now,
        })
    }

    /// Creates a new item from raw boundary input, parsing the category.
    ///
    /// Quantity and price are checked before the category, so the first
    /// reported problem is the same as for [`QuoteItem::create`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for any invalid field, including
    /// `"Invalid item type: <value>"` for an unknown category.
    pub fn from_raw(
        unit_price: Money,
        quantity: i64,
        category: &str,
        description: Option<String>,
    ) -> DomainResult<Self> {
        Self::validate(unit_price, quantity)?;
        let category: QuoteItemType = category.parse()?;
        Self::create(unit_price, quantity, category, description)
    }

    /// Reconstructs an item from storage without validation.
    ///
    /// Missing timestamps default to now.
    #[must_use]
    pub fn restore(
        id: QuoteItemId,
        unit_price: Money,
        quantity: u32,
        category: QuoteItemType,
        description: Option<String>,
        created_at: Option<Timestamp>,
        updated_at: Option<Timestamp>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            unit_price,
            quantity,
            category,
            description,
            created_at: created_at.unwrap_or(now),
            updated_at: updated_at.unwrap_or(now),
        }
    }

    /// Returns a validated replacement of this item.
    ///
    /// The identifier and creation time are preserved; `updated_at` is
    /// set to now.
    ///
    /// # Errors
    ///
    /// Same rules as [`QuoteItem::create`].
    pub fn revise(
        &self,
        unit_price: Money,
        quantity: i64,
        category: QuoteItemType,
        description: Option<String>,
    ) -> DomainResult<Self> {
        let quantity = Self::validate(unit_price, quantity)?;
        Ok(Self {
            id: self.id,
            unit_price,
            quantity,
            category,
            description,
            created_at: self.created_at,
            updated_at: Timestamp::now(),
        })
    }

    /// Returns a validated replacement from raw boundary input.
    ///
    /// Checks run in the same order as [`QuoteItem::from_raw`].
    ///
    /// # Errors
    ///
    /// Same rules as [`QuoteItem::from_raw`].
    pub fn revise_raw(
        &self,
        unit_price: Money,
        quantity: i64,
        category: &str,
        description: Option<String>,
    ) -> DomainResult<Self> {
        Self::validate(unit_price, quantity)?;
        let category: QuoteItemType = category.parse()?;
        self.revise(unit_price, quantity, category, description)
    }

    fn validate(unit_price: Money, quantity: i64) -> DomainResult<u32> {
        if quantity <= 0 {
            return Err(DomainError::validation("Quantity must be greater than 0"));
        }
        if unit_price.is_negative() {
            return Err(DomainError::validation(
                "Unit price must be greater than or equal to 0",
            ));
        }
        let quantity = u32::try_from(quantity)
            .map_err(|_| DomainError::validation("Quantity exceeds the supported maximum"))?;
        unit_price
            .times(quantity)
            .map_err(|_| DomainError::validation("Line total exceeds the supported amount"))?;
        Ok(quantity)
    }

    // ========== Accessors ==========

    /// Returns the item ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> QuoteItemId {
        self.id
    }

    /// Returns the unit price.
    #[inline]
    #[must_use]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Returns the quantity.
    #[inline]
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the category.
    #[inline]
    #[must_use]
    pub fn category(&self) -> QuoteItemType {
        self.category
    }

    /// Returns the description, if any.
    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns when the item was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when the item was last updated.
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Returns `unit_price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` for a restored item whose
    /// product does not fit; validated items never fail.
    pub fn line_total(&self) -> ArithmeticResult<Money> {
        self.unit_price.times(self.quantity)
    }
}

impl fmt::Display for QuoteItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} x {}",
            self.category.label(),
            self.quantity,
            self.unit_price.formatted()
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod create {
        use super::*;

        #[test]
        fn valid_item() {
            let item = QuoteItem::create(
                Money::from_cents(2_500),
                4,
                QuoteItemType::Service,
                Some("Alinhamento".into()),
            )
            .unwrap();

            assert_eq!(item.quantity(), 4);
            assert_eq!(item.category(), QuoteItemType::Service);
            assert_eq!(item.description(), Some("Alinhamento"));
            assert_eq!(item.line_total().unwrap(), Money::from_cents(10_000));
            assert_eq!(item.created_at(), item.updated_at());
        }

        #[test]
        fn zero_price_is_allowed() {
            let item = QuoteItem::create(Money::ZERO, 1, QuoteItemType::Part, None).unwrap();
            assert!(item.line_total().unwrap().is_zero());
        }

        #[test]
        fn rejects_zero_quantity() {
            let err = QuoteItem::create(Money::from_cents(100), 0, QuoteItemType::Part, None)
                .unwrap_err();
            assert_eq!(err, DomainError::validation("Quantity must be greater than 0"));
        }

        #[test]
        fn rejects_negative_quantity() {
            let err = QuoteItem::create(Money::from_cents(100), -3, QuoteItemType::Part, None)
                .unwrap_err();
            assert_eq!(err, DomainError::validation("Quantity must be greater than 0"));
        }

        #[test]
        fn rejects_negative_price() {
            let err = QuoteItem::create(Money::from_cents(-1), 1, QuoteItemType::Part, None)
                .unwrap_err();
            assert_eq!(
                err,
                DomainError::validation("Unit price must be greater than or equal to 0")
            );
        }

        #[test]
        fn quantity_checked_before_price() {
            let err = QuoteItem::create(Money::from_cents(-1), 0, QuoteItemType::Part, None)
                .unwrap_err();
            assert_eq!(err, DomainError::validation("Quantity must be greater than 0"));
        }

        #[test]
        fn rejects_overflowing_line_total() {
            let err = QuoteItem::create(Money::from_cents(i64::MAX), 2, QuoteItemType::Part, None)
                .unwrap_err();
            assert!(err.is_validation());
        }

        #[test]
        fn rejects_quantity_beyond_u32() {
            let err = QuoteItem::create(
                Money::from_cents(1),
                i64::from(u32::MAX) + 1,
                QuoteItemType::Part,
                None,
            )
            .unwrap_err();
            assert!(err.is_validation());
        }
    }

    mod from_raw {
        use super::*;

        #[test]
        fn parses_category() {
            let item = QuoteItem::from_raw(Money::from_cents(100), 1, "SERVICE", None).unwrap();
            assert_eq!(item.category(), QuoteItemType::Service);
        }

        #[test]
        fn category_must_match_wire_name_exactly() {
            for raw in ["part", "service", "", " PART "] {
                let err = QuoteItem::from_raw(Money::from_cents(100), 1, raw, None).unwrap_err();
                assert_eq!(
                    err,
                    DomainError::validation(format!("Invalid item type: {raw}"))
                );
            }
        }

        #[test]
        fn rejects_unknown_category() {
            let err = QuoteItem::from_raw(Money::from_cents(100), 1, "PAINT", None).unwrap_err();
            assert_eq!(err, DomainError::validation("Invalid item type: PAINT"));
        }

        #[test]
        fn quantity_reported_before_category() {
            let err = QuoteItem::from_raw(Money::from_cents(100), 0, "PAINT", None).unwrap_err();
            assert_eq!(err, DomainError::validation("Quantity must be greater than 0"));
        }
    }

    mod restore_and_revise {
        use super::*;

        #[test]
        fn restore_skips_validation() {
            let created = Timestamp::from_secs(1_770_372_000).unwrap();
            let item = QuoteItem::restore(
                QuoteItemId::new_v4(),
                Money::from_cents(-10),
                0,
                QuoteItemType::Part,
                None,
                Some(created),
                None,
            );

            assert_eq!(item.unit_price(), Money::from_cents(-10));
            assert_eq!(item.created_at(), created);
            assert!(item.updated_at().is_after(&created));
        }

        #[test]
        fn revise_preserves_identity() {
            let created = Timestamp::from_secs(1_770_372_000).unwrap();
            let original = QuoteItem::restore(
                QuoteItemId::new_v4(),
                Money::from_cents(100),
                1,
                QuoteItemType::Part,
                None,
                Some(created),
                Some(created),
            );

            let revised = original
                .revise(Money::from_cents(300), 2, QuoteItemType::Service, Some("x".into()))
                .unwrap();

            assert_eq!(revised.id(), original.id());
            assert_eq!(revised.created_at(), created);
            assert!(revised.updated_at().is_after(&created));
            assert_eq!(revised.line_total().unwrap(), Money::from_cents(600));
        }

        #[test]
        fn revise_raw_checks_quantity_before_category() {
            let original =
                QuoteItem::create(Money::from_cents(100), 1, QuoteItemType::Part, None).unwrap();

            let err = original
                .revise_raw(Money::from_cents(100), 0, "PAINT", None)
                .unwrap_err();
            assert_eq!(err, DomainError::validation("Quantity must be greater than 0"));

            let err = original
                .revise_raw(Money::from_cents(-5), 1, "PAINT", None)
                .unwrap_err();
            assert_eq!(
                err,
                DomainError::validation("Unit price must be greater than or equal to 0")
            );

            let err = original
                .revise_raw(Money::from_cents(100), 1, "PAINT", None)
                .unwrap_err();
            assert_eq!(err, DomainError::validation("Invalid item type: PAINT"));
        }

        #[test]
        fn revise_raw_keeps_identity() {
            let original =
                QuoteItem::create(Money::from_cents(100), 1, QuoteItemType::Part, None).unwrap();
            let revised = original
                .revise_raw(Money::from_cents(250), 2, "SERVICE", None)
                .unwrap();

            assert_eq!(revised.id(), original.id());
            assert_eq!(revised.category(), QuoteItemType::Service);
        }

        #[test]
        fn revise_validates() {
            let original =
                QuoteItem::create(Money::from_cents(100), 1, QuoteItemType::Part, None).unwrap();
            assert!(original
                .revise(Money::from_cents(100), 0, QuoteItemType::Part, None)
                .is_err());
        }
    }

    #[test]
    fn display_uses_label_and_brl() {
        let item = QuoteItem::create(Money::from_cents(123_456), 2, QuoteItemType::Part, None)
            .unwrap();
        assert_eq!(item.to_string(), "Peça 2 x R$ 1.234,56");
    }

    proptest! {
        #[test]
        fn line_total_is_price_times_quantity(
            cents in 0i64..1_000_000_000,
            quantity in 1i64..10_000,
            service in any::<bool>(),
        ) {
            let category = if service { QuoteItemType::Service } else { QuoteItemType::Part };
            let item = QuoteItem::create(Money::from_cents(cents), quantity, category, None).unwrap();
            prop_assert_eq!(item.line_total().unwrap().cents(), cents * quantity);
        }

        #[test]
        fn non_positive_quantity_always_fails(
            cents in 0i64..1_000_000,
            quantity in i64::MIN..=0,
        ) {
            let result = QuoteItem::create(Money::from_cents(cents), quantity, QuoteItemType::Part, None);
            prop_assert!(result.is_err());
        }
    }
}
