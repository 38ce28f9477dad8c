//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`QuoteId`], [`QuoteItemId`]: UUID-based identifiers
//! - [`CustomerId`]: Opaque string reference to a customer
//!
//! ## Numeric Types
//!
//! - [`Money`]: Integer-cent currency amount with checked arithmetic
//!
//! ## Arithmetic
//!
//! - [`ArithmeticError`]: Error type for arithmetic failures
//! - [`CheckedArithmetic`]: Trait for safe arithmetic operations
//!
//! ## Domain Enums
//!
//! - [`QuoteItemType`]: Part or service
//! - [`QuoteStatus`]: Quote lifecycle states

pub mod arithmetic;
pub mod enums;
pub mod ids;
pub mod money;
pub mod quote_status;
pub mod timestamp;

pub use arithmetic::{ArithmeticError, ArithmeticResult, CheckedArithmetic};
pub use enums::{ParseEnumError, QuoteItemType};
pub use ids::{CustomerId, QuoteId, QuoteItemId};
pub use money::Money;
pub use quote_status::QuoteStatus;
pub use timestamp::Timestamp;
