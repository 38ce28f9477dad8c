//! # Oficina Quotes
//!
//! Repair quote management for an auto repair shop.
//!
//! A quote (orçamento) collects parts and services for one customer,
//! keeps its totals consistent with its items, and moves through a small
//! lifecycle:
//!
//! ```text
//! DRAFT → SUBMITTED → GENERATING → READY
//!                          ↓  ↑
//!                         FAILED
//! ```
//!
//! Items and description may change while the quote is `DRAFT`,
//! `SUBMITTED` or `GENERATING`. A `READY` quote is frozen; further edits
//! go to a new revision created with [`Quote::clone_next_version`].
//!
//! ## Layers
//!
//! - [`domain`]: entities, value objects and the totals calculator
//! - [`application`]: the [`QuoteService`] use cases
//! - [`infrastructure`]: repository ports and in-memory adapters
//! - [`config`] and [`telemetry`]: settings and tracing setup
//!
//! ## Example
//!
//! ```
//! use oficina_quotes::domain::entities::{Quote, QuoteItem};
//! use oficina_quotes::domain::value_objects::{CustomerId, Money, QuoteItemType};
//!
//! let mut quote = Quote::create(CustomerId::new("c1"), None).unwrap();
//! let item = QuoteItem::create(Money::from_cents(15_000), 2, QuoteItemType::Part, None).unwrap();
//! quote.add_item(item).unwrap();
//!
//! assert_eq!(quote.total(), Money::from_cents(30_000));
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;

pub use application::{ApplicationError, ApplicationResult, QuoteService};
pub use domain::entities::{Quote, QuoteItem};
pub use domain::{DomainError, DomainResult};
