//! # In-Memory Repositories
//!
//! In-memory implementations for tests and for embedders without a
//! database.
//!
//! ## Available Repositories
//!
//! - [`InMemoryQuoteRepository`]: Quote persistence
//! - [`InMemoryCustomerRepository`]: Customer existence lookup
//!
//! ## Thread Safety
//!
//! Both implementations share their state through `Arc<tokio::sync::RwLock<_>>`;
//! clones see the same data.

pub mod customer_repository;
pub mod quote_repository;

pub use customer_repository::InMemoryCustomerRepository;
pub use quote_repository::InMemoryQuoteRepository;
