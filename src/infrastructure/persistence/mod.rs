//! # Persistence Layer
//!
//! Repository ports and adapters.
//!
//! ## Repository Traits (Ports)
//!
//! - [`QuoteRepository`]: Persistence for quote aggregates
//! - [`CustomerRepository`]: Customer existence lookup
//!
//! ## Implementations
//!
//! - `in_memory`: In-memory implementations
//!
//! ## Supporting Types
//!
//! - `query`: pagination and filters
//! - `record`: storage-shaped quote records

pub mod in_memory;
pub mod query;
pub mod record;
pub mod traits;

pub use query::{PaginatedResult, PaginationParams, QuoteFilters};
pub use record::{QuoteItemRecord, QuoteRecord};
pub use traits::{CustomerRepository, QuoteRepository, RepositoryError, RepositoryResult};
