//! # Query Types
//!
//! Pagination and filtering parameters for repository list operations.
//!
//! # Examples
//!
//! ```
//! use oficina_quotes::infrastructure::persistence::query::{paginate, PaginationParams};
//!
//! let page = paginate((1..=25).collect::<Vec<_>>(), PaginationParams::new(3, 10));
//! assert_eq!(page.data, vec![21, 22, 23, 24, 25]);
//! assert_eq!(page.total_pages, 3);
//! ```

use crate::domain::entities::Quote;
use crate::domain::value_objects::{CustomerId, QuoteStatus, Timestamp};
use serde::{Deserialize, Serialize};

/// Default page number.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// One-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number, starting at 1.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
}

impl PaginationParams {
    /// Creates pagination parameters. Zero values fall back to the defaults.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            per_page: if per_page == 0 { DEFAULT_PER_PAGE } else { per_page },
        }
    }

    /// Returns a copy with `per_page` capped at `max`.
    #[must_use]
    pub fn clamped(self, max: u32) -> Self {
        Self {
            per_page: self.per_page.min(max.max(1)),
            ..self
        }
    }

    /// Returns the number of items skipped before this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        let page = usize::try_from(self.page.saturating_sub(1)).unwrap_or(usize::MAX);
        page.saturating_mul(self.limit())
    }

    /// Returns the page size as a `usize`.
    #[must_use]
    pub fn limit(&self) -> usize {
        usize::try_from(self.per_page).unwrap_or(usize::MAX)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    /// Items on this page.
    pub data: Vec<T>,
    /// Number of matching items across all pages.
    pub total: u64,
    /// Page number.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
    /// `ceil(total / per_page)`.
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    /// Returns true if a later page exists.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }
}

/// Slices an already ordered collection into one page.
#[must_use]
pub fn paginate<T>(items: Vec<T>, params: PaginationParams) -> PaginatedResult<T> {
    let total = items.len() as u64;
    let per_page = u64::from(params.per_page.max(1));
    let data = items
        .into_iter()
        .skip(params.offset())
        .take(params.limit())
        .collect();

    PaginatedResult {
        data,
        total,
        page: params.page,
        per_page: params.per_page,
        total_pages: total.div_ceil(per_page),
    }
}

/// Optional constraints for listing quotes.
///
/// Absent fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFilters {
    /// Only quotes for this customer.
    pub customer_id: Option<CustomerId>,
    /// Only quotes in this status.
    pub status: Option<QuoteStatus>,
    /// Only quotes created at or after this time.
    pub start_date: Option<Timestamp>,
    /// Only quotes created at or before this time.
    pub end_date: Option<Timestamp>,
}

impl QuoteFilters {
    /// Returns filters that match everything.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Restricts to a customer.
    #[must_use]
    pub fn with_customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    /// Restricts to a status.
    #[must_use]
    pub fn with_status(mut self, status: QuoteStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to a creation window (inclusive on both ends).
    #[must_use]
    pub fn created_between(mut self, start: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Returns true if `quote` satisfies every present filter.
    #[must_use]
    pub fn matches(&self, quote: &Quote) -> bool {
        self.customer_id
            .as_ref()
            .is_none_or(|c| quote.customer_id() == c)
            && self.status.is_none_or(|s| quote.status() == s)
            && self.start_date.is_none_or(|d| quote.created_at() >= d)
            && self.end_date.is_none_or(|d| quote.created_at() <= d)
    }
}
