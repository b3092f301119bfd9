//! Page-based pagination for list endpoints.
//!
//! Callers send `page` (1-indexed) and `pageSize`. Out-of-range values are
//! coerced rather than rejected:
//!
//! - `page < 1` becomes 1
//! - `pageSize <= 0` becomes [`DEFAULT_PAGE_SIZE`]
//! - `pageSize > MAX_PAGE_SIZE` becomes [`MAX_PAGE_SIZE`]
//!
//! # Example
//!
//! ```ignore
//! let request = PageRequest::new(Some(3), Some(20));
//! assert_eq!(request.offset(), 40);
//!
//! let meta = request.meta(95);
//! assert_eq!(meta.total_pages, 5);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// A coerced page request. Always has `page >= 1` and `1 <= page_size <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let page_size = match page_size {
            Some(size) if size <= 0 => DEFAULT_PAGE_SIZE,
            Some(size) => size.min(MAX_PAGE_SIZE),
            None => DEFAULT_PAGE_SIZE,
        };

        Self { page, page_size }
    }

    #[must_use]
    pub fn page(&self) -> i64 {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Rows to skip. Saturates instead of overflowing on absurd page numbers.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn meta(&self, total: i64) -> PaginationMeta {
        let total_pages = if total == 0 {
            0
        } else {
            (total + self.page_size - 1) / self.page_size
        };

        PaginationMeta {
            total,
            page: self.page,
            page_size: self.page_size,
            total_pages,
            has_more: self.page < total_pages,
        }
    }
}

/// Metadata about a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: i64,
    /// Current page number (1-indexed)
    pub page: i64,
    /// Items per page after coercion
    pub page_size: i64,
    pub total_pages: i64,
    /// Whether there are pages after this one
    pub has_more: bool,
}
