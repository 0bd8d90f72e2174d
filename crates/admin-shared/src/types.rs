//! Common types

use serde::{Deserialize, Serialize};

use crate::constants::PAGE_SIZE;

/// 1-indexed page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, per_page: PAGE_SIZE }
    }
}

impl Pagination {
    /// Page numbers below 1 are clamped to the first page.
    pub fn new(page: u64) -> Self {
        Self { page: page.max(1), per_page: PAGE_SIZE }
    }

    /// Inclusive row range `(from, to)` for the gateway's `Range` header.
    /// Saturates at `u64::MAX` for page numbers far past any real table.
    pub fn range(&self) -> (u64, u64) {
        let from = (self.page.max(1) - 1).saturating_mul(self.per_page);
        (from, from.saturating_add(self.per_page.saturating_sub(1)))
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        total.div_ceil(self.per_page)
    }
}

/// One page of results plus the exact total count
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page,
            per_page: pagination.per_page,
            total_pages: pagination.total_pages(total),
        }
    }
}
