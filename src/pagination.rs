//! Shared pagination contract for list endpoints
//!
//! Every list endpoint accepts `page` (default 1) and `limit`
//! (default 10) and responds with `{data, meta}` where `meta` carries
//! the total count irrespective of pagination.

use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Resolved page/limit pair. Values below 1 are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).max(1),
        }
    }

    // Saturates so an absurd client-supplied page cannot wrap into a
    // negative OFFSET.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn meta(&self, total: i64) -> PageMeta {
        PageMeta {
            total,
            page: self.page,
            limit: self.limit,
            total_pages: (total + self.limit - 1) / self.limit,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// List response envelope: the page of items plus pagination metadata
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>, page: Page, total: i64) -> Self {
        Self {
            data,
            meta: page.meta(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_page_one_limit_ten() {
        let page = Page::new(None, None);
        assert_eq!(page, Page { page: 1, limit: 10 });
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        assert_eq!(Page::new(Some(2), Some(10)).offset(), 10);
        assert_eq!(Page::new(Some(5), Some(25)).offset(), 100);
    }

    #[test]
    fn values_below_one_are_clamped() {
        let page = Page::new(Some(0), Some(-3));
        assert_eq!(page, Page { page: 1, limit: 1 });
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn offset_saturates_instead_of_overflowing() {
        let page = Page::new(Some(i64::MAX), Some(10));
        assert_eq!(page.offset(), i64::MAX);
        assert!(Page::new(Some(i64::MAX), Some(i64::MAX)).offset() > 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(Some(1), Some(10));
        assert_eq!(page.meta(0).total_pages, 0);
        assert_eq!(page.meta(10).total_pages, 1);
        assert_eq!(page.meta(11).total_pages, 2);
        assert_eq!(page.meta(95).total_pages, 10);
    }

    #[test]
    fn meta_serializes_camel_case() {
        let meta = Page::new(Some(2), Some(10)).meta(21);
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"total": 21, "page": 2, "limit": 10, "totalPages": 3})
        );
    }
}
