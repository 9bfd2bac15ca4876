//! Pagination types shared by repositories and list endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default page number when the client does not send one (1-indexed).
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size.
pub const DEFAULT_LIMIT: i64 = 10;

/// Maximum page size accepted from clients.
pub const MAX_LIMIT: i64 = 100;

/// A single page of results plus the total number of pages available.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_pages: self.total_pages,
        }
    }
}

/// Pagination query parameters, 1-indexed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PageRequest {
    #[validate(range(min = 1, message = "page deve ser maior ou igual a 1"))]
    pub page: Option<i64>,

    #[validate(range(min = 1, max = 100, message = "limit deve estar entre 1 e 100"))]
    pub limit: Option<i64>,
}

impl PageRequest {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }

    /// SQL OFFSET for the requested page.
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: None,
            limit: None,
        }
    }
}

/// Total page count for a row count and page size.
pub fn total_pages(total_rows: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total_rows + limit - 1) / limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_page_one_limit_ten() {
        let req = PageRequest::default();
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), 10);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_offset_is_one_indexed() {
        let req = PageRequest {
            page: Some(3),
            limit: Some(20),
        };
        assert_eq!(req.offset(), 40);
    }

    #[test]
    fn test_limit_is_capped() {
        let req = PageRequest {
            page: None,
            limit: Some(1000),
        };
        assert_eq!(req.limit(), MAX_LIMIT);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn test_page_map_preserves_total() {
        let page = Page {
            items: vec![1, 2, 3],
            total_pages: 7,
        };
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.items, vec!["1", "2", "3"]);
        assert_eq!(mapped.total_pages, 7);
    }
}
