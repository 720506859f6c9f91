use movify_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Page size used when a caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Zero-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    /// Creates a validated page request.
    pub fn new(page_number: u32, page_size: u32) -> AppResult<Self> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(AppError::Validation(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        Ok(Self {
            page_number,
            page_size,
        })
    }

    /// Returns the zero-based page number.
    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Returns the page size.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the number of rows to skip.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page_number) * i64::from(self.page_size)
    }

    /// Returns the row limit.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus the unpaged total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total number of matching items.
    pub total: u64,
    /// Zero-based page number.
    pub page_number: u32,
    /// Requested page size.
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Builds a page for `request`.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page_number: request.page_number(),
            page_size: request.page_size(),
        }
    }

    /// Maps page items, keeping paging metadata.
    #[must_use]
    pub fn map<U>(self, transform: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(transform).collect(),
            total: self.total,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest};

    #[test]
    fn page_size_bounds_are_enforced() {
        assert!(PageRequest::new(0, 0).is_err());
        assert!(PageRequest::new(0, MAX_PAGE_SIZE + 1).is_err());
        assert!(PageRequest::new(3, MAX_PAGE_SIZE).is_ok());
    }

    #[test]
    fn offset_is_page_times_size() {
        let request = PageRequest::new(2, 25).unwrap_or_else(|_| panic!("test"));
        assert_eq!(request.offset(), 50);
        assert_eq!(request.limit(), 25);
        assert_eq!(PageRequest::default().page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn map_keeps_metadata() {
        let request = PageRequest::new(1, 2).unwrap_or_else(|_| panic!("test"));
        let page = Page::new(vec![1, 2], 7, request).map(|value| value * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 7);
        assert_eq!(page.page_number, 1);
    }
}
