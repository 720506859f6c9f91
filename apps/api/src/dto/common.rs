use movify_core::AppResult;
use movify_domain::{DEFAULT_PAGE_SIZE, Page, PageRequest};
use serde::{Deserialize, Serialize};

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ready: bool,
    pub postgres: HealthDependencyStatus,
}

/// One runtime dependency health status.
#[derive(Debug, Serialize)]
pub struct HealthDependencyStatus {
    pub status: &'static str,
    pub detail: Option<String>,
}

/// Zero-based paging parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageQuery {
    pub fn into_request(self) -> AppResult<PageRequest> {
        PageRequest::new(
            self.page_number.unwrap_or_default(),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

/// One page of results.
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page_number: u32,
    pub page_size: u32,
}

impl<T, S> From<Page<S>> for PageResponse<T>
where
    T: From<S>,
{
    fn from(page: Page<S>) -> Self {
        Self {
            items: page.items.into_iter().map(T::from).collect(),
            total: page.total,
            page_number: page.page_number,
            page_size: page.page_size,
        }
    }
}
