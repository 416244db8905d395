//! Page requests and page-result envelopes for list endpoints.
//!
//! [`PageResult`] is both the HTTP payload of list endpoints and the value
//! stored in the cache, so its serialized field set is part of the contract:
//! `records`, `total`, `page_size`, `current_page`, `max_page`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Page size used when the caller does not supply one (or supplies `0`).
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a caller may request; larger values are clamped.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page used when the caller does not supply one (or supplies `0`).
pub const DEFAULT_PAGE: i64 = 1;

/// A validated page request: `page >= 1`, `1 <= page_size <= MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl PageRequest {
    /// Build a page request, rejecting out-of-range values.
    pub fn new(page: i64, page_size: i64) -> Result<Self, CoreError> {
        if page < 1 {
            return Err(CoreError::Validation(format!(
                "page must be at least 1, got {page}"
            )));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(CoreError::Validation(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }
        Ok(Self { page, page_size })
    }

    /// Parse raw `limit` / `page` query-string values.
    ///
    /// - Missing values fall back to the defaults.
    /// - `limit=0` means the default page size; anything above
    ///   [`MAX_PAGE_SIZE`] is clamped down.
    /// - `page=0` means the first page.
    /// - Negative or non-numeric values are rejected.
    pub fn parse(limit: Option<&str>, page: Option<&str>) -> Result<Self, CoreError> {
        let page_size = match parse_param("limit", limit)? {
            None | Some(0) => DEFAULT_PAGE_SIZE,
            Some(n) => n.min(MAX_PAGE_SIZE),
        };
        let page = match parse_param("page", page)? {
            None | Some(0) => DEFAULT_PAGE,
            Some(n) => n,
        };
        Self::new(page, page_size)
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn parse_param(name: &str, raw: Option<&str>) -> Result<Option<i64>, CoreError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let value: i64 = raw
        .parse()
        .map_err(|_| CoreError::Validation(format!("query param '{name}' is invalid")))?;
    if value < 0 {
        return Err(CoreError::Validation(format!(
            "query param '{name}' is invalid"
        )));
    }
    Ok(Some(value))
}

/// Number of pages needed for `total` rows, never less than 1.
pub fn max_page(total: i64, page_size: i64) -> i64 {
    if total <= 0 || page_size <= 0 {
        return 1;
    }
    // Ceiling division on non-negative integers.
    ((total + page_size - 1) / page_size).max(1)
}

/// Page metadata without records.
///
/// Returned on its own when a paginated query fails part-way, so callers can
/// log how far it got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total: i64,
    pub page_size: i64,
    pub current_page: i64,
    pub max_page: i64,
}

impl PageInfo {
    /// Metadata before the count query has run.
    pub fn pending(request: &PageRequest) -> Self {
        Self {
            total: 0,
            page_size: request.page_size(),
            current_page: request.page(),
            max_page: 0,
        }
    }

    /// Fill in `total` and derive `max_page`.
    pub fn with_total(self, total: i64) -> Self {
        Self {
            total,
            max_page: max_page(total, self.page_size),
            ..self
        }
    }
}

/// A bounded window of records plus paging metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub records: Vec<T>,
    pub total: i64,
    pub page_size: i64,
    pub current_page: i64,
    pub max_page: i64,
}

impl<T> PageResult<T> {
    pub fn new(info: PageInfo, records: Vec<T>) -> Self {
        Self {
            records,
            total: info.total,
            page_size: info.page_size,
            current_page: info.current_page,
            max_page: info.max_page,
        }
    }
}
