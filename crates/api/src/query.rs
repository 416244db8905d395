//! Query-string types for list endpoints.
//!
//! Paging values stay raw strings here; [`PageRequest::parse`] applies the
//! defaults, clamping and error messages.
//!
//! [`PageRequest::parse`]: storefront_core::paging::PageRequest::parse

use serde::Deserialize;
use storefront_core::error::CoreError;
use storefront_core::paging::PageRequest;

/// `?page=&limit=`
#[derive(Debug, Default, Deserialize)]
pub struct PagingParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PagingParams {
    pub fn page_request(&self) -> Result<PageRequest, CoreError> {
        PageRequest::parse(self.limit.as_deref(), self.page.as_deref())
    }
}

/// `?page=&limit=&product_category=&search=`
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    #[serde(flatten)]
    pub paging: PagingParams,
    pub product_category: Option<String>,
    pub search: Option<String>,
}
