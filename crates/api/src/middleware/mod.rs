//! Request extractors.
//!
//! - [`auth::AuthCustomer`] -- the customer behind a Bearer token.
//! - [`context`] -- builds the per-request [`RequestContext`](storefront_core::context::RequestContext).

pub mod auth;
pub mod context;
