//! Storefront domain primitives.
//!
//! Nothing in this crate touches a database, a cache or the network. The
//! `db`, `cache` and `api` crates build on these types.

pub mod context;
pub mod error;
pub mod filter;
pub mod paging;
pub mod types;
