//! Repository layer.
//!
//! Each repository is a zero-sized struct. Single-statement operations take
//! `&PgPool`; steps that must run inside a caller's transaction take
//! `&mut PgConnection`. List endpoints get a [`PageQuery`](crate::paginator::PageQuery)
//! plus its filter arguments instead of running the query themselves.

pub mod cart_repo;
pub mod customer_repo;
pub mod order_repo;
pub mod product_repo;

pub use cart_repo::CartRepo;
pub use customer_repo::CustomerRepo;
pub use order_repo::OrderRepo;
pub use product_repo::ProductRepo;
