//! Row and input types for the storefront tables.
//!
//! Row structs derive `FromRow` + `Serialize`; `Create*` inputs are plain
//! structs filled by the API layer after validation.

pub mod cart;
pub mod customer;
pub mod order;
pub mod product;
