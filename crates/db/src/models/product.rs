//! Catalog listing rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::DbId;

/// A product joined with its category name, as returned by the listing.
///
/// Also deserialized back out of the cache, hence `Deserialize`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ProductListItem {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub category_id: DbId,
    pub category_name: String,
    pub price: Decimal,
    pub stock: i32,
}

/// Optional filters for the product listing. Blank values mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Substring of the category name (case-insensitive).
    pub category: Option<String>,
    /// Substring of the product name (case-insensitive).
    pub search: Option<String>,
}
