//! Shopping cart entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `cart_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartItem {
    pub cart_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub customer_id: DbId,
    pub created_at: Timestamp,
}

/// A live cart entry joined with its product and category.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct CartProduct {
    pub cart_id: DbId,
    pub product_name: String,
    pub product_description: String,
    pub category_name: String,
    pub product_price: Decimal,
    pub quantity: i32,
}

/// One product/quantity pair to add to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartLine {
    pub product_id: DbId,
    pub quantity: i32,
}
