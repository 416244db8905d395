//! Orders, order lines and payments.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `orders` table. `payment_id` is set once paid.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub total_price: Decimal,
    pub customer_id: DbId,
    pub payment_id: Option<DbId>,
    pub created_at: Timestamp,
    pub created_by: String,
}

/// A row from the `order_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderItem {
    pub order_item_id: DbId,
    pub order_id: DbId,
    pub product_id: DbId,
    pub price: Decimal,
    pub quantity: i32,
}

/// A row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub method: String,
    pub amount: Decimal,
    pub status: String,
    pub created_at: Timestamp,
}

/// One requested order line. The price is taken as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: DbId,
    pub quantity: i32,
    pub price: Decimal,
}

/// Checkout input: the buyer and the lines to record.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub customer_id: DbId,
    pub lines: Vec<OrderLine>,
}

/// Payment input for an existing order.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub order_id: DbId,
    pub method: String,
    pub amount: Decimal,
}

/// Status recorded on every accepted payment.
pub const PAYMENT_STATUS_SUCCESS: &str = "Success";
