//! Customer accounts.

use serde::Serialize;
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `customers` table.
///
/// `password_hash` is never serialized to responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub customer_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub address: String,
    pub phone_number: String,
    pub created_at: Timestamp,
    pub created_by: String,
}

/// Input for registering a customer. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub phone_number: String,
}
