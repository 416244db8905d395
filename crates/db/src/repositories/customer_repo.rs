//! Repository for the `customers` table.

use sqlx::PgPool;
use storefront_core::types::SYSTEM_ACTOR;

use crate::models::customer::{CreateCustomer, Customer};

const COLUMNS: &str = "customer_id, first_name, last_name, email, password_hash, \
                       address, phone_number, created_at, created_by";

pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a new customer, returning the created row.
    ///
    /// A duplicate email fails with SQLSTATE 23505 on `uq_customers_email`.
    pub async fn create(pool: &PgPool, input: &CreateCustomer) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers
                (first_name, last_name, email, password_hash, address, phone_number, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.address)
            .bind(&input.phone_number)
            .bind(SYSTEM_ACTOR)
            .fetch_one(pool)
            .await
    }

    /// Find a live customer by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Customer>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM customers WHERE email = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Customer>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
