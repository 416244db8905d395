//! Seed helpers shared by the database integration tests.

#![allow(dead_code)]

use std::time::Duration;

use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_core::context::{Locale, RequestContext};
use storefront_core::types::DbId;

pub fn ctx() -> RequestContext {
    RequestContext::with_timeout(Duration::from_secs(10), "db-test", Locale::En)
}

pub async fn seed_category(pool: &PgPool, name: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn seed_product(pool: &PgPool, category_id: DbId, name: &str, price: Decimal) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO products (name, description, category_id, price, stock)
         VALUES ($1, $2, $3, $4, 10) RETURNING id",
    )
    .bind(name)
    .bind(format!("{name} description"))
    .bind(category_id)
    .bind(price)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_customer(pool: &PgPool, email: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO customers
            (first_name, last_name, email, password_hash, address, phone_number)
         VALUES ('Ada', 'Lovelace', $1, 'not-a-real-hash', 'Jl. Merdeka 1', '081234567890')
         RETURNING customer_id",
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
