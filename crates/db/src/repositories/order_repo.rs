//! Statements behind the checkout and payment workflows.
//!
//! Every method takes a connection so the workflow can run them inside one
//! transaction.

use rust_decimal::Decimal;
use sqlx::PgConnection;
use storefront_core::types::{DbId, SYSTEM_ACTOR};

use crate::models::order::{Order, OrderItem, OrderLine, Payment};

const ORDER_COLUMNS: &str = "id, total_price, customer_id, payment_id, created_at, created_by";

const ITEM_COLUMNS: &str = "order_item_id, order_id, product_id, price, quantity";

const PAYMENT_COLUMNS: &str = "id, method, amount, status, created_at";

pub struct OrderRepo;

impl OrderRepo {
    pub async fn insert_order(
        conn: &mut PgConnection,
        customer_id: DbId,
        total_price: Decimal,
    ) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders (total_price, customer_id, created_by)
             VALUES ($1, $2, $3)
             RETURNING {ORDER_COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(total_price)
            .bind(customer_id)
            .bind(SYSTEM_ACTOR)
            .fetch_one(conn)
            .await
    }

    /// Batch-insert all lines of `order_id` in one statement.
    pub async fn insert_items(
        conn: &mut PgConnection,
        order_id: DbId,
        lines: &[OrderLine],
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        let product_ids: Vec<DbId> = lines.iter().map(|l| l.product_id).collect();
        let prices: Vec<Decimal> = lines.iter().map(|l| l.price).collect();
        let quantities: Vec<i32> = lines.iter().map(|l| l.quantity).collect();

        let query = format!(
            "INSERT INTO order_items (order_id, product_id, price, quantity, created_by)
             SELECT $1, t.product_id, t.price, t.quantity, $5
             FROM UNNEST($2::BIGINT[], $3::NUMERIC[], $4::INTEGER[])
                  AS t(product_id, price, quantity)
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(order_id)
            .bind(&product_ids)
            .bind(&prices)
            .bind(&quantities)
            .bind(SYSTEM_ACTOR)
            .fetch_all(conn)
            .await
    }

    pub async fn insert_payment(
        conn: &mut PgConnection,
        method: &str,
        amount: Decimal,
        status: &str,
    ) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (method, amount, status, created_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {PAYMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(method)
            .bind(amount)
            .bind(status)
            .bind(SYSTEM_ACTOR)
            .fetch_one(conn)
            .await
    }

    /// Point a live order at `payment_id`, overwriting any earlier link.
    ///
    /// Returns `false` when no live order has that id.
    pub async fn link_payment(
        conn: &mut PgConnection,
        order_id: DbId,
        payment_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE orders SET payment_id = $2, updated_at = NOW(), updated_by = $3
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(order_id)
        .bind(payment_id)
        .bind(SYSTEM_ACTOR)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
