//! Repository for the `cart_items` table.

use sqlx::PgPool;
use storefront_core::filter::FilterValue;
use storefront_core::types::{DbId, SYSTEM_ACTOR};

use crate::dialect::Dialect;
use crate::models::cart::{CartItem, NewCartLine};
use crate::paginator::PageQuery;

const COLUMNS: &str = "cart_id, product_id, quantity, customer_id, created_at";

const LIST_COLUMNS: &str = "ci.cart_id, p.name AS product_name, \
                            p.description AS product_description, \
                            c.name AS category_name, p.price AS product_price, ci.quantity";

pub struct CartRepo;

impl CartRepo {
    /// Insert all lines for `customer_id` in one statement.
    ///
    /// Either every line is stored or none is; an unknown product fails the
    /// whole batch with SQLSTATE 23503.
    pub async fn insert_items(
        pool: &PgPool,
        customer_id: DbId,
        lines: &[NewCartLine],
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        let product_ids: Vec<DbId> = lines.iter().map(|l| l.product_id).collect();
        let quantities: Vec<i32> = lines.iter().map(|l| l.quantity).collect();

        let query = format!(
            "INSERT INTO cart_items (product_id, quantity, customer_id, created_by)
             SELECT t.product_id, t.quantity, $3, $4
             FROM UNNEST($1::BIGINT[], $2::INTEGER[]) AS t(product_id, quantity)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(&product_ids)
            .bind(&quantities)
            .bind(customer_id)
            .bind(SYSTEM_ACTOR)
            .fetch_all(pool)
            .await
    }

    /// Soft-delete one cart entry owned by `customer_id`.
    ///
    /// Returns `false` when no live entry with that id belongs to the customer.
    pub async fn soft_delete(
        pool: &PgPool,
        customer_id: DbId,
        cart_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cart_items SET deleted_at = NOW(), deleted_by = $3
             WHERE cart_id = $1 AND customer_id = $2 AND deleted_at IS NULL",
        )
        .bind(cart_id)
        .bind(customer_id)
        .bind(SYSTEM_ACTOR)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Listing query for one customer's live cart, newest first.
    pub fn list_query(dialect: Dialect, customer_id: DbId) -> (PageQuery, Vec<FilterValue>) {
        let from = format!(
            "FROM cart_items ci \
             JOIN products p ON p.id = ci.product_id \
             JOIN categories c ON c.id = p.category_id \
             WHERE ci.customer_id = {} AND ci.deleted_at IS NULL",
            dialect.placeholder(1)
        );
        let query = PageQuery::new(
            format!("SELECT {LIST_COLUMNS} {from}"),
            format!("SELECT COUNT(*) {from}"),
        )
        .order_by("ci.created_at DESC")
        .key_column("ci.cart_id");

        (query, vec![customer_id.into()])
    }
}
