//! Order checkout: one order row plus its lines, atomically.

use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_core::context::RequestContext;

use super::{begin_bounded, finish, run_bounded, WorkflowError};
use crate::models::order::{CheckoutRequest, Order, OrderLine};
use crate::repositories::OrderRepo;

pub struct CheckoutWorkflow;

impl CheckoutWorkflow {
    /// Record an order and all of its lines in one transaction.
    ///
    /// Prices are taken from the request as given. An unknown product fails
    /// the line insert with [`StoreError::ReferentialIntegrity`] and leaves no
    /// order behind.
    ///
    /// [`StoreError::ReferentialIntegrity`]: crate::error::StoreError::ReferentialIntegrity
    pub async fn checkout(
        pool: &PgPool,
        ctx: &RequestContext,
        request: &CheckoutRequest,
    ) -> Result<Order, WorkflowError> {
        if request.lines.is_empty() {
            return Err(WorkflowError::EmptyOrder);
        }
        let total = order_total(&request.lines);

        let mut tx = begin_bounded(pool, ctx).await?;

        let outcome = run_bounded(ctx, async {
            let order = OrderRepo::insert_order(&mut *tx, request.customer_id, total).await?;
            OrderRepo::insert_items(&mut *tx, order.id, &request.lines).await?;
            Ok(order)
        })
        .await;

        let order = finish(ctx, tx, outcome, "checkout").await?;

        tracing::info!(
            order_id = order.id,
            customer_id = order.customer_id,
            total_price = %order.total_price,
            lines = request.lines.len(),
            trace_id = %ctx.trace_id(),
            "Order checked out"
        );
        Ok(order)
    }
}

/// Sum of the submitted line prices.
pub fn order_total(lines: &[OrderLine]) -> Decimal {
    lines.iter().map(|line| line.price).sum()
}
