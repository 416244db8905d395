//! Payment recording: insert a payment and link it to its order, atomically.

use sqlx::PgPool;
use storefront_core::context::RequestContext;

use super::{begin_bounded, finish, run_bounded, WorkflowError};
use crate::models::order::{Payment, PaymentRequest, PAYMENT_STATUS_SUCCESS};
use crate::repositories::OrderRepo;

pub struct PaymentWorkflow;

impl PaymentWorkflow {
    /// Record a confirmed payment and point the order at it.
    ///
    /// The amount is not compared with the order total, and an order that is
    /// already paid gets its link overwritten. An order id that matches no
    /// live order rolls back the payment insert.
    pub async fn pay(
        pool: &PgPool,
        ctx: &RequestContext,
        request: &PaymentRequest,
    ) -> Result<Payment, WorkflowError> {
        let mut tx = begin_bounded(pool, ctx).await?;

        let outcome = run_bounded(ctx, async {
            let payment = OrderRepo::insert_payment(
                &mut *tx,
                &request.method,
                request.amount,
                PAYMENT_STATUS_SUCCESS,
            )
            .await?;
            if !OrderRepo::link_payment(&mut *tx, request.order_id, payment.id).await? {
                return Err(WorkflowError::OrderNotFound(request.order_id));
            }
            Ok(payment)
        })
        .await;

        let payment = finish(ctx, tx, outcome, "payment").await?;

        tracing::info!(
            order_id = request.order_id,
            payment_id = payment.id,
            method = %payment.method,
            amount = %payment.amount,
            trace_id = %ctx.trace_id(),
            "Payment recorded"
        );
        Ok(payment)
    }
}
