//! Multi-statement writes that must be all-or-nothing.
//!
//! Each workflow opens one transaction, runs its steps in order under the
//! request deadline, and either commits or rolls back explicitly. The same
//! deadline is handed to PostgreSQL as the transaction's `statement_timeout`
//! and `lock_timeout`, so a statement stuck on a lock is cancelled server-side
//! too. A transaction abandoned at the deadline is dropped rather than rolled
//! back inline; sqlx queues its rollback for the connection's next use.

use std::time::Duration;

use sqlx::{PgPool, Postgres, Transaction};
use storefront_core::context::RequestContext;
use storefront_core::types::DbId;

use crate::error::StoreError;

pub mod checkout;
pub mod payment;

pub use checkout::CheckoutWorkflow;
pub use payment::PaymentWorkflow;

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Order must contain at least one line")]
    EmptyOrder,

    #[error("Order {0} not found")]
    OrderNotFound(DbId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<sqlx::Error> for WorkflowError {
    fn from(err: sqlx::Error) -> Self {
        WorkflowError::Store(err.into())
    }
}

/// Run the workflow body under the request deadline.
async fn run_bounded<F, T>(ctx: &RequestContext, body: F) -> Result<T, WorkflowError>
where
    F: std::future::Future<Output = Result<T, WorkflowError>>,
{
    match ctx.within(body).await {
        Ok(outcome) => outcome,
        Err(deadline) => Err(StoreError::from(deadline).into()),
    }
}

/// Upper bound on an explicit rollback after a non-deadline failure.
const ROLLBACK_GRACE: Duration = Duration::from_secs(2);

/// Open a transaction whose statements PostgreSQL cancels at the request deadline.
async fn begin_bounded(
    pool: &PgPool,
    ctx: &RequestContext,
) -> Result<Transaction<'static, Postgres>, WorkflowError> {
    run_bounded(ctx, async {
        let mut tx = pool.begin().await?;
        let budget = format!("{}ms", ctx.remaining().as_millis().max(1));
        sqlx::query(
            "SELECT set_config('statement_timeout', $1, true), set_config('lock_timeout', $1, true)",
        )
        .bind(&budget)
        .execute(&mut *tx)
        .await?;
        Ok(tx)
    })
    .await
}

/// Commit on success, roll back on failure.
///
/// On a deadline failure the transaction is dropped without waiting: the
/// connection may still be draining a cancelled statement. Any other failure
/// gets an explicit rollback bounded by [`ROLLBACK_GRACE`]. A failed rollback
/// is logged and the original error is returned.
async fn finish<T>(
    ctx: &RequestContext,
    tx: Transaction<'_, Postgres>,
    outcome: Result<T, WorkflowError>,
    workflow: &'static str,
) -> Result<T, WorkflowError> {
    match outcome {
        Ok(value) => {
            run_bounded(ctx, async { Ok(tx.commit().await?) }).await?;
            Ok(value)
        }
        Err(err @ WorkflowError::Store(StoreError::Timeout)) => {
            drop(tx);
            tracing::info!(workflow, trace_id = %ctx.trace_id(), "Transaction abandoned at deadline");
            Err(err)
        }
        Err(err) => {
            match tokio::time::timeout(ROLLBACK_GRACE, tx.rollback()).await {
                Ok(Ok(())) => {}
                Ok(Err(rollback_err)) => tracing::warn!(
                    workflow,
                    trace_id = %ctx.trace_id(),
                    error = %rollback_err,
                    "Rollback failed"
                ),
                Err(_) => tracing::warn!(workflow, trace_id = %ctx.trace_id(), "Rollback timed out"),
            }
            tracing::info!(workflow, trace_id = %ctx.trace_id(), error = %err, "Transaction rolled back");
            Err(err)
        }
    }
}
