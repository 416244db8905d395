//! Explicit "log and continue" policy for cache side effects.
//!
//! Cache writes and invalidations must never fail the request that triggered
//! them. Wrapping the result in [`NonFatal`] makes that decision visible at
//! the call site and routes the failure to the log instead of the error path.

use std::fmt::Display;

#[must_use = "call .log() to report the failure"]
pub struct NonFatal<E> {
    operation: &'static str,
    outcome: Result<(), E>,
}

impl<E: Display> NonFatal<E> {
    pub fn new<T>(operation: &'static str, result: Result<T, E>) -> Self {
        Self {
            operation,
            outcome: result.map(|_| ()),
        }
    }

    /// Log a failure at `warn`. Returns whether the operation succeeded.
    pub fn log(self) -> bool {
        match self.outcome {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(operation = self.operation, error = %err, "Non-fatal cache failure");
                false
            }
        }
    }
}
