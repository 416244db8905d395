//! Checkout and payment for the authenticated customer.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_core::context::RequestContext;
use storefront_core::types::DbId;
use storefront_db::models::order::{CheckoutRequest, Order, OrderLine, Payment, PaymentRequest};
use storefront_db::workflows::{CheckoutWorkflow, PaymentWorkflow};
use validator::{Validate, ValidationError};

use crate::error::AppResult;
use crate::middleware::auth::AuthCustomer;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /customer/orders/checkout`.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutBody {
    #[validate(length(min = 1, message = "order must not be empty"), nested)]
    pub order: Vec<OrderLineInput>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct OrderLineInput {
    #[validate(range(min = 1, message = "product_id must be positive"))]
    pub product_id: DbId,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    #[validate(custom(function = "positive_amount"))]
    pub price: Decimal,
}

/// Request body for `POST /customer/orders/{order_id}/payment`.
#[derive(Debug, Deserialize, Validate)]
pub struct PaymentBody {
    #[validate(length(min = 1, message = "method is required"))]
    pub method: String,
    #[validate(custom(function = "positive_amount"))]
    pub amount: Decimal,
}

fn positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_positive() && !value.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("positive").with_message("must be greater than zero".into()))
    }
}

/// POST /api/v1/customer/orders/checkout
pub async fn checkout(
    State(state): State<AppState>,
    auth: AuthCustomer,
    ctx: RequestContext,
    Json(input): Json<CheckoutBody>,
) -> AppResult<(StatusCode, Json<DataResponse<Order>>)> {
    input.validate()?;

    let request = CheckoutRequest {
        customer_id: auth.customer_id,
        lines: input
            .order
            .iter()
            .map(|line| OrderLine {
                product_id: line.product_id,
                quantity: line.quantity,
                price: line.price,
            })
            .collect(),
    };
    let order = CheckoutWorkflow::checkout(&state.pool, &ctx, &request).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// POST /api/v1/customer/orders/{order_id}/payment
pub async fn pay(
    State(state): State<AppState>,
    _auth: AuthCustomer,
    ctx: RequestContext,
    Path(order_id): Path<DbId>,
    Json(input): Json<PaymentBody>,
) -> AppResult<(StatusCode, Json<DataResponse<Payment>>)> {
    input.validate()?;

    let request = PaymentRequest {
        order_id,
        method: input.method,
        amount: input.amount,
    };
    let payment = PaymentWorkflow::pay(&state.pool, &ctx, &request).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: payment })))
}
