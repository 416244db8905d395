//! Customer registration and login.

use std::sync::LazyLock;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use regex::Regex;
use serde::{Deserialize, Serialize};
use storefront_core::context::RequestContext;
use storefront_core::error::CoreError;
use storefront_db::models::customer::{CreateCustomer, Customer};
use storefront_db::paginator::bounded;
use storefront_db::repositories::CustomerRepo;
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{12}$").expect("phone number pattern is valid"));

/// Request body for `POST /auth/customers/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    #[validate(email(message = "email is not a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(regex(path = *PHONE_NUMBER, message = "phone_number must be exactly 12 digits"))]
    pub phone_number: String,
}

/// Request body for `POST /auth/customers/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email is not a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// POST /api/v1/auth/customers/register
pub async fn register(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Customer>>)> {
    input.validate()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateCustomer {
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        password_hash,
        address: input.address,
        phone_number: input.phone_number,
    };
    let customer = bounded(&ctx, CustomerRepo::create(&state.pool, &create)).await?;

    tracing::info!(customer_id = customer.customer_id, trace_id = %ctx.trace_id(), "Customer registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: customer })))
}

/// POST /api/v1/auth/customers/login
pub async fn login(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    input.validate()?;

    let customer = bounded(&ctx, CustomerRepo::find_by_email(&state.pool, &input.email))
        .await?
        .ok_or_else(invalid_credentials)?;

    let valid = verify_password(&input.password, &customer.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        return Err(invalid_credentials());
    }

    let access_token = generate_access_token(customer.customer_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(DataResponse {
        data: LoginResponse {
            access_token,
            expires_in: state.config.jwt.expires_in_secs(),
        },
    }))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}
