use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use storefront_cache::CacheError;
use storefront_core::context::DeadlineExceeded;
use storefront_core::error::CoreError;
use storefront_db::paginator::PageFailure;
use storefront_db::workflows::WorkflowError;
use storefront_db::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the error type of every lower layer and implements [`IntoResponse`]
/// to produce `{ "error": message, "code": CODE }` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A paginated listing failed; carries how far it got.
    #[error(transparent)]
    Page(#[from] PageFailure),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Store(err.into())
    }
}

impl From<DeadlineExceeded> for AppError {
    fn from(err: DeadlineExceeded) -> Self {
        AppError::Store(err.into())
    }
}

type ErrorParts = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => core_parts(core),
            AppError::Store(err) => store_parts(err),
            AppError::Page(failure) => {
                tracing::warn!(
                    total = failure.info.total,
                    max_page = failure.info.max_page,
                    current_page = failure.info.current_page,
                    page_size = failure.info.page_size,
                    "Paginated query aborted"
                );
                store_parts(&failure.source)
            }
            AppError::Workflow(err) => match err {
                WorkflowError::EmptyOrder => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
                }
                WorkflowError::OrderNotFound(id) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("Order with id {id} not found"),
                ),
                WorkflowError::Store(err) => store_parts(err),
            },
            AppError::Cache(err) => match err {
                CacheError::Timeout => timeout_parts(),
                other => internal_parts("Cache error", other),
            },
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                errors.to_string(),
            ),
            AppError::InternalError(msg) => internal_parts("Internal error", msg),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn core_parts(err: &CoreError) -> ErrorParts {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Internal(msg) => internal_parts("Internal core error", msg),
    }
}

fn store_parts(err: &StoreError) -> ErrorParts {
    match err {
        StoreError::ReferentialIntegrity { constraint, .. } => (
            StatusCode::BAD_REQUEST,
            "REFERENTIAL_INTEGRITY",
            format!("Referenced record does not exist: {constraint}"),
        ),
        StoreError::Uniqueness { constraint, .. } => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
        ),
        StoreError::Timeout => timeout_parts(),
        StoreError::Storage(source) => internal_parts("Database error", source),
    }
}

fn timeout_parts() -> ErrorParts {
    (
        StatusCode::REQUEST_TIMEOUT,
        "REQUEST_TIMEOUT",
        "The request took too long to complete".to_string(),
    )
}

/// Log the detail, answer with a sanitized 500.
fn internal_parts(context: &'static str, detail: &dyn std::fmt::Display) -> ErrorParts {
    tracing::error!(error = %detail, "{context}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
