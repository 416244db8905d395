use axum::routing::post;
use axum::Router;

use crate::handlers::customer;
use crate::state::AppState;

/// Routes mounted at `/auth/customers`.
///
/// ```text
/// POST /register -> register
/// POST /login    -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(customer::register))
        .route("/login", post(customer::login))
}
