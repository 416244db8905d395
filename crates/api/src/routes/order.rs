use axum::routing::post;
use axum::Router;

use crate::handlers::order;
use crate::state::AppState;

/// Routes mounted at `/customer/orders` (all require auth).
///
/// ```text
/// POST /checkout             -> checkout
/// POST /{order_id}/payment   -> pay
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(order::checkout))
        .route("/{order_id}/payment", post(order::pay))
}
