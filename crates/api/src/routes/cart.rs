use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::cart;
use crate::state::AppState;

/// Routes mounted at `/customer/cart` (all require auth).
///
/// ```text
/// GET    /      -> list_items
/// POST   /      -> add_items
/// DELETE /{id}  -> delete_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::list_items).post(cart::add_items))
        .route("/{id}", delete(cart::delete_item))
}
