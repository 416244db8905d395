pub mod auth;
pub mod cart;
pub mod health;
pub mod order;
pub mod product;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/customers/register                  register (public)
/// /auth/customers/login                     login (public)
///
/// /products                                 catalog listing (public, cached)
///
/// /customer/cart                            list (cached), add items
/// /customer/cart/{id}                       remove item
/// /customer/orders/checkout                 checkout
/// /customer/orders/{order_id}/payment       record payment
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth/customers", auth::router())
        .nest("/products", product::router())
        .nest("/customer/cart", cart::router())
        .nest("/customer/orders", order::router())
}
