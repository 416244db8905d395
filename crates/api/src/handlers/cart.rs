//! The authenticated customer's cart.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use storefront_cache::key::cart_prefix;
use storefront_cache::{CacheKey, NonFatal};
use storefront_core::context::RequestContext;
use storefront_core::error::CoreError;
use storefront_core::paging::{PageRequest, PageResult};
use storefront_core::types::DbId;
use storefront_db::models::cart::{CartItem, CartProduct, NewCartLine};
use storefront_db::paginator::{bounded, Paginator};
use storefront_db::repositories::CartRepo;
use storefront_db::QueryPort;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthCustomer;
use crate::query::PagingParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /customer/cart`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCartRequest {
    #[validate(length(min = 1, message = "cart_item must not be empty"), nested)]
    pub cart_item: Vec<CartLineInput>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CartLineInput {
    #[validate(range(min = 1, message = "product_id must be positive"))]
    pub product_id: DbId,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
}

/// POST /api/v1/customer/cart
pub async fn add_items(
    State(state): State<AppState>,
    auth: AuthCustomer,
    ctx: RequestContext,
    Json(input): Json<AddCartRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<CartItem>>>)> {
    input.validate()?;

    let lines: Vec<NewCartLine> = input
        .cart_item
        .iter()
        .map(|line| NewCartLine {
            product_id: line.product_id,
            quantity: line.quantity,
        })
        .collect();

    let items = bounded(
        &ctx,
        CartRepo::insert_items(&state.pool, auth.customer_id, &lines),
    )
    .await?;

    invalidate_cart(&state, &ctx, auth.customer_id).await;

    tracing::info!(customer_id = auth.customer_id, items = items.len(), "Cart items added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: items })))
}

/// GET /api/v1/customer/cart
pub async fn list_items(
    State(state): State<AppState>,
    auth: AuthCustomer,
    ctx: RequestContext,
    Query(params): Query<PagingParams>,
) -> AppResult<Json<DataResponse<PageResult<CartProduct>>>> {
    let request = params.page_request()?;
    let key = cart_key(auth.customer_id, &request);

    let (query, args) = CartRepo::list_query(state.store.dialect(), auth.customer_id);
    let store = &state.store;
    let ctx_ref = &ctx;

    let page = state
        .reader
        .fetch_or_compute(&ctx, &key, state.config.cache.ttl, || async move {
            Paginator::execute(store, ctx_ref, &request, &query, args)
                .await
                .map_err(AppError::from)
        })
        .await?;

    Ok(Json(DataResponse { data: page }))
}

/// DELETE /api/v1/customer/cart/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    auth: AuthCustomer,
    ctx: RequestContext,
    Path(cart_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = bounded(
        &ctx,
        CartRepo::soft_delete(&state.pool, auth.customer_id, cart_id),
    )
    .await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CartItem",
            id: cart_id,
        }));
    }

    invalidate_cart(&state, &ctx, auth.customer_id).await;
    Ok(StatusCode::NO_CONTENT)
}

pub fn cart_key(customer_id: DbId, request: &PageRequest) -> CacheKey {
    CacheKey::builder(cart_prefix(customer_id))
        .field("scope", "ALL")
        .field("page", request.page())
        .field("page_size", request.page_size())
        .build()
}

async fn invalidate_cart(state: &AppState, ctx: &RequestContext, customer_id: DbId) {
    let outcome = state
        .invalidator
        .invalidate(ctx, &[cart_prefix(customer_id)])
        .await;
    NonFatal::new("cart cache invalidation", outcome).log();
}
