//! Public product catalog.

use axum::extract::{Query, State};
use axum::Json;
use storefront_cache::key::PRODUCT_PREFIX;
use storefront_cache::CacheKey;
use storefront_core::context::RequestContext;
use storefront_core::paging::{PageRequest, PageResult};
use storefront_db::models::product::{ProductFilter, ProductListItem};
use storefront_db::paginator::Paginator;
use storefront_db::repositories::ProductRepo;
use storefront_db::QueryPort;

use crate::error::{AppError, AppResult};
use crate::query::ProductListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/products
///
/// Served through the cache; all variants live under the `product` prefix.
pub async fn list_products(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(params): Query<ProductListParams>,
) -> AppResult<Json<DataResponse<PageResult<ProductListItem>>>> {
    let request = params.paging.page_request()?;
    let filter = ProductFilter {
        category: params.product_category,
        search: params.search,
    };
    let key = product_key(&request, &filter);

    let (query, args) = ProductRepo::list_query(state.store.dialect(), &filter);
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

pub fn product_key(request: &PageRequest, filter: &ProductFilter) -> CacheKey {
    CacheKey::builder(PRODUCT_PREFIX)
        .field("scope", "ALL")
        .field("page", request.page())
        .field("page_size", request.page_size())
        .field("product_category", filter.category.as_deref().unwrap_or_default())
        .field("search", filter.search.as_deref().unwrap_or_default())
        .build()
}
