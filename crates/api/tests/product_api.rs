//! Product listing over HTTP, including the cache-aside path.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, build_test_app_with_cache, get, seed_category, seed_product};
use sqlx::PgPool;
use storefront_cache::MemoryCache;

async fn seed_catalog(pool: &PgPool) {
    let kitchen = seed_category(pool, "Kitchen").await;
    let garden = seed_category(pool, "Garden").await;
    seed_product(pool, kitchen, "Electric Kettle", "25.00").await;
    seed_product(pool, kitchen, "Stovetop Kettle", "18.50").await;
    seed_product(pool, kitchen, "Chef Knife", "40.00").await;
    seed_product(pool, garden, "Garden Hose", "15.00").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn lists_with_category_and_search_filters(pool: PgPool) {
    seed_catalog(&pool).await;

    let response = get(
        build_test_app(pool),
        "/api/v1/products?product_category=kitch&search=kettle&limit=1&page=2",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = &body_json(response).await["data"];
    assert_eq!(page["total"], 2);
    assert_eq!(page["page_size"], 1);
    assert_eq!(page["current_page"], 2);
    assert_eq!(page["max_page"], 2);
    let records = page["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["category_name"], "Kitchen");
    assert!(records[0]["name"].as_str().unwrap().contains("Kettle"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn defaults_apply_without_paging_params(pool: PgPool) {
    seed_catalog(&pool).await;

    let response = get(build_test_app(pool), "/api/v1/products").await;

    let page = &body_json(response).await["data"];
    assert_eq!(page["total"], 4);
    assert_eq!(page["page_size"], 10);
    assert_eq!(page["current_page"], 1);
    assert_eq!(page["max_page"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_numeric_limit_is_rejected(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/products?limit=ten").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "query param 'limit' is invalid");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_is_served_from_cache_until_expiry(pool: PgPool) {
    seed_catalog(&pool).await;
    let cache = MemoryCache::new();
    let app = build_test_app_with_cache(pool.clone(), cache.clone());

    let first = body_json(get(app.clone(), "/api/v1/products").await).await;
    assert_eq!(first["data"]["total"], 4);

    let keys = cache.keys().await;
    assert_eq!(keys.len(), 1);
    assert!(keys[0].starts_with("product:"));

    // Product writes do not invalidate; the cached page stays until its TTL.
    let garden: i64 = sqlx::query_scalar("SELECT id FROM categories WHERE name = 'Garden'")
        .fetch_one(&pool)
        .await
        .unwrap();
    seed_product(&pool, garden, "Rake", "9.00").await;

    let second = body_json(get(app, "/api/v1/products").await).await;
    assert_eq!(second, first);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn distinct_filters_use_distinct_cache_entries(pool: PgPool) {
    seed_catalog(&pool).await;
    let cache = MemoryCache::new();
    let app = build_test_app_with_cache(pool, cache.clone());

    get(app.clone(), "/api/v1/products?search=kettle").await;
    get(app.clone(), "/api/v1/products?search=knife").await;
    get(app, "/api/v1/products?search=kettle&page=2").await;

    assert_eq!(cache.keys().await.len(), 3);
}
