//! Shared harness for HTTP integration tests.
//!
//! Every test gets the production router over a fresh database and an
//! in-memory cache it can inspect.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use storefront_api::auth::jwt::{generate_access_token, JwtConfig};
use storefront_api::config::{CacheBackend, CacheConfig, ServerConfig};
use storefront_api::router::build_app_router;
use storefront_api::state::AppState;
use storefront_cache::MemoryCache;

pub const TEST_JWT_SECRET: &str = "storefront-integration-test-secret";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        database_url: "postgres://unused".to_string(),
        database_max_connections: 5,
        cache: CacheConfig {
            backend: CacheBackend::Memory,
            redis_url: String::new(),
            ttl: Duration::from_secs(3600),
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_cache(pool, MemoryCache::new())
}

/// Like [`build_test_app`], sharing `cache` with the caller.
pub fn build_test_app_with_cache(pool: PgPool, cache: MemoryCache) -> Router {
    build_app_router(AppState::new(pool, Arc::new(cache), test_config()))
}

pub fn bearer(customer_id: i64) -> String {
    let token = generate_access_token(customer_id, &test_config().jwt).unwrap();
    format!("Bearer {token}")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, auth: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(auth), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    auth: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(auth), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, auth: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(auth), None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

pub async fn seed_category(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// `price` is a decimal string such as `"10.00"`.
pub async fn seed_product(pool: &PgPool, category_id: i64, name: &str, price: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO products (name, description, category_id, price, stock)
         VALUES ($1, $2, $3, $4::NUMERIC, 25) RETURNING id",
    )
    .bind(name)
    .bind(format!("{name} description"))
    .bind(category_id)
    .bind(price)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_customer(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO customers
            (first_name, last_name, email, password_hash, address, phone_number)
         VALUES ('Budi', 'Santoso', $1, 'unused', 'Jl. Kenanga 3', '081298765432')
         RETURNING customer_id",
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
