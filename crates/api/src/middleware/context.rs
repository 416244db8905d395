//! Per-request [`RequestContext`] extraction.
//!
//! - Deadline: now + `REQUEST_TIMEOUT_SECS`.
//! - Trace id: the `x-request-id` set by the request-id layer, else a fresh UUID.
//! - Locale: `?lang=`, then `Accept-Language`, else the default.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use serde::Deserialize;
use storefront_core::context::{Locale, RequestContext};

use crate::state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Default, Deserialize)]
struct LangParam {
    lang: Option<String>,
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let trace_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let lang = Query::<LangParam>::try_from_uri(&parts.uri)
            .map(|Query(p)| p.lang)
            .unwrap_or_default();
        let accept_language = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());
        let locale = Locale::negotiate(lang.as_deref(), accept_language);

        Ok(RequestContext::with_timeout(
            state.config.request_timeout(),
            trace_id,
            locale,
        ))
    }
}
