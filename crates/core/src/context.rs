//! Request-scoped call context.
//!
//! Every store or cache round-trip made on behalf of a request runs through
//! [`RequestContext::within`], which enforces the request deadline. The
//! context is passed explicitly by reference; nothing request-scoped is kept
//! in shared state.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Locales the storefront can answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    En,
    #[default]
    Id,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Id => "id",
        }
    }

    /// Parse an exact locale tag (`"en"`, `"id"`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "en" => Some(Locale::En),
            "id" => Some(Locale::Id),
            _ => None,
        }
    }

    /// Pick a locale from the `lang` query parameter, then the
    /// `Accept-Language` header, falling back to the default.
    ///
    /// Both sources must name a supported locale exactly.
    pub fn negotiate(query_lang: Option<&str>, accept_language: Option<&str>) -> Self {
        query_lang
            .and_then(Self::from_tag)
            .or_else(|| accept_language.and_then(Self::from_tag))
            .unwrap_or_default()
    }
}

/// The request deadline elapsed before an operation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("request deadline exceeded")]
pub struct DeadlineExceeded;

/// Deadline, trace id and locale for a single inbound request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    deadline: Instant,
    trace_id: String,
    locale: Locale,
}

impl RequestContext {
    pub fn new(deadline: Instant, trace_id: impl Into<String>, locale: Locale) -> Self {
        Self {
            deadline,
            trace_id: trace_id.into(),
            locale,
        }
    }

    /// Context whose deadline is `timeout` from now.
    pub fn with_timeout(timeout: Duration, trace_id: impl Into<String>, locale: Locale) -> Self {
        Self::new(Instant::now() + timeout, trace_id, locale)
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Run `fut` until it completes or the deadline passes, whichever is first.
    ///
    /// On timeout the future is dropped, which cancels the in-flight call.
    pub async fn within<F, T>(&self, fut: F) -> Result<T, DeadlineExceeded>
    where
        F: Future<Output = T>,
    {
        tokio::time::timeout_at(self.deadline, fut)
            .await
            .map_err(|_| DeadlineExceeded)
    }
}
