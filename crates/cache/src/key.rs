//! Deterministic cache keys.
//!
//! A key is `{prefix}:{name=value|name=value|...}` with the fields in the
//! order the caller adds them. Callers always add the same fields in the same
//! order for one collection, so equal queries map to equal keys. Reserved
//! characters inside values are percent-escaped so distinct values never
//! collapse into the same key.

use std::fmt;
use std::time::Duration;

use storefront_core::types::DbId;

/// Prefix of cached product listing pages.
pub const PRODUCT_PREFIX: &str = "product";

/// Default lifetime of a cached page.
pub const DEFAULT_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Prefix of one customer's cached cart pages.
pub fn cart_prefix(customer_id: DbId) -> String {
    format!("cart:{customer_id}")
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn builder(prefix: impl Into<String>) -> CacheKeyBuilder {
        CacheKeyBuilder {
            key: prefix.into(),
            fields: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct CacheKeyBuilder {
    key: String,
    fields: usize,
}

impl CacheKeyBuilder {
    pub fn field(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.key.push(if self.fields == 0 { ':' } else { '|' });
        self.key.push_str(name);
        self.key.push('=');
        escape_into(&mut self.key, &value.to_string());
        self.fields += 1;
        self
    }

    pub fn build(self) -> CacheKey {
        CacheKey(self.key)
    }
}

fn escape_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '%' => out.push_str("%25"),
            '|' => out.push_str("%7C"),
            '=' => out.push_str("%3D"),
            ':' => out.push_str("%3A"),
            _ => out.push(c),
        }
    }
}
