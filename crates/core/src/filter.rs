//! Positional filter arguments for raw list queries.
//!
//! List queries are written with positional placeholders, one per filter that
//! is actually present. Optional filters that the caller left blank must not
//! occupy a placeholder, so the argument list is normalized with
//! [`normalize_filters`] before binding.

use serde::{Deserialize, Serialize};

/// A single scalar filter argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Int(i64),
}

/// A homogeneous sequence filter argument (bound as a SQL array).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sequence {
    Text(Vec<String>),
    Int(Vec<i64>),
}

/// A filter argument: either a scalar or a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(Scalar),
    Sequence(Sequence),
}

impl Scalar {
    /// A scalar is empty when it holds the zero value of its type.
    pub fn is_empty(&self) -> bool {
        match self {
            Scalar::Text(s) => s.is_empty(),
            Scalar::Int(n) => *n == 0,
        }
    }
}

impl Sequence {
    pub fn len(&self) -> usize {
        match self {
            Sequence::Text(v) => v.len(),
            Sequence::Int(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FilterValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Scalar(s) => s.is_empty(),
            FilterValue::Sequence(s) => s.is_empty(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Scalar(Scalar::Text(value.to_string()))
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Scalar(Scalar::Text(value))
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Scalar(Scalar::Int(value))
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(value: Vec<String>) -> Self {
        FilterValue::Sequence(Sequence::Text(value))
    }
}

impl From<Vec<i64>> for FilterValue {
    fn from(value: Vec<i64>) -> Self {
        FilterValue::Sequence(Sequence::Int(value))
    }
}

/// Drop every empty argument, keeping the relative order of the rest.
///
/// # Examples
///
/// ```
/// use storefront_core::filter::{normalize_filters, FilterValue};
///
/// let args = vec![
///     FilterValue::from(""),
///     FilterValue::from("electronics"),
///     FilterValue::from(Vec::<String>::new()),
/// ];
/// assert_eq!(normalize_filters(args), vec![FilterValue::from("electronics")]);
/// ```
pub fn normalize_filters(args: Vec<FilterValue>) -> Vec<FilterValue> {
    args.into_iter().filter(|arg| !arg.is_empty()).collect()
}

/// Escape `%`, `_` and `\` so user input matches literally inside a `LIKE` pattern.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build a `%term%` substring pattern, or an empty string when `term` is blank
/// (so [`normalize_filters`] strips it rather than binding `%%`).
pub fn contains_pattern(term: &str) -> String {
    let term = term.trim();
    if term.is_empty() {
        String::new()
    } else {
        format!("%{}%", escape_like(term))
    }
}
