//! Canonical resource construction.
//!
//! The canonical resource is the encoded request path followed by `?` and the
//! non-empty query parameters sorted by key:
//!
//! ```text
//! /v3/openapi/apps/books/search?fetch_fields=title&query=config%3Dstart%3A0
//! ```

use std::collections::HashMap;

use crate::encoding::{encode_path, encode_query};

/// Query parameters of a request, keyed by name.
pub type ParameterMap = HashMap<String, String>;

/// Build the canonical resource string for `uri` and `params`.
///
/// The path is encoded with [`encode_path`] and its `/` separators are then
/// restored. Parameters are emitted in ascending key order as
/// `encode_query(key)=encode_query(value)` joined by `&`; parameters with an
/// empty value are left out. The `?` is always present.
///
/// # Examples
///
/// ```
/// use opensearch_auth::resource::{ParameterMap, canonicalize_resource};
///
/// let mut params = ParameterMap::new();
/// params.insert("b".to_owned(), "2".to_owned());
/// params.insert("a".to_owned(), "x y".to_owned());
/// params.insert("empty".to_owned(), String::new());
///
/// assert_eq!(canonicalize_resource("/apps/demo", &params), "/apps/demo?a=x%20y&b=2");
/// ```
#[must_use]
pub fn canonicalize_resource(uri: &str, params: &ParameterMap) -> String {
    let path = encode_path(uri).replace("%2F", "/");

    let mut keys: Vec<&String> = params.keys().collect();
    keys.sort_unstable();

    let query = keys
        .into_iter()
        .filter_map(|key| {
            params
                .get(key)
                .filter(|value| !value.is_empty())
                .map(|value| format!("{}={}", encode_query(key), encode_query(value)))
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{path}?{query}")
}
