//! Search requests and their translation into query parameters.
//!
//! The search API packs several clauses into a single `query` parameter,
//! joined by `&&` in a fixed order:
//!
//! ```text
//! config=start:0,hit:10,format:fulljson&&query=title:'apple'&&sort=-price;+date&&filter=price>10&&kvpairs=k:v
//! ```
//!
//! `config` and `query` are always present; `sort`, `filter` and `kvpairs`
//! only when set. Field projection travels separately as `fetch_fields`.

use std::fmt;

use opensearch_auth::encoding::encode_query;
use opensearch_auth::{CallerHeaders, ParameterMap};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Separator between clauses of the `query` parameter.
const CLAUSE_SEPARATOR: &str = "&&";

/// Anything that can be sent as a search: extra headers plus query parameters.
pub trait SearchQuery {
    /// Caller-supplied headers. Protocol headers are added by the client.
    fn headers(&self) -> CallerHeaders {
        CallerHeaders::new()
    }

    /// Query parameters, before encoding.
    fn params(&self) -> ParameterMap;
}

impl SearchQuery for ParameterMap {
    fn params(&self) -> ParameterMap {
        self.clone()
    }
}

/// Sort direction of a [`SortField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Ascending, rendered with a `+` prefix.
    Increase,
    /// Descending, rendered with a `-` prefix.
    #[default]
    Decrease,
}

impl SortOrder {
    /// Parse a sort token. `ASC`, `asc`, `INCREASE` and `increase` are
    /// ascending; every other token is descending.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token {
            "ASC" | "asc" | "INCREASE" | "increase" => Self::Increase,
            _ => Self::Decrease,
        }
    }

    /// Prefix used in the `sort` clause.
    #[must_use]
    pub fn prefix(self) -> char {
        match self {
            Self::Increase => '+',
            Self::Decrease => '-',
        }
    }

    /// Canonical token for this order.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "INCREASE",
            Self::Decrease => "DECREASE",
        }
    }
}

impl From<&str> for SortOrder {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of a multi-field sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Field name.
    pub field: String,
    /// Sort direction.
    pub order: SortOrder,
}

impl SortField {
    /// Create a sort field.
    pub fn new(field: impl Into<String>, order: impl Into<SortOrder>) -> Self {
        Self {
            field: field.into(),
            order: order.into(),
        }
    }

    /// Ascending sort on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Increase)
    }

    /// Descending sort on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Decrease)
    }

    fn clause_term(&self) -> String {
        format!("{}{}", self.order.prefix(), self.field)
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.order)
    }
}

/// A structured search request.
///
/// # Examples
///
/// ```
/// use opensearch_client::request::{SearchQuery, SearchRequest, SortField};
///
/// let request = SearchRequest::builder()
///     .query("title:'apple'")
///     .hits(3)
///     .sort_fields(vec![SortField::desc("price"), SortField::asc("date")])
///     .build();
///
/// assert_eq!(
///     request.params()["query"],
///     "config=start:0,hit:3,format:fulljson&&query=title:'apple'&&sort=-price;+date"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(default)]
pub struct SearchRequest {
    /// Fields to return for each hit; empty returns the service default.
    #[builder(default)]
    pub fetch_fields: Vec<String>,

    /// Offset of the first hit.
    #[builder(default)]
    pub start: u32,

    /// Number of hits to return.
    #[builder(default)]
    pub hits: u32,

    /// Raw `kvpairs` clause text.
    #[builder(default, setter(into))]
    pub kvpairs: String,

    /// Raw `query` clause text.
    #[builder(default, setter(into))]
    pub query: String,

    /// Raw `filter` clause text.
    #[builder(default, setter(into))]
    pub filter: String,

    /// Sort fields, applied in the given order.
    #[builder(default)]
    pub sort_fields: Vec<SortField>,
}

impl SearchRequest {
    /// Build the packed `query` parameter value.
    #[must_use]
    pub fn query_clauses(&self) -> String {
        [
            Some(self.config_clause()),
            Some(format!("query={}", self.query)),
            self.sort_clause(),
            non_empty_clause("filter", &self.filter),
            non_empty_clause("kvpairs", &self.kvpairs),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(CLAUSE_SEPARATOR)
    }

    fn config_clause(&self) -> String {
        format!(
            "config=start:{},hit:{},format:fulljson",
            self.start, self.hits
        )
    }

    fn sort_clause(&self) -> Option<String> {
        if self.sort_fields.is_empty() {
            return None;
        }
        let terms: Vec<String> = self.sort_fields.iter().map(SortField::clause_term).collect();
        Some(format!("sort={}", terms.join(";")))
    }
}

impl SearchQuery for SearchRequest {
    fn params(&self) -> ParameterMap {
        let mut params = ParameterMap::new();
        params.insert("query".to_owned(), self.query_clauses());
        if !self.fetch_fields.is_empty() {
            params.insert("fetch_fields".to_owned(), self.fetch_fields.join(";"));
        }
        params
    }
}

fn non_empty_clause(name: &str, value: &str) -> Option<String> {
    (!value.is_empty()).then(|| format!("{name}={value}"))
}

/// Build the query string sent on the wire.
///
/// Every parameter is included, empty values too, as
/// `encode_query(key)=encode_query(value)` joined by `&`. Pairs are emitted in
/// key order so the URL is reproducible; the service itself does not care.
#[must_use]
pub fn build_query_string(params: &ParameterMap) -> String {
    let mut pairs: Vec<(&String, &String)> = params.iter().collect();
    pairs.sort_unstable();

    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", encode_query(k), encode_query(v)))
        .collect::<Vec<_>>()
        .join("&")
}
