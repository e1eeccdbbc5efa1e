//! Request headers and the canonical custom-header block.
//!
//! Every signed request carries four protocol headers, injected when the
//! caller did not supply them:
//!
//! | Header | Default |
//! |--------|---------|
//! | `Content-MD5` | empty |
//! | `Content-Type` | `application/json` |
//! | `Date` | current UTC time, `YYYY-MM-DDTHH:MM:SSZ` |
//! | `X-Opensearch-Nonce` | 100 ms ticks since the epoch followed by six random digits |
//!
//! Headers whose name starts with `X-Opensearch-` (case-insensitively) are
//! custom headers and take part in the signature through [`CanonicalHeaders::canonicalize`].

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

/// A plain header map as supplied by callers.
pub type CallerHeaders = HashMap<String, String>;

/// `Content-MD5` header name.
pub const CONTENT_MD5: &str = "Content-MD5";
/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// `Date` header name.
pub const DATE: &str = "Date";
/// `Authorization` header name.
pub const AUTHORIZATION: &str = "Authorization";
/// Nonce header name.
pub const NONCE: &str = "X-Opensearch-Nonce";
/// Prefix that marks a header as part of the canonical header block.
pub const CUSTOM_HEADER_PREFIX: &str = "X-Opensearch-";
/// Content type sent when the caller supplies none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

const NONCE_MIN: u32 = 100_000;
const NONCE_MAX: u32 = 999_999;

/// Read access to headers plus the canonical custom-header block.
pub trait CanonicalHeaders {
    /// Return the value for `key` when present and non-empty, otherwise `default`.
    fn lookup_or_default<'a>(&'a self, key: &str, default: &'a str) -> &'a str;

    /// Build the canonical custom-header block.
    ///
    /// Each header whose trimmed name starts with `X-Opensearch-` (ignoring
    /// case) and whose trimmed value is non-empty is emitted as
    /// `lowercase(name):value\n`, ordered by the lowercased name. Returns an
    /// empty string when no header qualifies.
    fn canonicalize(&self) -> String;
}

/// The header set of one outgoing request.
///
/// Backed by a `BTreeMap`; canonicalization still re-sorts the selected keys
/// after trimming, so the storage order never leaks into the signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    inner: BTreeMap<String, String>,
}

impl RequestHeaders {
    /// Create an empty header set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the caller's headers and inject the protocol defaults where absent.
    ///
    /// `Date` and `X-Opensearch-Nonce` are generated from the current time.
    pub fn with_defaults<I, K, V>(caller: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut headers: Self = caller
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        headers.insert_defaults(Utc::now(), generate_nonce);
        headers
    }

    /// Like [`RequestHeaders::with_defaults`], with a fixed clock and nonce.
    pub fn with_defaults_at<I, K, V>(caller: I, now: DateTime<Utc>, nonce: &str) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut headers: Self = caller
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        headers.insert_defaults(now, || nonce.to_owned());
        headers
    }

    fn insert_defaults(&mut self, now: DateTime<Utc>, nonce: impl FnOnce() -> String) {
        self.set_if_absent(CONTENT_MD5, String::new);
        self.set_if_absent(CONTENT_TYPE, || DEFAULT_CONTENT_TYPE.to_owned());
        self.set_if_absent(DATE, || format_date(now));
        self.set_if_absent(NONCE, nonce);
    }

    fn set_if_absent(&mut self, key: &str, value: impl FnOnce() -> String) {
        if !self.inner.contains_key(key) {
            self.inner.insert(key.to_owned(), value());
        }
    }

    /// Insert or overwrite a header.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Get a header value by exact name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    /// Whether a header with this exact name is present (even if empty).
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the header set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Convert into a plain [`CallerHeaders`].
    #[must_use]
    pub fn into_map(self) -> CallerHeaders {
        self.inner.into_iter().collect()
    }
}

impl FromIterator<(String, String)> for RequestHeaders {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl CanonicalHeaders for RequestHeaders {
    fn lookup_or_default<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.inner.get(key) {
            Some(value) if !value.is_empty() => value.as_str(),
            _ => default,
        }
    }

    fn canonicalize(&self) -> String {
        // Keyed on the lowercased name: header case does not survive the wire.
        let custom: BTreeMap<String, &str> = self
            .inner
            .iter()
            .map(|(k, v)| (k.trim(), v.trim()))
            .filter(|(k, v)| is_custom_header(k) && !v.is_empty())
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();

        let mut result = String::new();
        for (name, value) in custom {
            result.push_str(&name);
            result.push(':');
            result.push_str(value);
            result.push('\n');
        }
        result
    }
}

/// Whether `name` carries the `X-Opensearch-` prefix, ignoring ASCII case.
#[must_use]
pub fn is_custom_header(name: &str) -> bool {
    name.get(..CUSTOM_HEADER_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(CUSTOM_HEADER_PREFIX))
}

/// Format a timestamp the way the `Date` header expects: `2006-01-02T15:04:05Z`.
#[must_use]
pub fn format_date(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Build a nonce from a timestamp and a six-digit suffix.
///
/// The leading part is the number of 100 ms ticks since the Unix epoch.
#[must_use]
pub fn nonce_at(now: DateTime<Utc>, suffix: u32) -> String {
    format!("{}{suffix}", now.timestamp_millis() / 100)
}

/// Generate a fresh nonce from the current time and the thread-local RNG.
#[must_use]
pub fn generate_nonce() -> String {
    nonce_at(Utc::now(), rand::random_range(NONCE_MIN..=NONCE_MAX))
}
