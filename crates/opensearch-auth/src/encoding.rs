//! URL escaping used when canonicalizing OPENSEARCH requests.
//!
//! The service signs percent-encoded paths and query components with a few
//! deviations from plain RFC 3986 escaping:
//!
//! - a literal `+` in a path is encoded as `%20`, not `%2B`
//! - `*` is always encoded as `%2A`
//! - `~` is always left literal
//! - spaces in query components are encoded as `%20`, never `+`
//!
//! Hex digits are uppercase. Non-ASCII input is encoded as its UTF-8 bytes.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped inside a path.
///
/// Unreserved characters stay literal, as do the sub-delimiters a path segment
/// may carry verbatim (`$ & + : = @`). `/ ; , ?` and everything else, `*`
/// included, are escaped.
const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Characters escaped inside a query key or value: everything except the
/// unreserved set.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a request path.
///
/// `/` is encoded like any other reserved character; callers that need the
/// separators back (see [`crate::resource::canonicalize_resource`]) restore
/// them afterwards.
///
/// # Examples
///
/// ```
/// use opensearch_auth::encoding::encode_path;
///
/// assert_eq!(encode_path("a+b*c~d"), "a%20b%2Ac~d");
/// assert_eq!(encode_path(""), "");
/// ```
#[must_use]
pub fn encode_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    utf8_percent_encode(path, PATH_ENCODE_SET)
        .to_string()
        .replace('+', "%20")
}

/// Percent-encode a query key or value.
///
/// # Examples
///
/// ```
/// use opensearch_auth::encoding::encode_query;
///
/// assert_eq!(encode_query("a b"), "a%20b");
/// assert_eq!(encode_query("a+b"), "a%2Bb");
/// ```
#[must_use]
pub fn encode_query(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    utf8_percent_encode(value, QUERY_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_apply_path_substitutions() {
        assert_eq!(encode_path("a+b*c~d"), "a%20b%2Ac~d");
    }

    #[test]
    fn test_should_return_empty_path_unchanged() {
        assert_eq!(encode_path(""), "");
    }

    #[test]
    fn test_should_escape_slashes_and_path_delimiters() {
        assert_eq!(
            encode_path("/v3/openapi/apps/my app/search"),
            "%2Fv3%2Fopenapi%2Fapps%2Fmy%20app%2Fsearch"
        );
        assert_eq!(encode_path("a;b,c?d"), "a%3Bb%2Cc%3Fd");
    }

    #[test]
    fn test_should_keep_path_sub_delimiters_literal() {
        assert_eq!(encode_path("a:b@c=d&e$f"), "a:b@c=d&e$f");
        assert_eq!(encode_path("x-y_z.w~"), "x-y_z.w~");
    }

    #[test]
    fn test_should_encode_non_ascii_path_as_utf8() {
        assert_eq!(encode_path("\u{4e2d}"), "%E4%B8%AD");
    }

    #[test]
    fn test_should_encode_space_in_query_as_percent_20() {
        assert_eq!(encode_query("a b"), "a%20b");
    }

    #[test]
    fn test_should_encode_reserved_query_characters() {
        assert_eq!(encode_query("a+b"), "a%2Bb");
        assert_eq!(
            encode_query("config=start:0,hit:3"),
            "config%3Dstart%3A0%2Chit%3A3"
        );
        assert_eq!(encode_query("&&/;"), "%26%26%2F%3B");
        assert_eq!(encode_query("x~y*"), "x~y%2A");
    }

    #[test]
    fn test_should_return_empty_query_unchanged() {
        assert_eq!(encode_query(""), "");
    }
}
