//! Search response model.
//!
//! Mirrors the JSON returned by the search API with `format:fulljson`.
//! Missing fields take their default value; fields of the wrong type are a
//! decode error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Status value of a successful search.
pub const STATUS_OK: &str = "OK";

/// Top-level search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    /// `OK` or `FAIL`.
    pub status: String,
    /// Service-assigned request id.
    pub request_id: String,
    /// Hits and counters.
    pub result: SearchResult,
    /// Errors reported by the service, if any.
    pub errors: Vec<SearchError>,
}

/// The `result` object of a [`SearchResponse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    /// Engine time spent on the search, in seconds.
    #[serde(rename = "searchtime")]
    pub search_time: f64,
    /// Total number of matching documents.
    pub total: u64,
    /// Number of items in this page.
    pub num: u64,
    /// Number of matches the engine allows paging through.
    #[serde(rename = "viewtotal")]
    pub view_total: u64,
    /// The hits.
    pub items: Vec<SearchItem>,
}

/// A single hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchItem {
    /// Projected document fields.
    pub fields: HashMap<String, String>,
    /// Values of the sort expressions for this hit.
    #[serde(rename = "sortExprValues")]
    pub sort_expr_values: Vec<String>,
}

/// An error entry in a [`SearchResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchError {
    /// Service error code.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
}

impl SearchResponse {
    /// Whether the service reported success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Serialize back to JSON for display.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (non-finite `searchtime`).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"status":"OK","request_id":"r1","result":{"searchtime":0.01,"total":1,"num":1,"viewtotal":1,"items":[{"fields":{"id":"1"},"sortExprValues":[]}]},"errors":[]}"#;

    #[test]
    fn test_should_decode_sample_response() {
        let response: SearchResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(response.status, "OK");
        assert!(response.is_ok());
        assert_eq!(response.request_id, "r1");
        assert!((response.result.search_time - 0.01).abs() < f64::EPSILON);
        assert_eq!(response.result.total, 1);
        assert_eq!(response.result.view_total, 1);
        assert_eq!(response.result.items[0].fields["id"], "1");
        assert!(response.result.items[0].sort_expr_values.is_empty());
        assert!(response.errors.is_empty());
    }

    #[test]
    fn test_should_decode_failure_response() {
        let body = r#"{"status":"FAIL","request_id":"r2","errors":[{"code":2001,"message":"app not found"}]}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(!response.is_ok());
        assert_eq!(
            response.errors,
            vec![SearchError {
                code: 2001,
                message: "app not found".to_owned()
            }]
        );
        assert!(response.result.items.is_empty());
    }

    #[test]
    fn test_should_reject_type_mismatch() {
        let body = r#"{"status":"OK","result":{"total":"many"}}"#;
        assert!(serde_json::from_str::<SearchResponse>(body).is_err());
    }

    #[test]
    fn test_should_reject_malformed_json() {
        assert!(serde_json::from_str::<SearchResponse>("{\"status\":").is_err());
    }

    #[test]
    fn test_should_render_wire_field_names() {
        let response: SearchResponse = serde_json::from_str(SAMPLE).unwrap();
        let json = response.to_json().unwrap();
        assert!(json.contains("\"searchtime\""));
        assert!(json.contains("\"viewtotal\""));
        assert!(json.contains("\"sortExprValues\""));
        assert!(json.contains("\"request_id\""));
    }
}
