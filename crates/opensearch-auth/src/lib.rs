//! OPENSEARCH request signing and canonicalization.
//!
//! This crate produces the authentication material for requests to an
//! OPENSEARCH search service: the protocol header set (content metadata, date,
//! nonce) and an `Authorization` header carrying an HMAC-SHA1 signature over
//! a byte-exact canonical form of the request.
//!
//! # Usage
//!
//! ```rust
//! use opensearch_auth::{ParameterMap, RequestHeaders, StaticCredential, sign_headers};
//!
//! let credential = StaticCredential::new("LTAIexample", "secret");
//! let mut params = ParameterMap::new();
//! params.insert("query".to_owned(), "config=start:0,hit:10,format:fulljson&&query=apple".to_owned());
//!
//! let mut headers = RequestHeaders::with_defaults(Vec::<(String, String)>::new());
//! sign_headers("GET", "/v3/openapi/apps/books/search", &params, &mut headers, &credential);
//!
//! assert!(headers.get("Authorization").unwrap().starts_with("OPENSEARCH LTAIexample:"));
//! ```
//!
//! # Modules
//!
//! - [`credentials`] - Access-key credentials and the HMAC-SHA1 signer
//! - [`encoding`] - Path and query escaping rules
//! - [`error`] - Verification error types
//! - [`headers`] - Request headers and the canonical custom-header block
//! - [`resource`] - Canonical resource construction
//! - [`signature`] - String-to-sign, `Authorization` construction and verification

pub mod credentials;
pub mod encoding;
pub mod error;
pub mod headers;
pub mod resource;
pub mod signature;

pub use credentials::{Credential, Signer, StaticCredential};
pub use error::AuthError;
pub use headers::{CallerHeaders, CanonicalHeaders, RequestHeaders};
pub use resource::{ParameterMap, canonicalize_resource};
pub use signature::{build_authorization, sign_headers, verify_authorization};
