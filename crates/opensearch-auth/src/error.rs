//! Error types for OPENSEARCH authorization.
//!
//! Producing a signature never fails; [`AuthError`] only arises when an
//! existing `Authorization` header is checked against a credential.

/// Errors that can occur while verifying an OPENSEARCH `Authorization` header.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The `Authorization` header is missing from the header map.
    #[error("Missing Authorization header")]
    MissingAuthHeader,

    /// The `Authorization` header is not of the form `OPENSEARCH <keyId>:<signature>`.
    #[error("Invalid Authorization header format")]
    InvalidAuthHeader,

    /// The key id in the header does not belong to the verifying credential.
    #[error("Access key mismatch: {0}")]
    AccessKeyMismatch(String),

    /// The computed signature does not match the provided signature.
    #[error("Signature does not match")]
    SignatureDoesNotMatch,
}
