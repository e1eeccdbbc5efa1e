//! OPENSEARCH request signing.
//!
//! The `Authorization` header has the format:
//!
//! ```text
//! OPENSEARCH <AccessKeyId>:<Signature>
//! ```
//!
//! Where `Signature = Base64(HMAC-SHA1(AccessKeySecret, StringToSign))` and:
//!
//! ```text
//! StringToSign = HTTP-Verb + "\n" +
//!                Content-MD5 + "\n" +
//!                Content-Type + "\n" +
//!                Date + "\n" +
//!                CanonicalizedOpensearchHeaders +
//!                CanonicalizedResource
//! ```

use subtle::ConstantTimeEq;
use tracing::debug;

use crate::credentials::Credential;
use crate::error::AuthError;
use crate::headers::{
    AUTHORIZATION, CONTENT_MD5, CONTENT_TYPE, CanonicalHeaders, DATE, RequestHeaders,
};
use crate::resource::{ParameterMap, canonicalize_resource};

/// Scheme name that prefixes every `Authorization` value.
pub const AUTH_SCHEME: &str = "OPENSEARCH";

/// Build the string to sign for a request.
#[must_use]
pub fn build_string_to_sign(
    method: &str,
    uri: &str,
    params: &ParameterMap,
    headers: &impl CanonicalHeaders,
) -> String {
    let content_md5 = headers.lookup_or_default(CONTENT_MD5, "");
    let content_type = headers.lookup_or_default(CONTENT_TYPE, "");
    let date = headers.lookup_or_default(DATE, "");
    let custom_headers = headers.canonicalize();
    let resource = canonicalize_resource(uri, params);

    format!("{method}\n{content_md5}\n{content_type}\n{date}\n{custom_headers}{resource}")
}

/// Compute the `Authorization` header value for a request.
///
/// The result is a pure function of the method, path, parameters, headers,
/// and credential; recomputing with identical inputs yields the same value.
#[must_use]
pub fn build_authorization(
    method: &str,
    uri: &str,
    params: &ParameterMap,
    headers: &impl CanonicalHeaders,
    credential: &dyn Credential,
) -> String {
    let string_to_sign = build_string_to_sign(method, uri, params, headers);

    debug!(
        access_key_id = %credential.key_id(),
        string_to_sign = ?string_to_sign,
        "Built OPENSEARCH string to sign"
    );

    format!(
        "{AUTH_SCHEME} {}:{}",
        credential.key_id(),
        credential.sign(&string_to_sign)
    )
}

/// Store an `Authorization` header unless the caller already supplied one.
pub fn sign_headers(
    method: &str,
    uri: &str,
    params: &ParameterMap,
    headers: &mut RequestHeaders,
    credential: &dyn Credential,
) {
    if headers.contains(AUTHORIZATION) {
        debug!("Authorization header supplied by caller, skipping signing");
        return;
    }
    let authorization = build_authorization(method, uri, params, &*headers, credential);
    headers.set(AUTHORIZATION, authorization);
}

/// Parse an `Authorization` value: `OPENSEARCH <keyId>:<signature>`.
///
/// # Errors
///
/// Returns [`AuthError::InvalidAuthHeader`] if the scheme is wrong or either
/// part is empty.
pub fn parse_authorization(header: &str) -> Result<(&str, &str), AuthError> {
    let rest = header
        .strip_prefix(AUTH_SCHEME)
        .and_then(|rest| rest.strip_prefix(' '))
        .ok_or(AuthError::InvalidAuthHeader)?;

    let (access_key_id, signature) = rest.split_once(':').ok_or(AuthError::InvalidAuthHeader)?;

    if access_key_id.is_empty() || signature.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok((access_key_id, signature))
}

/// Verify the `Authorization` header carried in `headers`.
///
/// # Errors
///
/// Returns an [`AuthError`] if the header is missing or malformed, the key id
/// does not match `credential`, or the signature does not match.
pub fn verify_authorization(
    method: &str,
    uri: &str,
    params: &ParameterMap,
    headers: &RequestHeaders,
    credential: &dyn Credential,
) -> Result<(), AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?;
    let (access_key_id, provided_signature) = parse_authorization(header)?;

    if access_key_id != credential.key_id() {
        return Err(AuthError::AccessKeyMismatch(access_key_id.to_owned()));
    }

    let expected_signature = credential.sign(&build_string_to_sign(method, uri, params, headers));

    if provided_signature
        .as_bytes()
        .ct_eq(expected_signature.as_bytes())
        .into()
    {
        debug!(access_key_id = %access_key_id, "OPENSEARCH verification succeeded");
        Ok(())
    } else {
        debug!(
            access_key_id = %access_key_id,
            provided = %provided_signature,
            "OPENSEARCH signature mismatch"
        );
        Err(AuthError::SignatureDoesNotMatch)
    }
}
