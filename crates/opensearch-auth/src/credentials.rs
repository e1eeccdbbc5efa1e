//! Access-key credentials and the HMAC-SHA1 signer.
//!
//! A [`Credential`] pairs an access key id with its secret and signs arbitrary
//! text with `Base64(HMAC-SHA1(secret, text))`. [`StaticCredential`] is the
//! in-memory implementation used by the client.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, KeyInit, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Something that can produce an OPENSEARCH signature over text.
pub trait Signer: Send + Sync {
    /// Sign `text`, returning the base64-encoded digest.
    fn sign(&self, text: &str) -> String;
}

/// A long-lived access key used to authenticate requests.
///
/// Implementations are read-only after construction, so one credential may be
/// shared across concurrent requests.
pub trait Credential: Signer {
    /// The public access key id.
    fn key_id(&self) -> &str;

    /// The secret used as the HMAC key.
    fn key_secret(&self) -> &str;
}

/// An access key id and secret held in memory.
///
/// # Examples
///
/// ```
/// use opensearch_auth::credentials::{Credential, Signer, StaticCredential};
///
/// let credential = StaticCredential::new("LTAIexample", "secret");
/// assert_eq!(credential.key_id(), "LTAIexample");
/// assert_eq!(credential.sign("text"), credential.sign("text"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredential {
    access_key_id: String,
    access_key_secret: String,
}

impl StaticCredential {
    /// Create a credential from an access key id and secret.
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
        }
    }
}

impl fmt::Debug for StaticCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredential")
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"***")
            .finish()
    }
}

impl Signer for StaticCredential {
    fn sign(&self, text: &str) -> String {
        hmac_sha1_base64(&self.access_key_secret, text)
    }
}

impl Credential for StaticCredential {
    fn key_id(&self) -> &str {
        &self.access_key_id
    }

    fn key_secret(&self) -> &str {
        &self.access_key_secret
    }
}

/// Compute `Base64(HMAC-SHA1(secret, text))` with standard padded base64.
#[must_use]
pub fn hmac_sha1_base64(secret: &str, text: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC can accept any key length");
    mac.update(text.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_match_rfc2202_hmac_sha1_vector() {
        assert_eq!(
            hmac_sha1_base64("Jefe", "what do ya want for nothing?"),
            "7/zfauXrL6LSdBbV8YTfnCWafHk="
        );
    }

    #[test]
    fn test_should_sign_empty_text() {
        assert_eq!(hmac_sha1_base64("secret", ""), "Ja9hdKD87MTTRmgKcrfOZEuaiOg=");
    }

    #[test]
    fn test_should_sign_with_credential_secret() {
        let credential = StaticCredential::new("Jefe-id", "Jefe");
        assert_eq!(
            credential.sign("what do ya want for nothing?"),
            "7/zfauXrL6LSdBbV8YTfnCWafHk="
        );
        assert_eq!(credential.key_id(), "Jefe-id");
        assert_eq!(credential.key_secret(), "Jefe");
    }

    #[test]
    fn test_should_redact_secret_in_debug_output() {
        let credential = StaticCredential::new("AKID", "super-secret");
        let debug = format!("{credential:?}");
        assert!(debug.contains("AKID"));
        assert!(!debug.contains("super-secret"));
    }
}
