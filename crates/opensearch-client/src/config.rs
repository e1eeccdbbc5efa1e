//! Client configuration.
//!
//! Provides [`ClientConfig`] for configuring a [`crate::SearchClient`].
//! Configuration values can be loaded from environment variables.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Default size of a pooled response buffer (1 MiB).
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024 * 1024;

/// Search client configuration.
///
/// # Examples
///
/// ```
/// use opensearch_client::config::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .host("http://opensearch-cn-hangzhou.aliyuncs.com".into())
///     .app_name("books".into())
///     .access_key_id("LTAIexample".into())
///     .access_key_secret("secret".into())
///     .build();
/// assert_eq!(config.timeout_secs, 10);
/// ```
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Scheme and authority of the service, e.g. `"http://127.0.0.1:8080"`.
    #[builder(default = String::from("http://127.0.0.1:8080"))]
    pub host: String,

    /// Application name used in the search path.
    #[builder(default)]
    pub app_name: String,

    /// Access key id.
    #[builder(default)]
    pub access_key_id: String,

    /// Access key secret. Never serialized.
    #[builder(default)]
    #[serde(skip_serializing)]
    pub access_key_secret: String,

    /// Per-request timeout in seconds; `0` disables the timeout.
    #[builder(default = 10)]
    pub timeout_secs: u64,

    /// Initial capacity of pooled response buffers, in bytes.
    #[builder(default = DEFAULT_BUFFER_CAPACITY)]
    pub buffer_capacity: usize,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: String::from("http://127.0.0.1:8080"),
            app_name: String::new(),
            access_key_id: String::new(),
            access_key_secret: String::new(),
            timeout_secs: 10,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            log_level: String::from("info"),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("app_name", &self.app_name)
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"***")
            .field("timeout_secs", &self.timeout_secs)
            .field("buffer_capacity", &self.buffer_capacity)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `OPENSEARCH_HOST` | `http://127.0.0.1:8080` |
    /// | `OPENSEARCH_APP_NAME` | *(empty)* |
    /// | `OPENSEARCH_ACCESS_KEY_ID` | *(empty)* |
    /// | `OPENSEARCH_ACCESS_KEY_SECRET` | *(empty)* |
    /// | `OPENSEARCH_TIMEOUT_SECS` | `10` |
    /// | `OPENSEARCH_BUFFER_CAPACITY` | `1048576` |
    /// | `LOG_LEVEL` | `info` |
    ///
    /// # Examples
    ///
    /// ```
    /// use opensearch_client::config::ClientConfig;
    ///
    /// let config = ClientConfig::from_env();
    /// assert!(!config.host.is_empty());
    /// ```
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("OPENSEARCH_HOST") {
            config.host = v;
        }
        if let Ok(v) = std::env::var("OPENSEARCH_APP_NAME") {
            config.app_name = v;
        }
        if let Ok(v) = std::env::var("OPENSEARCH_ACCESS_KEY_ID") {
            config.access_key_id = v;
        }
        if let Ok(v) = std::env::var("OPENSEARCH_ACCESS_KEY_SECRET") {
            config.access_key_secret = v;
        }
        if let Ok(v) = std::env::var("OPENSEARCH_TIMEOUT_SECS") {
            if let Ok(n) = v.parse::<u64>() {
                config.timeout_secs = n;
            }
        }
        if let Ok(v) = std::env::var("OPENSEARCH_BUFFER_CAPACITY") {
            if let Ok(n) = v.parse::<usize>() {
                config.buffer_capacity = n;
            }
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// The request timeout, or `None` when disabled.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "http://127.0.0.1:8080");
        assert!(config.app_name.is_empty());
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.buffer_capacity, 1024 * 1024);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_should_load_from_env() {
        let config = ClientConfig::from_env();
        assert!(!config.host.is_empty());
    }

    #[test]
    fn test_should_build_with_typed_builder() {
        let config = ClientConfig::builder()
            .host("http://search.example.com".into())
            .app_name("books".into())
            .access_key_id("id".into())
            .access_key_secret("secret".into())
            .timeout_secs(0)
            .buffer_capacity(4096)
            .log_level("debug".into())
            .build();

        assert_eq!(config.host, "http://search.example.com");
        assert_eq!(config.app_name, "books");
        assert_eq!(config.access_key_id, "id");
        assert_eq!(config.access_key_secret, "secret");
        assert_eq!(config.timeout(), None);
        assert_eq!(config.buffer_capacity, 4096);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_should_convert_timeout_to_duration() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_should_not_leak_secret() {
        let config = ClientConfig::builder()
            .access_key_secret("super-secret".into())
            .build();

        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));

        let json = serde_json::to_string(&config).expect("test serialization");
        assert!(!json.contains("super-secret"));
        assert!(!json.contains("accessKeySecret"));
        assert!(json.contains("\"appName\""));
    }
}
