//! Integration tests against a live OPENSEARCH service.
//!
//! These tests need a reachable service and a valid access key. They are
//! marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! OPENSEARCH_HOST=http://opensearch-cn-hangzhou.aliyuncs.com \
//! OPENSEARCH_APP_NAME=books \
//! OPENSEARCH_ACCESS_KEY_ID=... OPENSEARCH_ACCESS_KEY_SECRET=... \
//!   cargo test -p opensearch-integration -- --ignored
//! ```

use std::sync::Once;

use opensearch_client::{ClientConfig, SearchClient};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Client configuration taken from the environment.
#[must_use]
pub fn test_config() -> ClientConfig {
    init_tracing();
    ClientConfig::from_env()
}

/// Create a search client configured from the environment.
#[must_use]
pub fn search_client() -> SearchClient {
    let config = test_config();
    SearchClient::new(&config)
        .unwrap_or_else(|e| panic!("failed to create client for {}: {e}", config.host))
}

mod test_search;
