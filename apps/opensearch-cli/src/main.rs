//! opensearch-search - run a single signed search and print the response.
//!
//! # Usage
//!
//! ```text
//! OPENSEARCH_ACCESS_KEY_ID=... OPENSEARCH_ACCESS_KEY_SECRET=... \
//!   opensearch-search --app books --hits 5 --sort price:desc "title:'apple'"
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OPENSEARCH_HOST` | `http://127.0.0.1:8080` | Service endpoint |
//! | `OPENSEARCH_APP_NAME` | *(empty)* | Application to search |
//! | `OPENSEARCH_ACCESS_KEY_ID` | *(empty)* | Access key id |
//! | `OPENSEARCH_ACCESS_KEY_SECRET` | *(empty)* | Access key secret |
//! | `OPENSEARCH_TIMEOUT_SECS` | `10` | Request timeout, `0` disables it |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use anyhow::{Context, Result};
use clap::Parser;
use opensearch_client::{ClientConfig, SearchClient, SearchRequest, SortField, SortOrder};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Run a signed search against an OPENSEARCH application.
#[derive(Debug, Parser)]
#[command(name = "opensearch-search", version)]
#[command(
    after_help = "Examples:\n  opensearch-search --app books \"title:'apple'\"\n  opensearch-search --app books --hits 20 --sort price:desc --sort date:asc \"default:'rust'\"\n"
)]
struct Cli {
    /// Query clause text, e.g. `title:'apple'`
    query: String,

    /// Application name
    #[arg(long, env = "OPENSEARCH_APP_NAME")]
    app: Option<String>,

    /// Service endpoint, e.g. http://opensearch-cn-hangzhou.aliyuncs.com
    #[arg(long, env = "OPENSEARCH_HOST")]
    host: Option<String>,

    /// Offset of the first hit
    #[arg(long, default_value_t = 0)]
    start: u32,

    /// Number of hits to return
    #[arg(long, default_value_t = 10)]
    hits: u32,

    /// Filter clause text, e.g. `price>10`
    #[arg(long, default_value = "")]
    filter: String,

    /// Raw kvpairs clause text
    #[arg(long, default_value = "")]
    kvpairs: String,

    /// Sort field as `field:order` (order `asc` or `desc`); repeatable
    #[arg(long = "sort", value_name = "FIELD:ORDER", value_parser = parse_sort_field)]
    sort: Vec<SortField>,

    /// Field to return for each hit; repeatable
    #[arg(long = "fetch-field", value_name = "FIELD")]
    fetch_fields: Vec<String>,
}

impl Cli {
    fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(host) = &self.host {
            config.host.clone_from(host);
        }
        if let Some(app) = &self.app {
            config.app_name.clone_from(app);
        }
        config
    }

    fn request(&self) -> SearchRequest {
        SearchRequest::builder()
            .query(self.query.as_str())
            .start(self.start)
            .hits(self.hits)
            .filter(self.filter.as_str())
            .kvpairs(self.kvpairs.as_str())
            .sort_fields(self.sort.clone())
            .fetch_fields(self.fetch_fields.clone())
            .build()
    }
}

/// Parse `field:order`; a bare `field` sorts descending.
fn parse_sort_field(value: &str) -> Result<SortField, String> {
    let (field, order) = match value.split_once(':') {
        Some((field, order)) => (field, SortOrder::parse(order)),
        None => (value, SortOrder::default()),
    };
    if field.is_empty() {
        return Err(format!("missing field name in sort `{value}`"));
    }
    Ok(SortField::new(field, order))
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();

    init_tracing(&config.log_level)?;

    if config.app_name.is_empty() {
        anyhow::bail!("no application given: pass --app or set OPENSEARCH_APP_NAME");
    }
    if config.access_key_id.is_empty() {
        warn!("OPENSEARCH_ACCESS_KEY_ID is not set, the service will reject the request");
    }

    info!(host = %config.host, app_name = %config.app_name, "starting search");

    let client = SearchClient::new(&config).context("failed to create search client")?;
    let response = client
        .search(&cli.request())
        .await
        .with_context(|| format!("search against {} failed", config.host))?;

    if !response.is_ok() {
        warn!(status = %response.status, errors = response.errors.len(), "service reported failure");
    }

    println!("{}", response.to_json().context("failed to render response")?);
    Ok(())
}
