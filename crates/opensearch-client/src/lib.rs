//! Signed search client for the OPENSEARCH HTTP API.
//!
//! [`SearchClient`] turns a [`SearchRequest`] (or any [`SearchQuery`]) into a
//! signed `GET /v3/openapi/apps/{app}/search` request, sends it through a
//! [`Transport`], and decodes the JSON body into a [`SearchResponse`].
//! Signing itself lives in [`opensearch_auth`].
//!
//! # Usage
//!
//! ```no_run
//! use opensearch_client::{ClientConfig, SearchClient, SearchRequest};
//!
//! # async fn run() -> Result<(), opensearch_client::ClientError> {
//! let client = SearchClient::new(&ClientConfig::from_env())?;
//! let request = SearchRequest::builder().query("title:'apple'").hits(10).build();
//! let response = client.search(&request).await?;
//! println!("{} hits", response.result.num);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`client`] - The search client and request preparation
//! - [`config`] - Client configuration
//! - [`error`] - Client error types
//! - [`pool`] - Reusable response buffers
//! - [`request`] - Search request model and query packing
//! - [`response`] - Search response model
//! - [`transport`] - The HTTP transport seam

pub mod client;
pub mod config;
pub mod error;
pub mod pool;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{SearchClient, SignedRequest, prepare_search, search_path};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use pool::{BufferPool, PooledBuffer};
pub use request::{SearchQuery, SearchRequest, SortField, SortOrder, build_query_string};
pub use response::{SearchError, SearchItem, SearchResponse, SearchResult};
pub use transport::{ReqwestTransport, Transport};
