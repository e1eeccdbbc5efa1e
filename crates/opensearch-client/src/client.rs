//! The search client.
//!
//! A search goes through these steps:
//!
//! 1. The [`SearchQuery`] is turned into query parameters and caller headers.
//! 2. The protocol headers are added and the request is signed
//!    ([`prepare_search`]).
//! 3. A response buffer is taken from the pool and the request is handed to
//!    the [`Transport`].
//! 4. Anything but `200 OK` fails with [`ClientError::Status`]; otherwise the
//!    body is decoded into a [`SearchResponse`].
//!
//! The client holds no per-request state, so one instance can serve
//! concurrent searches.

use http::{Method, StatusCode};
use opensearch_auth::{
    CallerHeaders, Credential, ParameterMap, RequestHeaders, StaticCredential, sign_headers,
};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::pool::{BufferPool, DEFAULT_MAX_IDLE};
use crate::request::{SearchQuery, build_query_string};
use crate::response::SearchResponse;
use crate::transport::{ReqwestTransport, Transport};

/// Build the search path for an application.
///
/// # Examples
///
/// ```
/// use opensearch_client::client::search_path;
///
/// assert_eq!(search_path("books"), "/v3/openapi/apps/books/search");
/// ```
#[must_use]
pub fn search_path(app_name: &str) -> String {
    format!("/v3/openapi/apps/{app_name}/search")
}

/// A request that is signed and ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// HTTP method; searches are always `GET`.
    pub method: Method,
    /// Request path, unencoded.
    pub path: String,
    /// Wire query string, without the leading `?`.
    pub query: String,
    /// Full header set, `Authorization` included.
    pub headers: RequestHeaders,
}

impl SignedRequest {
    /// Path and query as they appear in the request line.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        format!("{}?{}", self.path, self.query)
    }

    /// Absolute URL on `host`.
    #[must_use]
    pub fn url(&self, host: &str) -> String {
        format!("{}{}", host.trim_end_matches('/'), self.path_and_query())
    }
}

/// Sign a search against `app_name`.
///
/// Caller headers are kept as given; protocol headers are added only where
/// missing, and `Authorization` is computed only if the caller did not set it.
#[must_use]
pub fn prepare_search(
    app_name: &str,
    credential: &dyn Credential,
    caller_headers: CallerHeaders,
    params: &ParameterMap,
) -> SignedRequest {
    let path = search_path(app_name);
    let mut headers = RequestHeaders::with_defaults(caller_headers);
    sign_headers(Method::GET.as_str(), &path, params, &mut headers, credential);

    SignedRequest {
        method: Method::GET,
        query: build_query_string(params),
        path,
        headers,
    }
}

/// Client for the search API of one application.
#[derive(Debug)]
pub struct SearchClient<T = ReqwestTransport> {
    host: String,
    app_name: String,
    credential: StaticCredential,
    transport: T,
    pool: BufferPool,
}

impl SearchClient<ReqwestTransport> {
    /// Create a client that talks HTTP through `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> SearchClient<T> {
    /// Create a client over a custom transport.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if `host` is empty.
    pub fn with_transport(config: &ClientConfig, transport: T) -> ClientResult<Self> {
        if config.host.trim().is_empty() {
            return Err(ClientError::Config("host must not be empty".to_owned()));
        }

        Ok(Self {
            host: config.host.clone(),
            app_name: config.app_name.clone(),
            credential: StaticCredential::new(&config.access_key_id, &config.access_key_secret),
            transport,
            pool: BufferPool::new(config.buffer_capacity, DEFAULT_MAX_IDLE),
        })
    }

    /// The application this client searches.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// The credential used for signing.
    #[must_use]
    pub fn credential(&self) -> &StaticCredential {
        &self.credential
    }

    /// The response buffer pool.
    #[must_use]
    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    /// Sign `query` without sending it.
    #[must_use]
    pub fn prepare<Q: SearchQuery + ?Sized>(&self, query: &Q) -> SignedRequest {
        prepare_search(
            &self.app_name,
            &self.credential,
            query.headers(),
            &query.params(),
        )
    }

    /// Run a search.
    ///
    /// Dropping the returned future cancels the request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Body`] when the
    /// exchange fails, [`ClientError::Status`] for any status but `200 OK`,
    /// and [`ClientError::Decode`] when the body is not a search response.
    pub async fn search<Q: SearchQuery + Sync + ?Sized>(
        &self,
        query: &Q,
    ) -> ClientResult<SearchResponse> {
        let request = self.prepare(query);
        let url = request.url(&self.host);

        debug!(app_name = %self.app_name, path = %request.path, "sending search request");

        let mut body = self.pool.acquire();
        let status = self.transport.execute(&url, &request, &mut body).await?;

        if status != StatusCode::OK {
            warn!(app_name = %self.app_name, status = status.as_u16(), "search request rejected");
            return Err(ClientError::Status(status));
        }

        debug!(status = status.as_u16(), bytes = body.len(), "received search response");

        let response: SearchResponse = serde_json::from_slice(&body)?;
        Ok(response)
    }
}
