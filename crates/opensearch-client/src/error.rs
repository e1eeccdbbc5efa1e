//! Error types for the search client.

/// Boxed error produced by a [`crate::transport::Transport`] implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by [`crate::SearchClient::search`].
///
/// No variant carries partial results; the client never retries.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be delivered (DNS, connect, timeout).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The service answered with a status other than `200 OK`.
    #[error("error response, code: {}", .0.as_u16())]
    Status(http::StatusCode),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] BoxError),

    /// The response body is not a valid search response.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The client configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
