//! HTTP transport seam.
//!
//! The client signs requests itself and hands the result to a [`Transport`],
//! which only has to deliver it. [`ReqwestTransport`] is the production
//! implementation.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use http::StatusCode;
use tracing::trace;

use crate::client::SignedRequest;
use crate::error::{ClientError, ClientResult};

/// Future returned by [`Transport::execute`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = ClientResult<StatusCode>> + Send + 'a>>;

/// Delivers a signed request and collects the response body.
pub trait Transport: Send + Sync {
    /// Send `request` to `url`.
    ///
    /// When the response status is `200 OK` the body is appended to `body`;
    /// for any other status the body is left unread. Delivery failures map to
    /// [`ClientError::Transport`], body read failures to [`ClientError::Body`].
    fn execute<'a>(
        &'a self,
        url: &'a str,
        request: &'a SignedRequest,
        body: &'a mut Vec<u8>,
    ) -> TransportFuture<'a>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the HTTP client cannot be built.
    pub fn new(timeout: Option<Duration>) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest::Client`.
    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        url: &'a str,
        request: &'a SignedRequest,
        body: &'a mut Vec<u8>,
    ) -> TransportFuture<'a> {
        Box::pin(async move {
            let mut builder = self.client.request(request.method.clone(), url);
            for (name, value) in request.headers.iter() {
                builder = builder.header(name, value);
            }

            let mut response = builder
                .send()
                .await
                .map_err(|e| ClientError::Transport(Box::new(e)))?;

            let status = response.status();
            if status != StatusCode::OK {
                return Ok(status);
            }

            while let Some(chunk) = response
                .chunk()
                .await
                .map_err(|e| ClientError::Body(Box::new(e)))?
            {
                body.extend_from_slice(&chunk);
            }
            trace!(bytes = body.len(), "read response body");

            Ok(status)
        })
    }
}
