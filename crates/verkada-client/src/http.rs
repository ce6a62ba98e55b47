//! HTTP transport shared by client instances

use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use verkada_core::{Result, VerkadaError};

/// Thin wrapper over `reqwest::Client` that binds each request to a
/// cancellation token. Requests are never retried here, and no timeout is
/// applied unless one is asked for.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout_secs: Option<u64>) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("verkada-sync/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| VerkadaError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Sends a request, racing it against the cancellation token.
    ///
    /// A fired token always wins, including when it fired before the call.
    pub async fn send(
        &self,
        cancel: &CancellationToken,
        request_builder: RequestBuilder,
    ) -> Result<Response> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(VerkadaError::Cancelled),
            response = request_builder.send() => {
                response.map_err(|e| VerkadaError::transport(format!("request failed: {}", e)))
            }
        }
    }

    /// Reads a response body under the same cancellation rules as `send`
    pub async fn read_body(&self, cancel: &CancellationToken, response: Response) -> Result<Vec<u8>> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(VerkadaError::Cancelled),
            body = response.bytes() => body
                .map(|b| b.to_vec())
                .map_err(|e| VerkadaError::transport(format!("failed to read response body: {}", e))),
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::from_client(Client::new())
    }
}
