//! Transport seam: sends a fully built request URL and returns the body text.

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use std::error::Error as StdError;
use std::future::Future;
use thiserror::Error;
use url::Url;

/// Failure to obtain a response body.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to send HTTP request.
    #[error("Failed to send HTTP request: {0}")]
    HttpRequest(#[from] reqwest_middleware::Error),

    /// Server answered with a non-success HTTP status.
    #[error("Unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    /// Failed to read the response body.
    #[error("Failed to read response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// Error raised by a custom transport.
    #[error("Transport failure: {0}")]
    Custom(#[source] Box<dyn StdError + Send + Sync>),
}

/// Sends GET requests to the SMS Activate endpoint.
///
/// The client builds the complete URL (endpoint, `api_key`, `action` and
/// action parameters); a transport only has to deliver it.
///
/// # Example
///
/// ```rust,ignore
/// use sms_activate_api::{Transport, TransportError};
/// use url::Url;
///
/// struct Canned(&'static str);
///
/// impl Transport for Canned {
///     async fn send(&self, _url: Url) -> Result<String, TransportError> {
///         Ok(self.0.to_string())
///     }
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Send a GET request to `url` and return the raw response text.
    fn send(&self, url: Url) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// Default transport backed by `reqwest` with middleware support.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: ClientWithMiddleware,
}

impl HttpTransport {
    /// Create a transport with a plain `reqwest` client.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::from_client(ClientBuilder::new(client).build()))
    }

    /// Wrap an existing client with middleware.
    pub fn from_client(http_client: ClientWithMiddleware) -> Self {
        Self { http_client }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, url: Url) -> Result<String, TransportError> {
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        response.text().await.map_err(TransportError::ReadBody)
    }
}
