//! Per-client configuration and request URL construction.

use crate::api::ApiRequest;
use crate::errors::{Result, SmsActivateError};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// Default SMS Activate API URL.
pub const DEFAULT_API_URL: &str = "https://api.sms-activate.org/stubs/handler_api.php";

/// Immutable settings every request is built from: where to send it and
/// which API key to attach.
///
/// A client owns its config for its whole lifetime; nothing mutates it after
/// construction.
#[derive(Clone)]
pub struct ClientConfig {
    endpoint: Url,
    api_key: SecretString,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl ClientConfig {
    /// Config for the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: SecretString::from(api_key.into()),
        }
    }

    /// Config from URL parts, e.g. `("https", "api.sms-activate.org", "/stubs/handler_api.php")`.
    pub fn from_parts(
        scheme: &str,
        host: &str,
        path: &str,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let path = path.trim_start_matches('/');
        let endpoint = Url::parse(&format!("{scheme}://{host}/{path}"))
            .map_err(SmsActivateError::InvalidEndpoint)?;

        Ok(Self::new(api_key).with_endpoint(endpoint))
    }

    /// Replace the endpoint.
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the GET URL for a request: `api_key`, then `action`, then the
    /// action's own parameters.
    pub fn request_url(&self, request: &ApiRequest) -> Result<Url> {
        let mut params: Vec<(&str, &str)> = Vec::with_capacity(request.params.len() + 2);
        params.push(("api_key", self.api_key.expose_secret()));
        params.push(("action", request.action.name()));
        params.extend(request.params.iter().map(|(k, v)| (*k, v.as_str())));

        let query =
            serde_urlencoded::to_string(&params).map_err(SmsActivateError::BuildRequestUrl)?;

        let mut url = self.endpoint.clone();
        url.set_query(Some(&query));
        Ok(url)
    }
}

fn default_endpoint() -> Url {
    Url::parse(DEFAULT_API_URL).expect("Invalid default URL")
}
