//! SMS Activate client: one method per remote action plus wait-for-code.

use super::config::ClientConfig;
use super::transport::{HttpTransport, Transport};
use crate::api::response;
use crate::api::{
    ActiveActivation, ApiRequest, BalanceKind, Country, GetNumberRequest, RemoteStatus,
    SetStatusRequest, SetStatusResponse, request,
};
use crate::errors::{Result, SmsActivateError};
use crate::types::{AcquiredNumber, ActivationId, Balance, SmsCode};
use crate::wait::{ActivationApi, CodeWaiter, Sleeper, TokioSleeper, WaitOptions};
use reqwest_middleware::ClientWithMiddleware;
use tokio_util::sync::CancellationToken;
use url::Url;

#[cfg(feature = "tracing")]
use opentelemetry::trace::Status;
#[cfg(feature = "tracing")]
use tracing::{Span, debug};
#[cfg(feature = "tracing")]
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// SMS Activate client.
///
/// Every request is built from the client's immutable [`ClientConfig`] and
/// delivered by its [`Transport`]. The client holds no mutable state, so one
/// instance can serve any number of concurrent calls.
///
/// # Example
///
/// ```rust,ignore
/// use sms_activate_api::{GetNumberRequest, Service, SmsActivateClient, WaitOptions};
///
/// let client = SmsActivateClient::with_api_key("your_api_key")?;
///
/// let number = client
///     .get_number(GetNumberRequest::new(Service::Telegram).with_country(0))
///     .await?;
/// println!("Got number: {}", number.phone_number.with_plus_prefix());
///
/// let options = WaitOptions::default().with_notify_completion_to_server(true);
/// let code = client.wait_for_code(number.activation_id, options).await?;
/// println!("Got code: {}", code);
/// ```
#[derive(Clone)]
pub struct SmsActivateClient<T = HttpTransport, S = TokioSleeper> {
    config: ClientConfig,
    transport: T,
    sleeper: S,
}

impl<T, S> std::fmt::Debug for SmsActivateClient<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsActivateClient")
            .field("endpoint", self.config.endpoint())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Builder for configuring a [`SmsActivateClient`] over HTTP.
pub struct SmsActivateClientBuilder {
    api_key: String,
    endpoint: Option<Url>,
    http_client: Option<ClientWithMiddleware>,
}

impl SmsActivateClientBuilder {
    /// Create a new builder with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: None,
            http_client: None,
        }
    }

    /// Set a custom API endpoint.
    pub fn endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Set a custom HTTP client with middleware.
    pub fn http_client(mut self, client: ClientWithMiddleware) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the [`SmsActivateClient`].
    pub fn build(self) -> Result<SmsActivateClient> {
        let mut config = ClientConfig::new(self.api_key);
        if let Some(endpoint) = self.endpoint {
            config = config.with_endpoint(endpoint);
        }

        let transport = match self.http_client {
            Some(client) => HttpTransport::from_client(client),
            None => HttpTransport::new().map_err(SmsActivateError::BuildHttpClient)?,
        };

        Ok(SmsActivateClient::with_transport(config, transport))
    }
}

impl SmsActivateClient {
    /// Create a new SMS Activate client.
    ///
    /// # Arguments
    /// * `endpoint` - Base URL for the SMS Activate API
    /// * `api_key` - API key for authentication
    pub fn new(endpoint: impl AsRef<str>, api_key: impl Into<String>) -> Result<Self> {
        let url = Url::parse(endpoint.as_ref()).map_err(SmsActivateError::InvalidEndpoint)?;

        Self::builder(api_key).endpoint(url).build()
    }

    /// Create a new client with the default API URL.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Create a builder for configuring the client.
    pub fn builder(api_key: impl Into<String>) -> SmsActivateClientBuilder {
        SmsActivateClientBuilder::new(api_key)
    }
}

impl<T: Transport> SmsActivateClient<T> {
    /// Create a client that delivers requests through a custom transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            sleeper: TokioSleeper,
        }
    }
}

impl<T, S> SmsActivateClient<T, S> {
    /// Replace the sleep source used between status polls.
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> SmsActivateClient<T, S2> {
        SmsActivateClient {
            config: self.config,
            transport: self.transport,
            sleeper,
        }
    }

    /// Get reference to the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport, S: Sleeper> SmsActivateClient<T, S> {
    /// Build the URL for `request` and return the raw response text.
    async fn send(&self, request: ApiRequest) -> Result<String> {
        let url = self.config.request_url(&request)?;

        #[cfg(feature = "tracing")]
        debug!(action = %request.action, "Sending SMS Activate request");

        Ok(self.transport.send(url).await?)
    }

    /// Get the account balance.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "SmsActivateClient::get_balance",
            skip_all,
            fields(kind = ?kind)
        )
    )]
    pub async fn get_balance(&self, kind: BalanceKind) -> Result<Balance> {
        let text = self.send(kind.into_request()).await?;
        let balance = response::parse_balance(&text)?;

        #[cfg(feature = "tracing")]
        Span::current().set_status(Status::Ok);

        Ok(balance)
    }

    /// Rent a phone number.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "SmsActivateClient::get_number",
            skip_all,
            fields(
                service = %request.service,
                country = ?request.country,
                activation_id = tracing::field::Empty
            )
        )
    )]
    pub async fn get_number(&self, request: GetNumberRequest) -> Result<AcquiredNumber> {
        let text = self.send(request.into_request()).await?;
        let number = response::parse_number(&text)?;

        #[cfg(feature = "tracing")]
        {
            Span::current()
                .record("activation_id", number.activation_id.get())
                .set_status(Status::Ok);
        }

        Ok(number)
    }

    /// List all countries, sorted by id.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "SmsActivateClient::get_countries", skip_all)
    )]
    pub async fn get_countries(&self) -> Result<Vec<Country>> {
        let text = self
            .send(ApiRequest::new(request::Action::GetCountries))
            .await?;
        let countries = response::parse_countries(&text)?;

        #[cfg(feature = "tracing")]
        Span::current().set_status(Status::Ok);

        Ok(countries)
    }

    /// List operators, optionally for one country.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "SmsActivateClient::get_operators",
            skip_all,
            fields(country = ?country)
        )
    )]
    pub async fn get_operators(&self, country: Option<u32>) -> Result<Vec<String>> {
        let text = self.send(request::get_operators_request(country)).await?;
        let operators = response::parse_operators(&text)?;

        #[cfg(feature = "tracing")]
        Span::current().set_status(Status::Ok);

        Ok(operators)
    }

    /// Get the current status of an activation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "SmsActivateClient::get_status",
            skip_all,
            fields(activation_id = %id, status = tracing::field::Empty)
        )
    )]
    pub async fn get_status(&self, id: ActivationId) -> Result<(RemoteStatus, Option<SmsCode>)> {
        let text = self.send(request::get_status_request(id)).await?;
        let status = response::parse_status(&text)?;

        #[cfg(feature = "tracing")]
        {
            Span::current()
                .record("status", status.0.token())
                .set_status(Status::Ok);
        }

        Ok(status)
    }

    /// List the account's active activations.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "SmsActivateClient::get_active_activations", skip_all)
    )]
    pub async fn get_active_activations(&self) -> Result<Vec<ActiveActivation>> {
        let text = self
            .send(ApiRequest::new(request::Action::GetActiveActivations))
            .await?;
        let activations = response::parse_active_activations(&text)?;

        #[cfg(feature = "tracing")]
        Span::current().set_status(Status::Ok);

        Ok(activations)
    }

    /// Request a lifecycle transition for an activation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "SmsActivateClient::set_status",
            skip_all,
            fields(
                activation_id = %request.id,
                status = %request.status,
                response = tracing::field::Empty
            )
        )
    )]
    pub async fn set_status(&self, request: SetStatusRequest) -> Result<SetStatusResponse> {
        let text = self.send(request.into_request()).await?;
        let result = response::parse_set_status(&text)?;

        #[cfg(feature = "tracing")]
        {
            Span::current()
                .record("response", result.to_string())
                .set_status(Status::Ok);
        }

        Ok(result)
    }

    /// Poll an activation until its SMS code arrives.
    ///
    /// Fails with [`SmsActivateError::NoCodeReceived`] once
    /// `options.max_attempts` polls have gone by without a code, and with
    /// [`SmsActivateError::ActivationCancelled`] if the service cancels the
    /// activation. With `options.notify_completion_to_server` the activation is
    /// completed (or cancelled) on the service before returning.
    pub async fn wait_for_code(&self, id: ActivationId, options: WaitOptions) -> Result<SmsCode> {
        CodeWaiter::new(self, &self.sleeper, options).wait(id).await
    }

    /// Like [`wait_for_code`](Self::wait_for_code), but stops with
    /// [`SmsActivateError::Cancelled`] as soon as `token` is cancelled.
    pub async fn wait_for_code_cancellable(
        &self,
        id: ActivationId,
        options: WaitOptions,
        token: CancellationToken,
    ) -> Result<SmsCode> {
        CodeWaiter::new(self, &self.sleeper, options)
            .wait_cancellable(id, &token)
            .await
    }
}

impl<T: Transport, S: Sleeper> ActivationApi for SmsActivateClient<T, S> {
    async fn get_status(&self, id: ActivationId) -> Result<(RemoteStatus, Option<SmsCode>)> {
        SmsActivateClient::get_status(self, id).await
    }

    async fn set_status(&self, request: SetStatusRequest) -> Result<SetStatusResponse> {
        SmsActivateClient::set_status(self, request).await
    }
}
