//! # SMS Activate API
//!
//! An async client for the SMS Activate phone-verification service.
//!
//! The crate rents phone numbers, reports account balance, lists countries,
//! operators and active activations, drives the activation lifecycle, and
//! polls an activation until its SMS code arrives.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sms_activate_api::{GetNumberRequest, Service, SmsActivateClient, WaitOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SmsActivateClient::with_api_key("your_api_key")?;
//!
//!     // Rent a number
//!     let number = client
//!         .get_number(GetNumberRequest::new(Service::Telegram).with_country(0))
//!         .await?;
//!     println!("Got number: {}", number.phone_number.with_plus_prefix());
//!
//!     // Wait for SMS code, completing the activation once it arrives
//!     let options = WaitOptions::default().with_notify_completion_to_server(true);
//!     let code = client.wait_for_code(number.activation_id, options).await?;
//!     println!("Got code: {}", code);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! SmsActivateClient<T, S>
//!     │          │
//!     │          ▼
//!     │      CodeWaiter      (bounded, cancellable status polling)
//!     ▼
//! ClientConfig ──► Transport (trait: HttpTransport, or your own)
//!     │
//!     ▼
//! api::response          (text/JSON response parsers)
//! ```
//!
//! ## Features
//!
//! - `tracing` - OpenTelemetry tracing instrumentation (enabled by default)

pub mod api;
pub mod client;
pub mod errors;
pub mod types;
pub mod wait;

// Re-export commonly used types at the crate root
pub use api::{
    ActiveActivation, BalanceKind, Country, GetNumberRequest, LifecycleTransition, RemoteStatus,
    Service, SetStatusRequest, SetStatusResponse, StatusClass,
};
pub use client::{
    ClientConfig, DEFAULT_API_URL, HttpTransport, SmsActivateClient, SmsActivateClientBuilder,
    Transport, TransportError,
};
pub use errors::{
    ErrorCategory, Result, SmsActivateError, SmsActivateErrorCode, SmsActivateServiceError,
};
pub use types::{AcquiredNumber, ActivationId, Balance, PhoneNumber, SmsCode};
pub use wait::{ActivationApi, CodeWaiter, Sleeper, TokioSleeper, WaitOptions, WaitOptionsBuilder};

// Re-export tokio_util for CancellationToken
pub use tokio_util::sync::CancellationToken;
