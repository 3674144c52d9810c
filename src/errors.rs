//! Error types for SMS Activate client operations.

use crate::client::transport::TransportError;
use crate::types::ActivationId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

#[cfg(feature = "tracing")]
use tracing::warn;

/// Error tokens the service sends in place of a normal answer.
#[derive(Debug, Clone, PartialEq)]
pub enum SmsActivateErrorCode {
    /// No numbers available for the requested country/service.
    NoNumbers,
    /// Not enough money on the account.
    NoBalance,
    /// Internal SQL error on service side.
    ErrorSql,
    /// Activation with this id does not exist.
    NoActivation,
    /// Invalid API key.
    BadKey,
    /// Incorrect action.
    BadAction,
    /// Incorrect service code.
    BadService,
    /// Incorrect status.
    BadStatus,
    /// Incorrect excluding prefixes.
    WrongExceptionPhone,
    /// Insufficient funds for purchasing forwarding.
    NoBalanceForward,
    /// Not allowed to cancel within first 2 minutes.
    EarlyCancelDenied,
    /// Invalid activation ID or ID is not a number.
    WrongActivationId,
    /// Account banned until specified datetime.
    Banned { until: String },
    /// Maximum price is less than allowed minimum.
    WrongMaxPrice { min: Option<f64> },
    /// Unknown error token from service.
    Unknown { raw: String },
}

impl SmsActivateErrorCode {
    /// Returns the API error token.
    pub fn code_name(&self) -> &str {
        match self {
            Self::NoNumbers => "NO_NUMBERS",
            Self::NoBalance => "NO_BALANCE",
            Self::ErrorSql => "ERROR_SQL",
            Self::NoActivation => "NO_ACTIVATION",
            Self::BadKey => "BAD_KEY",
            Self::BadAction => "BAD_ACTION",
            Self::BadService => "BAD_SERVICE",
            Self::BadStatus => "BAD_STATUS",
            Self::WrongExceptionPhone => "WRONG_EXCEPTION_PHONE",
            Self::NoBalanceForward => "NO_BALANCE_FORWARD",
            Self::EarlyCancelDenied => "EARLY_CANCEL_DENIED",
            Self::WrongActivationId => "WRONG_ACTIVATION_ID",
            Self::Banned { .. } => "BANNED",
            Self::WrongMaxPrice { .. } => "WRONG_MAX_PRICE",
            Self::Unknown { raw } => raw.as_str(),
        }
    }

    /// Returns human-readable description.
    pub fn description(&self) -> String {
        match self {
            Self::NoNumbers => "No numbers available".to_string(),
            Self::NoBalance => "Not enough money on the account".to_string(),
            Self::ErrorSql => "SQL server error".to_string(),
            Self::NoActivation => "Activation ID does not exist".to_string(),
            Self::BadKey => "Invalid API key".to_string(),
            Self::BadAction => "Incorrect action".to_string(),
            Self::BadService => "Incorrect service name".to_string(),
            Self::BadStatus => "Incorrect status".to_string(),
            Self::WrongExceptionPhone => "Incorrect excluding prefixes".to_string(),
            Self::NoBalanceForward => "Insufficient funds for purchasing forwarding".to_string(),
            Self::EarlyCancelDenied => "Not allowed to cancel within first 2 minutes".to_string(),
            Self::WrongActivationId => "Invalid activation ID".to_string(),
            Self::Banned { until } => format!("Account banned until {}", until),
            Self::WrongMaxPrice { min } => match min {
                Some(v) => format!("Maximum price is less than allowed minimum: {}", v),
                None => "Maximum price is less than allowed minimum".to_string(),
            },
            Self::Unknown { raw } => format!("Unknown error: {}", raw),
        }
    }

    /// Parse error code from raw API response.
    ///
    /// Returns `None` when the text is not an error token at all.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let s = raw.trim();

        let code = match s {
            "NO_NUMBERS" => Self::NoNumbers,
            "NO_BALANCE" => Self::NoBalance,
            "ERROR_SQL" => Self::ErrorSql,
            "NO_ACTIVATION" => Self::NoActivation,
            "BAD_KEY" => Self::BadKey,
            "BAD_ACTION" => Self::BadAction,
            "BAD_SERVICE" => Self::BadService,
            "BAD_STATUS" => Self::BadStatus,
            "WRONG_EXCEPTION_PHONE" => Self::WrongExceptionPhone,
            "NO_BALANCE_FORWARD" => Self::NoBalanceForward,
            "EARLY_CANCEL_DENIED" => Self::EarlyCancelDenied,
            "WRONG_ACTIVATION_ID" => Self::WrongActivationId,
            _ => return Self::parse_parametrized_error(s),
        };

        Some(code)
    }

    /// Parse error codes with parameters (BANNED, WRONG_MAX_PRICE).
    fn parse_parametrized_error(s: &str) -> Option<Self> {
        // BANNED:'YYYY-m-d H-i-s'
        static RE_BANNED: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r#"^BANNED\s*:\s*['"]?([^'"]+?)['"]?$"#).expect("valid BANNED regex")
        });
        if let Some(cap) = RE_BANNED.captures(s) {
            let until = cap[1].to_string();
            return Some(Self::Banned { until });
        }

        // WRONG_MAX_PRICE:<num>
        static RE_WRONG_MAX_PRICE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r#"^WRONG_MAX_PRICE\s*:\s*([0-9]+(?:\.[0-9]+)?)$"#)
                .expect("valid WRONG_MAX_PRICE regex")
        });
        if let Some(cap) = RE_WRONG_MAX_PRICE.captures(s) {
            let min = cap.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
            return Some(Self::WrongMaxPrice { min });
        }

        if Self::looks_like_error_code(s) {
            return Some(Self::Unknown { raw: s.to_string() });
        }

        None
    }

    /// Check if string looks like an error token.
    ///
    /// Answers always start with `ACCESS_` or `STATUS_`, and JSON bodies
    /// never match the upper-case prefixes below.
    fn looks_like_error_code(s: &str) -> bool {
        if s.is_empty() || s.starts_with("ACCESS_") || s.starts_with("STATUS_") {
            return false;
        }

        const KNOWN_ERROR_PREFIXES: [&str; 5] = ["NO_", "ERROR_", "BAD_", "WRONG_", "BANNED"];

        KNOWN_ERROR_PREFIXES
            .iter()
            .any(|prefix| s.starts_with(prefix))
    }
}

impl Display for SmsActivateErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code_name())
    }
}

impl Serialize for SmsActivateErrorCode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code_name())
    }
}

impl<'de> Deserialize<'de> for SmsActivateErrorCode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_raw(&s).unwrap_or(Self::Unknown { raw: s }))
    }
}

/// Error token returned by the SMS Activate service.
#[derive(Debug, Clone, Error)]
#[error("SMS Activate service error: code={code}, description={description}")]
pub struct SmsActivateServiceError {
    /// Error code from the service.
    pub code: SmsActivateErrorCode,
    /// Human-readable description.
    pub description: String,
    /// Original raw response text.
    pub raw: String,
}

impl SmsActivateServiceError {
    /// Create new service error from code and raw response.
    pub fn new(code: SmsActivateErrorCode, raw: String) -> Self {
        let description = code.description();
        Self {
            code,
            description,
            raw,
        }
    }
}

/// Parse SMS Activate error from API response text.
pub(crate) fn parse_sms_activate_error(raw: &str) -> Option<SmsActivateServiceError> {
    let code = SmsActivateErrorCode::from_raw(raw)?;
    let error = SmsActivateServiceError::new(code, raw.trim().to_string());

    #[cfg(feature = "tracing")]
    warn!(
        code = %error.code,
        description = %error.description,
        raw = %raw,
        "SMS Activate service returned error"
    );

    Some(error)
}

/// Coarse classification of [`SmsActivateError`].
///
/// Lets callers decide whether to retry, abort, or report without matching
/// every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Client could not be built or a request URL could not be encoded.
    Configuration,
    /// The request never produced a usable HTTP answer.
    Transport,
    /// The answer did not match the expected shape.
    MalformedResponse,
    /// The service explicitly reported an error.
    Domain,
    /// Wait-for-code ran out of attempts.
    BudgetExhausted,
    /// Wait-for-code was cancelled by the caller.
    Cancelled,
}

/// Main error type for SMS Activate client operations.
#[derive(Debug, Error)]
pub enum SmsActivateError {
    /// Failed to build HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    BuildHttpClient(#[source] reqwest::Error),

    /// The configured endpoint is not a valid URL.
    #[error("Invalid SMS Activate endpoint: {0}")]
    InvalidEndpoint(#[source] url::ParseError),

    /// Error building SMS Activate request URL.
    #[error("Error building SMS Activate request URL: {0}")]
    BuildRequestUrl(#[source] serde_urlencoded::ser::Error),

    /// Transport failed to deliver the request or read the answer.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Answer did not match the expected shape.
    #[error("Malformed response: {raw:?}")]
    MalformedResponse { raw: String },

    /// SMS Activate service error token.
    #[error("SMS Activate service error: {0}")]
    Service(#[source] SmsActivateServiceError),

    /// Service reported that the account has no active activations.
    #[error("No active activations found")]
    NoActivations,

    /// Service reported no operators for the requested country.
    #[error("Operators not found")]
    OperatorsNotFound,

    /// Activation was cancelled on the service side.
    #[error("Activation {activation_id} was cancelled")]
    ActivationCancelled { activation_id: ActivationId },

    /// No code arrived within the polling budget.
    #[error("No code received for activation {activation_id} after {attempts} attempts")]
    NoCodeReceived {
        activation_id: ActivationId,
        attempts: u32,
    },

    /// Waiting was cancelled by the caller.
    #[error("Waiting for activation {activation_id} cancelled after {polls} polls")]
    Cancelled {
        activation_id: ActivationId,
        polls: u32,
    },
}

impl SmsActivateError {
    pub(crate) fn malformed(raw: impl Into<String>) -> Self {
        Self::MalformedResponse { raw: raw.into() }
    }

    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::BuildHttpClient(_) | Self::InvalidEndpoint(_) | Self::BuildRequestUrl(_) => {
                ErrorCategory::Configuration
            }
            Self::Transport(_) => ErrorCategory::Transport,
            Self::MalformedResponse { .. } => ErrorCategory::MalformedResponse,
            Self::Service(_)
            | Self::NoActivations
            | Self::OperatorsNotFound
            | Self::ActivationCancelled { .. } => ErrorCategory::Domain,
            Self::NoCodeReceived { .. } => ErrorCategory::BudgetExhausted,
            Self::Cancelled { .. } => ErrorCategory::Cancelled,
        }
    }

    /// Service error code, if this is a service error token.
    pub fn service_code(&self) -> Option<&SmsActivateErrorCode> {
        match self {
            Self::Service(error) => Some(&error.code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SmsActivateError>;
