//! Activation status model: remote states, lifecycle transitions and their
//! wire tokens.

use crate::errors::{Result, SmsActivateError};
use std::fmt::{Display, Formatter};

/// Activation state reported by `getStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteStatus {
    /// Waiting for the SMS to arrive.
    WaitCode,
    /// A code arrived; the service is waiting for a clarifying resend.
    WaitRetry,
    /// Waiting for a resent SMS.
    WaitResend,
    /// Activation cancelled.
    Cancel,
    /// Code received.
    Ok,
}

/// How the wait-for-code engine reacts to a [`RemoteStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// A code is present and should be returned.
    CodeReady,
    /// No code yet, poll again after the interval.
    Waiting,
    /// No code will ever arrive.
    Cancelled,
}

impl RemoteStatus {
    /// All statuses, in wire-table order.
    pub const ALL: [RemoteStatus; 5] = [
        Self::WaitCode,
        Self::WaitRetry,
        Self::WaitResend,
        Self::Cancel,
        Self::Ok,
    ];

    /// Wire token for this status.
    pub fn token(&self) -> &'static str {
        match self {
            Self::WaitCode => "STATUS_WAIT_CODE",
            Self::WaitRetry => "STATUS_WAIT_RETRY",
            Self::WaitResend => "STATUS_WAIT_RESEND",
            Self::Cancel => "STATUS_CANCEL",
            Self::Ok => "STATUS_OK",
        }
    }

    /// Parse a wire token. Unrecognized tokens are a malformed response.
    pub fn from_token(token: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.token() == token)
            .ok_or_else(|| SmsActivateError::malformed(token))
    }

    /// Classify this status for the wait-for-code engine.
    ///
    /// `WaitRetry` carries a code and is returned like `Ok`.
    pub fn classify(&self) -> StatusClass {
        match self {
            Self::Ok | Self::WaitRetry => StatusClass::CodeReady,
            Self::WaitCode | Self::WaitResend => StatusClass::Waiting,
            Self::Cancel => StatusClass::Cancelled,
        }
    }
}

impl Display for RemoteStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Lifecycle transition codes for the `setStatus` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleTransition {
    /// Number is ready, SMS has been sent.
    Ready,
    /// Request one more code (for free).
    RequestAnotherCode,
    /// Finish the activation.
    CompleteActivation,
    /// Cancel the activation.
    CancelActivation,
}

impl LifecycleTransition {
    /// Get the numeric status code for the API.
    pub fn code(&self) -> u8 {
        match self {
            Self::Ready => 1,
            Self::RequestAnotherCode => 3,
            Self::CompleteActivation => 6,
            Self::CancelActivation => 8,
        }
    }
}

impl Display for LifecycleTransition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready => write!(f, "Ready(1)"),
            Self::RequestAnotherCode => write!(f, "RequestAnotherCode(3)"),
            Self::CompleteActivation => write!(f, "CompleteActivation(6)"),
            Self::CancelActivation => write!(f, "CancelActivation(8)"),
        }
    }
}

/// Response from setStatus API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetStatusResponse {
    /// Numbers readiness confirmed.
    Ready,
    /// Waiting for new SMS.
    RetryGet,
    /// Service successfully activated.
    Activation,
    /// Activation canceled.
    Cancel,
}

impl SetStatusResponse {
    /// Parse response from raw API response text.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim() {
            "ACCESS_READY" => Some(Self::Ready),
            "ACCESS_RETRY_GET" => Some(Self::RetryGet),
            "ACCESS_ACTIVATION" => Some(Self::Activation),
            "ACCESS_CANCEL" => Some(Self::Cancel),
            _ => None,
        }
    }
}

impl Display for SetStatusResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready => write!(f, "ACCESS_READY"),
            Self::RetryGet => write!(f, "ACCESS_RETRY_GET"),
            Self::Activation => write!(f, "ACCESS_ACTIVATION"),
            Self::Cancel => write!(f, "ACCESS_CANCEL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tokens() {
        for status in RemoteStatus::ALL {
            assert_eq!(RemoteStatus::from_token(status.token()).unwrap(), status);
        }
        assert!(matches!(
            RemoteStatus::from_token("STATUS_UNKNOWN"),
            Err(SmsActivateError::MalformedResponse { .. })
        ));
        assert!(RemoteStatus::from_token("status_ok").is_err());
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(RemoteStatus::Ok.classify(), StatusClass::CodeReady);
        assert_eq!(RemoteStatus::WaitRetry.classify(), StatusClass::CodeReady);
        assert_eq!(RemoteStatus::WaitCode.classify(), StatusClass::Waiting);
        assert_eq!(RemoteStatus::WaitResend.classify(), StatusClass::Waiting);
        assert_eq!(RemoteStatus::Cancel.classify(), StatusClass::Cancelled);
    }

    #[test]
    fn test_lifecycle_transition_code() {
        assert_eq!(LifecycleTransition::Ready.code(), 1);
        assert_eq!(LifecycleTransition::RequestAnotherCode.code(), 3);
        assert_eq!(LifecycleTransition::CompleteActivation.code(), 6);
        assert_eq!(LifecycleTransition::CancelActivation.code(), 8);
    }

    #[test]
    fn test_set_status_response_from_raw() {
        assert_eq!(
            SetStatusResponse::from_raw("ACCESS_READY"),
            Some(SetStatusResponse::Ready)
        );
        assert_eq!(
            SetStatusResponse::from_raw("ACCESS_RETRY_GET"),
            Some(SetStatusResponse::RetryGet)
        );
        assert_eq!(
            SetStatusResponse::from_raw("ACCESS_CANCEL\n"),
            Some(SetStatusResponse::Cancel)
        );
        assert_eq!(SetStatusResponse::from_raw("UNKNOWN"), None);
    }
}
