//! Response parsing for SMS Activate API.
//!
//! The service answers in three shapes: colon-delimited text
//! (`ACCESS_NUMBER:<id>:<phone>`), plain JSON, and JSON envelopes tagged with a
//! `status` of `"success"` or `"error"`. Any of them may instead be a plain
//! error token such as `BAD_KEY`, which is checked first.

use super::models::{ActiveActivation, Country};
use super::status::{RemoteStatus, SetStatusResponse};
use crate::errors::{Result, SmsActivateError, SmsActivateServiceError, parse_sms_activate_error};
use crate::types::{AcquiredNumber, ActivationId, Balance, PhoneNumber, SmsCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "tracing")]
use tracing::debug;

/// Plain-text answer, or the service error token sent in its place.
#[derive(Debug)]
pub enum SmsActivateTextResponse {
    Success(String),
    Error(SmsActivateServiceError),
}

impl SmsActivateTextResponse {
    /// Parse response from raw text.
    pub fn from_text(text: &str) -> Self {
        if let Some(error) = parse_sms_activate_error(text) {
            Self::Error(error)
        } else {
            Self::Success(text.trim().to_string())
        }
    }

    /// Convert to Result.
    pub fn into_result(self) -> Result<String> {
        match self {
            Self::Success(text) => Ok(text),
            Self::Error(e) => Err(SmsActivateError::Service(e)),
        }
    }
}

/// Decode a JSON body, collapsing decode failures into a malformed response.
fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    let text = SmsActivateTextResponse::from_text(text).into_result()?;

    serde_json::from_str::<T>(&text).map_err(|_e| {
        #[cfg(feature = "tracing")]
        debug!(error = %_e, raw = %text, "Failed to decode JSON response");

        SmsActivateError::malformed(text.clone())
    })
}

/// Parse a `getBalance` / `getBalanceAndCashBack` answer (`ACCESS_BALANCE:<value>`).
pub fn parse_balance(text: &str) -> Result<Balance> {
    let text = SmsActivateTextResponse::from_text(text).into_result()?;

    match text.split(':').collect::<Vec<_>>().as_slice() {
        [token, value] if token.starts_with("ACCESS_BALANCE") && !value.is_empty() => {
            Ok(Balance::new(*value))
        }
        _ => Err(SmsActivateError::malformed(text.as_str())),
    }
}

/// Parse a `getNumber` answer (`ACCESS_NUMBER:<id>:<phone>`).
pub fn parse_number(text: &str) -> Result<AcquiredNumber> {
    let text = SmsActivateTextResponse::from_text(text).into_result()?;

    let parsed = match text.split(':').collect::<Vec<_>>().as_slice() {
        ["ACCESS_NUMBER", id, phone] => parse_digits(id)
            .zip(parse_digits(phone))
            .map(|(id, phone)| AcquiredNumber {
                activation_id: ActivationId::new(id),
                phone_number: PhoneNumber::new(phone),
            }),
        _ => None,
    };

    parsed.ok_or_else(|| SmsActivateError::malformed(text))
}

/// Unsigned decimal made of ASCII digits only; signs are rejected.
fn parse_digits(segment: &str) -> Option<u64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Parse a `getStatus` answer (`STATUS_<...>` optionally followed by `:<code>`).
///
/// An empty code segment counts as no code, so `STATUS_OK:` is later rejected
/// as malformed instead of yielding an empty code.
pub fn parse_status(text: &str) -> Result<(RemoteStatus, Option<SmsCode>)> {
    let text = SmsActivateTextResponse::from_text(text).into_result()?;

    match text.split(':').collect::<Vec<_>>().as_slice() {
        [token] => {
            let status =
                RemoteStatus::from_token(token).map_err(|_| SmsActivateError::malformed(&text))?;
            Ok((status, None))
        }
        [token, code] => {
            let status =
                RemoteStatus::from_token(token).map_err(|_| SmsActivateError::malformed(&text))?;
            let code = Some(*code)
                .filter(|code| !code.is_empty())
                .map(SmsCode::from);
            Ok((status, code))
        }
        _ => Err(SmsActivateError::malformed(text.as_str())),
    }
}

/// Parse a `setStatus` answer (`ACCESS_READY`, `ACCESS_CANCEL`, ...).
pub fn parse_set_status(text: &str) -> Result<SetStatusResponse> {
    let text = SmsActivateTextResponse::from_text(text).into_result()?;

    SetStatusResponse::from_raw(&text).ok_or_else(|| SmsActivateError::malformed(text))
}

/// Parse a `getCountries` answer (`{"<id>": {country}, ...}`), sorted by id.
pub fn parse_countries(text: &str) -> Result<Vec<Country>> {
    let countries = decode_json::<HashMap<String, Country>>(text)?;

    let mut countries: Vec<Country> = countries.into_values().collect();
    countries.sort_by_key(|country| country.id);
    Ok(countries)
}

/// Outcome field shared by the tagged JSON envelopes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EnvelopeStatus {
    Success,
    Error,
}

/// Tagged envelope with its payload fields left undecoded until the status is known.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: EnvelopeStatus,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

/// Resolve a tagged envelope into its `payload` field or the endpoint's named
/// error. The payload is only decoded on success.
///
/// `error_token` is the plain-text form of the named error, which the service
/// may send instead of an error envelope.
fn open_envelope<T: DeserializeOwned>(
    text: &str,
    payload: &str,
    error_token: &str,
    on_error: SmsActivateError,
) -> Result<T> {
    if text.trim() == error_token {
        return Err(on_error);
    }

    let mut envelope = decode_json::<Envelope>(text)?;

    match envelope.status {
        EnvelopeStatus::Error => Err(on_error),
        EnvelopeStatus::Success => match envelope.fields.remove(payload) {
            Some(Value::Null) | None => Err(SmsActivateError::malformed(text.trim())),
            Some(value) => serde_json::from_value(value).map_err(|_e| {
                #[cfg(feature = "tracing")]
                debug!(error = %_e, field = payload, "Failed to decode envelope payload");

                SmsActivateError::malformed(text.trim())
            }),
        },
    }
}

/// Parse a `getOperators` envelope into the operator names of every country,
/// in ascending country-key order.
pub fn parse_operators(text: &str) -> Result<Vec<String>> {
    let operators: BTreeMap<String, Vec<String>> = open_envelope(
        text,
        "countryOperators",
        "OPERATORS_NOT_FOUND",
        SmsActivateError::OperatorsNotFound,
    )?;

    Ok(operators.into_values().flatten().collect())
}

/// Parse a `getActiveActivations` envelope.
pub fn parse_active_activations(text: &str) -> Result<Vec<ActiveActivation>> {
    open_envelope(
        text,
        "activeActivations",
        "NO_ACTIVATIONS",
        SmsActivateError::NoActivations,
    )
}
