//! Core value types shared by requests, responses and the wait-for-code engine.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

// =============================================================================
// ActivationId
// =============================================================================

/// Identifier of one phone-number rental (activation).
///
/// Issued by the service when a number is acquired and passed back on every
/// status and lifecycle call for that activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivationId(u64);

impl ActivationId {
    /// Create a new ActivationId.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw numeric id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl Display for ActivationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ActivationId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for ActivationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

// =============================================================================
// PhoneNumber
// =============================================================================

/// Rented phone number in international format without the `+` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(u64);

impl PhoneNumber {
    /// Create a new PhoneNumber.
    pub fn new(number: u64) -> Self {
        Self(number)
    }

    /// Get the raw numeric value.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Get the number with a `+` prefix (e.g., "+79001234567").
    pub fn with_plus_prefix(&self) -> String {
        format!("+{}", self.0)
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PhoneNumber {
    fn from(number: u64) -> Self {
        Self(number)
    }
}

// =============================================================================
// SmsCode (OTP)
// =============================================================================

/// SMS verification code (OTP).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SmsCode(String);

impl SmsCode {
    /// Create a new SmsCode.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SmsCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SmsCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for SmsCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&str> for SmsCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl PartialEq<&str> for SmsCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// Balance
// =============================================================================

/// Account balance exactly as reported by the service (e.g., "100.50").
///
/// Kept as text so no precision is lost; use [`Balance::to_f64`] for arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(String);

impl Balance {
    /// Create a new Balance.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the balance as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the balance as a floating point number.
    pub fn to_f64(&self) -> Option<f64> {
        self.0.parse().ok()
    }
}

impl Display for Balance {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Balance {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for Balance {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// AcquiredNumber
// =============================================================================

/// Result of a successful number request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquiredNumber {
    /// Activation id used by every later status/lifecycle call.
    pub activation_id: ActivationId,
    /// The rented phone number.
    pub phone_number: PhoneNumber,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_id_from_str() {
        let id: ActivationId = "12345".parse().unwrap();
        assert_eq!(id, ActivationId::new(12345));
        assert!("abc".parse::<ActivationId>().is_err());
        assert!("-1".parse::<ActivationId>().is_err());
    }

    #[test]
    fn test_phone_number_plus_prefix() {
        let number = PhoneNumber::new(79001234567);
        assert_eq!(number.with_plus_prefix(), "+79001234567");
        assert_eq!(number.to_string(), "79001234567");
    }

    #[test]
    fn test_balance_to_f64() {
        assert_eq!(Balance::new("100.50").to_f64(), Some(100.5));
        assert_eq!(Balance::new("n/a").to_f64(), None);
    }

    #[test]
    fn test_sms_code_serde_transparent() {
        let code = SmsCode::new("123456");
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"123456\"");
    }
}
