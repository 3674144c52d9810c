//! Request descriptions: which action to call and with which query parameters.

use super::services::Service;
use super::status::LifecycleTransition;
use crate::types::{ActivationId, PhoneNumber};
use std::fmt::{Display, Formatter};

/// Remote actions understood by the handler endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetBalance,
    GetBalanceAndCashBack,
    GetNumber,
    GetStatus,
    GetActiveActivations,
    SetStatus,
    GetOperators,
    GetCountries,
}

impl Action {
    /// Value of the `action` query parameter.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetBalance => "getBalance",
            Self::GetBalanceAndCashBack => "getBalanceAndCashBack",
            Self::GetNumber => "getNumber",
            Self::GetStatus => "getStatus",
            Self::GetActiveActivations => "getActiveActivations",
            Self::SetStatus => "setStatus",
            Self::GetOperators => "getOperators",
            Self::GetCountries => "getCountries",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Action plus its action-specific query parameters.
///
/// `api_key` and `action` are added by the client when the URL is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub action: Action,
    pub params: Vec<(&'static str, String)>,
}

impl ApiRequest {
    /// Request with no extra parameters.
    pub fn new(action: Action) -> Self {
        Self {
            action,
            params: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    /// Append a parameter only when a value is present.
    pub fn param_opt<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Look up a parameter value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Which balance figure to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalanceKind {
    /// Plain account balance.
    #[default]
    Balance,
    /// Balance including cashback.
    WithCashback,
}

impl BalanceKind {
    pub(crate) fn into_request(self) -> ApiRequest {
        match self {
            Self::Balance => ApiRequest::new(Action::GetBalance),
            Self::WithCashback => ApiRequest::new(Action::GetBalanceAndCashBack),
        }
    }
}

/// Parameters of the `getNumber` action.
///
/// Only `service` is required; every other field is left out of the query
/// when unset.
///
/// # Example
///
/// ```rust
/// use sms_activate_api::{GetNumberRequest, Service};
///
/// let request = GetNumberRequest::new(Service::Telegram)
///     .with_country(0)
///     .with_operator("mts")
///     .with_max_price("25.5");
/// assert_eq!(request.country, Some(0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GetNumberRequest {
    pub service: Service,
    pub forward: Option<bool>,
    pub operator: Option<String>,
    pub ref_code: Option<String>,
    pub country: Option<u32>,
    pub phone_exception: Option<String>,
    pub free_price: Option<bool>,
    pub max_price: Option<String>,
    pub verification: Option<bool>,
}

impl GetNumberRequest {
    pub fn new(service: Service) -> Self {
        Self {
            service,
            forward: None,
            operator: None,
            ref_code: None,
            country: None,
            phone_exception: None,
            free_price: None,
            max_price: None,
            verification: None,
        }
    }

    pub fn with_forward(mut self, forward: bool) -> Self {
        self.forward = Some(forward);
        self
    }

    /// Restrict to one or more operators (comma separated).
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Referral id.
    pub fn with_ref_code(mut self, ref_code: impl Into<String>) -> Self {
        self.ref_code = Some(ref_code.into());
        self
    }

    /// Service-side country id, as returned by `getCountries`.
    pub fn with_country(mut self, country: u32) -> Self {
        self.country = Some(country);
        self
    }

    /// Number prefixes to exclude (comma separated, e.g. "7918,7900111").
    pub fn with_phone_exception(mut self, prefixes: impl Into<String>) -> Self {
        self.phone_exception = Some(prefixes.into());
        self
    }

    pub fn with_free_price(mut self, free_price: bool) -> Self {
        self.free_price = Some(free_price);
        self
    }

    pub fn with_max_price(mut self, max_price: impl Into<String>) -> Self {
        self.max_price = Some(max_price.into());
        self
    }

    pub fn with_verification(mut self, verification: bool) -> Self {
        self.verification = Some(verification);
        self
    }

    pub(crate) fn into_request(self) -> ApiRequest {
        ApiRequest::new(Action::GetNumber)
            .param("service", self.service.code())
            .param_opt("ref", self.ref_code)
            .param_opt("forward", self.forward)
            .param_opt("operator", self.operator)
            .param_opt("country", self.country)
            .param_opt("phoneException", self.phone_exception)
            .param_opt("freePrice", self.free_price)
            .param_opt("maxPrice", self.max_price)
            .param_opt("verification", self.verification)
    }
}

/// Parameters of the `setStatus` action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetStatusRequest {
    pub id: ActivationId,
    pub status: LifecycleTransition,
    /// Number to forward to, for activations bought with forwarding.
    pub forward: Option<PhoneNumber>,
}

impl SetStatusRequest {
    pub fn new(id: ActivationId, status: LifecycleTransition) -> Self {
        Self {
            id,
            status,
            forward: None,
        }
    }

    pub fn with_forward(mut self, forward: PhoneNumber) -> Self {
        self.forward = Some(forward);
        self
    }

    pub(crate) fn into_request(self) -> ApiRequest {
        ApiRequest::new(Action::SetStatus)
            .param("id", self.id)
            .param("status", self.status.code())
            .param_opt("forward", self.forward)
    }
}

pub(crate) fn get_status_request(id: ActivationId) -> ApiRequest {
    ApiRequest::new(Action::GetStatus).param("id", id)
}

pub(crate) fn get_operators_request(country: Option<u32>) -> ApiRequest {
    ApiRequest::new(Action::GetOperators).param_opt("country", country)
}
