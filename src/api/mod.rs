//! Wire-level vocabulary of the SMS Activate handler API: actions, request
//! parameters, status tokens and response parsers.

pub(crate) mod models;
pub(crate) mod request;
pub mod response;
pub(crate) mod services;
pub(crate) mod status;

pub use models::{ActiveActivation, Country};
pub use request::{Action, ApiRequest, BalanceKind, GetNumberRequest, SetStatusRequest};
pub use services::Service;
pub use status::{LifecycleTransition, RemoteStatus, SetStatusResponse, StatusClass};
