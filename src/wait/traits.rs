//! Activation API seam consumed by the wait-for-code engine.

use crate::api::{RemoteStatus, SetStatusRequest, SetStatusResponse};
use crate::errors::Result;
use crate::types::{ActivationId, SmsCode};
use std::future::Future;

/// The two remote calls the wait-for-code engine needs.
///
/// [`SmsActivateClient`](crate::SmsActivateClient) implements this on top of
/// its transport; tests implement it with scripted answers.
#[allow(async_fn_in_trait)]
pub trait ActivationApi: Send + Sync {
    /// Current remote status of an activation and the code, if one came with it.
    fn get_status(
        &self,
        id: ActivationId,
    ) -> impl Future<Output = Result<(RemoteStatus, Option<SmsCode>)>> + Send;

    /// Request a lifecycle transition for an activation.
    fn set_status(
        &self,
        request: SetStatusRequest,
    ) -> impl Future<Output = Result<SetStatusResponse>> + Send;
}
