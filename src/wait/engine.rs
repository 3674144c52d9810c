//! Bounded polling loop that waits for an SMS code.

use super::options::WaitOptions;
use super::sleeper::Sleeper;
use super::traits::ActivationApi;
use crate::api::{LifecycleTransition, SetStatusRequest, StatusClass};
use crate::errors::{Result, SmsActivateError};
use crate::types::{ActivationId, SmsCode};
use std::future::Future;
use tokio_util::sync::CancellationToken;

#[cfg(feature = "tracing")]
use tracing::{debug, info, warn};

/// Polls an activation until a code arrives, the activation is cancelled, the
/// attempt budget runs out, or the caller cancels.
///
/// Polls are strictly sequential: the next status query is only sent after
/// the previous one has been answered and the poll interval has elapsed.
///
/// # Example
///
/// ```rust,ignore
/// use sms_activate_api::{CodeWaiter, TokioSleeper, WaitOptions};
///
/// let waiter = CodeWaiter::new(&client, &TokioSleeper, WaitOptions::default());
/// let code = waiter.wait(activation_id).await?;
/// ```
#[derive(Debug)]
pub struct CodeWaiter<'a, A, S> {
    api: &'a A,
    sleeper: &'a S,
    options: WaitOptions,
}

impl<'a, A: ActivationApi, S: Sleeper> CodeWaiter<'a, A, S> {
    pub fn new(api: &'a A, sleeper: &'a S, options: WaitOptions) -> Self {
        Self {
            api,
            sleeper,
            options,
        }
    }

    pub fn options(&self) -> &WaitOptions {
        &self.options
    }

    /// Wait for a code.
    pub async fn wait(&self, id: ActivationId) -> Result<SmsCode> {
        self.run(id, None).await
    }

    /// Wait for a code, giving up with [`SmsActivateError::Cancelled`] as soon
    /// as `token` is cancelled. No request is sent after cancellation.
    pub async fn wait_cancellable(
        &self,
        id: ActivationId,
        token: &CancellationToken,
    ) -> Result<SmsCode> {
        self.run(id, Some(token)).await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "CodeWaiter::wait",
            skip_all,
            fields(
                activation_id = %id,
                max_attempts = self.options.max_attempts,
                notify = self.options.notify_completion_to_server
            )
        )
    )]
    async fn run(&self, id: ActivationId, cancel: Option<&CancellationToken>) -> Result<SmsCode> {
        let notify = self.options.notify_completion_to_server;
        let mut remaining = self.options.max_attempts;
        let mut polls: u32 = 0;

        let cancelled = |polls: u32| {
            #[cfg(feature = "tracing")]
            warn!(polls, "Waiting for code cancelled");

            SmsActivateError::Cancelled {
                activation_id: id,
                polls,
            }
        };

        loop {
            if remaining == 0 {
                #[cfg(feature = "tracing")]
                warn!(polls, "Polling budget exhausted without a code");

                return Err(SmsActivateError::NoCodeReceived {
                    activation_id: id,
                    attempts: self.options.max_attempts,
                });
            }

            let (status, code) = until_cancelled(cancel, self.api.get_status(id))
                .await
                .ok_or_else(|| cancelled(polls))??;
            polls += 1;

            #[cfg(feature = "tracing")]
            debug!(%status, poll = polls, remaining, "Polled activation status");

            match status.classify() {
                StatusClass::CodeReady => {
                    let code = code.ok_or_else(|| SmsActivateError::malformed(status.token()))?;

                    if notify {
                        self.api
                            .set_status(SetStatusRequest::new(
                                id,
                                LifecycleTransition::CompleteActivation,
                            ))
                            .await?;
                    }

                    #[cfg(feature = "tracing")]
                    info!(code = %code, polls, "SMS code received");

                    return Ok(code);
                }
                StatusClass::Waiting => {
                    until_cancelled(cancel, self.sleeper.sleep(self.options.poll_interval))
                        .await
                        .ok_or_else(|| cancelled(polls))?;
                    remaining -= 1;
                }
                StatusClass::Cancelled => {
                    if notify {
                        self.api
                            .set_status(SetStatusRequest::new(
                                id,
                                LifecycleTransition::CancelActivation,
                            ))
                            .await?;
                    }

                    #[cfg(feature = "tracing")]
                    warn!(polls, "Activation cancelled by the service");

                    return Err(SmsActivateError::ActivationCancelled { activation_id: id });
                }
            }
        }
    }
}

/// Run `future` unless `token` is cancelled first; `None` means cancelled.
///
/// A token that is already cancelled wins without polling `future` at all.
async fn until_cancelled<F: Future>(
    token: Option<&CancellationToken>,
    future: F,
) -> Option<F::Output> {
    match token {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => None,
            output = future => Some(output),
        },
        None => Some(future.await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RemoteStatus, SetStatusResponse};
    use crate::errors::{SmsActivateErrorCode, SmsActivateServiceError};
    use crate::wait::sleeper::TokioSleeper;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    type StatusAnswer = Result<(RemoteStatus, Option<SmsCode>)>;

    /// Answers status polls from a script and records lifecycle calls.
    #[derive(Default)]
    struct ScriptedApi {
        statuses: Mutex<VecDeque<StatusAnswer>>,
        set_status_answer: Mutex<Option<Result<SetStatusResponse>>>,
        polls: AtomicUsize,
        transitions: Mutex<Vec<(ActivationId, LifecycleTransition)>>,
    }

    impl ScriptedApi {
        fn new(statuses: Vec<StatusAnswer>) -> Self {
            Self {
                statuses: Mutex::new(statuses.into()),
                ..Default::default()
            }
        }

        fn failing_set_status(self, error: SmsActivateError) -> Self {
            *self.set_status_answer.lock().unwrap() = Some(Err(error));
            self
        }

        fn polls(&self) -> usize {
            self.polls.load(Ordering::SeqCst)
        }

        fn transitions(&self) -> Vec<(ActivationId, LifecycleTransition)> {
            self.transitions.lock().unwrap().clone()
        }
    }

    impl ActivationApi for ScriptedApi {
        async fn get_status(&self, _id: ActivationId) -> StatusAnswer {
            self.polls.fetch_add(1, Ordering::SeqCst);
            self.statuses
                .lock()
                .unwrap()
                .pop_front()
                .expect("status script exhausted")
        }

        async fn set_status(&self, request: SetStatusRequest) -> Result<SetStatusResponse> {
            self.transitions
                .lock()
                .unwrap()
                .push((request.id, request.status));
            match self.set_status_answer.lock().unwrap().take() {
                Some(answer) => answer,
                None => Ok(match request.status {
                    LifecycleTransition::CancelActivation => SetStatusResponse::Cancel,
                    _ => SetStatusResponse::Activation,
                }),
            }
        }
    }

    /// Records requested sleeps instead of sleeping.
    #[derive(Default)]
    struct RecordingSleeper {
        sleeps: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        fn sleeps(&self) -> Vec<Duration> {
            self.sleeps.lock().unwrap().clone()
        }
    }

    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.sleeps.lock().unwrap().push(duration);
        }
    }

    fn waiting() -> StatusAnswer {
        Ok((RemoteStatus::WaitCode, None))
    }

    fn ok(code: &str) -> StatusAnswer {
        Ok((RemoteStatus::Ok, Some(SmsCode::new(code))))
    }

    const ID: ActivationId = ActivationId::new(12345);

    fn options(max_attempts: u32, notify: bool) -> WaitOptions {
        WaitOptions::default()
            .with_max_attempts(max_attempts)
            .with_notify_completion_to_server(notify)
    }

    #[tokio::test]
    async fn test_code_after_two_waits() {
        let api = ScriptedApi::new(vec![waiting(), waiting(), ok("9999")]);
        let sleeper = RecordingSleeper::default();

        let code = CodeWaiter::new(&api, &sleeper, options(5, false))
            .wait(ID)
            .await
            .unwrap();

        assert_eq!(code, "9999");
        assert_eq!(api.polls(), 3);
        assert_eq!(sleeper.sleeps(), vec![Duration::from_secs(3); 2]);
        assert!(api.transitions().is_empty());
    }

    #[tokio::test]
    async fn test_zero_attempts_fails_without_polling() {
        let api = ScriptedApi::new(vec![]);
        let sleeper = RecordingSleeper::default();

        let result = CodeWaiter::new(&api, &sleeper, options(0, true)).wait(ID).await;

        assert!(matches!(
            result,
            Err(SmsActivateError::NoCodeReceived { attempts: 0, .. })
        ));
        assert_eq!(api.polls(), 0);
        assert!(sleeper.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_budget_exhausted() {
        let api = ScriptedApi::new(vec![
            waiting(),
            Ok((RemoteStatus::WaitResend, None)),
            waiting(),
        ]);
        let sleeper = RecordingSleeper::default();

        let result = CodeWaiter::new(&api, &sleeper, options(3, false)).wait(ID).await;

        match result {
            Err(SmsActivateError::NoCodeReceived {
                activation_id,
                attempts,
            }) => {
                assert_eq!(activation_id, ID);
                assert_eq!(attempts, 3);
            }
            other => panic!("Expected NoCodeReceived, got {:?}", other),
        }
        assert_eq!(api.polls(), 3);
        assert_eq!(sleeper.sleeps().len(), 3);
    }

    #[tokio::test]
    async fn test_wait_retry_returns_code_immediately() {
        let api = ScriptedApi::new(vec![Ok((RemoteStatus::WaitRetry, Some(SmsCode::new("1111"))))]);
        let sleeper = RecordingSleeper::default();

        let code = CodeWaiter::new(&api, &sleeper, options(5, false))
            .wait(ID)
            .await
            .unwrap();

        assert_eq!(code, "1111");
        assert!(sleeper.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_ok_without_code_is_malformed() {
        let api = ScriptedApi::new(vec![Ok((RemoteStatus::Ok, None))]);
        let sleeper = RecordingSleeper::default();

        let result = CodeWaiter::new(&api, &sleeper, options(5, true)).wait(ID).await;

        assert!(matches!(
            result,
            Err(SmsActivateError::MalformedResponse { .. })
        ));
        assert!(api.transitions().is_empty());
    }

    #[tokio::test]
    async fn test_notify_completes_activation() {
        let api = ScriptedApi::new(vec![waiting(), ok("4242")]);
        let sleeper = RecordingSleeper::default();

        let code = CodeWaiter::new(&api, &sleeper, options(5, true))
            .wait(ID)
            .await
            .unwrap();

        assert_eq!(code, "4242");
        assert_eq!(
            api.transitions(),
            vec![(ID, LifecycleTransition::CompleteActivation)]
        );
    }

    #[tokio::test]
    async fn test_completion_failure_propagates() {
        let api = ScriptedApi::new(vec![ok("4242")]).failing_set_status(
            SmsActivateError::malformed("ACCESS_UNKNOWN"),
        );
        let sleeper = RecordingSleeper::default();

        let result = CodeWaiter::new(&api, &sleeper, options(5, true)).wait(ID).await;

        assert!(matches!(
            result,
            Err(SmsActivateError::MalformedResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_cancel_with_notify_cancels_once() {
        let api = ScriptedApi::new(vec![Ok((RemoteStatus::Cancel, None))]);
        let sleeper = RecordingSleeper::default();

        let result = CodeWaiter::new(&api, &sleeper, options(5, true)).wait(ID).await;

        assert!(matches!(
            result,
            Err(SmsActivateError::ActivationCancelled { activation_id }) if activation_id == ID
        ));
        assert_eq!(
            api.transitions(),
            vec![(ID, LifecycleTransition::CancelActivation)]
        );
    }

    #[tokio::test]
    async fn test_cancel_without_notify_sends_nothing() {
        let api = ScriptedApi::new(vec![waiting(), Ok((RemoteStatus::Cancel, None))]);
        let sleeper = RecordingSleeper::default();

        let result = CodeWaiter::new(&api, &sleeper, options(5, false)).wait(ID).await;

        assert!(matches!(
            result,
            Err(SmsActivateError::ActivationCancelled { .. })
        ));
        assert!(api.transitions().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_notification_failure_propagates() {
        let service_error = SmsActivateServiceError::new(
            SmsActivateErrorCode::EarlyCancelDenied,
            "EARLY_CANCEL_DENIED".to_string(),
        );
        let api = ScriptedApi::new(vec![Ok((RemoteStatus::Cancel, None))])
            .failing_set_status(SmsActivateError::Service(service_error));
        let sleeper = RecordingSleeper::default();

        let result = CodeWaiter::new(&api, &sleeper, options(5, true)).wait(ID).await;

        let err = result.unwrap_err();
        assert_eq!(
            err.service_code(),
            Some(&SmsActivateErrorCode::EarlyCancelDenied)
        );
        assert_eq!(api.transitions().len(), 1);
    }

    #[tokio::test]
    async fn test_status_error_is_not_retried() {
        let api = ScriptedApi::new(vec![
            waiting(),
            Err(SmsActivateError::malformed("garbage")),
            ok("1234"),
        ]);
        let sleeper = RecordingSleeper::default();

        let result = CodeWaiter::new(&api, &sleeper, options(5, false)).wait(ID).await;

        assert!(matches!(
            result,
            Err(SmsActivateError::MalformedResponse { .. })
        ));
        assert_eq!(api.polls(), 2);
    }

    #[tokio::test]
    async fn test_already_cancelled_token_sends_no_poll() {
        let api = ScriptedApi::new(vec![ok("1234")]);
        let sleeper = RecordingSleeper::default();
        let token = CancellationToken::new();
        token.cancel();

        let result = CodeWaiter::new(&api, &sleeper, options(5, true))
            .wait_cancellable(ID, &token)
            .await;

        assert!(matches!(
            result,
            Err(SmsActivateError::Cancelled { polls: 0, .. })
        ));
        assert_eq!(api.polls(), 0);
        assert!(api.transitions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_sleep_stops_polling() {
        let api = ScriptedApi::new(vec![waiting(), waiting(), ok("1234")]);
        let sleeper = TokioSleeper;
        let token = CancellationToken::new();

        let canceller = {
            let token = token.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(4)).await;
                token.cancel();
            })
        };

        let result = CodeWaiter::new(&api, &sleeper, options(5, false))
            .wait_cancellable(ID, &token)
            .await;
        canceller.await.unwrap();

        match result {
            Err(SmsActivateError::Cancelled {
                activation_id,
                polls,
            }) => {
                assert_eq!(activation_id, ID);
                assert_eq!(polls, 2);
            }
            other => panic!("Expected Cancelled, got {:?}", other),
        }
        assert_eq!(api.polls(), 2);
    }
}
