//! Sleep source for the polling loop.

use std::future::Future;
use std::time::Duration;

/// Suspends the polling loop between status queries.
///
/// Swapping the implementation lets tests simulate time without real delays.
#[allow(async_fn_in_trait)]
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
