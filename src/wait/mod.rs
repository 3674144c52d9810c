//! Wait-for-code engine: bounded, cancellable polling of an activation's status.

pub(crate) mod engine;
pub(crate) mod options;
pub(crate) mod sleeper;
pub(crate) mod traits;

pub use engine::CodeWaiter;
pub use options::{DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL, WaitOptions, WaitOptionsBuilder};
pub use sleeper::{Sleeper, TokioSleeper};
pub use traits::ActivationApi;
