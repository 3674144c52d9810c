//! Wait-for-code options.

use std::time::Duration;

/// Default number of status polls (about two minutes at the default interval).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 40;

/// Default pause between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Controls how long the wait-for-code engine keeps polling and what it tells
/// the service once it is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitOptions {
    /// Maximum number of status polls. Zero fails immediately.
    pub max_attempts: u32,
    /// Pause between polls while the service is still waiting for the SMS.
    pub poll_interval: Duration,
    /// Complete the activation after a code arrives, or cancel it when the
    /// service reports it cancelled.
    pub notify_completion_to_server: bool,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            notify_completion_to_server: false,
        }
    }
}

impl WaitOptions {
    /// Create a new builder for WaitOptions.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sms_activate_api::WaitOptions;
    /// use std::time::Duration;
    ///
    /// let options = WaitOptions::builder()
    ///     .max_attempts(20)
    ///     .poll_interval(Duration::from_secs(5))
    ///     .notify_completion_to_server(true)
    ///     .build();
    ///
    /// assert_eq!(options.max_attempts, 20);
    /// assert!(options.notify_completion_to_server);
    /// ```
    pub fn builder() -> WaitOptionsBuilder {
        WaitOptionsBuilder::default()
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_notify_completion_to_server(mut self, notify: bool) -> Self {
        self.notify_completion_to_server = notify;
        self
    }

    /// Upper bound on time spent sleeping between polls.
    pub fn max_wait(&self) -> Duration {
        self.poll_interval.saturating_mul(self.max_attempts)
    }
}

/// Builder for WaitOptions.
#[derive(Debug, Clone, Default)]
pub struct WaitOptionsBuilder {
    options: WaitOptions,
}

impl WaitOptionsBuilder {
    /// Set the polling budget.
    ///
    /// Default: 40
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.options.max_attempts = max_attempts;
        self
    }

    /// Set the pause between polls.
    ///
    /// Default: 3 seconds
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.options.poll_interval = interval;
        self
    }

    /// Complete/cancel the activation on the service when done.
    ///
    /// Default: false
    pub fn notify_completion_to_server(mut self, notify: bool) -> Self {
        self.options.notify_completion_to_server = notify;
        self
    }

    pub fn build(self) -> WaitOptions {
        self.options
    }
}
