//! When and how long to wait before repeating a failed request.

use std::time::Duration;

/// Why a request is being considered for another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryCause {
    /// HTTP 429.
    RateLimited,
    /// HTTP 5xx.
    ServerError,
    /// Connection failure or client-side timeout.
    Network,
}

/// Retry policy for transient failures.
///
/// The solver backend is a single FastAPI process; a restart shows up as a
/// burst of 502/503 answers or refused connections, and 429s come from the
/// reverse proxy in front of it. Delays double from `initial_delay` up to
/// `max_delay`; a 429 with `Retry-After` waits the announced time instead.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use shiftboard_lib::rate_limit::RetryConfig;
/// use shiftboard_lib::rate_limit::RetryCause;
///
/// let config = RetryConfig::default()
///     .max_retries(5)
///     .max_delay(Duration::from_secs(5));
/// assert!(config.allows(RetryCause::ServerError, 4));
/// assert!(!config.allows(RetryCause::ServerError, 5));
///
/// assert!(!RetryConfig::no_retry().allows(RetryCause::Network, 0));
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts allowed after the first one.
    pub max_retries: u32,
    /// Wait before the first retry.
    pub initial_delay: Duration,
    /// Upper bound for the doubled wait.
    pub max_delay: Duration,
    pub retry_on_429: bool,
    pub retry_on_5xx: bool,
    pub retry_on_network: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            retry_on_429: true,
            retry_on_5xx: true,
            retry_on_network: true,
        }
    }
}

impl RetryConfig {
    /// A policy that never retries. Every failure surfaces immediately.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            retry_on_429: false,
            retry_on_5xx: false,
            retry_on_network: false,
            ..Default::default()
        }
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Enables or disables retrying for one kind of failure.
    pub fn retry_on(mut self, cause: RetryCause, enabled: bool) -> Self {
        match cause {
            RetryCause::RateLimited => self.retry_on_429 = enabled,
            RetryCause::ServerError => self.retry_on_5xx = enabled,
            RetryCause::Network => self.retry_on_network = enabled,
        }
        self
    }

    /// Returns `true` if a request that already retried `attempts` times may
    /// try again after failing for `cause`.
    pub fn allows(&self, cause: RetryCause, attempts: u32) -> bool {
        let enabled = match cause {
            RetryCause::RateLimited => self.retry_on_429,
            RetryCause::ServerError => self.retry_on_5xx,
            RetryCause::Network => self.retry_on_network,
        };
        enabled && attempts < self.max_retries
    }

    /// Returns the delay that follows `current`, doubled and capped at `max_delay`.
    pub(crate) fn next_delay(&self, current: Duration) -> Duration {
        (current * 2).min(self.max_delay)
    }
}
