//! Transport-level retries.
//!
//! Only network failures and the statuses accepted by [`is_retryable_status`]
//! are retried here. The single re-send triggered by the developer-key
//! defect is decided in [`crate::envelope`] and never consumes this budget.

use rand::Rng;
use std::time::Duration;

/// How many times, and how patiently, a failed call is re-sent.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Re-sends allowed after the first attempt. Zero disables retries.
    pub max_attempts: u32,
    /// Base wait used by every [`BackoffStrategy`].
    pub initial_delay: Duration,
    /// Upper bound on a computed backoff wait.
    pub max_delay: Duration,
    pub backoff: BackoffStrategy,
    /// Prefer the server's `Retry-After` over the computed backoff.
    pub respect_retry_after: bool,
    /// Upper bound on a server-provided `Retry-After`.
    pub max_retry_after: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff: BackoffStrategy::ExponentialWithJitter { factor: 2.0 },
            respect_retry_after: true,
            max_retry_after: Duration::from_secs(60),
        }
    }
}

impl RetryConfig {
    /// A configuration that never re-sends.
    pub fn no_retry() -> Self {
        Self::default().with_max_attempts(0)
    }

    pub fn with_max_attempts(self, max_attempts: u32) -> Self {
        Self { max_attempts, ..self }
    }

    pub fn with_initial_delay(self, initial_delay: Duration) -> Self {
        Self { initial_delay, ..self }
    }

    pub fn with_max_delay(self, max_delay: Duration) -> Self {
        Self { max_delay, ..self }
    }

    pub fn with_backoff(self, backoff: BackoffStrategy) -> Self {
        Self { backoff, ..self }
    }

    /// Ignore `Retry-After` and always use the computed backoff.
    pub fn ignoring_retry_after(self) -> Self {
        Self {
            respect_retry_after: false,
            ..self
        }
    }
}

/// Shape of the wait between consecutive re-sends.
#[derive(Debug, Clone, Copy)]
pub enum BackoffStrategy {
    Constant,
    /// `initial * (n + 1)`
    Linear,
    /// `initial * factor^n`
    Exponential { factor: f64 },
    /// `initial * factor^n` plus up to the same amount of random jitter.
    ExponentialWithJitter { factor: f64 },
}

impl BackoffStrategy {
    /// Wait before re-send number `retry` (starting at 0), capped at `cap`.
    pub fn delay(&self, retry: u32, initial: Duration, cap: Duration) -> Duration {
        let grown = |factor: f64| initial.as_secs_f64() * factor.powi(retry as i32);

        let wait = match *self {
            BackoffStrategy::Constant => initial,
            BackoffStrategy::Linear => initial.saturating_mul(retry.saturating_add(1)),
            BackoffStrategy::Exponential { factor } => seconds(grown(factor)),
            BackoffStrategy::ExponentialWithJitter { factor } => {
                let base = grown(factor);
                seconds(base + base * rand::rng().random::<f64>())
            }
        };

        wait.min(cap)
    }
}

/// Converts without panicking on overflow or non-finite input.
fn seconds(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

/// Retry budget of one logical call.
///
/// A fresh policy is created per call, so attempts never leak between
/// requests sharing a client.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
    retries: u32,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config, retries: 0 }
    }

    /// Re-sends consumed so far.
    pub fn attempt(&self) -> u32 {
        self.retries
    }

    pub fn should_retry(&self) -> bool {
        self.retries < self.config.max_attempts
    }

    /// Consume one re-send and return how long to wait first. `None` means
    /// the budget is spent and the failure should surface.
    pub fn next_delay(&mut self, retry_after: Option<Duration>) -> Option<Duration> {
        if !self.should_retry() {
            return None;
        }

        let config = &self.config;
        let wait = retry_after
            .filter(|_| config.respect_retry_after)
            .map(|hint| hint.min(config.max_retry_after))
            .unwrap_or_else(|| {
                config
                    .backoff
                    .delay(self.retries, config.initial_delay, config.max_delay)
            });

        self.retries += 1;
        Some(wait)
    }
}

/// Statuses treated as transient when returned by the gateway.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}
