//! Retry policy for provider requests.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::config::{
    RETRYABLE_STATUS_CODES, RETRY_FACTOR, RETRY_INITIAL_DELAY_MS, RETRY_MAX_ATTEMPTS,
    RETRY_MAX_DELAY_SECS,
};
use crate::error_handling::GeoError;

/// Delay growth between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// The same delay before every retry.
    Fixed(Duration),
    /// `initial`, then multiplied by `multiplier` on each retry, capped at `max`.
    Exponential {
        initial: Duration,
        multiplier: u32,
        max: Duration,
    },
}

/// Governs how a single fetch retries.
///
/// Built once at startup and shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: usize,
    pub backoff: Backoff,
    /// Status codes that trigger a retry.
    pub retryable_status_codes: BTreeSet<u16>,
    /// Retry when an attempt hits the per-attempt timeout.
    pub retry_on_timeout: bool,
    /// Retry connection-level failures (refused, DNS, TLS).
    pub retry_on_connect: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: RETRY_MAX_ATTEMPTS,
            backoff: Backoff::Exponential {
                initial: Duration::from_millis(RETRY_INITIAL_DELAY_MS),
                multiplier: RETRY_FACTOR,
                max: Duration::from_secs(RETRY_MAX_DELAY_SECS),
            },
            retryable_status_codes: RETRYABLE_STATUS_CODES.into_iter().collect(),
            retry_on_timeout: true,
            retry_on_connect: true,
        }
    }
}

impl RetryPolicy {
    /// Determines whether a failed attempt should be retried.
    ///
    /// Malformed bodies are never retried: the provider answered, and asking
    /// again would get the same answer.
    pub fn is_retryable(&self, error: &GeoError) -> bool {
        match error {
            GeoError::Timeout => self.retry_on_timeout,
            GeoError::HttpError { status } => self.retryable_status_codes.contains(status),
            GeoError::TransportError(e) => self.retry_on_connect && (e.is_connect() || e.is_request()),
            GeoError::MalformedResponse(_) => false,
        }
    }
}
