//! Error categorization and retry strategy.
//!
//! This module maps `reqwest` failures onto the lookup error taxonomy and turns
//! a [`RetryPolicy`] into the delay iterator consumed by `tokio_retry`.

use std::time::Duration;
use tokio_retry::strategy::FixedInterval;

use super::types::GeoError;
use crate::geo::{Backoff, RetryPolicy};

/// Creates the retry delay sequence for a policy.
///
/// The iterator yields one delay per retry, so it is limited to
/// `max_attempts - 1` items: `tokio_retry` makes the initial attempt without
/// consuming a delay. Exponential backoff starts at `initial`, multiplies by
/// `multiplier` on each retry and never exceeds `max`.
pub fn get_retry_strategy(policy: &RetryPolicy) -> Box<dyn Iterator<Item = Duration> + Send> {
    let retries = policy.max_attempts.saturating_sub(1);
    match policy.backoff {
        Backoff::Fixed(delay) => Box::new(FixedInterval::new(delay).take(retries)),
        Backoff::Exponential {
            initial,
            multiplier,
            max,
        } => Box::new(
            std::iter::successors(Some(initial.min(max)), move |delay| {
                Some(delay.saturating_mul(multiplier).min(max))
            })
            .take(retries),
        ),
    }
}

/// Categorizes a `reqwest::Error` into a [`GeoError`].
///
/// Status errors keep their code, timeouts become `Timeout`, and everything
/// else (connect, TLS, body stream, builder) is a `TransportError`.
pub fn categorize_reqwest_error(error: reqwest::Error) -> GeoError {
    if let Some(status) = error.status() {
        return GeoError::HttpError {
            status: status.as_u16(),
        };
    }

    if error.is_timeout() {
        GeoError::Timeout
    } else if error.is_decode() {
        GeoError::MalformedResponse(error.to_string())
    } else {
        GeoError::TransportError(error)
    }
}
