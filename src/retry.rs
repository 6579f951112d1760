//! Bounded retry policy and the generic fetch-with-retry utility.
//!
//! [`fetch_with_retry`] runs a fallible async operation up to
//! [`RetryPolicy::max_attempts`] times, retrying only errors the caller's
//! classifier marks as transient. It knows nothing about the page; callers
//! decide what a terminal failure looks like to the user.

use std::future::Future;
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// How many times to try an operation and how long to wait in between.
///
/// `backoff_base_ms = 0` retries immediately. Otherwise the delay before
/// attempt `n + 1` is `base × 2ⁿ⁻¹ ± 25 %` jitter, capped at 60 s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_base_ms: u64,
}

impl RetryPolicy {
    /// Immediate retries, no delay. A zero attempt count is raised to one.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base_ms: 0,
        }
    }

    pub fn with_backoff(mut self, backoff_base_ms: u64) -> Self {
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_base_ms(&self) -> u64 {
        self.backoff_base_ms
    }

    fn delay_after(&self, attempt: u32) -> Option<Duration> {
        const MAX_DELAY_MS: u64 = 60_000;
        if self.backoff_base_ms == 0 {
            return None;
        }
        let computed = self
            .backoff_base_ms
            .saturating_mul(1u64 << (attempt.saturating_sub(1)).min(10));
        let capped = computed.min(MAX_DELAY_MS);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
        Some(Duration::from_millis(delay_ms))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::immediate(DEFAULT_MAX_ATTEMPTS)
    }
}

/// Final failure of a retried operation.
#[derive(Debug)]
pub struct RetryError<E> {
    /// Attempts actually made, including the failing one.
    pub attempts: u32,
    pub last: E,
}

/// Runs `operation` until it succeeds, fails non-transiently, or the policy's
/// attempts are used up.
pub async fn fetch_with_retry<T, E, F, Fut, C>(
    policy: &RetryPolicy,
    is_transient: C,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                let remaining = policy.max_attempts.saturating_sub(attempt);
                if !is_transient(&err) || remaining == 0 {
                    return Err(RetryError {
                        attempts: attempt,
                        last: err,
                    });
                }
                tracing::warn!(
                    attempt,
                    remaining,
                    error = %err,
                    "transient failure, retrying"
                );
                if let Some(delay) = policy.delay_after(attempt) {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
