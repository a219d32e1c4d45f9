//! Bounded retry with capped exponential backoff.
//!
//! The policy is a pure state machine over (error kind, attempt count) so it
//! can be tested without a store or a clock; [`run_with_retry`] is the async
//! driver that walks it.

use crate::{Error, Result, SleepProvider};
use core::future::Future;
use core::time::Duration;

/// Default attempt ceiling for transient failures.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 4;

/// Default first backoff delay.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(50);

/// Default backoff cap.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(1);

/// Retry policy for transient store failures: up to `max_attempts` tries,
/// doubling the delay from `base_delay` up to `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

/// States of the retry machine for one retried operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryState {
    /// Attempt number `attempt` (1-based) is running.
    Attempting { attempt: u32 },
    /// A transient failure was observed; wait `delay`, then run `attempt`.
    Backoff { attempt: u32, delay: Duration },
    /// The operation succeeded.
    Succeeded,
    /// A fatal (non-retryable) error was observed.
    FatalFailed,
    /// A transient error persisted through the attempt ceiling.
    RetriesExhausted,
}

impl RetryPolicy {
    /// The backoff delay preceding `attempt` (1-based): doubled per attempt
    /// and capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(20);
        self.base_delay.saturating_mul(1 << exp).min(self.max_delay)
    }

    /// Pure transition function: maps the outcome of `attempt` to the next
    /// state.
    pub fn next_state(&self, outcome: Result<(), &Error>, attempt: u32) -> RetryState {
        match outcome {
            Ok(()) => RetryState::Succeeded,
            Err(err) if !err.is_transient() => RetryState::FatalFailed,
            Err(_) if attempt >= self.max_attempts => RetryState::RetriesExhausted,
            Err(_) => RetryState::Backoff {
                attempt: attempt + 1,
                delay: self.delay_for(attempt),
            },
        }
    }
}

/// Drives `op` through the retry machine until it succeeds, fails fatally,
/// or exhausts the attempt ceiling.
///
/// `op` receives the 1-based attempt number. Exhaustion is reported as
/// [`Error::RetriesExhausted`] wrapping the last transient error.
pub async fn run_with_retry<S, T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T>
where
    S: SleepProvider,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1;
    loop {
        let err = match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        match policy.next_state(Err(&err), attempt) {
            RetryState::Backoff { attempt: next, delay } => {
                let delay_ms = delay.as_millis();
                tracing::warn!(attempt, delay_ms, error = %err, "transient failure, backing off");
                S::sleep_for(delay).await;
                attempt = next;
            }
            RetryState::RetriesExhausted => {
                tracing::error!(attempt, error = %err, "retries exhausted");
                return Err(Error::RetriesExhausted {
                    attempts: attempt,
                    last: Box::new(err),
                });
            }
            // Fatal and any non-retryable outcome surface as-is.
            _ => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokioYield;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn transient() -> Error {
        Error::StoreUnavailable {
            context: "down".into(),
        }
    }

    fn fatal() -> Error {
        Error::InvalidCount { count: 0, max: 500 }
    }

    #[test]
    fn success_transitions_to_succeeded() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.next_state(Ok(()), 1), RetryState::Succeeded);
        assert_eq!(policy.next_state(Ok(()), 4), RetryState::Succeeded);
    }

    #[test]
    fn fatal_error_fails_without_backoff() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.next_state(Err(&fatal()), 1), RetryState::FatalFailed);
    }

    #[test]
    fn transient_error_backs_off_until_ceiling() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.next_state(Err(&transient()), 1),
            RetryState::Backoff {
                attempt: 2,
                delay: Duration::from_millis(50)
            }
        );
        assert_eq!(
            policy.next_state(Err(&transient()), 3),
            RetryState::Backoff {
                attempt: 4,
                delay: Duration::from_millis(200)
            }
        );
        assert_eq!(
            policy.next_state(Err(&transient()), 4),
            RetryState::RetriesExhausted
        );
    }

    #[test]
    fn delay_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_millis(50));
        assert_eq!(policy.delay_for(2), Duration::from_millis(100));
        assert_eq!(policy.delay_for(5), Duration::from_millis(800));
        assert_eq!(policy.delay_for(6), Duration::from_secs(1));
        assert_eq!(policy.delay_for(30), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn driver_retries_transient_then_succeeds() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);
        let result = run_with_retry::<TokioYield, _, _, _>(&policy, |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(transient())
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn driver_fails_fast_on_fatal() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);
        let result: Result<()> = run_with_retry::<TokioYield, _, _, _>(&policy, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(fatal()) }
        })
        .await;
        assert!(matches!(result, Err(Error::InvalidCount { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn driver_converts_exhaustion() {
        let policy = RetryPolicy {
            max_attempts: 3,
            ..RetryPolicy::default()
        };
        let calls = AtomicU32::new(0);
        let result: Result<()> = run_with_retry::<TokioYield, _, _, _>(&policy, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(transient()) }
        })
        .await;
        match result {
            Err(Error::RetriesExhausted { attempts, last }) => {
                assert_eq!(attempts, 3);
                assert!(matches!(*last, Error::StoreUnavailable { .. }));
            }
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
