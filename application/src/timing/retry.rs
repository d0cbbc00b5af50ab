//! Bounded polling for a UI affordance.

use std::time::Duration;
use tracing::trace;

/// How a bounded wait ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T> {
    /// The poll succeeded on the given 1-based attempt.
    Found { value: T, attempt: u32 },
    /// Every attempt failed but the fallback produced a value.
    Fallback(T),
    /// Nothing was found.
    Exhausted,
}

/// Call a poll closure at a fixed interval up to a fixed number of attempts, then
/// try a fallback once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedRetry {
    attempts: u32,
    interval: Duration,
}

impl BoundedRetry {
    pub fn new(attempts: u32, interval: Duration) -> Self {
        Self { attempts, interval }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Run `poll` until it returns `Some`, sleeping `interval` between
    /// attempts. After the last failed attempt `fallback` is called once.
    pub async fn run<T, P, F>(&self, mut poll: P, fallback: F) -> RetryOutcome<T>
    where
        P: FnMut() -> Option<T>,
        F: FnOnce() -> Option<T>,
    {
        for attempt in 1..=self.attempts {
            if let Some(value) = poll() {
                return RetryOutcome::Found { value, attempt };
            }
            trace!("Probe attempt {}/{} failed", attempt, self.attempts);
            if attempt < self.attempts {
                tokio::time::sleep(self.interval).await;
            }
        }

        match fallback() {
            Some(value) => RetryOutcome::Fallback(value),
            None => RetryOutcome::Exhausted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_found_on_later_attempt() {
        let retry = BoundedRetry::new(5, Duration::from_millis(100));
        let mut calls = 0;
        let start = tokio::time::Instant::now();

        let outcome = retry
            .run(
                || {
                    calls += 1;
                    (calls == 3).then_some("send")
                },
                || None,
            )
            .await;

        assert_eq!(outcome, RetryOutcome::Found { value: "send", attempt: 3 });
        assert_eq!(start.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_after_exhaustion() {
        let retry = BoundedRetry::new(3, Duration::from_millis(100));
        let mut calls = 0;

        let outcome = retry
            .run(
                || {
                    calls += 1;
                    None::<&str>
                },
                || Some("generic"),
            )
            .await;

        assert_eq!(calls, 3);
        assert_eq!(outcome, RetryOutcome::Fallback("generic"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted() {
        let retry = BoundedRetry::new(2, Duration::from_millis(10));
        let outcome: RetryOutcome<()> = retry.run(|| None, || None).await;
        assert_eq!(outcome, RetryOutcome::Exhausted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_goes_straight_to_fallback() {
        let retry = BoundedRetry::new(0, Duration::from_millis(10));
        let outcome = retry.run(|| Some(1), || Some(2)).await;
        assert_eq!(outcome, RetryOutcome::Fallback(2));
    }
}
