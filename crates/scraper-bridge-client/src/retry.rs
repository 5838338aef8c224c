//! Fixed-delay retry policy for hub requests.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// How often and how far apart a failed hub request is retried.
///
/// The delay is fixed: no jitter and no growth between attempts. Every error
/// is retried the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Pause between two attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Retries used by [`RetryPolicy::default`].
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Delay used by [`RetryPolicy::default`].
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

    /// Create a policy.
    #[must_use]
    pub const fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// A policy that makes a single attempt.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Total number of attempts, including the first.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Run `operation` until it succeeds or the attempts are used up.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt >= self.max_attempts() => return Err(err),
                Err(err) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts(),
                        delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "Hub request failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_RETRIES, Self::DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.delay, Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn persistent_failure_uses_every_attempt() {
        let policy = RetryPolicy::default();
        let started = Instant::now();
        let mut calls = 0;

        let result: Result<(), &str> = policy
            .run(|| {
                calls += 1;
                async { Err("boom") }
            })
            .await;

        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 4);
        // Three pauses between four attempts.
        assert_eq!(started.elapsed(), Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_success_makes_one_attempt() {
        let policy = RetryPolicy::default();
        let started = Instant::now();
        let mut calls = 0;

        let result: Result<u32, &str> = policy
            .run(|| {
                calls += 1;
                async { Ok(7) }
            })
            .await;

        assert_eq!(result, Ok(7));
        assert_eq!(calls, 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_transient_failures() {
        let policy = RetryPolicy::default();
        let mut calls = 0;

        let result: Result<u32, String> = policy
            .run(|| {
                calls += 1;
                let attempt = calls;
                async move {
                    if attempt < 3 {
                        Err(format!("attempt {attempt} failed"))
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;

        assert_eq!(result, Ok(3));
    }

    #[tokio::test]
    async fn none_makes_a_single_attempt() {
        let mut calls = 0;
        let result: Result<(), &str> = RetryPolicy::none()
            .run(|| {
                calls += 1;
                async { Err("boom") }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
