//! Retry loop: run a closure until success or policy says stop.

use super::classify;
use super::error::FetchError;
use super::policy::{RetryDecision, RetryPolicy};

/// Runs a closure until it succeeds or the retry policy says to stop.
/// On retryable failure, sleeps for the backoff duration then tries again.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut f: F) -> Result<T, FetchError>
where
    F: FnMut() -> Result<T, FetchError>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => {
                let kind = classify::classify(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => return Err(e),
                    RetryDecision::RetryAfter(d) => {
                        let delay_ms = d.as_millis() as u64;
                        tracing::debug!(attempt, ?kind, delay_ms, "retrying: {}", e);
                        std::thread::sleep(d);
                        attempt += 1;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 5,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    #[test]
    fn succeeds_after_throttling() {
        let mut calls = 0;
        let out = run_with_retry(&fast_policy(), || {
            calls += 1;
            if calls < 5 {
                Err(FetchError::Http(503))
            } else {
                Ok("body")
            }
        });
        assert_eq!(out.unwrap(), "body");
        assert_eq!(calls, 5);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let mut calls = 0;
        let out: Result<(), _> = run_with_retry(&fast_policy(), || {
            calls += 1;
            Err(FetchError::Http(502))
        });
        assert_eq!(out.unwrap_err().status(), Some(502));
        assert_eq!(calls, 5);
    }

    #[test]
    fn non_retryable_status_single_attempt() {
        let mut calls = 0;
        let out: Result<(), _> = run_with_retry(&fast_policy(), || {
            calls += 1;
            Err(FetchError::Http(404))
        });
        assert_eq!(out.unwrap_err().status(), Some(404));
        assert_eq!(calls, 1);
    }
}
