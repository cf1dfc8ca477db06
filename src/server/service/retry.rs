//! Retry logic with exponential backoff for service reads.
//!
//! Reads are retried when they fail with a transient error such as a dropped database
//! connection. Writes are not routed through here, a failed write is reported to the caller
//! who decides whether to submit it again.

use std::{future::Future, pin::Pin, time::Duration};

use dioxus_logger::tracing;

use crate::server::error::{retry::ErrorRetryStrategy, Error};

/// Future returned by an operation passed to [`RetryContext::execute_with_retry`].
pub type RetryFuture<R> = Pin<Box<dyn Future<Output = Result<R, Error>> + Send>>;

/// Context for executing operations with automatic retry logic.
///
/// # Retry Behavior
///
/// - **Max attempts**: 3 (default)
/// - **Backoff strategy**: Exponential starting at 1 second (1s, 2s, 4s, ...)
/// - **Retry conditions**: Only errors with `ErrorRetryStrategy::Retry` are retried
/// - **Permanent failures**: Errors with `ErrorRetryStrategy::Fail` return immediately
///
/// # Example
///
/// ```ignore
/// let ctx = RetryContext::new();
/// let db = self.db.clone();
///
/// ctx.execute_with_retry("get residents", || {
///     let db = db.clone();
///
///     Box::pin(async move {
///         let residents = ResidentRepository::new(&db).get_all().await?;
///
///         Ok(residents)
///     })
/// })
/// .await?;
/// ```
pub struct RetryContext {
    /// Maximum number of attempts before giving up
    max_attempts: u32,
    /// Initial backoff duration in seconds (doubles with each retry)
    initial_backoff_secs: u64,
}

impl RetryContext {
    const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    const DEFAULT_INITIAL_BACKOFF_SECS: u64 = 1;

    /// Creates a new retry context with 3 max attempts and 1 second initial backoff.
    pub fn new() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            initial_backoff_secs: Self::DEFAULT_INITIAL_BACKOFF_SECS,
        }
    }

    /// Executes an operation with automatic retry logic and exponential backoff.
    ///
    /// # Arguments
    /// - `description` - Human-readable description for logging (e.g., "get incident ID 4")
    /// - `operation` - Function creating a fresh attempt of the operation on each call
    ///
    /// # Returns
    /// - `Ok(R)` - Operation succeeded
    /// - `Err(Error)` - Operation failed permanently or exhausted all retry attempts
    pub async fn execute_with_retry<R, F>(&self, description: &str, operation: F) -> Result<R, Error>
    where
        F: Fn() -> RetryFuture<R>,
    {
        let mut attempt_count = 0;

        loop {
            tracing::debug!(
                "Processing {} (attempt {}/{})",
                description,
                attempt_count + 1,
                self.max_attempts
            );

            match operation().await {
                Ok(result) => {
                    tracing::debug!("Successfully processed {}", description);
                    return Ok(result);
                }
                Err(e) => match e.to_retry_strategy() {
                    ErrorRetryStrategy::Fail => {
                        tracing::debug!("Permanent error for {}: {:?}", description, e);
                        return Err(e);
                    }
                    ErrorRetryStrategy::Retry => {
                        attempt_count += 1;
                        if attempt_count >= self.max_attempts {
                            tracing::error!(
                                "Max attempts ({}) exceeded for {}: {:?}",
                                self.max_attempts,
                                description,
                                e
                            );
                            return Err(e);
                        }

                        let backoff_secs = self.initial_backoff_secs * 2_u64.pow(attempt_count - 1);
                        let backoff = Duration::from_secs(backoff_secs);

                        tracing::warn!(
                            "Retrying {} (attempt {}/{}) after {:?}: {:?}",
                            description,
                            attempt_count,
                            self.max_attempts,
                            backoff,
                            e
                        );

                        tokio::time::sleep(backoff).await;
                    }
                },
            }
        }
    }
}

impl Default for RetryContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    };

    use sea_orm::{DbErr, RuntimeErr};

    use super::*;

    fn counting_operation(
        attempts: Arc<AtomicU32>,
        error: fn() -> Error,
    ) -> impl Fn() -> RetryFuture<()> {
        move || {
            let attempts = attempts.clone();

            Box::pin(async move {
                attempts.fetch_add(1, Ordering::SeqCst);

                Err(error())
            })
        }
    }

    /// Expect connection errors to be retried up to the attempt limit
    #[tokio::test(start_paused = true)]
    async fn retries_transient_errors() {
        let attempts = Arc::new(AtomicU32::new(0));
        let ctx = RetryContext::new();

        let result = ctx
            .execute_with_retry(
                "flaky read",
                counting_operation(attempts.clone(), || {
                    Error::DbErr(DbErr::Conn(RuntimeErr::Internal(
                        "connection reset".to_string(),
                    )))
                }),
            )
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    /// Expect permanent errors to return after a single attempt
    #[tokio::test]
    async fn fails_fast_on_permanent_errors() {
        let attempts = Arc::new(AtomicU32::new(0));
        let ctx = RetryContext::new();

        let result = ctx
            .execute_with_retry(
                "broken read",
                counting_operation(attempts.clone(), || {
                    Error::DbErr(DbErr::Custom("syntax error".to_string()))
                }),
            )
            .await;

        assert!(matches!(result, Err(Error::DbErr(DbErr::Custom(_)))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    /// Expect the first successful attempt to be returned
    #[tokio::test]
    async fn returns_successful_result() {
        let ctx = RetryContext::new();

        let result = ctx
            .execute_with_retry("read", || Box::pin(async { Ok(42) }))
            .await;

        assert!(matches!(result, Ok(42)));
    }
}
