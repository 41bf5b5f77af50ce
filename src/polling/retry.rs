//! Bounded retry for repeatable reads.
//!
//! A [`RetryPolicy`] re-runs an operation after a transient failure up to `max_retries`
//! times (so at most `max_retries + 1` attempts). It wraps the fetch handed to a poller
//! rather than living inside it, so a poll only sees the failures that outlasted the retries.

use super::normalize::ServiceError;
use crate::addition_actor::AdditionError;
use crate::clients::CatalogError;
use crate::config::StorefrontConfig;
use crate::favorite_actor::FavoriteError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::warn;

/// Retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Errors that can tell a transport failure from a rejected request.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

pub type BoxedFetch<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, Duration::ZERO)
    }
}

impl RetryPolicy {
    pub const fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// A single attempt.
    pub const fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(config.retry_attempts, config.retry_delay())
    }

    /// Runs `op`, retrying retryable failures. Returns the last error once retries run out.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + Display,
    {
        let mut retries = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && retries < self.max_retries => {
                    retries += 1;
                    warn!(retry = retries, max_retries = self.max_retries, error = %e, "Retrying");
                    if !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Wraps `op` so every call goes through [`run`](Self::run).
    pub fn retrying<T, E, F, Fut>(self, op: F) -> impl Fn() -> BoxedFetch<T, E> + Send + Sync + Clone
    where
        F: Fn() -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Retryable + Display + Send + 'static,
    {
        move || {
            let op = op.clone();
            let fetch: BoxedFetch<T, E> = Box::pin(async move { self.run(op).await });
            fetch
        }
    }
}

impl Retryable for ServiceError {
    fn is_retryable(&self) -> bool {
        self.error_code.is_transient()
    }
}

impl Retryable for OrderError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            OrderError::ActorCommunicationError(_) | OrderError::CatalogUnavailable(_)
        )
    }
}

impl Retryable for ProductError {
    fn is_retryable(&self) -> bool {
        matches!(self, ProductError::ActorCommunicationError(_))
    }
}

impl Retryable for AdditionError {
    fn is_retryable(&self) -> bool {
        matches!(self, AdditionError::ActorCommunicationError(_))
    }
}

impl Retryable for CatalogError {
    fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Product(e) => e.is_retryable(),
            CatalogError::Addition(e) => e.is_retryable(),
        }
    }
}

impl Retryable for FavoriteError {
    fn is_retryable(&self) -> bool {
        matches!(self, FavoriteError::ActorCommunicationError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polling::normalize::ErrorCode;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn failing_until(
        successful_call: u32,
        code: ErrorCode,
    ) -> (
        Arc<AtomicU32>,
        impl Fn() -> BoxedFetch<u32, ServiceError> + Send + Sync + Clone,
    ) {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let op = move || {
            let call = counter.fetch_add(1, Ordering::SeqCst) + 1;
            Box::pin(async move {
                if call >= successful_call {
                    Ok(call)
                } else {
                    Err(ServiceError::new(code))
                }
            }) as BoxedFetch<u32, ServiceError>
        };
        (calls, op)
    }

    #[tokio::test]
    async fn transient_failures_are_retried() {
        let (calls, op) = failing_until(3, ErrorCode::ServiceUnavailable);
        let value = RetryPolicy::default().run(op).await.unwrap();
        assert_eq!(value, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let (calls, op) = failing_until(u32::MAX, ErrorCode::ServiceUnavailable);
        let err = RetryPolicy::default().run(op).await.unwrap_err();
        assert_eq!(err.error_code, ErrorCode::ServiceUnavailable);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn rejected_requests_are_not_retried() {
        let (calls, op) = failing_until(u32::MAX, ErrorCode::NotFound);
        RetryPolicy::default().run(op).await.unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_applied_between_attempts() {
        let (_, op) = failing_until(2, ErrorCode::ServiceUnavailable);
        let policy = RetryPolicy::new(1, Duration::from_millis(500));

        let start = tokio::time::Instant::now();
        policy.retrying(op)().await.unwrap();

        assert_eq!(start.elapsed(), Duration::from_millis(500));
    }
}
