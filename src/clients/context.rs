//! Caller-driven cancellation and deadlines.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::clients::errors::TransportError;

/// Cancellation and deadline for a single call.
///
/// Work run through [`CallContext::run`] is raced against the token and the
/// deadline. When either fires first the work future is dropped, which
/// aborts in-flight socket I/O rather than merely abandoning the wait.
///
/// # Example
///
/// ```rust
/// use moov_api::clients::CallContext;
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
///
/// let token = CancellationToken::new();
/// let ctx = CallContext::new()
///     .with_timeout(Duration::from_secs(10))
///     .with_cancellation(token.clone());
///
/// // Elsewhere: token.cancel() aborts every call using `ctx`.
/// assert!(!ctx.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancellation: Option<CancellationToken>,
}

impl CallContext {
    /// Creates a context with no deadline and no cancellation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a deadline `timeout` from now. An earlier existing deadline is kept.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Sets an absolute deadline. An earlier existing deadline is kept.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(self.deadline.map_or(deadline, |d| d.min(deadline)));
        self
    }

    /// Attaches a cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns whether the attached token has been canceled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Runs `work` until it completes, the token is canceled, or the deadline
    /// passes, whichever comes first.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Cancelled`] or [`TransportError::Timeout`]
    /// when the context ends first, otherwise the error produced by `work`.
    pub async fn run<T, F>(&self, work: F) -> Result<T, TransportError>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        let cancelled = async {
            match &self.cancellation {
                Some(token) => token.cancelled().await,
                None => std::future::pending().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            () = cancelled => Err(TransportError::Cancelled),
            () = expired => Err(TransportError::Timeout),
            result = work => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_returns_work_result() {
        let ctx = CallContext::new();
        let result = ctx.run(async { Ok::<_, TransportError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_already_cancelled_context_does_not_start_work() {
        let token = CancellationToken::new();
        token.cancel();
        let ctx = CallContext::new().with_cancellation(token);

        let result = ctx.run(async { Ok::<_, TransportError>(()) }).await;
        assert!(matches!(result, Err(TransportError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_aborts_pending_work() {
        let ctx = CallContext::new().with_timeout(Duration::from_millis(50));
        let result = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, TransportError>(())
            })
            .await;
        assert!(matches!(result, Err(TransportError::Timeout)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_work() {
        let token = CancellationToken::new();
        let ctx = CallContext::new().with_cancellation(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });

        let result = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, TransportError>(())
            })
            .await;
        canceller.await.unwrap();
        assert!(matches!(result, Err(TransportError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_earlier_deadline_is_kept() {
        let ctx = CallContext::new()
            .with_timeout(Duration::from_secs(1))
            .with_timeout(Duration::from_secs(30));
        let expected = Instant::now() + Duration::from_secs(1);
        assert_eq!(ctx.deadline(), Some(expected));
    }
}
