//! Client-side token bucket rate limiting.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::clients::context::CallContext;
use crate::clients::errors::TransportError;
use crate::error::ConfigError;

/// A token bucket shared by every call made through one client.
///
/// Calls that find the bucket empty wait (they do not fail) until a permit
/// is available or their [`CallContext`] ends. The bucket is guarded by an
/// async mutex, so concurrent callers are safe without any coordination on
/// their side.
///
/// # Example
///
/// ```rust
/// use moov_api::clients::RateLimiter;
///
/// // Bursts of up to 10 calls, refilled at 5 calls per second
/// let limiter = RateLimiter::new(10, 5.0).unwrap();
/// assert_eq!(limiter.capacity(), 10);
/// ```
#[derive(Debug)]
pub struct RateLimiter {
    capacity: u32,
    refill_per_second: f64,
    bucket: Mutex<Bucket>,
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl Bucket {
    fn refill(&mut self, capacity: u32, refill_per_second: f64) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = elapsed
            .mul_add(refill_per_second, self.tokens)
            .min(f64::from(capacity));
        self.last_refill = now;
    }
}

impl RateLimiter {
    /// Creates a full bucket holding `capacity` permits, refilled at
    /// `refill_per_second`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRateLimit`] if `capacity` is zero or the
    /// refill rate is not a positive finite number.
    pub fn new(capacity: u32, refill_per_second: f64) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::InvalidRateLimit {
                reason: "capacity must be at least 1".to_string(),
            });
        }
        if !refill_per_second.is_finite() || refill_per_second <= 0.0 {
            return Err(ConfigError::InvalidRateLimit {
                reason: format!("refill rate must be positive, got {refill_per_second}"),
            });
        }

        Ok(Self {
            capacity,
            refill_per_second,
            bucket: Mutex::new(Bucket {
                tokens: f64::from(capacity),
                last_refill: Instant::now(),
            }),
        })
    }

    /// Returns the bucket size.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the number of whole permits currently available.
    // tokens is clamped to [0, capacity]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub async fn available(&self) -> u32 {
        let mut bucket = self.bucket.lock().await;
        bucket.refill(self.capacity, self.refill_per_second);
        bucket.tokens.floor() as u32
    }

    /// Waits for a permit.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Cancelled`] or [`TransportError::Timeout`]
    /// if `ctx` ends before a permit becomes available.
    pub async fn acquire(&self, ctx: &CallContext) -> Result<(), TransportError> {
        ctx.run(async {
            self.wait_for_permit().await;
            Ok(())
        })
        .await
    }

    async fn wait_for_permit(&self) {
        loop {
            let wait = {
                let mut bucket = self.bucket.lock().await;
                bucket.refill(self.capacity, self.refill_per_second);
                if bucket.tokens >= 1.0 {
                    bucket.tokens -= 1.0;
                    return;
                }
                // Tiny refill rates overflow Duration; tokio's sleep saturates.
                Duration::try_from_secs_f64((1.0 - bucket.tokens) / self.refill_per_second)
                    .unwrap_or(Duration::MAX)
            };

            tracing::debug!(
                wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                "Rate limiter is full, waiting for a permit"
            );
            tokio::time::sleep(wait).await;
        }
    }
}
