//! Idempotency keys for mutating calls.
//!
//! Mutating endpoints that a caller may retry (create transfer, create
//! refund, create reversal, ...) send an `X-Idempotency-Key` header. A fresh
//! random key is generated per call unless the caller supplies one to
//! de-duplicate retries of the same logical request.
//!
//! A `409` answer to a keyed request surfaces as
//! [`IdempotencyConflictError`](crate::clients::IdempotencyConflictError).

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::clients::errors::InvalidCallError;

/// HTTP header carrying the idempotency key.
pub const HEADER_IDEMPOTENCY_KEY: &str = "X-Idempotency-Key";

/// A validated idempotency key.
///
/// # Example
///
/// ```rust
/// use moov_api::clients::IdempotencyKey;
///
/// // Reuse an explicit key across retries of the same request
/// let key = IdempotencyKey::new("order-42-payout").unwrap();
/// assert_eq!(key.as_str(), "order-42-payout");
///
/// // Or let the SDK generate one per call
/// let generated = IdempotencyKey::generate();
/// assert_ne!(generated, IdempotencyKey::generate());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Maximum accepted key length in bytes.
    pub const MAX_LEN: usize = 255;

    /// Creates a validated key from a caller-supplied value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCallError::InvalidIdempotencyKey`] if the key is
    /// empty, longer than [`Self::MAX_LEN`], or contains characters other
    /// than visible ASCII.
    pub fn new(key: impl Into<String>) -> Result<Self, InvalidCallError> {
        let key = key.into();
        if key.is_empty() {
            return Err(InvalidCallError::InvalidIdempotencyKey {
                reason: "key cannot be empty",
            });
        }
        if key.len() > Self::MAX_LEN {
            return Err(InvalidCallError::InvalidIdempotencyKey {
                reason: "key is longer than 255 bytes",
            });
        }
        if !key.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(InvalidCallError::InvalidIdempotencyKey {
                reason: "key must contain only visible ASCII characters",
            });
        }
        Ok(Self(key))
    }

    /// Generates a fresh random (UUID v4) key.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the supplied key, or a freshly generated one.
    #[must_use]
    pub fn or_generate(key: Option<Self>) -> Self {
        key.unwrap_or_else(Self::generate)
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for IdempotencyKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for IdempotencyKey {
    type Err = InvalidCallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_keys_are_unique_uuids() {
        let a = IdempotencyKey::generate();
        let b = IdempotencyKey::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_explicit_key_is_kept() {
        let key = IdempotencyKey::new("retry-me").unwrap();
        assert_eq!(IdempotencyKey::or_generate(Some(key.clone())), key);
    }

    #[test]
    fn test_missing_key_is_generated() {
        let key = IdempotencyKey::or_generate(None);
        assert!(Uuid::parse_str(key.as_str()).is_ok());
    }

    #[test]
    fn test_rejects_invalid_keys() {
        assert!(IdempotencyKey::new("").is_err());
        assert!(IdempotencyKey::new("has space").is_err());
        assert!(IdempotencyKey::new("line\nbreak").is_err());
        assert!(IdempotencyKey::new("ключ").is_err());
        assert!(IdempotencyKey::new("a".repeat(256)).is_err());
        assert!(IdempotencyKey::new("a".repeat(255)).is_ok());
    }

    #[test]
    fn test_parses_from_str() {
        let key: IdempotencyKey = "abc-123".parse().unwrap();
        assert_eq!(key.to_string(), "abc-123");
    }
}
