//! Configuration types for the Moov API SDK.
//!
//! # Overview
//!
//! - [`Credentials`]: public key, secret key and API host
//! - [`ClientConfig`]: credentials plus client-wide settings
//! - [`ClientConfigBuilder`]: a builder for [`ClientConfig`]
//! - [`PublicKey`], [`SecretKey`], [`ApiHost`]: validated newtypes
//!
//! # Example
//!
//! ```rust
//! use moov_api::{ClientConfig, Credentials, PublicKey, SecretKey};
//! use std::time::Duration;
//!
//! let credentials = Credentials::new(
//!     PublicKey::new("pk_123").unwrap(),
//!     SecretKey::new("sk_456").unwrap(),
//! );
//!
//! let config = ClientConfig::builder()
//!     .credentials(credentials)
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ApiHost, PublicKey, SecretKey};

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::clients::RateLimiter;
use crate::error::ConfigError;

/// API credentials: a key pair and the host they are valid for.
///
/// # Example
///
/// ```rust
/// use moov_api::{ApiHost, Credentials, PublicKey, SecretKey};
///
/// let credentials = Credentials::new(
///     PublicKey::new("public").unwrap(),
///     SecretKey::new("secret").unwrap(),
/// )
/// .with_host(ApiHost::new("api.sandbox.example").unwrap());
///
/// assert_eq!(credentials.host().as_ref(), "https://api.sandbox.example");
/// assert_eq!(credentials.basic_auth_header(), "Basic cHVibGljOnNlY3JldA==");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    public_key: PublicKey,
    secret_key: SecretKey,
    host: ApiHost,
}

impl Credentials {
    /// Creates credentials for the default production host.
    #[must_use]
    pub fn new(public_key: PublicKey, secret_key: SecretKey) -> Self {
        Self {
            public_key,
            secret_key,
            host: ApiHost::default(),
        }
    }

    /// Replaces the API host.
    #[must_use]
    pub fn with_host(mut self, host: ApiHost) -> Self {
        self.host = host;
        self
    }

    /// Returns the public key.
    #[must_use]
    pub const fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Returns the secret key.
    #[must_use]
    pub const fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Returns the API host.
    #[must_use]
    pub const fn host(&self) -> &ApiHost {
        &self.host
    }

    /// Returns the `Authorization` header value for HTTP Basic auth.
    #[must_use]
    pub fn basic_auth_header(&self) -> String {
        let pair = format!("{}:{}", self.public_key.as_ref(), self.secret_key.as_ref());
        format!("Basic {}", STANDARD.encode(pair))
    }
}

/// Client-wide configuration.
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`. Cloning shares the
/// rate limiter, so clones contend for the same bucket.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    credentials: Credentials,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    rate_limiter: Option<Arc<RateLimiter>>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the default per-call timeout, if configured.
    ///
    /// A deadline on the [`CallContext`](crate::clients::CallContext) takes
    /// precedence when it is shorter.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the shared rate limiter, if configured.
    #[must_use]
    pub fn rate_limiter(&self) -> Option<&Arc<RateLimiter>> {
        self.rate_limiter.as_ref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// Only `credentials` is required.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    credentials: Option<Credentials>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    rate_limiter: Option<Arc<RateLimiter>>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the credentials (required).
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the default per-call timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attaches a rate limiter shared by every call made with this config.
    #[must_use]
    pub fn rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.rate_limiter = Some(Arc::new(limiter));
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `credentials` is not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let credentials = self.credentials.ok_or(ConfigError::MissingRequiredField {
            field: "credentials",
        })?;

        Ok(ClientConfig {
            credentials,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
            rate_limiter: self.rate_limiter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new(
            PublicKey::new("public").unwrap(),
            SecretKey::new("secret").unwrap(),
        )
    }

    #[test]
    fn test_builder_requires_credentials() {
        let result = ClientConfigBuilder::new().build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "credentials"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ClientConfig::builder()
            .credentials(credentials())
            .build()
            .unwrap();

        assert_eq!(config.credentials().host().as_ref(), ApiHost::DEFAULT);
        assert!(config.user_agent_prefix().is_none());
        assert!(config.timeout().is_none());
        assert!(config.rate_limiter().is_none());
    }

    #[test]
    fn test_basic_auth_header_encodes_key_pair() {
        assert_eq!(
            credentials().basic_auth_header(),
            "Basic cHVibGljOnNlY3JldA=="
        );
    }

    #[test]
    fn test_credentials_debug_masks_secret() {
        let debug = format!("{:?}", credentials());
        assert!(debug.contains("public"));
        assert!(!debug.contains("\"secret\""));
    }

    #[test]
    fn test_cloned_config_shares_rate_limiter() {
        let config = ClientConfig::builder()
            .credentials(credentials())
            .rate_limiter(RateLimiter::new(5, 1.0).unwrap())
            .build()
            .unwrap();

        let cloned = config.clone();
        assert!(Arc::ptr_eq(
            config.rate_limiter().unwrap(),
            cloned.rate_limiter().unwrap()
        ));
    }
}
