//! Error types for building, executing and decoding API calls.
//!
//! # Error Handling
//!
//! - [`InvalidCallError`]: The call could not be built
//! - [`TransportError`]: The request never produced an HTTP response
//! - [`DecodeError`]: The response body could not be decoded
//! - [`SemanticCallError`]: The API answered with a non-success status
//! - [`IdempotencyConflictError`]: A `409` answered a request carrying an
//!   idempotency key
//! - [`CallError`]: Unified error type encompassing all of the above
//!
//! # Example
//!
//! ```rust,ignore
//! use moov_api::clients::{CallError, CallStatus};
//!
//! match response.object_or_error::<Account>() {
//!     Ok(account) => println!("{}", account.display_name),
//!     Err(CallError::Semantic(e)) if e.status == CallStatus::NotFound => {
//!         println!("no such account");
//!     }
//!     Err(CallError::IdempotencyConflict(e)) => {
//!         println!("request {} already submitted", e.key);
//!     }
//!     Err(e) if e.is_retryable() => println!("try again later: {e}"),
//!     Err(e) => println!("failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::status::CallStatus;

/// Error returned when a call cannot be built from its options.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidCallError {
    /// No endpoint option was supplied.
    #[error("No endpoint was set. Every call needs a method and path.")]
    MissingEndpoint,

    /// The number of `%s` markers does not match the supplied arguments.
    #[error("Path template '{template}' expects {expected} argument(s) but got {actual}.")]
    PathArguments {
        /// The path template.
        template: String,
        /// The number of `%s` markers in the template.
        expected: usize,
        /// The number of arguments supplied.
        actual: usize,
    },

    /// A header name or value is not valid HTTP.
    #[error("Invalid header '{name}'.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// The JSON body could not be serialized.
    #[error("Could not serialize JSON body: {reason}")]
    JsonBody {
        /// The serializer's message.
        reason: String,
    },

    /// An idempotency key failed validation.
    #[error("Invalid idempotency key: {reason}")]
    InvalidIdempotencyKey {
        /// Why the key was rejected.
        reason: &'static str,
    },
}

/// Error returned when a request fails below the HTTP layer.
///
/// A well-formed response with a non-success status is not a
/// `TransportError`; it is classified into a [`SemanticCallError`].
#[derive(Debug, Error)]
pub enum TransportError {
    /// DNS, TLS, connection reset and similar network failures.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The call's deadline passed before a response arrived.
    #[error("Request timed out")]
    Timeout,

    /// The call was canceled through its [`CallContext`](crate::clients::CallContext).
    #[error("Request was canceled")]
    Cancelled,

    /// The request URL could not be constructed or was rejected.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error returned when a response body cannot be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The response declared a content type the SDK cannot decode.
    #[error("Unsupported content type '{content_type}'")]
    UnsupportedContentType {
        /// The declared content type (empty when the header was absent).
        content_type: String,
    },

    /// A body was expected but the response had none.
    #[error("Expected a response body but the response had no content")]
    MissingBody,

    /// The body was not valid JSON for the requested shape.
    #[error("Invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error returned when the API responds with a non-success status.
///
/// # Example
///
/// ```rust
/// use moov_api::clients::{CallStatus, SemanticCallError};
///
/// let error = SemanticCallError {
///     status: CallStatus::NotFound,
///     code: 404,
///     message: "account not found".to_string(),
///     request_id: Some("req-123".to_string()),
/// };
///
/// assert!(error.to_string().contains("not_found"));
/// assert!(!error.status.is_retryable());
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{status} (HTTP {code}): {message}")]
pub struct SemanticCallError {
    /// The semantic status.
    pub status: CallStatus,
    /// The HTTP status code.
    pub code: u16,
    /// Message extracted from the `{"error": "..."}` envelope, or empty.
    pub message: String,
    /// The `X-Request-ID` response header, for support correlation.
    pub request_id: Option<String>,
}

/// Error returned when the API reports a conflict for a request that
/// carried an idempotency key.
///
/// The server already holds a completed or in-flight request with the same
/// key. Callers decide whether that means "already done" or a duplicate
/// submission bug.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Request with idempotency key '{key}' was already submitted: {message}")]
pub struct IdempotencyConflictError {
    /// The idempotency key sent with the request.
    pub key: String,
    /// Message extracted from the response body, or empty.
    pub message: String,
    /// The `X-Request-ID` response header.
    pub request_id: Option<String>,
}

/// Unified error type for API calls.
#[derive(Debug, Error)]
pub enum CallError {
    /// The call could not be built.
    #[error(transparent)]
    InvalidCall(#[from] InvalidCallError),

    /// The request failed below the HTTP layer.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The API returned a non-success status.
    #[error(transparent)]
    Semantic(#[from] SemanticCallError),

    /// Duplicate submission detected through the idempotency key.
    #[error(transparent)]
    IdempotencyConflict(#[from] IdempotencyConflictError),
}

impl CallError {
    /// Returns the semantic status when the API produced a response.
    #[must_use]
    pub const fn status(&self) -> Option<CallStatus> {
        match self {
            Self::Semantic(e) => Some(e.status),
            Self::IdempotencyConflict(_) => Some(CallStatus::StateConflict),
            Self::InvalidCall(_) | Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Returns the `X-Request-ID` of the failed response, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Semantic(e) => e.request_id.as_deref(),
            Self::IdempotencyConflict(e) => e.request_id.as_deref(),
            Self::InvalidCall(_) | Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Returns whether retrying the call may succeed.
    ///
    /// Network failures and timeouts are retryable; cancellation is not,
    /// since it reflects the caller's intent.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Semantic(e) => e.status.is_retryable(),
            Self::Transport(TransportError::Connection(_) | TransportError::Timeout) => true,
            Self::Transport(_)
            | Self::InvalidCall(_)
            | Self::Decode(_)
            | Self::IdempotencyConflict(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semantic(status: CallStatus, code: u16) -> SemanticCallError {
        SemanticCallError {
            status,
            code,
            message: "boom".to_string(),
            request_id: Some("req-1".to_string()),
        }
    }

    #[test]
    fn test_semantic_error_message_includes_status_and_code() {
        let message = semantic(CallStatus::FailedValidation, 422).to_string();
        assert_eq!(message, "failed_validation (HTTP 422): boom");
    }

    #[test]
    fn test_call_error_exposes_status_and_request_id() {
        let error = CallError::from(semantic(CallStatus::NotFound, 404));
        assert_eq!(error.status(), Some(CallStatus::NotFound));
        assert_eq!(error.request_id(), Some("req-1"));
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_rate_limited_is_retryable() {
        let error = CallError::from(semantic(CallStatus::RateLimited, 429));
        assert!(error.is_retryable());
    }

    #[test]
    fn test_idempotency_conflict_reports_state_conflict() {
        let error = CallError::from(IdempotencyConflictError {
            key: "key-1".to_string(),
            message: String::new(),
            request_id: None,
        });
        assert_eq!(error.status(), Some(CallStatus::StateConflict));
        assert!(!error.is_retryable());
        assert!(error.to_string().contains("key-1"));
    }

    #[test]
    fn test_transport_retryability() {
        assert!(CallError::from(TransportError::Timeout).is_retryable());
        assert!(!CallError::from(TransportError::Cancelled).is_retryable());
        assert_eq!(CallError::from(TransportError::Timeout).status(), None);
    }

    #[test]
    fn test_invalid_call_error_messages() {
        let error = InvalidCallError::PathArguments {
            template: "/accounts/%s".to_string(),
            expected: 1,
            actual: 0,
        };
        assert_eq!(
            error.to_string(),
            "Path template '/accounts/%s' expects 1 argument(s) but got 0."
        );
        assert!(InvalidCallError::MissingEndpoint
            .to_string()
            .contains("method and path"));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &InvalidCallError::MissingEndpoint;
        let _: &dyn std::error::Error = &TransportError::Timeout;
        let _: &dyn std::error::Error = &DecodeError::MissingBody;
        let _: &dyn std::error::Error = &semantic(CallStatus::ServerError, 500);
    }
}
