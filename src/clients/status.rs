//! Semantic classification of API response status codes.
//!
//! Callers branch on [`CallStatus`] rather than raw HTTP codes, so
//! "already exists", "not found" and "try again" logic is written once.

use std::fmt;

/// Semantic status of a completed API call.
///
/// The retryable flag is a pure function of the variant; see
/// [`CallStatus::is_retryable`].
///
/// # Example
///
/// ```rust
/// use moov_api::clients::CallStatus;
///
/// let status = CallStatus::from_status_code(429);
/// assert_eq!(status, CallStatus::RateLimited);
/// assert!(status.is_retryable());
///
/// // Codes outside the known table are treated as server errors
/// assert_eq!(CallStatus::from_status_code(418), CallStatus::ServerError);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallStatus {
    /// The call finished (HTTP 200, 204).
    Completed,
    /// The call was accepted and continues asynchronously (HTTP 201).
    Started,
    /// The request was malformed (HTTP 400).
    BadRequest,
    /// The request conflicts with the current resource state (HTTP 409).
    StateConflict,
    /// The request failed validation (HTTP 422).
    FailedValidation,
    /// The resource does not exist (HTTP 404).
    NotFound,
    /// Credentials were missing or invalid (HTTP 401).
    Unauthenticated,
    /// Credentials are valid but lack permission (HTTP 403).
    Unauthorized,
    /// Too many requests (HTTP 429).
    RateLimited,
    /// Any other status code.
    ServerError,
}

impl CallStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Completed,
        Self::Started,
        Self::BadRequest,
        Self::StateConflict,
        Self::FailedValidation,
        Self::NotFound,
        Self::Unauthenticated,
        Self::Unauthorized,
        Self::RateLimited,
        Self::ServerError,
    ];

    /// Classifies an HTTP status code. Total: unknown codes map to
    /// [`CallStatus::ServerError`].
    #[must_use]
    pub const fn from_status_code(code: u16) -> Self {
        match code {
            200 | 204 => Self::Completed,
            201 => Self::Started,
            400 => Self::BadRequest,
            409 => Self::StateConflict,
            422 => Self::FailedValidation,
            404 => Self::NotFound,
            401 => Self::Unauthenticated,
            403 => Self::Unauthorized,
            429 => Self::RateLimited,
            _ => Self::ServerError,
        }
    }

    /// Returns the stable name of this status.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Started => "started",
            Self::BadRequest => "bad_request",
            Self::StateConflict => "state_conflict",
            Self::FailedValidation => "failed_validation",
            Self::NotFound => "not_found",
            Self::Unauthenticated => "unauthenticated",
            Self::Unauthorized => "unauthorized",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
        }
    }

    /// Returns whether a caller may reasonably retry the call.
    ///
    /// This is advisory. The SDK never retries on its own.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Started | Self::RateLimited | Self::ServerError)
    }

    /// Returns whether the call succeeded (`Completed` or `Started`).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Completed | Self::Started)
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_to_expected_status() {
        let table = [
            (200, CallStatus::Completed, false),
            (204, CallStatus::Completed, false),
            (201, CallStatus::Started, true),
            (400, CallStatus::BadRequest, false),
            (409, CallStatus::StateConflict, false),
            (422, CallStatus::FailedValidation, false),
            (404, CallStatus::NotFound, false),
            (401, CallStatus::Unauthenticated, false),
            (403, CallStatus::Unauthorized, false),
            (429, CallStatus::RateLimited, true),
        ];

        for (code, status, retryable) in table {
            let classified = CallStatus::from_status_code(code);
            assert_eq!(classified, status, "code {code}");
            assert_eq!(classified.is_retryable(), retryable, "code {code}");
        }
    }

    #[test]
    fn test_unmapped_codes_are_retryable_server_errors() {
        for code in [0, 100, 202, 301, 418, 500, 502, 503, 599, u16::MAX] {
            let status = CallStatus::from_status_code(code);
            assert_eq!(status, CallStatus::ServerError, "code {code}");
            assert!(status.is_retryable());
        }
    }

    #[test]
    fn test_classification_is_stable_across_calls() {
        for code in 0..=999 {
            assert_eq!(
                CallStatus::from_status_code(code),
                CallStatus::from_status_code(code)
            );
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = CallStatus::ALL.iter().map(CallStatus::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CallStatus::ALL.len());
    }

    #[test]
    fn test_only_completed_and_started_are_success() {
        let successes: Vec<_> = CallStatus::ALL
            .iter()
            .filter(|status| status.is_success())
            .collect();
        assert_eq!(
            successes,
            vec![&CallStatus::Completed, &CallStatus::Started]
        );
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(CallStatus::StateConflict.to_string(), "state_conflict");
    }
}
