//! Raw call responses and the canonical decoding helpers.
//!
//! Resource wrappers never inspect a [`CallResponse`] by hand. They funnel
//! it through exactly one of:
//!
//! - [`CallResponse::object_or_error`] for a single decoded value
//! - [`CallResponse::list_or_error`] for a JSON array
//! - [`CallResponse::no_content_or_error`] when no value is expected
//!
//! Each helper classifies the status first, so a non-success response never
//! reaches the decoder.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::clients::errors::{
    CallError, DecodeError, IdempotencyConflictError, SemanticCallError,
};
use crate::clients::idempotency::IdempotencyKey;
use crate::clients::status::CallStatus;

/// Response header carrying the server-side request id.
pub const HEADER_REQUEST_ID: &str = "x-request-id";

/// The outcome of decoding a response body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decoded<T> {
    /// The body decoded into a value.
    Value(T),
    /// The response carried no body.
    NoContent,
}

/// A well-formed HTTP response from the API, before classification.
///
/// # Example
///
/// ```rust
/// use moov_api::clients::{CallResponse, CallStatus};
///
/// let response = CallResponse::new(
///     201,
///     br#"{"transferID":"t1"}"#.to_vec(),
///     Some("application/json".to_string()),
///     Some("req-9".to_string()),
/// );
///
/// assert_eq!(response.status(), CallStatus::Started);
/// assert!(response.is_success());
/// assert_eq!(response.request_id(), Some("req-9"));
/// ```
#[derive(Clone, Debug)]
pub struct CallResponse {
    status_code: u16,
    status: CallStatus,
    body: Vec<u8>,
    content_type: Option<String>,
    request_id: Option<String>,
    idempotency_key: Option<IdempotencyKey>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: String,
}

impl CallResponse {
    /// Creates a response and classifies its status code.
    #[must_use]
    pub const fn new(
        status_code: u16,
        body: Vec<u8>,
        content_type: Option<String>,
        request_id: Option<String>,
    ) -> Self {
        Self {
            status_code,
            status: CallStatus::from_status_code(status_code),
            body,
            content_type,
            request_id,
            idempotency_key: None,
        }
    }

    pub(crate) fn from_parts(status_code: u16, headers: &HeaderMap, body: Vec<u8>) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        Self::new(
            status_code,
            body,
            header(reqwest::header::CONTENT_TYPE.as_str()),
            header(HEADER_REQUEST_ID),
        )
    }

    /// Records the idempotency key the request was sent with.
    #[must_use]
    pub fn with_idempotency_key(mut self, key: Option<IdempotencyKey>) -> Self {
        self.idempotency_key = key;
        self
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns the semantic status.
    #[must_use]
    pub const fn status(&self) -> CallStatus {
        self.status
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the declared `Content-Type`, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the `X-Request-ID` header, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns the idempotency key the request carried, if any.
    #[must_use]
    pub const fn idempotency_key(&self) -> Option<&IdempotencyKey> {
        self.idempotency_key.as_ref()
    }

    /// Returns `true` for `Completed` and `Started` responses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    fn is_json(&self) -> bool {
        self.content_type.as_deref().is_some_and(|content_type| {
            let media_type = content_type
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase();
            media_type == "application/json" || media_type.ends_with("+json")
        })
    }

    /// Decodes the body according to its content type.
    ///
    /// A `204` or an empty body is [`Decoded::NoContent`] regardless of the
    /// declared content type.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnsupportedContentType`] for non-JSON bodies and
    /// [`DecodeError::Json`] when the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Decoded<T>, DecodeError> {
        if self.status_code == 204 || self.body.is_empty() {
            return Ok(Decoded::NoContent);
        }
        if !self.is_json() {
            return Err(DecodeError::UnsupportedContentType {
                content_type: self.content_type.clone().unwrap_or_default(),
            });
        }
        Ok(Decoded::Value(serde_json::from_slice(&self.body)?))
    }

    /// Extracts the message from a `{"error": "..."}` body.
    ///
    /// Returns an empty string when the body is absent or has another shape.
    #[must_use]
    pub fn error_message(&self) -> String {
        serde_json::from_slice::<ErrorEnvelope>(&self.body)
            .map(|envelope| envelope.error)
            .unwrap_or_default()
    }

    /// Passes successful responses through and turns the rest into errors.
    ///
    /// A `409` for a request that carried an idempotency key becomes an
    /// [`IdempotencyConflictError`]; every other failure becomes a
    /// [`SemanticCallError`].
    ///
    /// # Errors
    ///
    /// Returns [`CallError::Semantic`] or [`CallError::IdempotencyConflict`]
    /// for non-success statuses.
    pub fn into_result(self) -> Result<Self, CallError> {
        if self.is_success() {
            return Ok(self);
        }

        let message = self.error_message();
        match (self.status, self.idempotency_key) {
            (CallStatus::StateConflict, Some(key)) => Err(IdempotencyConflictError {
                key: key.as_str().to_string(),
                message,
                request_id: self.request_id,
            }
            .into()),
            (status, _) => Err(SemanticCallError {
                status,
                code: self.status_code,
                message,
                request_id: self.request_id,
            }
            .into()),
        }
    }

    /// Decodes a single object, or propagates the call's error.
    ///
    /// A successful response without a body is an error here, since the
    /// caller asked for an object. Use [`decode`](Self::decode) to receive
    /// [`Decoded::NoContent`] instead.
    ///
    /// # Errors
    ///
    /// Returns the classified error for non-success statuses,
    /// [`DecodeError::MissingBody`] when the response is empty, and any
    /// other [`DecodeError`] from [`decode`](Self::decode).
    pub fn object_or_error<T: DeserializeOwned>(self) -> Result<T, CallError> {
        match self.into_result()?.decode()? {
            Decoded::Value(value) => Ok(value),
            Decoded::NoContent => Err(DecodeError::MissingBody.into()),
        }
    }

    /// Decodes a JSON array, or propagates the call's error. An empty
    /// response is an empty list.
    ///
    /// # Errors
    ///
    /// Returns the classified error for non-success statuses or a
    /// [`DecodeError`] when the body cannot be decoded.
    pub fn list_or_error<T: DeserializeOwned>(self) -> Result<Vec<T>, CallError> {
        match self.into_result()?.decode()? {
            Decoded::Value(items) => Ok(items),
            Decoded::NoContent => Ok(Vec::new()),
        }
    }

    /// Succeeds with no value, or propagates the call's error. Any body on a
    /// successful response is ignored.
    ///
    /// # Errors
    ///
    /// Returns the classified error for non-success statuses.
    pub fn no_content_or_error(self) -> Result<(), CallError> {
        self.into_result().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Account {
        #[serde(rename = "accountID")]
        account_id: String,
    }

    fn json_response(code: u16, body: &str) -> CallResponse {
        CallResponse::new(
            code,
            body.as_bytes().to_vec(),
            Some("application/json; charset=utf-8".to_string()),
            Some("req-1".to_string()),
        )
    }

    #[test]
    fn test_object_or_error_decodes_json() {
        let account: Account = json_response(200, r#"{"accountID":"a1"}"#)
            .object_or_error()
            .unwrap();
        assert_eq!(account.account_id, "a1");
    }

    #[test]
    fn test_started_is_treated_as_success() {
        let account: Account = json_response(201, r#"{"accountID":"a1"}"#)
            .object_or_error()
            .unwrap();
        assert_eq!(account.account_id, "a1");
    }

    #[test]
    fn test_empty_completed_body_is_no_content() {
        let response = json_response(200, "");
        assert_eq!(response.decode::<Account>().unwrap(), Decoded::NoContent);

        let response = CallResponse::new(204, Vec::new(), None, None);
        assert_eq!(response.decode::<Account>().unwrap(), Decoded::NoContent);
        assert!(response.no_content_or_error().is_ok());
    }

    #[test]
    fn test_object_helper_requires_a_body() {
        let result = json_response(200, "").object_or_error::<Account>();
        assert!(matches!(
            result,
            Err(CallError::Decode(DecodeError::MissingBody))
        ));
    }

    #[test]
    fn test_list_helper_treats_empty_body_as_empty_list() {
        let items: Vec<Account> = json_response(200, "").list_or_error().unwrap();
        assert!(items.is_empty());

        let items: Vec<Account> = json_response(200, r#"[{"accountID":"a"},{"accountID":"b"}]"#)
            .list_or_error()
            .unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_unsupported_content_type_fails() {
        let response = CallResponse::new(
            200,
            b"<html/>".to_vec(),
            Some("text/html".to_string()),
            None,
        );
        assert!(matches!(
            response.decode::<Account>(),
            Err(DecodeError::UnsupportedContentType { content_type }) if content_type == "text/html"
        ));

        let response = CallResponse::new(200, b"{}".to_vec(), None, None);
        assert!(matches!(
            response.decode::<Account>(),
            Err(DecodeError::UnsupportedContentType { content_type }) if content_type.is_empty()
        ));
    }

    #[test]
    fn test_structured_json_suffix_is_accepted() {
        let response = CallResponse::new(
            200,
            br#"{"accountID":"a1"}"#.to_vec(),
            Some("application/problem+json".to_string()),
            None,
        );
        assert!(matches!(response.decode::<Account>(), Ok(Decoded::Value(_))));
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let result = json_response(200, "{not json").object_or_error::<Account>();
        assert!(matches!(result, Err(CallError::Decode(DecodeError::Json(_)))));
    }

    #[test]
    fn test_error_message_is_extracted() {
        let error = json_response(422, r#"{"error":"amount must be positive"}"#)
            .no_content_or_error()
            .unwrap_err();

        match error {
            CallError::Semantic(e) => {
                assert_eq!(e.status, CallStatus::FailedValidation);
                assert_eq!(e.code, 422);
                assert_eq!(e.message, "amount must be positive");
                assert_eq!(e.request_id.as_deref(), Some("req-1"));
            }
            other => panic!("expected semantic error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_error_body_keeps_status_and_request_id() {
        let error = json_response(404, "oops").object_or_error::<Account>().unwrap_err();
        assert_eq!(error.status(), Some(CallStatus::NotFound));
        assert_eq!(error.request_id(), Some("req-1"));
        match error {
            CallError::Semantic(e) => assert!(e.message.is_empty()),
            other => panic!("expected semantic error, got {other:?}"),
        }
    }

    #[test]
    fn test_conflict_with_idempotency_key_is_distinguished() {
        let key = IdempotencyKey::new("k-1").unwrap();
        let error = json_response(409, r#"{"error":"duplicate"}"#)
            .with_idempotency_key(Some(key))
            .no_content_or_error()
            .unwrap_err();

        match error {
            CallError::IdempotencyConflict(e) => {
                assert_eq!(e.key, "k-1");
                assert_eq!(e.message, "duplicate");
            }
            other => panic!("expected idempotency conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_conflict_without_idempotency_key_is_generic() {
        let error = json_response(409, "{}").no_content_or_error().unwrap_err();
        assert!(matches!(
            error,
            CallError::Semantic(SemanticCallError {
                status: CallStatus::StateConflict,
                ..
            })
        ));
    }

    #[test]
    fn test_from_parts_reads_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json".parse().unwrap());
        headers.insert("x-request-id", "req-77".parse().unwrap());

        let response = CallResponse::from_parts(429, &headers, Vec::new());
        assert_eq!(response.status(), CallStatus::RateLimited);
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.request_id(), Some("req-77"));
    }
}
