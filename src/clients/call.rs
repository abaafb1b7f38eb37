//! Call construction from composable options.
//!
//! A call starts as an empty [`RequestSpec`] and is shaped by an ordered
//! list of [`CallOption`]s, each mutating the [`RequestSpec`] in turn. Options are
//! applied strictly left to right:
//!
//! - headers are last-write-wins per (case-insensitive) name
//! - query parameters keep every value, in order, duplicates included
//! - the endpoint may be set more than once; the last one wins
//!
//! # Body options
//!
//! [`json_body`] and [`multipart_body`] both set the body and its
//! `Content-Type`. Supplying both is not an error: the later option replaces
//! the body and the content type set by the earlier one.
//!
//! # Example
//!
//! ```rust
//! use moov_api::clients::call::{self, RequestSpec};
//! use moov_api::clients::HttpMethod;
//!
//! let spec = RequestSpec::build([
//!     call::endpoint(HttpMethod::Get, "/accounts/%s", &["abc"]),
//!     call::accept_json(),
//! ])
//! .unwrap();
//!
//! assert_eq!(spec.method(), Some(HttpMethod::Get));
//! assert_eq!(spec.path(), Some("/accounts/abc"));
//! assert_eq!(spec.headers()["accept"], "application/json");
//! ```

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::Serialize;

use crate::clients::errors::InvalidCallError;
use crate::clients::idempotency::{IdempotencyKey, HEADER_IDEMPOTENCY_KEY};
use crate::clients::multipart::{self, MultipartPart};

const JSON: &str = "application/json";

/// HTTP header asking the server to wait for an asynchronous side effect.
pub const HEADER_WAIT_FOR: &str = "X-Wait-For";

/// HTTP methods supported by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side effects the server can wait for before responding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitFor {
    /// Wait for the payment rail to respond (synchronous transfers).
    RailResponse,
}

impl WaitFor {
    /// Returns the header value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RailResponse => "rail-response",
        }
    }
}

/// A single step of call construction.
pub type CallOption = Box<dyn FnOnce(&mut RequestSpec) -> Result<(), InvalidCallError> + Send>;

/// The accumulated description of one API call.
///
/// Created per call and discarded after execution.
#[derive(Clone, Debug, Default)]
pub struct RequestSpec {
    method: Option<HttpMethod>,
    path: Option<String>,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
    bearer_token: Option<String>,
    idempotency_key: Option<IdempotencyKey>,
}

impl RequestSpec {
    /// Creates an empty spec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies options in order and validates the result.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by an option, or
    /// [`InvalidCallError::MissingEndpoint`] if no endpoint was set.
    pub fn build(options: impl IntoIterator<Item = CallOption>) -> Result<Self, InvalidCallError> {
        let mut spec = Self::new();
        for option in options {
            spec.apply(option)?;
        }
        spec.verify()?;
        Ok(spec)
    }

    /// Applies a single option.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the option.
    pub fn apply(&mut self, option: CallOption) -> Result<(), InvalidCallError> {
        option(self)
    }

    /// Checks that the request can be executed.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCallError::MissingEndpoint`] if the method or path is unset.
    pub const fn verify(&self) -> Result<(), InvalidCallError> {
        if self.method.is_none() || self.path.is_none() {
            return Err(InvalidCallError::MissingEndpoint);
        }
        Ok(())
    }

    /// Returns the HTTP method, if set.
    #[must_use]
    pub const fn method(&self) -> Option<HttpMethod> {
        self.method
    }

    /// Returns the resolved path, if set.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the query parameters in insertion order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the body bytes, if any.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Returns the bearer token, if set.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// Returns the idempotency key, if set.
    #[must_use]
    pub const fn idempotency_key(&self) -> Option<&IdempotencyKey> {
        self.idempotency_key.as_ref()
    }

    /// Returns the percent-encoded query string, without the leading `?`.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    fn set_header(&mut self, name: &str, value: &str) -> Result<(), InvalidCallError> {
        let invalid = || InvalidCallError::InvalidHeader {
            name: name.to_string(),
        };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        // A key set as a plain header must still be tracked for conflict reporting.
        if header_name
            .as_str()
            .eq_ignore_ascii_case(HEADER_IDEMPOTENCY_KEY)
        {
            self.idempotency_key = Some(IdempotencyKey::new(value)?);
        }
        self.headers.insert(header_name, header_value);
        Ok(())
    }

    fn set_body(&mut self, content_type: &str, body: Vec<u8>) -> Result<(), InvalidCallError> {
        self.set_header(CONTENT_TYPE.as_str(), content_type)?;
        self.body = Some(body);
        Ok(())
    }
}

/// Substitutes `%s` markers in `template` with percent-encoded `args`, in order.
fn fill_path(template: &str, args: &[String]) -> Result<String, InvalidCallError> {
    let pieces: Vec<&str> = template.split("%s").collect();
    let expected = pieces.len() - 1;
    if expected != args.len() {
        return Err(InvalidCallError::PathArguments {
            template: template.to_string(),
            expected,
            actual: args.len(),
        });
    }

    let mut path = String::with_capacity(template.len());
    if !template.starts_with('/') {
        path.push('/');
    }
    for (i, piece) in pieces.iter().enumerate() {
        path.push_str(piece);
        if let Some(arg) = args.get(i) {
            path.push_str(&urlencoding::encode(arg));
        }
    }
    Ok(path)
}

/// Sets the method and path. `%s` markers in `template` are replaced by
/// `args` in order; each argument is percent-encoded.
#[must_use]
pub fn endpoint(method: HttpMethod, template: &str, args: &[&str]) -> CallOption {
    let template = template.to_string();
    let args: Vec<String> = args.iter().map(|arg| (*arg).to_string()).collect();
    Box::new(move |spec| {
        spec.path = Some(fill_path(&template, &args)?);
        spec.method = Some(method);
        Ok(())
    })
}

/// Sets `Accept: application/json`.
#[must_use]
pub fn accept_json() -> CallOption {
    Box::new(|spec| spec.set_header(ACCEPT.as_str(), JSON))
}

/// Sets a JSON body and `Content-Type: application/json`.
///
/// The value is serialized immediately; a serialization failure surfaces
/// when the option is applied.
#[must_use]
pub fn json_body<T: Serialize + ?Sized>(body: &T) -> CallOption {
    let encoded = serde_json::to_vec(body).map_err(|e| e.to_string());
    Box::new(move |spec| {
        let body = encoded.map_err(|reason| InvalidCallError::JsonBody { reason })?;
        spec.set_body(JSON, body)
    })
}

/// Sets a fully buffered `multipart/form-data` body.
#[must_use]
pub fn multipart_body(parts: Vec<MultipartPart>) -> CallOption {
    Box::new(move |spec| {
        let (content_type, body) = multipart::encode(&parts);
        spec.set_body(&content_type, body)
    })
}

/// Appends a query parameter. Repeated keys are kept.
#[must_use]
pub fn query(key: impl Into<String>, value: impl Into<String>) -> CallOption {
    let (key, value) = (key.into(), value.into());
    Box::new(move |spec| {
        spec.query.push((key, value));
        Ok(())
    })
}

/// Appends `skip` and `count` pagination parameters.
#[must_use]
pub fn skip_count(skip: u32, count: u32) -> CallOption {
    Box::new(move |spec| {
        spec.query.push(("skip".to_string(), skip.to_string()));
        spec.query.push(("count".to_string(), count.to_string()));
        Ok(())
    })
}

/// Sets a header, replacing any earlier value for the same name.
///
/// Setting `X-Idempotency-Key` this way is equivalent to [`idempotency`]
/// with that key, and the value is validated the same way.
#[must_use]
pub fn header(name: impl Into<String>, value: impl Into<String>) -> CallOption {
    let (name, value) = (name.into(), value.into());
    Box::new(move |spec| spec.set_header(&name, &value))
}

/// Authenticates with a bearer token instead of the client's key pair.
#[must_use]
pub fn bearer_token(token: impl Into<String>) -> CallOption {
    let token = token.into();
    Box::new(move |spec| {
        spec.bearer_token = Some(token);
        Ok(())
    })
}

/// Sets `X-Wait-For`.
#[must_use]
pub fn wait_for(wait: WaitFor) -> CallOption {
    Box::new(move |spec| spec.set_header(HEADER_WAIT_FOR, wait.as_str()))
}

/// Attaches an idempotency key: the caller's key when given, otherwise a
/// freshly generated one.
#[must_use]
pub fn idempotency(key: Option<IdempotencyKey>) -> CallOption {
    let key = IdempotencyKey::or_generate(key);
    Box::new(move |spec| {
        spec.set_header(HEADER_IDEMPOTENCY_KEY, key.as_str())?;
        spec.idempotency_key = Some(key);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_with_accept_json() {
        let spec = RequestSpec::build([
            endpoint(HttpMethod::Get, "/accounts/%s", &["abc"]),
            accept_json(),
        ])
        .unwrap();

        assert_eq!(spec.method(), Some(HttpMethod::Get));
        assert_eq!(spec.path(), Some("/accounts/abc"));
        assert_eq!(spec.headers().len(), 1);
        assert_eq!(spec.headers()[ACCEPT], "application/json");
        assert!(spec.body().is_none());
    }

    #[test]
    fn test_missing_endpoint_fails_fast() {
        let result = RequestSpec::build([accept_json()]);
        assert_eq!(result.unwrap_err(), InvalidCallError::MissingEndpoint);
    }

    #[test]
    fn test_last_endpoint_wins() {
        let spec = RequestSpec::build([
            endpoint(HttpMethod::Get, "/accounts", &[]),
            endpoint(HttpMethod::Post, "/accounts/%s/transfers", &["a1"]),
        ])
        .unwrap();

        assert_eq!(spec.method(), Some(HttpMethod::Post));
        assert_eq!(spec.path(), Some("/accounts/a1/transfers"));
    }

    #[test]
    fn test_path_arguments_are_percent_encoded() {
        let spec = RequestSpec::build([endpoint(
            HttpMethod::Get,
            "/accounts/%s/files/%s",
            &["a b", "../x"],
        )])
        .unwrap();
        assert_eq!(spec.path(), Some("/accounts/a%20b/files/..%2Fx"));
    }

    #[test]
    fn test_path_argument_count_mismatch() {
        let result = RequestSpec::build([endpoint(HttpMethod::Get, "/accounts/%s", &[])]);
        assert_eq!(
            result.unwrap_err(),
            InvalidCallError::PathArguments {
                template: "/accounts/%s".to_string(),
                expected: 1,
                actual: 0,
            }
        );
    }

    #[test]
    fn test_missing_leading_slash_is_added() {
        let spec = RequestSpec::build([endpoint(HttpMethod::Get, "ping", &[])]).unwrap();
        assert_eq!(spec.path(), Some("/ping"));
    }

    #[test]
    fn test_headers_are_last_write_wins() {
        let spec = RequestSpec::build([
            endpoint(HttpMethod::Get, "/ping", &[]),
            header("X-Custom", "first"),
            header("x-custom", "second"),
        ])
        .unwrap();

        assert_eq!(spec.headers().len(), 1);
        assert_eq!(spec.headers()["X-Custom"], "second");
    }

    #[test]
    fn test_query_params_keep_duplicates_in_order() {
        let spec = RequestSpec::build([
            endpoint(HttpMethod::Get, "/transfers", &[]),
            query("status", "pending"),
            skip_count(20, 10),
            query("status", "completed"),
        ])
        .unwrap();

        assert_eq!(
            spec.query_string(),
            "status=pending&skip=20&count=10&status=completed"
        );
    }

    #[test]
    fn test_query_string_is_percent_encoded() {
        let spec = RequestSpec::build([
            endpoint(HttpMethod::Get, "/accounts", &[]),
            query("name", "Jane & Co"),
        ])
        .unwrap();
        assert_eq!(spec.query_string(), "name=Jane%20%26%20Co");
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let spec = RequestSpec::build([
            endpoint(HttpMethod::Post, "/accounts", &[]),
            json_body(&json!({"displayName": "Jane"})),
        ])
        .unwrap();

        assert_eq!(spec.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(spec.body().unwrap(), br#"{"displayName":"Jane"}"#);
    }

    #[test]
    fn test_later_body_option_replaces_earlier_one() {
        let spec = RequestSpec::build([
            endpoint(HttpMethod::Post, "/files", &[]),
            json_body(&json!({"a": 1})),
            multipart_body(vec![MultipartPart::field("a", "1")]),
        ])
        .unwrap();

        let content_type = spec.headers()[CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
        assert!(String::from_utf8_lossy(spec.body().unwrap()).contains("name=\"a\""));

        let spec = RequestSpec::build([
            endpoint(HttpMethod::Post, "/files", &[]),
            multipart_body(vec![MultipartPart::field("a", "1")]),
            json_body(&json!({"a": 1})),
        ])
        .unwrap();
        assert_eq!(spec.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(spec.body().unwrap(), br#"{"a":1}"#);
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let result = RequestSpec::build([
            endpoint(HttpMethod::Get, "/ping", &[]),
            header("bad header", "v"),
        ]);
        assert!(matches!(
            result,
            Err(InvalidCallError::InvalidHeader { name }) if name == "bad header"
        ));

        let result = RequestSpec::build([
            endpoint(HttpMethod::Get, "/ping", &[]),
            header("X-Ok", "line\nbreak"),
        ]);
        assert!(matches!(result, Err(InvalidCallError::InvalidHeader { .. })));
    }

    #[test]
    fn test_wait_for_header() {
        let spec = RequestSpec::build([
            endpoint(HttpMethod::Post, "/transfers", &[]),
            wait_for(WaitFor::RailResponse),
        ])
        .unwrap();
        assert_eq!(spec.headers()[HEADER_WAIT_FOR], "rail-response");
    }

    #[test]
    fn test_idempotency_uses_explicit_key() {
        let key = IdempotencyKey::new("payout-7").unwrap();
        let spec = RequestSpec::build([
            endpoint(HttpMethod::Post, "/transfers", &[]),
            idempotency(Some(key.clone())),
        ])
        .unwrap();

        assert_eq!(spec.idempotency_key(), Some(&key));
        assert_eq!(spec.headers()[HEADER_IDEMPOTENCY_KEY], "payout-7");
    }

    #[test]
    fn test_idempotency_generates_fresh_key_per_call() {
        let build = || {
            RequestSpec::build([
                endpoint(HttpMethod::Post, "/transfers", &[]),
                idempotency(None),
            ])
            .unwrap()
        };
        let first = build();
        let second = build();

        assert!(first.idempotency_key().is_some());
        assert_ne!(first.idempotency_key(), second.idempotency_key());
    }

    #[test]
    fn test_idempotency_header_option_records_key() {
        let spec = RequestSpec::build([
            endpoint(HttpMethod::Post, "/transfers", &[]),
            header("X-IDEMPOTENCY-KEY", "k-1"),
        ])
        .unwrap();

        assert_eq!(spec.headers()[HEADER_IDEMPOTENCY_KEY], "k-1");
        assert_eq!(spec.idempotency_key().map(IdempotencyKey::as_str), Some("k-1"));
    }

    #[test]
    fn test_invalid_idempotency_header_is_rejected() {
        let result = RequestSpec::build([
            endpoint(HttpMethod::Post, "/transfers", &[]),
            header(HEADER_IDEMPOTENCY_KEY, "has space"),
        ]);

        assert!(matches!(
            result,
            Err(InvalidCallError::InvalidIdempotencyKey { .. })
        ));
    }

    #[test]
    fn test_bearer_token_is_recorded() {
        let spec = RequestSpec::build([
            endpoint(HttpMethod::Get, "/accounts", &[]),
            bearer_token("tok"),
        ])
        .unwrap();
        assert_eq!(spec.bearer_token(), Some("tok"));
    }

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
