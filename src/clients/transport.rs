//! Injectable HTTP transport.
//!
//! The executor hands a fully prepared [`TransportRequest`] to an
//! [`HttpTransport`] and gets back the raw status, headers and body. Swapping
//! the transport lets tests run without a network and lets applications
//! bring their own configured `reqwest::Client`.

use std::future::Future;

use reqwest::header::HeaderMap;

use crate::clients::call::HttpMethod;
use crate::clients::errors::TransportError;

/// A request ready to be put on the wire.
#[derive(Clone, Debug)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL including the query string.
    pub url: String,
    /// Headers, including authentication.
    pub headers: HeaderMap,
    /// Optional request body.
    pub body: Option<Vec<u8>>,
}

/// A raw response as received from the server.
#[derive(Clone, Debug)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Fully buffered body.
    pub body: Vec<u8>,
}

/// Sends HTTP requests.
///
/// Implementations must return [`TransportError`] only for failures below
/// the HTTP layer. Any response, whatever its status, is a success here.
///
/// Dropping the returned future must abort the in-flight request; the
/// executor relies on this for cancellation and deadlines.
///
/// # Example
///
/// ```rust,ignore
/// use moov_api::clients::{HttpTransport, TransportRequest, TransportResponse, TransportError};
///
/// struct Canned(TransportResponse);
///
/// impl HttpTransport for Canned {
///     async fn send(&self, _req: TransportRequest) -> Result<TransportResponse, TransportError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait HttpTransport: Send + Sync {
    /// Sends a request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response could be obtained.
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

/// Production transport backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport using rustls.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Connection`] if the TLS backend cannot be
    /// initialized.
    pub fn new() -> Result<Self, TransportError> {
        let inner = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| TransportError::Connection(Box::new(e)))?;
        Ok(Self { inner })
    }

    /// Wraps an existing, caller-configured `reqwest::Client`.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_builder() {
        TransportError::InvalidUrl(error.to_string())
    } else {
        TransportError::Connection(Box::new(error))
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .inner
            .request(request.method.into(), &request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(classify)?.to_vec();

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
