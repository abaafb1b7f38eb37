//! The call executor.
//!
//! This module provides the [`Client`] type, which turns a built
//! [`RequestSpec`] into one authenticated HTTP request, runs it through an
//! [`HttpTransport`] and returns the unclassified [`CallResponse`].

use reqwest::header::{HeaderValue, AUTHORIZATION, USER_AGENT};

use crate::clients::call::{self, CallOption, HttpMethod, RequestSpec};
use crate::clients::context::CallContext;
use crate::clients::errors::{CallError, InvalidCallError, TransportError};
use crate::clients::response::CallResponse;
use crate::clients::transport::{HttpTransport, ReqwestTransport, TransportRequest};
use crate::config::ClientConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Executes API calls for one set of credentials.
///
/// The client handles:
/// - URL construction from the configured host, the path and the query
/// - `User-Agent` and `Authorization` headers (Basic, or Bearer when the
///   call carries a token)
/// - The configured default timeout and shared rate limiter
/// - Cancellation through the caller's [`CallContext`]
///
/// It never retries. A response with any status is a successful execution;
/// classification happens on the returned [`CallResponse`].
///
/// # Thread Safety
///
/// `Client` is `Send + Sync` and can be shared across tasks. Calls issued
/// concurrently contend for the same rate limiter, if one is configured.
///
/// # Example
///
/// ```rust,ignore
/// use moov_api::clients::{call, CallContext, Client, HttpMethod};
/// use moov_api::{ClientConfig, Credentials, PublicKey, SecretKey};
///
/// let config = ClientConfig::builder()
///     .credentials(Credentials::new(
///         PublicKey::new("public")?,
///         SecretKey::new("secret")?,
///     ))
///     .build()?;
/// let client = Client::new(config)?;
///
/// let account: Account = client
///     .execute(
///         &CallContext::new(),
///         [
///             call::endpoint(HttpMethod::Get, "/accounts/%s", &[account_id]),
///             call::accept_json(),
///         ],
///     )
///     .await?
///     .object_or_error()?;
/// ```
#[derive(Debug)]
pub struct Client<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
    user_agent: String,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

impl Client<ReqwestTransport> {
    /// Creates a client using the default `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the HTTP client cannot be initialized.
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        Ok(Self::with_transport(config, ReqwestTransport::new()?))
    }
}

impl<T: HttpTransport> Client<T> {
    /// Creates a client over a caller-supplied transport.
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Moov Rust SDK v{SDK_VERSION}");

        Self {
            config,
            transport,
            user_agent,
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the `User-Agent` sent with every call.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Builds the wire request for `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCallError::MissingEndpoint`] for an incomplete spec and
    /// [`InvalidCallError::InvalidHeader`] if the user agent or bearer token
    /// cannot be sent as a header value.
    pub fn prepare(&self, spec: &RequestSpec) -> Result<TransportRequest, InvalidCallError> {
        spec.verify()?;
        let (Some(method), Some(path)) = (spec.method(), spec.path()) else {
            return Err(InvalidCallError::MissingEndpoint);
        };

        let mut url = format!("{}{path}", self.config.credentials().host());
        if !spec.query().is_empty() {
            url.push('?');
            url.push_str(&spec.query_string());
        }

        let mut headers = spec.headers().clone();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent).map_err(|_| InvalidCallError::InvalidHeader {
                name: USER_AGENT.to_string(),
            })?,
        );

        let authorization = spec.bearer_token().map_or_else(
            || self.config.credentials().basic_auth_header(),
            |token| format!("Bearer {token}"),
        );
        let mut authorization =
            HeaderValue::from_str(&authorization).map_err(|_| InvalidCallError::InvalidHeader {
                name: AUTHORIZATION.to_string(),
            })?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        Ok(TransportRequest {
            method,
            url,
            headers,
            body: spec.body().map(<[u8]>::to_vec),
        })
    }

    /// Builds a call from `options` and executes it.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::InvalidCall`] if the options do not form a valid
    /// call and [`CallError::Transport`] if no response was obtained. A
    /// non-success status is not an error here.
    pub async fn execute(
        &self,
        ctx: &CallContext,
        options: impl IntoIterator<Item = CallOption>,
    ) -> Result<CallResponse, CallError> {
        let spec = RequestSpec::build(options)?;
        self.execute_spec(ctx, &spec).await
    }

    /// Executes an already built call.
    ///
    /// The configured default timeout is combined with the context's own
    /// deadline (the earlier one wins), and the rate limiter is consulted
    /// before the request is sent. Exactly one request is made.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn execute_spec(
        &self,
        ctx: &CallContext,
        spec: &RequestSpec,
    ) -> Result<CallResponse, CallError> {
        let request = self.prepare(spec)?;
        let method = request.method;

        let ctx = match self.config.timeout() {
            Some(timeout) => ctx.clone().with_timeout(timeout),
            None => ctx.clone(),
        };

        if let Some(limiter) = self.config.rate_limiter() {
            limiter.acquire(&ctx).await?;
        }

        let response = ctx.run(self.transport.send(request)).await?;
        let response = CallResponse::from_parts(response.status, &response.headers, response.body)
            .with_idempotency_key(spec.idempotency_key().cloned());

        tracing::debug!(
            method = %method,
            path = spec.path().unwrap_or_default(),
            status = response.status_code(),
            request_id = response.request_id().unwrap_or_default(),
            "Executed API call"
        );

        Ok(response)
    }

    /// Checks connectivity and credentials with `GET /ping`.
    ///
    /// # Errors
    ///
    /// Returns [`CallError`] if the call fails or the API rejects it.
    pub async fn ping(&self, ctx: &CallContext) -> Result<(), CallError> {
        self.execute(ctx, [call::endpoint(HttpMethod::Get, "/ping", &[])])
            .await?
            .no_content_or_error()
    }
}
