//! Request executor: signed POSTs with transport retries.

use bytes::Bytes;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use mimecast_auth::{SignedHeaders, Signer};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::ApiRequest;
use crate::retry::{is_retryable_status, RetryPolicy};

/// A 2xx transport response, body not yet interpreted.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

/// A failed attempt, before it is classified for the caller.
#[derive(Debug)]
struct TransportFailure {
    status: Option<u16>,
    message: String,
    retryable: bool,
    retry_after: Option<Duration>,
    source: Option<reqwest::Error>,
}

impl TransportFailure {
    fn from_status(status: u16, retry_after: Option<Duration>) -> Self {
        Self {
            status: Some(status),
            message: format!("HTTP {status} from provider"),
            retryable: is_retryable_status(status),
            retry_after,
            source: None,
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            format!("request failed: {err}")
        };

        Self {
            status: err.status().map(|s| s.as_u16()),
            retryable: err.is_timeout() || err.is_connect(),
            message,
            retry_after: None,
            source: Some(err),
        }
    }

    fn into_error(self, request: &ApiRequest, endpoint: &str) -> Error {
        let err = Error::for_call(request.kind(), endpoint, self.status, self.message);
        match self.source {
            Some(source) => err.caused_by(source),
            None => err,
        }
    }
}

/// HTTP client for the Mimecast API with signing and transport retries.
///
/// Each attempt, retries included, is signed with a fresh timestamp and
/// request id.
#[derive(Debug, Clone)]
pub struct MimecastHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl MimecastHttpClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)?;

        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL for an API path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.config.base_url, path)
        } else {
            format!("{}/{}", self.config.base_url, path)
        }
    }

    /// Execute a request, retrying transport failures on idempotent requests.
    ///
    /// Non-2xx responses and network errors come back as authentication or
    /// provider API errors depending on the request's call kind. Signing
    /// errors surface immediately and are never retried.
    #[instrument(skip(self, request, signer), fields(path = %request.path(), kind = ?request.kind()))]
    pub async fn execute(&self, request: &ApiRequest, signer: &Signer) -> Result<RawResponse> {
        let endpoint = self.url(request.path());
        let mut retry_policy = self
            .config
            .retry
            .as_ref()
            .filter(|_| request.is_idempotent())
            .map(|c| RetryPolicy::new(c.clone()));

        loop {
            let headers = signer.sign_path(request.path())?;

            let failure = match self.execute_once(&endpoint, request, &headers).await {
                Ok(response) => return Ok(response),
                Err(failure) => failure,
            };

            if failure.retryable {
                if let Some(ref mut policy) = retry_policy {
                    if let Some(delay) = policy.next_delay(failure.retry_after) {
                        warn!(
                            attempt = policy.attempt(),
                            delay_ms = delay.as_millis() as u64,
                            status = ?failure.status,
                            error = %failure.message,
                            "Request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                }
            }

            return Err(failure.into_error(request, &endpoint));
        }
    }

    async fn execute_once(
        &self,
        endpoint: &str,
        request: &ApiRequest,
        headers: &SignedHeaders,
    ) -> std::result::Result<RawResponse, TransportFailure> {
        let mut req = self
            .inner
            .post(endpoint)
            .header("Accept", "application/json")
            .json(request.body());

        for (name, value) in headers.pairs() {
            req = req.header(name, value);
        }

        if self.config.enable_tracing {
            debug!(endpoint, request_id = %headers.request_id, "Sending request");
        }

        let response = req.send().await.map_err(TransportFailure::from_reqwest)?;
        let status = response.status().as_u16();

        if self.config.enable_tracing {
            if response.status().is_success() {
                debug!(status, content_length = response.content_length(), "Response received");
            } else {
                info!(status, "Non-success response");
            }
        }

        if !response.status().is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);
            return Err(TransportFailure::from_status(status, retry_after));
        }

        let body = response
            .bytes()
            .await
            .map_err(TransportFailure::from_reqwest)?;

        Ok(RawResponse { status, body })
    }
}
