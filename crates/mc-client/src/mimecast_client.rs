//! High-level Mimecast client: signing, envelope validation and defect recovery.
//!
//! ## Security
//!
//! - Credential material is redacted in Debug output
//! - Signers are skipped in tracing spans

use serde::de::DeserializeOwned;
use tracing::{error, instrument, warn};

use mimecast_auth::{Credentials, Signer};

use crate::client::MimecastHttpClient;
use crate::config::ClientConfig;
use crate::envelope::{self, Decoded, Envelope, RawEnvelope, Verdict};
use crate::error::{Error, ErrorKind, Result};
use crate::paginate::Page;
use crate::request::ApiRequest;

/// Mimecast API client.
///
/// Combines the credential set with the HTTP executor. Every call goes
/// through the same path: sign, POST, decode the envelope, validate it and,
/// if the provider reports the developer-key defect, resend once.
///
/// The client holds no mutable state; clones share the connection pool and
/// can issue calls concurrently.
///
/// # Example
///
/// ```rust,ignore
/// use mimecast_auth::Credentials;
/// use mimecast_client::{ApiRequest, MimecastClient};
///
/// let client = MimecastClient::new(Credentials::from_env()?)?;
/// let domains: Vec<serde_json::Value> = client
///     .fetch_all(&ApiRequest::new("/api/domain/get-internal-domain"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct MimecastClient {
    http: MimecastHttpClient,
    signer: Signer,
}

impl std::fmt::Debug for MimecastClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MimecastClient")
            .field("base_url", &self.http.config().base_url)
            .field("client_id", &self.signer.credentials().client_id())
            .finish_non_exhaustive()
    }
}

impl MimecastClient {
    /// Create a client against the default host.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: MimecastHttpClient::new(config)?,
            signer: Signer::new(credentials),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.http.config().base_url
    }

    /// Items requested per page by paginated listings.
    pub fn page_size(&self) -> u32 {
        self.http.config().page_size
    }

    /// Full URL for an API path.
    pub fn url(&self, path: &str) -> String {
        self.http.url(path)
    }

    /// Send a request and return its validated envelope.
    ///
    /// - A body that is not an envelope, or an envelope status other than 200,
    ///   is an error classified by the request's call kind.
    /// - The developer-key defect triggers exactly one resend of the request;
    ///   a second occurrence is returned as [`ErrorKind::TransientDefect`].
    /// - Any other failure records are logged and the envelope is returned.
    #[instrument(skip(self, request), fields(path = %request.path()))]
    pub async fn send(&self, request: &ApiRequest) -> Result<RawEnvelope> {
        let endpoint = self.url(request.path());
        let mut defect_retried = false;

        loop {
            let raw = self.http.execute(request, &self.signer).await?;

            let envelope = match envelope::decode(&raw.body) {
                Decoded::Envelope(envelope) => envelope,
                Decoded::Malformed(reason) => {
                    return Err(Error::for_call(
                        request.kind(),
                        &endpoint,
                        Some(raw.status),
                        format!("response body is not a valid envelope: {reason}"),
                    ));
                }
            };

            match envelope::inspect(&envelope) {
                Verdict::Accept => {
                    if envelope.has_failures() {
                        error!(
                            endpoint = %endpoint,
                            failures = %serde_json::to_string(&envelope.fail).unwrap_or_default(),
                            "Response contains entries in fail array"
                        );
                    }
                    return Ok(envelope);
                }
                Verdict::RetryOnce if !defect_retried => {
                    warn!(endpoint = %endpoint, "Developer key failure reported, retrying once");
                    defect_retried = true;
                }
                Verdict::RetryOnce => {
                    return Err(Error::new(ErrorKind::TransientDefect { endpoint }));
                }
                Verdict::Fail { status } => {
                    error!(endpoint = %endpoint, status, "Non-200 status in response body");
                    return Err(Error::for_call(
                        request.kind(),
                        &endpoint,
                        Some(status),
                        format!(
                            "encountered non-200 status code in response body despite HTTP {}: {status}",
                            raw.status
                        ),
                    ));
                }
            }
        }
    }

    /// Send a request and narrow its data items to `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<Envelope<T>> {
        let envelope = self.send(request).await?;
        envelope.narrow().map_err(|e| {
            Error::for_call(
                request.kind(),
                self.url(request.path()),
                None,
                format!("unexpected data shape: {e}"),
            )
            .caused_by(e)
        })
    }

    /// Fetch a listing answered in a single envelope.
    ///
    /// An empty `data` array is an empty result, not an error.
    pub async fn fetch_all<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<Vec<T>> {
        Ok(self.fetch(request).await?.data)
    }

    /// Fetch exactly one record; an empty `data` array is a 404.
    pub async fn fetch_one<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        self.fetch(request)
            .await?
            .data
            .into_iter()
            .next()
            .ok_or_else(|| {
                Error::for_call(
                    request.kind(),
                    self.url(request.path()),
                    Some(404),
                    "response is missing data",
                )
            })
    }

    /// Fetch one page of a listing together with its continuation cursor.
    pub async fn fetch_page<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<Page<T>> {
        let envelope = self.fetch(request).await?;
        let next_cursor = envelope.next_cursor().map(str::to_string);
        Ok(Page::new(envelope.data, next_cursor))
    }
}
