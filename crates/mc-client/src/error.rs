//! Error types for mimecast-client.
//!
//! Every failure a caller can observe falls into one of a few kinds:
//! signing, authentication, provider API, the transient developer-key
//! defect, or a pagination protocol violation. Raw transport errors are
//! always rewrapped into the authentication or provider API kinds.

use crate::request::CallKind;
use crate::status::status_text;

/// Result type alias for mimecast-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for mimecast-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Build the error for a failed call, classified by the kind of call.
    ///
    /// Authentication calls produce [`ErrorKind::Authentication`], everything
    /// else [`ErrorKind::ProviderApi`]. The status text comes from the fixed
    /// status table.
    pub fn for_call(
        call: CallKind,
        endpoint: impl Into<String>,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        let endpoint = endpoint.into();
        let status_text = status_text(status).to_string();
        let message = message.into();

        let kind = match call {
            CallKind::Authentication => ErrorKind::Authentication {
                endpoint,
                status,
                status_text,
                message,
            },
            CallKind::DataFetch => ErrorKind::ProviderApi {
                endpoint,
                status,
                status_text,
                message,
            },
        };
        Self::new(kind)
    }

    /// Attach a source error.
    pub fn caused_by(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns true if this is an authentication-class error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication { .. })
    }

    /// Returns true if the transient developer-key defect survived its retry.
    ///
    /// The whole operation may be retried by the caller.
    pub fn is_transient_defect(&self) -> bool {
        matches!(self.kind, ErrorKind::TransientDefect { .. })
    }

    /// Whether re-running the whole operation later may succeed.
    pub fn is_retryable(&self) -> bool {
        self.is_transient_defect()
            || self.status().is_some_and(crate::retry::is_retryable_status)
    }

    /// Returns true if this error came from signing a request.
    pub fn is_signing_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Signing(_))
    }

    /// Returns true if the provider answered with an empty singleton lookup.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The HTTP or envelope status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Authentication { status, .. } | ErrorKind::ProviderApi { status, .. } => {
                *status
            }
            ErrorKind::TransientDefect { .. } => Some(503),
            _ => None,
        }
    }

    /// The endpoint this error was raised for, if any.
    pub fn endpoint(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Authentication { endpoint, .. }
            | ErrorKind::ProviderApi { endpoint, .. }
            | ErrorKind::TransientDefect { endpoint }
            | ErrorKind::RepeatedCursor { endpoint, .. } => Some(endpoint.as_str()),
            _ => None,
        }
    }
}

fn status_label(status: &Option<u16>) -> String {
    status.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Credential material could not be used to sign a request.
    #[error("Signing error: {0}")]
    Signing(String),

    /// The authentication verification call failed.
    #[error("Provider authentication failed: {} {status_text} ({endpoint}): {message}", status_label(status))]
    Authentication {
        endpoint: String,
        status: Option<u16>,
        status_text: String,
        message: String,
    },

    /// A data call failed at the transport layer or inside the response envelope.
    #[error("Provider API error: {} {status_text} ({endpoint}): {message}", status_label(status))]
    ProviderApi {
        endpoint: String,
        status: Option<u16>,
        status_text: String,
        message: String,
    },

    /// The developer-key defect was reported again after its single retry.
    #[error("503 Service Unavailable ({endpoint}): transient developer key failure persisted after retry")]
    TransientDefect { endpoint: String },

    /// The provider handed back a cursor it had already issued for this listing.
    #[error("Pagination cursor repeated for {endpoint}: {cursor}")]
    RepeatedCursor { endpoint: String, cursor: String },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<mimecast_auth::Error> for Error {
    fn from(err: mimecast_auth::Error) -> Self {
        let kind = match &err.kind {
            mimecast_auth::ErrorKind::Signing(msg) => ErrorKind::Signing(msg.clone()),
            _ => ErrorKind::Config(err.to_string()),
        };
        Error::with_source(kind, err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}
