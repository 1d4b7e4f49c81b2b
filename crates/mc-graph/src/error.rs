//! Error types for mimecast-graph.

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for graph operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// The underlying API client error, if this came from a provider call.
    pub fn client_error(&self) -> Option<&mimecast_client::Error> {
        match &self.kind {
            ErrorKind::Client(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if the provider rejected the credentials.
    pub fn is_auth_error(&self) -> bool {
        self.client_error().is_some_and(|e| e.is_auth_error())
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// A provider call failed.
    #[error("{0}")]
    Client(mimecast_client::Error),

    /// An entity another step should have produced is absent.
    #[error("Missing key: {0}")]
    MissingKey(String),

    /// The invocation configuration is unusable.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A step ran before its dependencies completed.
    #[error("Step {step} depends on {dependency}, which did not complete")]
    StepDependency { step: String, dependency: String },

    /// A record could not be converted into graph properties.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<mimecast_client::Error> for Error {
    fn from(err: mimecast_client::Error) -> Self {
        Error::new(ErrorKind::Client(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Serialization(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_passthrough() {
        let client_err = mimecast_client::Error::for_call(
            mimecast_client::CallKind::Authentication,
            "https://us-api.mimecast.com/api/account/get-account",
            Some(401),
            "rejected",
        );
        let err: Error = client_err.into();

        assert!(err.is_auth_error());
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn test_dependency_display() {
        let err = Error::new(ErrorKind::StepDependency {
            step: "fetch-users".into(),
            dependency: "fetch-domains".into(),
        });
        assert_eq!(
            err.to_string(),
            "Step fetch-users depends on fetch-domains, which did not complete"
        );
        assert!(!err.is_auth_error());
    }
}
