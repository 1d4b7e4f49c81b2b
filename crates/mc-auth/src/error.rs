//! Credential and signing failures. Messages name fields, never values.

pub type Result<T> = std::result::Result<T, Error>;

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

    /// The secret key could not be decoded or keyed into the MAC.
    pub fn is_signing_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Signing(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// One or more of the four credential fields is empty.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Signing error: {0}")]
    Signing(String),

    /// A `MIMECAST_*` variable is missing from the environment.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),
}
