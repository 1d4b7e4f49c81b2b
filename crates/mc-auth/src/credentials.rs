//! The Mimecast credential set.
//!
//! Secret fields are redacted in Debug output.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

use crate::error::{Error, ErrorKind, Result};

/// Credentials used to sign every request to the Mimecast API.
///
/// `client_secret` is the base64-encoded HMAC key issued with the access key;
/// `app_key` and `app_id` identify the registered application. The set is
/// immutable once built.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    app_key: String,
    app_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("app_key", &"[REDACTED]")
            .field("app_id", &self.app_id)
            .finish()
    }
}

impl Credentials {
    /// Create a credential set from its four parts.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        app_key: impl Into<String>,
        app_id: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            app_key: app_key.into(),
            app_id: app_id.into(),
        }
    }

    /// Load credentials from environment variables.
    ///
    /// Required (either spelling):
    /// - `MIMECAST_CLIENT_ID` or `CLIENT_ID`
    /// - `MIMECAST_CLIENT_SECRET` or `CLIENT_SECRET`
    /// - `MIMECAST_APP_KEY` or `APP_KEY`
    /// - `MIMECAST_APP_ID` or `APP_ID`
    pub fn from_env() -> Result<Self> {
        let client_id = env_var("MIMECAST_CLIENT_ID", "CLIENT_ID")?;
        let client_secret = env_var("MIMECAST_CLIENT_SECRET", "CLIENT_SECRET")?;
        let app_key = env_var("MIMECAST_APP_KEY", "APP_KEY")?;
        let app_id = env_var("MIMECAST_APP_ID", "APP_ID")?;

        Ok(Self::new(client_id, client_secret, app_key, app_id))
    }

    /// Access key identifying the API caller.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Registered application id, sent as `x-mc-app-id`.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub(crate) fn app_key(&self) -> &str {
        &self.app_key
    }

    /// Check that every field is present and the secret decodes as base64.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("clientId", &self.client_id),
            ("clientSecret", &self.client_secret),
            ("appKey", &self.app_key),
            ("appId", &self.app_id),
        ];
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(Error::new(ErrorKind::InvalidCredentials(format!(
                "config requires all of {{clientId, clientSecret, appKey, appId}}; missing {}",
                missing.join(", ")
            ))));
        }

        STANDARD.decode(&self.client_secret).map_err(|e| {
            Error::with_source(
                ErrorKind::InvalidCredentials("clientSecret is not valid base64".to_string()),
                e,
            )
        })?;

        Ok(())
    }
}

fn env_var(primary: &str, fallback: &str) -> Result<String> {
    for name in [primary, fallback] {
        if let Ok(value) = std::env::var(name) {
            debug!(variable = name, "Loaded credential field from environment");
            return Ok(value);
        }
    }
    Err(Error::new(ErrorKind::EnvVar(primary.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new(
            "client-id",
            "c2VjcmV0LXNpZ25pbmcta2V5",
            "app-key-123",
            "app-id-456",
        )
    }

    #[test]
    fn test_env_var_prefers_primary_then_fallback() {
        std::env::set_var("MC_CREDS_TEST_FALLBACK", "from-fallback");
        assert_eq!(
            env_var("MC_CREDS_TEST_PRIMARY", "MC_CREDS_TEST_FALLBACK").unwrap(),
            "from-fallback"
        );

        std::env::set_var("MC_CREDS_TEST_PRIMARY", "from-primary");
        assert_eq!(
            env_var("MC_CREDS_TEST_PRIMARY", "MC_CREDS_TEST_FALLBACK").unwrap(),
            "from-primary"
        );

        let err = env_var("MC_CREDS_TEST_UNSET_A", "MC_CREDS_TEST_UNSET_B").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::EnvVar(ref name) if name == "MC_CREDS_TEST_UNSET_A"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", creds());
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("client-id"));
        assert!(!debug.contains("c2VjcmV0LXNpZ25pbmcta2V5"));
        assert!(!debug.contains("app-key-123"));
    }

    #[test]
    fn test_validate_ok() {
        assert!(creds().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let err = Credentials::new("", "c2VjcmV0", "key", " ")
            .validate()
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("clientId"));
        assert!(msg.contains("appId"));
        assert!(!msg.contains("appKey,"));
    }

    #[test]
    fn test_validate_rejects_non_base64_secret() {
        let err = Credentials::new("id", "not base64!!", "key", "app")
            .validate()
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidCredentials(_)));
        assert!(err.source.is_some());
        assert!(!err.to_string().contains("not base64!!"));
    }
}
