//! Per-request signing for the Mimecast API.
//!
//! Every call carries four headers that the provider validates together:
//!
//! ```text
//! x-mc-date:      Mon, 19 Oct 2026 10:15:30 UTC
//! x-mc-req-id:    6f1c2d1e-8a4b-4c55-9a5e-1f0b7c3d2e10
//! x-mc-app-id:    <app id>
//! Authorization:  MC <client id>:base64(HMAC-SHA1(secret, "date:reqId:path:appKey"))
//! ```
//!
//! The date and request id are generated fresh for each outbound request.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use uuid::Uuid;

use crate::credentials::Credentials;
use crate::error::{Error, ErrorKind, Result};

type HmacSha1 = Hmac<Sha1>;

/// Header carrying the request timestamp.
pub const DATE_HEADER: &str = "x-mc-date";
/// Header carrying the per-request nonce.
pub const REQUEST_ID_HEADER: &str = "x-mc-req-id";
/// Header carrying the registered application id.
pub const APP_ID_HEADER: &str = "x-mc-app-id";
/// Header carrying the computed signature.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Format a timestamp the way the provider expects it.
///
/// This is RFC 1123 with the literal `UTC` zone name in place of `GMT`.
pub fn format_request_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S UTC").to_string()
}

/// Inputs to one signature: timestamp, nonce and target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    date: String,
    request_id: String,
    path: String,
}

impl SigningContext {
    /// Build a context from fixed values.
    pub fn new(
        date: impl Into<String>,
        request_id: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            request_id: request_id.into(),
            path: path.into(),
        }
    }

    /// Build a context for `path` stamped with the current time and a new v4 UUID.
    pub fn fresh(path: impl Into<String>) -> Self {
        Self::new(
            format_request_date(Utc::now()),
            Uuid::new_v4().to_string(),
            path,
        )
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// The full header set for one signed request.
#[derive(Clone)]
pub struct SignedHeaders {
    pub date: String,
    pub request_id: String,
    pub app_id: String,
    pub authorization: String,
}

impl std::fmt::Debug for SignedHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedHeaders")
            .field("date", &self.date)
            .field("request_id", &self.request_id)
            .field("app_id", &self.app_id)
            .field("authorization", &"[REDACTED]")
            .finish()
    }
}

impl SignedHeaders {
    /// Header name/value pairs in wire form.
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            (DATE_HEADER, self.date.as_str()),
            (REQUEST_ID_HEADER, self.request_id.as_str()),
            (APP_ID_HEADER, self.app_id.as_str()),
            (AUTHORIZATION_HEADER, self.authorization.as_str()),
        ]
    }
}

/// Computes Authorization headers from a [`Credentials`] set.
#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Credentials,
}

impl Signer {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Compute `MC {clientId}:{signature}` for the given context.
    ///
    /// Pure given its inputs. Fails only when the client secret is not valid
    /// base64.
    pub fn authorization(&self, ctx: &SigningContext) -> Result<String> {
        let key = STANDARD.decode(self.credentials.client_secret()).map_err(|e| {
            Error::with_source(
                ErrorKind::Signing("client secret is not valid base64".to_string()),
                e,
            )
        })?;

        let mut mac = HmacSha1::new_from_slice(&key).map_err(|e| {
            Error::with_source(ErrorKind::Signing("unusable signing key".to_string()), e)
        })?;
        mac.update(ctx.date.as_bytes());
        mac.update(b":");
        mac.update(ctx.request_id.as_bytes());
        mac.update(b":");
        mac.update(ctx.path.as_bytes());
        mac.update(b":");
        mac.update(self.credentials.app_key().as_bytes());

        let signature = STANDARD.encode(mac.finalize().into_bytes());
        Ok(format!("MC {}:{}", self.credentials.client_id(), signature))
    }

    /// Produce the four signed headers for `ctx`.
    pub fn sign(&self, ctx: &SigningContext) -> Result<SignedHeaders> {
        Ok(SignedHeaders {
            authorization: self.authorization(ctx)?,
            date: ctx.date.clone(),
            request_id: ctx.request_id.clone(),
            app_id: self.credentials.app_id().to_string(),
        })
    }

    /// Sign a request to `path` with a fresh timestamp and nonce.
    pub fn sign_path(&self, path: &str) -> Result<SignedHeaders> {
        self.sign(&SigningContext::fresh(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const DATE: &str = "Mon, 19 Oct 2026 10:15:30 UTC";
    const REQ_ID: &str = "6f1c2d1e-8a4b-4c55-9a5e-1f0b7c3d2e10";

    fn signer() -> Signer {
        // "secret-signing-key"
        Signer::new(Credentials::new(
            "client-id",
            "c2VjcmV0LXNpZ25pbmcta2V5",
            "app-key-123",
            "app-id-456",
        ))
    }

    #[test]
    fn test_format_request_date() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 10, 15, 30).unwrap();
        assert_eq!(format_request_date(at), DATE);

        let at = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        assert_eq!(format_request_date(at), "Tue, 05 Mar 2024 07:08:09 UTC");
    }

    #[test]
    fn test_authorization_known_vector() {
        let ctx = SigningContext::new(DATE, REQ_ID, "/api/account/get-account");
        assert_eq!(
            signer().authorization(&ctx).unwrap(),
            "MC client-id:lYWOPrVwR8yDvSOt2Upm6RomemA="
        );

        let ctx = SigningContext::new(DATE, REQ_ID, "/api/domain/get-internal-domain");
        assert_eq!(
            signer().authorization(&ctx).unwrap(),
            "MC client-id:hGhcFy4AjeeNWAkcUOTZchwB7bY="
        );
    }

    #[test]
    fn test_authorization_is_deterministic() {
        let ctx = SigningContext::new(DATE, REQ_ID, "/api/user/get-internal-users");
        let s = signer();
        assert_eq!(s.authorization(&ctx).unwrap(), s.authorization(&ctx).unwrap());
    }

    #[test]
    fn test_sign_populates_all_headers() {
        let ctx = SigningContext::new(DATE, REQ_ID, "/api/account/get-account");
        let headers = signer().sign(&ctx).unwrap();

        let pairs = headers.pairs();
        assert_eq!(pairs[0], (DATE_HEADER, DATE));
        assert_eq!(pairs[1], (REQUEST_ID_HEADER, REQ_ID));
        assert_eq!(pairs[2], (APP_ID_HEADER, "app-id-456"));
        assert!(pairs[3].1.starts_with("MC client-id:"));
        assert!(format!("{:?}", headers).contains("[REDACTED]"));
    }

    #[test]
    fn test_fresh_contexts_never_share_nonce() {
        let a = SigningContext::fresh("/api/account/get-account");
        let b = SigningContext::fresh("/api/account/get-account");
        assert_ne!(a.request_id(), b.request_id());
        assert!(a.date().ends_with(" UTC"));
    }

    #[test]
    fn test_malformed_secret_is_signing_error() {
        let s = Signer::new(Credentials::new("id", "%%%not-base64", "key", "app"));
        let err = s.sign_path("/api/account/get-account").unwrap_err();
        assert!(err.is_signing_error());
    }
}
