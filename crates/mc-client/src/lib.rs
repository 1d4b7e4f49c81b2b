//! # mimecast-client
//!
//! Core HTTP client infrastructure for the Mimecast API.
//!
//! This crate provides:
//! - Per-request HMAC signing (fresh timestamp and nonce on every attempt)
//! - Transport retries with exponential backoff and jitter
//! - Strict response-envelope decoding and validation
//! - A single content-triggered retry for the provider's developer-key defect
//! - Cursor-driven pagination with a repeated-cursor guard
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Resource accessors                       │
//! │  (mimecast-api: account, domains, users, campaigns)         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    MimecastClient                           │
//! │  - Holds credentials + HTTP client                          │
//! │  - Envelope validation, defect recovery                     │
//! │  - Typed fetch_one / fetch_all / fetch_page                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    MimecastHttpClient                       │
//! │  - Signed POSTs with transport retries                      │
//! │  - Failure classification by call kind                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use mimecast_auth::Credentials;
//! use mimecast_client::{paginate, ApiRequest, MimecastClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mimecast_client::Error> {
//!     let client = MimecastClient::new(Credentials::from_env()?)?;
//!
//!     let users: Vec<serde_json::Value> = paginate::collect_all(
//!         "/api/user/get-internal-users",
//!         |cursor| {
//!             let request = ApiRequest::new("/api/user/get-internal-users")
//!                 .paginate(client.page_size(), cursor.as_deref());
//!             let client = client.clone();
//!             async move { client.fetch_page(&request).await }
//!         },
//!     )
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
pub mod envelope;
mod error;
mod mimecast_client;
pub mod paginate;
mod request;
mod retry;
mod status;

pub use client::{MimecastHttpClient, RawResponse};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
pub use envelope::{Envelope, RawEnvelope};
pub use error::{Error, ErrorKind, Result};
pub use mimecast_client::MimecastClient;
pub use paginate::Page;
pub use request::{ApiRequest, CallKind, RequestBody};
pub use retry::{BackoffStrategy, RetryConfig, RetryPolicy};
pub use status::status_text;

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("mimecast-connector/", env!("CARGO_PKG_VERSION"));
