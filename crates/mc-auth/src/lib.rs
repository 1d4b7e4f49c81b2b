//! # mimecast-auth
//!
//! Credentials and request signing for the Mimecast API.
//!
//! ## Security
//!
//! - The client secret and application key are redacted in Debug output
//! - Computed Authorization headers are redacted in Debug output
//! - Error messages never echo credential material
//!
//! ## Example
//!
//! ```rust,ignore
//! use mimecast_auth::{Credentials, Signer};
//!
//! let creds = Credentials::from_env()?;
//! creds.validate()?;
//!
//! let signer = Signer::new(creds);
//! let headers = signer.sign_path("/api/account/get-account")?;
//! for (name, value) in headers.pairs() {
//!     println!("{name}: ...");
//! }
//! ```

mod credentials;
mod error;
mod signer;

pub use credentials::Credentials;
pub use error::{Error, ErrorKind, Result};
pub use signer::{
    format_request_date, SignedHeaders, Signer, SigningContext, APP_ID_HEADER,
    AUTHORIZATION_HEADER, DATE_HEADER, REQUEST_ID_HEADER,
};
