//! # mimecast-api
//!
//! Typed accessors for the Mimecast resources used by the connector.
//!
//! ## Resources
//!
//! - **Account** - the customer account (singleton lookup)
//! - **Domains** - internal domains
//! - **Users** - internal users, paginated per domain
//! - **Awareness training** - campaigns and per-user enrollment data
//!
//! ## Example
//!
//! ```rust,ignore
//! use mimecast_api::MimecastApiClient;
//! use mimecast_auth::Credentials;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mimecast_api::Error> {
//!     let client = MimecastApiClient::new(Credentials::from_env()?)?;
//!
//!     let account = client.get_account().await?;
//!     println!("{:?}", account.account_name);
//!
//!     let mut cursor = None;
//!     loop {
//!         let page = client.get_user_batch("example.com", cursor.as_deref()).await?;
//!         for user in &page.items {
//!             println!("{}", user.email_address);
//!         }
//!         match page.next_cursor {
//!             Some(next) => cursor = Some(next),
//!             None => break,
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
pub mod endpoints;
mod types;

pub use client::MimecastApiClient;
pub use types::{
    Account, AwarenessCampaign, CampaignGroup, CampaignUserData, Domain, EmailMessage, User,
    UserListing, RESULT_SENT,
};

// Error types
pub use mimecast_client::{Error, ErrorKind, Page, Result};
