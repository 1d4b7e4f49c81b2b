//! # mimecast-connector
//!
//! Rust client for the Mimecast email security API, and a collector that
//! maps the account's domains, users and security awareness training into
//! an entity/relationship graph.
//!
//! ## Security
//!
//! - Client secrets and application keys are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Every request is signed with a fresh timestamp and request id
//!
//! ## Crates
//!
//! - **mimecast-auth** - Credentials and per-request HMAC signing
//! - **mimecast-client** - Request execution, retries, envelope validation, pagination
//! - **mimecast-api** - Typed resource accessors (account, domains, users, training)
//! - **mimecast-graph** - Entities, relationships, job state and extraction steps
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mimecast_connector::{auth::Credentials, client::ClientConfig, collect};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::from_env()?;
//!     let collection = collect(credentials, ClientConfig::default()).await?;
//!
//!     println!("{}", serde_json::to_string_pretty(&collection.summary().await)?);
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "api")]
pub use mimecast_api as api;
#[cfg(feature = "auth")]
pub use mimecast_auth as auth;
#[cfg(feature = "client")]
pub use mimecast_client as client;
#[cfg(feature = "graph")]
pub use mimecast_graph as graph;

#[cfg(feature = "graph")]
mod collect;

#[cfg(feature = "graph")]
pub use collect::{collect, Collection, CollectionSummary, StepSummary};
