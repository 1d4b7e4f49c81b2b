//! # mimecast-graph
//!
//! Turns Mimecast resources into a graph of entities and relationships.
//!
//! ```text
//! mimecast_account ──HAS──▶ mimecast_domain ──HAS──▶ mimecast_user
//!        │                                               │
//!        └──HAS──▶ mimecast_awareness_campaign ◀─────────┘
//!                                          ASSIGNED | COMPLETED
//! ```
//!
//! Extraction is split into steps ([`StepId`]) that write into a
//! [`JobState`]. Steps run in a fixed order and each declares the steps it
//! depends on.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mimecast_auth::Credentials;
//! use mimecast_client::ClientConfig;
//! use mimecast_graph::{run_all, validate_invocation, InMemoryJobState, StepContext};
//!
//! let client = validate_invocation(Credentials::from_env()?, ClientConfig::default()).await?;
//! let state = InMemoryJobState::new();
//! let report = run_all(StepContext { client: &client, job_state: &state }).await;
//!
//! println!("{}", serde_json::to_string_pretty(&state.summary().await)?);
//! ```

mod config;
pub mod constants;
pub mod converters;
mod entity;
mod error;
mod steps;
mod store;

pub use config::validate_invocation;
pub use entity::{relationship_type, Entity, RawDataEntry, Relationship, RelationshipClass};
pub use error::{Error, ErrorKind, Result};
pub use steps::{
    account_entity, fetch_account, fetch_awareness_campaign_enrollment,
    fetch_awareness_campaigns, fetch_domains, fetch_users, run_all, run_steps, ExecutionReport,
    StepContext, StepId, StepOutcome,
};
pub use store::{InMemoryJobState, JobState, Summary};
