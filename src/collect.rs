//! One full collection run.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, instrument};

use mimecast_auth::Credentials;
use mimecast_client::ClientConfig;
use mimecast_graph::{
    run_all, validate_invocation, ErrorKind, ExecutionReport, InMemoryJobState, Result,
    StepContext,
};

/// The graph collected by a run and how each step went.
#[derive(Debug)]
pub struct Collection {
    pub report: ExecutionReport,
    pub state: InMemoryJobState,
}

/// How one step ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepSummary {
    pub id: &'static str,
    /// `success`, `failure` or `skipped`.
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Printable outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub steps: Vec<StepSummary>,
    pub entities: BTreeMap<String, usize>,
    pub relationships: BTreeMap<String, usize>,
}

impl Collection {
    pub fn is_success(&self) -> bool {
        self.report.is_success()
    }

    pub async fn summary(&self) -> CollectionSummary {
        let steps = self
            .report
            .outcomes
            .iter()
            .map(|outcome| {
                let (status, error) = match &outcome.result {
                    Ok(()) => ("success", None),
                    Err(e) if matches!(e.kind, ErrorKind::StepDependency { .. }) => {
                        ("skipped", Some(e.to_string()))
                    }
                    Err(e) => ("failure", Some(e.to_string())),
                };
                StepSummary {
                    id: outcome.step.as_str(),
                    status,
                    error,
                }
            })
            .collect();

        let counts = self.state.summary().await;
        CollectionSummary {
            steps,
            entities: counts.entities,
            relationships: counts.relationships,
        }
    }
}

/// Validate the invocation, then run every extraction step into memory.
///
/// Invalid or rejected credentials fail the whole run before any step starts.
/// Step failures do not: they are recorded in the returned report.
#[instrument(skip(credentials, config))]
pub async fn collect(credentials: Credentials, config: ClientConfig) -> Result<Collection> {
    let client = validate_invocation(credentials, config).await?;
    info!(base_url = client.inner().base_url(), "Credentials verified");

    let state = InMemoryJobState::new();
    let report = run_all(StepContext {
        client: &client,
        job_state: &state,
    })
    .await;

    Ok(Collection { report, state })
}
