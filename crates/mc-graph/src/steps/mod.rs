//! Extraction steps and the runner that executes them.
//!
//! Steps run in declaration order. A step whose dependencies did not all
//! complete is skipped and reported, never run against a partial graph.

mod account;
mod awareness_campaigns;
mod domains;
mod users;

use std::collections::HashSet;
use tracing::{error, info, instrument, warn};

use mimecast_api::MimecastApiClient;

use crate::constants::{
    EntityMetadata, RelationshipMetadata, ACCOUNT, ACCOUNT_HAS_AWARENESS_CAMPAIGN,
    ACCOUNT_HAS_DOMAIN, AWARENESS_CAMPAIGN, DOMAIN, DOMAIN_HAS_USER, USER,
    USER_ASSIGNED_AWARENESS_CAMPAIGN, USER_COMPLETED_AWARENESS_CAMPAIGN,
};
use crate::error::{Error, ErrorKind, Result};
use crate::store::JobState;

pub use account::{account_entity, fetch_account};
pub use awareness_campaigns::{fetch_awareness_campaign_enrollment, fetch_awareness_campaigns};
pub use domains::fetch_domains;
pub use users::fetch_users;

/// What a step needs to run.
#[derive(Clone, Copy)]
pub struct StepContext<'a> {
    pub client: &'a MimecastApiClient,
    pub job_state: &'a dyn JobState,
}

/// The extraction steps, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    Account,
    Domains,
    Users,
    AwarenessCampaigns,
    AwarenessCampaignEnrollment,
}

impl StepId {
    pub const ALL: [StepId; 5] = [
        StepId::Account,
        StepId::Domains,
        StepId::Users,
        StepId::AwarenessCampaigns,
        StepId::AwarenessCampaignEnrollment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Account => "fetch-account",
            StepId::Domains => "fetch-domains",
            StepId::Users => "fetch-users",
            StepId::AwarenessCampaigns => "fetch-awareness-campaigns",
            StepId::AwarenessCampaignEnrollment => "fetch-awareness-campaigns-enrollment",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StepId::Account => "Fetch Account Details",
            StepId::Domains => "Fetch Domains",
            StepId::Users => "Fetch Users",
            StepId::AwarenessCampaigns => "Fetch Awareness Campaigns",
            StepId::AwarenessCampaignEnrollment => "Fetch Awareness Campaigns Enrollment Data",
        }
    }

    pub fn depends_on(&self) -> &'static [StepId] {
        match self {
            StepId::Account => &[],
            StepId::Domains => &[StepId::Account],
            StepId::Users => &[StepId::Domains],
            StepId::AwarenessCampaigns => &[StepId::Account],
            StepId::AwarenessCampaignEnrollment => &[StepId::Users, StepId::AwarenessCampaigns],
        }
    }

    /// Entity types the step produces.
    pub fn entities(&self) -> &'static [EntityMetadata] {
        match self {
            StepId::Account => &[ACCOUNT],
            StepId::Domains => &[DOMAIN],
            StepId::Users => &[USER],
            StepId::AwarenessCampaigns => &[AWARENESS_CAMPAIGN],
            StepId::AwarenessCampaignEnrollment => &[],
        }
    }

    /// Relationship types the step produces.
    pub fn relationships(&self) -> &'static [RelationshipMetadata] {
        match self {
            StepId::Account => &[],
            StepId::Domains => &[ACCOUNT_HAS_DOMAIN],
            StepId::Users => &[DOMAIN_HAS_USER],
            StepId::AwarenessCampaigns => &[ACCOUNT_HAS_AWARENESS_CAMPAIGN],
            StepId::AwarenessCampaignEnrollment => &[
                USER_ASSIGNED_AWARENESS_CAMPAIGN,
                USER_COMPLETED_AWARENESS_CAMPAIGN,
            ],
        }
    }

    /// Run this step alone.
    pub async fn execute(&self, ctx: StepContext<'_>) -> Result<()> {
        match self {
            StepId::Account => fetch_account(ctx).await,
            StepId::Domains => fetch_domains(ctx).await,
            StepId::Users => fetch_users(ctx).await,
            StepId::AwarenessCampaigns => fetch_awareness_campaigns(ctx).await,
            StepId::AwarenessCampaignEnrollment => fetch_awareness_campaign_enrollment(ctx).await,
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one step of a run.
#[derive(Debug)]
pub struct StepOutcome {
    pub step: StepId,
    pub result: Result<()>,
}

/// Results of every step of a run, in execution order.
#[derive(Debug, Default)]
pub struct ExecutionReport {
    pub outcomes: Vec<StepOutcome>,
}

impl ExecutionReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn completed(&self) -> impl Iterator<Item = StepId> + '_ {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_ok())
            .map(|o| o.step)
    }

    pub fn failures(&self) -> impl Iterator<Item = (StepId, &Error)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.step, e)))
    }
}

/// Run steps in the given order.
///
/// A failing step does not stop the run; steps depending on it are skipped
/// with a [`ErrorKind::StepDependency`] error.
#[instrument(skip(ctx, steps))]
pub async fn run_steps(ctx: StepContext<'_>, steps: &[StepId]) -> ExecutionReport {
    let mut report = ExecutionReport::default();
    let mut completed: HashSet<StepId> = HashSet::new();

    for &step in steps {
        let missing = step
            .depends_on()
            .iter()
            .find(|dependency| !completed.contains(*dependency));

        let result = match missing {
            Some(dependency) => {
                warn!(step = %step, dependency = %dependency, "Skipping step with incomplete dependency");
                Err(Error::new(ErrorKind::StepDependency {
                    step: step.to_string(),
                    dependency: dependency.to_string(),
                }))
            }
            None => {
                info!(step = %step, "Running step");
                step.execute(ctx).await
            }
        };

        match &result {
            Ok(()) => {
                completed.insert(step);
            }
            Err(e) => error!(step = %step, error = %e, "Step failed"),
        }

        report.outcomes.push(StepOutcome { step, result });
    }

    report
}

/// Run every step.
pub async fn run_all(ctx: StepContext<'_>) -> ExecutionReport {
    run_steps(ctx, &StepId::ALL).await
}
