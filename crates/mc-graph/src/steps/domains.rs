use tracing::{debug, instrument};

use super::{account_entity, StepContext};
use crate::converters::create_domain_entity;
use crate::entity::{Relationship, RelationshipClass};
use crate::error::Result;

/// Fetch internal domains and link them to the account.
#[instrument(skip(ctx))]
pub async fn fetch_domains(ctx: StepContext<'_>) -> Result<()> {
    let account = account_entity(ctx).await?;
    let domains = ctx.client.get_domains().await?;
    debug!(count = domains.len(), "Fetched domains");

    for domain in &domains {
        let entity = create_domain_entity(domain)?;
        let relationship = Relationship::direct(RelationshipClass::Has, &account, &entity);
        ctx.job_state.add_entity(entity).await?;
        ctx.job_state.add_relationship(relationship).await?;
    }

    Ok(())
}
