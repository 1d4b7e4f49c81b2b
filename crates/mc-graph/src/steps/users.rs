use tracing::{debug, instrument, warn};

use super::StepContext;
use crate::constants::DOMAIN;
use crate::converters::create_user_entity;
use crate::entity::{Relationship, RelationshipClass};
use crate::error::Result;

/// Fetch the users of every stored domain and link them to their domain.
#[instrument(skip(ctx))]
pub async fn fetch_users(ctx: StepContext<'_>) -> Result<()> {
    for domain in ctx.job_state.iterate_entities(DOMAIN.entity_type).await? {
        let Some(domain_name) = domain.display_name() else {
            warn!(domain = %domain.key, "Domain entity has no name, skipping its users");
            continue;
        };

        let users = ctx.client.get_users(domain_name).await?;
        debug!(domain = domain_name, count = users.len(), "Fetched users");

        for user in &users {
            let entity = create_user_entity(user)?;
            let relationship = Relationship::direct(RelationshipClass::Has, &domain, &entity);
            ctx.job_state.add_entity(entity).await?;
            ctx.job_state.add_relationship(relationship).await?;
        }
    }

    Ok(())
}
