//! Awareness training campaigns and user enrollment.

use futures::TryStreamExt;
use tracing::{debug, instrument};

use mimecast_api::endpoints;
use mimecast_client::paginate;

use super::{account_entity, StepContext};
use crate::constants::AWARENESS_CAMPAIGN;
use crate::converters::create_awareness_campaign_entity;
use crate::entity::{Relationship, RelationshipClass};
use crate::error::Result;

/// Fetch awareness campaigns and link them to the account.
#[instrument(skip(ctx))]
pub async fn fetch_awareness_campaigns(ctx: StepContext<'_>) -> Result<()> {
    let account = account_entity(ctx).await?;
    let campaigns = ctx.client.get_awareness_campaigns().await?;
    debug!(count = campaigns.len(), "Fetched awareness campaigns");

    for campaign in &campaigns {
        let entity = create_awareness_campaign_entity(campaign)?;
        let relationship = Relationship::direct(RelationshipClass::Has, &account, &entity);
        ctx.job_state.add_entity(entity).await?;
        ctx.job_state.add_relationship(relationship).await?;
    }

    Ok(())
}

/// Link users to the campaigns they are enrolled in.
///
/// Enrollment pages are processed as they arrive. Users that were not
/// collected by the users step are skipped. A user has COMPLETED a campaign
/// unless one of their per-question results is still `SENT`, in which case
/// they are only ASSIGNED.
#[instrument(skip(ctx))]
pub async fn fetch_awareness_campaign_enrollment(ctx: StepContext<'_>) -> Result<()> {
    let endpoint = ctx.client.inner().url(endpoints::AWARENESS_CAMPAIGN_USER_DATA);
    let client = ctx.client;

    for campaign in ctx
        .job_state
        .iterate_entities(AWARENESS_CAMPAIGN.entity_type)
        .await?
    {
        let campaign_id = campaign.key.as_str();
        let pages = paginate::pages(&endpoint, move |cursor| async move {
            client
                .get_awareness_campaign_user_data_batch(campaign_id, cursor.as_deref())
                .await
        });
        futures::pin_mut!(pages);

        while let Some(page) = pages.try_next().await? {
            for user_data in page.items {
                let Some(user) = ctx.job_state.find_entity(&user_data.email).await? else {
                    debug!(campaign = campaign_id, "Enrolled user not collected, skipping");
                    continue;
                };

                let class = if user_data.completed_training() {
                    RelationshipClass::Completed
                } else {
                    RelationshipClass::Assigned
                };
                ctx.job_state
                    .add_relationship(Relationship::direct(class, &user, &campaign))
                    .await?;
            }
        }
    }

    Ok(())
}
