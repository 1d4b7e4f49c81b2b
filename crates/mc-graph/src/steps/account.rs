use serde_json::Value;
use tracing::{debug, instrument};

use super::StepContext;
use crate::constants::ACCOUNT_ENTITY_KEY;
use crate::converters::create_account_entity;
use crate::entity::Entity;
use crate::error::{Error, ErrorKind, Result};

/// Fetch the account and record its key for later steps.
#[instrument(skip(ctx))]
pub async fn fetch_account(ctx: StepContext<'_>) -> Result<()> {
    let account = ctx.client.get_account().await?;
    let entity = create_account_entity(&account)?;
    let key = entity.key.clone();

    ctx.job_state.add_entity(entity).await?;
    ctx.job_state
        .set_data(ACCOUNT_ENTITY_KEY, Value::String(key.clone()))
        .await?;

    debug!(account = %key, "Stored account entity");
    Ok(())
}

/// The account entity stored by [`fetch_account`].
pub async fn account_entity(ctx: StepContext<'_>) -> Result<Entity> {
    let key = ctx
        .job_state
        .get_data(ACCOUNT_ENTITY_KEY)
        .await?
        .and_then(|value| value.as_str().map(str::to_string));

    let entity = match key {
        Some(key) => ctx.job_state.find_entity(&key).await?,
        None => None,
    };

    entity.ok_or_else(|| {
        Error::new(ErrorKind::MissingKey(
            "Expected to find Account entity in jobState".to_string(),
        ))
    })
}
