//! Conversion of provider records into graph entities.

use serde::Serialize;
use serde_json::Value;

use mimecast_api::{Account, AwarenessCampaign, Domain, User};

use crate::constants::{ACCOUNT, AWARENESS_CAMPAIGN, DOMAIN, USER};
use crate::entity::Entity;
use crate::error::Result;

/// Campaign fields left out of the stored raw record.
const CAMPAIGN_RAW_EXCLUDED: &[&str] = &[
    "numCorrectAnswers",
    "allOtherCampaigns",
    "allOtherCampagins",
    "title",
    "emailMsg",
];

fn raw<T: Serialize>(record: &T) -> Result<Value> {
    Ok(serde_json::to_value(record)?)
}

pub fn create_account_entity(account: &Account) -> Result<Entity> {
    Ok(Entity::new(&account.mimecast_id, &ACCOUNT)
        .with_optional("name", account.account_name.clone())
        .with_optional("displayName", account.account_name.clone())
        .with_optional("accountCode", account.account_code.clone())
        .with_raw_data(raw(account)?))
}

pub fn create_domain_entity(domain: &Domain) -> Result<Entity> {
    Ok(Entity::new(&domain.id, &DOMAIN)
        .with_property("domainName", domain.domain.as_str())
        .with_property("name", domain.domain.as_str())
        .with_property("displayName", domain.domain.as_str())
        .with_property("sendOnly", domain.send_only)
        .with_property("local", domain.local)
        .with_optional("inboundType", domain.inbound_type.clone())
        .with_raw_data(raw(domain)?))
}

/// Users are keyed by email address so enrollment data can find them.
pub fn create_user_entity(user: &User) -> Result<Entity> {
    let email_domain: Vec<Value> = user.domain.iter().map(|d| Value::from(d.as_str())).collect();

    Ok(Entity::new(&user.email_address, &USER)
        .with_property("username", user.email_address.as_str())
        .with_property("email", user.email_address.as_str())
        .with_property("active", true)
        .with_optional("name", user.name.clone())
        .with_optional("displayName", user.name.clone())
        .with_property("emailDomain", email_domain)
        .with_property("alias", user.alias)
        .with_optional("addressType", user.address_type.clone())
        .with_optional("source", user.source.clone())
        .with_raw_data(raw(user)?))
}

pub fn create_awareness_campaign_entity(campaign: &AwarenessCampaign) -> Result<Entity> {
    let mut source = raw(campaign)?;
    if let Value::Object(fields) = &mut source {
        for name in CAMPAIGN_RAW_EXCLUDED {
            fields.remove(*name);
        }
    }

    Ok(Entity::new(&campaign.id, &AWARENESS_CAMPAIGN)
        .with_property("name", campaign.name.as_str())
        .with_property("displayName", campaign.name.as_str())
        .with_property("locked", campaign.locked)
        .with_optional("launchDate", campaign.launch_date.clone())
        .with_property("numSent", campaign.num_sent)
        .with_property("numCompleted", campaign.num_completed)
        .with_raw_data(source))
}
