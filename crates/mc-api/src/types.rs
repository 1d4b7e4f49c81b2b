//! Typed Mimecast resources.
//!
//! Only the fields the connector reads are named; everything else the
//! provider sends is kept in `additional` so the raw record survives a
//! decode/encode cycle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-question result code that marks a training question as not yet answered.
pub const RESULT_SENT: &str = "SENT";

/// The customer account, from `/api/account/get-account`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub mimecast_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retention: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail_platform: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<String>,

    /// Remaining provider fields (archive, gateway, supportCode, ...).
    #[serde(flatten)]
    pub additional: serde_json::Map<String, serde_json::Value>,
}

/// An internal domain, from `/api/domain/get-internal-domain`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: String,
    pub domain: String,
    #[serde(default)]
    pub send_only: bool,
    #[serde(default)]
    pub local: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbound_type: Option<String>,

    #[serde(flatten)]
    pub additional: serde_json::Map<String, serde_json::Value>,
}

/// An internal user, from `/api/user/get-internal-users`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default)]
    pub alias: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(flatten)]
    pub additional: serde_json::Map<String, serde_json::Value>,
}

/// The single data item of a user listing: the users of one page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListing {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub user_count: Option<u64>,
}

/// A security awareness training campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwarenessCampaign {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_date: Option<String>,
    #[serde(default)]
    pub num_sent: u64,
    #[serde(default)]
    pub num_completed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_complete: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_correct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<CampaignGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_msg: Option<EmailMessage>,

    /// Remaining provider fields (numCorrectAnswers, title, ...).
    #[serde(flatten)]
    pub additional: serde_json::Map<String, serde_json::Value>,
}

/// Target group of a campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignGroup {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

/// One user's enrollment in a campaign, with a result code per question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignUserData {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub results: BTreeMap<String, serde_json::Value>,
}

impl CampaignUserData {
    /// True unless some question is still in the `SENT` state.
    ///
    /// A user with no per-question results counts as completed.
    pub fn completed_training(&self) -> bool {
        !self
            .results
            .values()
            .any(|status| status.as_str() == Some(RESULT_SENT))
    }
}
