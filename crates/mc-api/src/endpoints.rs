//! API paths consumed by the connector.

pub const ACCOUNT: &str = "/api/account/get-account";
pub const INTERNAL_DOMAINS: &str = "/api/domain/get-internal-domain";
pub const INTERNAL_USERS: &str = "/api/user/get-internal-users";
pub const AWARENESS_CAMPAIGNS: &str = "/api/awareness-training/campaign/get-campaigns";
pub const AWARENESS_CAMPAIGN_USER_DATA: &str = "/api/awareness-training/campaign/get-user-data";
