//! Entity, relationship and step metadata.

use crate::entity::RelationshipClass;

/// Job-state data key holding the account entity's `_key`.
pub const ACCOUNT_ENTITY_KEY: &str = "entity:account";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityMetadata {
    pub resource_name: &'static str,
    pub entity_type: &'static str,
    pub class: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipMetadata {
    pub relationship_type: &'static str,
    pub source_type: &'static str,
    pub class: RelationshipClass,
    pub target_type: &'static str,
}

pub const ACCOUNT: EntityMetadata = EntityMetadata {
    resource_name: "Account",
    entity_type: "mimecast_account",
    class: &["Account"],
};

pub const DOMAIN: EntityMetadata = EntityMetadata {
    resource_name: "Domain",
    entity_type: "mimecast_domain",
    class: &["Domain"],
};

pub const USER: EntityMetadata = EntityMetadata {
    resource_name: "User",
    entity_type: "mimecast_user",
    class: &["User"],
};

pub const AWARENESS_CAMPAIGN: EntityMetadata = EntityMetadata {
    resource_name: "Awareness_Campaign",
    entity_type: "mimecast_awareness_campaign",
    class: &["Training"],
};

pub const ACCOUNT_HAS_DOMAIN: RelationshipMetadata = RelationshipMetadata {
    relationship_type: "mimecast_account_has_domain",
    source_type: ACCOUNT.entity_type,
    class: RelationshipClass::Has,
    target_type: DOMAIN.entity_type,
};

pub const ACCOUNT_HAS_AWARENESS_CAMPAIGN: RelationshipMetadata = RelationshipMetadata {
    relationship_type: "mimecast_account_has_awareness_campaign",
    source_type: ACCOUNT.entity_type,
    class: RelationshipClass::Has,
    target_type: AWARENESS_CAMPAIGN.entity_type,
};

pub const DOMAIN_HAS_USER: RelationshipMetadata = RelationshipMetadata {
    relationship_type: "mimecast_domain_has_user",
    source_type: DOMAIN.entity_type,
    class: RelationshipClass::Has,
    target_type: USER.entity_type,
};

pub const USER_ASSIGNED_AWARENESS_CAMPAIGN: RelationshipMetadata = RelationshipMetadata {
    relationship_type: "mimecast_user_assigned_awareness_campaign",
    source_type: USER.entity_type,
    class: RelationshipClass::Assigned,
    target_type: AWARENESS_CAMPAIGN.entity_type,
};

pub const USER_COMPLETED_AWARENESS_CAMPAIGN: RelationshipMetadata = RelationshipMetadata {
    relationship_type: "mimecast_user_completed_awareness_campaign",
    source_type: USER.entity_type,
    class: RelationshipClass::Completed,
    target_type: AWARENESS_CAMPAIGN.entity_type,
};

pub const ALL_ENTITIES: &[EntityMetadata] = &[ACCOUNT, DOMAIN, USER, AWARENESS_CAMPAIGN];

pub const ALL_RELATIONSHIPS: &[RelationshipMetadata] = &[
    ACCOUNT_HAS_DOMAIN,
    ACCOUNT_HAS_AWARENESS_CAMPAIGN,
    DOMAIN_HAS_USER,
    USER_ASSIGNED_AWARENESS_CAMPAIGN,
    USER_COMPLETED_AWARENESS_CAMPAIGN,
];
