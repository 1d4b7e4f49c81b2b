//! Graph entities and relationships.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::EntityMetadata;

/// Name under which an entity's source record is kept.
pub const DEFAULT_RAW_DATA_NAME: &str = "default";

/// A raw source record attached to an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDataEntry {
    pub name: String,
    #[serde(rename = "rawData")]
    pub raw_data: Value,
}

/// A node of the collected graph.
///
/// Serializes as `{ "_key", "_type", "_class", ...properties, "_rawData" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub entity_type: String,
    #[serde(rename = "_class")]
    pub class: Vec<String>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
    #[serde(rename = "_rawData", default, skip_serializing_if = "Vec::is_empty")]
    pub raw_data: Vec<RawDataEntry>,
}

impl Entity {
    pub fn new(key: impl Into<String>, metadata: &EntityMetadata) -> Self {
        Self {
            key: key.into(),
            entity_type: metadata.entity_type.to_string(),
            class: metadata.class.iter().map(|c| c.to_string()).collect(),
            properties: Map::new(),
            raw_data: Vec::new(),
        }
    }

    /// Set a property; `None`-like values are stored as given.
    pub fn with_property(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }

    /// Set a property only when a value is present.
    pub fn with_optional<V: Into<Value>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with_property(name, value),
            None => self,
        }
    }

    /// Attach the source record as the default raw data entry.
    pub fn with_raw_data(mut self, raw: Value) -> Self {
        self.raw_data.retain(|entry| entry.name != DEFAULT_RAW_DATA_NAME);
        self.raw_data.push(RawDataEntry {
            name: DEFAULT_RAW_DATA_NAME.to_string(),
            raw_data: raw,
        });
        self
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.property("displayName").and_then(Value::as_str)
    }

    pub fn raw(&self) -> Option<&Value> {
        self.raw_data
            .iter()
            .find(|entry| entry.name == DEFAULT_RAW_DATA_NAME)
            .map(|entry| &entry.raw_data)
    }
}

/// Verb of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipClass {
    Has,
    Assigned,
    Completed,
}

impl RelationshipClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipClass::Has => "HAS",
            RelationshipClass::Assigned => "ASSIGNED",
            RelationshipClass::Completed => "COMPLETED",
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            RelationshipClass::Has => "has",
            RelationshipClass::Assigned => "assigned",
            RelationshipClass::Completed => "completed",
        }
    }
}

impl std::fmt::Display for RelationshipClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a relationship type from its endpoints' types.
///
/// The target type loses the source's leading segment when they share it:
/// `mimecast_account` HAS `mimecast_domain` is `mimecast_account_has_domain`.
pub fn relationship_type(class: RelationshipClass, from_type: &str, to_type: &str) -> String {
    let target = from_type
        .split('_')
        .next()
        .and_then(|prefix| to_type.strip_prefix(prefix))
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(to_type);

    format!("{from_type}_{}_{target}", class.verb())
}

/// A directed edge between two entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub relationship_type: String,
    #[serde(rename = "_class")]
    pub class: RelationshipClass,
    #[serde(rename = "_fromEntityKey")]
    pub from_key: String,
    #[serde(rename = "_toEntityKey")]
    pub to_key: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl Relationship {
    /// Relationship between two known entities.
    pub fn direct(class: RelationshipClass, from: &Entity, to: &Entity) -> Self {
        Self {
            key: format!("{}|{}|{}", from.key, class.verb(), to.key),
            relationship_type: relationship_type(class, &from.entity_type, &to.entity_type),
            class,
            from_key: from.key.clone(),
            to_key: to.key.clone(),
            display_name: class.as_str().to_string(),
        }
    }
}
