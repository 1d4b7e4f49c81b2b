//! Job state: where extraction steps put what they collect.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::entity::{Entity, Relationship};
use crate::error::Result;

/// Storage collaborator shared by all steps of one run.
///
/// Writes are upserts keyed by `_key`: adding an entity or relationship whose
/// key is already present replaces it.
#[async_trait]
pub trait JobState: Send + Sync {
    async fn add_entity(&self, entity: Entity) -> Result<()>;

    async fn add_entities(&self, entities: Vec<Entity>) -> Result<()> {
        for entity in entities {
            self.add_entity(entity).await?;
        }
        Ok(())
    }

    async fn add_relationship(&self, relationship: Relationship) -> Result<()>;

    async fn find_entity(&self, key: &str) -> Result<Option<Entity>>;

    /// Snapshot of every entity of a type, in insertion order.
    async fn iterate_entities(&self, entity_type: &str) -> Result<Vec<Entity>>;

    /// Store a value for later steps.
    async fn set_data(&self, key: &str, value: Value) -> Result<()>;

    async fn get_data(&self, key: &str) -> Result<Option<Value>>;
}

#[derive(Debug)]
struct Keyed<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Keyed<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Keyed<T> {
    fn upsert(&mut self, key: &str, item: T) {
        match self.index.get(key) {
            Some(&at) => self.items[at] = item,
            None => {
                self.index.insert(key.to_string(), self.items.len());
                self.items.push(item);
            }
        }
    }

    fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&at| &self.items[at])
    }
}

#[derive(Debug, Default)]
struct Inner {
    entities: Keyed<Entity>,
    relationships: Keyed<Relationship>,
    data: HashMap<String, Value>,
}

/// Job state held in memory for the duration of a run.
#[derive(Debug, Default)]
pub struct InMemoryJobState {
    inner: RwLock<Inner>,
}

/// Counts of collected entities and relationships by type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub entities: BTreeMap<String, usize>,
    pub relationships: BTreeMap<String, usize>,
}

impl Summary {
    pub fn entity_count(&self, entity_type: &str) -> usize {
        self.entities.get(entity_type).copied().unwrap_or(0)
    }

    pub fn relationship_count(&self, relationship_type: &str) -> usize {
        self.relationships.get(relationship_type).copied().unwrap_or(0)
    }
}

impl InMemoryJobState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entities(&self) -> Vec<Entity> {
        self.inner.read().await.entities.items.clone()
    }

    pub async fn relationships(&self) -> Vec<Relationship> {
        self.inner.read().await.relationships.items.clone()
    }

    pub async fn summary(&self) -> Summary {
        let inner = self.inner.read().await;
        let mut summary = Summary::default();

        for entity in &inner.entities.items {
            *summary.entities.entry(entity.entity_type.clone()).or_default() += 1;
        }
        for relationship in &inner.relationships.items {
            *summary
                .relationships
                .entry(relationship.relationship_type.clone())
                .or_default() += 1;
        }

        summary
    }
}

#[async_trait]
impl JobState for InMemoryJobState {
    async fn add_entity(&self, entity: Entity) -> Result<()> {
        let key = entity.key.clone();
        self.inner.write().await.entities.upsert(&key, entity);
        Ok(())
    }

    async fn add_relationship(&self, relationship: Relationship) -> Result<()> {
        let key = relationship.key.clone();
        self.inner
            .write()
            .await
            .relationships
            .upsert(&key, relationship);
        Ok(())
    }

    async fn find_entity(&self, key: &str) -> Result<Option<Entity>> {
        Ok(self.inner.read().await.entities.get(key).cloned())
    }

    async fn iterate_entities(&self, entity_type: &str) -> Result<Vec<Entity>> {
        Ok(self
            .inner
            .read()
            .await
            .entities
            .items
            .iter()
            .filter(|e| e.entity_type == entity_type)
            .cloned()
            .collect())
    }

    async fn set_data(&self, key: &str, value: Value) -> Result<()> {
        self.inner.write().await.data.insert(key.to_string(), value);
        Ok(())
    }

    async fn get_data(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.inner.read().await.data.get(key).cloned())
    }
}
