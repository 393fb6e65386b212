//! The persistence store contract, an in-memory store, and model-object records.

use std::collections::BTreeMap;
use std::fmt;

use ifc_guid::Guid;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::StoreError;
use crate::source::{GuidResolution, ObjectId};

/// Named record collections of the backing database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Projects,
    Users,
    Resources,
    ModelObjects,
    ScheduleItems,
}

impl Collection {
    /// Every collection, in declaration order.
    pub const ALL: [Collection; 5] = [
        Collection::Projects,
        Collection::Users,
        Collection::Resources,
        Collection::ModelObjects,
        Collection::ScheduleItems,
    ];

    /// Returns the collection's table name.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::Users => "users",
            Collection::Resources => "resources",
            Collection::ModelObjects => "model_objects",
            Collection::ScheduleItems => "schedule_items",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A keyed record with free-form JSON fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    pub fields: Map<String, Value>,
}

impl Record {
    /// Creates a record with no fields.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: Map::new(),
        }
    }

    /// Returns the record with `field` set to `value`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Conjunction of field equality predicates. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// A filter that matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds the condition `field == value`.
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.conditions
            .iter()
            .all(|(field, value)| record.get(field) == Some(value))
    }
}

/// Typed record CRUD over named collections.
pub trait PersistenceStore: Send + Sync {
    /// Inserts a new record. Fails if the key is taken.
    fn insert(&self, collection: Collection, record: Record) -> Result<(), StoreError>;

    /// Merges `fields` into an existing record. Fails if there is no such record.
    fn update(
        &self,
        collection: Collection,
        key: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError>;

    /// Deletes a record. Returns true if one was removed.
    fn delete(&self, collection: Collection, key: &str) -> Result<bool, StoreError>;

    /// Returns the records matching `filter`, ordered by key.
    fn read(&self, collection: Collection, filter: &Filter) -> Result<Vec<Record>, StoreError>;

    /// Replaces the record with the same key, or inserts it.
    fn upsert(&self, collection: Collection, record: Record) -> Result<(), StoreError> {
        self.delete(collection, &record.key)?;
        self.insert(collection, record)
    }
}

/// A [`PersistenceStore`] held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<FxHashMap<Collection, BTreeMap<String, Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a collection.
    pub fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .get(&collection)
            .map_or(0, BTreeMap::len)
    }
}

impl PersistenceStore for MemoryStore {
    fn insert(&self, collection: Collection, record: Record) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        let records = collections.entry(collection).or_default();
        if records.contains_key(&record.key) {
            return Err(StoreError::DuplicateKey {
                collection,
                key: record.key,
            });
        }
        records.insert(record.key.clone(), record);
        Ok(())
    }

    fn update(
        &self,
        collection: Collection,
        key: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        let record = collections
            .get_mut(&collection)
            .and_then(|records| records.get_mut(key))
            .ok_or_else(|| StoreError::NotFound {
                collection,
                key: key.to_string(),
            })?;
        record.fields.extend(fields);
        Ok(())
    }

    fn delete(&self, collection: Collection, key: &str) -> Result<bool, StoreError> {
        let mut collections = self.collections.write();
        Ok(collections
            .get_mut(&collection)
            .and_then(|records| records.remove(key))
            .is_some())
    }

    fn read(&self, collection: Collection, filter: &Filter) -> Result<Vec<Record>, StoreError> {
        let collections = self.collections.read();
        Ok(collections
            .get(&collection)
            .map(|records| {
                records
                    .values()
                    .filter(|r| filter.matches(r))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Replaces or inserts the record under a single write lock.
    fn upsert(&self, collection: Collection, record: Record) -> Result<(), StoreError> {
        self.collections
            .write()
            .entry(collection)
            .or_default()
            .insert(record.key.clone(), record);
        Ok(())
    }
}

// =============================================================================
// MODEL OBJECTS
// =============================================================================

/// A model object keyed by its canonical GUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelObjectRecord {
    pub guid: Guid,
    pub ifc_guid: String,
    pub model_id: String,
    pub object_id: ObjectId,
    pub name: Option<String>,
    pub class: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelObjectFields {
    ifc_guid: String,
    model_id: String,
    object_id: ObjectId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    class: Option<String>,
}

impl ModelObjectRecord {
    /// Converts to a store record. The key is the canonical GUID.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new(self.guid.to_canonical())
            .with("ifcGuid", self.ifc_guid.as_str())
            .with("modelId", self.model_id.as_str())
            .with("objectId", self.object_id);
        if let Some(name) = &self.name {
            record = record.with("name", name.as_str());
        }
        if let Some(class) = &self.class {
            record = record.with("class", class.as_str());
        }
        record
    }

    /// Reads a model object back from a store record.
    pub fn from_record(record: &Record) -> Result<Self, StoreError> {
        let malformed = |message: String| StoreError::Malformed {
            collection: Collection::ModelObjects,
            key: record.key.clone(),
            message,
        };

        let guid = Guid::from_canonical(&record.key).map_err(|e| malformed(e.to_string()))?;
        let fields: ModelObjectFields = serde_json::from_value(Value::Object(record.fields.clone()))
            .map_err(|e| malformed(e.to_string()))?;

        Ok(Self {
            guid,
            ifc_guid: fields.ifc_guid,
            model_id: fields.model_id,
            object_id: fields.object_id,
            name: fields.name,
            class: fields.class,
        })
    }
}

/// Writes one model-object record per resolved object.
///
/// Records are upserted by canonical GUID, so re-syncing a model replaces
/// rather than duplicates. Returns the number of records written.
pub fn sync_model_objects(
    store: &dyn PersistenceStore,
    model_id: &str,
    resolution: &GuidResolution,
) -> Result<usize, StoreError> {
    for resolved in &resolution.resolved {
        let record = ModelObjectRecord {
            guid: resolved.guid,
            ifc_guid: resolved.ifc_guid.clone(),
            model_id: model_id.to_string(),
            object_id: resolved.object_id,
            name: resolved.name.clone(),
            class: resolved.class.clone(),
        };
        store.upsert(Collection::ModelObjects, record.to_record())?;
    }

    debug!(
        model_id,
        written = resolution.resolved.len(),
        skipped = resolution.missing.len() + resolution.invalid.len(),
        "Synced model objects"
    );
    Ok(resolution.resolved.len())
}
