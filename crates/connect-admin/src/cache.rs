//! Per-project property mappings and an explicit cache for them.
//!
//! A mapping says which property of which set is shown under which column
//! label, e.g. `Tekla Bolt / Bolt size -> "Diameter"`. Mappings are loaded
//! once per project and reused until [`PropertyMappingsCache::invalidate`]
//! or [`PropertyMappingsCache::clear`] is called.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::properties::ObjectProperties;

/// One column of an export or property table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyMapping {
    /// Property set name.
    pub set: String,
    /// Property name within the set.
    pub property: String,
    /// Column label.
    pub label: String,
}

impl PropertyMapping {
    pub fn new(
        set: impl Into<String>,
        property: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            set: set.into(),
            property: property.into(),
            label: label.into(),
        }
    }

    /// Parses `set/property=label`. Without `=label`, the property name is the label.
    pub fn parse(text: &str) -> Option<Self> {
        let (path, label) = match text.split_once('=') {
            Some((path, label)) => (path, Some(label)),
            None => (text, None),
        };
        let (set, property) = path.split_once('/')?;
        if set.is_empty() || property.is_empty() {
            return None;
        }
        Some(Self::new(set, property, label.unwrap_or(property)))
    }
}

/// An ordered list of column mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyMappings {
    mappings: Vec<PropertyMapping>,
}

impl PropertyMappings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mapping: PropertyMapping) {
        self.mappings.push(mapping);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyMapping> {
        self.mappings.iter()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Extracts one `(label, value)` pair per mapping, in mapping order.
    ///
    /// Missing properties and values without a text form yield `None`.
    pub fn apply(&self, object: &ObjectProperties) -> Vec<(String, Option<String>)> {
        self.mappings
            .iter()
            .map(|m| {
                let value = object
                    .property(&m.set, &m.property)
                    .and_then(|v| v.as_text());
                (m.label.clone(), value)
            })
            .collect()
    }
}

impl FromIterator<PropertyMapping> for PropertyMappings {
    fn from_iter<I: IntoIterator<Item = PropertyMapping>>(iter: I) -> Self {
        Self {
            mappings: iter.into_iter().collect(),
        }
    }
}

/// Cache of property mappings keyed by project id.
///
/// Owned by whichever component issues property requests. Safe to share
/// between threads.
#[derive(Debug, Default)]
pub struct PropertyMappingsCache {
    entries: RwLock<FxHashMap<String, Arc<PropertyMappings>>>,
}

impl PropertyMappingsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached mappings of a project.
    pub fn get(&self, project_id: &str) -> Option<Arc<PropertyMappings>> {
        self.entries.read().get(project_id).cloned()
    }

    /// Stores mappings for a project, replacing any previous entry.
    pub fn insert(
        &self,
        project_id: impl Into<String>,
        mappings: PropertyMappings,
    ) -> Arc<PropertyMappings> {
        let mappings = Arc::new(mappings);
        self.entries
            .write()
            .insert(project_id.into(), Arc::clone(&mappings));
        mappings
    }

    /// Returns the cached mappings, loading and caching them on a miss.
    ///
    /// The loader runs without holding the lock. If another caller filled the
    /// entry in the meantime, that entry wins and the loaded value is dropped.
    pub fn get_or_try_insert_with<E>(
        &self,
        project_id: &str,
        load: impl FnOnce() -> Result<PropertyMappings, E>,
    ) -> Result<Arc<PropertyMappings>, E> {
        if let Some(hit) = self.get(project_id) {
            return Ok(hit);
        }

        debug!(project_id, "Property mappings cache miss");
        let loaded = Arc::new(load()?);
        let mut entries = self.entries.write();
        let entry = entries.entry(project_id.to_string()).or_insert(loaded);
        Ok(Arc::clone(entry))
    }

    /// Drops the entry of one project. Returns true if there was one.
    pub fn invalidate(&self, project_id: &str) -> bool {
        let removed = self.entries.write().remove(project_id).is_some();
        if removed {
            debug!(project_id, "Invalidated property mappings");
        }
        removed
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
