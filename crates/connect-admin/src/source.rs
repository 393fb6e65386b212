//! The property source contract and GUID resolution on top of it.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ifc_guid::{Guid, GuidError};
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::properties::ObjectProperties;

/// Viewer runtime object identifier.
pub type ObjectId = u64;

/// Supplies hierarchical properties for objects of a model.
///
/// Implementations return one [`ObjectProperties`] per requested id they
/// know about; ids the model does not contain are left out rather than
/// reported as errors.
pub trait PropertySource: Send + Sync {
    /// Fetches properties for `object_ids` in the model `model_id`.
    fn object_properties(
        &self,
        model_id: &str,
        object_ids: &[ObjectId],
    ) -> Result<Vec<ObjectProperties>, SourceError>;
}

/// A property source backed by a JSON document.
///
/// The document maps model ids to arrays of objects:
///
/// ```json
/// { "model-1": [ { "id": 1, "ifcGuid": "0YvctVUKr0kugbFTf53O9L", "properties": [] } ] }
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonPropertySource {
    models: FxHashMap<String, Vec<ObjectProperties>>,
}

impl JsonPropertySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a source from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let models = serde_json::from_str(json)?;
        Ok(Self { models })
    }

    /// Parses a source from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        let models = serde_json::from_reader(reader)?;
        Ok(Self { models })
    }

    /// Loads a source from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Adds or replaces the objects of a model.
    pub fn insert_model(&mut self, model_id: impl Into<String>, objects: Vec<ObjectProperties>) {
        self.models.insert(model_id.into(), objects);
    }

    /// Returns every object id of a model, in document order.
    pub fn object_ids(&self, model_id: &str) -> Option<Vec<ObjectId>> {
        self.models
            .get(model_id)
            .map(|objects| objects.iter().map(|o| o.object_id).collect())
    }

    /// Returns the known model ids, sorted.
    pub fn model_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.models.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl PropertySource for JsonPropertySource {
    fn object_properties(
        &self,
        model_id: &str,
        object_ids: &[ObjectId],
    ) -> Result<Vec<ObjectProperties>, SourceError> {
        let objects = self
            .models
            .get(model_id)
            .ok_or_else(|| SourceError::UnknownModel(model_id.to_string()))?;

        let index = index_by_id(objects);
        Ok(object_ids
            .iter()
            .filter_map(|id| index.get(id).copied())
            .cloned()
            .collect())
    }
}

/// Maps object ids to objects. The first object wins when an id repeats.
pub fn index_by_id(objects: &[ObjectProperties]) -> FxHashMap<ObjectId, &ObjectProperties> {
    let mut index = FxHashMap::default();
    index.reserve(objects.len());
    for object in objects {
        index.entry(object.object_id).or_insert(object);
    }
    index
}

/// An object whose compact identifier decoded successfully.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGuid {
    pub object_id: ObjectId,
    pub ifc_guid: String,
    pub guid: Guid,
    pub name: Option<String>,
    pub class: Option<String>,
}

/// An object whose compact identifier failed to decode.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidGuid {
    pub object_id: ObjectId,
    pub ifc_guid: String,
    pub error: GuidError,
}

/// Outcome of resolving canonical GUIDs for a batch of objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuidResolution {
    /// Objects with a valid compact identifier, in request order.
    pub resolved: Vec<ResolvedGuid>,
    /// Requested ids with no compact identifier, or unknown to the source.
    pub missing: Vec<ObjectId>,
    /// Objects whose compact identifier is malformed.
    pub invalid: Vec<InvalidGuid>,
}

impl GuidResolution {
    /// Sorts objects into resolved, missing and invalid.
    ///
    /// `requested` drives the order; objects not listed in it are ignored.
    pub fn from_objects(requested: &[ObjectId], objects: &[ObjectProperties]) -> Self {
        let mut resolution = GuidResolution::default();
        let index = index_by_id(objects);

        for &object_id in requested {
            let Some(&object) = index.get(&object_id) else {
                resolution.missing.push(object_id);
                continue;
            };
            let Some(ifc_guid) = object.ifc_guid.clone() else {
                resolution.missing.push(object_id);
                continue;
            };

            match Guid::from_compact(&ifc_guid) {
                Ok(guid) => resolution.resolved.push(ResolvedGuid {
                    object_id,
                    ifc_guid,
                    guid,
                    name: object.name.clone(),
                    class: object.class.clone(),
                }),
                Err(error) => {
                    warn!(object_id, ifc_guid = %ifc_guid, error = %error, "Undecodable IFC GUID");
                    resolution.invalid.push(InvalidGuid {
                        object_id,
                        ifc_guid,
                        error,
                    });
                }
            }
        }

        resolution
    }

    /// Returns true if every requested object resolved.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    /// Looks up the canonical GUID of a resolved object.
    pub fn guid_for(&self, object_id: ObjectId) -> Option<Guid> {
        self.resolved
            .iter()
            .find(|r| r.object_id == object_id)
            .map(|r| r.guid)
    }
}

/// Fetches properties for `object_ids` and decodes each object's IFC GUID.
pub fn resolve_guids(
    source: &dyn PropertySource,
    model_id: &str,
    object_ids: &[ObjectId],
) -> Result<GuidResolution, SourceError> {
    let objects = source.object_properties(model_id, object_ids)?;
    let resolution = GuidResolution::from_objects(object_ids, &objects);
    debug!(
        model_id,
        requested = object_ids.len(),
        resolved = resolution.resolved.len(),
        missing = resolution.missing.len(),
        invalid = resolution.invalid.len(),
        "Resolved IFC GUIDs"
    );
    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use ifc_guid::ErrorKind;

    use super::*;

    const DUMP: &str = r#"{
        "model-a": [
            { "id": 1, "name": "Beam", "class": "IfcBeam", "ifcGuid": "0YvctVUKr0kugbFTf53O9L" },
            { "id": 2, "name": "Bolt", "guid": "4000000000000000000000" },
            { "id": 3, "name": "No guid" },
            { "id": 4, "GlobalId": "1L3eG0ufj1rASMH6PLH000" }
        ]
    }"#;

    #[test]
    fn test_unknown_model() {
        let source = JsonPropertySource::from_json(DUMP).unwrap();
        let err = source.object_properties("model-b", &[1]).unwrap_err();
        assert!(matches!(err, SourceError::UnknownModel(ref m) if m == "model-b"));
    }

    #[test]
    fn test_object_properties_follow_request_order() {
        let source = JsonPropertySource::from_json(DUMP).unwrap();
        let objects = source.object_properties("model-a", &[4, 1, 99]).unwrap();
        let ids: Vec<_> = objects.iter().map(|o| o.object_id).collect();
        assert_eq!(ids, vec![4, 1]);
    }

    #[test]
    fn test_resolve_guids() {
        let source = JsonPropertySource::from_json(DUMP).unwrap();
        let resolution = resolve_guids(&source, "model-a", &[1, 2, 3, 4, 5]).unwrap();

        assert_eq!(resolution.resolved.len(), 2);
        assert_eq!(resolution.resolved[0].object_id, 1);
        assert_eq!(
            resolution.resolved[0].guid.to_canonical(),
            "22e66ddf-794d-40bb-8aa5-3dda450d8255"
        );
        assert_eq!(resolution.resolved[0].class.as_deref(), Some("IfcBeam"));
        assert_eq!(
            resolution.guid_for(4).map(|g| g.to_canonical()).as_deref(),
            Some("550e8400-e29b-41d4-a716-446655440000")
        );

        assert_eq!(resolution.missing, vec![3, 5]);
        assert_eq!(resolution.invalid.len(), 1);
        assert_eq!(resolution.invalid[0].object_id, 2);
        assert_eq!(
            resolution.invalid[0].error.kind(),
            ErrorKind::InvalidLeadingSymbol
        );
        assert!(!resolution.is_complete());
    }

    #[test]
    fn test_index_keeps_first_duplicate() {
        let mut first = ObjectProperties::new(5);
        first.name = Some("first".to_string());
        let mut second = ObjectProperties::new(5);
        second.name = Some("second".to_string());
        let objects = vec![first, second, ObjectProperties::new(6)];

        let index = index_by_id(&objects);
        assert_eq!(index.len(), 2);
        assert_eq!(index[&5].name.as_deref(), Some("first"));
    }

    #[test]
    fn test_resolve_large_model() {
        let objects: Vec<ObjectProperties> = (0..50_000u64)
            .map(|id| {
                let mut object = ObjectProperties::new(id);
                object.ifc_guid = Some(Guid::from_u128(u128::from(id)).to_compact());
                object
            })
            .collect();
        let ids: Vec<ObjectId> = objects.iter().map(|o| o.object_id).rev().collect();
        let mut source = JsonPropertySource::new();
        source.insert_model("big", objects);

        let resolution = resolve_guids(&source, "big", &ids).unwrap();
        assert!(resolution.is_complete());
        assert_eq!(resolution.resolved.len(), 50_000);
        assert_eq!(resolution.resolved[0].object_id, 49_999);
        assert_eq!(resolution.guid_for(1234), Some(Guid::from_u128(1234)));
    }

    #[test]
    fn test_complete_resolution() {
        let source = JsonPropertySource::from_json(DUMP).unwrap();
        let resolution = resolve_guids(&source, "model-a", &[1, 4]).unwrap();
        assert!(resolution.is_complete());
    }

    #[test]
    fn test_from_reader_and_listing() {
        let source = JsonPropertySource::from_reader(DUMP.as_bytes()).unwrap();
        assert_eq!(source.model_ids(), vec!["model-a"]);
        assert_eq!(source.object_ids("model-a"), Some(vec![1, 2, 3, 4]));
        assert_eq!(source.object_ids("model-b"), None);
    }

    #[test]
    fn test_malformed_payload() {
        let err = JsonPropertySource::from_json(r#"{ "m": [ { "name": "no id" } ] }"#).unwrap_err();
        assert!(matches!(err, SourceError::Payload(_)));
    }

    #[test]
    fn test_insert_model() {
        let mut source = JsonPropertySource::new();
        let mut object = ObjectProperties::new(10);
        object.ifc_guid = Some("0000000000000000000000".to_string());
        source.insert_model("m", vec![object]);

        let resolution = resolve_guids(&source, "m", &[10]).unwrap();
        assert_eq!(resolution.guid_for(10), Some(Guid::NIL));
    }
}
