//! Typed object properties as returned by the viewer.
//!
//! The viewer emits property sets in two shapes: an array of
//! `{ "name": .., "properties": .. }` objects, or a map from set name to
//! properties. Properties themselves come either as an array of
//! `{ "name": .., "value": .. }` pairs or as a map. Both shapes are accepted
//! here and normalized into [`ObjectProperties`].

use std::collections::BTreeMap;

use ifc_guid::{Guid, GuidError};
use serde::{Deserialize, Serialize};

use crate::source::ObjectId;

/// A property value. Scalars, lists and nested maps are all allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    List(Vec<PropertyValue>),
    Nested(BTreeMap<String, PropertyValue>),
}

impl PropertyValue {
    /// Renders the value for display. Nested maps and nulls have no text form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            PropertyValue::Null | PropertyValue::Nested(_) => None,
            PropertyValue::Bool(b) => Some(b.to_string()),
            PropertyValue::Integer(i) => Some(i.to_string()),
            PropertyValue::Number(n) => Some(n.to_string()),
            PropertyValue::Text(s) => Some(s.clone()),
            PropertyValue::List(items) => Some(
                items
                    .iter()
                    .filter_map(PropertyValue::as_text)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        }
    }

    /// Returns the value as a float if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Integer(i) => Some(*i as f64),
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// A single named property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub value: PropertyValue,
}

impl Property {
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A named group of properties (e.g. "Pset_BeamCommon").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySet {
    pub name: String,
    pub properties: Vec<Property>,
}

impl PropertySet {
    /// Creates an empty property set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Adds a property to this set.
    pub fn add(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Gets a property value by name.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }
}

/// Properties of one model object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawObject", rename_all = "camelCase")]
pub struct ObjectProperties {
    /// Viewer runtime id.
    pub object_id: ObjectId,
    /// IFC class, e.g. "IfcBeam".
    pub class: Option<String>,
    pub name: Option<String>,
    /// Compact (22-character) IFC GUID, when the viewer reports one.
    pub ifc_guid: Option<String>,
    pub property_sets: Vec<PropertySet>,
}

impl ObjectProperties {
    /// Creates an object with no properties.
    pub fn new(object_id: ObjectId) -> Self {
        Self {
            object_id,
            class: None,
            name: None,
            ifc_guid: None,
            property_sets: Vec::new(),
        }
    }

    /// Gets a property set by name.
    pub fn set(&self, name: &str) -> Option<&PropertySet> {
        self.property_sets.iter().find(|s| s.name == name)
    }

    /// Gets a property value by set name and property name.
    pub fn property(&self, set: &str, name: &str) -> Option<&PropertyValue> {
        self.set(set).and_then(|s| s.get(name))
    }

    /// Decodes the compact IFC GUID, if present.
    pub fn guid(&self) -> Option<Result<Guid, GuidError>> {
        self.ifc_guid.as_deref().map(Guid::from_compact)
    }
}

// =============================================================================
// WIRE SHAPES
// =============================================================================

// Each alternative field name gets its own slot. Declaring them as serde
// aliases would reject objects that carry two names for the same value.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawObject {
    #[serde(default)]
    id: Option<ObjectId>,
    #[serde(default)]
    object_id: Option<ObjectId>,
    #[serde(default)]
    runtime_id: Option<ObjectId>,

    #[serde(default)]
    class: Option<String>,
    #[serde(default, rename = "type")]
    type_name: Option<String>,
    #[serde(default)]
    ifc_type: Option<String>,

    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    ifc_guid: Option<String>,
    #[serde(default)]
    guid: Option<String>,
    #[serde(default, rename = "GlobalId")]
    global_id_upper: Option<String>,
    #[serde(default)]
    global_id: Option<String>,

    #[serde(default)]
    properties: Option<RawPropertySets>,
    #[serde(default)]
    property_sets: Option<RawPropertySets>,
    #[serde(default)]
    psets: Option<RawPropertySets>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPropertySets {
    List(Vec<RawPropertySet>),
    Map(BTreeMap<String, RawProperties>),
}

#[derive(Deserialize)]
struct RawPropertySet {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    set: Option<String>,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    properties: RawProperties,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProperties {
    List(Vec<Property>),
    Map(BTreeMap<String, PropertyValue>),
}

impl Default for RawProperties {
    fn default() -> Self {
        RawProperties::List(Vec::new())
    }
}

impl From<RawProperties> for Vec<Property> {
    fn from(raw: RawProperties) -> Self {
        match raw {
            RawProperties::List(list) => list,
            RawProperties::Map(map) => map
                .into_iter()
                .map(|(name, value)| Property { name, value })
                .collect(),
        }
    }
}

impl TryFrom<RawPropertySet> for PropertySet {
    type Error = String;

    fn try_from(raw: RawPropertySet) -> Result<Self, Self::Error> {
        let name = raw
            .name
            .or(raw.set)
            .or(raw.group)
            .ok_or_else(|| "property set without a name".to_string())?;
        Ok(PropertySet {
            name,
            properties: raw.properties.into(),
        })
    }
}

impl TryFrom<RawObject> for ObjectProperties {
    type Error = String;

    fn try_from(raw: RawObject) -> Result<Self, Self::Error> {
        let object_id = raw
            .id
            .or(raw.object_id)
            .or(raw.runtime_id)
            .ok_or_else(|| "missing field `id`".to_string())?;

        let property_sets = match raw.properties.or(raw.property_sets).or(raw.psets) {
            None => Vec::new(),
            Some(RawPropertySets::List(sets)) => sets
                .into_iter()
                .map(PropertySet::try_from)
                .collect::<Result<_, _>>()?,
            Some(RawPropertySets::Map(sets)) => sets
                .into_iter()
                .map(|(name, properties)| PropertySet {
                    name,
                    properties: properties.into(),
                })
                .collect(),
        };

        Ok(ObjectProperties {
            object_id,
            class: raw.class.or(raw.type_name).or(raw.ifc_type),
            name: raw.name,
            ifc_guid: raw
                .ifc_guid
                .or(raw.guid)
                .or(raw.global_id_upper)
                .or(raw.global_id),
            property_sets,
        })
    }
}
