//! Property values and argument bundles.
//!
//! Field values flow through construction as [`PropertyValue`]s: a small
//! tagged tree covering scalars, resource references, ordered lists, and
//! schema-less documents. An [`ArgBundle`] is the caller-supplied set of
//! (field, value) pairs for one construction; a key that was never set is
//! distinct from a key set to an empty string or empty list.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::contract::ValueKind;
use crate::resource::{Resource, ResourceId};

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    String(String),
    Number(f64),
    Bool(bool),
    /// A reference to another resource, by identity.
    Ref(ResourceId),
    /// An ordered sequence of values.
    List(Vec<PropertyValue>),
    /// A schema-less structured document.
    Json(serde_json::Value),
}

impl PropertyValue {
    /// A reference to a previously constructed resource.
    pub fn reference(resource: &impl Resource) -> Self {
        PropertyValue::Ref(resource.id())
    }

    /// An ordered list of references to previously constructed resources.
    pub fn reference_list<'a, R: Resource + 'a>(
        resources: impl IntoIterator<Item = &'a R>,
    ) -> Self {
        PropertyValue::List(
            resources
                .into_iter()
                .map(|r| PropertyValue::Ref(r.id()))
                .collect(),
        )
    }

    /// Short name of the value's own shape, for diagnostics.
    pub fn shape_name(&self) -> &'static str {
        match self {
            PropertyValue::String(_) => "string",
            PropertyValue::Number(_) => "number",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Ref(_) => "resource reference",
            PropertyValue::List(_) => "list",
            PropertyValue::Json(_) => "opaque value",
        }
    }

    /// Whether this value satisfies the given contract shape.
    ///
    /// `Opaque` accepts everything except a bare reference: references must
    /// flow through reference-typed fields so every edge the graph reports
    /// corresponds to a declared reference field.
    pub fn matches(&self, kind: ValueKind) -> bool {
        match kind {
            ValueKind::Scalar => matches!(
                self,
                PropertyValue::String(_) | PropertyValue::Number(_) | PropertyValue::Bool(_)
            ),
            ValueKind::ResourceRef => matches!(self, PropertyValue::Ref(_)),
            ValueKind::ResourceRefList => match self {
                PropertyValue::List(items) => {
                    items.iter().all(|v| matches!(v, PropertyValue::Ref(_)))
                }
                _ => false,
            },
            ValueKind::Opaque => !matches!(self, PropertyValue::Ref(_)),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::String(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Number(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Number(v as f64)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<ResourceId> for PropertyValue {
    fn from(v: ResourceId) -> Self {
        PropertyValue::Ref(v)
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(v: serde_json::Value) -> Self {
        PropertyValue::Json(v)
    }
}

/// The argument bundle for one construction: ordered (field, value) pairs.
///
/// Insertion order is preserved so diagnostics and edge derivation stay
/// deterministic. Field names are schema tokens supplied by generated code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgBundle {
    entries: Vec<(&'static str, PropertyValue)>,
}

impl ArgBundle {
    pub fn new() -> Self {
        ArgBundle::default()
    }

    /// Set a field value. Builder-style so generated constructors can chain.
    pub fn set(mut self, name: &'static str, value: impl Into<PropertyValue>) -> Self {
        self.entries.push((name, value.into()));
        self
    }

    /// Set a field only if a value was supplied; `None` means absent, which
    /// is not the same as an empty value.
    pub fn maybe(self, name: &'static str, value: Option<impl Into<PropertyValue>>) -> Self {
        match value {
            Some(v) => self.set(name, v),
            None => self,
        }
    }

    /// Look up a supplied value by field name.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Whether the field was supplied at all.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All supplied (field, value) pairs, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &PropertyValue)> {
        self.entries.iter().map(|(n, v)| (*n, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Serialized as a map so the engine hand-off reads naturally as JSON.
impl Serialize for ArgBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
