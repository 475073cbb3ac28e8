//! Field contracts: the per-kind schema every construction is checked against.
//!
//! A contract is static data emitted by the schema generator, not something
//! computed at runtime. It records, per declared field, whether the field is
//! required, whether it may change after construction, and what shape its
//! value must have. Fields keep their declaration order so validation walks
//! and diagnostics are deterministic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The shape a field's value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// A plain string, number, or boolean.
    Scalar,
    /// A reference to another resource.
    ResourceRef,
    /// An ordered sequence of references to other resources.
    ResourceRefList,
    /// A schema-less structured document (e.g. a policy document).
    Opaque,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Scalar => write!(f, "scalar"),
            ValueKind::ResourceRef => write!(f, "resource reference"),
            ValueKind::ResourceRefList => write!(f, "list of resource references"),
            ValueKind::Opaque => write!(f, "opaque value"),
        }
    }
}

/// Schema entry for a single field of a resource kind.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    /// Field name as it appears in the wire schema (camelCase).
    pub name: &'static str,
    /// Whether construction must supply a value.
    pub required: bool,
    /// Whether the owning caller may reassign the field after construction.
    pub mutable: bool,
    /// Value shape.
    pub kind: ValueKind,
}

impl FieldSpec {
    /// A required, immutable field.
    pub fn required(name: &'static str, kind: ValueKind) -> Self {
        FieldSpec {
            name,
            required: true,
            mutable: false,
            kind,
        }
    }

    /// An optional, immutable field.
    pub fn optional(name: &'static str, kind: ValueKind) -> Self {
        FieldSpec {
            name,
            required: false,
            mutable: false,
            kind,
        }
    }

    /// Mark the field as reassignable after construction.
    pub fn mutable(mut self) -> Self {
        self.mutable = true;
        self
    }
}

/// The full field schema of one resource kind.
///
/// Fixed for the lifetime of the kind; iteration follows declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct FieldContract {
    fields: Vec<FieldSpec>,
}

impl FieldContract {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        FieldContract { fields }
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether the named field may be reassigned after construction.
    /// Unknown fields are not mutable.
    pub fn is_mutable(&self, name: &str) -> bool {
        self.get(name).map(|f| f.mutable).unwrap_or(false)
    }

    /// All fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    /// The required fields, in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }
}

/// Static descriptor of a resource kind: its type token plus field contract.
///
/// One of these exists per kind, emitted by the generator. The token format
/// is `<package>:<module>/<name>:<Type>`, e.g. `aws:ec2/subnet:Subnet`.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceType {
    pub token: &'static str,
    pub contract: FieldContract,
}

impl ResourceType {
    pub fn new(token: &'static str, fields: Vec<FieldSpec>) -> Self {
        ResourceType {
            token,
            contract: FieldContract::new(fields),
        }
    }
}
