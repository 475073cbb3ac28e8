//! Error types for resource definition.

use thiserror::Error;

use crate::contract::ValueKind;

/// Errors raised while defining a resource.
///
/// Every variant is a terminal, synchronous failure of the single
/// construction that triggered it: nothing is registered and no edges are
/// recorded. Cycles spanning multiple resources are not detectable here and
/// are checked by the provisioning engine before it acts on the graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    /// A field the contract marks required was not supplied.
    #[error("missing required argument '{field}' for {kind}")]
    MissingRequiredField {
        kind: &'static str,
        field: &'static str,
    },

    /// A supplied value does not match the field's declared shape.
    #[error("argument '{field}' for {kind} must be a {expected}, got {got}")]
    InvalidFieldShape {
        kind: &'static str,
        field: &'static str,
        expected: ValueKind,
        got: &'static str,
    },

    /// A supplied field is not declared in the kind's contract.
    #[error("unknown argument '{field}' for {kind}")]
    UnknownField {
        kind: &'static str,
        field: &'static str,
    },

    /// A reference field points at the resource being constructed.
    #[error("argument '{field}' for {kind} refers to the resource itself")]
    SelfReference {
        kind: &'static str,
        field: &'static str,
    },
}
