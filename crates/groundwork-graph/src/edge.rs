//! Dependency edges and their derivation from validated arguments.

use serde::{Deserialize, Serialize};

use groundwork_core::{
    DefinitionError, PropertyValue, ResourceId, ResourceType, ValidatedArgs, ValueKind,
};

/// A directed dependency: `from`'s construction or correct operation
/// requires `to` to exist.
///
/// Edges are derived from field values, never authored directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: ResourceId,
    pub to: ResourceId,
}

/// Derive the dependency edges implied by a resource's field values.
///
/// Walks the fields whose contract shape is a resource reference or a
/// reference list, in contract declaration order; inside a list, edges
/// follow the sequence order. The graph itself is an unordered edge set,
/// but the ordering keeps diagnostics deterministic.
///
/// Fails with [`DefinitionError::SelfReference`] if any reference points at
/// `from` itself; the caller's identity is already known here, so this is
/// detectable before anything registers.
pub fn derive_edges(
    ty: &ResourceType,
    from: ResourceId,
    args: &ValidatedArgs,
) -> Result<Vec<DependencyEdge>, DefinitionError> {
    let mut edges = Vec::new();
    for field in ty.contract.fields() {
        match field.kind {
            ValueKind::ResourceRef | ValueKind::ResourceRefList => {}
            ValueKind::Scalar | ValueKind::Opaque => continue,
        }
        let Some(value) = args.get(field.name) else {
            continue;
        };
        match value {
            PropertyValue::Ref(to) => {
                push_edge(ty, field.name, from, *to, &mut edges)?;
            }
            PropertyValue::List(items) => {
                for item in items {
                    // Validation guarantees every element is a Ref.
                    if let PropertyValue::Ref(to) = item {
                        push_edge(ty, field.name, from, *to, &mut edges)?;
                    }
                }
            }
            _ => {}
        }
    }
    Ok(edges)
}

fn push_edge(
    ty: &ResourceType,
    field: &'static str,
    from: ResourceId,
    to: ResourceId,
    edges: &mut Vec<DependencyEdge>,
) -> Result<(), DefinitionError> {
    if from == to {
        return Err(DefinitionError::SelfReference {
            kind: ty.token,
            field,
        });
    }
    edges.push(DependencyEdge { from, to });
    Ok(())
}
