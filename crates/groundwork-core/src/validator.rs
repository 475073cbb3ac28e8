//! Construction-time validation of argument bundles against field contracts.
//!
//! Validation is purely structural: it checks that every required field is
//! present, that every supplied field is declared, and that each value's
//! shape matches the contract. Semantic checks (CIDR syntax, policy document
//! contents) belong to individual resource kinds, not here.

use crate::contract::ResourceType;
use crate::error::DefinitionError;
use crate::value::{ArgBundle, PropertyValue};

/// An argument bundle that has passed contract validation.
///
/// Edge derivation and registration only accept validated arguments, so a
/// construction that fails validation can never partially register.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedArgs {
    bundle: ArgBundle,
}

impl ValidatedArgs {
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.bundle.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &PropertyValue)> {
        self.bundle.iter()
    }

    /// The underlying bundle, e.g. for recording in the registry.
    pub fn into_bundle(self) -> ArgBundle {
        self.bundle
    }

    pub fn as_bundle(&self) -> &ArgBundle {
        &self.bundle
    }
}

/// Validate `args` against the kind's field contract.
///
/// Pure; no registry state is touched. Checks run in a fixed order: unknown
/// fields, then required presence in contract order, then value shapes in
/// contract order, and the first failure wins.
pub fn validate(ty: &ResourceType, args: ArgBundle) -> Result<ValidatedArgs, DefinitionError> {
    for (name, _) in args.iter() {
        if ty.contract.get(name).is_none() {
            return Err(DefinitionError::UnknownField {
                kind: ty.token,
                field: name,
            });
        }
    }

    for field in ty.contract.required_fields() {
        if !args.contains(field.name) {
            return Err(DefinitionError::MissingRequiredField {
                kind: ty.token,
                field: field.name,
            });
        }
    }

    for field in ty.contract.fields() {
        if let Some(value) = args.get(field.name) {
            if !value.matches(field.kind) {
                return Err(DefinitionError::InvalidFieldShape {
                    kind: ty.token,
                    field: field.name,
                    expected: field.kind,
                    got: value.shape_name(),
                });
            }
        }
    }

    Ok(ValidatedArgs { bundle: args })
}
