//! Groundwork core: field contracts and construction-time validation.
//!
//! Every resource kind in a Groundwork program is described by a static
//! [`ResourceType`]: a type token plus a [`FieldContract`] saying which
//! fields are required, which may change after construction, and what shape
//! each value must have. Constructors validate their argument bundle against
//! that contract before anything is registered, so a rejected construction
//! never becomes partially visible.
//!
//! This crate is pure data and pure functions; the per-run registry and the
//! dependency graph live in `groundwork-graph`.

pub mod contract;
pub mod error;
pub mod resource;
pub mod validator;
pub mod value;

pub use contract::{FieldContract, FieldSpec, ResourceType, ValueKind};
pub use error::DefinitionError;
pub use resource::{Resource, ResourceId};
pub use validator::{ValidatedArgs, validate};
pub use value::{ArgBundle, PropertyValue};
