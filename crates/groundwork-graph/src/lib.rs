//! Groundwork graph: the per-run registry and the dependency edges derived
//! from resource-valued fields.
//!
//! A [`Deployment`] accumulates every resource defined during one
//! provisioning run together with the edges derived from its reference
//! fields. Definition is atomic: a resource and its edges become visible to
//! readers together or not at all. When declaration finishes, the engine
//! takes a [`DeploymentSnapshot`] and owns everything from there — cycle
//! detection, ordering, and create/update/delete decisions.

pub mod deployment;
pub mod edge;

pub use deployment::{Deployment, DeploymentSnapshot, ResourceRecord};
pub use edge::{DependencyEdge, derive_edges};
