//! Generated AWS resource surface.
//!
//! One typed struct per resource kind, mirroring the wire schema: required
//! fields are plain values in the kind's `*Args` struct, optional fields are
//! `Option`s, and fields whose value is another resource become dependency
//! edges in the owning [`Deployment`](groundwork_graph::Deployment) when the
//! resource is constructed.
//!
//! Immutable fields are exposed through getters only; fields the schema
//! marks updatable additionally get a `set_*` method. Mutation here is
//! local to the typed value — the registry records construction-time state
//! and the diff against it is the provisioning engine's concern.

pub mod apigateway;
pub mod ec2;
pub mod iam;
pub mod lambda;
pub mod s3;
