//! The per-run registry of resources and derived edges.
//!
//! One [`Deployment`] exists per provisioning run and is passed explicitly
//! to every construction; nothing here is a process-level singleton, so
//! tests and concurrent runs get isolated state. The registry is
//! append-only for the duration of the run and is discarded as a whole when
//! the run ends.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use groundwork_core::{ArgBundle, DefinitionError, ResourceId, ResourceType, validate};

use crate::edge::{DependencyEdge, derive_edges};

// Identities are process-global so they are never reused, even when a fresh
// registry is created for a new run in the same process.
static NEXT_IDENTITY: AtomicU64 = AtomicU64::new(1);

fn allocate_identity() -> ResourceId {
    ResourceId::from_raw(NEXT_IDENTITY.fetch_add(1, Ordering::Relaxed))
}

/// One registered resource: identity, kind token, display name, and the
/// validated field values it was constructed with.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceRecord {
    pub id: ResourceId,
    pub kind: &'static str,
    pub display_name: String,
    pub properties: ArgBundle,
}

#[derive(Debug, Default)]
struct DeploymentState {
    resources: Vec<ResourceRecord>,
    edges: Vec<DependencyEdge>,
}

/// The registry for a single provisioning run.
///
/// Definition is atomic with respect to concurrent readers: a resource and
/// the edges derived from its fields are appended under one lock
/// acquisition, so the identity of a resource is never visible without its
/// edges. Validation and edge derivation are pure and run outside the lock;
/// the lock is held only for the append and never across user code.
#[derive(Debug, Default)]
pub struct Deployment {
    state: Mutex<DeploymentState>,
}

impl Deployment {
    pub fn new() -> Self {
        Deployment::default()
    }

    /// Define a resource: validate its arguments, allocate an identity,
    /// derive dependency edges, and register everything.
    ///
    /// On any error nothing registers: no record, no edges, and no identity
    /// is consumed. Identities allocated here are monotonic and never
    /// reused.
    pub fn define(
        &self,
        ty: &'static ResourceType,
        display_name: impl Into<String>,
        args: ArgBundle,
    ) -> Result<ResourceId, DefinitionError> {
        let display_name = display_name.into();
        let args = validate(ty, args)?;
        let id = allocate_identity();
        let edges = derive_edges(ty, id, &args)?;

        tracing::debug!(
            kind = ty.token,
            name = %display_name,
            %id,
            edges = edges.len(),
            "resource defined"
        );

        let record = ResourceRecord {
            id,
            kind: ty.token,
            display_name,
            properties: args.into_bundle(),
        };

        let mut state = self.state.lock().expect("deployment lock poisoned");
        state.resources.push(record);
        state.edges.extend(edges);
        Ok(id)
    }

    /// Number of resources registered so far.
    pub fn resource_count(&self) -> usize {
        self.state.lock().expect("deployment lock poisoned").resources.len()
    }

    /// Number of dependency edges recorded so far.
    pub fn edge_count(&self) -> usize {
        self.state.lock().expect("deployment lock poisoned").edges.len()
    }

    /// Read-only copy of the full registry, handed to the provisioning
    /// engine once declaration finishes.
    pub fn snapshot(&self) -> DeploymentSnapshot {
        let state = self.state.lock().expect("deployment lock poisoned");
        DeploymentSnapshot {
            resources: state.resources.clone(),
            edges: state.edges.clone(),
        }
    }
}

/// The full resource and edge sets for one run.
///
/// The graph is directed but not guaranteed acyclic: a back-reference can be
/// constructed before the edge that closes a cycle, so cycles are only
/// detectable once the whole graph is known. Checking for them is a
/// precondition the consuming engine must enforce before acting on the
/// snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentSnapshot {
    pub resources: Vec<ResourceRecord>,
    pub edges: Vec<DependencyEdge>,
}

impl DeploymentSnapshot {
    /// Look up a registered resource by identity.
    pub fn resource(&self, id: ResourceId) -> Option<&ResourceRecord> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// The identities `from` depends on, in registration order.
    pub fn dependencies_of(&self, from: ResourceId) -> Vec<ResourceId> {
        self.edges
            .iter()
            .filter(|e| e.from == from)
            .map(|e| e.to)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundwork_core::{FieldSpec, PropertyValue, ValueKind};
    use std::sync::LazyLock;

    static VPC: LazyLock<ResourceType> = LazyLock::new(|| {
        ResourceType::new(
            "aws:ec2/vpc:VPC",
            vec![
                FieldSpec::required("name", ValueKind::Scalar),
                FieldSpec::required("cidrBlock", ValueKind::Scalar),
            ],
        )
    });

    static SUBNET: LazyLock<ResourceType> = LazyLock::new(|| {
        ResourceType::new(
            "aws:ec2/subnet:Subnet",
            vec![
                FieldSpec::required("name", ValueKind::Scalar),
                FieldSpec::required("cidrBlock", ValueKind::Scalar),
                FieldSpec::required("vpc", ValueKind::ResourceRef),
            ],
        )
    });

    fn define_vpc(deployment: &Deployment, name: &str) -> ResourceId {
        deployment
            .define(
                &VPC,
                name,
                ArgBundle::new().set("name", name).set("cidrBlock", "10.0.0.0/16"),
            )
            .unwrap()
    }

    #[test]
    fn successful_definition_registers_one_resource() {
        let deployment = Deployment::new();
        let id = define_vpc(&deployment, "main");
        assert_eq!(deployment.resource_count(), 1);
        assert_eq!(deployment.edge_count(), 0);
        let snap = deployment.snapshot();
        let record = snap.resource(id).unwrap();
        assert_eq!(record.kind, "aws:ec2/vpc:VPC");
        assert_eq!(record.display_name, "main");
    }

    #[test]
    fn failed_definition_leaves_registry_unchanged() {
        let deployment = Deployment::new();
        define_vpc(&deployment, "main");
        let err = deployment.define(&VPC, "broken", ArgBundle::new().set("name", "broken"));
        assert!(err.is_err());
        assert_eq!(deployment.resource_count(), 1);
        assert_eq!(deployment.edge_count(), 0);
    }

    #[test]
    fn identical_arguments_get_distinct_identities() {
        let deployment = Deployment::new();
        let a = define_vpc(&deployment, "same");
        let b = define_vpc(&deployment, "same");
        assert_ne!(a, b);
        assert_eq!(deployment.resource_count(), 2);
    }

    #[test]
    fn identities_survive_registry_replacement() {
        let first = Deployment::new();
        let a = define_vpc(&first, "one");
        drop(first);
        let second = Deployment::new();
        let b = define_vpc(&second, "two");
        assert_ne!(a, b);
    }

    #[test]
    fn reference_fields_record_edges_with_the_resource() {
        let deployment = Deployment::new();
        let vpc = define_vpc(&deployment, "main");
        let subnet = deployment
            .define(
                &SUBNET,
                "web",
                ArgBundle::new()
                    .set("name", "web")
                    .set("cidrBlock", "10.0.0.0/24")
                    .set("vpc", vpc),
            )
            .unwrap();

        let snap = deployment.snapshot();
        assert_eq!(snap.resources.len(), 2);
        assert_eq!(snap.edges, vec![DependencyEdge { from: subnet, to: vpc }]);
        assert_eq!(snap.dependencies_of(subnet), vec![vpc]);
        assert!(snap.dependencies_of(vpc).is_empty());
    }

    #[test]
    fn snapshot_is_a_copy() {
        let deployment = Deployment::new();
        define_vpc(&deployment, "main");
        let snap = deployment.snapshot();
        define_vpc(&deployment, "late");
        assert_eq!(snap.resources.len(), 1);
        assert_eq!(deployment.resource_count(), 2);
    }

    #[test]
    fn snapshot_serializes_for_engine_handoff() {
        let deployment = Deployment::new();
        let vpc = define_vpc(&deployment, "main");
        deployment
            .define(
                &SUBNET,
                "web",
                ArgBundle::new()
                    .set("name", "web")
                    .set("cidrBlock", "10.0.0.0/24")
                    .set("vpc", PropertyValue::Ref(vpc)),
            )
            .unwrap();

        let json = serde_json::to_value(deployment.snapshot()).unwrap();
        assert_eq!(json["resources"].as_array().unwrap().len(), 2);
        assert_eq!(json["edges"].as_array().unwrap().len(), 1);
        assert_eq!(json["resources"][0]["properties"]["cidrBlock"]["string"], "10.0.0.0/16");
    }

    #[test]
    fn concurrent_definitions_stay_atomic() {
        let deployment = std::sync::Arc::new(Deployment::new());
        let vpc = define_vpc(&deployment, "main");

        let mut handles = Vec::new();
        for i in 0..8 {
            let deployment = deployment.clone();
            handles.push(std::thread::spawn(move || {
                deployment
                    .define(
                        &SUBNET,
                        format!("subnet-{i}"),
                        ArgBundle::new()
                            .set("name", format!("subnet-{i}"))
                            .set("cidrBlock", format!("10.0.{i}.0/24"))
                            .set("vpc", vpc),
                    )
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = deployment.snapshot();
        assert_eq!(snap.resources.len(), 9);
        assert_eq!(snap.edges.len(), 8);
        // Every registered subnet is visible together with its edge.
        for record in snap.resources.iter().filter(|r| r.id != vpc) {
            assert_eq!(snap.dependencies_of(record.id), vec![vpc]);
        }
    }
}
