//! IAM kinds: Policy and Role.
//!
//! The source schema is inconsistent about which of Role's fields are
//! updatable (the trust document and policy attachments are, the path is
//! not, with no stated rule); the contract transcribes the declarations
//! as-is and the ambiguity is flagged for schema-author review.

use std::sync::LazyLock;

use groundwork_core::{
    ArgBundle, DefinitionError, FieldSpec, PropertyValue, Resource, ResourceId, ResourceType,
    ValueKind,
};
use groundwork_graph::Deployment;

static POLICY_TYPE: LazyLock<ResourceType> = LazyLock::new(|| {
    ResourceType::new(
        "aws:iam/policy:Policy",
        vec![
            FieldSpec::required("name", ValueKind::Scalar),
            FieldSpec::required("policyDocument", ValueKind::Opaque).mutable(),
            FieldSpec::optional("policyName", ValueKind::Scalar),
        ],
    )
});

/// Arguments for constructing a [`Policy`].
#[derive(Debug, Clone)]
pub struct PolicyArgs {
    pub name: String,
    pub policy_document: serde_json::Value,
    pub policy_name: Option<String>,
}

/// An IAM managed policy.
#[derive(Debug)]
pub struct Policy {
    id: ResourceId,
    name: String,
    policy_document: serde_json::Value,
    policy_name: Option<String>,
}

impl Policy {
    pub fn new(deployment: &Deployment, args: PolicyArgs) -> Result<Self, DefinitionError> {
        let bundle = ArgBundle::new()
            .set("name", args.name.clone())
            .set("policyDocument", args.policy_document.clone())
            .maybe("policyName", args.policy_name.clone());
        let id = deployment.define(&POLICY_TYPE, &args.name, bundle)?;
        Ok(Policy {
            id,
            name: args.name,
            policy_document: args.policy_document,
            policy_name: args.policy_name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy_document(&self) -> &serde_json::Value {
        &self.policy_document
    }

    pub fn set_policy_document(&mut self, value: serde_json::Value) {
        self.policy_document = value;
    }

    pub fn policy_name(&self) -> Option<&str> {
        self.policy_name.as_deref()
    }
}

impl Resource for Policy {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn resource_type(&self) -> &'static ResourceType {
        LazyLock::force(&POLICY_TYPE)
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

static ROLE_TYPE: LazyLock<ResourceType> = LazyLock::new(|| {
    ResourceType::new(
        "aws:iam/role:Role",
        vec![
            FieldSpec::required("name", ValueKind::Scalar),
            FieldSpec::required("assumeRolePolicyDocument", ValueKind::Opaque).mutable(),
            FieldSpec::optional("path", ValueKind::Scalar),
            FieldSpec::optional("roleName", ValueKind::Scalar),
            FieldSpec::optional("managedPolicyARNs", ValueKind::Opaque).mutable(),
            FieldSpec::optional("policies", ValueKind::ResourceRefList).mutable(),
        ],
    )
});

/// Arguments for constructing a [`Role`].
#[derive(Debug, Clone)]
pub struct RoleArgs<'a> {
    pub name: String,
    /// Trust policy: which principals may assume the role.
    pub assume_role_policy_document: serde_json::Value,
    pub path: Option<String>,
    pub role_name: Option<String>,
    /// ARNs of externally managed policies to attach, by name rather than
    /// by reference.
    pub managed_policy_arns: Option<Vec<String>>,
    /// Policies defined in this program to attach, in attachment order.
    pub policies: Option<Vec<&'a Policy>>,
}

/// An IAM role.
#[derive(Debug)]
pub struct Role {
    id: ResourceId,
    name: String,
    assume_role_policy_document: serde_json::Value,
    path: Option<String>,
    role_name: Option<String>,
    managed_policy_arns: Option<Vec<String>>,
    policies: Option<Vec<ResourceId>>,
}

impl Role {
    pub fn new(deployment: &Deployment, args: RoleArgs<'_>) -> Result<Self, DefinitionError> {
        let policies: Option<Vec<ResourceId>> = args
            .policies
            .as_ref()
            .map(|ps| ps.iter().map(|p| p.id()).collect());
        let bundle = ArgBundle::new()
            .set("name", args.name.clone())
            .set(
                "assumeRolePolicyDocument",
                args.assume_role_policy_document.clone(),
            )
            .maybe("path", args.path.clone())
            .maybe("roleName", args.role_name.clone())
            .maybe(
                "managedPolicyARNs",
                args.managed_policy_arns
                    .as_ref()
                    .map(|arns| serde_json::Value::from(arns.clone())),
            )
            .maybe(
                "policies",
                policies.as_ref().map(|ids| {
                    PropertyValue::List(ids.iter().map(|id| PropertyValue::Ref(*id)).collect())
                }),
            );
        let id = deployment.define(&ROLE_TYPE, &args.name, bundle)?;
        Ok(Role {
            id,
            name: args.name,
            assume_role_policy_document: args.assume_role_policy_document,
            path: args.path,
            role_name: args.role_name,
            managed_policy_arns: args.managed_policy_arns,
            policies,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assume_role_policy_document(&self) -> &serde_json::Value {
        &self.assume_role_policy_document
    }

    pub fn set_assume_role_policy_document(&mut self, value: serde_json::Value) {
        self.assume_role_policy_document = value;
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn role_name(&self) -> Option<&str> {
        self.role_name.as_deref()
    }

    pub fn managed_policy_arns(&self) -> Option<&[String]> {
        self.managed_policy_arns.as_deref()
    }

    pub fn set_managed_policy_arns(&mut self, value: Option<Vec<String>>) {
        self.managed_policy_arns = value;
    }

    /// Identities of the attached in-program policies, in attachment order.
    pub fn policies(&self) -> Option<&[ResourceId]> {
        self.policies.as_deref()
    }

    pub fn set_policies(&mut self, value: Option<Vec<&Policy>>) {
        self.policies = value.map(|ps| ps.iter().map(|p| p.id()).collect());
    }
}

impl Resource for Role {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn resource_type(&self) -> &'static ResourceType {
        LazyLock::force(&ROLE_TYPE)
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
