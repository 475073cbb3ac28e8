//! EC2 networking kinds: VPC and Subnet.

use std::sync::LazyLock;

use groundwork_core::{
    ArgBundle, DefinitionError, FieldSpec, Resource, ResourceId, ResourceType, ValueKind,
};
use groundwork_graph::Deployment;

static VPC_TYPE: LazyLock<ResourceType> = LazyLock::new(|| {
    ResourceType::new(
        "aws:ec2/vpc:VPC",
        vec![
            FieldSpec::required("name", ValueKind::Scalar),
            FieldSpec::required("cidrBlock", ValueKind::Scalar),
            FieldSpec::optional("instanceTenancy", ValueKind::Scalar),
            FieldSpec::optional("enableDnsSupport", ValueKind::Scalar).mutable(),
            FieldSpec::optional("enableDnsHostnames", ValueKind::Scalar).mutable(),
        ],
    )
});

/// Arguments for constructing a [`Vpc`].
#[derive(Debug, Clone)]
pub struct VpcArgs {
    pub name: String,
    pub cidr_block: String,
    pub instance_tenancy: Option<String>,
    pub enable_dns_support: Option<bool>,
    pub enable_dns_hostnames: Option<bool>,
}

/// An EC2 virtual private cloud.
#[derive(Debug)]
pub struct Vpc {
    id: ResourceId,
    name: String,
    cidr_block: String,
    instance_tenancy: Option<String>,
    enable_dns_support: Option<bool>,
    enable_dns_hostnames: Option<bool>,
}

impl Vpc {
    pub fn new(deployment: &Deployment, args: VpcArgs) -> Result<Self, DefinitionError> {
        let bundle = ArgBundle::new()
            .set("name", args.name.clone())
            .set("cidrBlock", args.cidr_block.clone())
            .maybe("instanceTenancy", args.instance_tenancy.clone())
            .maybe("enableDnsSupport", args.enable_dns_support)
            .maybe("enableDnsHostnames", args.enable_dns_hostnames);
        let id = deployment.define(&VPC_TYPE, &args.name, bundle)?;
        Ok(Vpc {
            id,
            name: args.name,
            cidr_block: args.cidr_block,
            instance_tenancy: args.instance_tenancy,
            enable_dns_support: args.enable_dns_support,
            enable_dns_hostnames: args.enable_dns_hostnames,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cidr_block(&self) -> &str {
        &self.cidr_block
    }

    pub fn instance_tenancy(&self) -> Option<&str> {
        self.instance_tenancy.as_deref()
    }

    pub fn enable_dns_support(&self) -> Option<bool> {
        self.enable_dns_support
    }

    pub fn set_enable_dns_support(&mut self, value: Option<bool>) {
        self.enable_dns_support = value;
    }

    pub fn enable_dns_hostnames(&self) -> Option<bool> {
        self.enable_dns_hostnames
    }

    pub fn set_enable_dns_hostnames(&mut self, value: Option<bool>) {
        self.enable_dns_hostnames = value;
    }
}

impl Resource for Vpc {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn resource_type(&self) -> &'static ResourceType {
        LazyLock::force(&VPC_TYPE)
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

static SUBNET_TYPE: LazyLock<ResourceType> = LazyLock::new(|| {
    ResourceType::new(
        "aws:ec2/subnet:Subnet",
        vec![
            FieldSpec::required("name", ValueKind::Scalar),
            FieldSpec::required("cidrBlock", ValueKind::Scalar),
            FieldSpec::required("vpc", ValueKind::ResourceRef),
            FieldSpec::optional("availabilityZone", ValueKind::Scalar),
            FieldSpec::optional("mapPublicIpOnLaunch", ValueKind::Scalar).mutable(),
        ],
    )
});

/// Arguments for constructing a [`Subnet`].
#[derive(Debug, Clone)]
pub struct SubnetArgs<'a> {
    pub name: String,
    pub cidr_block: String,
    pub vpc: &'a Vpc,
    pub availability_zone: Option<String>,
    pub map_public_ip_on_launch: Option<bool>,
}

/// An EC2 subnet inside a [`Vpc`].
#[derive(Debug)]
pub struct Subnet {
    id: ResourceId,
    name: String,
    cidr_block: String,
    vpc: ResourceId,
    availability_zone: Option<String>,
    map_public_ip_on_launch: Option<bool>,
}

impl Subnet {
    pub fn new(deployment: &Deployment, args: SubnetArgs<'_>) -> Result<Self, DefinitionError> {
        let bundle = ArgBundle::new()
            .set("name", args.name.clone())
            .set("cidrBlock", args.cidr_block.clone())
            .set("vpc", args.vpc.id())
            .maybe("availabilityZone", args.availability_zone.clone())
            .maybe("mapPublicIpOnLaunch", args.map_public_ip_on_launch);
        let id = deployment.define(&SUBNET_TYPE, &args.name, bundle)?;
        Ok(Subnet {
            id,
            name: args.name,
            cidr_block: args.cidr_block,
            vpc: args.vpc.id(),
            availability_zone: args.availability_zone,
            map_public_ip_on_launch: args.map_public_ip_on_launch,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cidr_block(&self) -> &str {
        &self.cidr_block
    }

    /// Identity of the VPC this subnet belongs to.
    pub fn vpc(&self) -> ResourceId {
        self.vpc
    }

    pub fn availability_zone(&self) -> Option<&str> {
        self.availability_zone.as_deref()
    }

    pub fn map_public_ip_on_launch(&self) -> Option<bool> {
        self.map_public_ip_on_launch
    }

    pub fn set_map_public_ip_on_launch(&mut self, value: Option<bool>) {
        self.map_public_ip_on_launch = value;
    }
}

impl Resource for Subnet {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn resource_type(&self) -> &'static ResourceType {
        LazyLock::force(&SUBNET_TYPE)
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vpc(deployment: &Deployment) -> Vpc {
        Vpc::new(
            deployment,
            VpcArgs {
                name: "main".to_string(),
                cidr_block: "10.0.0.0/16".to_string(),
                instance_tenancy: None,
                enable_dns_support: None,
                enable_dns_hostnames: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn subnet_records_edge_to_its_vpc() {
        let deployment = Deployment::new();
        let vpc = vpc(&deployment);
        let subnet = Subnet::new(
            &deployment,
            SubnetArgs {
                name: "web".to_string(),
                cidr_block: "10.0.1.0/24".to_string(),
                vpc: &vpc,
                availability_zone: Some("us-east-1a".to_string()),
                map_public_ip_on_launch: None,
            },
        )
        .unwrap();

        assert_eq!(deployment.resource_count(), 2);
        let snap = deployment.snapshot();
        assert_eq!(snap.dependencies_of(subnet.id()), vec![vpc.id()]);
        assert_eq!(subnet.vpc(), vpc.id());
    }

    #[test]
    fn mutable_field_is_reassignable() {
        let deployment = Deployment::new();
        let vpc = vpc(&deployment);
        let mut subnet = Subnet::new(
            &deployment,
            SubnetArgs {
                name: "web".to_string(),
                cidr_block: "10.0.1.0/24".to_string(),
                vpc: &vpc,
                availability_zone: None,
                map_public_ip_on_launch: Some(false),
            },
        )
        .unwrap();

        subnet.set_map_public_ip_on_launch(Some(true));
        assert_eq!(subnet.map_public_ip_on_launch(), Some(true));
        // The contract agrees about which fields may move.
        let contract = &subnet.resource_type().contract;
        assert!(contract.is_mutable("mapPublicIpOnLaunch"));
        assert!(!contract.is_mutable("cidrBlock"));
    }
}
