//! API Gateway kinds: RestApi and Resource.

use std::sync::LazyLock;

use groundwork_core::Resource as _;
use groundwork_core::{
    ArgBundle, DefinitionError, FieldSpec, ResourceId, ResourceType, ValueKind,
};
use groundwork_graph::Deployment;

static REST_API_TYPE: LazyLock<ResourceType> = LazyLock::new(|| {
    ResourceType::new(
        "aws:apigateway/restAPI:RestAPI",
        vec![
            FieldSpec::required("name", ValueKind::Scalar),
            FieldSpec::optional("description", ValueKind::Scalar).mutable(),
            FieldSpec::optional("body", ValueKind::Opaque).mutable(),
        ],
    )
});

/// Arguments for constructing a [`RestApi`].
#[derive(Debug, Clone)]
pub struct RestApiArgs {
    pub name: String,
    pub description: Option<String>,
    /// OpenAPI document describing the API, if it is defined inline.
    pub body: Option<serde_json::Value>,
}

/// An API Gateway REST API.
#[derive(Debug)]
pub struct RestApi {
    id: ResourceId,
    name: String,
    description: Option<String>,
    body: Option<serde_json::Value>,
}

impl RestApi {
    pub fn new(deployment: &Deployment, args: RestApiArgs) -> Result<Self, DefinitionError> {
        let bundle = ArgBundle::new()
            .set("name", args.name.clone())
            .maybe("description", args.description.clone())
            .maybe("body", args.body.clone());
        let id = deployment.define(&REST_API_TYPE, &args.name, bundle)?;
        Ok(RestApi {
            id,
            name: args.name,
            description: args.description,
            body: args.body,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, value: Option<String>) {
        self.description = value;
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn set_body(&mut self, value: Option<serde_json::Value>) {
        self.body = value;
    }
}

impl groundwork_core::Resource for RestApi {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn resource_type(&self) -> &'static ResourceType {
        LazyLock::force(&REST_API_TYPE)
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

static RESOURCE_TYPE: LazyLock<ResourceType> = LazyLock::new(|| {
    ResourceType::new(
        "aws:apigateway/resource:Resource",
        vec![
            FieldSpec::required("name", ValueKind::Scalar),
            FieldSpec::required("parent", ValueKind::ResourceRef),
            FieldSpec::required("pathPart", ValueKind::Scalar),
            FieldSpec::required("restAPI", ValueKind::ResourceRef),
        ],
    )
});

/// Arguments for constructing a [`Resource`].
///
/// `parent` is the REST API itself for top-level path parts, or another
/// `Resource` for nested ones.
#[derive(Clone, Copy)]
pub struct ResourceArgs<'a> {
    pub name: &'a str,
    pub parent: &'a dyn groundwork_core::Resource,
    pub path_part: &'a str,
    pub rest_api: &'a RestApi,
}

/// A single path part within a [`RestApi`].
#[derive(Debug)]
pub struct Resource {
    id: ResourceId,
    name: String,
    parent: ResourceId,
    path_part: String,
    rest_api: ResourceId,
}

impl Resource {
    pub fn new(deployment: &Deployment, args: ResourceArgs<'_>) -> Result<Self, DefinitionError> {
        let bundle = ArgBundle::new()
            .set("name", args.name)
            .set("parent", args.parent.id())
            .set("pathPart", args.path_part)
            .set("restAPI", args.rest_api.id());
        let id = deployment.define(&RESOURCE_TYPE, args.name, bundle)?;
        Ok(Resource {
            id,
            name: args.name.to_string(),
            parent: args.parent.id(),
            path_part: args.path_part.to_string(),
            rest_api: args.rest_api.id(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> ResourceId {
        self.parent
    }

    pub fn path_part(&self) -> &str {
        &self.path_part
    }

    pub fn rest_api(&self) -> ResourceId {
        self.rest_api
    }
}

impl groundwork_core::Resource for Resource {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn resource_type(&self) -> &'static ResourceType {
        LazyLock::force(&RESOURCE_TYPE)
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundwork_core::Resource as _;

    #[test]
    fn nested_resources_chain_edges_through_parents() {
        let deployment = Deployment::new();
        let api = RestApi::new(
            &deployment,
            RestApiArgs {
                name: "orders-api".to_string(),
                description: None,
                body: None,
            },
        )
        .unwrap();

        let orders = Resource::new(
            &deployment,
            ResourceArgs {
                name: "orders",
                parent: &api,
                path_part: "orders",
                rest_api: &api,
            },
        )
        .unwrap();

        let by_id = Resource::new(
            &deployment,
            ResourceArgs {
                name: "order-by-id",
                parent: &orders,
                path_part: "{id}",
                rest_api: &api,
            },
        )
        .unwrap();

        let snap = deployment.snapshot();
        assert_eq!(snap.dependencies_of(orders.id()), vec![api.id(), api.id()]);
        assert_eq!(snap.dependencies_of(by_id.id()), vec![orders.id(), api.id()]);
    }
}
