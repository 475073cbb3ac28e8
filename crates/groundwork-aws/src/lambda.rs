//! Lambda kinds: Function.

use std::sync::LazyLock;

use groundwork_core::{
    ArgBundle, DefinitionError, FieldSpec, Resource, ResourceId, ResourceType, ValueKind,
};
use groundwork_graph::Deployment;

use crate::iam::Role;

static FUNCTION_TYPE: LazyLock<ResourceType> = LazyLock::new(|| {
    ResourceType::new(
        "aws:lambda/function:Function",
        vec![
            FieldSpec::required("name", ValueKind::Scalar),
            FieldSpec::required("code", ValueKind::Opaque).mutable(),
            FieldSpec::required("handler", ValueKind::Scalar).mutable(),
            FieldSpec::required("role", ValueKind::ResourceRef),
            FieldSpec::required("runtime", ValueKind::Scalar).mutable(),
            FieldSpec::optional("description", ValueKind::Scalar).mutable(),
            FieldSpec::optional("memorySize", ValueKind::Scalar).mutable(),
            FieldSpec::optional("timeout", ValueKind::Scalar).mutable(),
            FieldSpec::optional("deadLetterConfig", ValueKind::Opaque).mutable(),
        ],
    )
});

/// Arguments for constructing a [`Function`].
#[derive(Debug, Clone)]
pub struct FunctionArgs<'a> {
    pub name: String,
    /// Deployment package location (bucket/key or inline archive).
    pub code: serde_json::Value,
    pub handler: String,
    /// Execution role the function assumes.
    pub role: &'a Role,
    pub runtime: String,
    pub description: Option<String>,
    pub memory_size: Option<i64>,
    pub timeout: Option<i64>,
    pub dead_letter_config: Option<serde_json::Value>,
}

/// A Lambda function.
#[derive(Debug)]
pub struct Function {
    id: ResourceId,
    name: String,
    code: serde_json::Value,
    handler: String,
    role: ResourceId,
    runtime: String,
    description: Option<String>,
    memory_size: Option<i64>,
    timeout: Option<i64>,
    dead_letter_config: Option<serde_json::Value>,
}

impl Function {
    pub fn new(deployment: &Deployment, args: FunctionArgs<'_>) -> Result<Self, DefinitionError> {
        let bundle = ArgBundle::new()
            .set("name", args.name.clone())
            .set("code", args.code.clone())
            .set("handler", args.handler.clone())
            .set("role", args.role.id())
            .set("runtime", args.runtime.clone())
            .maybe("description", args.description.clone())
            .maybe("memorySize", args.memory_size)
            .maybe("timeout", args.timeout)
            .maybe("deadLetterConfig", args.dead_letter_config.clone());
        let id = deployment.define(&FUNCTION_TYPE, &args.name, bundle)?;
        Ok(Function {
            id,
            name: args.name,
            code: args.code,
            handler: args.handler,
            role: args.role.id(),
            runtime: args.runtime,
            description: args.description,
            memory_size: args.memory_size,
            timeout: args.timeout,
            dead_letter_config: args.dead_letter_config,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &serde_json::Value {
        &self.code
    }

    pub fn set_code(&mut self, value: serde_json::Value) {
        self.code = value;
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    pub fn set_handler(&mut self, value: String) {
        self.handler = value;
    }

    /// Identity of the execution role.
    pub fn role(&self) -> ResourceId {
        self.role
    }

    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    pub fn set_runtime(&mut self, value: String) {
        self.runtime = value;
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, value: Option<String>) {
        self.description = value;
    }

    pub fn memory_size(&self) -> Option<i64> {
        self.memory_size
    }

    pub fn set_memory_size(&mut self, value: Option<i64>) {
        self.memory_size = value;
    }

    pub fn timeout(&self) -> Option<i64> {
        self.timeout
    }

    pub fn set_timeout(&mut self, value: Option<i64>) {
        self.timeout = value;
    }

    pub fn dead_letter_config(&self) -> Option<&serde_json::Value> {
        self.dead_letter_config.as_ref()
    }
}

impl Resource for Function {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn resource_type(&self) -> &'static ResourceType {
        LazyLock::force(&FUNCTION_TYPE)
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
