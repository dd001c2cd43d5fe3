//! Capability registry: the fixed set of tools and resources a server exposes.
//!
//! Tools are listed externally as `docs_<key>` and resources are addressed as
//! `docs://<key>`. The registry itself only knows bare keys; the helpers
//! [`strip_tool_namespace`] and [`resource_key`] translate external names.
//!
//! A registry is assembled once through [`RegistryBuilder`] and is read-only
//! afterwards. Listing preserves registration order.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ToolError;

/// Prefix prepended to every tool key in `tools/list`.
pub const TOOL_NAMESPACE: &str = "docs_";

/// URI scheme for resources.
pub const RESOURCE_SCHEME: &str = "docs";

/// An invocable capability.
///
/// Implementations must not keep state between calls.
pub trait Tool: Send + Sync {
    /// Human-readable description shown in `tools/list`.
    fn description(&self) -> &str;

    /// JSON Schema describing accepted arguments.
    fn input_schema(&self) -> Value;

    /// Runs the tool and returns its text output.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are unusable or a data source fails.
    fn call(&self, arguments: &Map<String, Value>) -> Result<String, ToolError>;
}

/// A readable capability addressed by URI.
pub trait Resource: Send + Sync {
    /// Display name.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// MIME type of [`Resource::content`].
    fn mime_type(&self) -> &str;

    /// Returns the resource text. It may be recomputed on every read.
    ///
    /// # Errors
    ///
    /// Returns an error if a backing data source cannot be read.
    fn content(&self) -> Result<String, ToolError>;
}

/// A tool entry as advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Namespaced tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the tool's input parameters.
    pub input_schema: Value,
}

/// A resource entry as advertised by `resources/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    /// `docs://<key>`.
    pub uri: String,
    /// Display name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// MIME type of the content.
    pub mime_type: String,
}

/// Returns the registry key for an external tool name.
///
/// `None` if the name lacks the namespace prefix.
#[must_use]
pub fn strip_tool_namespace(name: &str) -> Option<&str> {
    name.strip_prefix(TOOL_NAMESPACE).filter(|key| !key.is_empty())
}

/// Returns the registry key addressed by a resource URI.
///
/// `None` if the URI uses another scheme.
#[must_use]
pub fn resource_key(uri: &str) -> Option<&str> {
    let (scheme, key) = uri.split_once("://")?;
    (scheme == RESOURCE_SCHEME && !key.is_empty()).then_some(key)
}

/// Builds the external name of a tool key.
#[must_use]
pub fn namespaced_tool_name(key: &str) -> String {
    format!("{TOOL_NAMESPACE}{key}")
}

/// Builds the URI of a resource key.
#[must_use]
pub fn resource_uri(key: &str) -> String {
    format!("{RESOURCE_SCHEME}://{key}")
}

/// Assembles a [`CapabilityRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    tools: IndexMap<String, Box<dyn Tool>>,
    resources: IndexMap<String, Box<dyn Resource>>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool under `key`. A repeated key replaces the earlier tool
    /// but keeps its position.
    #[must_use]
    pub fn tool(mut self, key: impl Into<String>, tool: impl Tool + 'static) -> Self {
        self.tools.insert(key.into(), Box::new(tool));
        self
    }

    /// Registers a resource under `key`. A repeated key replaces the earlier
    /// resource but keeps its position.
    #[must_use]
    pub fn resource(mut self, key: impl Into<String>, resource: impl Resource + 'static) -> Self {
        self.resources.insert(key.into(), Box::new(resource));
        self
    }

    /// Freezes the registry.
    #[must_use]
    pub fn build(self) -> CapabilityRegistry {
        CapabilityRegistry {
            tools: self.tools,
            resources: self.resources,
        }
    }
}

/// Immutable, ordered collection of tools and resources.
pub struct CapabilityRegistry {
    tools: IndexMap<String, Box<dyn Tool>>,
    resources: IndexMap<String, Box<dyn Resource>>,
}

impl CapabilityRegistry {
    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Looks up a tool by bare key.
    #[must_use]
    pub fn lookup_tool(&self, key: &str) -> Option<&dyn Tool> {
        self.tools.get(key).map(AsRef::as_ref)
    }

    /// Looks up a resource by bare key.
    #[must_use]
    pub fn lookup_resource(&self, key: &str) -> Option<&dyn Resource> {
        self.resources.get(key).map(AsRef::as_ref)
    }

    /// Describes every tool, in registration order.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|(key, tool)| ToolDescriptor {
                name: namespaced_tool_name(key),
                description: tool.description().to_string(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    /// Describes every resource, in registration order.
    #[must_use]
    pub fn list_resources(&self) -> Vec<ResourceDescriptor> {
        self.resources
            .iter()
            .map(|(key, resource)| ResourceDescriptor {
                uri: resource_uri(key),
                name: resource.name().to_string(),
                description: resource.description().to_string(),
                mime_type: resource.mime_type().to_string(),
            })
            .collect()
    }

    /// Number of registered tools.
    #[must_use]
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Number of registered resources.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}
