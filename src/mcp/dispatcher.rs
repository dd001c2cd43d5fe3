//! Request routing.
//!
//! The dispatcher holds no per-session state: every request is resolved to a
//! [`Method`], handled against the registry, and turned into exactly one
//! [`JsonRpcResponse`]. Lookup failures, bad params and capability errors all
//! become error envelopes here; nothing is propagated to the caller.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::ToolError;
use crate::mcp::protocol::{
    JsonRpcRequest, JsonRpcResponse, RequestId, MCP_PROTOCOL_VERSION, SERVER_NAME,
};
use crate::mcp::registry::{resource_key, strip_tool_namespace, CapabilityRegistry};

/// Argument name that triggers completion suggestions.
pub const COMPLETION_ARGUMENT: &str = "topic";

/// The protocol methods the server understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `initialize`
    Initialize,
    /// `tools/list`
    ToolsList,
    /// `tools/call`
    ToolsCall,
    /// `resources/list`
    ResourcesList,
    /// `resources/read`
    ResourcesRead,
    /// `completion/complete`
    CompletionComplete,
}

impl Method {
    /// Resolves a method name. `None` for anything unrecognised.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "initialize" => Some(Self::Initialize),
            "tools/list" => Some(Self::ToolsList),
            "tools/call" => Some(Self::ToolsCall),
            "resources/list" => Some(Self::ResourcesList),
            "resources/read" => Some(Self::ResourcesRead),
            "completion/complete" => Some(Self::CompletionComplete),
            _ => None,
        }
    }
}

/// Capability classes advertised during initialisation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerCapabilities {
    /// Tool support.
    pub tools: Map<String, Value>,
    /// Resource support.
    pub resources: Map<String, Value>,
    /// Argument completion support.
    pub completion: Map<String, Value>,
}

/// Server information for the initialisation response.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
    /// Protocol version spoken by the server.
    pub protocol_version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
        }
    }
}

/// Parameters for `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    /// Namespaced name of the tool to call.
    pub name: String,
    /// Arguments for the tool.
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Parameters for `resources/read`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceReadParams {
    /// `docs://<key>`.
    pub uri: String,
}

/// Content item in a tool call response.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}

/// Result of a tool call.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallResult {
    /// Content returned by the tool.
    pub content: Vec<ToolContent>,
}

impl ToolCallResult {
    /// Creates a single-block text result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
        }
    }
}

/// One entry of a `resources/read` result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    /// The URI as requested.
    pub uri: String,
    /// MIME type of `text`.
    pub mime_type: String,
    /// Resource body.
    pub text: String,
}

/// Why a request could not produce a result.
#[derive(Debug)]
enum Failure {
    /// Unrecognised method name.
    MethodNotFound(String),
    /// Missing or malformed params, unknown tool or resource.
    InvalidParams(String),
    /// A capability raised an error.
    Capability(ToolError),
    /// A result could not be serialised.
    Serialise(serde_json::Error),
}

impl From<ToolError> for Failure {
    fn from(error: ToolError) -> Self {
        Self::Capability(error)
    }
}

impl From<serde_json::Error> for Failure {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialise(error)
    }
}

impl Failure {
    fn into_response(self, id: Option<RequestId>) -> JsonRpcResponse {
        match self {
            Self::MethodNotFound(method) => JsonRpcResponse::method_not_found(id, &method),
            Self::InvalidParams(message) => JsonRpcResponse::invalid_params(id, message),
            Self::Capability(error) => JsonRpcResponse::internal_error(id, error.to_string()),
            Self::Serialise(error) => JsonRpcResponse::internal_error(
                id,
                format!("Internal error: failed to serialise result: {error}"),
            ),
        }
    }
}

/// Routes requests to protocol handlers backed by a [`CapabilityRegistry`].
pub struct Dispatcher {
    registry: CapabilityRegistry,
    completion_values: Vec<String>,
}

impl Dispatcher {
    /// Creates a dispatcher.
    ///
    /// `completion_values` is the fixed suggestion list returned when the
    /// completed argument is named [`COMPLETION_ARGUMENT`].
    #[must_use]
    pub const fn new(registry: CapabilityRegistry, completion_values: Vec<String>) -> Self {
        Self {
            registry,
            completion_values,
        }
    }

    /// Handles one request and returns its response.
    #[must_use]
    pub fn dispatch(&self, req: &JsonRpcRequest) -> JsonRpcResponse {
        match self.route(req) {
            Ok(result) => JsonRpcResponse::success(req.id.clone(), result),
            Err(failure) => {
                if let Failure::Capability(ref error) = failure {
                    tracing::error!(method = %req.method, error = %error, "Capability failed");
                } else {
                    tracing::debug!(method = %req.method, failure = ?failure, "Request rejected");
                }
                failure.into_response(req.id.clone())
            }
        }
    }

    fn route(&self, req: &JsonRpcRequest) -> Result<Value, Failure> {
        let Some(method) = Method::from_name(&req.method) else {
            return Err(Failure::MethodNotFound(req.method.clone()));
        };

        let params = req.params.as_ref();
        match method {
            Method::Initialize => Ok(Self::handle_initialize()),
            Method::ToolsList => Ok(json!({ "tools": self.registry.list_tools() })),
            Method::ToolsCall => self.handle_tools_call(params),
            Method::ResourcesList => Ok(json!({ "resources": self.registry.list_resources() })),
            Method::ResourcesRead => self.handle_resources_read(params),
            Method::CompletionComplete => Ok(self.handle_completion(params)),
        }
    }

    fn handle_initialize() -> Value {
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": ServerCapabilities::default(),
            "serverInfo": ServerInfo::default(),
        })
    }

    fn handle_tools_call(&self, params: Option<&Value>) -> Result<Value, Failure> {
        let params: ToolCallParams = parse_params(params, "tool call")?;

        let tool = strip_tool_namespace(&params.name)
            .and_then(|key| self.registry.lookup_tool(key))
            .ok_or_else(|| Failure::InvalidParams(format!("Unknown tool: {}", params.name)))?;

        let arguments = match params.arguments {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(Failure::InvalidParams(
                    "Tool arguments must be an object".to_string(),
                ))
            }
        };

        tracing::debug!(tool = %params.name, "Calling tool");
        let text = tool.call(&arguments)?;

        Ok(serde_json::to_value(ToolCallResult::text(text))?)
    }

    fn handle_resources_read(&self, params: Option<&Value>) -> Result<Value, Failure> {
        let params: ResourceReadParams = parse_params(params, "resource read")?;

        let resource = resource_key(&params.uri)
            .and_then(|key| self.registry.lookup_resource(key))
            .ok_or_else(|| Failure::InvalidParams(format!("Unknown resource: {}", params.uri)))?;

        let contents = ResourceContents {
            mime_type: resource.mime_type().to_string(),
            text: resource.content()?,
            uri: params.uri,
        };

        Ok(json!({ "contents": [contents] }))
    }

    fn handle_completion(&self, params: Option<&Value>) -> Value {
        let argument = params
            .and_then(|p| p.pointer("/argument/name"))
            .and_then(Value::as_str);

        let values: &[String] = if argument == Some(COMPLETION_ARGUMENT) {
            &self.completion_values
        } else {
            &[]
        };

        json!({
            "completion": {
                "values": values,
                "total": values.len(),
                "hasMore": false,
            }
        })
    }
}

/// Deserialises required method params.
fn parse_params<T: DeserializeOwned>(
    params: Option<&Value>,
    what: &str,
) -> Result<T, Failure> {
    let params = params.ok_or_else(|| Failure::InvalidParams(format!("Missing {what} params")))?;
    T::deserialize(params).map_err(|e| Failure::InvalidParams(format!("Invalid {what} params: {e}")))
}
