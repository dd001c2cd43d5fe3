//! JSON-RPC 2.0 message types for the MCP protocol.
//!
//! # Message Types
//!
//! - **Request**: a message with a `method`, an optional `id` and optional `params`
//! - **Response**: a reply carrying exactly one of `result` or `error`
//!
//! Every request gets exactly one response. A request without an `id` is
//! answered with `id: null`. The `jsonrpc` member of a request is not checked.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The MCP protocol version this implementation supports.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name for capability negotiation.
pub const SERVER_NAME: &str = "docs-mcp";

/// A JSON-RPC 2.0 request ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric request ID.
    Number(i64),
    /// String request ID.
    String(String),
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

/// A JSON-RPC 2.0 request message.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    /// Correlation identifier, echoed in the response.
    #[serde(default)]
    pub id: Option<RequestId>,

    /// The method to invoke.
    pub method: String,

    /// Optional parameters for the method.
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Checks that the request names a method.
    ///
    /// Returns an error message if validation fails.
    #[must_use]
    pub fn validate(&self) -> Option<&'static str> {
        if self.method.trim().is_empty() {
            return Some("method field cannot be empty");
        }
        None
    }
}

/// Standard JSON-RPC 2.0 error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The JSON sent is not a valid Request object.
    InvalidRequest,
    /// The method does not exist or is not available.
    MethodNotFound,
    /// Invalid method parameters, including unknown tool or resource names.
    InvalidParams,
    /// Internal JSON-RPC error.
    InternalError,
}

impl ErrorCode {
    /// Returns the numeric code for this error.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
        }
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcErrorData {
    /// The error code.
    pub code: i32,

    /// A short description of the error.
    pub message: String,
}

impl JsonRpcErrorData {
    /// Creates a new error with a custom message.
    #[must_use]
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
        }
    }
}

/// The payload of a response: a result or an error, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponsePayload {
    /// Successful result.
    Result(Value),
    /// Error details.
    Error(JsonRpcErrorData),
}

/// A JSON-RPC 2.0 response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcResponse {
    /// Always "2.0".
    pub jsonrpc: &'static str,

    /// The request ID this response corresponds to (`null` if unknown).
    pub id: Option<RequestId>,

    /// Result or error.
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

impl JsonRpcResponse {
    /// Creates a new success response.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Value is not const-compatible
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            payload: ResponsePayload::Result(result),
        }
    }

    /// Creates a new error response.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // JsonRpcErrorData contains String
    pub fn error(id: Option<RequestId>, error: JsonRpcErrorData) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            payload: ResponsePayload::Error(error),
        }
    }

    /// Creates an invalid request error response.
    #[must_use]
    pub fn invalid_request(id: Option<RequestId>, message: impl Into<String>) -> Self {
        Self::error(
            id,
            JsonRpcErrorData::with_message(ErrorCode::InvalidRequest, message),
        )
    }

    /// Creates a method not found error response.
    #[must_use]
    pub fn method_not_found(id: Option<RequestId>, method: &str) -> Self {
        Self::error(
            id,
            JsonRpcErrorData::with_message(
                ErrorCode::MethodNotFound,
                format!("Method not found: {method}"),
            ),
        )
    }

    /// Creates an invalid params error response.
    #[must_use]
    pub fn invalid_params(id: Option<RequestId>, message: impl Into<String>) -> Self {
        Self::error(
            id,
            JsonRpcErrorData::with_message(ErrorCode::InvalidParams, message),
        )
    }

    /// Creates an internal error response.
    #[must_use]
    pub fn internal_error(id: Option<RequestId>, message: impl Into<String>) -> Self {
        Self::error(
            id,
            JsonRpcErrorData::with_message(ErrorCode::InternalError, message),
        )
    }

    /// Returns the result value, if this is a success response.
    #[must_use]
    pub const fn result(&self) -> Option<&Value> {
        match &self.payload {
            ResponsePayload::Result(value) => Some(value),
            ResponsePayload::Error(_) => None,
        }
    }

    /// Returns the error details, if this is an error response.
    #[must_use]
    pub const fn error_data(&self) -> Option<&JsonRpcErrorData> {
        match &self.payload {
            ResponsePayload::Result(_) => None,
            ResponsePayload::Error(error) => Some(error),
        }
    }
}

/// Interprets a decoded frame body as a request.
///
/// # Errors
///
/// Returns a ready-to-send `Invalid Request` response when the body is not an
/// object or has no usable `method`. The response carries the body's `id`
/// when one could be read.
pub fn parse_request(body: Value) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let Some(obj) = body.as_object() else {
        return Err(JsonRpcResponse::invalid_request(
            None,
            "request must be a JSON object",
        ));
    };

    let id = obj
        .get("id")
        .and_then(|v| serde_json::from_value::<RequestId>(v.clone()).ok());

    let request: JsonRpcRequest = serde_json::from_value(body)
        .map_err(|e| JsonRpcResponse::invalid_request(id.clone(), format!("Invalid Request: {e}")))?;

    if let Some(problem) = request.validate() {
        return Err(JsonRpcResponse::invalid_request(request.id, problem));
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_valid_request() {
        let body = json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}});
        let req = parse_request(body).unwrap();
        assert_eq!(req.id, Some(RequestId::Number(1)));
        assert_eq!(req.method, "initialize");
    }

    #[test]
    fn parse_request_without_id() {
        let body = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
        let req = parse_request(body).unwrap();
        assert_eq!(req.id, None);
        assert_eq!(req.method, "notifications/initialized");
    }

    #[test]
    fn parse_without_jsonrpc_member() {
        let req = parse_request(json!({"id": 1, "method": "initialize"})).unwrap();
        assert_eq!(req.id, Some(RequestId::Number(1)));
        assert_eq!(req.method, "initialize");
    }

    #[test]
    fn parse_string_id() {
        let body = json!({"jsonrpc": "2.0", "id": "abc-123", "method": "test"});
        let req = parse_request(body).unwrap();
        assert_eq!(req.id, Some(RequestId::String("abc-123".to_string())));
    }

    #[test]
    fn parse_non_object() {
        let err = parse_request(json!([1, 2, 3])).unwrap_err();
        assert_eq!(
            err.error_data().unwrap().code,
            ErrorCode::InvalidRequest.code()
        );
        assert_eq!(err.id, None);
    }

    #[test]
    fn parse_missing_method_keeps_id() {
        let err = parse_request(json!({"jsonrpc": "2.0", "id": 7})).unwrap_err();
        assert_eq!(
            err.error_data().unwrap().code,
            ErrorCode::InvalidRequest.code()
        );
        assert_eq!(err.id, Some(RequestId::Number(7)));
    }

    #[test]
    fn parse_other_jsonrpc_version_is_dispatched() {
        let body = json!({"jsonrpc": "1.0", "id": 1, "method": "test"});
        assert_eq!(parse_request(body).unwrap().method, "test");
    }

    #[test]
    fn parse_empty_method() {
        let err = parse_request(json!({"id": 2, "method": "  "})).unwrap_err();
        assert_eq!(
            err.error_data().unwrap().code,
            ErrorCode::InvalidRequest.code()
        );
        assert_eq!(err.id, Some(RequestId::Number(2)));
    }

    #[test]
    fn parse_non_string_method() {
        let err = parse_request(json!({"id": 3, "method": 42})).unwrap_err();
        assert_eq!(
            err.error_data().unwrap().code,
            ErrorCode::InvalidRequest.code()
        );
    }

    #[test]
    fn serialise_success_response() {
        let response =
            JsonRpcResponse::success(Some(RequestId::Number(1)), json!({"ok": true}));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""jsonrpc":"2.0""#));
        assert!(json.contains(r#""id":1"#));
        assert!(json.contains(r#""result":{"ok":true}"#));
        assert!(!json.contains("error"));
    }

    #[test]
    fn serialise_error_response() {
        let response = JsonRpcResponse::method_not_found(Some(RequestId::Number(1)), "unknown/method");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["error"]["code"], -32601);
        assert!(value["error"]["message"]
            .as_str()
            .unwrap()
            .contains("unknown/method"));
        assert!(value.get("result").is_none());
    }

    #[test]
    fn serialise_missing_id_as_null() {
        let response = JsonRpcResponse::invalid_request(None, "bad");
        let value = serde_json::to_value(&response).unwrap();
        assert!(value["id"].is_null());
    }

    #[test]
    fn request_id_display() {
        assert_eq!(format!("{}", RequestId::Number(42)), "42");
        assert_eq!(format!("{}", RequestId::String("abc".to_string())), "abc");
    }
}
