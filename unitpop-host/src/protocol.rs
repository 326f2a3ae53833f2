//! JSON-RPC 2.0 message types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    /// Absent for notifications; an explicit `null` is still a request
    #[serde(default, deserialize_with = "present")]
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

impl RpcRequest {
    /// Read a request out of a parsed JSON value
    pub fn from_value(value: JsonValue) -> Result<Self, RpcError> {
        let request: RpcRequest = serde_json::from_value(value).map_err(RpcError::invalid_request)?;
        if request.jsonrpc != "2.0" {
            return Err(RpcError::invalid_request(format!("unsupported jsonrpc version '{}'", request.jsonrpc)));
        }
        Ok(request)
    }
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<JsonValue>, D::Error> {
    JsonValue::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn from_result(id: Option<JsonValue>, result: Result<JsonValue, RpcError>) -> Self {
        match result {
            Ok(r) => Self { jsonrpc: "2.0".to_string(), id, result: Some(r), error: None },
            Err(e) => Self { jsonrpc: "2.0".to_string(), id, result: None, error: Some(e) },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn parse(message: impl std::fmt::Display) -> Self {
        Self::new(PARSE_ERROR, format!("Parse error: {}", message))
    }

    pub fn invalid_request(message: impl std::fmt::Display) -> Self {
        Self::new(INVALID_REQUEST, format!("Invalid request: {}", message))
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    pub fn invalid_params(message: impl std::fmt::Display) -> Self {
        Self::new(INVALID_PARAMS, format!("Invalid params: {}", message))
    }

    pub fn internal(message: impl std::fmt::Display) -> Self {
        Self::new(INTERNAL_ERROR, format!("Internal error: {}", message))
    }
}
