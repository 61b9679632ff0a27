//! MCP Dispatch Core
//!
//! Owns the static tool catalog, routes `tools/list` and `tools/call`
//! requests to the matching handler, and normalizes every handler failure
//! into a protocol error. No handler outcome may terminate the process.

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::traits::McpTool;
use super::transport::{error_codes, JsonRpcRequest, JsonRpcResponse};
use super::types::{ToolCallResult, ToolDescriptor, ToolError};

/// MCP protocol revision implemented by this server
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name advertised during the initialize handshake
pub const SERVER_NAME: &str = "native-feedback";

/// Server version advertised during the initialize handshake
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The dispatch core: a fixed, ordered tool table built once at startup.
pub struct FeedbackServer {
    tools: Vec<Box<dyn McpTool>>,
}

impl FeedbackServer {
    pub fn new(tools: Vec<Box<dyn McpTool>>) -> Self {
        Self { tools }
    }

    /// Advertise the tool catalog. Pure and deterministic: repeated calls
    /// return identical descriptor sequences for the process lifetime.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|tool| tool.descriptor()).collect()
    }

    /// Invoke a tool by name, running it to completion before returning.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallResult, ToolError> {
        info!("Tool call: {} with args: {}", name, arguments);

        let tool = self
            .tools
            .iter()
            .find(|tool| tool.descriptor().name == name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        tool.execute(arguments).await
    }

    /// Route one JSON-RPC request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!("Ignoring notification: {}", request.method);
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(
                id,
                json!({
                    "protocolVersion": MCP_PROTOCOL_VERSION,
                    "capabilities": { "tools": {} },
                    "serverInfo": { "name": SERVER_NAME, "version": SERVER_VERSION },
                }),
            ),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => {
                info!("Listing tools");
                JsonRpcResponse::success(id, json!({ "tools": self.list_tools() }))
            }
            "tools/call" => self.handle_call(id, request.params).await,
            other => JsonRpcResponse::error(
                Some(id),
                error_codes::METHOD_NOT_FOUND,
                &format!("Method not found: {}", other),
            ),
        };

        Some(response)
    }

    async fn handle_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params = params.unwrap_or(Value::Null);
        let Some(name) = params.get("name").and_then(|v| v.as_str()) else {
            return JsonRpcResponse::error(
                Some(id),
                error_codes::INVALID_PARAMS,
                "Missing tool name in tools/call params",
            );
        };
        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        match self.call_tool(name, arguments).await {
            Ok(result) => match serde_json::to_value(&result) {
                Ok(value) => JsonRpcResponse::success(id, value),
                Err(err) => JsonRpcResponse::error(
                    Some(id),
                    error_codes::INTERNAL_ERROR,
                    &format!("Tool '{}' result serialization failed: {}", name, err),
                ),
            },
            Err(err) => {
                warn!("Tool {} failed: {}", name, err);
                JsonRpcResponse::error(
                    Some(id),
                    i32::from(&err),
                    &format!("Tool '{}' failed: {}", name, err),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::testing::ScriptedInteraction;
    use crate::tools::FeedbackToolProvider;
    use std::sync::Arc;

    fn server_with(interaction: Arc<ScriptedInteraction>) -> FeedbackServer {
        FeedbackServer::new(FeedbackToolProvider::new(interaction).get_tools())
    }

    #[tokio::test]
    async fn test_unknown_tool_never_reaches_a_handler() {
        let interaction = Arc::new(ScriptedInteraction::new());
        let server = server_with(interaction.clone());

        let err = server
            .call_tool("no_such_tool", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(name) if name == "no_such_tool"));
        assert_eq!(interaction.call_count(), 0);
    }

    #[tokio::test]
    async fn test_list_tools_is_deterministic() {
        let server = server_with(Arc::new(ScriptedInteraction::new()));
        let first = serde_json::to_string(&server.list_tools()).unwrap();
        let second = serde_json::to_string(&server.list_tools()).unwrap();
        assert_eq!(first, second);

        let names: Vec<String> = server.list_tools().iter().map(|t| t.name.clone()).collect();
        assert_eq!(
            names,
            vec![
                "collect_feedback",
                "pick_image",
                "get_image_info",
                "take_screenshot"
            ]
        );
    }

    #[tokio::test]
    async fn test_get_image_info_without_path_is_missing_argument() {
        let server = server_with(Arc::new(ScriptedInteraction::new()));
        let err = server
            .call_tool("get_image_info", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument(_)));
    }

    #[tokio::test]
    async fn test_initialize_handshake() {
        let server = server_with(Arc::new(ScriptedInteraction::new()));
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: "initialize".to_string(),
            params: None,
            id: Some(json!(1)),
        };
        let response = server.handle_request(request).await.unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert_eq!(result["protocolVersion"], MCP_PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let server = server_with(Arc::new(ScriptedInteraction::new()));
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: "notifications/initialized".to_string(),
            params: None,
            id: None,
        };
        assert!(server.handle_request(request).await.is_none());
    }

    #[tokio::test]
    async fn test_cancelled_picker_surfaces_user_cancelled_code() {
        let interaction = Arc::new(ScriptedInteraction::new());
        interaction.queue_file(crate::interaction::InteractionOutcome::Cancelled);
        let server = server_with(interaction);

        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: "tools/call".to_string(),
            params: Some(json!({"name": "pick_image", "arguments": {"random_string": "x"}})),
            id: Some(json!(7)),
        };
        let response = server.handle_request(request).await.unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, error_codes::USER_CANCELLED);
        assert!(error.message.contains("pick_image"));
        assert!(response.result.is_none());
    }

    #[tokio::test]
    async fn test_unknown_method_is_method_not_found() {
        let server = server_with(Arc::new(ScriptedInteraction::new()));
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: "resources/list".to_string(),
            params: None,
            id: Some(json!(2)),
        };
        let response = server.handle_request(request).await.unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
    }
}
