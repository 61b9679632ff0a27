//! MCP Transport Layer
//!
//! Defines the JSON-RPC 2.0 wire format and the newline-delimited stdio
//! serve loop. Protocol messages travel over stdout only; all diagnostics
//! go to stderr so they never corrupt message framing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::server::FeedbackServer;
use super::types::ToolError;

/// JSON-RPC 2.0 Version Constant
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC 2.0 Request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>, // ID can be string, number, or null
}

/// A JSON-RPC 2.0 Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id: Some(id),
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: i32, message: &str) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.to_string(),
            }),
            id,
        }
    }
}

/// A JSON-RPC 2.0 Error Object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

/// Standard JSON-RPC Error Codes
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    /// Server-range code for voluntary user cancellation
    pub const USER_CANCELLED: i32 = -32001;
}

/// Convert ToolError to JSON-RPC Error Code
impl From<&ToolError> for i32 {
    fn from(err: &ToolError) -> Self {
        match err {
            ToolError::UnknownTool(_) => error_codes::METHOD_NOT_FOUND,
            ToolError::MissingArgument(_) => error_codes::INVALID_PARAMS,
            ToolError::UserCancelled(_) => error_codes::USER_CANCELLED,
            ToolError::UnsupportedFormat(_)
            | ToolError::FileNotFound(_)
            | ToolError::CaptureFailed(_)
            | ToolError::Subsystem(_)
            | ToolError::Unreadable(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

/// Serve MCP over stdin/stdout until EOF or cancellation.
///
/// Requests are handled strictly in order, one at a time, so native dialogs
/// never overlap from within a single server process. The loop itself stays
/// responsive to shutdown even while a handler is waiting on the user,
/// because native steps run as awaited child processes.
pub async fn serve_stdio(server: FeedbackServer, shutdown: CancellationToken) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    info!("Server connected on stdio. PID: {}", std::process::id());

    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutdown requested, closing transport");
                return Ok(());
            }
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            info!("stdin closed, shutting down");
            return Ok(());
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => server.handle_request(request).await,
            Err(err) => {
                warn!("Failed to parse request: {}", err);
                Some(JsonRpcResponse::error(
                    None,
                    error_codes::PARSE_ERROR,
                    &format!("Parse error: {}", err),
                ))
            }
        };

        if let Some(response) = response {
            let mut payload = serde_json::to_vec(&response)?;
            payload.push(b'\n');
            stdout.write_all(&payload).await?;
            stdout.flush().await?;
        }
    }
}
