//! MCP Trait Definitions

use super::types::{ToolCallResult, ToolDescriptor, ToolError};
use async_trait::async_trait;

/// Trait for MCP Tools - executable interaction sequences exposed to a caller
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool descriptor for discovery
    fn descriptor(&self) -> ToolDescriptor;

    /// Execute the tool with given arguments
    ///
    /// Runs to completion or failure before returning; there are no partial
    /// or streamed results.
    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolCallResult, ToolError>;
}
