//! Model Context Protocol (MCP) server core
//!
//! Hand-rolled MCP surface for a small fixed tool catalog:
//! - **types**: descriptors, schemas, content parts, error taxonomy
//! - **traits**: the `McpTool` handler seam
//! - **server**: dispatch core (lookup, invoke, normalize errors)
//! - **transport**: JSON-RPC 2.0 framing over stdio

pub mod server;
pub mod traits;
pub mod transport;
pub mod types;

pub use server::FeedbackServer;
pub use traits::McpTool;
pub use transport::{serve_stdio, JsonRpcRequest, JsonRpcResponse};
pub use types::{
    JsonSchema, PropertySchema, ToolCallResult, ToolContent, ToolDescriptor, ToolError,
};
