//! MCP Core Types
//!
//! Defines the fundamental data structures for MCP communication:
//! tool descriptors with their JSON Schemas, the multi-part call result,
//! and the tool-level error taxonomy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// JSON Schema representation for tool parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: BTreeMap<String, PropertySchema>,
    pub required: Vec<String>,
}

impl JsonSchema {
    /// An object schema with the given properties and required field names
    pub fn object(properties: BTreeMap<String, PropertySchema>, required: Vec<String>) -> Self {
        Self {
            schema_type: "object".to_string(),
            properties,
            required,
        }
    }
}

/// Schema for individual properties in a JSON Schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub prop_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertySchema {
    pub fn string(description: &str) -> Self {
        Self {
            prop_type: "string".to_string(),
            description: Some(description.to_string()),
        }
    }
}

/// Tool descriptor for capability discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique tool name (e.g., "collect_feedback")
    pub name: String,
    /// Human-readable description for LLM context
    pub description: String,
    /// JSON Schema for input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonSchema,
}

/// One content part of a tool call result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text {
        text: String,
    },
    Image {
        /// Base64-encoded image bytes
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
}

/// Response payload of a successful tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
}

impl ToolCallResult {
    pub fn text(text: String) -> Self {
        Self {
            content: vec![ToolContent::Text { text }],
        }
    }
}

/// Error types for tool execution
///
/// `UserCancelled` is an expected outcome, not a bug: the user dismissed a
/// dialog or picker. It carries a dedicated JSON-RPC code on the wire so
/// callers can tell voluntary abort from genuine failure.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Operation cancelled by user: {0}")]
    UserCancelled(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error("Screenshot failed or was cancelled: {0}")]
    CaptureFailed(String),

    #[error("Native interaction failed: {0}")]
    Subsystem(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Cannot read image: {0}")]
    Unreadable(String),
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::Subsystem(format!("result serialization failed: {}", err))
    }
}
