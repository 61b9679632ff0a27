//! pick_image and get_image_info tools
//!
//! Both return the same two-part shape: structured metadata as text plus the
//! image bytes inline. pick_image adds the interactive selection step and the
//! format whitelist; get_image_info works from a caller-supplied path.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::inspect;
use crate::interaction::{InteractionOutcome, NativeInteraction};
use crate::mcp::traits::McpTool;
use crate::mcp::types::{
    JsonSchema, PropertySchema, ToolCallResult, ToolContent, ToolDescriptor, ToolError,
};

pub struct PickImageTool {
    interaction: Arc<dyn NativeInteraction>,
}

impl PickImageTool {
    pub fn new(interaction: Arc<dyn NativeInteraction>) -> Self {
        Self { interaction }
    }
}

#[async_trait]
impl McpTool for PickImageTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "pick_image".to_string(),
            description: "Allows the user to select a single image via native macOS file picker."
                .to_string(),
            input_schema: JsonSchema::object(
                BTreeMap::from([(
                    "random_string".to_string(),
                    PropertySchema::string("Dummy parameter for no-parameter tools"),
                )]),
                vec!["random_string".to_string()],
            ),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolCallResult, ToolError> {
        let path_str = match self.interaction.pick_file().await {
            InteractionOutcome::Value(path) => path,
            InteractionOutcome::Cancelled => {
                return Err(ToolError::UserCancelled("image selection".to_string()))
            }
            InteractionOutcome::Failed(reason) => return Err(ToolError::Subsystem(reason)),
        };

        let path = Path::new(&path_str);
        if !path.exists() {
            return Err(ToolError::FileNotFound(path_str));
        }

        let ext = inspect::extension_of(path).unwrap_or_default();
        if !inspect::SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ToolError::UnsupportedFormat(format!(".{}", ext)));
        }

        let meta = inspect::inspect(path)?;
        let data = inspect::load_base64(path)?;

        info!("Image selected: {} ({}x{})", path_str, meta.width, meta.height);

        let payload = json!({
            "selected_image_path": path_str,
            "filename": meta.filename,
            "format": meta.format,
            "width": meta.width,
            "height": meta.height,
            "size_bytes": meta.size_bytes,
            "size_kb": meta.size_kb,
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        });

        Ok(ToolCallResult {
            content: vec![
                ToolContent::Text {
                    text: format!(
                        "Image selection completed:\n\n{}",
                        serde_json::to_string_pretty(&payload)?
                    ),
                },
                ToolContent::Image {
                    data,
                    mime_type: meta.mime_type,
                },
            ],
        })
    }
}

pub struct GetImageInfoTool;

impl GetImageInfoTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GetImageInfoTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl McpTool for GetImageInfoTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "get_image_info".to_string(),
            description:
                "Retrieves information (dimensions, format, size) about a local image file."
                    .to_string(),
            input_schema: JsonSchema::object(
                BTreeMap::from([(
                    "image_path".to_string(),
                    PropertySchema::string("The absolute path to the local image file."),
                )]),
                vec!["image_path".to_string()],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolCallResult, ToolError> {
        let path_str = arguments
            .get("image_path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::MissingArgument("image_path".to_string()))?;

        let path = Path::new(path_str);
        if !path.exists() {
            return Err(ToolError::FileNotFound(path_str.to_string()));
        }

        let meta = inspect::inspect(path)?;
        let data = inspect::load_base64(path)?;

        let payload = json!({
            "filename": meta.filename,
            "format": meta.format,
            "width": meta.width,
            "height": meta.height,
            "size_bytes": meta.size_bytes,
            "size_kb": meta.size_kb,
            "modified": meta.modified,
            "path": path_str,
        });

        Ok(ToolCallResult {
            content: vec![
                ToolContent::Text {
                    text: format!(
                        "Image information:\n\n{}",
                        serde_json::to_string_pretty(&payload)?
                    ),
                },
                ToolContent::Image {
                    data,
                    mime_type: meta.mime_type,
                },
            ],
        })
    }
}
