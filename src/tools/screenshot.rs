//! take_screenshot tool
//!
//! Prompts for a capture mode, drives the capture subsystem into a fresh
//! temporary file, reads the result into memory, and guarantees the
//! temporary file an attempted deletion on every exit path.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::inspect;
use crate::interaction::{CaptureMode, InteractionOutcome, NativeInteraction};
use crate::mcp::traits::McpTool;
use crate::mcp::types::{
    JsonSchema, PropertySchema, ToolCallResult, ToolContent, ToolDescriptor, ToolError,
};

/// A capture output file that never outlives a single tool call.
///
/// Deletion is attempted when the guard drops, so the success path, the
/// read-failure path, and every later error path all clean up. A failed
/// deletion is logged and otherwise ignored.
pub(crate) struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Deleted temporary screenshot: {}", self.path.display()),
            Err(err) => warn!(
                "Failed to delete temporary screenshot {}: {}",
                self.path.display(),
                err
            ),
        }
    }
}

/// Collision-resistant temp path for one capture: UTC timestamp plus a
/// random suffix, no shared counter needed.
pub(crate) fn temp_screenshot_path() -> PathBuf {
    let stamp = Utc::now().format("%Y%m%d-%H%M%S%3f");
    let suffix: u16 = rand::random();
    std::env::temp_dir().join(format!("screenshot-{}-{:04x}.png", stamp, suffix))
}

/// Run one capture into a fresh temp path and verify the file exists.
///
/// The subsystem may report success yet produce no file when the user aborts
/// mid-capture, so existence on disk is the only trusted signal.
pub(crate) async fn capture_to_temp(
    interaction: &dyn NativeInteraction,
    mode: CaptureMode,
) -> Result<PathBuf, ToolError> {
    let path = temp_screenshot_path();

    match interaction.capture(mode, &path).await {
        InteractionOutcome::Value(_) => {
            if path.exists() {
                Ok(path)
            } else {
                Err(ToolError::CaptureFailed(
                    "no file was produced, capture was likely cancelled".to_string(),
                ))
            }
        }
        InteractionOutcome::Cancelled => Err(ToolError::UserCancelled("screenshot".to_string())),
        InteractionOutcome::Failed(reason) => Err(ToolError::Subsystem(reason)),
    }
}

pub struct TakeScreenshotTool {
    interaction: Arc<dyn NativeInteraction>,
}

impl TakeScreenshotTool {
    pub fn new(interaction: Arc<dyn NativeInteraction>) -> Self {
        Self { interaction }
    }
}

#[async_trait]
impl McpTool for TakeScreenshotTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "take_screenshot".to_string(),
            description: "Takes a screenshot of the screen and saves it to a file.".to_string(),
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
        let kind = match self
            .interaction
            .prompt_choice(
                "Screenshot",
                "Please choose screenshot type:",
                &["Cancel", "Select Area", "Full Screen"],
                "Select Area",
            )
            .await
        {
            InteractionOutcome::Value(choice) if choice != "Cancel" => choice,
            InteractionOutcome::Value(_) | InteractionOutcome::Cancelled => {
                return Err(ToolError::UserCancelled("screenshot".to_string()))
            }
            InteractionOutcome::Failed(reason) => return Err(ToolError::Subsystem(reason)),
        };

        let mode = if kind == "Full Screen" {
            CaptureMode::FullScreen
        } else {
            CaptureMode::SelectArea
        };

        let artifact = TempArtifact::new(capture_to_temp(self.interaction.as_ref(), mode).await?);

        // Everything the result needs is computed in memory before the
        // artifact guard drops and deletes the file.
        let meta = inspect::inspect(artifact.path())?;
        let data = inspect::load_base64(artifact.path())?;

        info!(
            "Screenshot captured: {}x{} ({} bytes)",
            meta.width, meta.height, meta.size_bytes
        );

        let payload = json!({
            "screenshot_path": artifact.path().to_string_lossy(),
            "filename": meta.filename,
            "type": kind,
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
                        "Screenshot completed:\n\n{}",
                        serde_json::to_string_pretty(&payload)?
                    ),
                },
                ToolContent::Image {
                    data,
                    // Screenshots are always PNG format
                    mime_type: "image/png".to_string(),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::testing::{CaptureBehavior, ScriptedInteraction};

    // 1x1 RGBA PNG
    const PNG_1X1: &[u8] = &[
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
        0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0b, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x60,
        0x00, 0x02, 0x00, 0x00, 0x05, 0x00, 0x01, 0x7a, 0x5e, 0xab, 0x3f, 0x00, 0x00, 0x00, 0x00,
        0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
    ];

    #[tokio::test]
    async fn test_successful_capture_returns_two_parts_and_deletes_file() {
        let interaction = Arc::new(ScriptedInteraction::new());
        interaction.queue_choice(InteractionOutcome::Value("Select Area".to_string()));
        interaction.queue_capture(CaptureBehavior::WriteFile(PNG_1X1.to_vec()));

        let tool = TakeScreenshotTool::new(interaction);
        let result = tool.execute(serde_json::json!({})).await.unwrap();

        assert_eq!(result.content.len(), 2);
        let ToolContent::Text { text } = &result.content[0] else {
            panic!("expected text part first");
        };
        assert!(text.starts_with("Screenshot completed:"));
        assert!(text.contains("\"width\": 1"));

        let ToolContent::Image { mime_type, .. } = &result.content[1] else {
            panic!("expected image part second");
        };
        assert_eq!(mime_type, "image/png");

        // The temp file named in the payload must be gone post-call
        let path_line = text
            .lines()
            .find(|line| line.contains("screenshot_path"))
            .unwrap();
        let path = path_line
            .split('"')
            .nth(3)
            .expect("quoted path value");
        assert!(!Path::new(path).exists());
    }

    #[tokio::test]
    async fn test_capture_success_without_file_fails() {
        let interaction = Arc::new(ScriptedInteraction::new());
        interaction.queue_choice(InteractionOutcome::Value("Full Screen".to_string()));
        interaction.queue_capture(CaptureBehavior::SucceedWithoutFile);

        let tool = TakeScreenshotTool::new(interaction);
        let err = tool.execute(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::CaptureFailed(_)));
    }

    #[tokio::test]
    async fn test_mode_dialog_cancel_is_user_cancelled() {
        let interaction = Arc::new(ScriptedInteraction::new());
        interaction.queue_choice(InteractionOutcome::Value("Cancel".to_string()));

        let tool = TakeScreenshotTool::new(interaction);
        let err = tool.execute(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::UserCancelled(_)));
    }

    #[test]
    fn test_temp_paths_do_not_collide() {
        let paths: Vec<PathBuf> = (0..8).map(|_| temp_screenshot_path()).collect();
        let mut unique = paths.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), paths.len());
    }
}
