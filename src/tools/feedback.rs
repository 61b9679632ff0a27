//! collect_feedback tool
//!
//! Three-step sequence: collect free-form text, offer an optional image
//! attachment, then package everything into a single text part. Only the
//! first step can fail the call; attachment problems degrade to "no image
//! attached" and are logged individually.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

use super::screenshot::capture_to_temp;
use crate::interaction::{CaptureMode, InteractionOutcome, NativeInteraction};
use crate::mcp::traits::McpTool;
use crate::mcp::types::{JsonSchema, PropertySchema, ToolCallResult, ToolDescriptor, ToolError};

pub struct CollectFeedbackTool {
    interaction: Arc<dyn NativeInteraction>,
}

impl CollectFeedbackTool {
    pub fn new(interaction: Arc<dyn NativeInteraction>) -> Self {
        Self { interaction }
    }

    /// Best-effort image attachment. Returns a path or nothing, never an
    /// error: each failure here is accounted for and swallowed.
    async fn attach_image(&self) -> Option<String> {
        let choice = match self
            .interaction
            .prompt_choice(
                "Feedback Collection",
                "Would you like to add an image?",
                &["Skip", "Select Image", "Screenshot"],
                "Skip",
            )
            .await
        {
            InteractionOutcome::Value(choice) => choice,
            InteractionOutcome::Cancelled => return None,
            InteractionOutcome::Failed(reason) => {
                warn!("Attachment choice dialog failed, skipping image: {}", reason);
                return None;
            }
        };

        match choice.as_str() {
            "Select Image" => match self.interaction.pick_file().await {
                InteractionOutcome::Value(path) => Some(path),
                InteractionOutcome::Cancelled => None,
                InteractionOutcome::Failed(reason) => {
                    warn!("Image selection failed: {}", reason);
                    None
                }
            },
            "Screenshot" => self.attach_screenshot().await,
            _ => None,
        }
    }

    async fn attach_screenshot(&self) -> Option<String> {
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
            InteractionOutcome::Value(kind) if kind != "Cancel" => kind,
            InteractionOutcome::Value(_) | InteractionOutcome::Cancelled => return None,
            InteractionOutcome::Failed(reason) => {
                warn!("Screenshot type dialog failed: {}", reason);
                return None;
            }
        };

        let mode = if kind == "Full Screen" {
            CaptureMode::FullScreen
        } else {
            CaptureMode::SelectArea
        };

        // The file is handed to the caller by path, so it is not deleted
        // here, unlike take_screenshot's transient capture.
        match capture_to_temp(self.interaction.as_ref(), mode).await {
            Ok(path) => Some(path.to_string_lossy().to_string()),
            Err(err) => {
                warn!("Screenshot during feedback failed: {}", err);
                self.interaction
                    .alert("Screenshot Failed", &err.to_string())
                    .await;
                None
            }
        }
    }
}

#[async_trait]
impl McpTool for CollectFeedbackTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "collect_feedback".to_string(),
            description: "Collects user feedback (text and/or images) via native macOS dialogs."
                .to_string(),
            input_schema: JsonSchema::object(
                BTreeMap::from([(
                    "work_summary".to_string(),
                    PropertySchema::string("AI's summary of work completed. Displayed to the user."),
                )]),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolCallResult, ToolError> {
        let work_summary = arguments
            .get("work_summary")
            .and_then(|v| v.as_str())
            .unwrap_or("No work summary")
            .to_string();

        let feedback = match self
            .interaction
            .prompt_text(
                "Feedback Collection",
                "Please enter your feedback, suggestions, or comments:",
                "",
            )
            .await
        {
            InteractionOutcome::Value(text) if !text.trim().is_empty() => text,
            InteractionOutcome::Value(_) | InteractionOutcome::Cancelled => {
                return Err(ToolError::UserCancelled("feedback input".to_string()))
            }
            InteractionOutcome::Failed(reason) => return Err(ToolError::Subsystem(reason)),
        };

        let image_path = self.attach_image().await;

        let payload = json!({
            "feedback": feedback,
            "image_path": image_path,
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            "work_summary": work_summary,
        });

        Ok(ToolCallResult::text(format!(
            "User feedback collection completed:\n\n{}",
            serde_json::to_string_pretty(&payload)?
        )))
    }
}
