//! Interaction Handlers
//!
//! One handler per tool, each a short linear sequence of native-UI and
//! inspector steps:
//! - collect_feedback - text dialog plus optional image attachment
//! - pick_image - native file picker, metadata, inline bytes
//! - get_image_info - metadata for a caller-supplied path
//! - take_screenshot - interactive capture into a transient file

pub mod feedback;
pub mod image;
pub mod screenshot;

use std::sync::Arc;

use crate::interaction::NativeInteraction;
use crate::mcp::traits::McpTool;

pub use feedback::CollectFeedbackTool;
pub use image::{GetImageInfoTool, PickImageTool};
pub use screenshot::TakeScreenshotTool;

/// Assembles the fixed tool catalog over one interaction subsystem
pub struct FeedbackToolProvider {
    interaction: Arc<dyn NativeInteraction>,
}

impl FeedbackToolProvider {
    pub fn new(interaction: Arc<dyn NativeInteraction>) -> Self {
        Self { interaction }
    }

    /// The catalog, in advertised order
    pub fn get_tools(&self) -> Vec<Box<dyn McpTool>> {
        vec![
            Box::new(CollectFeedbackTool::new(self.interaction.clone())),
            Box::new(PickImageTool::new(self.interaction.clone())),
            Box::new(GetImageInfoTool::new()),
            Box::new(TakeScreenshotTool::new(self.interaction.clone())),
        ]
    }
}
