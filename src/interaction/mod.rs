//! Native Interaction Subsystem
//!
//! Abstracts the OS facilities for modal dialogs, file pickers, and screen
//! capture behind a single trait. Handlers never depend on the mechanism;
//! the default implementation shells out to macOS scripting
//! ([`OsaScriptInteraction`]), and tests substitute a scripted double.

pub mod macos;

#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use std::path::Path;

pub use macos::OsaScriptInteraction;

/// Tri-state result of one native-UI step.
///
/// `Cancelled` is not an error: it is a distinct terminal state that the
/// handler decides how to propagate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// The user supplied a value (dialog text, button label, file path)
    Value(String),
    /// The user dismissed the dialog or picker
    Cancelled,
    /// The native layer itself errored
    Failed(String),
}

/// Screen capture mode, chosen interactively by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    SelectArea,
    FullScreen,
}

/// OS-level facility for modal dialogs, file pickers, and screen capture.
///
/// Every method suspends the calling task, not the process, until the user
/// responds; a dialog may block indefinitely.
#[async_trait]
pub trait NativeInteraction: Send + Sync {
    /// Modal multi-line text entry dialog
    async fn prompt_text(&self, title: &str, message: &str, default: &str) -> InteractionOutcome;

    /// Modal button choice dialog; the outcome value is the chosen label
    async fn prompt_choice(
        &self,
        title: &str,
        message: &str,
        buttons: &[&str],
        default: &str,
    ) -> InteractionOutcome;

    /// Native image file picker; the outcome value is a POSIX path
    async fn pick_file(&self) -> InteractionOutcome;

    /// Fire-and-forget alert. Never fails the caller, whatever the user does.
    async fn alert(&self, title: &str, message: &str);

    /// Capture the screen into `target`.
    ///
    /// A `Value` outcome does NOT imply the file exists: the capture command
    /// may report success even when the user aborted mid-capture. Callers
    /// must check for the file on disk.
    async fn capture(&self, mode: CaptureMode, target: &Path) -> InteractionOutcome;
}
