//! macOS interaction via osascript and screencapture
//!
//! Drives System Events dialogs through `osascript -e` child processes,
//! matching the dialogs' exit-code convention: code 1 means the user hit
//! Cancel, anything else is a real failure. Not cfg-gated: plain
//! `tokio::process::Command` compiles everywhere, and a missing binary
//! surfaces as a `Failed` outcome at runtime.

use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{CaptureMode, InteractionOutcome, NativeInteraction};

/// Usage tips appended to every text-entry prompt
const TEXT_ENTRY_TIPS: &str = "\n\nTips:\n\
    • You can paste multi-line text directly\n\
    • Line breaks will be preserved\n\
    • Supports Cmd+A to select all, Cmd+C to copy, Cmd+V to paste";

pub struct OsaScriptInteraction;

impl OsaScriptInteraction {
    pub fn new() -> Self {
        Self
    }

    async fn run_osascript(&self, script: &str) -> InteractionOutcome {
        let output = match Command::new("osascript").args(["-e", script]).output().await {
            Ok(output) => output,
            Err(err) => {
                return InteractionOutcome::Failed(format!("failed to run osascript: {}", err))
            }
        };

        if output.status.success() {
            InteractionOutcome::Value(normalize_dialog_output(&output.stdout))
        } else if output.status.code() == Some(1) {
            // display dialog / choose file exit with 1 on Cancel
            InteractionOutcome::Cancelled
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            InteractionOutcome::Failed(format!("AppleScript error: {}", stderr))
        }
    }
}

impl Default for OsaScriptInteraction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NativeInteraction for OsaScriptInteraction {
    async fn prompt_text(&self, title: &str, message: &str, default: &str) -> InteractionOutcome {
        let script = format!(
            r#"tell application "System Events"
  activate
  set userInput to text returned of (display dialog "{}" default answer "{}" with title "{}" buttons {{"Cancel", "OK"}} default button "OK")
  return userInput
end tell"#,
            escape_applescript(&format!("{}{}", message, TEXT_ENTRY_TIPS)),
            escape_applescript(default),
            escape_applescript(title),
        );
        self.run_osascript(&script).await
    }

    async fn prompt_choice(
        &self,
        title: &str,
        message: &str,
        buttons: &[&str],
        default: &str,
    ) -> InteractionOutcome {
        let button_list = buttons
            .iter()
            .map(|b| format!("\"{}\"", escape_applescript(b)))
            .collect::<Vec<_>>()
            .join(", ");
        let script = format!(
            r#"tell application "System Events"
  activate
  set userChoice to button returned of (display dialog "{}" with title "{}" buttons {{{}}} default button "{}")
  return userChoice
end tell"#,
            escape_applescript(message),
            escape_applescript(title),
            button_list,
            escape_applescript(default),
        );
        self.run_osascript(&script).await
    }

    async fn pick_file(&self) -> InteractionOutcome {
        let script = r#"tell application "System Events"
  activate
  set selectedFile to (choose file with prompt "Please select an image file" of type {"public.image"})
  return POSIX path of selectedFile
end tell"#;
        self.run_osascript(script).await
    }

    async fn alert(&self, title: &str, message: &str) {
        let script = format!(
            r#"tell application "System Events"
  activate
  display alert "{}" message "{}" buttons {{"OK"}} default button "OK"
end tell"#,
            escape_applescript(title),
            escape_applescript(message),
        );
        // Outcome deliberately ignored, alerts are best-effort
        if let InteractionOutcome::Failed(reason) = self.run_osascript(&script).await {
            warn!("Failed to show alert '{}': {}", title, reason);
        }
    }

    async fn capture(&self, mode: CaptureMode, target: &Path) -> InteractionOutcome {
        let target_str = target.to_string_lossy().to_string();
        let mut command = Command::new("screencapture");
        match mode {
            CaptureMode::SelectArea => {
                command.arg("-s");
            }
            CaptureMode::FullScreen => {}
        }
        command.arg(&target_str);

        debug!("Taking screenshot ({:?}) into {}", mode, target_str);

        let output = match command.output().await {
            Ok(output) => output,
            Err(err) => {
                return InteractionOutcome::Failed(format!("failed to run screencapture: {}", err))
            }
        };

        if output.status.success() {
            // Success does not guarantee the file exists, the caller checks
            InteractionOutcome::Value(target_str)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            InteractionOutcome::Failed(format!("screencapture error: {}", stderr))
        }
    }
}

/// Escape a string for interpolation inside a double-quoted AppleScript literal
fn escape_applescript(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Normalize dialog output: CRLF/CR to LF, trailing newline trimmed
fn normalize_dialog_output(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .trim()
        .to_string()
}
