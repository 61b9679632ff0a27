//! Scripted interaction double for handler tests
//!
//! Queues one outcome per expected native step; an unscripted step resolves
//! to `Failed` so tests exercising the degrade-gracefully paths need no
//! extra setup. Capture behavior is modeled separately because the real
//! subsystem's success status and the file's existence can disagree.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{CaptureMode, InteractionOutcome, NativeInteraction};

/// How the scripted subsystem behaves on a capture request
#[derive(Debug, Clone)]
pub enum CaptureBehavior {
    /// Write the given bytes to the target path and report success
    WriteFile(Vec<u8>),
    /// Report success without producing a file (user aborted mid-capture)
    SucceedWithoutFile,
    Cancel,
    Fail(String),
}

#[derive(Default)]
pub struct ScriptedInteraction {
    text: Mutex<VecDeque<InteractionOutcome>>,
    choice: Mutex<VecDeque<InteractionOutcome>>,
    file: Mutex<VecDeque<InteractionOutcome>>,
    capture: Mutex<VecDeque<CaptureBehavior>>,
    alerts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_text(&self, outcome: InteractionOutcome) {
        self.text.lock().unwrap().push_back(outcome);
    }

    pub fn queue_choice(&self, outcome: InteractionOutcome) {
        self.choice.lock().unwrap().push_back(outcome);
    }

    pub fn queue_file(&self, outcome: InteractionOutcome) {
        self.file.lock().unwrap().push_back(outcome);
    }

    pub fn queue_capture(&self, behavior: CaptureBehavior) {
        self.capture.lock().unwrap().push_back(behavior);
    }

    /// Number of native steps driven so far (alerts included)
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Titles of alerts shown so far
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    fn next(&self, queue: &Mutex<VecDeque<InteractionOutcome>>) -> InteractionOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| InteractionOutcome::Failed("unscripted interaction".to_string()))
    }
}

#[async_trait]
impl NativeInteraction for ScriptedInteraction {
    async fn prompt_text(&self, _title: &str, _message: &str, _default: &str) -> InteractionOutcome {
        self.next(&self.text)
    }

    async fn prompt_choice(
        &self,
        _title: &str,
        _message: &str,
        _buttons: &[&str],
        _default: &str,
    ) -> InteractionOutcome {
        self.next(&self.choice)
    }

    async fn pick_file(&self) -> InteractionOutcome {
        self.next(&self.file)
    }

    async fn alert(&self, title: &str, _message: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.alerts.lock().unwrap().push(title.to_string());
    }

    async fn capture(&self, _mode: CaptureMode, target: &Path) -> InteractionOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self
            .capture
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(CaptureBehavior::Fail("unscripted capture".to_string()));

        match behavior {
            CaptureBehavior::WriteFile(bytes) => {
                std::fs::write(target, bytes).expect("test capture write");
                InteractionOutcome::Value(target.to_string_lossy().to_string())
            }
            CaptureBehavior::SucceedWithoutFile => {
                InteractionOutcome::Value(target.to_string_lossy().to_string())
            }
            CaptureBehavior::Cancel => InteractionOutcome::Cancelled,
            CaptureBehavior::Fail(reason) => InteractionOutcome::Failed(reason),
        }
    }
}
