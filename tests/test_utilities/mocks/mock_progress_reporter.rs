use gradle_dep_graph::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ProgressReporter that records every message
///
/// Errors are prefixed with `Error: ` and batch progress is recorded as
/// `Progress: current/total` so tests can tell the channels apart. Clones
/// share the same buffer.
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    fn push(&self, message: String) {
        self.messages.lock().unwrap().push(message);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.push(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, _message: Option<&str>) {
        self.push(format!("Progress: {}/{}", current, total));
    }

    fn report_error(&self, message: &str) {
        self.push(format!("Error: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.push(message.to_string());
    }
}
