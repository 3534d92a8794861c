//! Recorder for on/off switch calls.

use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Enable,
    Disable,
}

/// Records every enable/disable call in order.
///
/// Tests wrap this in whatever switch trait the code under test expects and
/// forward both calls here.
#[derive(Debug, Default)]
pub struct ToggleRecorder {
    events: Mutex<Vec<Toggle>>,
}

impl ToggleRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable(&self) {
        self.push(Toggle::Enable);
    }

    pub fn disable(&self) {
        self.push(Toggle::Disable);
    }

    /// Whether the last recorded call was an enable.
    pub fn is_enabled(&self) -> bool {
        self.events().last() == Some(&Toggle::Enable)
    }

    pub fn events(&self) -> Vec<Toggle> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn push(&self, toggle: Toggle) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(toggle);
    }
}
