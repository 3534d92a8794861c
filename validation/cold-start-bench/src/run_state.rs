//! Shared run/stop flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Whether the run is still active.
///
/// Cloned into every worker and the tracing controller, which check it at
/// the top of each loop iteration. Starts running; once stopped it never
/// runs again.
#[derive(Debug, Clone)]
pub struct RunState {
    running: Arc<AtomicBool>,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
