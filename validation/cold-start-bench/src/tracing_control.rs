//! Diagnostic tracing facility and the controller that toggles it.
//!
//! The production facility is a JSON fmt layer writing to a trace file,
//! gated by a reloadable level filter: `TRACE` while enabled, `OFF` while
//! disabled. The controller flips it on a fixed cadence for as long as the
//! run is active.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{reload, Registry};

use crate::error::{BenchError, BenchResult};
use crate::run_state::RunState;

/// An on/off diagnostic tracing switch.
///
/// Both operations are idempotent. Errors are fatal to the run.
pub trait TracingFacility: Send + Sync {
    fn enable(&self) -> BenchResult<()>;
    fn disable(&self) -> BenchResult<()>;
    fn is_enabled(&self) -> bool;
}

/// Reload handle for the diagnostic layer's filter.
pub type DiagnosticHandle = reload::Handle<LevelFilter, Registry>;

/// Tracing facility backed by a reloadable subscriber filter.
pub struct DiagnosticTracing {
    handle: DiagnosticHandle,
}

impl DiagnosticTracing {
    pub fn new(handle: DiagnosticHandle) -> Self {
        Self { handle }
    }

    fn set_level(&self, level: LevelFilter) -> BenchResult<()> {
        self.handle
            .modify(|filter| *filter = level)
            .map_err(|e| BenchError::Tracing(e.to_string()))
    }
}

impl TracingFacility for DiagnosticTracing {
    fn enable(&self) -> BenchResult<()> {
        info!("Start: Enable tracing");
        self.set_level(LevelFilter::TRACE)?;
        info!("Stop: Enable tracing");
        Ok(())
    }

    fn disable(&self) -> BenchResult<()> {
        info!("Start: Disable tracing");
        self.set_level(LevelFilter::OFF)?;
        info!("Stop: Disable tracing");
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.handle
            .with_current(|filter| *filter != LevelFilter::OFF)
            .unwrap_or(false)
    }
}

/// Periodically enables and disables a [`TracingFacility`].
pub struct TracingController {
    facility: Arc<dyn TracingFacility>,
    run_state: RunState,
    interval: Duration,
}

impl TracingController {
    pub fn new(facility: Arc<dyn TracingFacility>, run_state: RunState, interval: Duration) -> Self {
        Self {
            facility,
            run_state,
            interval,
        }
    }

    /// Run enable / sleep / disable cycles until the run stops.
    ///
    /// The stop flag is only checked between cycles, so shutdown waits for
    /// the current interval to elapse. Returns the number of cycles run.
    pub async fn run(self) -> BenchResult<u64> {
        let mut cycles = 0u64;

        while self.run_state.is_running() {
            self.facility.enable()?;
            tokio::time::sleep(self.interval).await;
            self.facility.disable()?;

            cycles += 1;
            debug!(cycles, "Tracing cycle complete");
        }

        info!(cycles, "Tracing controller stopped");
        Ok(cycles)
    }
}
