//! Cold-start and steady-state latency harness.
//!
//! This crate provides tools to:
//! - Start a target service and measure its cold start (startup + first request)
//! - Drive sustained load from concurrent workers, each tracking min/max/mean latency
//! - Toggle a diagnostic tracing layer on a fixed cadence during the run
//! - Shut everything down cooperatively on an operator stop signal

pub mod client;
pub mod config;
pub mod console;
pub mod control;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod report;
pub mod run_state;
pub mod stats;
pub mod target;
pub mod tracing_control;
pub mod worker;

pub use config::BenchConfig;
pub use console::Console;
pub use error::{BenchError, BenchResult};
pub use orchestrator::Harness;
pub use report::{ColdStartMeasurement, ResultsReport, RunSummary};
pub use run_state::RunState;
pub use stats::{LatencySnapshot, LatencyStats};
pub use target::{EmbeddedStore, ExternalTarget, TargetService};
pub use tracing_control::{DiagnosticTracing, TracingController, TracingFacility};
pub use worker::{RequestWorker, WorkerSummary};
