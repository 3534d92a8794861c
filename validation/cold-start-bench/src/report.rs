//! Console report formatting.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use serde::{Deserialize, Serialize};

use crate::stats::LatencySnapshot;
use crate::worker::WorkerSummary;

/// Startup and first-request timings, measured once per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColdStartMeasurement {
    pub server_startup_ms: u64,
    pub first_request_ms: u64,
    pub first_request_status: u16,
}

impl ColdStartMeasurement {
    /// Server start plus first request.
    pub fn cold_start_ms(&self) -> u64 {
        self.server_startup_ms + self.first_request_ms
    }
}

/// Everything a clean run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub timestamp: String,
    pub cold_start: ColdStartMeasurement,
    pub workers: Vec<WorkerSummary>,
}

impl RunSummary {
    pub fn total_requests(&self) -> u64 {
        self.workers.iter().map(|w| w.requests).sum()
    }
}

pub fn worker_count_line(workers: u32) -> String {
    format!("Running with {} worker threads.", workers)
}

pub fn server_started_line(ms: u64) -> String {
    format!("Server started in {}ms", ms)
}

pub fn probe_start_line(url: &str) -> String {
    format!("Starting request to {}", url)
}

/// Probe outcome and the cold-start total.
pub fn cold_start_lines(measurement: &ColdStartMeasurement) -> Vec<String> {
    vec![
        format!("Response: {}", measurement.first_request_status),
        format!("Request took {}ms", measurement.first_request_ms),
        String::new(),
        format!(
            "Cold start time (server start + first request time): {}ms",
            measurement.cold_start_ms()
        ),
        String::new(),
    ]
}

pub fn spawning_line(workers: u32) -> String {
    format!("Spawning {} workers.", workers)
}

/// Periodic per-worker report, printed as one block.
pub fn steady_state_lines(worker_id: usize, snapshot: &LatencySnapshot) -> [String; 3] {
    [
        format!(
            "[worker {}] Steadystate min response time: {:.2}ms",
            worker_id, snapshot.min_ms
        ),
        format!(
            "[worker {}] Steadystate max response time: {:.2}ms",
            worker_id, snapshot.max_ms
        ),
        format!(
            "[worker {}] Steadystate average response time: {}ms",
            worker_id,
            snapshot.rounded_average_ms()
        ),
    ]
}

pub const WAITING_FOR_WORKERS: &str = "Waiting for workers to stop.";
pub const WORKERS_STOPPED: &str = "Workers stopped successfully.";
pub const WAITING_FOR_CONTROLLER: &str = "Waiting for tracing controller to finish.";
pub const CONTROLLER_STOPPED: &str = "Tracing controller finished.";

/// Formats the end-of-run summary.
pub struct ResultsReport;

impl ResultsReport {
    /// Format results as a console table.
    pub fn format_table(summary: &RunSummary) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec!["Worker", "Requests", "Min (ms)", "Max (ms)", "Avg (ms)"]);

        for worker in &summary.workers {
            match &worker.stats {
                Some(stats) => table.add_row(vec![
                    worker.worker_id.to_string(),
                    worker.requests.to_string(),
                    format!("{:.2}", stats.min_ms),
                    format!("{:.2}", stats.max_ms),
                    format!("{:.2}", stats.average_ms),
                ]),
                None => table.add_row(vec![
                    worker.worker_id.to_string(),
                    "0".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                ]),
            };
        }

        format!(
            "Cold start: {}ms (server {}ms + first request {}ms)\nTotal requests: {}\n{}",
            summary.cold_start.cold_start_ms(),
            summary.cold_start.server_startup_ms,
            summary.cold_start.first_request_ms,
            summary.total_requests(),
            table
        )
    }

    /// Format results as JSON.
    pub fn format_json(summary: &RunSummary) -> serde_json::Result<String> {
        serde_json::to_string_pretty(summary)
    }
}
