//! Request workers: a sequential request loop with per-worker statistics.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::{build_client, timed_get};
use crate::console::Console;
use crate::error::BenchResult;
use crate::report;
use crate::run_state::RunState;
use crate::stats::{LatencySnapshot, LatencyStats};

/// What one worker measured before it stopped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerSummary {
    pub worker_id: usize,
    pub requests: u64,
    pub stats: Option<LatencySnapshot>,
}

/// Settings shared by all workers of a run.
#[derive(Debug, Clone)]
pub struct WorkerSettings {
    pub target_url: String,
    pub report_every: u64,
    pub request_timeout: Duration,
}

/// A single worker issuing requests back to back.
///
/// Owns its HTTP client and latency tracker.
pub struct RequestWorker {
    id: usize,
    client: reqwest::Client,
    settings: WorkerSettings,
    stats: LatencyStats,
    completed: u64,
    run_state: RunState,
    console: Console,
}

impl RequestWorker {
    pub fn new(
        id: usize,
        settings: WorkerSettings,
        run_state: RunState,
        console: Console,
    ) -> BenchResult<Self> {
        let client = build_client(settings.request_timeout)?;
        Ok(Self {
            id,
            client,
            settings,
            stats: LatencyStats::new(),
            completed: 0,
            run_state,
            console,
        })
    }

    /// Issue requests until the run stops.
    ///
    /// The stop flag is checked before each request, never during one. The
    /// first failed request ends the worker with that error.
    pub async fn run(mut self) -> BenchResult<WorkerSummary> {
        debug!(worker = self.id, url = %self.settings.target_url, "Worker started");

        while self.run_state.is_running() {
            let response = timed_get(&self.client, &self.settings.target_url).await?;
            self.stats.record(response.elapsed_ms());
            self.completed += 1;

            if self.completed % self.settings.report_every == 0 {
                self.report()?;
            }
        }

        info!(worker = self.id, requests = self.completed, "Worker stopped");
        Ok(WorkerSummary {
            worker_id: self.id,
            requests: self.completed,
            stats: self.stats.snapshot(),
        })
    }

    fn report(&self) -> BenchResult<()> {
        if let Some(snapshot) = self.stats.snapshot() {
            debug!(
                worker = self.id,
                requests = self.completed,
                min_ms = snapshot.min_ms,
                max_ms = snapshot.max_ms,
                average_ms = snapshot.average_ms,
                "Steady-state report"
            );
            self.console
                .write_block(&report::steady_state_lines(self.id, &snapshot))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BenchError;
    use test_utils::{MockEndpoint, SharedBuffer};

    fn settings(url: String, report_every: u64) -> WorkerSettings {
        WorkerSettings {
            target_url: url,
            report_every,
            request_timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_worker_reports_on_cadence_and_stops() {
        let endpoint = MockEndpoint::start().await;
        let buffer = SharedBuffer::new();
        let run_state = RunState::new();

        let worker = RequestWorker::new(
            7,
            settings(endpoint.url(), 10),
            run_state.clone(),
            Console::new(buffer.clone()),
        )
        .unwrap();
        let task = tokio::spawn(worker.run());

        endpoint.wait_for_hits(25).await;
        run_state.stop();
        let summary = task.await.unwrap().unwrap();

        assert_eq!(summary.worker_id, 7);
        assert!(summary.requests >= 25);
        assert_eq!(summary.requests, endpoint.hits());

        let stats = summary.stats.unwrap();
        assert_eq!(stats.count, summary.requests);
        assert!(stats.min_ms <= stats.average_ms && stats.average_ms <= stats.max_ms);

        let reports = buffer
            .lines()
            .iter()
            .filter(|l| l.contains("Steadystate min"))
            .count() as u64;
        assert_eq!(reports, summary.requests / 10);
    }

    #[tokio::test]
    async fn test_worker_fails_fast_on_error_status() {
        let endpoint = MockEndpoint::start().await;
        endpoint.fail_from_hit(5);
        let run_state = RunState::new();

        let worker = RequestWorker::new(
            0,
            settings(endpoint.url(), 1000),
            run_state.clone(),
            Console::new(SharedBuffer::new()),
        )
        .unwrap();

        let err = worker.run().await.unwrap_err();
        assert!(matches!(err, BenchError::TargetStatus { status: 500, .. }));
        assert_eq!(endpoint.hits(), 5);
        // The worker never touches the shared flag itself.
        assert!(run_state.is_running());
    }

    #[tokio::test]
    async fn test_stopped_worker_issues_no_requests() {
        let endpoint = MockEndpoint::start().await;
        let run_state = RunState::new();
        run_state.stop();

        let summary = RequestWorker::new(
            0,
            settings(endpoint.url(), 1000),
            run_state,
            Console::new(SharedBuffer::new()),
        )
        .unwrap()
        .run()
        .await
        .unwrap();

        assert_eq!(summary.requests, 0);
        assert!(summary.stats.is_none());
        assert_eq!(endpoint.hits(), 0);
    }
}
