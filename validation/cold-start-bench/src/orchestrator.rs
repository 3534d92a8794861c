//! Harness orchestration: cold start, sustained load, cooperative shutdown.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{error, info};

use crate::client::{build_client, timed_get};
use crate::config::BenchConfig;
use crate::console::Console;
use crate::error::{BenchError, BenchResult};
use crate::report::{self, ColdStartMeasurement, RunSummary};
use crate::run_state::RunState;
use crate::target::TargetService;
use crate::tracing_control::{TracingController, TracingFacility};
use crate::worker::{RequestWorker, WorkerSettings, WorkerSummary};

/// Runs one benchmark session against a target service.
pub struct Harness {
    config: BenchConfig,
    target: Box<dyn TargetService>,
    tracing: Arc<dyn TracingFacility>,
    console: Console,
}

impl Harness {
    pub fn new(
        config: BenchConfig,
        target: Box<dyn TargetService>,
        tracing: Arc<dyn TracingFacility>,
        console: Console,
    ) -> Self {
        Self {
            config,
            target,
            tracing,
            console,
        }
    }

    /// Run the session until `stop` resolves.
    ///
    /// Startup and the cold-start probe happen first; a failure there
    /// returns before any worker or the tracing controller exists. After
    /// that, the first worker or controller failure stops the run and is
    /// returned immediately; the remaining tasks are aborted, not joined.
    pub async fn run<F>(mut self, stop: F) -> BenchResult<RunSummary>
    where
        F: Future<Output = BenchResult<()>>,
    {
        self.config.validate()?;
        let worker_count = self.config.worker_count;
        self.console.line(report::worker_count_line(worker_count))?;

        // Cold start: server startup, then one probe request.
        self.tracing.enable()?;
        let startup = Instant::now();
        let url = self.target.start().await?;
        let server_startup_ms = startup.elapsed().as_millis() as u64;
        self.console
            .write_block(&[report::server_started_line(server_startup_ms), String::new()])?;

        let cold_start = self.probe(&url, server_startup_ms).await?;
        self.tracing.disable()?;

        // Sustained load.
        let run_state = RunState::new();
        let settings = WorkerSettings {
            target_url: url,
            report_every: self.config.report_every,
            request_timeout: self.config.request_timeout(),
        };

        self.console.line(report::spawning_line(worker_count))?;
        let mut workers = JoinSet::new();
        for id in 0..worker_count as usize {
            let worker =
                RequestWorker::new(id, settings.clone(), run_state.clone(), self.console.clone())?;
            workers.spawn(worker.run());
        }

        let controller = TracingController::new(
            self.tracing.clone(),
            run_state.clone(),
            self.config.tracing_interval(),
        );
        let mut controller_task = tokio::spawn(controller.run());
        info!(workers = worker_count, "Load started");

        let mut finished: Vec<WorkerSummary> = Vec::new();
        let mut controller_cycles: Option<u64> = None;
        tokio::pin!(stop);

        loop {
            tokio::select! {
                result = &mut stop => {
                    if let Err(e) = result {
                        run_state.stop();
                        controller_task.abort();
                        return Err(e);
                    }
                    break;
                }
                Some(joined) = workers.join_next() => {
                    match flatten(joined) {
                        Ok(summary) => finished.push(summary),
                        Err(e) => {
                            error!(error = %e, "Worker failed, aborting run");
                            run_state.stop();
                            controller_task.abort();
                            return Err(e);
                        }
                    }
                }
                joined = &mut controller_task, if controller_cycles.is_none() => {
                    match flatten(joined) {
                        Ok(cycles) => controller_cycles = Some(cycles),
                        Err(e) => {
                            error!(error = %e, "Tracing controller failed, aborting run");
                            run_state.stop();
                            return Err(e);
                        }
                    }
                }
            }
        }

        // Cooperative shutdown: flip the flag, then join workers before the controller.
        self.console.line(report::WAITING_FOR_WORKERS)?;
        run_state.stop();
        while let Some(joined) = workers.join_next().await {
            finished.push(flatten(joined)?);
        }
        finished.sort_by_key(|w| w.worker_id);
        self.console.line(report::WORKERS_STOPPED)?;

        self.console.line(report::WAITING_FOR_CONTROLLER)?;
        let cycles = match controller_cycles {
            Some(cycles) => cycles,
            None => flatten(controller_task.await)?,
        };
        self.console.line(report::CONTROLLER_STOPPED)?;

        info!(
            workers = finished.len(),
            requests = finished.iter().map(|w| w.requests).sum::<u64>(),
            tracing_cycles = cycles,
            "Run complete"
        );

        Ok(RunSummary {
            timestamp: chrono::Utc::now().to_rfc3339(),
            cold_start,
            workers: finished,
        })
    }

    /// Issue the single cold-start request and report it.
    async fn probe(&self, url: &str, server_startup_ms: u64) -> BenchResult<ColdStartMeasurement> {
        let client = build_client(self.config.request_timeout())?;

        self.console.line(report::probe_start_line(url))?;
        let response = timed_get(&client, url).await?;

        let measurement = ColdStartMeasurement {
            server_startup_ms,
            first_request_ms: response.elapsed.as_millis() as u64,
            first_request_status: response.status.as_u16(),
        };
        info!(
            server_startup_ms,
            first_request_ms = measurement.first_request_ms,
            cold_start_ms = measurement.cold_start_ms(),
            "Cold start measured"
        );
        self.console
            .write_block(&report::cold_start_lines(&measurement))?;

        Ok(measurement)
    }
}

fn flatten<T>(joined: Result<BenchResult<T>, tokio::task::JoinError>) -> BenchResult<T> {
    joined.map_err(BenchError::from)?
}
