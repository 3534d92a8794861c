//! HTTP request primitive shared by the cold-start probe and the workers.

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use tracing::trace;

use crate::error::{BenchError, BenchResult};

/// Create an HTTP client for one worker (or the probe).
pub fn build_client(timeout: Duration) -> BenchResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(1)
        .build()?)
}

/// Outcome of one successful timed request.
#[derive(Debug, Clone, Copy)]
pub struct TimedResponse {
    pub status: StatusCode,
    pub elapsed: Duration,
}

impl TimedResponse {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// GET `url`, read the body, and time the whole exchange.
///
/// Transport failures and non-2xx statuses are errors; callers treat them
/// as fatal and never retry.
pub async fn timed_get(client: &reqwest::Client, url: &str) -> BenchResult<TimedResponse> {
    let start = Instant::now();

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(BenchError::TargetStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let bytes = response.bytes().await?;

    let elapsed = start.elapsed();
    trace!(url, status = status.as_u16(), bytes = bytes.len(), ?elapsed, "Request complete");

    Ok(TimedResponse { status, elapsed })
}
