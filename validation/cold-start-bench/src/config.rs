//! Configuration loading and management.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{BenchError, BenchResult};

/// Harness configuration, optionally loaded from YAML.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Number of request workers to spawn
    pub worker_count: u32,
    /// Endpoint hit by the probe and workers when the target is external
    pub target_url: String,
    /// Bind address for the embedded storefront
    pub listen: SocketAddr,
    /// Host the storefront in-process instead of hitting `target_url`
    pub embedded_target: bool,
    /// How long tracing stays enabled in each controller cycle
    pub tracing_interval_ms: u64,
    /// Completed requests between per-worker reports
    pub report_every: u64,
    pub request_timeout_secs: u64,
    /// Diagnostic trace file; a timestamped file under `results/` when unset
    pub diagnostic_log: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            worker_count: 1,
            target_url: "http://localhost:5000/".to_string(),
            listen: SocketAddr::from(([127, 0, 0, 1], 5000)),
            embedded_target: true,
            tracing_interval_ms: 5000,
            report_every: 1000,
            request_timeout_secs: 30,
            diagnostic_log: None,
        }
    }
}

impl BenchConfig {
    /// Load configuration from YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> BenchResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: BenchConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> BenchResult<()> {
        if self.worker_count == 0 {
            return Err(BenchError::Config("worker_count must be > 0".into()));
        }
        if self.report_every == 0 {
            return Err(BenchError::Config("report_every must be > 0".into()));
        }
        if self.tracing_interval_ms == 0 {
            return Err(BenchError::Config("tracing_interval_ms must be > 0".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(BenchError::Config("request_timeout_secs must be > 0".into()));
        }
        if !self.embedded_target {
            reqwest::Url::parse(&self.target_url).map_err(|e| {
                BenchError::Config(format!("target_url '{}': {}", self.target_url, e))
            })?;
        }
        Ok(())
    }

    pub fn tracing_interval(&self) -> Duration {
        Duration::from_millis(self.tracing_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Diagnostic trace file path, resolving the timestamped default.
    pub fn diagnostic_log_path(&self) -> PathBuf {
        self.diagnostic_log.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "results/diagnostics_{}.jsonl",
                chrono::Utc::now().format("%Y%m%d_%H%M%S")
            ))
        })
    }
}

/// Parse a worker-count argument.
pub fn parse_worker_count(raw: &str) -> BenchResult<u32> {
    let count: u32 = raw
        .trim()
        .parse()
        .map_err(|_| BenchError::Config(format!("worker count '{}' is not a number", raw)))?;
    if count == 0 {
        return Err(BenchError::Config("worker count must be > 0".into()));
    }
    Ok(count)
}
