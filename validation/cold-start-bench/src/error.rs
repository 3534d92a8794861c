//! Error types for the benchmark harness.

use thiserror::Error;

/// Result type alias using BenchError.
pub type BenchResult<T> = Result<T, BenchError>;

/// Every failure the harness can hit.
///
/// None of these are retried: a broken target ends the run.
#[derive(Debug, Error)]
pub enum BenchError {
    // === Target Errors ===
    #[error("Target {url} answered HTTP {status}")]
    TargetStatus { url: String, status: u16 },

    #[error("Request to target failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Target service failed to start: {0}")]
    TargetStartup(String),

    // === Harness Errors ===
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Tracing facility error: {0}")]
    Tracing(String),

    #[error("Harness task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl BenchError {
    /// Whether the target service itself is at fault.
    pub fn is_target_failure(&self) -> bool {
        matches!(
            self,
            BenchError::TargetStatus { .. }
                | BenchError::Transport(_)
                | BenchError::TargetStartup(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_status_message() {
        let err = BenchError::TargetStatus {
            url: "http://localhost:5000/".to_string(),
            status: 500,
        };
        assert_eq!(err.to_string(), "Target http://localhost:5000/ answered HTTP 500");
        assert!(err.is_target_failure());
    }

    #[test]
    fn test_config_error_is_not_target_failure() {
        let err = BenchError::Config("worker_count must be > 0".to_string());
        assert!(!err.is_target_failure());
    }
}
