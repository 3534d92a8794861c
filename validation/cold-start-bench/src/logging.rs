//! Subscriber setup: operational logs plus the switchable diagnostic layer.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload};

use crate::error::{BenchError, BenchResult};
use crate::tracing_control::DiagnosticTracing;

/// Map a `--log-level` value to a filter, defaulting to INFO.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}

/// Install the global subscriber.
///
/// Operational logs go to stderr as JSON so stdout only carries reports.
/// The diagnostic layer writes JSON to `diagnostic_path` and starts
/// disabled; the returned facility switches it.
pub fn init(log_level: &str, diagnostic_path: &Path) -> BenchResult<DiagnosticTracing> {
    if let Some(parent) = diagnostic_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(diagnostic_path)?;

    let (diagnostic_filter, handle) = reload::Layer::new(LevelFilter::OFF);
    let diagnostic_layer = fmt::layer()
        .json()
        .with_thread_ids(true)
        .with_writer(Mutex::new(file))
        .with_filter(diagnostic_filter);

    let console_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .with_filter(parse_level(log_level));

    tracing_subscriber::registry()
        .with(diagnostic_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| BenchError::Tracing(e.to_string()))?;

    Ok(DiagnosticTracing::new(handle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::DEBUG);
        assert_eq!(parse_level("off"), LevelFilter::OFF);
        assert_eq!(parse_level("verbose"), LevelFilter::INFO);
    }
}
