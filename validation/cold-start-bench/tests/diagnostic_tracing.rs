//! Diagnostic layer wiring through the real global subscriber.
//!
//! Kept in its own test binary: the subscriber can only be installed once
//! per process.

use cold_start_bench::logging;
use cold_start_bench::TracingFacility;
use tracing::trace;

#[test]
fn test_diagnostic_file_follows_switch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sub").join("diag.jsonl");

    let facility = logging::init("off", &path).unwrap();
    assert!(path.parent().unwrap().is_dir());
    assert!(!facility.is_enabled());

    trace!(marker = "before-enable", "diagnostic event");

    facility.enable().unwrap();
    assert!(facility.is_enabled());
    trace!(marker = "while-enabled", "diagnostic event");

    facility.disable().unwrap();
    assert!(!facility.is_enabled());
    trace!(marker = "after-disable", "diagnostic event");

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(!written.contains("before-enable"));
    assert!(written.contains("while-enabled"));
    assert!(!written.contains("after-disable"));

    // Every line the layer wrote is a JSON object.
    for line in written.lines() {
        serde_json::from_str::<serde_json::Value>(line).unwrap();
    }

    // A second subscriber cannot be installed over the first.
    let again = logging::init("off", &dir.path().join("other.jsonl"));
    assert!(again.is_err());
}
