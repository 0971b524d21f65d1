//! Tests for the metrics module.

use csvsplit::metrics::{PARTS_WRITTEN, SplitMetrics};
use serde_json::json;

#[test]
fn counters_accumulate() {
    let mut metrics = SplitMetrics::new();
    metrics.increment_counter("rows", 1);
    metrics.increment_counter("rows", 5);
    assert_eq!(metrics.counter("rows"), 6);
    assert_eq!(metrics.counter("never_touched"), 0);
}

#[test]
fn set_counter_overwrites() {
    let mut metrics = SplitMetrics::new();
    metrics.increment_counter(PARTS_WRITTEN, 3);
    metrics.set_counter(PARTS_WRITTEN, 1);
    assert_eq!(metrics.snapshot().get(PARTS_WRITTEN), Some(&1));
}

#[test]
fn elapsed_needs_start_and_end() {
    let mut metrics = SplitMetrics::new();
    assert!(metrics.elapsed().is_none());
    metrics.record_start();
    assert!(metrics.elapsed().is_none());
    metrics.record_end();
    assert!(metrics.elapsed().is_some());
}

#[test]
fn json_includes_descriptions_for_builtin_counters() {
    let mut metrics = SplitMetrics::new();
    metrics.set_counter(PARTS_WRITTEN, 2);
    metrics.set_counter("custom", 9);

    let value = metrics.to_json();
    assert_eq!(value[PARTS_WRITTEN]["value"], json!(2));
    assert!(value[PARTS_WRITTEN]["description"].is_string());
    assert_eq!(value["custom"], json!({ "value": 9 }));
    assert!(value.get("execution_time_ms").is_none());
}

#[test]
fn save_to_file_writes_pretty_json() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("metrics.json");
    let mut metrics = SplitMetrics::new();
    metrics.record_start();
    metrics.set_counter(PARTS_WRITTEN, 4);
    metrics.record_end();

    metrics.save_to_file(&path)?;

    let back: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(back[PARTS_WRITTEN]["value"], json!(4));
    assert!(back["execution_time_ms"]["value"].is_u64());
    Ok(())
}
