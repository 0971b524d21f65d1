//! Run statistics.
//!
//! [`SplitMetrics`] keeps named counters and the start/end time of a run. The
//! splitter records `rows_read`, `data_rows` and `parts_written`; callers can
//! add their own counters. Results can be logged, exported as JSON, or saved
//! to a file.
//!
//! # Example
//!
//! ```
//! use csvsplit::metrics::SplitMetrics;
//!
//! let mut metrics = SplitMetrics::new();
//! metrics.record_start();
//! metrics.increment_counter("parts_written", 1);
//! metrics.record_end();
//!
//! assert_eq!(metrics.counter("parts_written"), 1);
//! assert!(metrics.elapsed().is_some());
//! ```

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

/// Counter names recorded by [`split_file`](crate::split_file).
pub const ROWS_READ: &str = "rows_read";
pub const DATA_ROWS: &str = "data_rows";
pub const PARTS_WRITTEN: &str = "parts_written";

fn describe(name: &str) -> Option<&'static str> {
    match name {
        ROWS_READ => Some("Records decoded from the input, header included"),
        DATA_ROWS => Some("Data rows distributed over the parts"),
        PARTS_WRITTEN => Some("Output files written"),
        _ => None,
    }
}

/// Named counters plus wall-clock timing for one run.
#[derive(Clone, Debug, Default)]
pub struct SplitMetrics {
    counters: BTreeMap<String, u64>,
    start_time: Option<Instant>,
    end_time: Option<Instant>,
}

impl SplitMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn record_end(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Time between [`record_start`](Self::record_start) and
    /// [`record_end`](Self::record_end), if both were called.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end.duration_since(start)),
            _ => None,
        }
    }

    /// Add `value` to a counter, creating it at zero if needed.
    pub fn increment_counter(&mut self, name: &str, value: u64) {
        *self.counters.entry(name.to_string()).or_insert(0) += value;
    }

    pub fn set_counter(&mut self, name: &str, value: u64) {
        self.counters.insert(name.to_string(), value);
    }

    /// Current value of a counter; 0 if it was never touched.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.counters.clone()
    }

    /// All metrics as `{ name: { "value": .., "description": .. } }`.
    ///
    /// `execution_time_ms` is included when the run was timed.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        for (name, value) in &self.counters {
            let mut obj = Map::new();
            obj.insert("value".to_string(), json!(value));
            if let Some(desc) = describe(name) {
                obj.insert("description".to_string(), json!(desc));
            }
            out.insert(name.clone(), Value::Object(obj));
        }
        if let Some(elapsed) = self.elapsed() {
            out.insert(
                "execution_time_ms".to_string(),
                json!({
                    "value": u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                    "description": "Total split time in milliseconds",
                }),
            );
        }
        Value::Object(out)
    }

    /// Log every counter and the elapsed time at info level.
    pub fn log_summary(&self) {
        for (name, value) in &self.counters {
            log::info!("{name}: {value}");
        }
        if let Some(elapsed) = self.elapsed() {
            log::info!("split took {elapsed:?}");
        }
    }

    /// Write [`to_json`](Self::to_json) to `path`, pretty-printed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let formatted = serde_json::to_string_pretty(&self.to_json())?;
        let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        file.write_all(formatted.as_bytes())
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}
