//! End-to-end split runs.
//!
//! [`split_file`] validates a [`SplitConfig`], prepares the output directory,
//! streams the input through a [`ChunkWriter`] backed by a [`FileSink`], and
//! reports what was written. [`split_rows`] is the same core over any row
//! source and sink.

use crate::chunker::{ChunkWriter, PartInfo};
use crate::config::SplitConfig;
use crate::error::{Result, SplitError};
use crate::io::reader::{RecordReader, Row};
use crate::io::writer::{ChunkSink, FileSink};
use crate::metrics::{DATA_ROWS, PARTS_WRITTEN, ROWS_READ, SplitMetrics};
use std::fs::create_dir_all;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

/// Outcome of a successful run.
#[derive(Clone, Debug)]
pub struct SplitSummary {
    /// The input's first record, or `None` for an empty input.
    pub header: Option<Row>,
    /// Parts in the order they were written; `parts[i].index == i`.
    pub parts: Vec<PartInfo>,
    pub metrics: SplitMetrics,
}

impl SplitSummary {
    /// Data rows written across all parts.
    #[must_use]
    pub fn data_rows(&self) -> usize {
        self.parts.iter().map(|p| p.rows).sum()
    }

    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.metrics.elapsed()
    }
}

/// Split the configured input into header-prefixed parts.
///
/// Steps, each fatal on failure:
/// 1. validate the configuration (nothing touches the filesystem before this)
/// 2. create the output directory and its parents if absent
/// 3. stream the input and write every full chunk, then the final partial one
///
/// # Errors
/// Configuration, decoding and I/O errors are returned as they occur. Parts
/// written before an error stay on disk.
pub fn split_file(config: &SplitConfig) -> Result<SplitSummary> {
    let mut metrics = SplitMetrics::new();
    metrics.record_start();

    let config = config.validate()?;
    log::info!("file to be split: {}", config.input_path.display());
    log::info!("number of lines per file: {}", config.lines_per_file);

    ensure_dir(config.template.dir())?;

    let mut reader = RecordReader::open(&config.input_path)?;
    let writer = split_rows(
        config.lines_per_file,
        &mut reader,
        FileSink::new(config.template.clone()),
    )?;

    metrics.set_counter(ROWS_READ, reader.records_read());
    metrics.set_counter(DATA_ROWS, writer.rows_read());
    metrics.set_counter(PARTS_WRITTEN, writer.parts().len() as u64);
    let (header, parts) = writer.into_parts();
    metrics.record_end();
    metrics.log_summary();

    Ok(SplitSummary {
        header,
        parts,
        metrics,
    })
}

/// Run the chunking core over `rows`, writing parts to `sink`.
///
/// Returns the finished writer so callers can inspect the header, the parts,
/// or take the sink back.
///
/// # Errors
/// Propagates the first error from `rows` or `sink`.
pub fn split_rows<I, S>(lines_per_file: NonZeroUsize, rows: &mut I, sink: S) -> Result<ChunkWriter<S>>
where
    I: Iterator<Item = Result<Row>>,
    S: ChunkSink,
{
    let mut writer = ChunkWriter::new(lines_per_file, sink);
    writer.run(rows)?;
    Ok(writer)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    log::debug!("creating output directory {}", dir.display());
    create_dir_all(dir).map_err(|e| SplitError::io("mkdir -p", dir, e))
}
