//! # csvsplit
//!
//! Split a large CSV file into smaller parts of at most `lines_per_file` data
//! rows each, repeating the original header row at the top of every part.
//!
//! The input is read once, sequentially, one record at a time; only the
//! current chunk is held in memory.
//!
//! ## Quick Start
//!
//! ```no_run
//! use csvsplit::{split_file, SplitConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = SplitConfig::new("data/example.csv")
//!     .with_output_path("out/example.csv")
//!     .with_lines_per_file(100_000);
//!
//! let summary = split_file(&config)?;
//! for part in &summary.parts {
//!     println!("{} -> {} rows", part.path.display(), part.rows);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! With 250 000 data rows this writes `out/0_example.csv`,
//! `out/1_example.csv` and `out/2_example.csv` holding 100 000, 100 000 and
//! 50 000 rows, each preceded by the header.
//!
//! ## Core Concepts
//!
//! ### RecordReader
//!
//! [`RecordReader`] decodes the input into rows with standard CSV quoting
//! rules. Compressed inputs (gzip, zstd, bzip2, xz, feature gated) are
//! decompressed transparently. Malformed records stop the run.
//!
//! ### ChunkWriter
//!
//! [`ChunkWriter`] keeps the first row as the header and collects the rest
//! into chunks. A full chunk is flushed immediately; the last, partial chunk
//! is flushed at end of input. A part is never written without data rows.
//!
//! ### Sinks
//!
//! Flushed chunks go to a [`ChunkSink`]. [`FileSink`] writes part `i` to
//! `{dir}{i}_{base_name}`, where `dir` and `base_name` come from the
//! configured output path.
//!
//! ## Errors
//!
//! All fallible operations return [`SplitError`], classified by
//! [`ErrorKind`] as configuration, decoding, or I/O failures. Nothing is
//! retried or rolled back: parts written before an error remain on disk.

pub mod chunker;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod metrics;
pub mod splitter;
pub mod testing;

pub use chunker::{Chunk, ChunkState, ChunkWriter, PartInfo};
pub use config::{DEFAULT_LINES_PER_FILE, OutputTemplate, SplitConfig, ValidatedConfig};
pub use error::{ErrorKind, Result, SplitError};
pub use io::reader::{RecordReader, Row};
pub use io::writer::{ChunkSink, FileSink, write_chunk};
pub use metrics::SplitMetrics;
pub use splitter::{SplitSummary, split_file, split_rows};
