//! Serialization of flushed chunks.
//!
//! The chunking logic hands each full chunk to a [`ChunkSink`]. The
//! production sink, [`FileSink`], writes every part to its own file named by
//! an [`OutputTemplate`]; tests use an in-memory sink instead (see
//! [`crate::testing::MemorySink`]).

use crate::config::OutputTemplate;
use crate::error::{Result, SplitError};
use crate::io::reader::Row;
use csv::{Terminator, WriterBuilder};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Destination for flushed chunks.
pub trait ChunkSink {
    /// Persist one part: `header` followed by `rows`.
    ///
    /// `index` is the 0-based part number. Returns the location the part was
    /// written to.
    ///
    /// # Errors
    /// Any failure is fatal to the run.
    fn write_chunk(&mut self, index: usize, header: &Row, rows: &[Row]) -> Result<PathBuf>;
}

impl<S: ChunkSink + ?Sized> ChunkSink for &mut S {
    fn write_chunk(&mut self, index: usize, header: &Row, rows: &[Row]) -> Result<PathBuf> {
        (**self).write_chunk(index, header, rows)
    }
}

/// Writes part `i` to `template.part_path(i)`.
#[derive(Clone, Debug)]
pub struct FileSink {
    template: OutputTemplate,
}

impl FileSink {
    #[must_use]
    pub fn new(template: OutputTemplate) -> Self {
        Self { template }
    }

    #[must_use]
    pub fn template(&self) -> &OutputTemplate {
        &self.template
    }
}

impl ChunkSink for FileSink {
    fn write_chunk(&mut self, index: usize, header: &Row, rows: &[Row]) -> Result<PathBuf> {
        let path = self.template.part_path(index);
        write_chunk(&path, header, rows)?;
        Ok(path)
    }
}

/// Write `header` and `rows` as one complete CSV file at `path`.
///
/// The file is created or truncated; it is never appended to. The handle is
/// closed before this returns. On error a partial file may remain.
///
/// # Errors
/// Returns [`SplitError::Io`] if the file cannot be created or flushed, or
/// [`SplitError::Encode`] if a record cannot be written.
pub fn write_chunk(path: &Path, header: &Row, rows: &[Row]) -> Result<()> {
    let f = File::create(path).map_err(|e| SplitError::io("create", path, e))?;
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(BufWriter::new(f));

    let encode = |source: csv::Error| SplitError::Encode {
        path: path.to_path_buf(),
        source,
    };
    wtr.write_record(header).map_err(encode)?;
    for row in rows {
        wtr.write_record(row).map_err(encode)?;
    }
    wtr.flush().map_err(|e| SplitError::io("flush", path, e))?;
    Ok(())
}
