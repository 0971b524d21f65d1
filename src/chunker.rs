//! Header tracking and bounded chunking.
//!
//! [`ChunkWriter`] consumes rows one at a time and groups them into chunks of
//! at most `lines_per_file` data rows. The first row is kept as the header and
//! repeated at the top of every part.
//!
//! # State machine
//!
//! ```text
//! AwaitingHeader --row--> Accumulating --end of input--> Done
//!       |                   |    ^
//!       +--end of input--> Done  +-- row (flush + reset when the chunk is full)
//! ```
//!
//! - A chunk is flushed as soon as the row that fills it is appended, before
//!   the next row is read.
//! - At end of input the current chunk is flushed only if it holds at least
//!   one row. A part never consists of the header alone.
//! - Part indices start at 0 and advance only after a successful write, so
//!   the written indices are always `0..k`.

use crate::error::{Result, SplitError};
use crate::io::reader::Row;
use crate::io::writer::ChunkSink;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Where the writer is in the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkState {
    /// Nothing read yet; the next row becomes the header.
    AwaitingHeader,
    /// Header captured; rows are being collected into chunks.
    Accumulating,
    /// Input exhausted and the last chunk handled. No further reads.
    Done,
}

/// Rows waiting to be written as one part.
#[derive(Clone, Debug)]
pub struct Chunk {
    rows: Vec<Row>,
    limit: NonZeroUsize,
}

impl Chunk {
    #[must_use]
    pub fn new(limit: NonZeroUsize) -> Self {
        Self {
            rows: Vec::new(),
            limit,
        }
    }

    pub fn push(&mut self, row: Row) {
        debug_assert!(!self.is_full(), "push into a full chunk");
        self.rows.push(row);
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.rows.len() >= self.limit.get()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Drop all rows, keeping the allocation for the next chunk.
    pub fn reset(&mut self) {
        self.rows.clear();
    }
}

/// One written part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartInfo {
    /// 0-based part number.
    pub index: usize,
    /// Where the sink put it.
    pub path: PathBuf,
    /// Data rows in the part, header excluded.
    pub rows: usize,
}

/// Splits a row sequence into header-prefixed parts written through a
/// [`ChunkSink`].
pub struct ChunkWriter<S: ChunkSink> {
    sink: S,
    state: ChunkState,
    header: Option<Row>,
    chunk: Chunk,
    next_index: usize,
    rows_read: u64,
    parts: Vec<PartInfo>,
}

impl<S: ChunkSink> ChunkWriter<S> {
    pub fn new(lines_per_file: NonZeroUsize, sink: S) -> Self {
        Self {
            sink,
            state: ChunkState::AwaitingHeader,
            header: None,
            chunk: Chunk::new(lines_per_file),
            next_index: 0,
            rows_read: 0,
            parts: Vec::new(),
        }
    }

    /// Consume rows until the input is exhausted.
    ///
    /// # Errors
    /// Stops at the first decoding or write error. Parts already written are
    /// left in place.
    pub fn run<I>(&mut self, rows: &mut I) -> Result<()>
    where
        I: Iterator<Item = Result<Row>>,
    {
        while self.step(rows)? != ChunkState::Done {}
        Ok(())
    }

    /// Read at most one row and act on it. Returns the new state.
    ///
    /// In [`ChunkState::Done`] nothing is read.
    ///
    /// # Errors
    /// Propagates errors from the row source and the sink.
    pub fn step<I>(&mut self, rows: &mut I) -> Result<ChunkState>
    where
        I: Iterator<Item = Result<Row>>,
    {
        match self.state {
            ChunkState::Done => {}
            ChunkState::AwaitingHeader => match rows.next().transpose()? {
                Some(header) => {
                    log::debug!("header has {} fields", header.len());
                    self.header = Some(header);
                    self.state = ChunkState::Accumulating;
                }
                None => {
                    log::debug!("input is empty, nothing to split");
                    self.state = ChunkState::Done;
                }
            },
            ChunkState::Accumulating => match rows.next().transpose()? {
                Some(row) => {
                    self.chunk.push(row);
                    self.rows_read += 1;
                    if self.chunk.is_full() {
                        self.flush()?;
                        self.reset_chunk();
                    }
                }
                None => {
                    if !self.chunk.is_empty() {
                        self.flush()?;
                        self.reset_chunk();
                    }
                    self.state = ChunkState::Done;
                }
            },
        }
        Ok(self.state)
    }

    /// Write the header and the current chunk as the next part.
    ///
    /// The part index advances only when the sink succeeds. The chunk itself
    /// is left untouched; call [`reset_chunk`](Self::reset_chunk) afterwards.
    ///
    /// # Errors
    /// Returns [`SplitError::EmptyChunk`] if there is no header or no row to
    /// write, otherwise whatever the sink reports.
    pub fn flush(&mut self) -> Result<PartInfo> {
        let Some(header) = self.header.as_ref() else {
            return Err(SplitError::EmptyChunk);
        };
        if self.chunk.is_empty() {
            return Err(SplitError::EmptyChunk);
        }

        let path = self
            .sink
            .write_chunk(self.next_index, header, self.chunk.rows())?;
        let part = PartInfo {
            index: self.next_index,
            path,
            rows: self.chunk.len(),
        };
        log::debug!(
            "wrote part {} ({} rows) to {}",
            part.index,
            part.rows,
            part.path.display()
        );
        self.next_index += 1;
        self.parts.push(part.clone());
        Ok(part)
    }

    /// Empty the current chunk. Only meaningful right after a flush.
    pub fn reset_chunk(&mut self) {
        self.chunk.reset();
    }

    #[must_use]
    pub fn state(&self) -> ChunkState {
        self.state
    }

    /// The captured header, once the first row has been read.
    #[must_use]
    pub fn header(&self) -> Option<&Row> {
        self.header.as_ref()
    }

    /// Rows currently buffered and not yet written.
    #[must_use]
    pub fn pending(&self) -> &Chunk {
        &self.chunk
    }

    #[must_use]
    pub fn parts(&self) -> &[PartInfo] {
        &self.parts
    }

    /// Data rows consumed so far, header excluded.
    #[must_use]
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    /// Index the next flushed part will get.
    #[must_use]
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Give back the sink, e.g. to inspect what it collected.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Consume the writer, returning the header and the written parts.
    pub fn into_parts(self) -> (Option<Row>, Vec<PartInfo>) {
        (self.header, self.parts)
    }
}
