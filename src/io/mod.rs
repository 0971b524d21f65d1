//! Input decoding and output serialization.
//!
//! - [`reader`]: the [`RecordReader`](reader::RecordReader) row source
//! - [`writer`]: the [`ChunkSink`](writer::ChunkSink) seam and the file-backed sink
//! - [`compression`]: transparent decompression of the input file

pub mod compression;
pub mod reader;
pub mod writer;
