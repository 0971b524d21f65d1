//! Testing utilities for split runs.
//!
//! - **Fixtures**: build CSV inputs with a known header and numbered rows
//! - **Mock I/O**: an in-memory [`ChunkSink`](crate::io::writer::ChunkSink)
//!   and self-deleting temporary directories
//! - **Assertions**: check the invariants every split must satisfy
//!
//! # Quick Start
//!
//! ```
//! use csvsplit::testing::*;
//! use csvsplit::split_rows;
//! use std::num::NonZeroUsize;
//!
//! let mut rows = rows_with_header(3, 5).into_iter().map(Ok);
//! let writer = split_rows(NonZeroUsize::new(2).unwrap(), &mut rows, MemorySink::new()).unwrap();
//! let sink = writer.into_sink();
//!
//! assert_eq!(sink.row_counts(), vec![2, 2, 1]);
//! assert_valid_split(&sink.parts, &sample_header(3), &numbered_rows(3, 5), 2);
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mock_io;

pub use assertions::*;
pub use fixtures::*;
pub use mock_io::*;
