//! In-memory sinks and temporary locations for tests.

use crate::error::{Result, SplitError};
use crate::io::reader::Row;
use crate::io::writer::ChunkSink;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One part captured by [`MemorySink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryPart {
    pub index: usize,
    pub header: Row,
    pub rows: Vec<Row>,
}

/// A [`ChunkSink`] that keeps every part in memory.
///
/// Parts are recorded under the pseudo path `mem://{index}`. With
/// [`failing_at`](Self::failing_at) the sink rejects one write, which lets
/// tests observe how the writer behaves after a sink error.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub parts: Vec<MemoryPart>,
    fail_at: Option<usize>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose write of part `index` fails with an I/O error.
    #[must_use]
    pub fn failing_at(index: usize) -> Self {
        Self {
            parts: Vec::new(),
            fail_at: Some(index),
        }
    }

    /// Data-row count of each part, in write order.
    #[must_use]
    pub fn row_counts(&self) -> Vec<usize> {
        self.parts.iter().map(|p| p.rows.len()).collect()
    }
}

impl ChunkSink for MemorySink {
    fn write_chunk(&mut self, index: usize, header: &Row, rows: &[Row]) -> Result<PathBuf> {
        let path = PathBuf::from(format!("mem://{index}"));
        if self.fail_at == Some(index) {
            return Err(SplitError::io(
                "create",
                path,
                std::io::Error::other("injected failure"),
            ));
        }
        self.parts.push(MemoryPart {
            index,
            header: header.clone(),
            rows: rows.to_vec(),
        });
        Ok(path)
    }
}

/// A temporary directory that is deleted when dropped.
pub struct TempDirPath {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TempDirPath {
    /// Create a new temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();
        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A path for `filename` inside this directory.
    #[must_use]
    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.path.join(filename)
    }

    /// Names of the files in this directory, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    pub fn file_names(&self) -> std::io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.path)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}
