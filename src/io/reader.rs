//! Streaming CSV row source.
//!
//! [`RecordReader`] decodes one record at a time with the `csv` crate. It
//! does not know about headers: the first row it returns is an ordinary row,
//! and the consumer decides what to make of it.
//!
//! The `csv` crate is lenient about quotes: an unterminated quoted field runs
//! to the end of input, and stray quotes are kept as data. The bytes are
//! therefore also run through [`QuoteCheck`], which rejects both.

use crate::error::{Result, SplitError};
use crate::io::compression::auto_detect_reader;
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One decoded record: ordered field values.
pub type Row = StringRecord;

/// Forward-only, non-restartable sequence of rows from a CSV source.
///
/// Records must all have the same number of fields as the first one; a
/// record that differs, or any other malformed input, is a
/// [`SplitError::Decode`]. Quote misuse is a [`SplitError::Malformed`].
/// Once the reader has reported end of input or an error it is exhausted and
/// keeps returning `Ok(None)`.
pub struct RecordReader {
    inner: csv::Reader<QuoteCheck<Box<dyn Read>>>,
    records_read: u64,
    exhausted: bool,
}

impl RecordReader {
    /// Open a CSV file, decompressing it transparently when needed.
    ///
    /// # Errors
    /// Returns [`SplitError::Io`] if the file cannot be opened or the
    /// decompressor cannot be set up.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| SplitError::io("open", path, e))?;
        let rdr = auto_detect_reader(f, path).map_err(|e| {
            SplitError::io("setup decompression for", path, std::io::Error::other(e))
        })?;
        Ok(Self::from_boxed(rdr))
    }

    /// Read CSV from any byte source, without decompression.
    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        Self::from_boxed(Box::new(reader))
    }

    fn from_boxed(reader: Box<dyn Read>) -> Self {
        let inner = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_reader(QuoteCheck::new(reader));
        Self {
            inner,
            records_read: 0,
            exhausted: false,
        }
    }

    /// Decode the next row.
    ///
    /// Returns `Ok(Some(row))` for a row, `Ok(None)` at end of input.
    ///
    /// # Errors
    /// Returns [`SplitError::Decode`] or [`SplitError::Malformed`] for a
    /// malformed record. The error is fatal; the reader is exhausted
    /// afterwards.
    pub fn next_record(&mut self) -> Result<Option<Row>> {
        if self.exhausted {
            return Ok(None);
        }
        let mut row = StringRecord::new();
        match self.inner.read_record(&mut row) {
            Ok(true) => {
                // The check runs ahead of the parser, so only a fault before
                // the end of this record belongs to it.
                let end = self.inner.position().byte();
                if let Some(fault) = self.inner.get_ref().fault().filter(|f| f.byte < end) {
                    return Err(self.malformed(fault));
                }
                self.records_read += 1;
                Ok(Some(row))
            }
            Ok(false) => match self.inner.get_ref().fault() {
                Some(fault) => Err(self.malformed(fault)),
                None => {
                    self.exhausted = true;
                    Ok(None)
                }
            },
            Err(source) => {
                self.exhausted = true;
                Err(SplitError::Decode {
                    record: self.records_read + 1,
                    source,
                })
            }
        }
    }

    /// Records returned so far, the first (header) row included.
    #[must_use]
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    fn malformed(&mut self, fault: QuoteFault) -> SplitError {
        self.exhausted = true;
        SplitError::Malformed {
            record: self.records_read + 1,
            byte: fault.byte,
            reason: fault.reason,
        }
    }
}

impl Iterator for RecordReader {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

const UTF8_BOM: [u8; 3] = [0xef, 0xbb, 0xbf];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct QuoteFault {
    /// Offset of the offending byte in the (decompressed) input.
    byte: u64,
    reason: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    /// A quote inside a quoted field: either an escaped `""` or the close.
    QuoteInQuoted,
}

/// Pass-through reader that tracks the quoting of every field it sees and
/// remembers the first misuse.
///
/// A quote may only open a field, and a quoted field must be closed by a
/// quote followed by a delimiter, a line break or the end of input.
struct QuoteCheck<R> {
    inner: R,
    state: QuoteState,
    offset: u64,
    /// Where the current quoted field was opened.
    opened_at: u64,
    fault: Option<QuoteFault>,
}

impl<R: Read> QuoteCheck<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            state: QuoteState::FieldStart,
            offset: 0,
            opened_at: 0,
            fault: None,
        }
    }

    fn fault(&self) -> Option<QuoteFault> {
        self.fault
    }

    fn fail(&mut self, byte: u64, reason: &'static str) {
        self.fault.get_or_insert(QuoteFault { byte, reason });
    }

    fn scan(&mut self, bytes: &[u8]) {
        for &b in bytes {
            let at = self.offset;
            self.offset += 1;
            if self.fault.is_some() {
                continue;
            }
            if usize::try_from(at).is_ok_and(|i| UTF8_BOM.get(i) == Some(&b))
                && self.state == QuoteState::FieldStart
            {
                continue;
            }
            self.state = match (self.state, b) {
                (QuoteState::FieldStart, b'"') => {
                    self.opened_at = at;
                    QuoteState::Quoted
                }
                (QuoteState::FieldStart | QuoteState::Unquoted, b',' | b'\n' | b'\r') => {
                    QuoteState::FieldStart
                }
                (QuoteState::FieldStart | QuoteState::Unquoted, b'"') => {
                    self.fail(at, "bare \" in non-quoted field");
                    QuoteState::Unquoted
                }
                (QuoteState::FieldStart | QuoteState::Unquoted, _) => QuoteState::Unquoted,
                (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
                (QuoteState::Quoted, _) => QuoteState::Quoted,
                (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
                (QuoteState::QuoteInQuoted, b',' | b'\n' | b'\r') => QuoteState::FieldStart,
                (QuoteState::QuoteInQuoted, _) => {
                    self.fail(at, "extraneous or missing \" in quoted field");
                    QuoteState::Unquoted
                }
            };
        }
    }

    fn finish(&mut self) {
        if self.state == QuoteState::Quoted {
            self.fail(self.opened_at, "quoted field is never closed");
        }
    }
}

impl<R: Read> Read for QuoteCheck<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 && !buf.is_empty() {
            self.finish();
        }
        self.scan(&buf[..n]);
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(input: &str) -> Option<QuoteFault> {
        let mut q = QuoteCheck::new(input.as_bytes());
        std::io::copy(&mut q, &mut std::io::sink()).unwrap();
        q.fault()
    }

    #[test]
    fn well_formed_quoting_passes() {
        assert_eq!(check(""), None);
        assert_eq!(check("a,b\r\n\"x, y\",\"say \"\"hi\"\"\"\n"), None);
        assert_eq!(check("\"two\nlines\",z\n\"\",\"\"\n"), None);
        assert_eq!(check("\u{feff}\"id\",name\n"), None);
    }

    #[test]
    fn fault_points_at_the_offending_byte() {
        assert_eq!(check("a,b\n1,x\"y\n").map(|f| f.byte), Some(7));
        assert_eq!(check("\"ab\"c,d\n").map(|f| f.byte), Some(4));
        assert_eq!(check("a,b\n1,\"open\n2,3\n").map(|f| f.byte), Some(6));
    }

    #[test]
    fn only_the_first_fault_is_kept() {
        let fault = check("x\"y,\"z\n").unwrap();
        assert_eq!(fault.byte, 1);
        assert_eq!(fault.reason, "bare \" in non-quoted field");
    }
}
