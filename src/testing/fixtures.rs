//! Pre-built CSV inputs for common scenarios.

use crate::io::reader::Row;
use csv::{Terminator, WriterBuilder};
use std::path::{Path, PathBuf};

/// Header with `fields` columns named `col0`, `col1`, ...
#[must_use]
pub fn sample_header(fields: usize) -> Row {
    (0..fields).map(|c| format!("col{c}")).collect()
}

/// `count` data rows of `fields` columns; cell `(r, c)` is `"r{r}c{c}"`.
///
/// Every cell is unique, so rows can be traced back to their input position.
#[must_use]
pub fn numbered_rows(fields: usize, count: usize) -> Vec<Row> {
    (0..count)
        .map(|r| (0..fields).map(|c| format!("r{r}c{c}")).collect())
        .collect()
}

/// [`sample_header`] followed by [`numbered_rows`].
#[must_use]
pub fn rows_with_header(fields: usize, count: usize) -> Vec<Row> {
    let mut rows = Vec::with_capacity(count + 1);
    rows.push(sample_header(fields));
    rows.extend(numbered_rows(fields, count));
    rows
}

/// Rows whose cells need quoting: embedded commas, quotes and newlines.
#[must_use]
pub fn tricky_rows() -> Vec<Row> {
    vec![
        Row::from(vec!["1", "plain", "simple"]),
        Row::from(vec!["2", "with, comma", "a \"quoted\" word"]),
        Row::from(vec!["3", "multi\nline", ""]),
        Row::from(vec!["4", " padded ", "trailing,"]),
    ]
}

/// Write `header` and `rows` as CSV to `dir/name` and return the path.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_csv_fixture(
    dir: impl AsRef<Path>,
    name: &str,
    header: &Row,
    rows: &[Row],
) -> anyhow::Result<PathBuf> {
    let path = dir.as_ref().join(name);
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_path(&path)?;
    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(path)
}

/// Decode a written part back into rows, header included.
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded.
pub fn read_part(path: impl AsRef<Path>) -> anyhow::Result<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path.as_ref())?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        out.push(rec?);
    }
    Ok(out)
}
