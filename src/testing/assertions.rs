//! Assertions for split output.

use crate::io::reader::Row;
use crate::testing::mock_io::MemoryPart;

/// Assert that `parts` is a correct split of `input` with the given header.
///
/// Checks, with a descriptive panic message on failure:
/// - every part starts with `header`
/// - part indices are exactly `0..parts.len()`
/// - no part is empty and none exceeds `lines_per_file` rows
/// - every part except the last holds exactly `lines_per_file` rows
/// - the parts' rows, concatenated in order, equal `input`
///
/// # Panics
///
/// Panics if any of the checks fail.
pub fn assert_valid_split(parts: &[MemoryPart], header: &Row, input: &[Row], lines_per_file: usize) {
    for (i, part) in parts.iter().enumerate() {
        assert_eq!(part.index, i, "part indices must be dense, got {} at position {i}", part.index);
        assert_eq!(&part.header, header, "part {i} does not start with the input header");
        assert!(!part.rows.is_empty(), "part {i} has no data rows");
        assert!(
            part.rows.len() <= lines_per_file,
            "part {i} has {} rows, limit is {lines_per_file}",
            part.rows.len()
        );
        if i + 1 < parts.len() {
            assert_eq!(
                part.rows.len(),
                lines_per_file,
                "part {i} is not the last part but is not full"
            );
        }
    }

    let joined: Vec<&Row> = parts.iter().flat_map(|p| p.rows.iter()).collect();
    let expected: Vec<&Row> = input.iter().collect();
    assert_eq!(
        joined.len(),
        expected.len(),
        "parts hold {} rows, input has {}",
        joined.len(),
        expected.len()
    );
    assert_eq!(joined, expected, "parts do not reproduce the input rows in order");
}

/// Expected data-row count of each part for `total` rows split by `lines_per_file`.
///
/// # Example
///
/// ```
/// use csvsplit::testing::expected_part_sizes;
///
/// assert_eq!(expected_part_sizes(250_000, 100_000), vec![100_000, 100_000, 50_000]);
/// assert!(expected_part_sizes(0, 10).is_empty());
/// ```
#[must_use]
pub fn expected_part_sizes(total: usize, lines_per_file: usize) -> Vec<usize> {
    let full = total / lines_per_file;
    let mut sizes = vec![lines_per_file; full];
    if total % lines_per_file != 0 {
        sizes.push(total % lines_per_file);
    }
    sizes
}
