use csvsplit::testing::*;
use csvsplit::{ErrorKind, Row, SplitConfig, SplitError, split_file};
use std::fs;
use std::path::PathBuf;

#[test]
fn scenario_a_three_parts_for_250k_rows() -> anyhow::Result<()> {
    let tmp = TempDirPath::new()?;
    let header = sample_header(3);
    let rows = numbered_rows(3, 250_000);
    let input = write_csv_fixture(tmp.path(), "big.csv", &header, &rows)?;

    let summary = split_file(&SplitConfig::new(&input).with_output_path(tmp.file_path("out/big.csv")))?;

    let counts: Vec<usize> = summary.parts.iter().map(|p| p.rows).collect();
    assert_eq!(counts, vec![100_000, 100_000, 50_000]);
    assert_eq!(summary.data_rows(), 250_000);

    let mut joined = Vec::new();
    for (i, part) in summary.parts.iter().enumerate() {
        assert_eq!(part.index, i);
        assert_eq!(part.path, tmp.file_path(&format!("out/{i}_big.csv")));
        let content = read_part(&part.path)?;
        assert_eq!(content[0], header);
        assert_eq!(content.len(), part.rows + 1);
        joined.extend(content.into_iter().skip(1));
    }
    assert_eq!(joined, rows);
    Ok(())
}

#[test]
fn scenario_b_header_only_produces_no_parts() -> anyhow::Result<()> {
    let tmp = TempDirPath::new()?;
    let input = write_csv_fixture(tmp.path(), "head.csv", &sample_header(4), &[])?;

    let summary = split_file(&SplitConfig::new(&input))?;

    assert!(summary.parts.is_empty());
    assert_eq!(summary.header, Some(sample_header(4)));
    assert_eq!(tmp.file_names()?, vec!["head.csv".to_string()]);
    Ok(())
}

#[test]
fn scenario_c_small_input_fits_one_part() -> anyhow::Result<()> {
    let tmp = TempDirPath::new()?;
    let header = sample_header(2);
    let rows = numbered_rows(2, 5);
    let input = write_csv_fixture(tmp.path(), "small.csv", &header, &rows)?;

    let summary = split_file(&SplitConfig::new(&input))?;

    assert_eq!(summary.parts.len(), 1);
    let part = &summary.parts[0];
    assert_eq!(part.path, tmp.file_path("0_small.csv"));
    assert_eq!(part.rows, 5);
    let content = fs::read_to_string(&part.path)?;
    assert_eq!(
        content,
        "col0,col1\nr0c0,r0c1\nr1c0,r1c1\nr2c0,r2c1\nr3c0,r3c1\nr4c0,r4c1\n"
    );
    Ok(())
}

#[test]
fn scenario_d_non_positive_lines_is_a_configuration_error() -> anyhow::Result<()> {
    let tmp = TempDirPath::new()?;
    let input = write_csv_fixture(tmp.path(), "in.csv", &sample_header(2), &numbered_rows(2, 3))?;

    for lines in [0, -1, -250] {
        let config = SplitConfig::new(&input)
            .with_output_path(tmp.file_path("out/in.csv"))
            .with_lines_per_file(lines);
        let err = split_file(&config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(matches!(err, SplitError::InvalidLinesPerFile(n) if n == lines));
    }
    // Rejected before the output directory was created.
    assert_eq!(tmp.file_names()?, vec!["in.csv".to_string()]);
    Ok(())
}

#[test]
fn scenario_e_missing_input_is_a_configuration_error() -> anyhow::Result<()> {
    let tmp = TempDirPath::new()?;
    let missing = tmp.file_path("nope.csv");

    let err = split_file(&SplitConfig::new(&missing)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(matches!(&err, SplitError::InputNotFound(p) if *p == missing));
    assert!(err.to_string().contains("does not exist"));
    assert!(tmp.file_names()?.is_empty());
    Ok(())
}

#[test]
fn output_directory_is_created_with_parents() -> anyhow::Result<()> {
    let tmp = TempDirPath::new()?;
    let input = write_csv_fixture(tmp.path(), "in.csv", &sample_header(2), &numbered_rows(2, 3))?;
    let out = tmp.file_path("a/b/c/parts.csv");

    let summary = split_file(&SplitConfig::new(&input).with_output_path(&out).with_lines_per_file(2))?;

    let names: Vec<PathBuf> = summary.parts.iter().map(|p| p.path.clone()).collect();
    assert_eq!(
        names,
        vec![tmp.file_path("a/b/c/0_parts.csv"), tmp.file_path("a/b/c/1_parts.csv")]
    );
    assert!(names.iter().all(|p| p.is_file()));
    Ok(())
}

#[test]
fn existing_part_files_are_truncated() -> anyhow::Result<()> {
    let tmp = TempDirPath::new()?;
    let input = write_csv_fixture(tmp.path(), "in.csv", &sample_header(1), &numbered_rows(1, 1))?;
    fs::write(tmp.file_path("0_in.csv"), "stale\nstale\nstale\nstale\n")?;

    split_file(&SplitConfig::new(&input))?;

    assert_eq!(fs::read_to_string(tmp.file_path("0_in.csv"))?, "col0\nr0c0\n");
    Ok(())
}

#[test]
fn quoted_fields_survive_the_split() -> anyhow::Result<()> {
    let tmp = TempDirPath::new()?;
    let header = Row::from(vec!["id", "name", "note"]);
    let rows = tricky_rows();
    let input = write_csv_fixture(tmp.path(), "q.csv", &header, &rows)?;

    let summary = split_file(&SplitConfig::new(&input).with_lines_per_file(3))?;

    assert_eq!(summary.parts.len(), 2);
    let first = read_part(&summary.parts[0].path)?;
    let second = read_part(&summary.parts[1].path)?;
    assert_eq!(first[0], header);
    assert_eq!(second[0], header);
    assert_eq!(&first[1..], &rows[..3]);
    assert_eq!(&second[1..], &rows[3..]);
    Ok(())
}

#[test]
fn malformed_record_aborts_and_keeps_earlier_parts() -> anyhow::Result<()> {
    let tmp = TempDirPath::new()?;
    let input = tmp.file_path("bad.csv");
    fs::write(&input, "a,b\n1,2\n3,4\n5,6\n7\n9,10\n")?;

    let err = split_file(&SplitConfig::new(&input).with_lines_per_file(2)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decoding);
    assert!(matches!(err, SplitError::Decode { record: 5, .. }));
    assert_eq!(
        tmp.file_names()?,
        vec!["0_bad.csv".to_string(), "bad.csv".to_string()]
    );
    Ok(())
}

#[test]
fn trailing_separator_in_output_path_is_rejected() -> anyhow::Result<()> {
    let tmp = TempDirPath::new()?;
    let input = write_csv_fixture(tmp.path(), "in.csv", &sample_header(1), &numbered_rows(1, 1))?;
    let out = format!("{}/", tmp.file_path("out").display());

    let err = split_file(&SplitConfig::new(&input).with_output_path(out)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    Ok(())
}

#[test]
fn summary_carries_metrics() -> anyhow::Result<()> {
    let tmp = TempDirPath::new()?;
    let input = write_csv_fixture(tmp.path(), "m.csv", &sample_header(2), &numbered_rows(2, 7))?;

    let summary = split_file(&SplitConfig::new(&input).with_lines_per_file(3))?;

    assert_eq!(summary.metrics.counter("rows_read"), 8);
    assert_eq!(summary.metrics.counter("data_rows"), 7);
    assert_eq!(summary.metrics.counter("parts_written"), 3);
    assert!(summary.elapsed().is_some());
    Ok(())
}
