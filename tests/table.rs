//! Tests for table loading and sanitizing

use std::fs;
use std::path::Path;

use polybench_report::table::{BenchmarkTable, DEFAULT_HEADER_ROWS};
use polybench_report::{
    DataLoadError, Dataset, ReportError, load_dataset, load_table, parse_table, sanitize,
};

const HEADER: &str = "\
            Test        Vertices    PolyMath F32    PolyMath F64       Boost F32       Boost F64         Clipper            Geos
--------------------------------------------------------------------------------------------------------------------------------
";

fn sample_text(rows: usize) -> String {
    let mut text = format!("{}\n", HEADER.trim_end());
    // HEADER holds two lines; the blank third completes the header block
    text.push('\n');
    for i in 0..rows {
        let n = (i + 1) as f64 * 10.0;
        text.push_str(&format!(
            "{} {} {} {} {} {} {} {}\n",
            i + 1,
            n,
            n * 1e-7,
            n * 1.1e-7,
            n * 2e-7,
            n * 2.1e-7,
            n * 3e-7,
            0
        ));
    }
    text
}

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn single_row_table(row: Vec<f64>) -> BenchmarkTable {
    BenchmarkTable {
        source: "mem".into(),
        columns: row.len(),
        rows: vec![row],
    }
}

#[test]
fn test_parse_well_formed_table() {
    let table = parse_table("run.txt", &sample_text(5), DEFAULT_HEADER_ROWS).unwrap();
    assert_eq!(table.len(), 5);
    assert_eq!(table.columns, 8);
    assert_eq!(table.timing_columns(), 6);
    assert_eq!(table.rows[0][1], 10.0);
    assert_eq!(table.rows[4][1], 50.0);
}

#[test]
fn test_header_rows_skipped_unconditionally() {
    // Header lines that would parse as numbers are still skipped
    let text = "1 2 3\n4 5 6\n7 8 9\n1 10 0.5\n2 20 1.0\n";
    let table = parse_table("run.txt", text, 3).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0], vec![1.0, 10.0, 0.5]);
}

#[test]
fn test_done_marker_ends_table() {
    let mut text = sample_text(3);
    text.push_str("Done.\n");
    text.push_str("trailing garbage\n");
    let table = parse_table("run.txt", &text, DEFAULT_HEADER_ROWS).unwrap();
    assert_eq!(table.len(), 3);
}

#[test]
fn test_blank_lines_ignored() {
    let text = "h\nh\nh\n\n1 10 0.5\n\n   \n2 20 1.0\n";
    let table = parse_table("run.txt", text, 3).unwrap();
    assert_eq!(table.len(), 2);
}

#[test]
fn test_inconsistent_columns_rejected() {
    let text = "h\nh\nh\n1 10 0.5 0.6\n2 20 1.0\n";
    let err = parse_table("bad.txt", text, 3).unwrap_err();
    match err {
        DataLoadError::ColumnCount {
            line,
            expected,
            found,
            ..
        } => {
            assert_eq!(line, 5);
            assert_eq!(expected, 4);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unparseable_token_rejected() {
    let text = "h\nh\nh\n1 10 0.5\n2 20 fast\n";
    let err = parse_table("bad.txt", text, 3).unwrap_err();
    assert!(matches!(
        err,
        DataLoadError::Parse { line: 5, ref token, .. } if token == "fast"
    ));
}

#[test]
fn test_header_only_file_is_empty_error() {
    let err = parse_table("empty.txt", "h\nh\nh\n", 3).unwrap_err();
    assert!(matches!(err, DataLoadError::Empty { .. }));
}

#[test]
fn test_load_table_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "result.txt", &sample_text(4));

    let table = load_table(&path, DEFAULT_HEADER_ROWS).unwrap();
    assert_eq!(table.len(), 4);
    assert_eq!(table.source, path);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");

    let err = load_table(&missing, DEFAULT_HEADER_ROWS).unwrap_err();
    match err {
        ReportError::DataLoad(DataLoadError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_dataset_keeps_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", &sample_text(2));
    let b = write_file(dir.path(), "b.txt", &sample_text(6));

    let dataset = load_dataset(&[&b, &a], DEFAULT_HEADER_ROWS).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.tables[0].source, b);
    assert_eq!(dataset.tables[0].len(), 6);
    assert_eq!(dataset.tables[1].len(), 2);
}

#[test]
fn test_load_dataset_fails_on_any_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_file(dir.path(), "good.txt", &sample_text(2));
    let bad = write_file(dir.path(), "bad.txt", "h\nh\nh\n1 10 0.5\n2 20\n");

    let err = load_dataset(&[&good, &bad], DEFAULT_HEADER_ROWS).unwrap_err();
    match err {
        ReportError::DataLoad(e) => assert_eq!(e.path(), &bad),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_dataset_requires_paths() {
    let paths: [&Path; 0] = [];
    let err = load_dataset(&paths, DEFAULT_HEADER_ROWS).unwrap_err();
    assert!(matches!(err, ReportError::Config(_)));
}

#[test]
fn test_validate_column_count_against_names() {
    let table = parse_table("narrow.txt", "h\nh\nh\n1 10 0.5 0.6\n", 3).unwrap();
    let dataset = Dataset::new(vec![table]);

    assert!(dataset.validate(&["A", "B"]).is_ok());
    let err = dataset.validate(&["A", "B", "C"]).unwrap_err();
    assert!(matches!(
        err,
        ReportError::DataLoad(DataLoadError::TooFewColumns {
            found: 4,
            required: 5,
            ..
        })
    ));
}

#[test]
fn test_sanitize_replaces_zero_timings() {
    let dataset = Dataset::new(vec![single_row_table(vec![0.0, 0.0, 0.0, 1.5, 0.0])]);
    let clean = sanitize(&dataset);
    let row = &clean.tables[0].rows[0];

    // Parameter and size columns stay zero
    assert_eq!(row[0], 0.0);
    assert_eq!(row[1], 0.0);
    assert!(row[2].is_nan());
    assert_eq!(row[3], 1.5);
    assert!(row[4].is_nan());
    assert_eq!(clean.tables[0].missing_count(), 2);
}

#[test]
fn test_sanitize_leaves_nonzero_values() {
    let dataset = Dataset::new(vec![single_row_table(vec![3.0, 100.0, 1e-9, -0.5, 42.0])]);
    let clean = sanitize(&dataset);
    assert_eq!(clean.tables[0].rows[0], vec![3.0, 100.0, 1e-9, -0.5, 42.0]);
}

#[test]
fn test_sanitize_is_idempotent() {
    let table = parse_table("run.txt", &sample_text(4), DEFAULT_HEADER_ROWS).unwrap();
    let dataset = Dataset::new(vec![table]);

    let once = sanitize(&dataset);
    let twice = sanitize(&once);

    // NaN != NaN, so compare bit patterns
    for (a, b) in once.tables[0].rows.iter().zip(&twice.tables[0].rows) {
        let a: Vec<u64> = a.iter().map(|v| v.to_bits()).collect();
        let b: Vec<u64> = b.iter().map(|v| v.to_bits()).collect();
        assert_eq!(a, b);
    }
}

#[test]
fn test_timings_pairs_size_and_elapsed() {
    let table = parse_table("run.txt", "h\nh\nh\n1 10 1.0\n2 100 0\n3 1000 100.0\n", 3)
        .unwrap()
        .sanitized();

    let timings: Vec<(f64, f64)> = table.timings(0).collect();
    assert_eq!(timings.len(), 3);
    assert_eq!(timings[0], (10.0, 1.0));
    assert_eq!(timings[1].0, 100.0);
    assert!(timings[1].1.is_nan());
    assert_eq!(timings[2], (1000.0, 100.0));
}

#[test]
fn test_short_rows_yield_nan_instead_of_panicking() {
    let table = BenchmarkTable {
        source: "mem".into(),
        columns: 3,
        rows: vec![vec![1.0, 10.0, 2.0], vec![2.0], vec![3.0, 1000.0]],
    };

    let sizes: Vec<f64> = table.input_sizes().collect();
    assert_eq!(sizes[0], 10.0);
    assert!(sizes[1].is_nan());
    assert_eq!(sizes[2], 1000.0);

    let timings: Vec<(f64, f64)> = table.timings(0).collect();
    assert_eq!(timings[0], (10.0, 2.0));
    assert!(timings[1].0.is_nan() && timings[1].1.is_nan());
    assert_eq!(timings[2].0, 1000.0);
    assert!(timings[2].1.is_nan());
}
