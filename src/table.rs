//! Benchmark tables: loading and sanitizing.
//!
//! The benchmark driver writes one whitespace-delimited row per test:
//!
//! ```text
//!             Test        Vertices    PolyMath F32 ...
//!                1              16      1.2345e-06 ...
//!                2              36      2.9021e-06 ...
//! Done.
//! ```
//!
//! Column 0 is the test number, column 1 the input vertex count and every
//! further column the elapsed seconds for one competitor. A timing of exactly
//! zero means the competitor was not run for that size.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{DataLoadError, ReportError, Result};

/// Number of header lines the driver emits before the first data row.
pub const DEFAULT_HEADER_ROWS: usize = 3;

/// Column holding the free parameter (test number).
pub const PARAM_COLUMN: usize = 0;

/// Column holding the input size.
pub const SIZE_COLUMN: usize = 1;

/// First timing column.
pub const FIRST_TIMING_COLUMN: usize = 2;

/// Line the driver prints after the last row.
const END_MARKER: &str = "Done.";

/// One parsed input file.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkTable {
    /// File the table was loaded from
    pub source: PathBuf,
    /// Number of columns shared by every row
    pub columns: usize,
    /// Data rows, header excluded
    pub rows: Vec<Vec<f64>>,
}

impl BenchmarkTable {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of timing columns (competitors) in this table.
    pub fn timing_columns(&self) -> usize {
        self.columns.saturating_sub(FIRST_TIMING_COLUMN)
    }

    /// Input sizes, one per row. A row too short to hold a size yields NaN.
    pub fn input_sizes(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| cell(row, SIZE_COLUMN))
    }

    /// `(input_size, elapsed)` pairs for one competitor, in row order.
    ///
    /// Missing timings come through as NaN once the table is sanitized.
    pub fn timings(&self, competitor: usize) -> impl Iterator<Item = (f64, f64)> + '_ {
        let column = FIRST_TIMING_COLUMN + competitor;
        self.rows
            .iter()
            .map(move |row| (cell(row, SIZE_COLUMN), cell(row, column)))
    }

    /// Copy of the table with zero timings replaced by NaN.
    ///
    /// Parameter and size columns are left alone even when zero. NaN is never
    /// equal to zero, so sanitizing twice is the same as sanitizing once.
    pub fn sanitized(&self) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(col, &value)| {
                        if col >= FIRST_TIMING_COLUMN && value == 0.0 {
                            f64::NAN
                        } else {
                            value
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            source: self.source.clone(),
            columns: self.columns,
            rows,
        }
    }

    /// Number of missing (NaN) timing cells.
    pub fn missing_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter().skip(FIRST_TIMING_COLUMN))
            .filter(|v| v.is_nan())
            .count()
    }
}

fn cell(row: &[f64], column: usize) -> f64 {
    row.get(column).copied().unwrap_or(f64::NAN)
}

/// All tables of one report, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub tables: Vec<BenchmarkTable>,
}

impl Dataset {
    pub fn new(tables: Vec<BenchmarkTable>) -> Self {
        Self { tables }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BenchmarkTable> {
        self.tables.iter()
    }

    /// Check that every table has a timing column for each series name.
    pub fn validate<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        let required = FIRST_TIMING_COLUMN + names.len();
        for table in &self.tables {
            if table.columns < required {
                return Err(DataLoadError::TooFewColumns {
                    path: table.source.clone(),
                    found: table.columns,
                    required,
                }
                .into());
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a BenchmarkTable;
    type IntoIter = std::slice::Iter<'a, BenchmarkTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

/// Replace zero timings with NaN in every table.
pub fn sanitize(dataset: &Dataset) -> Dataset {
    Dataset::new(dataset.tables.iter().map(BenchmarkTable::sanitized).collect())
}

/// Parse a table from in-memory text.
///
/// `source` only names the table in errors. The first `header_rows` lines are
/// skipped unconditionally, blank lines are ignored and a `Done.` line ends
/// the table.
pub fn parse_table(
    source: impl AsRef<Path>,
    text: &str,
    header_rows: usize,
) -> std::result::Result<BenchmarkTable, DataLoadError> {
    let source = source.as_ref();
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut columns: Option<usize> = None;

    for (idx, line) in text.lines().enumerate().skip(header_rows) {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == END_MARKER {
            break;
        }

        let row = trimmed
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| DataLoadError::Parse {
                    path: source.to_path_buf(),
                    line: line_no,
                    token: token.to_string(),
                })
            })
            .collect::<std::result::Result<Vec<f64>, _>>()?;

        match columns {
            None => columns = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(DataLoadError::ColumnCount {
                    path: source.to_path_buf(),
                    line: line_no,
                    expected,
                    found: row.len(),
                });
            }
            Some(_) => {}
        }
        rows.push(row);
    }

    let Some(columns) = columns else {
        return Err(DataLoadError::Empty {
            path: source.to_path_buf(),
        });
    };
    if columns < FIRST_TIMING_COLUMN {
        return Err(DataLoadError::TooFewColumns {
            path: source.to_path_buf(),
            found: columns,
            required: FIRST_TIMING_COLUMN,
        });
    }

    Ok(BenchmarkTable {
        source: source.to_path_buf(),
        columns,
        rows,
    })
}

/// Load a single table from disk.
pub fn load_table(path: impl AsRef<Path>, header_rows: usize) -> Result<BenchmarkTable> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_table(path, &text, header_rows)?;
    debug!(
        "[Load] {}: {} rows x {} columns",
        path.display(),
        table.len(),
        table.columns
    );
    Ok(table)
}

/// Load one table per path, in order.
///
/// Stops at the first failing file; nothing is returned for the others.
pub fn load_dataset<P: AsRef<Path>>(paths: &[P], header_rows: usize) -> Result<Dataset> {
    if paths.is_empty() {
        return Err(ReportError::Config("no input files".to_string()));
    }

    let tables = paths
        .iter()
        .map(|p| load_table(p, header_rows))
        .collect::<Result<Vec<_>>>()?;

    info!(
        "[Load] {} tables, {} rows total",
        tables.len(),
        tables.iter().map(BenchmarkTable::len).sum::<usize>()
    );
    Ok(Dataset::new(tables))
}
