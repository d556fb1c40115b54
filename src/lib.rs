//! # PolyBench Report
//!
//! Log-log charts for polygon union benchmark results.
//!
//! This library provides:
//! - Loading of the whitespace-delimited timing tables written by the benchmark driver
//! - Sanitizing of unmeasured (zero) timings into gaps
//! - Two chart models: absolute time and time per vertex, each with a reference
//!   complexity curve
//! - SVG/PNG rendering with plotters
//!
//! ## Quick Start
//!
//! ```rust
//! use polybench_report::{Dataset, absolute_time_chart, default_styles, parse_table, sanitize};
//!
//! let text = "Test Vertices Clipper\n\n\n1 10 1.0\n2 100 0\n3 1000 100.0\n";
//! let table = parse_table("run.txt", text, 3).unwrap();
//! let dataset = sanitize(&Dataset::new(vec![table]));
//!
//! let chart = absolute_time_chart(&dataset, &["Clipper"], &default_styles());
//! assert_eq!(chart.legend_entries(), vec!["Clipper", "O(n·log n)"]);
//!
//! // The unmeasured size 100 leaves a gap
//! let points: Vec<_> = chart.curve(0, 0).unwrap().points().collect();
//! assert_eq!(points, vec![(10.0, 1.0), (1000.0, 100.0)]);
//! ```

use std::path::PathBuf;

use log::{info, warn};

// Unified error handling
pub mod error;
pub use error::{DataLoadError, ReportError, Result};

// Timing tables: loading and sanitizing
pub mod table;
pub use table::{
    BenchmarkTable, DEFAULT_HEADER_ROWS, Dataset, load_dataset, load_table, parse_table, sanitize,
};

// Marker/line styles and the competitor palette
pub mod style;
pub use style::{LineStyle, Marker, Palette, Rgb, SeriesStyle, default_styles};

// Report configuration (inputs, names, output)
pub mod config;
pub use config::{InputSource, OutputFormat, ReportConfig};

// Chart models
pub mod chart;
pub use chart::{
    Chart, ChartKind, ChartSettings, Corner, Curve, CurveKind, LegendPlacement, ReferenceKind,
    absolute_time_chart, build_chart, log_space, normalized_time_chart, reference_curve,
};

// Plotters rendering
pub mod render;
pub use render::{RenderOptions, render_chart};

// ============================================================================
// Report Pipeline
// ============================================================================

/// A loaded dataset and the two figures built from it.
#[derive(Debug, Clone)]
pub struct Report {
    /// Sanitized tables, one per enabled input
    pub dataset: Dataset,
    /// Absolute time chart followed by the normalized chart
    pub charts: Vec<Chart>,
}

/// Load, check and sanitize the enabled inputs, then build both charts.
///
/// Nothing is drawn; a loading failure leaves no partial report.
pub fn build_report(config: &ReportConfig) -> Result<Report> {
    config.validate()?;

    let inputs = config.enabled_inputs();
    let disabled = config.inputs.len() - inputs.len();
    if disabled > 0 {
        info!("[Report] {} input(s) disabled", disabled);
    }

    let raw = load_dataset(&inputs, config.header_rows)?;
    raw.validate(&config.series_names)?;

    let dataset = sanitize(&raw);
    for table in &dataset {
        let missing = table.missing_count();
        if missing > 0 {
            warn!(
                "[Report] {}: {} unmeasured timing(s) left as gaps",
                table.source.display(),
                missing
            );
        }
        if table.timing_columns() > config.series_names.len() {
            info!(
                "[Report] {}: ignoring {} unnamed timing column(s)",
                table.source.display(),
                table.timing_columns() - config.series_names.len()
            );
        }
    }

    let settings = ChartSettings {
        palette: config.palette(),
        reference_constant: config.reference_constant,
    };
    let charts = [ChartKind::AbsoluteTime, ChartKind::NormalizedTime]
        .into_iter()
        .map(|kind| build_chart(kind, &dataset, &config.series_names, &config.styles, &settings))
        .collect();

    Ok(Report { dataset, charts })
}

/// Build the report and write both charts into the output directory.
///
/// Returns the written files in chart order.
pub fn generate_report(config: &ReportConfig) -> Result<Vec<PathBuf>> {
    let report = build_report(config)?;
    std::fs::create_dir_all(&config.output_dir)?;

    let options = RenderOptions::from(config);
    let mut written = Vec::with_capacity(report.charts.len());
    for (i, chart) in report.charts.iter().enumerate() {
        let path = config.output_path(i + 1);
        render_chart(chart, &path, &options)?;
        written.push(path);
    }
    Ok(written)
}
