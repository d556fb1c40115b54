//! Report configuration.
//!
//! Every field has a default that reproduces the stock report: one enabled
//! result file, two alternate runs present but disabled, six competitors.
//! A JSON file may override any subset of fields.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};
use crate::style::{Palette, Rgb, SeriesStyle, default_styles};
use crate::table::DEFAULT_HEADER_ROWS;

/// Constant factor of the reference complexity curves.
pub const DEFAULT_REFERENCE_CONSTANT: f64 = 1e-8;

/// Default image size: an 8x6 inch figure at 100 dpi.
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Competitor labels, in timing-column order.
pub const DEFAULT_SERIES_NAMES: [&str; 6] = [
    "PolyMath F32",
    "PolyMath F64",
    "Boost F32",
    "Boost F64",
    "Clipper",
    "Geos",
];

/// One input file and whether it takes part in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSource {
    pub path: PathBuf,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl InputSource {
    pub fn enabled(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            enabled: true,
        }
    }

    pub fn disabled(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            enabled: false,
        }
    }
}

/// Image format of the written charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            other => Err(ReportError::Config(format!(
                "unknown output format '{}' (expected svg or png)",
                other
            ))),
        }
    }
}

/// Full report configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Result files, in dataset order
    pub inputs: Vec<InputSource>,
    /// Lines skipped at the top of every input file
    pub header_rows: usize,
    /// Competitor labels aligned to the timing columns
    pub series_names: Vec<String>,
    /// Marker/line style per run
    pub styles: Vec<SeriesStyle>,
    /// Competitor colours; empty means the built-in palette
    pub colors: Vec<Rgb>,
    /// Constant `c` of the reference curves
    pub reference_constant: f64,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            inputs: vec![
                InputSource::enabled("benchmark.txt"),
                InputSource::disabled("benchmark_stars.txt"),
                InputSource::disabled("benchmark_circles.txt"),
            ],
            header_rows: DEFAULT_HEADER_ROWS,
            series_names: DEFAULT_SERIES_NAMES.iter().map(|s| s.to_string()).collect(),
            styles: default_styles(),
            colors: Vec::new(),
            reference_constant: DEFAULT_REFERENCE_CONSTANT,
            output_dir: PathBuf::from("."),
            format: OutputFormat::Svg,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl ReportConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
            .map_err(|e| ReportError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Replace the input list with the given files, all enabled.
    pub fn with_inputs<P: Into<PathBuf>>(mut self, paths: impl IntoIterator<Item = P>) -> Self {
        self.inputs = paths.into_iter().map(InputSource::enabled).collect();
        self
    }

    /// Paths of enabled inputs, in order.
    pub fn enabled_inputs(&self) -> Vec<&Path> {
        self.inputs
            .iter()
            .filter(|i| i.enabled)
            .map(|i| i.path.as_path())
            .collect()
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.colors.clone())
    }

    /// File a chart number is written to, e.g. `benchmark-1.svg`.
    pub fn output_path(&self, chart_number: usize) -> PathBuf {
        self.output_dir
            .join(format!("benchmark-{}.{}", chart_number, self.format.extension()))
    }

    /// Reject configurations that cannot produce a report.
    pub fn validate(&self) -> Result<()> {
        if self.enabled_inputs().is_empty() {
            return Err(ReportError::Config("no enabled input files".to_string()));
        }
        if self.series_names.is_empty() {
            return Err(ReportError::Config("series name list is empty".to_string()));
        }
        if !(self.reference_constant.is_finite() && self.reference_constant > 0.0) {
            return Err(ReportError::Config(format!(
                "reference constant must be positive, got {}",
                self.reference_constant
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ReportError::Config(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}
