//! Curve styling.
//!
//! Colour identifies a competitor and the marker/line style identifies the
//! run (dataset index). Both are explicit lookups so a chart is a pure
//! function of its inputs.

use serde::{Deserialize, Serialize};

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

/// Point marker drawn at each sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    /// No marker, line only
    None,
    Point,
    Circle,
    Cross,
    Plus,
    Square,
    Triangle,
}

/// Stroke pattern connecting samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
    /// Alternating dash and dot
    DashDot,
    Dotted,
}

/// Marker and line pattern for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub marker: Marker,
    pub line: LineStyle,
}

impl SeriesStyle {
    pub const fn new(marker: Marker, line: LineStyle) -> Self {
        Self { marker, line }
    }

    /// Style of the asymptotic reference curve.
    pub const REFERENCE: SeriesStyle = SeriesStyle::new(Marker::None, LineStyle::Solid);
}

/// Styles for the first four runs: point markers, line pattern varying by run.
pub fn default_styles() -> Vec<SeriesStyle> {
    [
        LineStyle::Solid,
        LineStyle::Dashed,
        LineStyle::DashDot,
        LineStyle::Dotted,
    ]
    .into_iter()
    .map(|line| SeriesStyle::new(Marker::Point, line))
    .collect()
}

/// Style for a dataset index. Wraps when there are more runs than styles.
pub fn style_for_run(styles: &[SeriesStyle], run: usize) -> SeriesStyle {
    if styles.is_empty() {
        return SeriesStyle::new(Marker::Point, LineStyle::Solid);
    }
    styles[run % styles.len()]
}

/// Competitor -> colour mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Default for Palette {
    /// Ten category colours.
    fn default() -> Self {
        Self {
            colors: vec![
                Rgb(31, 119, 180),
                Rgb(255, 127, 14),
                Rgb(44, 160, 44),
                Rgb(214, 39, 40),
                Rgb(148, 103, 189),
                Rgb(140, 86, 75),
                Rgb(227, 119, 194),
                Rgb(127, 127, 127),
                Rgb(188, 189, 34),
                Rgb(23, 190, 207),
            ],
        }
    }
}

impl Palette {
    /// Build a palette from explicit colours. An empty list falls back to the default.
    pub fn new(colors: Vec<Rgb>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    /// Colour for a competitor index, wrapping around the palette.
    pub fn color(&self, competitor: usize) -> Rgb {
        self.colors[competitor % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
