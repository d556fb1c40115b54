//! Chart model for the two benchmark figures.
//!
//! Building a chart is a pure function of the dataset, the series names and
//! the styles: it produces curves (with gaps where timings are missing),
//! legend labels and axis text. Drawing happens separately in [`crate::render`].

use crate::config::DEFAULT_REFERENCE_CONSTANT;
use crate::style::{Palette, Rgb, SeriesStyle, style_for_run};
use crate::table::Dataset;

/// Number of samples on the reference curve.
pub const REFERENCE_SAMPLES: usize = 71;

/// Reference curve spans `10^REFERENCE_MIN_EXP ..= 10^REFERENCE_MAX_EXP`.
pub const REFERENCE_MIN_EXP: f64 = 1.0;
pub const REFERENCE_MAX_EXP: f64 = 8.0;

/// Legend label of the reference curve.
pub const REFERENCE_LABEL: &str = "O(n·log n)";

pub const X_LABEL: &str = "Vertices";

/// Which of the two figures to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Elapsed seconds vs. input size
    AbsoluteTime,
    /// Elapsed seconds per vertex vs. input size
    NormalizedTime,
}

impl ChartKind {
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::AbsoluteTime => "Benchmark 1",
            ChartKind::NormalizedTime => "Benchmark 2",
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            ChartKind::AbsoluteTime => "Time (s)",
            ChartKind::NormalizedTime => "Time/vertex (s)",
        }
    }

    fn legend(&self) -> LegendPlacement {
        match self {
            ChartKind::AbsoluteTime => LegendPlacement::Best,
            // Normalized curves run flat or downward, leaving the upper left free.
            ChartKind::NormalizedTime => LegendPlacement::Corner(Corner::UpperLeft),
        }
    }

    /// Plotted y value for a sample.
    fn y_value(&self, input_size: f64, elapsed: f64) -> f64 {
        match self {
            ChartKind::AbsoluteTime => elapsed,
            ChartKind::NormalizedTime => elapsed / input_size,
        }
    }

    fn reference(&self) -> ReferenceKind {
        match self {
            ChartKind::AbsoluteTime => ReferenceKind::Linearithmic,
            ChartKind::NormalizedTime => ReferenceKind::Logarithmic,
        }
    }
}

/// Shape of a reference complexity curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `c * x * ln(x)`
    Linearithmic,
    /// `c * ln(x)`, the linearithmic curve divided by `x`
    Logarithmic,
}

impl ReferenceKind {
    pub fn value(&self, c: f64, x: f64) -> f64 {
        match self {
            ReferenceKind::Linearithmic => c * x * x.ln(),
            ReferenceKind::Logarithmic => c * x.ln(),
        }
    }
}

/// `n` logarithmically spaced values from `10^lo_exp` to `10^hi_exp` inclusive.
pub fn log_space(lo_exp: f64, hi_exp: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![10f64.powf(lo_exp)],
        _ => {
            let step = (hi_exp - lo_exp) / (n - 1) as f64;
            (0..n)
                .map(|i| 10f64.powf(lo_exp + step * i as f64))
                .collect()
        }
    }
}

/// Reference curve sampled on a log-spaced grid.
pub fn reference_curve(
    kind: ReferenceKind,
    c: f64,
    samples: usize,
    lo_exp: f64,
    hi_exp: f64,
) -> Curve {
    let points = log_space(lo_exp, hi_exp, samples)
        .into_iter()
        .map(|x| Some((x, kind.value(c, x))))
        .collect();

    Curve {
        label: Some(REFERENCE_LABEL.to_string()),
        color: Rgb::BLACK,
        style: SeriesStyle::REFERENCE,
        kind: CurveKind::Reference,
        points,
    }
}

/// What a curve represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// Competitor timings from one run
    Series { competitor: usize, run: usize },
    Reference,
}

/// One polyline of a chart. `None` entries are gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Legend label; `None` for curves without a legend entry
    pub label: Option<String>,
    pub color: Rgb,
    pub style: SeriesStyle,
    pub kind: CurveKind,
    pub points: Vec<Option<(f64, f64)>>,
}

impl Curve {
    /// Plotted points, gaps skipped.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().flatten().copied()
    }

    /// Runs of consecutive points between gaps.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        self.points
            .split(Option::is_none)
            .filter(|run| !run.is_empty())
            .map(|run| run.iter().flatten().copied().collect())
            .collect()
    }

    pub fn is_reference(&self) -> bool {
        self.kind == CurveKind::Reference
    }
}

/// Corner of the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

impl Corner {
    /// Order tried when several corners are equally empty.
    const PREFERENCE: [Corner; 4] = [
        Corner::UpperRight,
        Corner::UpperLeft,
        Corner::LowerLeft,
        Corner::LowerRight,
    ];
}

/// Where the legend goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPlacement {
    /// Least crowded corner
    Best,
    Corner(Corner),
}

/// Log-safe data range of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Padding factor applied on each side of the data range (a quarter decade).
const BOUNDS_PADDING: f64 = 1.778_279_410_038_922_8;

/// A complete chart description.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub curves: Vec<Curve>,
    pub legend: LegendPlacement,
}

impl Chart {
    /// Labels in draw order.
    pub fn legend_entries(&self) -> Vec<&str> {
        self.curves
            .iter()
            .filter_map(|c| c.label.as_deref())
            .collect()
    }

    /// Competitor curves, reference excluded.
    pub fn series_curves(&self) -> impl Iterator<Item = &Curve> {
        self.curves.iter().filter(|c| !c.is_reference())
    }

    pub fn reference(&self) -> Option<&Curve> {
        self.curves.iter().find(|c| c.is_reference())
    }

    /// Curve for one competitor and run.
    pub fn curve(&self, competitor: usize, run: usize) -> Option<&Curve> {
        self.curves
            .iter()
            .find(|c| c.kind == CurveKind::Series { competitor, run })
    }

    /// Points that can be drawn on log-log axes.
    fn log_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.curves
            .iter()
            .flat_map(|c| c.points())
            .filter(|&(x, y)| x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0)
    }

    /// Padded range of all log-drawable points, or `None` when there are none.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.log_points().peekable();
        points.peek()?;

        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for (x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        Some(Bounds {
            x_min: x_min / BOUNDS_PADDING,
            x_max: x_max * BOUNDS_PADDING,
            y_min: y_min / BOUNDS_PADDING,
            y_max: y_max * BOUNDS_PADDING,
        })
    }

    /// Corner the legend is drawn in.
    ///
    /// `Best` picks the corner quadrant (in log-log space) holding the fewest
    /// points.
    pub fn resolve_legend_corner(&self) -> Corner {
        if let LegendPlacement::Corner(corner) = self.legend {
            return corner;
        }
        let Some(bounds) = self.bounds() else {
            return Corner::PREFERENCE[0];
        };

        let x_mid = (bounds.x_min.log10() + bounds.x_max.log10()) / 2.0;
        let y_mid = (bounds.y_min.log10() + bounds.y_max.log10()) / 2.0;

        let mut counts = [0usize; 4];
        for (x, y) in self.log_points() {
            let right = x.log10() >= x_mid;
            let upper = y.log10() >= y_mid;
            let corner = match (upper, right) {
                (true, true) => Corner::UpperRight,
                (true, false) => Corner::UpperLeft,
                (false, false) => Corner::LowerLeft,
                (false, true) => Corner::LowerRight,
            };
            counts[corner_index(corner)] += 1;
        }

        Corner::PREFERENCE
            .into_iter()
            .min_by_key(|&c| counts[corner_index(c)])
            .unwrap_or(Corner::UpperRight)
    }
}

fn corner_index(corner: Corner) -> usize {
    match corner {
        Corner::UpperRight => 0,
        Corner::UpperLeft => 1,
        Corner::LowerLeft => 2,
        Corner::LowerRight => 3,
    }
}

/// Colours and reference constant shared by both figures.
#[derive(Debug, Clone)]
pub struct ChartSettings {
    pub palette: Palette,
    pub reference_constant: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            reference_constant: DEFAULT_REFERENCE_CONSTANT,
        }
    }
}

/// Build a figure from a sanitized dataset.
///
/// Curves are ordered competitor-major, run-minor, followed by the reference.
/// Only the first run of each competitor carries a legend label.
pub fn build_chart<S: AsRef<str>>(
    kind: ChartKind,
    dataset: &Dataset,
    names: &[S],
    styles: &[SeriesStyle],
    settings: &ChartSettings,
) -> Chart {
    let mut curves = Vec::with_capacity(names.len() * dataset.len() + 1);

    for (competitor, name) in names.iter().enumerate() {
        let color = settings.palette.color(competitor);
        for (run, table) in dataset.iter().enumerate() {
            let points = table
                .timings(competitor)
                .map(|(size, elapsed)| {
                    let y = kind.y_value(size, elapsed);
                    y.is_finite().then_some((size, y))
                })
                .collect();

            curves.push(Curve {
                label: (run == 0).then(|| name.as_ref().to_string()),
                color,
                style: style_for_run(styles, run),
                kind: CurveKind::Series { competitor, run },
                points,
            });
        }
    }

    curves.push(reference_curve(
        kind.reference(),
        settings.reference_constant,
        REFERENCE_SAMPLES,
        REFERENCE_MIN_EXP,
        REFERENCE_MAX_EXP,
    ));

    Chart {
        title: kind.title().to_string(),
        x_label: X_LABEL.to_string(),
        y_label: kind.y_label().to_string(),
        curves,
        legend: kind.legend(),
    }
}

/// "Benchmark 1": elapsed seconds vs. vertices with an `n·log n` reference.
pub fn absolute_time_chart<S: AsRef<str>>(
    dataset: &Dataset,
    names: &[S],
    styles: &[SeriesStyle],
) -> Chart {
    build_chart(
        ChartKind::AbsoluteTime,
        dataset,
        names,
        styles,
        &ChartSettings::default(),
    )
}

/// "Benchmark 2": seconds per vertex vs. vertices with a `log n` reference.
pub fn normalized_time_chart<S: AsRef<str>>(
    dataset: &Dataset,
    names: &[S],
    styles: &[SeriesStyle],
) -> Chart {
    build_chart(
        ChartKind::NormalizedTime,
        dataset,
        names,
        styles,
        &ChartSettings::default(),
    )
}
