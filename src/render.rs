//! Drawing chart models with plotters.
//!
//! Both axes are logarithmic. Gaps in a curve split it into separately drawn
//! segments, so a missing timing never gets a line drawn through it.

use std::path::Path;

use log::{debug, info};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::chart::{Bounds, Chart, Corner, Curve};
use crate::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH, OutputFormat, ReportConfig};
use crate::error::{ReportError, Result};
use crate::style::{LineStyle, Marker, Rgb};

// Font sizes
const TITLE_FONT_SIZE: u32 = 28;
const AXIS_LABEL_FONT_SIZE: u32 = 20;
const TICK_LABEL_FONT_SIZE: u32 = 15;
const LEGEND_FONT_SIZE: u32 = 13;

const MARKER_SIZE: i32 = 4;
const LEGEND_SWATCH_WIDTH: i32 = 20;

/// Dash, gap, dot, gap lengths in pixels.
const DASH_DOT_PATTERN: [f64; 4] = [8.0, 3.0, 2.0, 3.0];

type LogChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<LogCoord<f64>, LogCoord<f64>>>;

/// Image size and format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            format: OutputFormat::Svg,
        }
    }
}

impl From<&ReportConfig> for RenderOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            format: config.format,
        }
    }
}

fn render_err<E: std::fmt::Display>(err: E) -> ReportError {
    ReportError::Render(err.to_string())
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn series_label_position(corner: Corner) -> SeriesLabelPosition {
    match corner {
        Corner::UpperRight => SeriesLabelPosition::UpperRight,
        Corner::UpperLeft => SeriesLabelPosition::UpperLeft,
        Corner::LowerLeft => SeriesLabelPosition::LowerLeft,
        Corner::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

/// Tick label for a log axis, e.g. `1e3`.
fn format_log_tick(value: f64) -> String {
    if value <= 0.0 || !value.is_finite() {
        return String::new();
    }
    format!("{:.0e}", value)
}

/// Write one chart to `path` in the requested format.
pub fn render_chart(chart: &Chart, path: &Path, options: &RenderOptions) -> Result<()> {
    let size = (options.width, options.height);
    match options.format {
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_chart(&root, chart)?;
        }
        #[cfg(feature = "ttf")]
        OutputFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_chart(&root, chart)?;
        }
        // Bitmap text needs a font backend
        #[cfg(not(feature = "ttf"))]
        OutputFormat::Png => {
            return Err(ReportError::Render(
                "PNG output requires the `ttf` feature".to_string(),
            ));
        }
    }
    info!("[Report] Wrote '{}' to {}", chart.title, path.display());
    Ok(())
}

/// Draw a chart onto any plotters drawing area and present it.
pub fn draw_chart<DB>(root: &DrawingArea<DB, Shift>, chart: &Chart) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(render_err)?;

    let bounds = chart.bounds().unwrap_or(Bounds {
        x_min: 1.0,
        x_max: 10.0,
        y_min: 1.0,
        y_max: 10.0,
    });

    let mut ctx = ChartBuilder::on(root)
        .caption(chart.title.as_str(), ("sans-serif", TITLE_FONT_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(
            (bounds.x_min..bounds.x_max).log_scale(),
            (bounds.y_min..bounds.y_max).log_scale(),
        )
        .map_err(render_err)?;

    ctx.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_label_formatter(&|x| format_log_tick(*x))
        .y_label_formatter(&|y| format_log_tick(*y))
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()
        .map_err(render_err)?;

    for curve in &chart.curves {
        draw_curve(&mut ctx, curve)?;
    }

    let corner = chart.resolve_legend_corner();
    debug!("[Report] '{}' legend at {:?}", chart.title, corner);

    ctx.configure_series_labels()
        .position(series_label_position(corner))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_curve<DB>(ctx: &mut LogChart<'_, DB>, curve: &Curve) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let color = rgb(curve.color);
    let width = if curve.is_reference() { 2 } else { 1 };
    let stroke = color.stroke_width(width);
    let segments = curve.segments();

    // A labelled curve with nothing to plot still gets its legend entry.
    if segments.is_empty() {
        if let Some(label) = &curve.label {
            ctx.draw_series(LineSeries::new(Vec::<(f64, f64)>::new(), stroke))
                .map_err(render_err)?
                .label(label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(
                        vec![(x, y), (x + LEGEND_SWATCH_WIDTH, y)],
                        color.stroke_width(width),
                    )
                });
        }
        return Ok(());
    }

    for (i, segment) in segments.iter().enumerate() {
        let points = segment.iter().copied();
        let anno = match curve.style.line {
            LineStyle::Solid => ctx.draw_series(LineSeries::new(points, stroke)),
            LineStyle::Dashed => ctx.draw_series(DashedLineSeries::new(points, 8, 5, stroke)),
            LineStyle::DashDot => {
                let pieces = dash_dot_pieces(ctx, segment);
                ctx.draw_series(pieces.into_iter().map(|p| PathElement::new(p, stroke)))
            }
            LineStyle::Dotted => ctx.draw_series(DashedLineSeries::new(points, 2, 4, stroke)),
        }
        .map_err(render_err)?;

        if i == 0 {
            if let Some(label) = &curve.label {
                anno.label(label.as_str()).legend(move |(x, y)| {
                    PathElement::new(
                        vec![(x, y), (x + LEGEND_SWATCH_WIDTH, y)],
                        color.stroke_width(width),
                    )
                });
            }
        }

        draw_markers(ctx, segment, curve.style.marker, color)?;
    }
    Ok(())
}

/// Cut a polyline into the visible pieces of a dash-dot stroke.
///
/// Lengths are measured in pixels. Both axes are logarithmic, so a point a
/// fraction `t` along a drawn edge is a log-space interpolation of its ends.
fn dash_dot_pieces<DB>(ctx: &LogChart<'_, DB>, segment: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>>
where
    DB: DrawingBackend,
{
    let mut pieces = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    let mut phase = 0;
    let mut left = DASH_DOT_PATTERN[0];

    for edge in segment.windows(2) {
        let (a, b) = (edge[0], edge[1]);
        let (pa, pb) = (ctx.backend_coord(&a), ctx.backend_coord(&b));
        let length = f64::from(pb.0 - pa.0).hypot(f64::from(pb.1 - pa.1));
        if length == 0.0 {
            continue;
        }

        let drawing = |phase: usize| phase % 2 == 0;
        if drawing(phase) && current.is_empty() {
            current.push(a);
        }

        let mut t = 0.0;
        while t < 1.0 {
            let step = left / length;
            if t + step >= 1.0 {
                left -= (1.0 - t) * length;
                t = 1.0;
                if drawing(phase) {
                    current.push(b);
                }
            } else {
                t += step;
                let p = log_lerp(a, b, t);
                current.push(p);
                if drawing(phase) {
                    pieces.push(std::mem::take(&mut current));
                }
                phase = (phase + 1) % DASH_DOT_PATTERN.len();
                left = DASH_DOT_PATTERN[phase];
            }
        }
    }

    if current.len() > 1 {
        pieces.push(current);
    }
    pieces
}

fn log_lerp(a: (f64, f64), b: (f64, f64), t: f64) -> (f64, f64) {
    let lerp = |u: f64, v: f64| (u.ln() + (v.ln() - u.ln()) * t).exp();
    (lerp(a.0, b.0), lerp(a.1, b.1))
}

fn draw_markers<DB>(
    ctx: &mut LogChart<'_, DB>,
    points: &[(f64, f64)],
    marker: Marker,
    color: RGBColor,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let style = color.stroke_width(1);
    let points = points.iter().copied();
    match marker {
        Marker::None => {}
        Marker::Point => {
            ctx.draw_series(points.map(|p| Circle::new(p, 2, color.filled())))
                .map_err(render_err)?;
        }
        Marker::Circle => {
            ctx.draw_series(points.map(|p| Circle::new(p, MARKER_SIZE, style)))
                .map_err(render_err)?;
        }
        Marker::Cross => {
            ctx.draw_series(points.map(|p| Cross::new(p, MARKER_SIZE, style)))
                .map_err(render_err)?;
        }
        Marker::Plus => {
            ctx.draw_series(points.map(|p| {
                EmptyElement::at(p)
                    + PathElement::new(vec![(-MARKER_SIZE, 0), (MARKER_SIZE, 0)], style)
                    + PathElement::new(vec![(0, -MARKER_SIZE), (0, MARKER_SIZE)], style)
            }))
            .map_err(render_err)?;
        }
        Marker::Square => {
            ctx.draw_series(points.map(|p| {
                let corners = [(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)];
                EmptyElement::at(p) + Rectangle::new(corners, style)
            }))
            .map_err(render_err)?;
        }
        Marker::Triangle => {
            ctx.draw_series(points.map(|p| TriangleMarker::new(p, MARKER_SIZE, style)))
                .map_err(render_err)?;
        }
    }
    Ok(())
}
