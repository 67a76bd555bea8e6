//! Closing-price chart rendering.
//!
//! `render_price_chart` does the layout (axes, ticks, annotations) and sends
//! drawing primitives to a `ChartBackend`. The only numeric work here is the
//! display unscaling of tick and annotation labels.

pub mod svg;

use crate::format::currency;
use crate::models::{scale, unscale, Granularity, PriceSeries};
use chrono::NaiveDateTime;

pub use svg::{SvgBackend, SvgFigure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub anchor: Anchor,
    pub color: String,
}

impl TextStyle {
    pub fn new(size: f64, anchor: Anchor) -> Self {
        Self {
            size,
            bold: false,
            anchor,
            color: "#222222".to_string(),
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Drawing surface. Coordinates are pixels from the top-left corner.
pub trait ChartBackend {
    type Figure;

    fn begin(&mut self, width: f64, height: f64);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str);
    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, width: f64);
    fn polyline(&mut self, points: &[(f64, f64)], color: &str, width: f64);
    fn marker(&mut self, at: (f64, f64), radius: f64, color: &str);
    fn text(&mut self, at: (f64, f64), text: &str, style: &TextStyle);
    fn finish(self) -> Self::Figure;
}

/// Title, labels and styling for one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: String,
    pub currency_suffix: String,
    pub date_format: &'static str,
    pub line_color: &'static str,
    pub marker_color: &'static str,
    pub background: &'static str,
    pub width: f64,
    pub height: f64,
    pub y_ticks: usize,
}

impl ChartSpec {
    pub fn for_granularity(granularity: Granularity, currency_suffix: &str) -> Self {
        let (line_color, date_format) = match granularity {
            Granularity::Daily => ("blue", "%Y-%m-%d"),
            Granularity::Monthly => ("green", "%Y-%m"),
        };

        Self {
            title: granularity.chart_title().to_string(),
            x_label: "Date".to_string(),
            y_label: format!("Closing price ({})", currency_suffix),
            legend: "Close".to_string(),
            currency_suffix: currency_suffix.to_string(),
            date_format,
            line_color,
            marker_color: "red",
            background: "#f7f7f7",
            width: 1300.0,
            height: 800.0,
            y_ticks: 6,
        }
    }
}

const MARGIN_LEFT: f64 = 150.0;
const MARGIN_RIGHT: f64 = 50.0;
const MARGIN_TOP: f64 = 80.0;
const MARGIN_BOTTOM: f64 = 90.0;
const ANNOTATION_OFFSET: f64 = 10.0;

/// Plot area in pixels plus the value range it maps.
#[derive(Debug, Clone, Copy)]
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn y(&self, value: f64) -> f64 {
        let fraction = (value - self.y_min) / (self.y_max - self.y_min);
        self.bottom() - fraction * self.height
    }
}

/// Render a closing-price chart. Returns `None` for an empty series.
pub fn render_price_chart<B: ChartBackend>(
    mut backend: B,
    spec: &ChartSpec,
    series: &PriceSeries,
) -> Option<B::Figure> {
    let scaled = series.scaled();
    if scaled.is_empty() {
        return None;
    }

    let (y_min, y_max) = padded_range(scaled.iter().map(|(_, v)| *v));
    let frame = Frame {
        left: MARGIN_LEFT,
        top: MARGIN_TOP,
        width: spec.width - MARGIN_LEFT - MARGIN_RIGHT,
        height: spec.height - MARGIN_TOP - MARGIN_BOTTOM,
        y_min,
        y_max,
    };

    let positions = x_positions(&scaled, &frame);
    let points: Vec<(f64, f64)> = positions
        .iter()
        .zip(scaled.iter())
        .map(|(&x, (_, value))| (x, frame.y(*value)))
        .collect();

    backend.begin(spec.width, spec.height);
    backend.rect(0.0, 0.0, spec.width, spec.height, "white");
    backend.rect(frame.left, frame.top, frame.width, frame.height, spec.background);

    draw_axes(&mut backend, spec, &frame);
    draw_y_ticks(&mut backend, spec, &frame);

    for ((timestamp, _), (x, _)) in scaled.iter().zip(points.iter()) {
        backend.line((*x, frame.bottom()), (*x, frame.bottom() + 5.0), "#444444", 1.0);
        backend.text(
            (*x, frame.bottom() + 22.0),
            &timestamp.format(spec.date_format).to_string(),
            &TextStyle::new(11.0, Anchor::Middle),
        );
    }

    backend.polyline(&points, spec.line_color, 2.0);

    let annotation_style = TextStyle::new(11.0, Anchor::Middle);
    for ((_, value), &(x, y)) in scaled.iter().zip(points.iter()) {
        backend.marker((x, y), 4.0, spec.marker_color);
        backend.text(
            (x, y - ANNOTATION_OFFSET),
            &currency(unscale(*value), &spec.currency_suffix),
            &annotation_style,
        );
    }

    draw_legend(&mut backend, spec, &frame);

    Some(backend.finish())
}

fn draw_axes<B: ChartBackend>(backend: &mut B, spec: &ChartSpec, frame: &Frame) {
    // Left and bottom spines only
    backend.line(
        (frame.left, frame.top),
        (frame.left, frame.bottom()),
        "#444444",
        1.0,
    );
    backend.line(
        (frame.left, frame.bottom()),
        (frame.right(), frame.bottom()),
        "#444444",
        1.0,
    );

    backend.text(
        (spec.width / 2.0, MARGIN_TOP / 2.0),
        &spec.title,
        &TextStyle::new(14.0, Anchor::Middle).bold(),
    );
    backend.text(
        (frame.left + frame.width / 2.0, spec.height - 25.0),
        &spec.x_label,
        &TextStyle::new(12.0, Anchor::Middle).bold(),
    );
    backend.text(
        (20.0, frame.top - 20.0),
        &spec.y_label,
        &TextStyle::new(12.0, Anchor::Start).bold(),
    );
}

fn draw_y_ticks<B: ChartBackend>(backend: &mut B, spec: &ChartSpec, frame: &Frame) {
    let style = TextStyle::new(11.0, Anchor::End);
    for value in tick_values(frame.y_min, frame.y_max, spec.y_ticks) {
        let y = frame.y(value);
        backend.line((frame.left - 5.0, y), (frame.left, y), "#444444", 1.0);
        backend.text(
            (frame.left - 8.0, y + 4.0),
            &currency(unscale(value), &spec.currency_suffix),
            &style,
        );
    }
}

fn draw_legend<B: ChartBackend>(backend: &mut B, spec: &ChartSpec, frame: &Frame) {
    let x = frame.right() - 110.0;
    let y = frame.top + 20.0;
    backend.rect(x - 10.0, y - 15.0, 110.0, 30.0, "white");
    backend.line((x, y), (x + 30.0, y), spec.line_color, 2.0);
    backend.text(
        (x + 38.0, y + 4.0),
        &spec.legend,
        &TextStyle::new(10.0, Anchor::Start),
    );
}

/// Horizontal positions proportional to elapsed time.
fn x_positions(scaled: &[(NaiveDateTime, f64)], frame: &Frame) -> Vec<f64> {
    let inset = 30.0;
    let usable = frame.width - 2.0 * inset;

    let (first, last) = match (scaled.first(), scaled.last()) {
        (Some((first, _)), Some((last, _))) => (*first, *last),
        _ => return Vec::new(),
    };
    let span = (last - first).num_seconds() as f64;

    scaled
        .iter()
        .map(|(timestamp, _)| {
            if span <= 0.0 {
                frame.left + frame.width / 2.0
            } else {
                let elapsed = (*timestamp - first).num_seconds() as f64;
                frame.left + inset + elapsed / span * usable
            }
        })
        .collect()
}

/// Value range with headroom for the annotations above the top point.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    let spread = max - min;
    let pad = if spread > 0.0 {
        spread * 0.1
    } else if max != 0.0 {
        max.abs() * 0.05
    } else {
        // One currency unit in display scale
        scale(1.0)
    };

    (min - pad, max + pad)
}

fn tick_values(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count < 2 {
        return vec![min];
    }
    let step = (max - min) / (count - 1) as f64;
    (0..count).map(|i| min + step * i as f64).collect()
}
