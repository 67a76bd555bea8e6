//! SVG chart backend.

use super::{Anchor, ChartBackend, TextStyle};
use std::fmt::Write;

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// A rendered SVG document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgFigure {
    content: String,
}

impl SvgFigure {
    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_string(self) -> String {
        self.content
    }

    pub fn content_type(&self) -> &'static str {
        SVG_CONTENT_TYPE
    }
}

#[derive(Debug, Default)]
pub struct SvgBackend {
    body: String,
    width: f64,
    height: f64,
}

impl SvgBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChartBackend for SvgBackend {
    type Figure = SvgFigure;

    fn begin(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.body.clear();
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            x,
            y,
            width,
            height,
            escape(fill)
        );
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, width: f64) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{}"/>"#,
            from.0,
            from.1,
            to.0,
            to.1,
            escape(color),
            width
        );
    }

    fn polyline(&mut self, points: &[(f64, f64)], color: &str, width: f64) {
        let coords = points
            .iter()
            .map(|(x, y)| format!("{:.1},{:.1}", x, y))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            self.body,
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            coords,
            escape(color),
            width
        );
    }

    fn marker(&mut self, at: (f64, f64), radius: f64, color: &str) {
        let _ = writeln!(
            self.body,
            r#"<circle cx="{:.1}" cy="{:.1}" r="{}" fill="{}"/>"#,
            at.0,
            at.1,
            radius,
            escape(color)
        );
    }

    fn text(&mut self, at: (f64, f64), text: &str, style: &TextStyle) {
        let anchor = match style.anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        let weight = if style.bold { "bold" } else { "normal" };
        let _ = writeln!(
            self.body,
            r#"<text x="{:.1}" y="{:.1}" font-size="{}" font-weight="{}" text-anchor="{}" fill="{}">{}</text>"#,
            at.0,
            at.1,
            style.size,
            weight,
            anchor,
            escape(&style.color),
            escape(text)
        );
    }

    fn finish(self) -> SvgFigure {
        let content = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        );
        SvgFigure { content }
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
