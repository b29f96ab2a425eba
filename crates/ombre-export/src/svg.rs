//! SVG export.
//!
//! Two modes:
//! - [`SvgMode::Verbatim`] embeds the CSS gradient text as the `fill` of a
//!   rectangle. Most renderers cannot paint that (SVG paint has no gradient
//!   functions), but it is what the web tool always produced.
//! - [`SvgMode::Native`] emits real SVG paint: `<linearGradient>`,
//!   `<radialGradient>`, and a wedge fan for conic gradients, which SVG has
//!   no primitive for.

use std::f64::consts::PI;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use ombre_core::color::{Rgba, parse_color};
use ombre_core::{ColorStop, GradientKind, GradientModel, sorted_stops};

use crate::error::ExportError;

pub const DEFAULT_SVG_NAME: &str = "gradient.svg";
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Wedge count for conic gradients (2° each).
pub const CONIC_SEGMENTS: usize = 180;

const GRADIENT_ID: &str = "ombre";

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum SvgMode {
    Verbatim,
    #[default]
    Native,
}

/// Document size and export mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SvgOptions {
    pub width: u32,
    pub height: u32,
    pub mode: SvgMode,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self { width: 800, height: 600, mode: SvgMode::Native }
    }
}

/// Renders `model` as a standalone SVG document.
pub fn render_svg(model: &GradientModel, options: &SvgOptions) -> String {
    let (w, h) = (options.width, options.height);
    match options.mode {
        SvgMode::Verbatim => verbatim(&model.css(), w, h),
        SvgMode::Native => native(model, w, h),
    }
}

/// Writes `svg` to `path`.
pub fn save_svg(path: &Path, svg: &str) -> Result<(), ExportError> {
    fs::write(path, svg)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn verbatim(css: &str, w: u32, h: u32) -> String {
    format!(
        r#"<svg xmlns="{SVG_NS}" width="{w}" height="{h}"><rect width="{w}" height="{h}" fill="{}"/></svg>"#,
        escape_attr(css)
    )
}

fn native(model: &GradientModel, w: u32, h: u32) -> String {
    let stops = svg_stops(model.stops());
    let (wf, hf) = (f64::from(w), f64::from(h));
    let (cx, cy) = (wf / 2.0, hf / 2.0);

    let mut out = format!(r#"<svg xmlns="{SVG_NS}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#);
    match model.kind() {
        GradientKind::Linear => {
            let [x1, y1, x2, y2] = linear_line(model.angle(), wf, hf);
            let _ = write!(
                out,
                r#"<defs><linearGradient id="{GRADIENT_ID}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                num(x1), num(y1), num(x2), num(y2)
            );
            write_stops(&mut out, &stops);
            let _ = write!(out, r#"</linearGradient></defs><rect width="{w}" height="{h}" fill="url(#{GRADIENT_ID})"/>"#);
        }
        GradientKind::Radial => {
            // `circle` with the default `farthest-corner` size.
            let r = cx.hypot(cy);
            let _ = write!(
                out,
                r#"<defs><radialGradient id="{GRADIENT_ID}" gradientUnits="userSpaceOnUse" cx="{}" cy="{}" r="{}">"#,
                num(cx), num(cy), num(r)
            );
            write_stops(&mut out, &stops);
            let _ = write!(out, r#"</radialGradient></defs><rect width="{w}" height="{h}" fill="url(#{GRADIENT_ID})"/>"#);
        }
        GradientKind::Conic => write_conic_fan(&mut out, &stops, model.angle(), wf, hf),
    }
    out.push_str("</svg>");
    out
}

// ── stops ─────────────────────────────────────────────────────────────────

/// Stop paint: resolved to sRGB when the color syntax is recognized,
/// otherwise the CSS text as typed.
#[derive(Debug, Clone, PartialEq)]
enum StopPaint<'a> {
    Resolved(Rgba),
    Verbatim(&'a str),
}

#[derive(Debug, Clone, PartialEq)]
struct SvgStop<'a> {
    offset: f64,
    paint: StopPaint<'a>,
}

/// Position-sorted stops with offsets clamped to `[0, 1]` and made
/// non-decreasing, as SVG requires.
fn svg_stops(stops: &[ColorStop]) -> Vec<SvgStop<'_>> {
    let mut floor = 0.0_f64;
    sorted_stops(stops)
        .into_iter()
        .map(|stop| {
            let offset = if stop.position.is_nan() { 0.0 } else { (stop.position / 100.0).clamp(0.0, 1.0) };
            floor = floor.max(offset);
            let paint = match parse_color(&stop.color) {
                Ok(rgba) => StopPaint::Resolved(rgba),
                Err(_) => StopPaint::Verbatim(stop.color.as_str()),
            };
            SvgStop { offset: floor, paint }
        })
        .collect()
}

fn write_stops(out: &mut String, stops: &[SvgStop<'_>]) {
    for stop in stops {
        let _ = write!(out, r#"<stop offset="{}""#, num(stop.offset));
        match &stop.paint {
            StopPaint::Resolved(c) => {
                let _ = write!(out, r#" stop-color="{}""#, c.to_hex());
                if c.a < 1.0 {
                    let _ = write!(out, r#" stop-opacity="{}""#, num(f64::from(c.a)));
                }
            }
            StopPaint::Verbatim(text) => {
                let _ = write!(out, r#" stop-color="{}""#, escape_attr(text));
            }
        }
        out.push_str("/>");
    }
}

// ── geometry ──────────────────────────────────────────────────────────────

/// CSS gradient line for `angle` over a `w × h` box: `[x1, y1, x2, y2]`.
///
/// 0deg points up and angles grow clockwise. The line passes through the
/// center and is long enough that the corners hit the 0% and 100% stops.
fn linear_line(angle: i32, w: f64, h: f64) -> [f64; 4] {
    let (sin, cos) = (f64::from(angle) * PI / 180.0).sin_cos();
    let half = ((w * sin).abs() + (h * cos).abs()) / 2.0;
    let (cx, cy) = (w / 2.0, h / 2.0);
    let (dx, dy) = (sin * half, -cos * half);
    [cx - dx, cy - dy, cx + dx, cy + dy]
}

/// Point at `deg` (CSS bearing: 0 = up, clockwise) on a circle.
fn bearing_point(cx: f64, cy: f64, r: f64, deg: f64) -> (f64, f64) {
    let (sin, cos) = (deg * PI / 180.0).sin_cos();
    (cx + r * sin, cy - r * cos)
}

/// Ramp over the stops that resolve to a color, through `colorgrad`.
///
/// Positions outside the first/last offset hold the end colors; equal
/// offsets form a hard edge. `None` when no stop resolves.
fn conic_ramp(stops: &[SvgStop<'_>]) -> Option<colorgrad::Gradient> {
    let (mut colors, mut domain): (Vec<colorgrad::Color>, Vec<f64>) = stops
        .iter()
        .filter_map(|s| match &s.paint {
            StopPaint::Resolved(c) => {
                let alpha = (c.a * 255.0).round().clamp(0.0, 255.0) as u8;
                Some((colorgrad::Color::from_rgba8(c.r, c.g, c.b, alpha), s.offset))
            }
            StopPaint::Verbatim(text) => {
                log::warn!("conic export skips unresolvable color {text:?}");
                None
            }
        })
        .unzip();

    let first = colors.first()?.clone();
    if colors.len() == 1 || domain.first() == domain.last() {
        colors = vec![first.clone(), first];
        domain = vec![0.0, 1.0];
    }

    let mut builder = colorgrad::CustomGradient::new();
    builder.colors(&colors).domain(&domain);
    match builder.build() {
        Ok(ramp) => Some(ramp),
        Err(e) => {
            log::warn!("conic ramp rejected: {e}");
            None
        }
    }
}

fn ramp_at(ramp: &colorgrad::Gradient, t: f64) -> Rgba {
    let c = ramp.at(t);
    let [r, g, b, _] = c.to_rgba8();
    Rgba { r, g, b, a: (c.a as f32).clamp(0.0, 1.0) }
}

fn write_conic_fan(out: &mut String, stops: &[SvgStop<'_>], from: i32, w: f64, h: f64) {
    let Some(ramp) = conic_ramp(stops) else {
        let _ = write!(out, r#"<rect width="{}" height="{}" fill="none"/>"#, num(w), num(h));
        return;
    };

    let (cx, cy) = (w / 2.0, h / 2.0);
    // Past the corners so the wedges' straight outer edge still covers them.
    let r = cx.hypot(cy) * 1.05 + 1.0;
    let step = 360.0 / CONIC_SEGMENTS as f64;

    out.push_str("<g>");
    for i in 0..CONIC_SEGMENTS {
        let t = (i as f64 + 0.5) / CONIC_SEGMENTS as f64;
        let color = ramp_at(&ramp, t);
        let start = f64::from(from) + i as f64 * step;
        // Overlap the next wedge slightly to hide anti-aliasing seams.
        let end = start + step + if i + 1 < CONIC_SEGMENTS { step * 0.25 } else { 0.0 };
        let (x0, y0) = bearing_point(cx, cy, r, start);
        let (x1, y1) = bearing_point(cx, cy, r, end);
        let _ = write!(
            out,
            r#"<path d="M{} {}L{} {}L{} {}Z" fill="{}""#,
            num(cx), num(cy), num(x0), num(y0), num(x1), num(y1),
            color.to_hex()
        );
        if color.a < 1.0 {
            let _ = write!(out, r#" fill-opacity="{}""#, num(f64::from(color.a)));
        }
        out.push_str("/>");
    }
    out.push_str("</g>");
}

// ── text ──────────────────────────────────────────────────────────────────

fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// Coordinates rounded to 3 decimals, without trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
