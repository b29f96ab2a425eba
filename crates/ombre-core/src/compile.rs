//! Gradient state → CSS `<gradient>` text.
//!
//! Pure functions; no state and no failure modes. Color text is not escaped
//! or checked, so a malformed color shows up verbatim in the output.

use std::cmp::Ordering;
use std::fmt::Write as _;

use crate::kind::GradientKind;
use crate::stop::ColorStop;

/// Compiles `stops` into a CSS gradient function for `kind`.
///
/// `angle` is ignored for [`GradientKind::Radial`].
pub fn compile(kind: GradientKind, stops: &[ColorStop], angle: i32) -> String {
    let list = stop_list(stops);
    match kind {
        GradientKind::Linear => format!("linear-gradient({angle}deg, {list})"),
        GradientKind::Radial => format!("radial-gradient(circle, {list})"),
        GradientKind::Conic => format!("conic-gradient(from {angle}deg, {list})"),
    }
}

/// String-kind entry point; unrecognized names use the linear template.
pub fn compile_named(kind: &str, stops: &[ColorStop], angle: i32) -> String {
    compile(GradientKind::from_name_or_default(kind), stops, angle)
}

/// `background: <css>;`
pub fn declaration(css: &str) -> String {
    format!("background: {css};")
}

/// References to `stops` ordered by ascending position.
///
/// The sort is stable, so equal positions keep their insertion order.
/// Incomparable positions (NaN) compare equal.
pub fn sorted_stops(stops: &[ColorStop]) -> Vec<&ColorStop> {
    let mut sorted: Vec<&ColorStop> = stops.iter().collect();
    sorted.sort_by(|a, b| a.position.partial_cmp(&b.position).unwrap_or(Ordering::Equal));
    sorted
}

/// `"<color> <position>%"` entries joined with `", "`, in position order.
pub fn stop_list(stops: &[ColorStop]) -> String {
    let mut out = String::new();
    for (i, stop) in sorted_stops(stops).into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{} {}%", stop.color, format_number(stop.position));
    }
    out
}

/// Shortest round-trip form, written the way JavaScript prints numbers:
/// `50`, `12.5`, `1e-7`, `1e+21`.
///
/// Magnitudes of `1e21` and above, or below `1e-6`, use exponent notation.
/// Negative zero prints as `0` and infinities as `Infinity`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        return String::from(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) && !n.is_nan() {
        let exp = format!("{n:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        };
    }
    n.to_string()
}
