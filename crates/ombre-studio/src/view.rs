//! Text rendering of the studio screen.
//!
//! Pure: the same model, palette and status always produce the same text.

use std::fmt::Write as _;

use ombre_core::compile::format_number;
use ombre_core::{GradientKind, GradientModel, declaration};

use crate::theme::Palette;

/// One-line message under the CSS output.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Transient screen state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Status {
    pub copied: bool,
    pub notice: Option<Notice>,
}

pub fn render(model: &GradientModel, palette: &Palette, status: &Status) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", palette.title.apply_to("CSS Gradient Generator"));
    let _ = writeln!(out, "{}", palette.muted.apply_to("Create beautiful gradients for your designs"));
    out.push('\n');

    let kinds: Vec<String> = GradientKind::ALL
        .iter()
        .map(|&k| {
            if k == model.kind() {
                palette.accent.apply_to(format!("[{k}]")).to_string()
            } else {
                palette.muted.apply_to(format!(" {k} ")).to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{} {}", palette.text.apply_to("Gradient Type"), kinds.join(" "));

    if model.kind().uses_angle() {
        let _ = writeln!(out, "{} {}°", palette.text.apply_to("Angle:"), model.angle());
    }

    out.push('\n');
    let _ = writeln!(out, "{}", palette.title.apply_to("Color Stops"));
    for (i, stop) in model.stops().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {} {:<24} {}%",
            palette.text.apply_to(format!("{:<8}", format!("Color {}", i + 1))),
            stop.color,
            format_number(stop.position)
        );
    }

    out.push('\n');
    let _ = writeln!(out, "{}", palette.title.apply_to("CSS Code"));
    let _ = writeln!(out, "  {}", palette.code.apply_to(declaration(&model.css())));

    if status.copied {
        let _ = writeln!(out, "{}", palette.ok.apply_to("Copied!"));
    }
    match &status.notice {
        Some(Notice::Info(msg)) => {
            let _ = writeln!(out, "{}", palette.muted.apply_to(msg));
        }
        Some(Notice::Error(msg)) => {
            let _ = writeln!(out, "{}", palette.error.apply_to(msg));
        }
        None => {}
    }
    out
}
