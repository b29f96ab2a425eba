//! Terminal swatch: the native SVG rasterized into half-block cells.

use std::fmt::Write as _;

use ombre_core::GradientModel;
use ombre_export::{ExportError, SvgMode, SvgOptions, rasterize, render_svg};

const HALF_BLOCK: char = '\u{2580}';

// Raw 24-bit SGR: `console::Color` stops at the 256-color palette, which
// bands a gradient visibly.

/// Renders `model` as `rows` lines of `cols` cells.
///
/// Each cell is two pixels: the upper one as foreground of `▀`, the lower
/// one as background. Translucent pixels are blended onto `surface`.
pub fn render_preview(model: &GradientModel, cols: u32, rows: u32, surface: [u8; 3]) -> Result<String, ExportError> {
    let height = rows * 2;
    let options = SvgOptions { width: cols, height, mode: SvgMode::Native };
    let pixmap = rasterize(&render_svg(model, &options), cols, height)?;

    let blend = |x: u32, y: u32| -> [u8; 3] {
        let Some(p) = pixmap.pixel(x, y) else {
            return surface;
        };
        // Premultiplied: out = src + dst * (1 - a).
        let keep = 255 - u16::from(p.alpha());
        let over = |c: u8, s: u8| (u16::from(c) + u16::from(s) * keep / 255).min(255) as u8;
        [over(p.red(), surface[0]), over(p.green(), surface[1]), over(p.blue(), surface[2])]
    };

    let mut out = String::new();
    for row in 0..rows {
        for x in 0..cols {
            let [tr, tg, tb] = blend(x, row * 2);
            let [br, bg, bb] = blend(x, row * 2 + 1);
            let _ = write!(out, "\x1b[38;2;{tr};{tg};{tb}m\x1b[48;2;{br};{bg};{bb}m{HALF_BLOCK}");
        }
        out.push_str("\x1b[0m\n");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use ombre_core::{ColorStop, GradientKind};

    use super::*;

    #[test]
    fn one_cell_per_column_and_a_reset_per_row() {
        let out = render_preview(&GradientModel::new(), 8, 3, [255, 255, 255]).unwrap();
        assert_eq!(out.lines().count(), 3);
        assert_eq!(out.matches(HALF_BLOCK).count(), 24);
        assert_eq!(out.matches("\x1b[0m\n").count(), 3);
    }

    #[test]
    fn solid_gradient_paints_its_color() {
        let stops = vec![ColorStop::new("#ff0000", 0.0), ColorStop::new("#ff0000", 100.0)];
        let model = GradientModel::from_parts(GradientKind::Linear, 90, stops).unwrap();
        let out = render_preview(&model, 4, 2, [0, 0, 0]).unwrap();
        assert!(out.starts_with("\x1b[38;2;255;0;0m\x1b[48;2;255;0;0m"));
    }

    #[test]
    fn transparent_stops_show_the_surface() {
        let stops = vec![ColorStop::new("transparent", 0.0), ColorStop::new("transparent", 100.0)];
        let model = GradientModel::from_parts(GradientKind::Radial, 0, stops).unwrap();
        let out = render_preview(&model, 2, 1, [31, 41, 55]).unwrap();
        assert!(out.starts_with("\x1b[38;2;31;41;55m\x1b[48;2;31;41;55m"));
    }

    #[test]
    fn zero_width_is_an_error() {
        assert!(render_preview(&GradientModel::new(), 0, 4, [0, 0, 0]).is_err());
    }
}
