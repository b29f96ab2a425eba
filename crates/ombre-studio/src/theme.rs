//! Light/dark theme.
//!
//! The theme is plain state owned by the session config and handed to the
//! view as a [`Palette`]; nothing global is toggled.

use std::fmt;

use console::{Color, Style};

/// Studio color theme.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Styled palette. Styling is forced on; callers pick
    /// [`Palette::plain`] when the terminal should not get escapes.
    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                title: fg((0x11, 0x18, 0x27)).bold(),
                text: fg((0x37, 0x41, 0x51)),
                muted: fg((0x4b, 0x55, 0x63)),
                code: fg((0x1f, 0x29, 0x37)),
                accent: fg((0x93, 0x33, 0xea)).bold(),
                ok: fg((0x16, 0xa3, 0x4a)).bold(),
                error: fg((0xdc, 0x26, 0x26)),
                surface: [0xff, 0xff, 0xff],
            },
            Theme::Dark => Palette {
                title: fg((0xff, 0xff, 0xff)).bold(),
                text: fg((0xd1, 0xd5, 0xdb)),
                muted: fg((0x9c, 0xa3, 0xaf)),
                code: fg((0x4a, 0xde, 0x80)),
                accent: fg((0xa8, 0x55, 0xf7)).bold(),
                ok: fg((0x22, 0xc5, 0x5e)).bold(),
                error: fg((0xf8, 0x71, 0x71)),
                surface: [0x1f, 0x29, 0x37],
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

/// Per-role styles used by the view.
#[derive(Debug, Clone)]
pub struct Palette {
    pub title: Style,
    pub text: Style,
    pub muted: Style,
    pub code: Style,
    pub accent: Style,
    pub ok: Style,
    pub error: Style,
    /// Backdrop the preview is composited onto.
    pub surface: [u8; 3],
}

impl Palette {
    /// No escape sequences at all (pipes, dumb terminals, tests).
    pub fn plain() -> Self {
        let none = Style::new().force_styling(false);
        Self {
            title: none.clone(),
            text: none.clone(),
            muted: none.clone(),
            code: none.clone(),
            accent: none.clone(),
            ok: none.clone(),
            error: none,
            surface: [0, 0, 0],
        }
    }
}

fn fg(rgb: (u8, u8, u8)) -> Style {
    Style::new().fg(Color::Color256(rgb_to_ansi256(rgb))).force_styling(true)
}

/// Nearest xterm-256 index: the 24-step gray ramp for neutral colors,
/// otherwise the 6×6×6 cube.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        match r {
            0..8 => 16,
            249.. => 231,
            _ => 232 + ((u16::from(r) - 8) * 24 / 247) as u8,
        }
    } else {
        let level = |c: u8| (u16::from(c) * 5 / 255) as u8;
        16 + 36 * level(r) + 6 * level(g) + level(b)
    }
}
