//! CSS color syntax recognition.
//!
//! Scope:
//! - random stop colors (`#rrggbb`)
//! - well-formedness checks for the strict edit policy
//! - resolution to sRGB bytes, for exporters that cannot consume CSS text
//!   directly
//!
//! Parsing is done by `csscolorparser`. Colors in the model stay opaque
//! strings; nothing here rewrites them.

use rand::Rng;

use crate::error::ValidationError;

/// Straight-alpha sRGB color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f32,
}

impl Rgba {
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0.0 }
    }

    /// `#rrggbb`, alpha dropped.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<csscolorparser::Color> for Rgba {
    fn from(c: csscolorparser::Color) -> Self {
        let [r, g, b, _] = c.to_rgba8();
        Rgba { r, g, b, a: (c.a as f32).clamp(0.0, 1.0) }
    }
}

/// Uniformly samples the 24-bit RGB space, formatted as lowercase `#rrggbb`.
pub fn random_hex<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#{:06x}", rng.random_range(0..=0x00ff_ffffu32))
}

/// `true` when `text` is a color this module can resolve.
pub fn is_well_formed(text: &str) -> bool {
    parse_color(text).is_ok()
}

/// Resolves any CSS color `csscolorparser` understands: hex, named,
/// `rgb()`, `hsl()`, `hwb()`, `lab()`, `lch()`, `oklab()`, `oklch()`.
pub fn parse_color(text: &str) -> Result<Rgba, ValidationError> {
    if text.trim().eq_ignore_ascii_case("transparent") {
        return Ok(Rgba::transparent());
    }
    csscolorparser::parse(text)
        .map(Rgba::from)
        .map_err(|_| ValidationError::MalformedColor(text.to_string()))
}
