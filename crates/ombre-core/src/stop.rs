use rand::Rng;

use crate::color::{parse_color, random_hex};
use crate::error::ValidationError;

/// A single gradient anchor.
///
/// `color` is opaque CSS text (hex, named or functional notation) and is
/// never normalized. `position` is a percentage, nominally `[0, 100]`, but
/// the model does not clamp it.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    pub color: String,
    pub position: f64,
}

impl ColorStop {
    #[inline]
    pub fn new(color: impl Into<String>, position: f64) -> Self {
        Self { color: color.into(), position }
    }

    /// Random `#rrggbb` color at a random integer position in `[0, 100)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            color: random_hex(rng),
            position: f64::from(rng.random_range(0..100u8)),
        }
    }

    /// Strict check: recognizable color and a finite position in `[0, 100]`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        parse_color(&self.color)?;
        check_position(self.position)
    }
}

pub(crate) fn check_position(p: f64) -> Result<(), ValidationError> {
    if p.is_finite() && (0.0..=100.0).contains(&p) {
        Ok(())
    } else {
        Err(ValidationError::PositionOutOfRange(p))
    }
}

/// One field replacement for [`GradientModel::update_stop`](crate::GradientModel::update_stop).
#[derive(Debug, Clone, PartialEq)]
pub enum StopEdit {
    Color(String),
    Position(f64),
}
