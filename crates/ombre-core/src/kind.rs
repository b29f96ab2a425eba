use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// CSS gradient family.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
    Conic,
}

impl GradientKind {
    pub const ALL: [GradientKind; 3] = [GradientKind::Linear, GradientKind::Radial, GradientKind::Conic];

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            GradientKind::Linear => "linear",
            GradientKind::Radial => "radial",
            GradientKind::Conic => "conic",
        }
    }

    /// Whether the angle is rendered into this kind's output.
    #[inline]
    pub const fn uses_angle(self) -> bool {
        matches!(self, GradientKind::Linear | GradientKind::Conic)
    }

    /// Case-insensitive lookup; `None` for anything that is not a known kind.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|k| k.as_str().eq_ignore_ascii_case(name))
    }

    /// Lenient lookup: unknown names fall back to [`GradientKind::Linear`].
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            log::warn!("unknown gradient kind {name:?}, using linear");
            GradientKind::Linear
        })
    }
}

impl fmt::Display for GradientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradientKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ValidationError::UnknownKind(s.to_string()))
    }
}
