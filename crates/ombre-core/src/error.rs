use thiserror::Error;

/// Rejections raised by strict edits and strict parsing.
///
/// The default [`EditPolicy::Permissive`](crate::model::EditPolicy) never
/// produces these from stop edits; values are stored as typed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("malformed color {0:?}")]
    MalformedColor(String),

    #[error("position {0} is outside 0..=100")]
    PositionOutOfRange(f64),

    #[error("angle {0} is outside 0..360")]
    AngleOutOfRange(i32),

    #[error("unknown gradient kind {0:?} (expected linear, radial or conic)")]
    UnknownKind(String),

    #[error("a gradient needs at least 2 color stops, got {found}")]
    TooFewStops { found: usize },
}
