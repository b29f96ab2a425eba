use rand::Rng;

use crate::color;
use crate::compile::compile;
use crate::error::ValidationError;
use crate::kind::GradientKind;
use crate::stop::{ColorStop, StopEdit, check_position};

/// Smallest stop count a gradient may have.
pub const MIN_STOPS: usize = 2;

pub const DEFAULT_ANGLE: i32 = 90;

/// How [`GradientModel`] treats edited values.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum EditPolicy {
    /// Store whatever is typed; malformed colors reach the CSS verbatim.
    #[default]
    Permissive,
    /// Reject malformed colors, positions outside `[0, 100]` and angles
    /// outside `[0, 360)`.
    Strict,
}

/// Editable gradient state: kind, angle and stops in insertion order.
///
/// Invariant:
/// - `stops.len() >= MIN_STOPS` at all times. Removals that would break it
///   are refused silently.
///
/// Insertion order is the display/editing order. The compiler sorts a copy
/// by position; the stored order never changes because of rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientModel {
    kind: GradientKind,
    angle: i32,
    stops: Vec<ColorStop>,
    policy: EditPolicy,
}

impl GradientModel {
    /// Two-stop `#667eea → #764ba2` linear gradient at 90deg.
    pub fn new() -> Self {
        Self {
            kind: GradientKind::Linear,
            angle: DEFAULT_ANGLE,
            stops: vec![ColorStop::new("#667eea", 0.0), ColorStop::new("#764ba2", 100.0)],
            policy: EditPolicy::Permissive,
        }
    }

    /// Builds a model from explicit state.
    pub fn from_parts(kind: GradientKind, angle: i32, stops: Vec<ColorStop>) -> Result<Self, ValidationError> {
        if stops.len() < MIN_STOPS {
            return Err(ValidationError::TooFewStops { found: stops.len() });
        }
        Ok(Self { kind, angle, stops, policy: EditPolicy::Permissive })
    }

    pub fn with_policy(mut self, policy: EditPolicy) -> Self {
        self.policy = policy;
        self
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn kind(&self) -> GradientKind {
        self.kind
    }

    #[inline]
    pub fn angle(&self) -> i32 {
        self.angle
    }

    /// Stops in insertion order.
    #[inline]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    #[inline]
    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: EditPolicy) {
        self.policy = policy;
    }

    /// Compiles the current state into a CSS `<gradient>` value.
    pub fn css(&self) -> String {
        compile(self.kind, &self.stops, self.angle)
    }

    // ── edits ─────────────────────────────────────────────────────────────

    pub fn add_stop(&mut self) {
        self.add_stop_with(&mut rand::rng());
    }

    /// Appends a random stop. Always succeeds.
    pub fn add_stop_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let stop = ColorStop::random(rng);
        log::debug!("add stop {} at {}%", stop.color, stop.position);
        self.stops.push(stop);
    }

    /// Removes the stop at `index`; returns `true` if it was removed.
    ///
    /// Out-of-range indices and removals below [`MIN_STOPS`] are no-ops.
    pub fn remove_stop(&mut self, index: usize) -> bool {
        if index >= self.stops.len() || self.stops.len() <= MIN_STOPS {
            return false;
        }
        self.stops.remove(index);
        true
    }

    /// Replaces one field of the stop at `index`.
    ///
    /// Returns `Ok(false)` for an out-of-range index. Errors only under
    /// [`EditPolicy::Strict`], in which case nothing is changed.
    pub fn update_stop(&mut self, index: usize, edit: StopEdit) -> Result<bool, ValidationError> {
        let strict = self.policy == EditPolicy::Strict;
        let Some(stop) = self.stops.get_mut(index) else {
            return Ok(false);
        };
        if strict {
            match &edit {
                StopEdit::Color(c) => {
                    color::parse_color(c)?;
                }
                StopEdit::Position(p) => check_position(*p)?,
            }
        }
        match edit {
            StopEdit::Color(c) => stop.color = c,
            StopEdit::Position(p) => stop.position = p,
        }
        Ok(true)
    }

    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::rng());
    }

    /// Replaces every stop with 2–4 random ones and picks a random angle.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let count = rng.random_range(MIN_STOPS..=4);
        self.stops = (0..count).map(|_| ColorStop::random(&mut *rng)).collect();
        self.angle = rng.random_range(0..360);
        log::debug!("randomized: {} stops at {}deg", count, self.angle);
    }

    pub fn set_kind(&mut self, kind: GradientKind) {
        self.kind = kind;
    }

    /// Checks the whole state against the strict rules, whatever the policy.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.stops.iter().try_for_each(ColorStop::validate)?;
        check_angle(self.angle)
    }

    pub fn set_angle(&mut self, angle: i32) -> Result<(), ValidationError> {
        if self.policy == EditPolicy::Strict {
            check_angle(angle)?;
        }
        self.angle = angle;
        Ok(())
    }
}

impl Default for GradientModel {
    fn default() -> Self {
        Self::new()
    }
}

fn check_angle(angle: i32) -> Result<(), ValidationError> {
    if (0..360).contains(&angle) { Ok(()) } else { Err(ValidationError::AngleOutOfRange(angle)) }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn colors(model: &GradientModel) -> Vec<&str> {
        model.stops().iter().map(|s| s.color.as_str()).collect()
    }

    fn is_hex6(s: &str) -> bool {
        s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn default_model() {
        let m = GradientModel::default();
        assert_eq!(m.kind(), GradientKind::Linear);
        assert_eq!(m.angle(), 90);
        assert_eq!(colors(&m), ["#667eea", "#764ba2"]);
        assert_eq!(m.policy(), EditPolicy::Permissive);
        assert_eq!(m.css(), "linear-gradient(90deg, #667eea 0%, #764ba2 100%)");
    }

    #[test]
    fn from_parts_requires_two_stops() {
        let err = GradientModel::from_parts(GradientKind::Conic, 0, vec![ColorStop::new("red", 0.0)]).unwrap_err();
        assert_eq!(err, ValidationError::TooFewStops { found: 1 });
    }

    // ── add / remove ──────────────────────────────────────────────────────

    #[test]
    fn add_stop_appends_random_stop() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut m = GradientModel::new();
        m.add_stop_with(&mut rng);
        assert_eq!(m.stops().len(), 3);
        let added = &m.stops()[2];
        assert!(is_hex6(&added.color));
        assert!((0.0..100.0).contains(&added.position));
        assert_eq!(added.position.fract(), 0.0);
    }

    #[test]
    fn remove_refused_at_two_stops() {
        let mut m = GradientModel::new();
        let before = m.clone();
        assert!(!m.remove_stop(0));
        assert!(!m.remove_stop(1));
        assert_eq!(m, before);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut m = GradientModel::new();
        m.add_stop();
        assert!(!m.remove_stop(3));
        assert_eq!(m.stops().len(), 3);
    }

    #[test]
    fn remove_keeps_insertion_order_of_rest() {
        let stops = vec![ColorStop::new("a", 0.0), ColorStop::new("b", 50.0), ColorStop::new("c", 100.0)];
        let mut m = GradientModel::from_parts(GradientKind::Linear, 90, stops).unwrap();
        assert!(m.remove_stop(1));
        assert_eq!(colors(&m), ["a", "c"]);
    }

    #[test]
    fn any_removal_sequence_keeps_two_stops() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut m = GradientModel::new();
        for _ in 0..6 {
            m.add_stop_with(&mut rng);
        }
        for i in [0, 5, 1, 1, 0, 0, 0, 3, 1, 0] {
            m.remove_stop(i);
            assert!(m.stops().len() >= MIN_STOPS);
        }
        assert_eq!(m.stops().len(), MIN_STOPS);
    }

    // ── update ────────────────────────────────────────────────────────────

    #[test]
    fn permissive_update_stores_anything() {
        let mut m = GradientModel::new();
        assert_eq!(m.update_stop(0, StopEdit::Color("not a color".into())), Ok(true));
        assert_eq!(m.update_stop(1, StopEdit::Position(250.0)), Ok(true));
        assert_eq!(m.stops()[0].color, "not a color");
        assert_eq!(m.stops()[1].position, 250.0);
        assert_eq!(m.css(), "linear-gradient(90deg, not a color 0%, #764ba2 250%)");
    }

    #[test]
    fn update_out_of_range_index() {
        let mut m = GradientModel::new();
        assert_eq!(m.update_stop(7, StopEdit::Position(10.0)), Ok(false));
        assert_eq!(m, GradientModel::new());
    }

    #[test]
    fn strict_out_of_range_index_is_checked_before_value() {
        let mut m = GradientModel::new().with_policy(EditPolicy::Strict);
        assert_eq!(m.update_stop(9, StopEdit::Color("#zz".into())), Ok(false));
        assert_eq!(m.update_stop(9, StopEdit::Position(500.0)), Ok(false));
        assert_eq!(m.update_stop(9, StopEdit::Color("red".into())), Ok(false));
    }

    #[test]
    fn strict_update_rejects_and_leaves_model_unchanged() {
        let mut m = GradientModel::new().with_policy(EditPolicy::Strict);
        let before = m.clone();
        assert_eq!(
            m.update_stop(0, StopEdit::Color("#zzz".into())),
            Err(ValidationError::MalformedColor("#zzz".into()))
        );
        assert_eq!(m.update_stop(0, StopEdit::Position(-1.0)), Err(ValidationError::PositionOutOfRange(-1.0)));
        assert!(m.update_stop(0, StopEdit::Position(f64::NAN)).is_err());
        assert_eq!(m, before);

        assert_eq!(m.update_stop(0, StopEdit::Color("hsl(10, 50%, 50%)".into())), Ok(true));
        assert_eq!(m.update_stop(0, StopEdit::Position(100.0)), Ok(true));
    }

    // ── randomize / kind / angle ──────────────────────────────────────────

    #[test]
    fn randomize_stays_in_bounds() {
        let mut m = GradientModel::new();
        for seed in 0..200 {
            m.randomize_with(&mut StdRng::seed_from_u64(seed));
            assert!((2..=4).contains(&m.stops().len()));
            assert!((0..360).contains(&m.angle()));
            for s in m.stops() {
                assert!((0.0..100.0).contains(&s.position));
                assert!(is_hex6(&s.color), "{}", s.color);
            }
        }
    }

    #[test]
    fn randomize_covers_every_length() {
        let mut m = GradientModel::new();
        let mut seen = [false; 5];
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..300 {
            m.randomize_with(&mut rng);
            seen[m.stops().len()] = true;
        }
        assert_eq!(seen, [false, false, true, true, true]);
    }

    #[test]
    fn set_kind_and_angle() {
        let mut m = GradientModel::new();
        m.set_kind(GradientKind::Conic);
        m.set_angle(45).unwrap();
        assert_eq!(m.css(), "conic-gradient(from 45deg, #667eea 0%, #764ba2 100%)");
        m.set_angle(720).unwrap();
        assert_eq!(m.angle(), 720);
    }

    #[test]
    fn strict_angle_range() {
        let mut m = GradientModel::new().with_policy(EditPolicy::Strict);
        assert_eq!(m.set_angle(360), Err(ValidationError::AngleOutOfRange(360)));
        assert_eq!(m.set_angle(-1), Err(ValidationError::AngleOutOfRange(-1)));
        assert_eq!(m.angle(), 90);
        m.set_angle(359).unwrap();
        assert_eq!(m.angle(), 359);
    }

    #[test]
    fn validate_checks_initial_state() {
        let stops = vec![ColorStop::new("red", 0.0), ColorStop::new("bogus", 100.0)];
        let m = GradientModel::from_parts(GradientKind::Linear, 90, stops).unwrap();
        assert_eq!(m.validate(), Err(ValidationError::MalformedColor("bogus".into())));
        assert!(GradientModel::new().validate().is_ok());
        let m = GradientModel::from_parts(GradientKind::Conic, 400, GradientModel::new().stops().to_vec()).unwrap();
        assert_eq!(m.validate(), Err(ValidationError::AngleOutOfRange(400)));
    }
}
