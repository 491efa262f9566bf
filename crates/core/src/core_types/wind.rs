//! Shared horizontal wind that changes direction and strength periodically
//!
//! The wind is the only external forcing besides gravity. Both the drops and
//! the cloth read it by value once per tick. It starts calm and, once more
//! than [`WindConfig::period`] has passed since the last change, jumps to a
//! new random heading with a magnitude in `[min, min + span)`:
//!
//! ```text
//! angle ~ U[0°, 360°)
//! m     = min + u × span,   u ~ U[0, 1)
//! wind  = (cos(angle) × m, 0, sin(angle) × m)
//! ```

use crate::config::WindConfig;
use crate::core_types::sampling::{uniform_angle, unit_interval};
use crate::core_types::units::Seconds;
use crate::core_types::vec3::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Periodically resampled wind vector
///
/// # Example
///
/// ```
/// use rain_cloth_core::config::WindConfig;
/// use rain_cloth_core::core_types::units::Seconds;
/// use rain_cloth_core::WindField;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let mut wind = WindField::new(&WindConfig::default());
///
/// assert!(!wind.maybe_update(Seconds::new(10.0), &mut rng)); // not strictly past the period
/// assert!(wind.maybe_update(Seconds::new(10.5), &mut rng));
/// assert!((1.0..4.0).contains(&wind.magnitude()));
/// assert_eq!(wind.vector().y, 0.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindField {
    pub(crate) vector: Vec3,
    pub(crate) last_change: Seconds,
    pub(crate) period: Seconds,
    pub(crate) min_magnitude: f64,
    pub(crate) magnitude_span: f64,
}

impl WindField {
    /// Calm wind whose clock starts at zero
    #[must_use]
    pub fn new(config: &WindConfig) -> Self {
        WindField {
            vector: Vec3::zeros(),
            last_change: Seconds::ZERO,
            period: config.period,
            min_magnitude: config.min_magnitude,
            magnitude_span: config.magnitude_span,
        }
    }

    /// Resample the wind if strictly more than one period has passed since
    /// the last change
    ///
    /// Returns `true` when a new wind was drawn. Otherwise nothing changes.
    pub fn maybe_update<R: Rng>(&mut self, now: Seconds, rng: &mut R) -> bool {
        if now.since(self.last_change) <= self.period {
            return false;
        }

        let angle = uniform_angle(rng);
        let magnitude = self.min_magnitude + unit_interval(rng) * self.magnitude_span;
        let (cos, sin) = angle.to_radians().horizontal_direction();
        self.vector = Vec3::new(cos * magnitude, 0.0, sin * magnitude);
        self.last_change = now;

        info!(
            "Wind change at {}: heading {}, magnitude {:.2} -> ({:.2}, {:.2}, {:.2})",
            now, angle, magnitude, self.vector.x, self.vector.y, self.vector.z
        );
        true
    }

    /// Current wind vector (copied, so callers sample it by value)
    #[must_use]
    pub fn vector(&self) -> Vec3 {
        self.vector
    }

    /// Current wind strength
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.vector.norm()
    }

    /// Clock value at the most recent change (zero if the wind never changed)
    #[must_use]
    pub fn last_change(&self) -> Seconds {
        self.last_change
    }

    /// Minimum time between changes
    #[must_use]
    pub fn period(&self) -> Seconds {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_starts_calm() {
        let wind = WindField::new(&WindConfig::default());
        assert_eq!(wind.vector(), Vec3::zeros());
        assert_eq!(wind.last_change(), Seconds::ZERO);
        assert_eq!(wind.period(), WindConfig::default().period);
    }

    #[test]
    fn test_custom_period_is_honoured() {
        let mut rng = StdRng::seed_from_u64(6);
        let config = WindConfig {
            period: Seconds::new(2.0),
            ..WindConfig::default()
        };
        let mut wind = WindField::new(&config);
        assert_eq!(wind.period(), Seconds::new(2.0));
        assert!(!wind.maybe_update(Seconds::new(2.0), &mut rng));
        assert!(wind.maybe_update(Seconds::new(2.5), &mut rng));
        assert_eq!(wind.last_change(), Seconds::new(2.5));
    }

    #[test]
    fn test_no_change_within_period() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut wind = WindField::new(&WindConfig::default());
        for t in 0..100 {
            let now = Seconds::new(f64::from(t) * 0.1);
            assert!(!wind.maybe_update(now, &mut rng), "changed at {now}");
        }
        assert_eq!(wind.vector(), Vec3::zeros());
    }

    #[test]
    fn test_change_records_timestamp_and_range() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut wind = WindField::new(&WindConfig::default());
        let mut now = Seconds::ZERO;
        let mut changes = 0;
        for _ in 0..1000 {
            now += Seconds::new(0.37);
            let previous = wind.last_change();
            if wind.maybe_update(now, &mut rng) {
                changes += 1;
                assert!(*now - *previous > 10.0);
                assert_eq!(wind.last_change(), now);
                let m = wind.magnitude();
                assert!((1.0..4.0).contains(&m), "magnitude {m}");
                assert_eq!(wind.vector().y, 0.0);
            }
        }
        // 370 seconds with changes every ~10.4 seconds
        assert!(changes >= 30, "only {changes} changes");
    }

    #[test]
    fn test_vector_is_a_copy() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut wind = WindField::new(&WindConfig::default());
        let before = wind.vector();
        wind.maybe_update(Seconds::new(20.0), &mut rng);
        assert_eq!(before, Vec3::zeros());
        assert_ne!(wind.vector(), before);
    }
}
