//! Random draws shared by drop spawning and wind resampling
//!
//! All helpers take the random source as a parameter so callers decide
//! whether a run is reproducible (seeded `StdRng`) or not (entropy-seeded).

use crate::core_types::units::Degrees;
use rand::Rng;

/// Heading uniformly distributed in [0°, 360°)
pub fn uniform_angle<R: Rng>(rng: &mut R) -> Degrees {
    Degrees::new(rng.random_range(0.0..360.0))
}

/// Uniform value in [0, 1)
pub fn unit_interval<R: Rng>(rng: &mut R) -> f64 {
    rng.random::<f64>()
}

/// Uniform value in [-`half_width`, `half_width`); zero when `half_width` is zero
pub fn symmetric_jitter<R: Rng>(rng: &mut R, half_width: f64) -> f64 {
    if half_width <= 0.0 {
        return 0.0;
    }
    rng.random_range(-half_width..half_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_angle_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let a = *uniform_angle(&mut rng);
            assert!((0.0..360.0).contains(&a), "angle {a} out of range");
        }
    }

    #[test]
    fn test_unit_interval_range() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut sum = 0.0;
        for _ in 0..10_000 {
            let u = unit_interval(&mut rng);
            assert!((0.0..1.0).contains(&u));
            sum += u;
        }
        let mean = sum / 10_000.0;
        assert!((mean - 0.5).abs() < 0.02, "mean {mean} far from 0.5");
    }

    #[test]
    fn test_jitter_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..10_000 {
            let j = symmetric_jitter(&mut rng, 0.05);
            assert!((-0.05..0.05).contains(&j));
        }
        assert_eq!(symmetric_jitter(&mut rng, 0.0), 0.0);
    }

    #[test]
    fn test_seeded_draws_repeat() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(*uniform_angle(&mut a), *uniform_angle(&mut b));
        }
    }
}
