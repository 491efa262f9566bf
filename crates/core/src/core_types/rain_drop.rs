//! Rain drop particles
//!
//! A drop is launched from a small ring ("well") on the ground plane with a
//! mostly-upward velocity, arcs under gravity while the wind pushes it
//! sideways, and dies as soon as it falls below `y = 0`.
//!
//! # Integration (semi-implicit Euler, per tick)
//!
//! ```text
//! v.y -= g × dt
//! v   += wind × coupling × dt
//! p   += v × dt
//! alive = p.y >= 0
//! ```

use crate::config::ParticleConfig;
use crate::core_types::sampling::{symmetric_jitter, uniform_angle};
use crate::core_types::units::Seconds;
use crate::core_types::vec3::Vec3;
use crate::physics::Forcing;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single rain drop
///
/// # Example
///
/// ```
/// use rain_cloth_core::{RainDrop, Forcing, Vec3};
/// use rain_cloth_core::core_types::units::Seconds;
///
/// // Straight up at 2 units/s under gravity 2: back on the ground after ~2s
/// let mut drop = RainDrop::new(Vec3::zeros(), Vec3::new(0.0, 2.0, 0.0));
/// let forcing = Forcing { gravity: 2.0, wind: Vec3::zeros() };
/// let dt = Seconds::new(0.001);
/// let mut t = 0.0;
/// while drop.is_alive() {
///     drop.integrate(dt, &forcing, 0.1);
///     t += *dt;
/// }
/// assert!((t - 2.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainDrop {
    pub(crate) position: Vec3,
    pub(crate) velocity: Vec3,
    pub(crate) alive: bool,
}

impl RainDrop {
    /// Create a live drop with an explicit state
    #[must_use]
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        RainDrop {
            position,
            velocity,
            alive: true,
        }
    }

    /// Launch a drop from a random point on the well's rim
    ///
    /// The drop starts on the ground at distance `well_radius` from the
    /// origin, moving outward at `horizontal_speed` along the same heading
    /// and upward at `vertical_speed ± vertical_jitter`.
    pub fn spawn<R: Rng>(config: &ParticleConfig, rng: &mut R) -> Self {
        let (cos, sin) = uniform_angle(rng).to_radians().horizontal_direction();
        let position = Vec3::new(cos * config.well_radius, 0.0, sin * config.well_radius);
        let vertical = config.vertical_speed + symmetric_jitter(rng, config.vertical_jitter);
        let velocity = Vec3::new(
            cos * config.horizontal_speed,
            vertical,
            sin * config.horizontal_speed,
        );
        RainDrop::new(position, velocity)
    }

    /// Advance one tick; marks the drop dead once it drops below the ground
    ///
    /// Dead drops are left untouched.
    pub fn integrate(&mut self, dt: Seconds, forcing: &Forcing, wind_coupling: f64) {
        if !self.alive {
            return;
        }
        let dt = *dt;

        self.velocity.y -= dt * forcing.gravity;
        self.velocity += forcing.wind * (wind_coupling * dt);
        self.position += self.velocity * dt;

        if self.position.y < 0.0 {
            self.alive = false;
        }
    }

    /// Whether the drop is still above ground
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn calm(gravity: f64) -> Forcing {
        Forcing {
            gravity,
            wind: Vec3::zeros(),
        }
    }

    #[test]
    fn test_spawn_on_well_rim() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = ParticleConfig::default();
        for _ in 0..1000 {
            let drop = RainDrop::spawn(&config, &mut rng);
            let p = drop.position();
            assert_eq!(p.y, 0.0);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - 0.2).abs() < 1e-12, "radius {r}");
            assert!(drop.is_alive());
        }
    }

    #[test]
    fn test_spawn_velocity_ranges() {
        let mut rng = StdRng::seed_from_u64(12);
        let config = ParticleConfig::default();
        for _ in 0..1000 {
            let drop = RainDrop::spawn(&config, &mut rng);
            let v = drop.velocity();
            let horizontal = (v.x * v.x + v.z * v.z).sqrt();
            assert!((horizontal - 0.5).abs() < 1e-12);
            assert!((1.95..2.05).contains(&v.y), "vertical speed {}", v.y);

            // Outward: horizontal velocity points the same way as the position
            let p = drop.position();
            assert!(p.x * v.x + p.z * v.z > 0.0);
        }
    }

    #[test]
    fn test_gravity_step() {
        let mut drop = RainDrop::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 0.0));
        drop.integrate(Seconds::new(0.5), &calm(2.0), 0.1);
        // v.y = -1, then y = 1 + (-1 * 0.5)
        assert_eq!(drop.velocity(), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(drop.position(), Vec3::new(0.0, 0.5, 0.0));
        assert!(drop.is_alive());
    }

    #[test]
    fn test_wind_coupling() {
        let forcing = Forcing {
            gravity: 0.0,
            wind: Vec3::new(2.0, 0.0, -1.0),
        };
        let mut drop = RainDrop::new(Vec3::new(0.0, 5.0, 0.0), Vec3::zeros());
        drop.integrate(Seconds::new(1.0), &forcing, 0.1);
        assert!((drop.velocity().x - 0.2).abs() < 1e-12);
        assert!((drop.velocity().z + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_dies_below_ground() {
        let mut drop = RainDrop::new(Vec3::new(0.0, 0.01, 0.0), Vec3::new(0.0, -1.0, 0.0));
        drop.integrate(Seconds::new(0.1), &calm(2.0), 0.1);
        assert!(!drop.is_alive());

        // Dead drops are frozen
        let frozen = drop.clone();
        drop.integrate(Seconds::new(0.1), &calm(2.0), 0.1);
        assert_eq!(drop, frozen);
    }

    #[test]
    fn test_exactly_on_ground_is_alive() {
        let mut drop = RainDrop::new(Vec3::new(0.0, 0.0, 0.0), Vec3::zeros());
        drop.integrate(Seconds::new(0.1), &calm(0.0), 0.1);
        assert!(drop.is_alive());
    }
}
