//! Rain and cloth simulation context
//!
//! `SimulationContext` owns everything a tick touches: the configuration, the
//! wind, the live drops, the cloth, the simulated clock and the random
//! source. A tick runs, in order:
//!
//! 1. advance the clock by `dt`
//! 2. resample the wind if its period has elapsed
//! 3. spawn, integrate and cull drops
//! 4. relax and integrate the cloth
//!
//! Drops and cloth read the same [`Forcing`] value, so both see the wind as
//! it stood after step 2.

pub mod runner;

pub use runner::{run, run_with, FixedStep, Platform, RunSummary, WallClock};

use crate::config::SimulationConfig;
use crate::core_types::units::Seconds;
use crate::core_types::vec3::Vec3;
use crate::core_types::wind::WindField;
use crate::error::ConfigError;
use crate::physics::{ClothGrid, Forcing, ParticleStepReport, ParticleSystem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

/// What a single [`SimulationContext::step`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Tick number, starting at 1
    pub tick: u64,
    /// Simulated clock after the tick
    pub clock: Seconds,
    /// Length of the tick
    pub dt: Seconds,
    /// Whether the wind was resampled during the tick
    pub wind_changed: bool,
    /// Drop bookkeeping for the tick
    pub particles: ParticleStepReport,
}

/// Owner of all simulation state
///
/// The random source is a type parameter so tests can inject a seeded
/// generator; the default is [`StdRng`].
///
/// # Example
///
/// ```
/// use rain_cloth_core::{Seconds, SimulationConfig, SimulationContext};
///
/// let mut sim = SimulationContext::seeded(SimulationConfig::default(), 7)?;
/// for _ in 0..60 {
///     sim.step(Seconds::new(1.0 / 60.0));
/// }
/// assert!(sim.particles().len() > 900);
/// assert_eq!(sim.ticks(), 60);
/// # Ok::<(), rain_cloth_core::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct SimulationContext<R: Rng = StdRng> {
    config: SimulationConfig,
    wind: WindField,
    particles: ParticleSystem,
    cloth: ClothGrid,
    clock: Seconds,
    ticks: u64,
    rng: R,
}

impl SimulationContext<StdRng> {
    /// Context driven by a [`StdRng`] seeded with `seed`
    ///
    /// # Errors
    /// Returns the validation error if `config` is invalid.
    pub fn seeded(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Context driven by a [`StdRng`] seeded from the thread-local generator
    ///
    /// # Errors
    /// Returns the validation error if `config` is invalid.
    pub fn from_entropy(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::new(config, StdRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> SimulationContext<R> {
    /// Validate `config`, build the wind, drops and cloth, and launch the
    /// initial drops
    ///
    /// # Errors
    /// Returns the validation error if `config` is invalid.
    pub fn new(config: SimulationConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let wind = WindField::new(&config.wind);
        let mut particles = ParticleSystem::new(&config.particles);
        particles.spawn(config.particles.initial_drops, &mut rng);
        let cloth = ClothGrid::new(&config.cloth);

        info!(
            "Simulation created: {}x{} cloth ({} pinned), {} drops/s, gravity {}",
            cloth.cols(),
            cloth.rows(),
            cloth.pinned_cells().count(),
            config.particles.spawn_rate,
            config.gravity
        );

        Ok(SimulationContext {
            config,
            wind,
            particles,
            cloth,
            clock: Seconds::ZERO,
            ticks: 0,
            rng,
        })
    }

    /// Advance the whole scene by `dt`
    ///
    /// `dt` is used as given. Ticks longer than
    /// [`SimulationConfig::stability_warning_dt`] log a warning because the
    /// quadratic cloth pull can overshoot at large steps.
    pub fn step(&mut self, dt: Seconds) -> TickReport {
        if dt > self.config.stability_warning_dt {
            warn!(
                "Tick of {} exceeds {}; the cloth may become unstable",
                dt, self.config.stability_warning_dt
            );
        }

        self.clock += dt;
        self.ticks += 1;

        let wind_changed = self.wind.maybe_update(self.clock, &mut self.rng);
        let forcing = self.forcing();
        let particles = self.particles.update(dt, &forcing, &mut self.rng);
        self.cloth.step(dt, &forcing);

        TickReport {
            tick: self.ticks,
            clock: self.clock,
            dt,
            wind_changed,
            particles,
        }
    }

    /// Forcing the next tick would apply (gravity plus the current wind)
    #[must_use]
    pub fn forcing(&self) -> Forcing {
        Forcing {
            gravity: self.config.gravity,
            wind: self.wind.vector(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn wind(&self) -> &WindField {
        &self.wind
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// Mutable drop set, for scenario set-up
    pub fn particles_mut(&mut self) -> &mut ParticleSystem {
        &mut self.particles
    }

    pub fn cloth(&self) -> &ClothGrid {
        &self.cloth
    }

    /// Mutable cloth, for scenario set-up
    pub fn cloth_mut(&mut self) -> &mut ClothGrid {
        &mut self.cloth
    }

    /// Simulated time: the sum of every `dt` stepped so far
    pub fn clock(&self) -> Seconds {
        self.clock
    }

    /// Number of ticks stepped so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Snapshot of the counters the drivers report
    #[must_use]
    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            ticks: self.ticks,
            clock: self.clock,
            live_drops: self.particles.len(),
            spawned_drops: self.particles.spawned_total(),
            culled_drops: self.particles.culled_total(),
            wind: self.wind.vector(),
            last_wind_change: self.wind.last_change(),
            cloth_lowest_point: self
                .cloth
                .positions()
                .iter()
                .map(|p| p.y)
                .fold(f64::NEG_INFINITY, f64::max),
            cloth_max_stretch: self.cloth.max_stretch(),
        }
    }
}

/// Statistics for the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationStats {
    pub ticks: u64,
    pub clock: Seconds,
    pub live_drops: usize,
    pub spawned_drops: u64,
    pub culled_drops: u64,
    pub wind: Vec3,
    pub last_wind_change: Seconds,
    /// Largest cloth `y` (the cloth hangs toward `+y`)
    pub cloth_lowest_point: f64,
    /// Largest separation between tied cloth cells
    pub cloth_max_stretch: f64,
}
