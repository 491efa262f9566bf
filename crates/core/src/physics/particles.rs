//! Rain drop emitter: spawn, integrate, cull
//!
//! Each tick the system
//! 1. spawns `floor(spawn_rate × dt)` drops from the well,
//! 2. integrates every drop (including the ones just spawned),
//! 3. removes every drop that fell below the ground.
//!
//! Survivor order is not preserved.

use crate::config::ParticleConfig;
use crate::core_types::rain_drop::RainDrop;
use crate::core_types::units::Seconds;
use crate::physics::Forcing;
use rand::Rng;
use tracing::debug;

/// What a single [`ParticleSystem::update`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParticleStepReport {
    /// Drops spawned this tick
    pub spawned: usize,
    /// Drops removed this tick
    pub culled: usize,
    /// Drops alive after the tick
    pub live: usize,
}

/// The set of live rain drops
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    drops: Vec<RainDrop>,
    config: ParticleConfig,
    spawned_total: u64,
    culled_total: u64,
}

impl ParticleSystem {
    /// Empty system; no drops are spawned until [`spawn`](Self::spawn) or
    /// [`update`](Self::update) is called
    #[must_use]
    pub fn new(config: &ParticleConfig) -> Self {
        ParticleSystem {
            drops: Vec::new(),
            config: config.clone(),
            spawned_total: 0,
            culled_total: 0,
        }
    }

    /// Number of drops a tick of length `dt` spawns: `floor(spawn_rate × dt)`
    #[must_use]
    pub fn spawn_count(&self, dt: Seconds) -> usize {
        (self.config.spawn_rate * *dt).floor() as usize
    }

    /// Launch `count` new drops from the well
    pub fn spawn<R: Rng>(&mut self, count: usize, rng: &mut R) {
        self.drops.reserve(count);
        for _ in 0..count {
            self.drops.push(RainDrop::spawn(&self.config, rng));
        }
        self.spawned_total += count as u64;
    }

    /// Add an already-built drop (scenario set-up)
    pub fn insert(&mut self, drop: RainDrop) {
        self.drops.push(drop);
        self.spawned_total += 1;
    }

    /// Spawn, integrate and cull for one tick
    pub fn update<R: Rng>(
        &mut self,
        dt: Seconds,
        forcing: &Forcing,
        rng: &mut R,
    ) -> ParticleStepReport {
        let spawned = self.spawn_count(dt);
        self.spawn(spawned, rng);

        let coupling = self.config.wind_coupling;
        for drop in &mut self.drops {
            drop.integrate(dt, forcing, coupling);
        }

        let before = self.drops.len();
        self.drops.retain(RainDrop::is_alive);
        let culled = before - self.drops.len();
        self.culled_total += culled as u64;

        debug!(
            "Drops: +{} spawned, -{} culled, {} live",
            spawned,
            culled,
            self.drops.len()
        );

        ParticleStepReport {
            spawned,
            culled,
            live: self.drops.len(),
        }
    }

    /// Live drops, in no particular order
    pub fn drops(&self) -> &[RainDrop] {
        &self.drops
    }

    /// Number of live drops
    pub fn len(&self) -> usize {
        self.drops.len()
    }

    /// Whether no drops are alive
    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Drops spawned since creation
    pub fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    /// Drops removed since creation
    pub fn culled_total(&self) -> u64 {
        self.culled_total
    }

    /// Spawn parameters this system was built with
    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }
}
