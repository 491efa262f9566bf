//! Rain and Cloth Simulation Core Library
//!
//! A small real-time scene: rain drops fountain out of a well on the ground
//! and fall back under gravity, while a cloth hangs from three pinned points.
//! A shared wind pushes both and changes heading and strength every ten
//! seconds.
//!
//! ## Layout
//!
//! - [`core_types`]: vectors, units, random sampling, the wind and single drops
//! - [`physics`]: the drop emitter and the cloth grid integrators
//! - [`simulation`]: the context that owns all state and steps it, plus the
//!   outer-loop seam ([`Platform`], [`run`])
//! - [`render`]: projection of the state into a batch of draw commands
//! - [`config`]: every tunable constant, loadable from JSON
//!
//! ## Example
//!
//! ```
//! use rain_cloth_core::{compose_frame, Seconds, SimulationConfig, SimulationContext};
//!
//! let mut sim = SimulationContext::seeded(SimulationConfig::default(), 42)?;
//! sim.step(Seconds::new(1.0 / 60.0));
//! let frame = compose_frame(&sim);
//! assert_eq!(frame.line_count(), 199);
//! # Ok::<(), rain_cloth_core::ConfigError>(())
//! ```

// Core types and utilities
pub mod core_types;

pub mod config;
pub mod error;
pub mod physics;
pub mod render;
pub mod simulation;

// Re-export core types
pub use core_types::{Degrees, Radians, RainDrop, Seconds, Vec3, WindField};

pub use config::{ClothConfig, ParticleConfig, RenderConfig, SimulationConfig, WindConfig};
pub use error::ConfigError;
pub use physics::{ClothGrid, Forcing, Neighbor, ParticleStepReport, ParticleSystem};
pub use render::{compose_frame, DrawCommand, Frame, Renderer, Rgba, ScreenPoint};
pub use simulation::{
    run, run_with, FixedStep, Platform, RunSummary, SimulationContext, SimulationStats,
    TickReport, WallClock,
};
