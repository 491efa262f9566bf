//! Simulation parameters
//!
//! [`SimulationConfig::default`] is the stock scene: gravity 2,
//! a wind change every 10 seconds, 1000 drops per second out of a 0.2-unit
//! well, and an 11×10 cloth pinned at three top-row cells. Configs round-trip
//! through JSON so the headless driver can load variants from disk.

use crate::core_types::units::Seconds;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Wind resampling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    /// Minimum time between resamples
    pub period: Seconds,
    /// Smallest sampled magnitude
    pub min_magnitude: f64,
    /// Sampled magnitude lies in `[min_magnitude, min_magnitude + magnitude_span)`
    pub magnitude_span: f64,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            period: Seconds::new(10.0),
            min_magnitude: 1.0,
            magnitude_span: 3.0,
        }
    }
}

/// Drop spawning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Drops spawned per second of elapsed time
    pub spawn_rate: f64,
    /// Radius of the spawn ring on the ground plane
    pub well_radius: f64,
    /// Initial outward speed
    pub horizontal_speed: f64,
    /// Initial upward speed before jitter
    pub vertical_speed: f64,
    /// Half width of the uniform upward-speed jitter
    pub vertical_jitter: f64,
    /// Fraction of the wind applied to drops each second
    pub wind_coupling: f64,
    /// Drops spawned when the context is created
    pub initial_drops: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            spawn_rate: 1000.0,
            well_radius: 0.2,
            horizontal_speed: 0.5,
            vertical_speed: 2.0,
            vertical_jitter: 0.05,
            wind_coupling: 0.1,
            initial_drops: 1,
        }
    }
}

/// Cloth grid parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
    pub cols: usize,
    pub rows: usize,
    /// Initial column spacing (the cloth "width")
    pub spacing_x: f64,
    /// Initial row spacing
    pub spacing_y: f64,
    /// Neighbor separation above which the corrective pull engages
    pub rest_length: f64,
    /// Pull gain; the pull grows with the square of the separation
    pub stiffness: f64,
    /// Fraction of speed removed per second
    pub damping: f64,
    /// Fraction of the wind applied to cells each second
    pub wind_coupling: f64,
    /// `(col, row)` cells that never move
    pub pinned: Vec<(usize, usize)>,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            cols: 11,
            rows: 10,
            spacing_x: 1.2,
            spacing_y: 1.0,
            rest_length: 1.0,
            stiffness: 20.0,
            damping: 0.3,
            wind_coupling: 0.7,
            pinned: vec![(0, 0), (5, 0), (10, 0)],
        }
    }
}

/// Screen projection parameters for the render batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Logical surface width in pixels
    pub surface_width: u32,
    /// Logical surface height in pixels
    pub surface_height: u32,
    /// Window pixels per logical pixel
    pub window_scale: u32,
    /// Pixels per world unit for drops
    pub drop_scale: f64,
    /// Pixels per world unit for the cloth
    pub cloth_scale: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            surface_width: 320,
            surface_height: 240,
            window_scale: 3,
            drop_scale: 100.0,
            cloth_scale: 12.0,
        }
    }
}

/// Complete parameter set for a [`SimulationContext`](crate::SimulationContext)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Gravity magnitude shared by drops (pulls `-y`) and cloth (pulls `+y`)
    pub gravity: f64,
    /// Ticks longer than this log a warning; the quadratic cloth pull can diverge
    pub stability_warning_dt: Seconds,
    pub wind: WindConfig,
    pub particles: ParticleConfig,
    pub cloth: ClothConfig,
    pub render: RenderConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: 2.0,
            stability_warning_dt: Seconds::new(0.25),
            wind: WindConfig::default(),
            particles: ParticleConfig::default(),
            cloth: ClothConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

impl SimulationConfig {
    /// Check every parameter for values the integrators cannot work with
    ///
    /// # Errors
    /// Returns the first offending parameter: a non-finite or negative
    /// rate/gain, a non-positive spacing or scale, an empty grid, or a pin
    /// outside the grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("gravity", self.gravity)?;
        check_positive("stability_warning_dt", *self.stability_warning_dt)?;

        check_non_negative("wind.period", *self.wind.period)?;
        check_non_negative("wind.min_magnitude", self.wind.min_magnitude)?;
        check_non_negative("wind.magnitude_span", self.wind.magnitude_span)?;

        check_non_negative("particles.spawn_rate", self.particles.spawn_rate)?;
        check_non_negative("particles.well_radius", self.particles.well_radius)?;
        check_non_negative("particles.horizontal_speed", self.particles.horizontal_speed)?;
        check_non_negative("particles.vertical_speed", self.particles.vertical_speed)?;
        check_non_negative("particles.vertical_jitter", self.particles.vertical_jitter)?;
        check_non_negative("particles.wind_coupling", self.particles.wind_coupling)?;

        let cloth = &self.cloth;
        if cloth.cols == 0 || cloth.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                cols: cloth.cols,
                rows: cloth.rows,
            });
        }
        check_positive("cloth.spacing_x", cloth.spacing_x)?;
        check_positive("cloth.spacing_y", cloth.spacing_y)?;
        check_positive("cloth.rest_length", cloth.rest_length)?;
        check_non_negative("cloth.stiffness", cloth.stiffness)?;
        check_non_negative("cloth.damping", cloth.damping)?;
        check_non_negative("cloth.wind_coupling", cloth.wind_coupling)?;
        for &(col, row) in &cloth.pinned {
            if col >= cloth.cols || row >= cloth.rows {
                return Err(ConfigError::PinOutOfRange {
                    col,
                    row,
                    cols: cloth.cols,
                    rows: cloth.rows,
                });
            }
        }

        check_positive("render.drop_scale", self.render.drop_scale)?;
        check_positive("render.cloth_scale", self.render.cloth_scale)?;
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take their defaults
    ///
    /// # Errors
    /// Returns [`ConfigError::ParseFailed`] for malformed JSON, or the
    /// validation error from [`SimulationConfig::validate`].
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(contents).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    ///
    /// # Errors
    /// Returns [`ConfigError::LoadFailed`] if the file cannot be read, or
    /// any error from [`SimulationConfig::from_json_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        Self::from_json_str(&contents)
    }

    /// Serialize to pretty JSON (the format [`SimulationConfig::load`] reads)
    ///
    /// # Errors
    /// Returns [`ConfigError::ParseFailed`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }
}
