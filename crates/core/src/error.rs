//! Errors raised while loading or validating a [`SimulationConfig`](crate::SimulationConfig)
//!
//! The simulation step itself has no recoverable failures; broken invariants
//! there (vector length mismatch, grid coordinates out of range) panic.

use std::fmt;

/// Configuration loading/validation failure
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to read the config file
    LoadFailed(String),
    /// Failed to parse config contents
    ParseFailed(String),
    /// A numeric parameter is negative, zero where it must not be, or not finite
    InvalidParameter {
        /// Dotted path of the offending field, e.g. `cloth.stiffness`
        name: &'static str,
        /// The rejected value
        value: f64,
    },
    /// The cloth grid must have at least one column and one row
    EmptyGrid {
        /// Configured column count
        cols: usize,
        /// Configured row count
        rows: usize,
    },
    /// A pinned cell lies outside the grid
    PinOutOfRange {
        /// Pin column
        col: usize,
        /// Pin row
        row: usize,
        /// Configured column count
        cols: usize,
        /// Configured row count
        rows: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed(msg) => write!(f, "Failed to load config: {msg}"),
            ConfigError::ParseFailed(msg) => write!(f, "Failed to parse config: {msg}"),
            ConfigError::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter {name}: {value}")
            }
            ConfigError::EmptyGrid { cols, rows } => {
                write!(f, "Cloth grid must be at least 1x1, got {cols}x{rows}")
            }
            ConfigError::PinOutOfRange {
                col,
                row,
                cols,
                rows,
            } => write!(
                f,
                "Pinned cell ({col}, {row}) lies outside the {cols}x{rows} cloth grid"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
