//! Core types and utilities

pub mod rain_drop;
pub mod sampling;
pub mod units;
pub mod vec3;
pub mod vector_math;
pub mod wind;

pub use rain_drop::RainDrop;
pub use units::*;
pub use vec3::Vec3;
pub use wind::WindField;
