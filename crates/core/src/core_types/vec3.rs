//! Vector type alias for 3D positions, velocities and forcing.

use nalgebra::Vector3;

/// 3D vector type for positions, velocities, and directions.
///
/// This is a simple alias for `nalgebra::Vector3<f64>`, used throughout
/// the simulation for drop and cloth positions, their velocities, and the
/// wind vector. `x`/`z` span the horizontal plane, `y` is height.
pub type Vec3 = Vector3<f64>;
