//! Integrators for the two simulated bodies: the rain drops and the cloth

pub mod cloth;
pub mod particles;

pub use cloth::{ClothGrid, Neighbor};
pub use particles::{ParticleStepReport, ParticleSystem};

use crate::core_types::vec3::Vec3;
use serde::{Deserialize, Serialize};

/// External forcing for one tick
///
/// Built once per tick from the config's gravity and the current
/// [`WindField`](crate::WindField) vector, then handed to each body by value
/// so both see the same wind even if it changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forcing {
    /// Gravity magnitude (drops fall toward `-y`, the cloth hangs toward `+y`)
    pub gravity: f64,
    /// Wind vector
    pub wind: Vec3,
}
