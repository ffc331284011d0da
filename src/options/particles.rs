use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::emitter::ProfileTable;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Particles", inline)]
#[serde(default)]
/// Transient emitter sizing and world physics.
pub struct ParticleOptions {
    /// Ring capacity. Spawns past this overwrite the oldest transient.
    #[schemars(title = "Capacity", range(min = 64, max = 16384), extend("step" = 64))]
    pub capacity: usize,
    /// Downward gravity magnitude, world units per second squared.
    #[schemars(title = "Gravity", range(min = 0.0, max = 30.0), extend("step" = 0.1))]
    pub gravity: f32,
    /// Ground plane height; transients crossing below it are culled.
    #[schemars(skip)]
    pub ground_y: f32,
    /// Per-kind behavior table.
    #[schemars(skip)]
    pub profiles: ProfileTable,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            capacity: 2048,
            gravity: 9.8,
            ground_y: 0.0,
            profiles: ProfileTable::default(),
        }
    }
}
