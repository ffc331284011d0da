use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::batch::Discipline;

/// Capacity and slot discipline for one instance pool.
///
/// A preset section for a pool replaces it wholesale: any field omitted
/// inside the section takes the generic default below, not the
/// category-tuned one. A preset that resizes a churning pool should
/// restate its `discipline`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(default)]
pub struct PoolOptions {
    /// Fixed slot count. Buffers are sized once at startup and never grow.
    pub capacity: usize,
    /// How freed slots behave: hidden forever or reissued LIFO.
    pub discipline: Discipline,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            capacity: 256,
            discipline: Discipline::Monotonic,
        }
    }
}

impl PoolOptions {
    const fn new(capacity: usize, discipline: Discipline) -> Self {
        Self {
            capacity,
            discipline,
        }
    }
}

/// Pool sizing per decoration category plus sweep cadence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Batching", inline)]
#[serde(default)]
pub struct BatchingOptions {
    /// Flower pool.
    pub flowers: PoolOptions,
    /// Grass blade pool.
    pub grass: PoolOptions,
    /// Berry cluster pool.
    pub berries: PoolOptions,
    /// Lantern pool.
    pub lanterns: PoolOptions,
    /// Cloud puff pool.
    pub cloud_puffs: PoolOptions,
    /// Run the zombie sweep every N frames (1 = every frame).
    #[schemars(title = "Sweep Interval", range(min = 1, max = 60), extend("step" = 1))]
    pub sweep_interval: u32,
}

impl Default for BatchingOptions {
    fn default() -> Self {
        Self {
            flowers: PoolOptions::new(4000, Discipline::Monotonic),
            grass: PoolOptions::new(6000, Discipline::Monotonic),
            berries: PoolOptions::new(1024, Discipline::FreeList),
            lanterns: PoolOptions::new(192, Discipline::Monotonic),
            cloud_puffs: PoolOptions::new(64, Discipline::FreeList),
            sweep_interval: 1,
        }
    }
}
