//! The engine facade: one context object owning decorations, batches,
//! and the transient emitter.

mod placement;
mod sync;

use glam::Vec3;

use crate::batch::{DecorBatch, LampInstance, PlantInstance, PuffInstance};
use crate::decor::{DecorId, DecorSet, PlacedDecor};
use crate::emitter::{BurstEmitter, ParticleKind, SpawnOptions};
use crate::options::Options;
use crate::reactive::NoteEvent;

/// The instance batching engine for one populated world.
///
/// Owns every placed decoration, the per-category instance batches, and
/// the transient emitter. Everything routes through this one object —
/// there is no global state, and a test can run several engines side by
/// side.
///
/// # Construction
///
/// Build with [`GladeEngine::new`] from an [`Options`] value (defaults or
/// a loaded preset). Pool capacities are fixed here for the engine's
/// lifetime.
///
/// # Placement
///
/// Describe a decoration as a plain [`crate::decor::Decor`] blueprint,
/// then call [`place`](Self::place) to bind it to a position and a pool
/// slot. [`detach`](Self::detach) removes it; the slot is reclaimed by
/// the next sweep.
///
/// # Frame loop
///
/// Once per frame, feed note events via [`ingest_note`](Self::ingest_note)
/// and call [`update`](Self::update) with the elapsed seconds and the
/// frame's [`crate::frame::FrameState`]. The upload layer then drains the
/// per-pool dirty flags (see [`crate::gpu`]).
pub struct GladeEngine {
    options: Options,
    /// Monotonic world clock, seconds. Drives spawn stamps.
    clock: f32,
    /// Frames stepped so far. Drives the sweep cadence.
    frame_count: u64,
    decors: DecorSet,
    flowers: DecorBatch<PlantInstance>,
    grass: DecorBatch<PlantInstance>,
    berries: DecorBatch<PlantInstance>,
    lanterns: DecorBatch<LampInstance>,
    cloud_puffs: DecorBatch<PuffInstance>,
    emitter: BurstEmitter,
    /// Note events received since the last update, applied at the top of
    /// the next one.
    pending_notes: Vec<NoteEvent>,
}

/// Point-in-time counters for one batch.
#[derive(Debug, Clone, Copy)]
pub struct BatchStats {
    /// Category label.
    pub label: &'static str,
    /// Fixed slot capacity.
    pub capacity: usize,
    /// Slots with a living owner.
    pub active: usize,
    /// Draw range (includes hidden retired slots).
    pub live: usize,
}

/// Engine-wide counters for logs and HUD overlays.
#[derive(Debug, Clone, Copy)]
pub struct EngineStats {
    /// Placed decorations.
    pub decors: usize,
    /// Per-batch counters, in category order.
    pub batches: [BatchStats; 5],
    /// Active transient particles.
    pub transients: usize,
}

impl GladeEngine {
    /// Build an engine. Pool capacities and disciplines come from
    /// `options.batching` and are fixed for the engine's lifetime.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let b = &options.batching;
        let engine = Self {
            flowers: DecorBatch::new(
                "flowers",
                b.flowers.capacity,
                b.flowers.discipline,
            ),
            grass: DecorBatch::new(
                "grass",
                b.grass.capacity,
                b.grass.discipline,
            ),
            berries: DecorBatch::new(
                "berries",
                b.berries.capacity,
                b.berries.discipline,
            ),
            lanterns: DecorBatch::new(
                "lanterns",
                b.lanterns.capacity,
                b.lanterns.discipline,
            ),
            cloud_puffs: DecorBatch::new(
                "cloud_puffs",
                b.cloud_puffs.capacity,
                b.cloud_puffs.discipline,
            ),
            emitter: BurstEmitter::new(&options.particles),
            decors: DecorSet::new(),
            clock: 0.0,
            frame_count: 0,
            pending_notes: Vec::new(),
            options,
        };
        log::info!(
            "engine up: {} flower / {} grass / {} berry / {} lantern / {} puff slots, {} transients",
            engine.flowers.capacity(),
            engine.grass.capacity(),
            engine.berries.capacity(),
            engine.lanterns.capacity(),
            engine.cloud_puffs.capacity(),
            engine.emitter.capacity(),
        );
        engine
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Queue a note event for the next update. Events are buffered so the
    /// music-analysis layer can fire at its own cadence.
    pub fn ingest_note(&mut self, note: NoteEvent) {
        self.pending_notes.push(note);
    }

    /// Spawn a full transient burst (never fails; the ring overwrites its
    /// oldest slot under load). Returns the number spawned.
    pub fn burst(&mut self, position: Vec3, kind: ParticleKind) -> usize {
        self.emitter.burst(position, kind)
    }

    /// Spawn a single transient with per-spawn overrides.
    pub fn spawn_transient(
        &mut self,
        position: Vec3,
        kind: ParticleKind,
        opts: &SpawnOptions,
    ) -> usize {
        self.emitter.spawn(position, kind, opts)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Engine options as fixed at construction.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// World clock in seconds (sum of clamped frame steps).
    #[must_use]
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Look up a placed decoration.
    #[must_use]
    pub fn decor(&self, id: DecorId) -> Option<&PlacedDecor> {
        self.decors.get(id)
    }

    /// Mutable decoration access (move it, retune its kind parameters).
    /// Changes reach the pool on the next update.
    pub fn decor_mut(&mut self, id: DecorId) -> Option<&mut PlacedDecor> {
        self.decors.get_mut(id)
    }

    /// Number of placed decorations.
    #[must_use]
    pub fn decor_count(&self) -> usize {
        self.decors.len()
    }

    /// The flower batch.
    #[must_use]
    pub fn flowers(&self) -> &DecorBatch<PlantInstance> {
        &self.flowers
    }

    /// The grass batch.
    #[must_use]
    pub fn grass(&self) -> &DecorBatch<PlantInstance> {
        &self.grass
    }

    /// The berry batch.
    #[must_use]
    pub fn berries(&self) -> &DecorBatch<PlantInstance> {
        &self.berries
    }

    /// The lantern batch.
    #[must_use]
    pub fn lanterns(&self) -> &DecorBatch<LampInstance> {
        &self.lanterns
    }

    /// The cloud puff batch.
    #[must_use]
    pub fn cloud_puffs(&self) -> &DecorBatch<PuffInstance> {
        &self.cloud_puffs
    }

    /// Mutable flower batch (upload layer: dirty-flag drain).
    pub fn flowers_mut(&mut self) -> &mut DecorBatch<PlantInstance> {
        &mut self.flowers
    }

    /// Mutable grass batch (upload layer: dirty-flag drain).
    pub fn grass_mut(&mut self) -> &mut DecorBatch<PlantInstance> {
        &mut self.grass
    }

    /// Mutable berry batch (upload layer: dirty-flag drain).
    pub fn berries_mut(&mut self) -> &mut DecorBatch<PlantInstance> {
        &mut self.berries
    }

    /// Mutable lantern batch (upload layer: dirty-flag drain).
    pub fn lanterns_mut(&mut self) -> &mut DecorBatch<LampInstance> {
        &mut self.lanterns
    }

    /// Mutable cloud puff batch (upload layer: dirty-flag drain).
    pub fn cloud_puffs_mut(&mut self) -> &mut DecorBatch<PuffInstance> {
        &mut self.cloud_puffs
    }

    /// The transient emitter.
    #[must_use]
    pub fn emitter(&self) -> &BurstEmitter {
        &self.emitter
    }

    /// Mutable transient emitter (upload layer: instance snapshot).
    pub fn emitter_mut(&mut self) -> &mut BurstEmitter {
        &mut self.emitter
    }

    /// Current counters for logging and overlays.
    #[must_use]
    pub fn stats(&self) -> EngineStats {
        let batch_stats = |label, capacity, active, live| BatchStats {
            label,
            capacity,
            active,
            live,
        };
        EngineStats {
            decors: self.decors.len(),
            batches: [
                batch_stats(
                    self.flowers.label(),
                    self.flowers.capacity(),
                    self.flowers.active(),
                    self.flowers.live(),
                ),
                batch_stats(
                    self.grass.label(),
                    self.grass.capacity(),
                    self.grass.active(),
                    self.grass.live(),
                ),
                batch_stats(
                    self.berries.label(),
                    self.berries.capacity(),
                    self.berries.active(),
                    self.berries.live(),
                ),
                batch_stats(
                    self.lanterns.label(),
                    self.lanterns.capacity(),
                    self.lanterns.active(),
                    self.lanterns.live(),
                ),
                batch_stats(
                    self.cloud_puffs.label(),
                    self.cloud_puffs.capacity(),
                    self.cloud_puffs.active(),
                    self.cloud_puffs.live(),
                ),
            ],
            transients: self.emitter.active_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_starts_empty() {
        let engine = GladeEngine::new(Options::default());
        assert_eq!(engine.decor_count(), 0);
        assert_eq!(engine.clock(), 0.0);
        let stats = engine.stats();
        assert_eq!(stats.decors, 0);
        assert_eq!(stats.transients, 0);
        assert_eq!(stats.batches[0].label, "flowers");
        assert_eq!(stats.batches[0].capacity, 4000);
        assert_eq!(stats.batches[4].label, "cloud_puffs");
    }

    #[test]
    fn bursts_route_to_the_emitter() {
        let mut engine = GladeEngine::new(Options::default());
        let spawned = engine.burst(Vec3::new(0.0, 2.0, 0.0), ParticleKind::Jump);
        assert_eq!(spawned, 12);
        assert_eq!(engine.emitter().active_count(), 12);
        assert_eq!(engine.stats().transients, 12);
    }
}
