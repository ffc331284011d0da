//! Two-phase decoration placement: blueprint in, placed entity out.
//!
//! `Decor` values are inert descriptions. All side effects — id
//! allocation, slot registration, spawn stamping — happen inside
//! [`GladeEngine::place`], in one explicit step.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

use super::GladeEngine;
use crate::batch::{LampInstance, PlantInstance, PuffInstance, SlotIndex};
use crate::decor::{Decor, DecorId, DecorKind, PlacedDecor};
use crate::reactive::{GlowState, SwayState};
use crate::util::growth::GROWN;

/// Placement phase stride, radians. Scatters initial sway phases so a
/// field planted in one frame does not oscillate in lockstep.
const GOLDEN_ANGLE: f32 = 2.399_963;

/// Initial oscillator phase for a new decoration. Lanterns carry their
/// own; everything else gets id-derived scatter.
fn seed_phase(id: DecorId, kind: &DecorKind) -> f32 {
    if let DecorKind::Lantern { swing_phase, .. } = *kind {
        return swing_phase;
    }
    (id.get() as f32 * GOLDEN_ANGLE) % TAU
}

impl GladeEngine {
    /// Place a decoration blueprint at `position`.
    ///
    /// Always succeeds and returns the entity id. When the category's
    /// pool is full the entity is placed without a slot — alive and
    /// addressable, but invisible — and the pool logs the exhaustion once
    /// per full episode.
    pub fn place(&mut self, decor: Decor, position: Vec3) -> DecorId {
        let id = self.decors.allocate_id();
        let mut local = decor.local;
        local.translation = position;
        let world = local.world_matrix(decor.parent_world);

        let spawn_time = if decor.grown { GROWN } else { self.clock };
        let phase = seed_phase(id, &decor.kind);
        let glow = self.options.glow.base;

        let slot =
            self.register_kind(id.get(), &decor.kind, world, spawn_time, phase, glow);
        if slot.is_none() {
            log::debug!(
                "decor {id} placed without a slot ({})",
                decor.kind.category()
            );
        }

        self.decors.insert(PlacedDecor {
            id,
            kind: decor.kind,
            parent_world: decor.parent_world,
            local,
            // Registration wrote the transform; the first sync must not
            // see it as dirty.
            last_synced: slot.is_some().then_some(world),
            glow: GlowState::new(glow),
            sway: SwayState::new(phase),
            slot,
            spawn_time,
        });
        id
    }

    /// Remove a placed decoration. Returns whether it existed.
    ///
    /// The pool slot is not touched here — the next sweep hides it and
    /// (for free-list categories) reissues the index. Until that sweep,
    /// at most one frame later, the instance stays on screen.
    pub fn detach(&mut self, id: DecorId) -> bool {
        let removed = self.decors.detach(id);
        if removed {
            log::debug!("decor {id} detached; slot reclaims on next sweep");
        }
        removed
    }

    /// Route a registration to the kind's batch, building its initial
    /// attribute record.
    fn register_kind(
        &mut self,
        owner: u64,
        kind: &DecorKind,
        world: Mat4,
        spawn_time: f32,
        phase: f32,
        glow: f32,
    ) -> Option<SlotIndex> {
        match *kind {
            DecorKind::Flower { height, color } => self
                .flowers
                .register(
                    owner,
                    world,
                    PlantInstance {
                        color: color.to_array(),
                        size: height,
                        sway_phase: phase,
                        glow,
                        spawn_time,
                        _pad: 0.0,
                    },
                )
                .ok(),
            DecorKind::Grass { height } => self
                .grass
                .register(
                    owner,
                    world,
                    PlantInstance {
                        color: [1.0; 3],
                        size: height,
                        sway_phase: phase,
                        glow,
                        spawn_time,
                        _pad: 0.0,
                    },
                )
                .ok(),
            DecorKind::Berry { size, color } => self
                .berries
                .register(
                    owner,
                    world,
                    PlantInstance {
                        color: color.to_array(),
                        size,
                        sway_phase: phase,
                        glow,
                        spawn_time,
                        _pad: 0.0,
                    },
                )
                .ok(),
            DecorKind::Lantern {
                height,
                color,
                swing_phase,
            } => self
                .lanterns
                .register(
                    owner,
                    world,
                    LampInstance {
                        color: color.to_array(),
                        glow,
                        height,
                        swing_phase,
                        spawn_time,
                        _pad: 0.0,
                    },
                )
                .ok(),
            DecorKind::CloudPuff { radius } => self
                .cloud_puffs
                .register(
                    owner,
                    world,
                    PuffInstance {
                        radius,
                        wobble_phase: phase,
                        glow,
                        spawn_time,
                    },
                )
                .ok(),
        }
    }
}
