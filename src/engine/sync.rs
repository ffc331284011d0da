//! The per-frame update: note dispatch, attribute synchronization,
//! reclamation sweeps, and the transient step.

use super::GladeEngine;
use crate::decor::{DecorId, DecorKind};
use crate::frame::FrameState;
use crate::reactive::{reaction_for, NoteEvent, Reaction};

/// Largest simulation step, seconds. A hitch ages the world by at most
/// this much, keeping the per-call decay rates inside their tuned
/// envelope.
const MAX_STEP: f32 = 0.1;

/// Fraction of the wind vector cloud puffs inherit as drift velocity.
const PUFF_DRIFT: f32 = 0.3;

/// Extra puff luminance at full storm intensity.
const STORM_GLOW: f32 = 0.5;

impl GladeEngine {
    /// Step the world by `dt` seconds against this frame's external state.
    ///
    /// One O(live) pass over the placed decorations: queued note events
    /// fire their per-kind reactions, transforms upload only when the
    /// composed world matrix differs bitwise from the last synced one,
    /// and the reactive attributes (glow, phases, tint) are rewritten
    /// unconditionally — they change continuously, so checking them
    /// would cost more than writing them. Sweeps run at the configured
    /// cadence, then the transient ring integrates.
    pub fn update(&mut self, dt: f32, frame: &FrameState) {
        let dt = dt.clamp(0.0, MAX_STEP);
        self.clock += dt;
        self.frame_count += 1;

        let notes = std::mem::take(&mut self.pending_notes);
        self.sync_decors(dt, frame, &notes);
        // Hand the buffer back so note ingestion stays allocation-free.
        self.pending_notes = notes;
        self.pending_notes.clear();

        let interval = u64::from(self.options.batching.sweep_interval.max(1));
        if self.frame_count % interval == 0 {
            let _ = self.sweep_now();
        }

        self.emitter.set_audio_pulse(frame.audio.pulse);
        self.emitter.update(dt);
    }

    /// Run a reclamation sweep over every batch immediately, regardless
    /// of the configured cadence. Returns the number of slots reclaimed.
    pub fn sweep_now(&mut self) -> usize {
        let Self {
            decors,
            flowers,
            grass,
            berries,
            lanterns,
            cloud_puffs,
            ..
        } = self;
        let is_live = |owner: u64| decors.contains(DecorId::new(owner));
        flowers.sweep(&is_live)
            + grass.sweep(&is_live)
            + berries.sweep(&is_live)
            + lanterns.sweep(&is_live)
            + cloud_puffs.sweep(&is_live)
    }

    /// The O(live) decoration walk.
    fn sync_decors(&mut self, dt: f32, frame: &FrameState, notes: &[NoteEvent]) {
        let Self {
            decors,
            flowers,
            grass,
            berries,
            lanterns,
            cloud_puffs,
            options,
            ..
        } = self;
        let wind_speed = frame.wind.length();
        let weight = options.glow.audio_weight;

        for d in decors.iter_mut() {
            for note in notes {
                match reaction_for(&d.kind, note.instrument) {
                    Reaction::Excite => d.glow.excite(note.intensity),
                    Reaction::SwayKick => d.sway.kick(note.intensity),
                    Reaction::Ignore => {}
                }
            }

            if matches!(d.kind, DecorKind::CloudPuff { .. }) {
                d.local.translation += frame.wind * (PUFF_DRIFT * dt);
            }

            let kind = d.kind;
            let owner = d.id.get();
            let Some(slot) = d.slot else {
                // Slotless (degraded) placement: keep the reactive state
                // ticking, skip the pool writes.
                let _ = d.sway.advance(dt, wind_speed);
                let _ = d.glow.advance(0.0);
                continue;
            };

            // Exact equality, not epsilon: an unchanged local/parent pair
            // recomposes to a bitwise-identical matrix, and a matrix that
            // differs in the last ulp still has to upload or the pool
            // drifts from the authority.
            let world = d.local.world_matrix(d.parent_world);
            if d.last_synced != Some(world) {
                match kind {
                    DecorKind::Flower { .. } => {
                        flowers.update_instance(owner, slot, world);
                    }
                    DecorKind::Grass { .. } => {
                        grass.update_instance(owner, slot, world);
                    }
                    DecorKind::Berry { .. } => {
                        berries.update_instance(owner, slot, world);
                    }
                    DecorKind::Lantern { .. } => {
                        lanterns.update_instance(owner, slot, world);
                    }
                    DecorKind::CloudPuff { .. } => {
                        cloud_puffs.update_instance(owner, slot, world);
                    }
                }
                d.last_synced = Some(world);
            }

            let phase = d.sway.advance(dt, wind_speed);
            let audio_term = match kind {
                DecorKind::Berry { .. } => weight * frame.audio.bass,
                DecorKind::Lantern { .. } => weight * frame.audio.mids,
                DecorKind::CloudPuff { .. } => {
                    weight * frame.audio.highs
                        + frame.weather_intensity * STORM_GLOW
                }
                DecorKind::Flower { .. } | DecorKind::Grass { .. } => 0.0,
            };
            let glow = d.glow.advance(audio_term);

            match kind {
                DecorKind::Flower { height, color } => {
                    flowers.edit_attributes(owner, slot, |a| {
                        a.color = color.to_array();
                        a.size = height;
                        a.sway_phase = phase;
                        a.glow = glow;
                    });
                }
                DecorKind::Grass { height } => {
                    grass.edit_attributes(owner, slot, |a| {
                        a.size = height;
                        a.sway_phase = phase;
                        a.glow = glow;
                    });
                }
                DecorKind::Berry { size, color } => {
                    berries.edit_attributes(owner, slot, |a| {
                        a.color = color.to_array();
                        a.size = size;
                        a.sway_phase = phase;
                        a.glow = glow;
                    });
                }
                DecorKind::Lantern { height, color, .. } => {
                    lanterns.edit_attributes(owner, slot, |a| {
                        a.color = color.to_array();
                        a.height = height;
                        a.swing_phase = phase;
                        a.glow = glow;
                    });
                }
                DecorKind::CloudPuff { radius } => {
                    cloud_puffs.edit_attributes(owner, slot, |a| {
                        a.radius = radius;
                        a.wobble_phase = phase;
                        a.glow = glow;
                    });
                }
            }
        }
    }
}
