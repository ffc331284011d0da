//! Audio-reactive instance state: glow accumulation, sway, and the
//! note-event dispatch table.
//!
//! Decay here is PER UPDATE CALL, not per second. The constants are tuned
//! for display-rate cadence (~60 Hz): a snapped charge fades over ten
//! frames, a sway kick over a dozen. Converting to per-second decay would
//! change the look of every preset and is deliberately not done.

use crate::decor::DecorKind;

/// Linear charge decay per update call.
const CHARGE_DECAY: f32 = 0.1;
/// Events at or below this intensity never snap the charge.
const SNAP_TRIGGER: f32 = 0.2;
/// A new snap only arms once the previous charge has decayed below this,
/// so rapid-fire events read as one sustained hit instead of flicker.
const RETRIGGER_FLOOR: f32 = 0.2;
/// Glow output ceiling.
const GLOW_MAX: f32 = 2.0;

/// Exponential sway-boost damping per update call.
const SWAY_DAMPING: f32 = 0.85;
/// Idle sway phase rate, radians per second.
const BASE_SWAY_RATE: f32 = 1.2;
/// Additional phase rate per unit of wind speed.
const WIND_SWAY_RATE: f32 = 0.35;
/// Additional phase rate at full boost.
const BOOST_SWAY_RATE: f32 = 4.0;

/// Per-instance glow accumulator: `base + decaying charge + audio term`,
/// clamped to `[0, 2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowState {
    base: f32,
    charge: f32,
}

impl GlowState {
    /// A glow state resting at `base` with no charge.
    #[must_use]
    pub fn new(base: f32) -> Self {
        Self { base, charge: 0.0 }
    }

    /// Feed a note event. Intensities above the trigger threshold snap the
    /// charge to full — but only once the previous charge has decayed
    /// below the retrigger floor.
    pub fn excite(&mut self, intensity: f32) {
        if intensity > SNAP_TRIGGER && self.charge < RETRIGGER_FLOOR {
            self.charge = 1.0;
        }
    }

    /// Advance one update call: produce this frame's glow, then decay the
    /// charge. The snap frame itself renders at full charge.
    pub fn advance(&mut self, audio_term: f32) -> f32 {
        let glow = (self.base + self.charge + audio_term).clamp(0.0, GLOW_MAX);
        self.charge = (self.charge - CHARGE_DECAY).max(0.0);
        glow
    }

    /// Current charge level.
    #[must_use]
    pub fn charge(&self) -> f32 {
        self.charge
    }

    /// Resting glow level.
    #[must_use]
    pub fn base(&self) -> f32 {
        self.base
    }
}

/// Per-instance sway oscillator: phase advances with wind and decaying
/// note-kick boosts; the shader evaluates `sin(phase)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwayState {
    phase: f32,
    boost: f32,
}

impl SwayState {
    /// Start at `phase` (placement jitter keeps a field from swaying in
    /// lockstep).
    #[must_use]
    pub fn new(phase: f32) -> Self {
        Self { phase, boost: 0.0 }
    }

    /// Feed a note kick; boosts saturate at full strength.
    pub fn kick(&mut self, intensity: f32) {
        self.boost = (self.boost + intensity * 0.5).min(1.0);
    }

    /// Advance one update call and return the new phase.
    pub fn advance(&mut self, dt: f32, wind_speed: f32) -> f32 {
        let rate = BASE_SWAY_RATE
            + wind_speed * WIND_SWAY_RATE
            + self.boost * BOOST_SWAY_RATE;
        self.phase += rate * dt;
        if self.phase > std::f32::consts::TAU {
            self.phase -= std::f32::consts::TAU;
        }
        self.boost *= SWAY_DAMPING;
        self.phase
    }

    /// Current phase in radians.
    #[must_use]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Current boost level.
    #[must_use]
    pub fn boost(&self) -> f32 {
        self.boost
    }
}

/// Instrument channel of a note event, as classified by the embedder's
/// music-analysis layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    /// Low percussion / bass hits.
    Kick,
    /// Snare hits.
    Snare,
    /// Melodic voice.
    Melody,
    /// Hats and cymbals.
    Cymbal,
}

/// One note event fed into [`crate::engine::GladeEngine::ingest_note`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    /// Which channel fired.
    pub instrument: Instrument,
    /// Event strength in `[0, 1]`.
    pub intensity: f32,
}

/// How a decoration reacts to a note event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// No reaction.
    Ignore,
    /// Snap the glow charge.
    Excite,
    /// Boost the sway oscillator.
    SwayKick,
}

/// The dispatch table: decoration kind x instrument -> reaction.
///
/// This is the single lookup point for event reactivity — instances never
/// carry behavior, only state. Adding a pairing is one match arm.
#[must_use]
pub fn reaction_for(kind: &DecorKind, instrument: Instrument) -> Reaction {
    match (kind, instrument) {
        (DecorKind::Berry { .. }, Instrument::Kick)
        | (DecorKind::Lantern { .. }, Instrument::Snare)
        | (DecorKind::CloudPuff { .. }, Instrument::Cymbal) => Reaction::Excite,
        (DecorKind::Flower { .. }, Instrument::Melody)
        | (DecorKind::Grass { .. }, Instrument::Kick) => Reaction::SwayKick,
        _ => Reaction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn strong_event_snaps_discharged_glow() {
        let mut glow = GlowState::new(0.2);
        glow.excite(0.9);
        assert_eq!(glow.charge(), 1.0);
        // Snap frame renders at full charge.
        assert_eq!(glow.advance(0.0), 1.2);
    }

    #[test]
    fn weak_event_is_ignored() {
        let mut glow = GlowState::new(0.0);
        glow.excite(0.15);
        assert_eq!(glow.charge(), 0.0);
    }

    #[test]
    fn charged_glow_absorbs_retriggers() {
        let mut glow = GlowState::new(0.0);
        glow.excite(1.0);
        let _ = glow.advance(0.0);
        let _ = glow.advance(0.0);
        // Charge is now 0.8 — above the retrigger floor, so a second hit
        // does not reset the decay.
        glow.excite(1.0);
        assert!((glow.charge() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn charge_decays_linearly_to_zero() {
        let mut glow = GlowState::new(0.0);
        glow.excite(1.0);
        for _ in 0..10 {
            let _ = glow.advance(0.0);
        }
        assert_eq!(glow.charge(), 0.0);
        assert_eq!(glow.advance(0.0), 0.0);
    }

    #[test]
    fn rearms_once_decayed_below_floor() {
        let mut glow = GlowState::new(0.0);
        glow.excite(1.0);
        for _ in 0..9 {
            let _ = glow.advance(0.0);
        }
        assert!(glow.charge() < RETRIGGER_FLOOR);
        glow.excite(1.0);
        assert_eq!(glow.charge(), 1.0);
    }

    #[test]
    fn glow_includes_audio_term_and_clamps() {
        let mut glow = GlowState::new(0.25);
        assert!((glow.advance(0.48) - 0.73).abs() < 1e-6);

        let mut bright = GlowState::new(1.5);
        bright.excite(1.0);
        assert_eq!(bright.advance(0.8), 2.0);
    }

    #[test]
    fn sway_boost_decays_per_call() {
        let mut sway = SwayState::new(0.0);
        sway.kick(1.0);
        assert_eq!(sway.boost(), 0.5);
        let _ = sway.advance(1.0 / 60.0, 0.0);
        assert!((sway.boost() - 0.5 * SWAY_DAMPING).abs() < 1e-6);
    }

    #[test]
    fn wind_speeds_up_sway() {
        let mut calm = SwayState::new(0.0);
        let mut windy = SwayState::new(0.0);
        let calm_phase = calm.advance(0.1, 0.0);
        let windy_phase = windy.advance(0.1, 5.0);
        assert!(windy_phase > calm_phase);
    }

    #[test]
    fn dispatch_table_routes_by_kind_and_instrument() {
        let berry = DecorKind::Berry {
            size: 0.3,
            color: Vec3::new(1.0, 0.2, 0.3),
        };
        let flower = DecorKind::Flower {
            height: 1.0,
            color: Vec3::ONE,
        };
        let lantern = DecorKind::Lantern {
            height: 2.0,
            color: Vec3::ONE,
            swing_phase: 0.0,
        };
        assert_eq!(
            reaction_for(&berry, Instrument::Kick),
            Reaction::Excite
        );
        assert_eq!(
            reaction_for(&berry, Instrument::Snare),
            Reaction::Ignore
        );
        assert_eq!(
            reaction_for(&lantern, Instrument::Snare),
            Reaction::Excite
        );
        assert_eq!(
            reaction_for(&flower, Instrument::Melody),
            Reaction::SwayKick
        );
        assert_eq!(
            reaction_for(&flower, Instrument::Kick),
            Reaction::Ignore
        );
    }
}
