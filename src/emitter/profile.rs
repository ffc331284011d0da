//! Per-kind transient behavior as a pure data table.
//!
//! Every difference between a berry pop and a muzzle flash lives in a
//! [`ParticleProfile`] — the integrator in [`super::BurstEmitter`] has no
//! per-kind branches. Profiles serialize with the options layer, so TOML
//! presets can retune any kind without touching code.

use std::f32::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The transient kinds the world spawns.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    /// Dust kicked up by a jump takeoff.
    Jump,
    /// Wide dust ring on landing.
    Land,
    /// Streak burst behind a dash.
    Dash,
    /// Juice pop when a berry is eaten.
    Berry,
    /// Gold flash on a snare hit.
    Snare,
    /// Slow ground mist.
    Mist,
    /// Falling rain streaks.
    Rain,
    /// Drifting luminous spores.
    Spore,
    /// Footstep/motion trail wisps.
    Trail,
    /// Short hot flash (projectile origin).
    Muzzle,
}

impl ParticleKind {
    /// Every kind, for iteration in demos and schema listings.
    pub const ALL: [Self; 10] = [
        Self::Jump,
        Self::Land,
        Self::Dash,
        Self::Berry,
        Self::Snare,
        Self::Mist,
        Self::Rain,
        Self::Spore,
        Self::Trail,
        Self::Muzzle,
    ];
}

/// Tunable behavior of one transient kind. Data only.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(default)]
pub struct ParticleProfile {
    /// Particles per burst.
    pub count: u32,
    /// Initial speed range `[min, max]`, world units per second.
    pub speed: [f32; 2],
    /// Cone half-angle around the spawn direction, radians. `PI` or more
    /// means a uniform sphere.
    pub spread: f32,
    /// Lifespan range `[min, max]`, seconds.
    pub lifespan: [f32; 2],
    /// RGBA tint.
    pub color: [f32; 4],
    /// Multiplier on world gravity. Negative floats upward (mist, spores).
    pub gravity_scale: f32,
    /// Velocity damping per second (0 = ballistic).
    pub drag: f32,
    /// Render size range `[min, max]`, world units.
    pub size: [f32; 2],
    /// Base spawn direction before the spread cone is applied.
    pub direction: [f32; 3],
}

impl Default for ParticleProfile {
    /// The neutral profile: an omnidirectional white puff.
    fn default() -> Self {
        Self {
            count: 8,
            speed: [1.0, 2.0],
            spread: PI,
            lifespan: [0.5, 1.0],
            color: [1.0, 1.0, 1.0, 1.0],
            gravity_scale: 1.0,
            drag: 0.0,
            size: [0.05, 0.12],
            direction: [0.0, 1.0, 0.0],
        }
    }
}

/// The full kind -> profile table.
///
/// A kind's TOML section overrides that profile wholesale: fields omitted
/// inside a present section fall back to the neutral profile, while kinds
/// whose section is absent keep their tuned defaults below.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(default)]
pub struct ProfileTable {
    /// Jump takeoff dust.
    pub jump: ParticleProfile,
    /// Landing dust ring.
    pub land: ParticleProfile,
    /// Dash streaks.
    pub dash: ParticleProfile,
    /// Berry juice pop.
    pub berry: ParticleProfile,
    /// Snare flash.
    pub snare: ParticleProfile,
    /// Ground mist.
    pub mist: ParticleProfile,
    /// Rain streaks.
    pub rain: ParticleProfile,
    /// Luminous spores.
    pub spore: ParticleProfile,
    /// Motion trail wisps.
    pub trail: ParticleProfile,
    /// Muzzle flash.
    pub muzzle: ParticleProfile,
}

impl ProfileTable {
    /// Look up the profile for `kind`.
    #[must_use]
    pub fn get(&self, kind: ParticleKind) -> ParticleProfile {
        match kind {
            ParticleKind::Jump => self.jump,
            ParticleKind::Land => self.land,
            ParticleKind::Dash => self.dash,
            ParticleKind::Berry => self.berry,
            ParticleKind::Snare => self.snare,
            ParticleKind::Mist => self.mist,
            ParticleKind::Rain => self.rain,
            ParticleKind::Spore => self.spore,
            ParticleKind::Trail => self.trail,
            ParticleKind::Muzzle => self.muzzle,
        }
    }
}

impl Default for ProfileTable {
    fn default() -> Self {
        let base = ParticleProfile::default();
        Self {
            jump: ParticleProfile {
                count: 12,
                speed: [2.0, 4.0],
                spread: 0.6,
                lifespan: [0.4, 0.7],
                color: [0.9, 0.95, 1.0, 0.9],
                drag: 0.5,
                size: [0.04, 0.09],
                ..base
            },
            land: ParticleProfile {
                count: 40,
                speed: [1.5, 3.5],
                spread: 1.3,
                lifespan: [0.3, 0.6],
                color: [0.8, 0.75, 0.6, 0.8],
                gravity_scale: 1.2,
                drag: 1.0,
                size: [0.05, 0.1],
                ..base
            },
            dash: ParticleProfile {
                count: 10,
                speed: [3.0, 6.0],
                spread: 0.35,
                lifespan: [0.2, 0.45],
                color: [0.55, 0.9, 1.0, 0.85],
                gravity_scale: 0.3,
                drag: 2.0,
                size: [0.03, 0.07],
                ..base
            },
            berry: ParticleProfile {
                count: 15,
                speed: [1.0, 2.5],
                lifespan: [0.5, 0.9],
                color: [1.0, 0.3, 0.45, 0.95],
                gravity_scale: 0.8,
                drag: 0.8,
                size: [0.04, 0.08],
                ..base
            },
            snare: ParticleProfile {
                count: 20,
                speed: [2.5, 5.0],
                spread: 1.1,
                lifespan: [0.25, 0.5],
                color: [1.0, 0.85, 0.35, 1.0],
                gravity_scale: 0.6,
                drag: 1.5,
                size: [0.04, 0.09],
                ..base
            },
            mist: ParticleProfile {
                count: 6,
                speed: [0.2, 0.6],
                lifespan: [2.0, 3.5],
                color: [0.85, 0.9, 1.0, 0.25],
                gravity_scale: -0.15,
                drag: 0.4,
                size: [0.3, 0.6],
                ..base
            },
            rain: ParticleProfile {
                count: 1,
                speed: [9.0, 12.0],
                spread: 0.05,
                lifespan: [1.2, 2.0],
                color: [0.6, 0.7, 0.9, 0.5],
                gravity_scale: 1.5,
                size: [0.02, 0.035],
                direction: [0.0, -1.0, 0.0],
                ..base
            },
            spore: ParticleProfile {
                count: 4,
                speed: [0.3, 0.8],
                lifespan: [3.0, 5.0],
                color: [0.5, 1.0, 0.55, 0.6],
                gravity_scale: -0.25,
                drag: 0.6,
                size: [0.02, 0.05],
                ..base
            },
            trail: ParticleProfile {
                count: 1,
                speed: [0.1, 0.3],
                lifespan: [0.4, 0.8],
                color: [0.95, 0.95, 1.0, 0.4],
                gravity_scale: 0.0,
                drag: 2.0,
                size: [0.05, 0.1],
                ..base
            },
            muzzle: ParticleProfile {
                count: 8,
                speed: [4.0, 8.0],
                spread: 0.25,
                lifespan: [0.1, 0.25],
                color: [1.0, 0.9, 0.5, 1.0],
                gravity_scale: 0.2,
                drag: 3.0,
                size: [0.03, 0.06],
                ..base
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lookup_matches_fields() {
        let table = ProfileTable::default();
        assert_eq!(table.get(ParticleKind::Berry).count, 15);
        assert_eq!(table.get(ParticleKind::Land).count, 40);
        assert_eq!(table.get(ParticleKind::Rain).direction, [0.0, -1.0, 0.0]);
    }

    #[test]
    fn floaty_kinds_have_negative_gravity() {
        let table = ProfileTable::default();
        assert!(table.get(ParticleKind::Mist).gravity_scale < 0.0);
        assert!(table.get(ParticleKind::Spore).gravity_scale < 0.0);
    }

    #[test]
    fn every_kind_resolves() {
        let table = ProfileTable::default();
        for kind in ParticleKind::ALL {
            assert!(table.get(kind).count >= 1);
        }
    }

    #[test]
    fn table_round_trips_through_toml() {
        let mut table = ProfileTable::default();
        table.berry.count = 99;
        let text = toml::to_string_pretty(&table).unwrap();
        let parsed: ProfileTable = toml::from_str(&text).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn absent_kind_sections_keep_tuned_defaults() {
        let parsed: ProfileTable =
            toml::from_str("[berry]\ncount = 3\n").unwrap();
        assert_eq!(parsed.berry.count, 3);
        // A present section overrides wholesale: its other fields fall
        // back to the neutral profile.
        assert_eq!(parsed.berry.color, [1.0, 1.0, 1.0, 1.0]);
        // Absent sections keep the tuned defaults.
        assert_eq!(parsed.land.count, 40);
        assert_eq!(parsed.mist.gravity_scale, -0.15);
    }
}
