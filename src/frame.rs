//! Read-only per-frame world state handed to the engine.
//!
//! The embedder's music-analysis and weather layers produce one
//! [`FrameState`] snapshot per frame. The engine only ever reads it —
//! reactivity decisions (what to spawn, when) stay on the embedder's side.

use glam::Vec3;

/// Smoothed audio band levels, each in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AudioLevels {
    /// Low band (kick / bass).
    pub bass: f32,
    /// Mid band (melody / chords).
    pub mids: f32,
    /// High band (hats / cymbals).
    pub highs: f32,
    /// Beat-synchronized pulse, spiking on beat and decaying between beats.
    pub pulse: f32,
}

/// Per-frame snapshot of everything outside the engine that instance
/// attributes may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameState {
    /// World-clock seconds (drives shader phase animation).
    pub time: f32,
    /// Smoothed audio bands.
    pub audio: AudioLevels,
    /// Weather strength in `[0.0, 1.0]` (0 = clear, 1 = full storm).
    pub weather_intensity: f32,
    /// World-space wind vector; magnitude is the wind speed.
    pub wind: Vec3,
    /// Player world position (proximity-driven attributes).
    pub player_position: Vec3,
}

impl FrameState {
    /// A quiet snapshot at the given time: no audio, no weather, no wind.
    #[must_use]
    pub fn still(time: f32) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }
}
