use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Glow", inline)]
#[serde(default)]
/// Emissive response of reactive decorations.
pub struct GlowOptions {
    /// Resting emissive level before charge or audio contribute.
    #[schemars(title = "Base Glow", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub base: f32,
    /// Scale on the audio-band term added on top of base and charge.
    #[schemars(title = "Audio Weight", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub audio_weight: f32,
}

impl Default for GlowOptions {
    fn default() -> Self {
        Self {
            base: 0.2,
            audio_weight: 1.0,
        }
    }
}
