//! Centralized engine options with TOML preset support.
//!
//! All tweakable settings (pool sizing, glow response, transient
//! profiles) are consolidated here. Options serialize to/from TOML for
//! presets stored in `presets/`.

mod batching;
mod glow;
mod particles;

use std::path::Path;

pub use batching::{BatchingOptions, PoolOptions};
pub use glow::GlowOptions;
pub use particles::ParticleOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::GladeError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[glow]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Pool capacities and slot disciplines.
    pub batching: BatchingOptions,
    /// Emissive response parameters.
    pub glow: GlowOptions,
    /// Transient emitter parameters.
    pub particles: ParticleOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, GladeError> {
        let content = std::fs::read_to_string(path).map_err(GladeError::Io)?;
        toml::from_str(&content)
            .map_err(|e| GladeError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), GladeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GladeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GladeError::Io)?;
        }
        std::fs::write(path, content).map_err(GladeError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
