//! Logical decoration entities: blueprints, placed records, and kinds.

use std::fmt;

use glam::{Mat4, Vec3};

use super::Transform;
use crate::batch::SlotIndex;
use crate::reactive::{GlowState, SwayState};

/// Unique id of a placed decoration. Ids are never reused within an
/// engine, so a stale id can always be told apart from a new entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DecorId(u64);

impl DecorId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value (the slot registry's opaque owner key).
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DecorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a decoration is, with per-kind construction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecorKind {
    /// A flower: tinted petals on a stem.
    Flower {
        /// Stem height in world units.
        height: f32,
        /// Petal tint.
        color: Vec3,
    },
    /// A grass blade.
    Grass {
        /// Blade height in world units.
        height: f32,
    },
    /// A glowing berry.
    Berry {
        /// Berry radius in world units.
        size: f32,
        /// Skin tint.
        color: Vec3,
    },
    /// A hanging lantern.
    Lantern {
        /// Pole height in world units.
        height: f32,
        /// Light tint.
        color: Vec3,
        /// Initial swing phase in radians.
        swing_phase: f32,
    },
    /// A drifting cloud puff.
    CloudPuff {
        /// Puff radius in world units.
        radius: f32,
    },
}

impl DecorKind {
    /// The batch label this kind renders through.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Flower { .. } => "flowers",
            Self::Grass { .. } => "grass",
            Self::Berry { .. } => "berries",
            Self::Lantern { .. } => "lanterns",
            Self::CloudPuff { .. } => "cloud_puffs",
        }
    }
}

/// A decoration blueprint: a plain value describing what to place.
///
/// Build one (or a whole field of them) anywhere, then hand it to
/// [`crate::engine::GladeEngine::place`] — registration happens there, in
/// one explicit step, never deferred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decor {
    /// What to place.
    pub kind: DecorKind,
    /// Local transform; the translation is overwritten by the position
    /// given to `place`.
    pub local: Transform,
    /// Parent world matrix (terrain chunk, anchor). Identity = world root.
    pub parent_world: Mat4,
    /// Appear fully grown instead of popping in (initial world
    /// population).
    pub grown: bool,
}

impl Decor {
    /// A blueprint for `kind` at the world root, popping in on placement.
    #[must_use]
    pub fn new(kind: DecorKind) -> Self {
        Self {
            kind,
            local: Transform::IDENTITY,
            parent_world: Mat4::IDENTITY,
            grown: false,
        }
    }

    /// Use `local` as the base transform (its translation still gets
    /// overwritten by the placement position).
    #[must_use]
    pub fn with_local(mut self, local: Transform) -> Self {
        self.local = local;
        self
    }

    /// Anchor under a parent world matrix.
    #[must_use]
    pub fn anchored(mut self, parent_world: Mat4) -> Self {
        self.parent_world = parent_world;
        self
    }

    /// Appear fully grown — no pop-in animation.
    #[must_use]
    pub fn grown(mut self) -> Self {
        self.grown = true;
        self
    }
}

/// A placed decoration: the engine-side record binding a blueprint to its
/// pool slot and carrying the per-frame reactive state.
#[derive(Debug, Clone)]
pub struct PlacedDecor {
    pub(crate) id: DecorId,
    pub(crate) kind: DecorKind,
    pub(crate) parent_world: Mat4,
    pub(crate) local: Transform,
    /// World matrix as last written to the pool; `None` until the first
    /// sync. The dirty check compares against this by EXACT equality.
    pub(crate) last_synced: Option<Mat4>,
    pub(crate) glow: GlowState,
    pub(crate) sway: SwayState,
    /// Pool slot, or `None` when the batch was full at placement
    /// (degraded: alive but invisible).
    pub(crate) slot: Option<SlotIndex>,
    /// World-clock seconds at registration, or the grown sentinel.
    pub(crate) spawn_time: f32,
}

impl PlacedDecor {
    /// Entity id.
    #[must_use]
    pub fn id(&self) -> DecorId {
        self.id
    }

    /// Entity kind.
    #[must_use]
    pub fn kind(&self) -> DecorKind {
        self.kind
    }

    /// Pool slot, if one was available at placement.
    #[must_use]
    pub fn slot(&self) -> Option<SlotIndex> {
        self.slot
    }

    /// The authoritative local transform.
    #[must_use]
    pub fn local(&self) -> Transform {
        self.local
    }

    /// Mutable local transform. The next engine update picks the change up
    /// via the exact-equality dirty check.
    pub fn local_mut(&mut self) -> &mut Transform {
        &mut self.local
    }

    /// Replace the parent world matrix (e.g. the anchor chunk moved).
    pub fn set_parent_world(&mut self, parent_world: Mat4) {
        self.parent_world = parent_world;
    }

    /// Compose the current world matrix.
    #[must_use]
    pub fn world_matrix(&self) -> Mat4 {
        self.local.world_matrix(self.parent_world)
    }

    /// Spawn stamp in world-clock seconds (the grown sentinel for
    /// instances placed fully grown).
    #[must_use]
    pub fn spawn_time(&self) -> f32 {
        self.spawn_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blueprint_builder_defaults() {
        let d = Decor::new(DecorKind::Grass { height: 0.4 });
        assert_eq!(d.local, Transform::IDENTITY);
        assert_eq!(d.parent_world, Mat4::IDENTITY);
        assert!(!d.grown);
        assert!(Decor::new(DecorKind::Grass { height: 0.4 }).grown().grown);
    }

    #[test]
    fn category_is_stable_per_kind() {
        let berry = DecorKind::Berry {
            size: 0.2,
            color: Vec3::ONE,
        };
        assert_eq!(berry.category(), "berries");
        assert_eq!(DecorKind::CloudPuff { radius: 3.0 }.category(), "cloud_puffs");
    }
}
