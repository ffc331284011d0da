//! The generation-layer view of the world: placed decorations.
//!
//! [`DecorSet`] owns every [`PlacedDecor`] and is the reachability source
//! of truth for reclamation sweeps: an entity detached from the set is, by
//! definition, a zombie in whatever pool slot it still occupies. Detach
//! itself never touches a pool — the sweep is the single reclamation path.

mod entity;
mod transform;

use rustc_hash::FxHashMap;

pub use entity::{Decor, DecorId, DecorKind, PlacedDecor};
pub use transform::Transform;

/// Flat storage of placed decorations with O(1) id lookup.
///
/// Iteration order is insertion order disturbed only by `swap_remove` on
/// detach — stable enough for the per-frame walk, which doesn't care.
#[derive(Debug, Default)]
pub struct DecorSet {
    decors: Vec<PlacedDecor>,
    /// Raw id -> position in `decors`.
    index: FxHashMap<u64, usize>,
    next_id: u64,
}

impl DecorSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next entity id. Ids are monotonic and never reused.
    pub(crate) fn allocate_id(&mut self) -> DecorId {
        let id = DecorId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert a placed decoration (id must come from [`Self::allocate_id`]).
    pub(crate) fn insert(&mut self, placed: PlacedDecor) {
        let pos = self.decors.len();
        let prev = self.index.insert(placed.id.get(), pos);
        debug_assert!(prev.is_none(), "duplicate decor id {}", placed.id);
        self.decors.push(placed);
    }

    /// Remove `id` from the set. Returns whether it was present.
    ///
    /// The entity's pool slot is NOT touched here; the next sweep finds
    /// the orphaned slot and reclaims it.
    pub fn detach(&mut self, id: DecorId) -> bool {
        let Some(pos) = self.index.remove(&id.get()) else {
            return false;
        };
        let _ = self.decors.swap_remove(pos);
        if let Some(moved) = self.decors.get(pos) {
            let _ = self.index.insert(moved.id.get(), pos);
        }
        true
    }

    /// Whether `id` is still attached (the sweep's reachability test).
    #[must_use]
    pub fn contains(&self, id: DecorId) -> bool {
        self.index.contains_key(&id.get())
    }

    /// Look up a placed decoration.
    #[must_use]
    pub fn get(&self, id: DecorId) -> Option<&PlacedDecor> {
        self.index.get(&id.get()).map(|&pos| &self.decors[pos])
    }

    /// Mutable lookup (move an entity, retune its kind parameters).
    pub fn get_mut(&mut self, id: DecorId) -> Option<&mut PlacedDecor> {
        self.index
            .get(&id.get())
            .map(|&pos| &mut self.decors[pos])
    }

    /// Number of attached decorations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decors.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decors.is_empty()
    }

    /// Iterate all placed decorations.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedDecor> {
        self.decors.iter()
    }

    /// Iterate mutably (the synchronizer's per-frame walk).
    pub(crate) fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = &mut PlacedDecor> {
        self.decors.iter_mut()
    }
}
