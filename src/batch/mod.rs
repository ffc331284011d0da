//! Visual-category batches: one instance pool plus its slot registry.
//!
//! A [`DecorBatch`] is the unit one decoration category (flowers, grass,
//! berries, lanterns, cloud puffs) renders through — one draw call per
//! batch. It composes the fixed-capacity [`InstancePool`] with a
//! [`SlotRegistry`] and owns the three lifecycle paths: registration,
//! stale-guarded per-instance writes, and the zombie reclamation sweep.

pub mod pool;
pub mod records;
pub mod slots;

use glam::Mat4;
pub use pool::InstancePool;
pub use records::{LampInstance, PlantInstance, PuffInstance};
pub use slots::{Discipline, PoolFull, SlotIndex, SlotRegistry};

/// Matrix written into reclaimed slots. All zeros collapses the instance
/// to a degenerate point the rasterizer rejects, hiding it without
/// shrinking the draw range.
pub const HIDDEN: Mat4 = Mat4::ZERO;

/// One visual category: fixed-capacity pool + slot registry.
#[derive(Debug)]
pub struct DecorBatch<A> {
    pool: InstancePool<A>,
    registry: SlotRegistry,
    /// Scratch for sweep reclamation; empty in the steady state so sweeps
    /// stay allocation-free.
    reclaim_scratch: Vec<SlotIndex>,
}

impl<A: bytemuck::Pod> DecorBatch<A> {
    /// Create a batch with `capacity` slots and the given allocation
    /// discipline.
    #[must_use]
    pub fn new(
        label: &'static str,
        capacity: usize,
        discipline: Discipline,
    ) -> Self {
        Self {
            pool: InstancePool::new(label, capacity),
            registry: SlotRegistry::new(label, capacity, discipline),
            reclaim_scratch: Vec::new(),
        }
    }

    /// Register `owner` with its initial transform and attribute record.
    ///
    /// On success the slot is fully written and inside the draw range
    /// before this returns. On [`PoolFull`] nothing is mutated — the caller
    /// keeps its entity alive without a visual.
    pub fn register(
        &mut self,
        owner: u64,
        transform: Mat4,
        attributes: A,
    ) -> Result<SlotIndex, PoolFull> {
        let slot = self.registry.allocate(owner)?;
        self.pool.set_transform(slot.index(), transform);
        self.pool.set_attributes(slot.index(), attributes);
        self.pool.set_live_count(self.registry.high_water());
        Ok(slot)
    }

    /// Write a new world transform for `slot`, provided `owner` still owns
    /// it. Stale indices (reclaimed, possibly reissued) are ignored
    /// silently.
    pub fn update_instance(
        &mut self,
        owner: u64,
        slot: SlotIndex,
        transform: Mat4,
    ) {
        if !self.registry.is_current(slot, owner) {
            log::debug!(
                "stale transform update for pool '{}' slot {slot} ignored",
                self.pool.label()
            );
            return;
        }
        self.pool.set_transform(slot.index(), transform);
    }

    /// Mutate `slot`'s attribute record in place, provided `owner` still
    /// owns it. Stale indices are ignored silently.
    pub fn edit_attributes(
        &mut self,
        owner: u64,
        slot: SlotIndex,
        edit: impl FnOnce(&mut A),
    ) {
        if !self.registry.is_current(slot, owner) {
            log::debug!(
                "stale attribute edit for pool '{}' slot {slot} ignored",
                self.pool.label()
            );
            return;
        }
        self.pool.edit_attributes(slot.index(), edit);
    }

    /// Reclaim slots whose owners are no longer alive.
    ///
    /// Each reclaimed slot is zero-scaled (hidden, not removed from the
    /// draw range) and released to the registry — free-list batches will
    /// reissue the index, monotonic batches retire it. Returns the number
    /// of slots reclaimed. Detached entities stay visible until the sweep
    /// that catches them; at the engine's default cadence that is at most
    /// one frame.
    pub fn sweep(&mut self, mut is_live: impl FnMut(u64) -> bool) -> usize {
        self.reclaim_scratch.clear();
        for (slot, owner) in self.registry.owned() {
            if !is_live(owner) {
                self.reclaim_scratch.push(slot);
            }
        }
        for &slot in &self.reclaim_scratch {
            self.pool.set_transform(slot.index(), HIDDEN);
            self.registry.release(slot);
        }
        let reclaimed = self.reclaim_scratch.len();
        if reclaimed > 0 {
            log::debug!(
                "pool '{}': swept {reclaimed} zombie slot(s)",
                self.pool.label()
            );
        }
        reclaimed
    }

    /// The underlying instance pool (upload source).
    #[must_use]
    pub fn pool(&self) -> &InstancePool<A> {
        &self.pool
    }

    /// Mutable pool access for the upload layer (dirty-flag consumption).
    #[must_use]
    pub fn pool_mut(&mut self) -> &mut InstancePool<A> {
        &mut self.pool
    }

    /// The slot registry.
    #[must_use]
    pub fn registry(&self) -> &SlotRegistry {
        &self.registry
    }

    /// Category label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.pool.label()
    }

    /// Slot capacity fixed at construction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Draw range (includes hidden zombie slots for monotonic batches).
    #[must_use]
    pub fn live(&self) -> usize {
        self.pool.live()
    }

    /// Currently-owned slot count.
    #[must_use]
    pub fn active(&self) -> usize {
        self.registry.active()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[repr(C)]
    #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
    struct Attrs {
        glow: f32,
    }

    fn at(x: f32) -> Mat4 {
        Mat4::from_translation(Vec3::new(x, 0.0, 0.0))
    }

    #[test]
    fn register_grows_draw_range() {
        let mut batch = DecorBatch::<Attrs>::new("b", 4, Discipline::Monotonic);
        let a = batch.register(1, at(1.0), Attrs { glow: 0.0 }).unwrap();
        let b = batch.register(2, at(2.0), Attrs { glow: 0.0 }).unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(batch.live(), 2);
        assert_eq!(batch.pool().transforms()[1], at(2.0));
    }

    #[test]
    fn full_batch_refuses_without_mutation() {
        let mut batch = DecorBatch::<Attrs>::new("b", 1, Discipline::FreeList);
        let slot = batch.register(1, at(1.0), Attrs { glow: 0.5 }).unwrap();
        let writes_before = batch.pool().transform_writes();
        let err = batch.register(2, at(9.0), Attrs { glow: 9.0 }).unwrap_err();
        assert_eq!(err.capacity, 1);
        // No transform, attribute, or live-count changes happened.
        assert_eq!(batch.pool().transform_writes(), writes_before);
        assert_eq!(batch.pool().transforms()[slot.index()], at(1.0));
        assert_eq!(batch.pool().attributes()[slot.index()].glow, 0.5);
        assert_eq!(batch.live(), 1);
    }

    #[test]
    fn sweep_hides_and_recycles_free_list_slots() {
        let mut batch = DecorBatch::<Attrs>::new("b", 3, Discipline::FreeList);
        let _a = batch.register(1, at(1.0), Attrs { glow: 0.0 }).unwrap();
        let b = batch.register(2, at(2.0), Attrs { glow: 0.0 }).unwrap();
        let _c = batch.register(3, at(3.0), Attrs { glow: 0.0 }).unwrap();
        assert!(batch.register(4, at(4.0), Attrs { glow: 0.0 }).is_err());

        // Entity 2 despawns; the sweep reclaims its slot.
        let reclaimed = batch.sweep(|owner| owner != 2);
        assert_eq!(reclaimed, 1);
        assert_eq!(batch.pool().transforms()[b.index()], HIDDEN);
        // The draw range still covers all three slots.
        assert_eq!(batch.live(), 3);

        // The freed index is reissued to the next registration.
        let e = batch.register(5, at(5.0), Attrs { glow: 0.0 }).unwrap();
        assert_eq!(e, b);
        assert_eq!(batch.pool().transforms()[e.index()], at(5.0));
    }

    #[test]
    fn sweep_on_monotonic_batch_retires_slots() {
        let mut batch = DecorBatch::<Attrs>::new("b", 2, Discipline::Monotonic);
        let a = batch.register(1, at(1.0), Attrs { glow: 0.0 }).unwrap();
        let _b = batch.register(2, at(2.0), Attrs { glow: 0.0 }).unwrap();
        assert_eq!(batch.sweep(|owner| owner != 1), 1);
        assert_eq!(batch.pool().transforms()[a.index()], HIDDEN);
        // Retired, not recycled: the batch is still out of slots.
        assert!(batch.register(3, at(3.0), Attrs { glow: 0.0 }).is_err());
        assert_eq!(batch.active(), 1);
    }

    #[test]
    fn stale_update_is_ignored() {
        let mut batch = DecorBatch::<Attrs>::new("b", 2, Discipline::FreeList);
        let slot = batch.register(1, at(1.0), Attrs { glow: 0.0 }).unwrap();
        let _ = batch.sweep(|_| false);
        // Slot reissued to a different owner.
        let reissued = batch.register(9, at(9.0), Attrs { glow: 0.0 }).unwrap();
        assert_eq!(reissued, slot);

        // The old owner's write must not clobber the new registration.
        batch.update_instance(1, slot, at(42.0));
        batch.edit_attributes(1, slot, |a| a.glow = 42.0);
        assert_eq!(batch.pool().transforms()[slot.index()], at(9.0));
        assert_eq!(batch.pool().attributes()[slot.index()].glow, 0.0);

        // The current owner's write goes through.
        batch.update_instance(9, slot, at(10.0));
        assert_eq!(batch.pool().transforms()[slot.index()], at(10.0));
    }

    #[test]
    fn sweep_with_all_live_reclaims_nothing() {
        let mut batch = DecorBatch::<Attrs>::new("b", 4, Discipline::FreeList);
        let _a = batch.register(1, at(1.0), Attrs { glow: 0.0 }).unwrap();
        let _b = batch.register(2, at(2.0), Attrs { glow: 0.0 }).unwrap();
        let writes = batch.pool().transform_writes();
        assert_eq!(batch.sweep(|_| true), 0);
        assert_eq!(batch.pool().transform_writes(), writes);
    }
}
