//! Slot allocation and ownership tracking for fixed-capacity pools.
//!
//! A [`SlotRegistry`] hands out stable indices into a pool's instance
//! arrays and remembers which logical entity owns each slot. Two
//! disciplines exist: [`Discipline::Monotonic`] for categories placed once
//! and never despawned, and [`Discipline::FreeList`] for categories with
//! gameplay churn. Exhaustion is never fatal — the caller keeps its entity
//! alive without a visual and the registry logs one warning per full
//! episode.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stable index of a slot within one pool's instance arrays.
///
/// Valid for the lifetime of the registration that produced it; after the
/// owning entity is reclaimed the index may be reissued (free-list pools)
/// or permanently retired (monotonic pools).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(u32);

impl SlotIndex {
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The slot position as an array index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The raw index value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a registry hands out slots.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    /// `index = live_count; live_count += 1`. No free list; reclaimed slots
    /// stay hidden forever. Branch-free allocation for categories placed at
    /// world build and never despawned. Sustained churn will eventually
    /// exhaust the pool — accepted.
    #[default]
    Monotonic,
    /// Reclaimed indices go on a LIFO stack and are reissued before the
    /// live count grows. For categories with churn (eaten berries,
    /// recycled cloud puffs).
    FreeList,
}

/// A registration was refused because every slot is taken.
///
/// Recoverable-local: the requesting system keeps its logical entity alive
/// without a visual. Degraded visuals, never a crash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolFull {
    /// Label of the exhausted pool (visual category name).
    pub label: &'static str,
    /// The fixed capacity that was exhausted.
    pub capacity: usize,
}

impl fmt::Display for PoolFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool '{}' is full ({} slots)", self.label, self.capacity)
    }
}

impl std::error::Error for PoolFull {}

/// Slot allocator and owner table for one pool.
///
/// Owner keys are opaque `u64` values chosen by the caller (the engine uses
/// decor ids). The registry never interprets them beyond equality.
#[derive(Debug)]
pub struct SlotRegistry {
    label: &'static str,
    /// Slot -> owning entity, `None` for never-used or reclaimed slots.
    owners: Vec<Option<u64>>,
    /// Reclaimed indices awaiting reissue (free-list discipline only).
    free: Vec<SlotIndex>,
    discipline: Discipline,
    /// Count of slots ever allocated; equals the pool's draw range.
    high_water: usize,
    /// Currently-owned slot count.
    active: usize,
    /// Warn latch: set on the first refused registration of a full episode,
    /// cleared when a slot frees so the next episode warns again.
    full_warned: bool,
}

impl SlotRegistry {
    /// Create a registry for a pool with `capacity` slots.
    #[must_use]
    pub fn new(
        label: &'static str,
        capacity: usize,
        discipline: Discipline,
    ) -> Self {
        Self {
            label,
            owners: vec![None; capacity],
            free: Vec::new(),
            discipline,
            high_water: 0,
            active: 0,
            full_warned: false,
        }
    }

    /// Allocate a slot for `owner`.
    ///
    /// Free-list registries reissue the most recently reclaimed index
    /// first; only when the stack is empty does the live range grow. A
    /// refused allocation mutates nothing.
    pub fn allocate(&mut self, owner: u64) -> Result<SlotIndex, PoolFull> {
        if let Some(slot) = self.free.pop() {
            self.owners[slot.index()] = Some(owner);
            self.active += 1;
            return Ok(slot);
        }
        if self.high_water >= self.owners.len() {
            if !self.full_warned {
                log::warn!(
                    "pool '{}' full ({} slots); registrations are dropped \
                     until a slot frees",
                    self.label,
                    self.owners.len()
                );
                self.full_warned = true;
            }
            return Err(PoolFull {
                label: self.label,
                capacity: self.owners.len(),
            });
        }
        let slot = SlotIndex::new(self.high_water as u32);
        self.owners[self.high_water] = Some(owner);
        self.high_water += 1;
        self.active += 1;
        Ok(slot)
    }

    /// Release a slot back to the registry.
    ///
    /// Free-list registries push the index for reissue; monotonic
    /// registries only clear the owner (the slot stays retired). Releasing
    /// an unowned or out-of-range slot is ignored.
    pub fn release(&mut self, slot: SlotIndex) {
        debug_assert!(
            slot.index() < self.owners.len(),
            "release of out-of-range slot {slot}"
        );
        let Some(entry) = self.owners.get_mut(slot.index()) else {
            return;
        };
        if entry.take().is_some() {
            self.active -= 1;
            if self.discipline == Discipline::FreeList {
                self.free.push(slot);
            }
            // A slot freed: the next full episode is news again.
            self.full_warned = false;
        }
    }

    /// Whether `slot` is currently owned by `owner`.
    ///
    /// The stale-index guard: callers holding an index from a reclaimed
    /// registration fail this check and must drop their write.
    #[must_use]
    pub fn is_current(&self, slot: SlotIndex, owner: u64) -> bool {
        self.owners.get(slot.index()) == Some(&Some(owner))
    }

    /// Current owner of `slot`, if any.
    #[must_use]
    pub fn owner_of(&self, slot: SlotIndex) -> Option<u64> {
        self.owners.get(slot.index()).copied().flatten()
    }

    /// Iterate `(slot, owner)` over currently-owned slots.
    pub fn owned(&self) -> impl Iterator<Item = (SlotIndex, u64)> + '_ {
        self.owners.iter().enumerate().filter_map(|(i, owner)| {
            owner.map(|id| (SlotIndex::new(i as u32), id))
        })
    }

    /// Total slot count.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.owners.len()
    }

    /// Count of slots ever allocated — the pool's draw range.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Currently-owned slot count.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    /// The allocation discipline.
    #[must_use]
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(capacity: usize, discipline: Discipline) -> SlotRegistry {
        SlotRegistry::new("test", capacity, discipline)
    }

    #[test]
    fn allocates_unique_indices_within_capacity() {
        let mut reg = registry(8, Discipline::Monotonic);
        let mut seen = std::collections::HashSet::new();
        for owner in 0..8u64 {
            let slot = reg.allocate(owner).unwrap();
            assert!(slot.index() < 8);
            assert!(seen.insert(slot), "index {slot} issued twice");
        }
        assert_eq!(reg.high_water(), 8);
        assert_eq!(reg.active(), 8);
    }

    #[test]
    fn refuses_when_full_without_mutation() {
        let mut reg = registry(2, Discipline::Monotonic);
        let a = reg.allocate(1).unwrap();
        let b = reg.allocate(2).unwrap();
        let err = reg.allocate(3).unwrap_err();
        assert_eq!(err.capacity, 2);
        // Existing registrations untouched.
        assert!(reg.is_current(a, 1));
        assert!(reg.is_current(b, 2));
        assert_eq!(reg.high_water(), 2);
        assert_eq!(reg.active(), 2);
    }

    #[test]
    fn monotonic_never_reuses_released_slots() {
        let mut reg = registry(2, Discipline::Monotonic);
        let a = reg.allocate(1).unwrap();
        let _ = reg.allocate(2).unwrap();
        reg.release(a);
        assert_eq!(reg.active(), 1);
        // The released index is retired, so churn starves the pool.
        assert!(reg.allocate(3).is_err());
        assert_eq!(reg.high_water(), 2);
    }

    #[test]
    fn free_list_reissues_most_recent_release_first() {
        let mut reg = registry(4, Discipline::FreeList);
        let a = reg.allocate(1).unwrap();
        let b = reg.allocate(2).unwrap();
        reg.release(a);
        reg.release(b);
        // LIFO: b's index comes back before a's.
        assert_eq!(reg.allocate(3).unwrap(), b);
        assert_eq!(reg.allocate(4).unwrap(), a);
        // Stack empty again: growth resumes past the high-water mark.
        assert_eq!(reg.allocate(5).unwrap().index(), 2);
    }

    #[test]
    fn stale_owner_fails_current_check() {
        let mut reg = registry(2, Discipline::FreeList);
        let slot = reg.allocate(7).unwrap();
        reg.release(slot);
        assert!(!reg.is_current(slot, 7));
        // Reissued to a new owner: the old owner is still stale.
        let reissued = reg.allocate(8).unwrap();
        assert_eq!(reissued, slot);
        assert!(reg.is_current(slot, 8));
        assert!(!reg.is_current(slot, 7));
    }

    #[test]
    fn release_of_unowned_slot_is_ignored() {
        let mut reg = registry(2, Discipline::FreeList);
        let slot = reg.allocate(1).unwrap();
        reg.release(slot);
        reg.release(slot); // double release: no-op
        assert_eq!(reg.active(), 0);
        // Only one copy of the index on the free stack.
        let first = reg.allocate(2).unwrap();
        let second = reg.allocate(3).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn owned_iterates_live_slots_only() {
        let mut reg = registry(4, Discipline::FreeList);
        let a = reg.allocate(10).unwrap();
        let b = reg.allocate(20).unwrap();
        let c = reg.allocate(30).unwrap();
        reg.release(b);
        let owned: Vec<_> = reg.owned().collect();
        assert_eq!(owned, vec![(a, 10), (c, 30)]);
    }
}
