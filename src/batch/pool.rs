//! Fixed-capacity instance storage for one visual category.
//!
//! An [`InstancePool`] owns the CPU-side mirror of two GPU buffers: a
//! transform array (one 4x4 matrix per slot) and a pool-specific attribute
//! array (one `#[repr(C)]` record per slot). Both are allocated at full
//! capacity up front and never grow, so the GPU buffers created against
//! them never reallocate and bind groups stay valid for the pool's
//! lifetime.
//!
//! Dirty signaling is one bool per buffer: any write within a frame raises
//! the flag, the upload layer takes it once, and repeated writes are
//! idempotent. Write-count probes expose how many slot writes actually
//! happened — the skip paths in the synchronizer are verified against them.

use glam::Mat4;

/// CPU-side instance arrays for one pool, generic over the attribute
/// record `A` (a `#[repr(C)]` plain-old-data struct, cast directly into
/// the GPU upload).
#[derive(Debug)]
pub struct InstancePool<A> {
    label: &'static str,
    transforms: Vec<Mat4>,
    attributes: Vec<A>,
    /// Draw range: the GPU renders instances `0..live`.
    live: usize,
    transforms_dirty: bool,
    attributes_dirty: bool,
    transform_writes: u64,
    attribute_writes: u64,
}

impl<A: bytemuck::Pod> InstancePool<A> {
    /// Allocate a pool with `capacity` slots. Both arrays are sized once,
    /// here, and never again.
    #[must_use]
    pub fn new(label: &'static str, capacity: usize) -> Self {
        Self {
            label,
            transforms: vec![Mat4::IDENTITY; capacity],
            attributes: vec![A::zeroed(); capacity],
            live: 0,
            transforms_dirty: false,
            attributes_dirty: false,
            transform_writes: 0,
            attribute_writes: 0,
        }
    }

    /// Write a slot's world transform and raise the transform dirty flag.
    ///
    /// Out-of-range writes assert in debug builds and are ignored in
    /// release builds.
    pub fn set_transform(&mut self, index: usize, transform: Mat4) {
        debug_assert!(
            index < self.transforms.len(),
            "transform write past pool '{}' capacity: {index}",
            self.label
        );
        let Some(slot) = self.transforms.get_mut(index) else {
            return;
        };
        *slot = transform;
        self.transform_writes += 1;
        self.transforms_dirty = true;
    }

    /// Write a slot's full attribute record and raise the attribute dirty
    /// flag.
    ///
    /// Out-of-range writes assert in debug builds and are ignored in
    /// release builds.
    pub fn set_attributes(&mut self, index: usize, record: A) {
        debug_assert!(
            index < self.attributes.len(),
            "attribute write past pool '{}' capacity: {index}",
            self.label
        );
        let Some(slot) = self.attributes.get_mut(index) else {
            return;
        };
        *slot = record;
        self.attribute_writes += 1;
        self.attributes_dirty = true;
    }

    /// Mutate a slot's attribute record in place.
    ///
    /// The per-frame reactive path uses this so registration-time fields
    /// (spawn stamp, per-instance constants) survive frame updates.
    pub fn edit_attributes(&mut self, index: usize, edit: impl FnOnce(&mut A)) {
        debug_assert!(
            index < self.attributes.len(),
            "attribute edit past pool '{}' capacity: {index}",
            self.label
        );
        let Some(slot) = self.attributes.get_mut(index) else {
            return;
        };
        edit(slot);
        self.attribute_writes += 1;
        self.attributes_dirty = true;
    }

    /// Set the draw range (clamped to capacity).
    pub fn set_live_count(&mut self, live: usize) {
        debug_assert!(
            live <= self.transforms.len(),
            "live count {live} past pool '{}' capacity",
            self.label
        );
        self.live = live.min(self.transforms.len());
    }

    /// Read-and-clear the transform dirty flag. The upload layer calls this
    /// once per frame; a `true` means exactly one buffer upload.
    #[must_use]
    pub fn take_transforms_dirty(&mut self) -> bool {
        std::mem::take(&mut self.transforms_dirty)
    }

    /// Read-and-clear the attribute dirty flag.
    #[must_use]
    pub fn take_attributes_dirty(&mut self) -> bool {
        std::mem::take(&mut self.attributes_dirty)
    }

    /// The pool label (visual category name).
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Slot capacity fixed at construction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.transforms.len()
    }

    /// Draw range: the GPU renders instances `0..live()`.
    #[must_use]
    pub fn live(&self) -> usize {
        self.live
    }

    /// The full transform array (upload source).
    #[must_use]
    pub fn transforms(&self) -> &[Mat4] {
        &self.transforms
    }

    /// The full attribute array (upload source).
    #[must_use]
    pub fn attributes(&self) -> &[A] {
        &self.attributes
    }

    /// Total transform slot writes since construction (probe).
    #[must_use]
    pub fn transform_writes(&self) -> u64 {
        self.transform_writes
    }

    /// Total attribute slot writes since construction (probe).
    #[must_use]
    pub fn attribute_writes(&self) -> u64 {
        self.attribute_writes
    }
}

#[cfg(test)]
mod tests {
    use bytemuck::Zeroable;
    use glam::Vec3;

    use super::*;

    #[repr(C)]
    #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
    struct TestAttrs {
        glow: f32,
        spawn_time: f32,
    }

    #[test]
    fn writes_raise_dirty_flags_once() {
        let mut pool = InstancePool::<TestAttrs>::new("test", 4);
        pool.set_transform(0, Mat4::from_translation(Vec3::X));
        pool.set_transform(1, Mat4::from_translation(Vec3::Y));
        assert!(pool.take_transforms_dirty());
        // Flag cleared until the next write.
        assert!(!pool.take_transforms_dirty());
        pool.set_transform(0, Mat4::IDENTITY);
        assert!(pool.take_transforms_dirty());
    }

    #[test]
    fn write_probes_count_slot_writes() {
        let mut pool = InstancePool::<TestAttrs>::new("test", 4);
        assert_eq!(pool.transform_writes(), 0);
        pool.set_transform(0, Mat4::IDENTITY);
        pool.set_transform(1, Mat4::IDENTITY);
        pool.edit_attributes(0, |a| a.glow = 1.0);
        assert_eq!(pool.transform_writes(), 2);
        assert_eq!(pool.attribute_writes(), 1);
    }

    #[test]
    fn edit_preserves_registration_fields() {
        let mut pool = InstancePool::<TestAttrs>::new("test", 2);
        pool.set_attributes(
            0,
            TestAttrs {
                glow: 0.0,
                spawn_time: 12.5,
            },
        );
        pool.edit_attributes(0, |a| a.glow = 1.5);
        assert_eq!(pool.attributes()[0].glow, 1.5);
        assert_eq!(pool.attributes()[0].spawn_time, 12.5);
    }

    #[test]
    fn live_count_sets_draw_range() {
        let mut pool = InstancePool::<TestAttrs>::new("test", 3);
        pool.set_live_count(2);
        assert_eq!(pool.live(), 2);
        pool.set_live_count(3);
        assert_eq!(pool.live(), 3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "transform write past pool")]
    fn out_of_range_write_asserts_in_debug() {
        let mut pool = InstancePool::<TestAttrs>::new("test", 2);
        pool.set_transform(5, Mat4::IDENTITY);
    }

    #[test]
    fn capacity_never_changes() {
        let mut pool = InstancePool::<TestAttrs>::new("test", 8);
        for i in 0..8 {
            pool.set_transform(i, Mat4::IDENTITY);
            pool.set_attributes(i, TestAttrs::zeroed());
        }
        pool.set_live_count(8);
        assert_eq!(pool.capacity(), 8);
        assert_eq!(pool.transforms().len(), 8);
        assert_eq!(pool.attributes().len(), 8);
    }
}
