//! Fixed-capacity GPU instance buffers.
//!
//! Pools never grow, so neither do their buffers: each one is allocated
//! at its exact capacity once and only ever rewritten. No reallocation
//! means bind groups and vertex-buffer bindings stay valid for the
//! engine's lifetime.

use std::marker::PhantomData;

use crate::batch::DecorBatch;
use crate::emitter::{BurstEmitter, SparkInstance};

/// Byte size of a buffer holding `capacity` items of `T`. Zero-capacity
/// pools still get one item's worth so the binding is never empty.
#[must_use]
pub fn buffer_size_bytes<T>(capacity: usize) -> u64 {
    (size_of::<T>() * capacity.max(1)) as u64
}

/// One GPU buffer of `T` records, sized once and never reallocated.
pub struct FixedInstanceBuffer<T> {
    buffer: wgpu::Buffer,
    /// Item capacity fixed at construction.
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> FixedInstanceBuffer<T> {
    /// Allocate the buffer at its final size.
    #[must_use]
    pub fn new(device: &wgpu::Device, label: &str, capacity: usize) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: buffer_size_bytes::<T>(capacity),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            capacity,
            _marker: PhantomData,
        }
    }

    /// Write `data` from offset zero. Writes past capacity are asserted
    /// in debug builds and truncated in release, mirroring the pool's
    /// write policy.
    pub fn upload(&self, queue: &wgpu::Queue, data: &[T]) {
        debug_assert!(
            data.len() <= self.capacity,
            "upload of {} items into capacity {}",
            data.len(),
            self.capacity
        );
        let n = data.len().min(self.capacity);
        if n > 0 {
            queue.write_buffer(
                &self.buffer,
                0,
                bytemuck::cast_slice(&data[..n]),
            );
        }
    }

    /// The underlying buffer, for vertex-buffer binding.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Item capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// The two per-batch instance streams: transforms and attribute records.
pub struct BatchBuffers<A> {
    transforms: FixedInstanceBuffer<glam::Mat4>,
    attributes: FixedInstanceBuffer<A>,
}

impl<A: bytemuck::Pod> BatchBuffers<A> {
    /// Allocate both streams for a batch of `capacity` slots.
    #[must_use]
    pub fn new(device: &wgpu::Device, label: &str, capacity: usize) -> Self {
        Self {
            transforms: FixedInstanceBuffer::new(
                device,
                &format!("{label} transforms"),
                capacity,
            ),
            attributes: FixedInstanceBuffer::new(
                device,
                &format!("{label} attributes"),
                capacity,
            ),
        }
    }

    /// Drain the batch's dirty flags and upload whichever streams
    /// changed this frame. Returns whether anything was written.
    ///
    /// Call exactly once per frame per batch, after
    /// [`crate::engine::GladeEngine::update`] — the flags are consumed
    /// here, so a second call in the same frame is a no-op.
    pub fn upload(
        &self,
        queue: &wgpu::Queue,
        batch: &mut DecorBatch<A>,
    ) -> bool {
        let pool = batch.pool_mut();
        let live = pool.live();
        let mut wrote = false;
        if pool.take_transforms_dirty() {
            self.transforms.upload(queue, &pool.transforms()[..live]);
            wrote = true;
        }
        if pool.take_attributes_dirty() {
            self.attributes.upload(queue, &pool.attributes()[..live]);
            wrote = true;
        }
        wrote
    }

    /// The transform stream.
    #[must_use]
    pub fn transforms(&self) -> &FixedInstanceBuffer<glam::Mat4> {
        &self.transforms
    }

    /// The attribute stream.
    #[must_use]
    pub fn attributes(&self) -> &FixedInstanceBuffer<A> {
        &self.attributes
    }
}

/// Instance stream for the transient ring.
pub struct EmitterBuffers {
    instances: FixedInstanceBuffer<SparkInstance>,
    /// Packing scratch, reused across frames.
    scratch: Vec<SparkInstance>,
    count: usize,
}

impl EmitterBuffers {
    /// Allocate the stream at the ring's capacity.
    #[must_use]
    pub fn new(device: &wgpu::Device, capacity: usize) -> Self {
        Self {
            instances: FixedInstanceBuffer::new(
                device,
                "transient instances",
                capacity,
            ),
            scratch: Vec::with_capacity(capacity),
            count: 0,
        }
    }

    /// Pack the active transients and upload them. Transients move every
    /// frame, so there is no dirty check to consult.
    pub fn upload(&mut self, queue: &wgpu::Queue, emitter: &BurstEmitter) {
        emitter.snapshot_into(&mut self.scratch);
        self.count = self.scratch.len();
        self.instances.upload(queue, &self.scratch);
    }

    /// Instances packed by the last upload (the draw's instance count).
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The instance stream.
    #[must_use]
    pub fn instances(&self) -> &FixedInstanceBuffer<SparkInstance> {
        &self.instances
    }
}
