//! GPU upload layer.
//!
//! The engine itself never talks to wgpu; it fills CPU-side pools and
//! raises dirty flags. These types move that data onto the device:
//! fixed-capacity instance buffers for the batches and the transient
//! ring, plus the per-frame globals uniform. The embedder owns the
//! device and queue and calls the upload methods once per frame.

/// Per-frame shader globals uniform and bind group.
pub mod globals;
/// Fixed-capacity instance buffers for batches and transients.
pub mod instance_buffer;

pub use globals::{FrameGlobals, FrameGlobalsUniform};
pub use instance_buffer::{BatchBuffers, EmitterBuffers, FixedInstanceBuffer};
