//! Fixed per-instance attribute records, one layout per pool family.
//!
//! These are the `A` payloads of [`super::InstancePool`]. Layouts are
//! frozen at startup; the render stage's instance structs must match
//! them field-for-field.

/// Per-instance attributes for the flower, grass, and berry pools.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlantInstance {
    /// Tint multiplier (RGB); white for untinted categories.
    pub color: [f32; 3],
    /// Base size scalar: stalk height for flowers and grass, cluster
    /// radius for berries.
    pub size: f32,
    /// Sway phase in radians.
    pub sway_phase: f32,
    /// Emissive level, `0.0..=2.0`.
    pub glow: f32,
    /// World clock at registration; a far-past value means fully grown.
    pub spawn_time: f32,
    /// Keeps the record at 32 bytes.
    pub _pad: f32,
}

/// Per-instance attributes for the lantern pool.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LampInstance {
    /// Lamp glass color (RGB).
    pub color: [f32; 3],
    /// Emissive level, `0.0..=2.0`.
    pub glow: f32,
    /// Hanging height of the lamp body.
    pub height: f32,
    /// Pendulum phase in radians.
    pub swing_phase: f32,
    /// World clock at registration; a far-past value means fully grown.
    pub spawn_time: f32,
    /// Keeps the record at 32 bytes.
    pub _pad: f32,
}

/// Per-instance attributes for the cloud puff pool.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PuffInstance {
    /// Puff radius in world units.
    pub radius: f32,
    /// Slow billow phase in radians.
    pub wobble_phase: f32,
    /// Inner luminance, `0.0..=2.0`.
    pub glow: f32,
    /// World clock at registration; a far-past value means fully grown.
    pub spawn_time: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_layouts_are_stable() {
        // The render stage depends on these exact strides.
        assert_eq!(size_of::<PlantInstance>(), 32);
        assert_eq!(size_of::<LampInstance>(), 32);
        assert_eq!(size_of::<PuffInstance>(), 16);
    }

    #[test]
    fn zeroed_records_are_inert() {
        use bytemuck::Zeroable;
        let plant = PlantInstance::zeroed();
        assert_eq!(plant.glow, 0.0);
        assert_eq!(plant.spawn_time, 0.0);
    }
}
