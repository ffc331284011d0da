//! Per-frame shader globals shared by every batch pipeline.

use wgpu::util::DeviceExt;

use crate::frame::FrameState;

/// Frame-wide values every instance shader reads, packed for uniform
/// buffer layout (16-byte aligned rows).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameGlobalsUniform {
    /// Engine clock in seconds, for growth and sway curves.
    pub time: f32,
    /// Storm fraction in `[0, 1]`.
    pub weather_intensity: f32,
    /// Broadband audio pulse in `[0, 1]`.
    pub audio_pulse: f32,
    /// Row padding.
    pub _pad0: f32,
    /// World-space wind vector.
    pub wind: [f32; 3],
    /// Row padding.
    pub _pad1: f32,
}

impl FrameGlobalsUniform {
    /// Capture the uniform for one frame.
    #[must_use]
    pub fn from_frame(frame: &FrameState) -> Self {
        Self {
            time: frame.time,
            weather_intensity: frame.weather_intensity,
            audio_pulse: frame.audio.pulse,
            _pad0: 0.0,
            wind: frame.wind.to_array(),
            _pad1: 0.0,
        }
    }
}

impl Default for FrameGlobalsUniform {
    fn default() -> Self {
        Self::from_frame(&FrameState::still(0.0))
    }
}

/// Uniform buffer and bind group carrying [`FrameGlobalsUniform`].
pub struct FrameGlobals {
    uniform: FrameGlobalsUniform,
    buffer: wgpu::Buffer,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl FrameGlobals {
    /// Create the buffer and its bind group.
    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = FrameGlobalsUniform::default();

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frame globals buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame globals layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame globals bind group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Refresh the uniform from this frame's state and push it to the GPU.
    pub fn update(&mut self, queue: &wgpu::Queue, frame: &FrameState) {
        self.uniform = FrameGlobalsUniform::from_frame(frame);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }

    /// Layout for pipeline creation.
    #[must_use]
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Bind group for render passes.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// The last uploaded values.
    #[must_use]
    pub fn uniform(&self) -> &FrameGlobalsUniform {
        &self.uniform
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::frame::AudioLevels;

    #[test]
    fn uniform_is_two_aligned_rows() {
        assert_eq!(size_of::<FrameGlobalsUniform>(), 32);
    }

    #[test]
    fn capture_pulls_the_shader_facing_fields() {
        let frame = FrameState {
            time: 4.5,
            audio: AudioLevels {
                bass: 0.9,
                mids: 0.2,
                highs: 0.1,
                pulse: 0.7,
            },
            weather_intensity: 0.3,
            wind: Vec3::new(1.0, 0.0, -2.0),
            player_position: Vec3::ZERO,
        };
        let u = FrameGlobalsUniform::from_frame(&frame);
        assert_eq!(u.time, 4.5);
        assert_eq!(u.audio_pulse, 0.7);
        assert_eq!(u.weather_intensity, 0.3);
        assert_eq!(u.wind, [1.0, 0.0, -2.0]);
    }
}
