//! Circular-buffer transient emitter.
//!
//! Impact sparks, rain, mist — short-lived effects that must NEVER refuse
//! to spawn. The emitter is a fixed ring: `spawn` writes the slot under
//! the head and advances it modulo capacity, overwriting the oldest slot
//! when full. Under extreme load a visible transient vanishes a little
//! early; that beats both backpressure and allocation.

pub mod profile;

use glam::Vec3;
use rand::Rng;
pub use profile::{ParticleKind, ParticleProfile, ProfileTable};

use crate::options::ParticleOptions;

/// Largest integration step, seconds. Frame hitches are clamped so a
/// stall can't tunnel particles through the ground plane.
const MAX_STEP: f32 = 0.1;

/// One ring slot.
#[derive(Debug, Clone, Copy)]
struct Particle {
    position: Vec3,
    velocity: Vec3,
    age: f32,
    lifespan: f32,
    size: f32,
    color: [f32; 4],
    gravity_scale: f32,
    drag: f32,
    kind: ParticleKind,
    active: bool,
}

impl Particle {
    fn inactive() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            age: 0.0,
            lifespan: 0.0,
            size: 0.0,
            color: [0.0; 4],
            gravity_scale: 0.0,
            drag: 0.0,
            kind: ParticleKind::Jump,
            active: false,
        }
    }
}

/// GPU-facing packed record for one transient sprite.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SparkInstance {
    /// World position.
    pub position: [f32; 3],
    /// Render size in world units.
    pub size: f32,
    /// RGBA tint.
    pub color: [f32; 4],
}

/// Optional per-spawn overrides layered on top of the kind profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnOptions {
    /// Replace the profile tint.
    pub color: Option<[f32; 4]>,
    /// Replace the profile spawn direction (then the spread cone applies).
    pub direction: Option<Vec3>,
    /// Multiplier on the sampled initial speed.
    pub speed_scale: f32,
}

impl Default for SpawnOptions {
    fn default() -> Self {
        Self {
            color: None,
            direction: None,
            speed_scale: 1.0,
        }
    }
}

/// Fixed-capacity ring of transient particles.
#[derive(Debug)]
pub struct BurstEmitter {
    slots: Vec<Particle>,
    /// Next slot to write; only ever advances modulo capacity.
    head: usize,
    profiles: ProfileTable,
    /// World gravity magnitude (positive pulls down).
    gravity: f32,
    /// Particles crossing below this plane deactivate.
    ground_y: f32,
    /// Beat pulse fed by the engine each frame; boosts displacement.
    audio_pulse: f32,
}

impl BurstEmitter {
    /// Build the ring from particle options. Capacity is fixed here and
    /// never changes.
    #[must_use]
    pub fn new(options: &ParticleOptions) -> Self {
        Self {
            slots: vec![Particle::inactive(); options.capacity.max(1)],
            head: 0,
            profiles: options.profiles,
            gravity: options.gravity,
            ground_y: options.ground_y,
            audio_pulse: 0.0,
        }
    }

    /// Spawn one particle of `kind` at `position`. Always succeeds: when
    /// the ring is full the oldest slot is overwritten. Returns the slot
    /// written.
    pub fn spawn(
        &mut self,
        position: Vec3,
        kind: ParticleKind,
        opts: &SpawnOptions,
    ) -> usize {
        let profile = self.profiles.get(kind);
        let mut rng = rand::rng();

        let axis = opts
            .direction
            .unwrap_or_else(|| Vec3::from_array(profile.direction))
            .try_normalize()
            .unwrap_or(Vec3::Y);
        let direction = sample_cone(&mut rng, axis, profile.spread);
        let speed =
            sample_range(&mut rng, profile.speed) * opts.speed_scale;

        let slot = self.head;
        self.slots[slot] = Particle {
            position,
            velocity: direction * speed,
            age: 0.0,
            lifespan: sample_range(&mut rng, profile.lifespan),
            size: sample_range(&mut rng, profile.size),
            color: opts.color.unwrap_or(profile.color),
            gravity_scale: profile.gravity_scale,
            drag: profile.drag,
            kind,
            active: true,
        };
        self.head = (self.head + 1) % self.slots.len();
        slot
    }

    /// Spawn a full burst of `kind` (the profile's configured count).
    /// Returns the number spawned.
    pub fn burst(&mut self, position: Vec3, kind: ParticleKind) -> usize {
        let count = self.profiles.get(kind).count as usize;
        for _ in 0..count {
            let _ = self.spawn(position, kind, &SpawnOptions::default());
        }
        count
    }

    /// Integrate one frame: age, gravity (scaled per kind, negative
    /// floats), drag, displacement. Slots past their lifespan or below
    /// the ground plane deactivate. O(capacity), allocation-free.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_STEP);
        if dt == 0.0 {
            return;
        }
        let boost = 1.0 + self.audio_pulse * 2.0;
        for p in &mut self.slots {
            if !p.active {
                continue;
            }
            p.age += dt;
            if p.age > p.lifespan {
                p.active = false;
                continue;
            }
            p.velocity.y -= self.gravity * p.gravity_scale * dt;
            let damping = (1.0 - p.drag * dt).max(0.0);
            p.velocity *= damping;
            p.position += p.velocity * dt * boost;
            if p.position.y < self.ground_y {
                p.active = false;
            }
        }
    }

    /// Set this frame's beat pulse (displacement boost `1 + pulse * 2`).
    pub fn set_audio_pulse(&mut self, pulse: f32) {
        self.audio_pulse = pulse.clamp(0.0, 1.0);
    }

    /// Pack active slots into GPU instance records. Clears and refills
    /// `out`; the caller keeps the buffer across frames to avoid
    /// reallocation.
    pub fn snapshot_into(&self, out: &mut Vec<SparkInstance>) {
        out.clear();
        for p in &self.slots {
            if !p.active {
                continue;
            }
            out.push(SparkInstance {
                position: p.position.to_array(),
                size: p.size,
                color: p.color,
            });
        }
    }

    /// Ring capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Currently-active slot count.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.active).count()
    }

    /// Next slot the ring will write.
    #[must_use]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Kind held by an active slot (`None` for inactive or out of range).
    #[must_use]
    pub fn kind_at(&self, index: usize) -> Option<ParticleKind> {
        self.slots
            .get(index)
            .and_then(|p| p.active.then_some(p.kind))
    }
}

/// Sample `[min, max]`, tolerating inverted or degenerate ranges from
/// hand-edited presets.
fn sample_range(rng: &mut impl Rng, range: [f32; 2]) -> f32 {
    let lo = range[0].min(range[1]);
    let hi = range[0].max(range[1]);
    if hi > lo {
        rng.random_range(lo..=hi)
    } else {
        lo
    }
}

/// Uniform direction within a cone of `half_angle` around `axis`;
/// `half_angle >= PI` degenerates to a uniform sphere.
fn sample_cone(rng: &mut impl Rng, axis: Vec3, half_angle: f32) -> Vec3 {
    use std::f32::consts::{PI, TAU};

    let cos_min = if half_angle >= PI {
        -1.0
    } else {
        half_angle.max(0.0).cos()
    };
    let cos_theta = rng.random_range(cos_min..=1.0_f32);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = rng.random_range(0.0..TAU);

    let tangent = axis.any_orthonormal_vector();
    let bitangent = axis.cross(tangent);
    axis * cos_theta
        + (tangent * phi.cos() + bitangent * phi.sin()) * sin_theta
}
