//! Local TRS transforms composed against a parent world matrix.

use glam::{Mat4, Quat, Vec3};

/// Translation / rotation / scale. The authoritative CPU-side transform of
/// a decoration; composed into a world matrix only when the synchronizer
/// needs to compare or upload it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position relative to the parent.
    pub translation: Vec3,
    /// Orientation relative to the parent.
    pub rotation: Quat,
    /// Non-uniform scale.
    pub scale: Vec3,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// A pure translation.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Compose into a local matrix (scale, then rotate, then translate).
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.translation,
        )
    }

    /// Compose into a world matrix under `parent_world`.
    #[must_use]
    pub fn world_matrix(&self, parent_world: Mat4) -> Mat4 {
        parent_world * self.matrix()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_composes_to_identity() {
        let t = Transform::IDENTITY;
        assert_eq!(t.matrix(), Mat4::IDENTITY);
        assert_eq!(t.world_matrix(Mat4::IDENTITY), Mat4::IDENTITY);
    }

    #[test]
    fn parent_translation_carries_into_world() {
        let local = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let parent = Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0));
        let world = local.world_matrix(parent);
        let origin = world.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn scale_applies_before_translation() {
        let t = Transform {
            translation: Vec3::new(5.0, 0.0, 0.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::splat(2.0),
        };
        let p = t.matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        // Scaled to x=2, then moved to x=7.
        assert!((p.x - 7.0).abs() < 1e-6);
    }

    #[test]
    fn recomposition_is_bitwise_stable() {
        // The dirty check relies on exact equality: composing the same
        // transform twice must produce identical bits.
        let t = Transform {
            translation: Vec3::new(0.3, 1.7, -2.2),
            rotation: Quat::from_rotation_y(0.73),
            scale: Vec3::new(1.0, 1.3, 1.0),
        };
        let parent = Mat4::from_translation(Vec3::new(10.0, 0.0, 4.0));
        assert_eq!(t.world_matrix(parent), t.world_matrix(parent));
    }
}
