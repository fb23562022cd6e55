// Rotation about the Y axis.
//
// Used by instance wrappers to move rays into an object's local frame and
// hits back out again, without paying for a full Mat4.

use crate::{Aabb, Vec3};

/// A fixed rotation about the +Y axis, stored as its sine and cosine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationY {
    sin_theta: f32,
    cos_theta: f32,
}

impl RotationY {
    /// Create a rotation of `degrees` about +Y (right-handed).
    pub fn from_degrees(degrees: f32) -> Self {
        let (sin_theta, cos_theta) = degrees.to_radians().sin_cos();
        Self {
            sin_theta,
            cos_theta,
        }
    }

    /// Rotate a point or vector from world space into the rotated frame
    /// (rotation by `-angle`).
    #[inline]
    pub fn to_local(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x - self.sin_theta * v.z,
            v.y,
            self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    /// Rotate a point or vector from the rotated frame back into world space
    /// (rotation by `+angle`).
    #[inline]
    pub fn to_world(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x + self.sin_theta * v.z,
            v.y,
            -self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    /// World-space bounds of a local-space box.
    /// Computes the bounding box of all 8 rotated corners.
    pub fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        let lo = aabb.min();
        let hi = aabb.max();

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    let corner = Vec3::new(
                        if i == 1 { hi.x } else { lo.x },
                        if j == 1 { hi.y } else { lo.y },
                        if k == 1 { hi.z } else { lo.z },
                    );
                    let rotated = self.to_world(corner);
                    min = min.min(rotated);
                    max = max.max(rotated);
                }
            }
        }

        Aabb::from_points(min, max)
    }
}
