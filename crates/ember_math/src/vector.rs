//! Vector helpers used by the scattering code.

use crate::Vec3;

/// RGB color with linear components, usually in `[0, 1]` but unbounded for
/// emitters.
pub type Color = Vec3;

/// Components smaller than this are treated as zero.
const NEAR_ZERO: f32 = 1e-8;

/// Extension trait for `Vec3` with path-tracing specific queries.
pub trait Vec3Ext {
    /// True if every component is close to zero. Such a vector has no
    /// usable direction and must not be normalized.
    fn near_zero(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO && self.y.abs() < NEAR_ZERO && self.z.abs() < NEAR_ZERO
    }
}

/// Mirror `v` about the surface normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices on the incoming and
/// outgoing sides. The caller is responsible for handling total internal
/// reflection before calling this.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
