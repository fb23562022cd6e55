//! Planar quadrilateral primitive, and boxes built from six of them.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    Material, Ray,
};
use ember_math::{Aabb, Interval, Vec3};

/// Rays whose direction is closer than this to the plane are treated as
/// parallel and never hit.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A parallelogram spanned by corner `q` and edge vectors `u` and `v`.
pub struct Quad {
    q: Vec3,
    u: Vec3,
    v: Vec3,
    /// `n / dot(n, n)` for the unnormalized plane normal `n = u x v`.
    w: Vec3,
    normal: Vec3,
    /// Plane constant: `dot(normal, p) = d` for every point in the plane.
    d: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Quad {
    /// Create a quad from a corner and two edges.
    ///
    /// Edges must not be parallel; a degenerate quad never reports a hit.
    pub fn new(q: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        let n = u.cross(v);
        let nn = n.dot(n);
        let normal = n.normalize_or_zero();
        let w = if nn > 0.0 { n / nn } else { Vec3::ZERO };
        let d = normal.dot(q);

        // Both diagonals, so negative edge vectors still give a tight box
        let diagonal1 = Aabb::from_points(q, q + u + v);
        let diagonal2 = Aabb::from_points(q + u, q + v);
        let bbox = Aabb::surrounding(&diagonal1, &diagonal2);

        Self {
            q,
            u,
            v,
            w,
            normal,
            d,
            material,
            bbox,
        }
    }
}

impl Hittable for Quad {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denom = self.normal.dot(ray.direction());

        // No hit if the ray is parallel to the plane (or the quad is degenerate)
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.contains(t) {
            return None;
        }

        // Planar coordinates of the hit relative to q
        let planar_hitpt = ray.at(t) - self.q;
        let alpha = self.w.dot(planar_hitpt.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar_hitpt));

        if !Interval::UNIT.contains(alpha) || !Interval::UNIT.contains(beta) {
            return None;
        }

        Some(HitRecord::new(
            ray,
            t,
            self.normal,
            (alpha, beta),
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}

/// The closed axis-aligned box spanned by opposite corners `a` and `b`,
/// as six outward-facing quads sharing one material.
pub fn make_box(a: Vec3, b: Vec3, material: Arc<dyn Material>) -> HittableList {
    let mut sides = HittableList::new();

    let min = a.min(b);
    let max = a.max(b);

    let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
    let dy = Vec3::new(0.0, max.y - min.y, 0.0);
    let dz = Vec3::new(0.0, 0.0, max.z - min.z);

    let faces = [
        (Vec3::new(min.x, min.y, max.z), dx, dy),  // front
        (Vec3::new(max.x, min.y, max.z), -dz, dy), // right
        (Vec3::new(max.x, min.y, min.z), -dx, dy), // back
        (Vec3::new(min.x, min.y, min.z), dz, dy),  // left
        (Vec3::new(min.x, max.y, max.z), dx, -dz), // top
        (Vec3::new(min.x, min.y, min.z), dx, dz),  // bottom
    ];

    for (q, u, v) in faces {
        sides.push(Quad::new(q, u, v, material.clone()));
    }

    sides
}
