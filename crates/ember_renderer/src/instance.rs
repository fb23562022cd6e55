//! Instance wrappers that place a shared object in the scene.
//!
//! Rather than copying geometry into world space, each wrapper moves the
//! incoming ray into the child's local space, intersects there, and maps
//! the resulting hit back out. The child can be any hittable, including a
//! list or another wrapper.
//!
//! # Example
//! ```ignore
//! let cube: Arc<dyn Hittable> = Arc::new(make_box(Vec3::ZERO, Vec3::splat(165.0), white));
//! let cube = Arc::new(RotateY::new(cube, 15.0));
//! let cube = Arc::new(Translate::new(cube, Vec3::new(265.0, 0.0, 295.0)));
//! ```

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Ray,
};
use ember_math::{Aabb, Interval, RotationY, Vec3};

/// Moves a child object by a fixed offset.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
    bbox: Option<Aabb>,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        let bbox = object.bounding_box().map(|b| b.translate(offset));
        Self {
            object,
            offset,
            bbox,
        }
    }
}

impl Hittable for Translate {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // Move the ray backwards by the offset
        let offset_ray = Ray::new(ray.origin() - self.offset, ray.direction());

        let mut rec = self.object.hit(&offset_ray, ray_t)?;

        // Move the intersection point forwards by the offset
        rec.p += self.offset;
        Some(rec)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.bbox
    }
}

/// Rotates a child object about the world Y axis.
pub struct RotateY {
    object: Arc<dyn Hittable>,
    rotation: RotationY,
    bbox: Option<Aabb>,
}

impl RotateY {
    /// Rotate `object` by `angle` degrees (counter-clockwise seen from +Y).
    ///
    /// The world-space box is computed once here from the child's box.
    pub fn new(object: Arc<dyn Hittable>, angle: f32) -> Self {
        let rotation = RotationY::from_degrees(angle);
        let bbox = object.bounding_box().map(|b| rotation.transform_aabb(&b));
        Self {
            object,
            rotation,
            bbox,
        }
    }
}

impl Hittable for RotateY {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // Transform the ray from world space to object space
        let local_ray = Ray::new(
            self.rotation.to_local(ray.origin()),
            self.rotation.to_local(ray.direction()),
        );

        let mut rec = self.object.hit(&local_ray, ray_t)?;

        // Rotation preserves dot products, so front_face is still valid
        rec.p = self.rotation.to_world(rec.p);
        rec.normal = self.rotation.to_world(rec.normal);
        Some(rec)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{make_box, HittableList, Lambertian, Material, Sphere};
    use ember_math::Color;

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    }

    #[test]
    fn test_translate_moves_hit_point() {
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::ZERO, 1.0, grey()));
        let moved = Translate::new(sphere, Vec3::new(10.0, 0.0, 0.0));

        let ray = Ray::new(Vec3::new(10.0, 0.0, 5.0), Vec3::NEG_Z);
        let rec = moved.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!((rec.p - Vec3::new(10.0, 0.0, 1.0)).length() < 1e-5);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);

        // The original location is now empty
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(moved.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_translate_bounding_box() {
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::ZERO, 1.0, grey()));
        let moved = Translate::new(sphere, Vec3::new(0.0, 3.0, 0.0));

        let bbox = moved.bounding_box().unwrap();
        assert_eq!(bbox.y, Interval::new(2.0, 4.0));
    }

    #[test]
    fn test_rotate_y_hit_and_normal() {
        // Long thin box along +X, rotated a quarter turn so it lies along -Z
        let slab: Arc<dyn Hittable> =
            Arc::new(make_box(Vec3::ZERO, Vec3::new(4.0, 1.0, 1.0), grey()));
        let rotated = RotateY::new(slab, 90.0);

        // Rotated box occupies x in [0, 1], z in [-4, 0]
        let ray = Ray::new(Vec3::new(0.5, 0.5, -10.0), Vec3::Z);
        let rec = rotated.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 6.0).abs() < 1e-3);
        assert!((rec.p - Vec3::new(0.5, 0.5, -4.0)).length() < 1e-3);
        assert!((rec.normal - Vec3::NEG_Z).length() < 1e-4);
        assert!(rec.front_face);

        // Where the unrotated box used to extend is now empty
        let ray = Ray::new(Vec3::new(3.0, 0.5, 10.0), Vec3::NEG_Z);
        assert!(rotated.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_rotate_y_bounding_box() {
        let slab: Arc<dyn Hittable> =
            Arc::new(make_box(Vec3::ZERO, Vec3::new(4.0, 1.0, 1.0), grey()));
        let bbox = RotateY::new(slab, 90.0).bounding_box().unwrap();

        assert!((bbox.x.max - 1.0).abs() < 1e-3);
        assert!((bbox.z.min + 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_wrappers_propagate_missing_bounding_box() {
        let empty: Arc<dyn Hittable> = Arc::new(HittableList::new());
        assert!(Translate::new(empty.clone(), Vec3::ONE).bounding_box().is_none());
        assert!(RotateY::new(empty, 30.0).bounding_box().is_none());
    }
}
