//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over shared hittables. Every node owns exactly two
//! children; a single object is stored on both sides of its leaf so
//! traversal never needs an empty case.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::{HitRecord, Hittable, HittableList, Ray, RenderError, RenderResult};
use ember_math::{Aabb, Interval};
use rand::Rng;

/// Interior node of a BVH.
pub struct BvhNode {
    left: Arc<dyn Hittable>,
    right: Arc<dyn Hittable>,
    bbox: Aabb,
    depth: usize,
}

impl BvhNode {
    /// Build a BVH over `objects`.
    ///
    /// The split axis at each level is drawn from `rng`. Fails if the list
    /// is empty or any object has no bounding box.
    pub fn new<R: Rng + ?Sized>(
        objects: Vec<Arc<dyn Hittable>>,
        rng: &mut R,
    ) -> RenderResult<Self> {
        if objects.is_empty() {
            return Err(RenderError::EmptyScene);
        }

        let mut entries = objects
            .into_iter()
            .map(|object| {
                object
                    .bounding_box()
                    .map(|bbox| (object, bbox))
                    .ok_or(RenderError::MissingBoundingBox)
            })
            .collect::<RenderResult<Vec<_>>>()?;

        let node = Self::build(&mut entries, rng);
        log::debug!(
            "Built BVH over {} objects, depth {}",
            entries.len(),
            node.depth
        );
        Ok(node)
    }

    /// Number of node levels from this node down to the deepest leaf pair.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Build a BVH from the objects of a list.
    pub fn from_list<R: Rng + ?Sized>(list: HittableList, rng: &mut R) -> RenderResult<Self> {
        Self::new(list.into_objects(), rng)
    }

    /// Recursive construction: sort the span on a random axis by box
    /// minimum, split in half, recurse.
    fn build<R: Rng + ?Sized>(entries: &mut [(Arc<dyn Hittable>, Aabb)], rng: &mut R) -> Self {
        let bbox = entries
            .iter()
            .skip(1)
            .fold(entries[0].1, |acc, (_, b)| Aabb::surrounding(&acc, b));

        let axis = rng.gen_range(0..3);
        let compare = |a: &(Arc<dyn Hittable>, Aabb), b: &(Arc<dyn Hittable>, Aabb)| -> Ordering {
            a.1.axis_interval(axis)
                .min
                .total_cmp(&b.1.axis_interval(axis).min)
        };

        type Children = (Arc<dyn Hittable>, Arc<dyn Hittable>, usize);
        let (left, right, depth): Children = match entries.len() {
            1 => (entries[0].0.clone(), entries[0].0.clone(), 1),
            2 => {
                if compare(&entries[0], &entries[1]) == Ordering::Greater {
                    entries.swap(0, 1);
                }
                (entries[0].0.clone(), entries[1].0.clone(), 1)
            }
            n => {
                entries.sort_by(compare);
                let (lower, upper) = entries.split_at_mut(n / 2);
                let lower = Self::build(lower, rng);
                let upper = Self::build(upper, rng);
                let depth = 1 + lower.depth.max(upper.depth);
                (Arc::new(lower), Arc::new(upper), depth)
            }
        };

        Self {
            left,
            right,
            bbox,
            depth,
        }
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        if !self.bbox.hit(ray, ray_t) {
            return None;
        }

        let hit_left = self.left.hit(ray, ray_t);

        // Only check right up to closest hit
        let right_max = hit_left.as_ref().map_or(ray_t.max, |rec| rec.t);
        let hit_right = self.right.hit(ray, Interval::new(ray_t.min, right_max));

        hit_right.or(hit_left)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}
