//! Ember math types.
//!
//! Vectors come straight from `glam`; this crate adds the pieces a path
//! tracer needs on top: closed scalar intervals, axis-aligned bounding
//! boxes, rays, and a few vector helpers for scattering.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod transform;
mod vector;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::RotationY;
pub use vector::{reflect, refract, Color, Vec3Ext};
