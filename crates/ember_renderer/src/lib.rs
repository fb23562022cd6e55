//! Ember Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for physically-based rendering.
//!
//! The scene is an immutable graph of [`Hittable`] objects (normally a
//! [`BvhNode`] root) whose surfaces reference shared [`Material`]s and
//! [`Texture`]s. A [`Camera`] built from a validated [`CameraConfig`] turns
//! pixels into rays, and [`render`] traces them in parallel buckets.

mod bucket;
mod bvh;
mod camera;
mod error;
mod hittable;
mod instance;
mod material;
mod perlin;
mod quad;
mod renderer;
mod sampling;
mod sphere;
mod texture;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::BvhNode;
pub use camera::{Camera, CameraConfig};
pub use error::{ConfigError, RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use instance::{RotateY, Translate};
pub use material::{Dielectric, DiffuseLight, Lambertian, Material, Metal, ScatterResult};
pub use perlin::Perlin;
pub use quad::{make_box, Quad};
pub use renderer::{
    color_to_rgb8, gamma_correct, linear_to_gamma, ray_color, render, render_pixel, render_to_sink,
    ImageBuffer, PixelSink, RenderSettings, T_MIN,
};
pub use sampling::{gen_f32, random_in_unit_disk, random_unit_vector, sample_square};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture};

/// Re-export Vec3 and common math types from ember_math
pub use ember_math::{Aabb, Color, Interval, Ray, Vec3};
