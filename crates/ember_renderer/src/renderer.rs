//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Anti-aliasing via multi-sampling
//! - Gamma correction
//! - Parallel bucket rendering with a private RNG per bucket

use std::io;

use crate::{
    bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE},
    Camera, Hittable, Ray, RenderResult,
};
use ember_math::{Color, Interval};
use rand::RngCore;
use rayon::prelude::*;

/// Closest hit distance accepted for any ray. Keeps scattered rays from
/// re-hitting the surface they start on.
pub const T_MIN: f32 = 0.001;

/// Options that affect how (not what) the image is rendered.
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    /// Base seed; each bucket derives its own stream from it
    pub seed: u64,
    /// Edge length of the square tiles rendered in parallel
    pub bucket_size: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and accumulating color until it escapes
/// to the background, is absorbed, or runs out of depth.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    background: Color,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return background;
    };

    let emission = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            let scattered_color = ray_color(&result.scattered, world, depth - 1, background, rng);
            emission + result.attenuation * scattered_color
        }
        None => emission,
    }
}

/// Render a single pixel with multi-sampling.
///
/// Returns the linear average of all samples (no gamma applied).
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        // Camera.get_ray already adds random offset for anti-aliasing
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth(), camera.background(), rng);
    }

    pixel_color * camera.samples_scale()
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct each channel of a linear color.
#[inline]
pub fn gamma_correct(color: Color) -> Color {
    Color::new(
        linear_to_gamma(color.x),
        linear_to_gamma(color.y),
        linear_to_gamma(color.z),
    )
}

/// Convert a gamma-corrected color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let to_byte = |c: f32| (256.0 * intensity.clamp(c)) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Destination for finished pixels.
///
/// Pixels arrive row-major, top row first, already gamma-corrected.
pub trait PixelSink {
    /// Called once before the first pixel.
    fn begin(&mut self, _width: u32, _height: u32) -> io::Result<()> {
        Ok(())
    }

    fn write_pixel(&mut self, color: Color) -> io::Result<()>;

    /// Called once after the last pixel.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl PixelSink for Vec<Color> {
    fn write_pixel(&mut self, color: Color) -> io::Result<()> {
        self.push(color);
        Ok(())
    }
}

/// Simple image buffer for storing render output.
///
/// Holds gamma-corrected colors, row-major with row 0 at the top.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Copy a finished bucket into its region of the image.
    pub fn blit(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let color = result.pixels[(local_y * bucket.width + local_x) as usize];
                self.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    }

    /// Convert to packed RGB bytes (for saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color_to_rgb8(*color))
            .collect()
    }

    /// Stream every pixel to `sink`, row-major, top row first.
    pub fn write_to(&self, sink: &mut dyn PixelSink) -> RenderResult<()> {
        sink.begin(self.width, self.height)?;
        for color in &self.pixels {
            sink.write_pixel(*color)?;
        }
        sink.finish()?;
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the entire scene to an image buffer.
///
/// Buckets are traced in parallel with rayon. Each bucket seeds its own
/// generator from `settings.seed`, so the output only depends on the seed.
pub fn render(camera: &Camera, world: &dyn Hittable, settings: &RenderSettings) -> ImageBuffer {
    let width = camera.image_width();
    let height = camera.image_height();
    let buckets = generate_buckets(width, height, settings.bucket_size);

    log::info!(
        "Rendering {}x{} @ {} spp in {} buckets",
        width,
        height,
        camera.samples_per_pixel(),
        buckets.len()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, camera, world, settings.seed))
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        image.blit(result);
    }

    log::info!("Render finished: {} pixels", image.pixels.len());
    image
}

/// Render the scene and hand every pixel to `sink`.
pub fn render_to_sink(
    camera: &Camera,
    world: &dyn Hittable,
    settings: &RenderSettings,
    sink: &mut dyn PixelSink,
) -> RenderResult<()> {
    render(camera, world, settings).write_to(sink)
}
