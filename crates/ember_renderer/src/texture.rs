//! Texture trait and procedural/image textures.
//!
//! Textures are shared between materials through `Arc<dyn Texture>`.

use std::sync::Arc;

use crate::perlin::Perlin;
use ember_core::ImageData;
use ember_math::{Color, Interval, Vec3};
use rand::RngCore;

/// Octaves summed by the marble turbulence term.
const TURBULENCE_DEPTH: usize = 7;

/// Returned by image textures that have no pixel data.
const MISSING_IMAGE_COLOR: Color = Color::new(0.0, 1.0, 1.0);

/// Trait for textures evaluated at a surface point.
pub trait Texture: Send + Sync {
    /// Color at texture coordinates `(u, v)` and world-space point `p`.
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// A constant color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn from_rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::new(Color::new(red, green, blue))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.albedo
    }
}

/// A 3D checkerboard alternating between two sub-textures.
pub struct CheckerTexture {
    scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    /// Cells have edge length `1 / scale` in world units.
    pub fn new(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self { scale, even, odd }
    }

    pub fn from_colors(scale: f32, even: Color, odd: Color) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let cell = (self.scale * p).floor();
        // Per-axis parity, valid for any finite coordinate
        let parity = |c: f32| c.rem_euclid(2.0) as u32;

        if (parity(cell.x) + parity(cell.y) + parity(cell.z)) % 2 == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// Marble-like pattern driven by Perlin turbulence.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
}

impl NoiseTexture {
    pub fn new(scale: f32, rng: &mut dyn RngCore) -> Self {
        Self {
            noise: Perlin::new(rng),
            scale,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Color {
        let phase = self.scale * p.z + 10.0 * self.noise.turb(p, TURBULENCE_DEPTH);
        Color::splat(0.5 * (1.0 + phase.sin()))
    }
}

/// Nearest-neighbour lookup into a decoded image.
///
/// Without image data every lookup returns solid cyan, so a missing file
/// shows up in the render instead of aborting it.
pub struct ImageTexture {
    image: Option<Arc<ImageData>>,
}

impl ImageTexture {
    pub fn new(image: Option<Arc<ImageData>>) -> Self {
        if image.is_none() {
            log::warn!("Image texture has no pixel data, using debug color");
        }
        Self { image }
    }

    pub fn from_image(image: ImageData) -> Self {
        Self::new(Some(Arc::new(image)))
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Color {
        let Some(image) = &self.image else {
            return MISSING_IMAGE_COLOR;
        };

        // Clamp input texture coordinates to [0,1] x [1,0]
        let u = Interval::UNIT.clamp(u);
        let v = 1.0 - Interval::UNIT.clamp(v); // Flip V to image coordinates

        // u = 1 and v = 0 land one past the edge; pixel() clamps them back
        let i = (u * image.width() as f32) as u32;
        let j = (v * image.height() as f32) as u32;
        let [r, g, b] = image.pixel(i, j);

        Color::new(r as f32, g as f32, b as f32) / 255.0
    }
}
