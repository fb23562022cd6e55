//! Decoded image buffers for texture lookup.
//!
//! Decoding happens once, before rendering starts. The renderer only ever
//! sees the resulting `ImageData`.

use std::path::Path;

use thiserror::Error;

/// Number of bytes stored per pixel (R, G, B).
pub const BYTES_PER_PIXEL: usize = 3;

/// Errors that can occur while producing image data.
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Decode(#[from] ::image::ImageError),

    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

pub type ImageResult<T> = Result<T, ImageLoadError>;

/// A decoded image: `width * height` RGB pixels, row-major, row 0 at the top.
///
/// Bytes hold linear intensity (already converted from sRGB when loaded
/// from a file).
#[derive(Clone, Debug)]
pub struct ImageData {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageData {
    /// Wrap an already decoded RGB buffer.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> ImageResult<Self> {
        if width == 0 || height == 0 {
            return Err(ImageLoadError::EmptyImage { width, height });
        }

        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(ImageLoadError::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB bytes of the pixel at `(x, y)`. Coordinates outside the image
    /// are clamped to the nearest edge.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let idx = (y * self.width as usize + x) * BYTES_PER_PIXEL;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Get total size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// Load and decode an image file. The format is detected from its contents.
pub fn load_image(path: impl AsRef<Path>) -> ImageResult<ImageData> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let img = ::image::load_from_memory(&bytes)?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let data: Vec<u8> = rgb
        .into_raw()
        .into_iter()
        .map(|v| (srgb_to_linear(v) * 255.0).round() as u8)
        .collect();

    let image = ImageData::from_raw(width, height, data)?;

    log::debug!(
        "Loaded image: {} ({}x{}, {:.1} KB)",
        path.display(),
        width,
        height,
        image.size_bytes() as f32 / 1024.0
    );

    Ok(image)
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_validates_length() {
        let err = ImageData::from_raw(2, 2, vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            ImageLoadError::BufferSize {
                expected: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn test_from_raw_rejects_empty() {
        let err = ImageData::from_raw(0, 4, Vec::new()).unwrap_err();
        assert!(matches!(err, ImageLoadError::EmptyImage { .. }));
    }

    #[test]
    fn test_pixel_lookup_and_clamp() {
        // 2x1 image: red, green
        let img = ImageData::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();

        assert_eq!(img.pixel(0, 0), [255, 0, 0]);
        assert_eq!(img.pixel(1, 0), [0, 255, 0]);
        assert_eq!(img.pixel(5, 9), [0, 255, 0]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_image("definitely/not/here.png");
        assert!(matches!(result, Err(ImageLoadError::Io(_))));
    }

    #[test]
    fn test_load_undecodable_file() {
        let path = std::env::temp_dir().join(format!("ember_garbage_{}.png", std::process::id()));
        std::fs::write(&path, b"not an image at all").unwrap();

        let result = load_image(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ImageLoadError::Decode(_))));
    }

    #[test]
    fn test_srgb_to_linear() {
        // Black stays black
        assert!((srgb_to_linear(0) - 0.0).abs() < 0.001);

        // White stays white
        assert!((srgb_to_linear(255) - 1.0).abs() < 0.001);

        // Mid-gray is darker in linear
        let mid = srgb_to_linear(128);
        assert!(mid < 0.5);
        assert!(mid > 0.1);
    }
}
