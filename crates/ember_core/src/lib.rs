//! Ember Core - inputs the renderer consumes but never produces itself.
//!
//! This crate provides:
//!
//! - **Decoded images**: `ImageData`, a tightly packed RGB byte buffer
//! - **Image loading**: `load_image` decodes any format the `image` crate
//!   understands and converts it to linear intensity
//!
//! # Example
//!
//! ```ignore
//! use ember_core::load_image;
//!
//! let earth = load_image("earthmap.jpg")?;
//! println!("Loaded {}x{} texture", earth.width(), earth.height());
//! ```

pub mod image;

pub use image::{load_image, ImageData, ImageLoadError, ImageResult};
