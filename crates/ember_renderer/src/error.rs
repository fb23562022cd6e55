//! Error types for scene construction and rendering.

use thiserror::Error;

/// A camera configuration that cannot produce a valid image.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    #[error("Image width must be at least 1 pixel")]
    InvalidImageWidth,

    #[error("Samples per pixel must be at least 1")]
    InvalidSamplesPerPixel,

    #[error("Vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("Defocus angle must be in [0, 180) degrees, got {0}")]
    InvalidDefocusAngle(f32),

    #[error("Focus distance must be positive and finite, got {0}")]
    InvalidFocusDistance(f32),

    #[error("Camera setting `{0}` is not finite")]
    NonFinite(&'static str),

    #[error("Degenerate camera view: {0}")]
    DegenerateView(&'static str),
}

/// Errors raised while building acceleration structures or emitting pixels.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid camera configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot build a BVH from an empty scene")]
    EmptyScene,

    #[error("Scene object has no bounding box")]
    MissingBoundingBox,

    #[error("Pixel sink error: {0}")]
    Sink(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
