//! Shared type aliases.

/// Decoded RGBA8 pixel grid handed to the sampler.
///
/// Owned by the caller and only borrowed for the duration of a run.
pub type ImageBuffer = image::RgbaImage;
