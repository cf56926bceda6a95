//! Spiral pixel-remapping filter
//!
//! Twists the image around its centre: each pixel takes the colour of the
//! pixel found by rotating its polar angle by an amount that grows with the
//! distance from the centre (two full turns at the edge). Alpha is kept,
//! and pixels whose source lands outside the image are left unchanged.

use pointplot_core::ImageBuffer;
use std::f64::consts::TAU;

/// Full turns added at the outer radius
const TURNS_AT_EDGE: f64 = 2.0;

/// Apply the spiral filter, returning a new image of the same size.
///
/// Sampling always reads the untouched source.
pub fn apply_spiral(image: &ImageBuffer) -> ImageBuffer {
    let (width, height) = image.dimensions();
    let mut output = image.clone();
    if width == 0 || height == 0 {
        return output;
    }

    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;
    let radius = center_x.max(center_y);

    for (x, y, pixel) in output.enumerate_pixels_mut() {
        let dx = x as f64 - center_x;
        let dy = y as f64 - center_y;
        let distance = (dx * dx + dy * dy).sqrt();
        let angle = dy.atan2(dx) + distance / radius * TURNS_AT_EDGE * TAU;

        let sample_x = (center_x + angle.cos() * distance).floor();
        let sample_y = (center_y + angle.sin() * distance).floor();

        if sample_x >= 0.0
            && sample_x < width as f64
            && sample_y >= 0.0
            && sample_y < height as f64
        {
            let source = image.get_pixel(sample_x as u32, sample_y as u32);
            pixel.0[..3].copy_from_slice(&source.0[..3]);
        }
    }

    output
}
