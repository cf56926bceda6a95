//! Point overlay
//!
//! Paints sampled points back onto a copy of the source image so a user can
//! see which pixels ended up in which layer. Darker layers are drawn in a
//! stronger red.

use crate::sampler::Layer;
use image::{Pixel, Rgba};
use pointplot_core::ImageBuffer;
use pointplot_settings::SheetSize;

/// Overlay dot alpha
const DOT_ALPHA: u8 = 150;

/// Dot radius in pixels; a radius of 1 gives a 3x3 dot
const DOT_RADIUS: i64 = 1;

/// Dot colour for a layer: red fading out as the layer gets brighter
pub fn layer_color(index: usize, layer_count: usize) -> Rgba<u8> {
    let brightness = (index + 1) as f64 / layer_count.max(1) as f64;
    let red = (255.0 * (1.0 - brightness)).round().clamp(0.0, 255.0) as u8;
    Rgba([red, 0, 0, DOT_ALPHA])
}

/// Draw every layer's points over a copy of `image`.
///
/// Points are mapped from sheet millimetres back to image pixels with the
/// inverse of the sampler's per-axis scaling.
pub fn render_overlay(image: &ImageBuffer, layers: &[Layer], sheet: SheetSize) -> ImageBuffer {
    let mut output = image.clone();
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || !sheet.is_valid() {
        return output;
    }

    for layer in layers {
        let color = layer_color(layer.index, layer.layer_count);
        for point in &layer.points {
            let px = (point.x / sheet.width_mm * width as f64).round() as i64;
            let py = (point.y / sheet.height_mm * height as f64).round() as i64;
            stamp_dot(&mut output, px, py, color);
        }
    }

    output
}

fn stamp_dot(image: &mut ImageBuffer, cx: i64, cy: i64, color: Rgba<u8>) {
    let (width, height) = (image.width() as i64, image.height() as i64);
    for y in (cy - DOT_RADIUS)..=(cy + DOT_RADIUS) {
        for x in (cx - DOT_RADIUS)..=(cx + DOT_RADIUS) {
            if x >= 0 && x < width && y >= 0 && y < height {
                image.get_pixel_mut(x as u32, y as u32).blend(&color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointplot_core::Point;

    #[test]
    fn test_layer_color() {
        assert_eq!(layer_color(0, 4), Rgba([191, 0, 0, DOT_ALPHA]));
        assert_eq!(layer_color(3, 4), Rgba([0, 0, 0, DOT_ALPHA]));
        assert_eq!(layer_color(0, 1), Rgba([0, 0, 0, DOT_ALPHA]));
    }

    #[test]
    fn test_dot_drawn_at_point() {
        let image = ImageBuffer::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        let sheet = SheetSize::new(100.0, 100.0);
        let mut layer = Layer::new(0, 2);
        layer.points.push(Point::new(50.0, 50.0, 0.0));

        let output = render_overlay(&image, &[layer], sheet);
        let center = output.get_pixel(5, 5);
        assert_ne!(center, image.get_pixel(5, 5));
        assert!(center.0[0] > center.0[1]);
        assert_eq!(output.get_pixel(0, 0), image.get_pixel(0, 0));
        assert_eq!(output.get_pixel(7, 5), image.get_pixel(7, 5));
    }

    #[test]
    fn test_dot_clipped_at_edge() {
        let image = ImageBuffer::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let mut layer = Layer::new(0, 1);
        layer.points.push(Point::new(0.0, 0.0, 0.0));

        let output = render_overlay(&image, &[layer], SheetSize::new(4.0, 4.0));
        assert_ne!(output.get_pixel(0, 0), image.get_pixel(0, 0));
        assert_eq!(output.get_pixel(2, 2), image.get_pixel(2, 2));
    }
}
