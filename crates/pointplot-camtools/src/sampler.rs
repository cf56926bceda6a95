//! Brightness Sampler
//!
//! Samples an RGBA image on a fixed pixel grid and sorts every sample into
//! one of N brightness layers. Layer `k` holds the samples whose luminance
//! falls in `[k/N * 255, (k+1)/N * 255)`; the last layer also takes 255.
//! Pixel coordinates are scaled independently per axis onto the target
//! sheet, so an image whose aspect ratio differs from the sheet is stretched.

use crate::error::{CamToolResult, ParameterError};
use pointplot_core::{ImageBuffer, Point};
use pointplot_settings::{GenerationSettings, SheetSize, MAX_LAYER_COUNT};
use tracing::debug;

/// Rec. 601 luma weights
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Luminance (0-255) of an RGBA pixel. Alpha is ignored.
pub fn luminance(pixel: &image::Rgba<u8>) -> f64 {
    let [r, g, b, _] = pixel.0;
    LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64
}

/// Index of the brightness band a luminance value belongs to.
///
/// `floor(L * N / 255)` clamped to `0..N`, so 255 lands in the last band.
pub fn band_index(luminance: f64, layer_count: usize) -> usize {
    let band = (luminance * layer_count as f64 / 255.0).floor();
    if band.is_nan() || band <= 0.0 {
        0
    } else {
        (band as usize).min(layer_count.saturating_sub(1))
    }
}

/// Points sharing one brightness band
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Zero-based band index
    pub index: usize,
    /// Total number of bands in the run
    pub layer_count: usize,
    /// Samples in grid order (rows top to bottom, left to right)
    pub points: Vec<Point>,
}

impl Layer {
    pub fn new(index: usize, layer_count: usize) -> Self {
        Self {
            index,
            layer_count,
            points: Vec::new(),
        }
    }

    /// One-based layer number used for file names and G-code comments
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Nominal luminance band `(min, max)` of this layer
    pub fn band(&self) -> (f64, f64) {
        let n = self.layer_count as f64;
        (
            self.index as f64 / n * 255.0,
            (self.index + 1) as f64 / n * 255.0,
        )
    }

    /// Whether a luminance value belongs to this layer
    pub fn contains(&self, luminance: f64) -> bool {
        band_index(luminance, self.layer_count) == self.index
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Grid sampler splitting an image into brightness layers
#[derive(Debug, Clone)]
pub struct BrightnessSampler {
    grid_step: u32,
    layer_count: u32,
    sheet: SheetSize,
}

impl BrightnessSampler {
    /// Create a sampler. The grid step must be non-zero, the layer count in
    /// `1..=MAX_LAYER_COUNT` and the sheet non-empty.
    pub fn new(grid_step: u32, layer_count: u32, sheet: SheetSize) -> CamToolResult<Self> {
        if grid_step == 0 {
            return Err(ParameterError::InvalidValue {
                name: "grid_step".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if !(1..=MAX_LAYER_COUNT).contains(&layer_count) {
            return Err(ParameterError::InvalidValue {
                name: "layer_count".to_string(),
                reason: format!("must be between 1 and {}", MAX_LAYER_COUNT),
            }
            .into());
        }
        if !sheet.is_valid() {
            return Err(ParameterError::InvalidDimensions(format!("sheet is {}", sheet)).into());
        }
        Ok(Self {
            grid_step,
            layer_count,
            sheet,
        })
    }

    pub fn from_settings(settings: &GenerationSettings) -> CamToolResult<Self> {
        Self::new(settings.grid_size, settings.layer_count, settings.sheet)
    }

    pub fn layer_count(&self) -> usize {
        self.layer_count as usize
    }

    /// Sample the image into exactly `layer_count` layers.
    ///
    /// Layers with no matching samples are returned empty.
    pub fn sample(&self, image: &ImageBuffer) -> CamToolResult<Vec<Layer>> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ParameterError::InvalidDimensions(format!(
                "image is {}x{}",
                width, height
            ))
            .into());
        }

        let layer_count = self.layer_count();
        let mut layers: Vec<Layer> = (0..layer_count)
            .map(|index| Layer::new(index, layer_count))
            .collect();

        let step = self.grid_step as usize;
        for y in (0..height).step_by(step) {
            for x in (0..width).step_by(step) {
                let brightness = luminance(image.get_pixel(x, y));
                let mm_x = x as f64 / width as f64 * self.sheet.width_mm;
                let mm_y = y as f64 / height as f64 * self.sheet.height_mm;
                layers[band_index(brightness, layer_count)]
                    .points
                    .push(Point::new(mm_x, mm_y, brightness));
            }
        }

        debug!(
            width,
            height,
            grid_step = self.grid_step,
            counts = ?layers.iter().map(Layer::len).collect::<Vec<_>>(),
            "Sampled image into layers"
        );

        Ok(layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gray(v: u8) -> Rgba<u8> {
        Rgba([v, v, v, 255])
    }

    #[test]
    fn test_luminance_weights() {
        assert_eq!(luminance(&Rgba([0, 0, 0, 255])), 0.0);
        assert!((luminance(&Rgba([255, 0, 0, 0])) - 76.245).abs() < 1e-9);
        assert!((luminance(&Rgba([0, 255, 0, 0])) - 149.685).abs() < 1e-9);
        assert!((luminance(&Rgba([0, 0, 255, 0])) - 29.07).abs() < 1e-9);
        assert!((luminance(&gray(255)) - 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_band_index_edges() {
        assert_eq!(band_index(0.0, 4), 0);
        assert_eq!(band_index(63.74, 4), 0);
        assert_eq!(band_index(63.75, 4), 1);
        assert_eq!(band_index(254.99, 4), 3);
        assert_eq!(band_index(255.0, 4), 3);
        assert_eq!(band_index(255.0, 1), 0);
        assert_eq!(band_index(-1.0, 3), 0);
        assert_eq!(band_index(f64::NAN, 3), 0);
    }

    #[test]
    fn test_layer_band_and_contains() {
        let layer = Layer::new(1, 2);
        assert_eq!(layer.band(), (127.5, 255.0));
        assert_eq!(layer.number(), 2);
        assert!(layer.contains(127.5));
        assert!(layer.contains(255.0));
        assert!(!layer.contains(127.4));
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let sheet = SheetSize::default();
        assert!(BrightnessSampler::new(0, 4, sheet).is_err());
        assert!(BrightnessSampler::new(4, 0, sheet).is_err());
        assert!(BrightnessSampler::new(4, MAX_LAYER_COUNT + 1, sheet).is_err());
        assert!(BrightnessSampler::new(4, u32::MAX, sheet).is_err());
        assert!(BrightnessSampler::new(4, MAX_LAYER_COUNT, sheet).is_ok());
        assert!(BrightnessSampler::new(4, 4, SheetSize::new(0.0, 10.0)).is_err());
        assert!(BrightnessSampler::new(1, 1, sheet).is_ok());
    }

    #[test]
    fn test_rejects_empty_image() {
        let sampler = BrightnessSampler::new(1, 2, SheetSize::default()).unwrap();
        let image = ImageBuffer::new(0, 0);
        assert!(sampler.sample(&image).is_err());
    }

    #[test]
    fn test_grid_step_larger_than_image() {
        let sampler = BrightnessSampler::new(10, 2, SheetSize::default()).unwrap();
        let image = ImageBuffer::from_pixel(3, 3, gray(0));
        let layers = sampler.sample(&image).unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].points, vec![Point::new(0.0, 0.0, 0.0)]);
        assert!(layers[1].is_empty());
    }

    #[test]
    fn test_uniform_image_single_layer() {
        let sampler = BrightnessSampler::new(2, 4, SheetSize::default()).unwrap();
        let image = ImageBuffer::from_pixel(8, 6, gray(200));
        let layers = sampler.sample(&image).unwrap();
        assert_eq!(layers.len(), 4);
        assert_eq!(layers[3].len(), 4 * 3);
        assert!(layers[..3].iter().all(Layer::is_empty));
    }

    #[test]
    fn test_grid_step_sampling_positions() {
        let sampler = BrightnessSampler::new(2, 1, SheetSize::new(100.0, 50.0)).unwrap();
        let image = ImageBuffer::from_pixel(4, 4, gray(10));
        let layers = sampler.sample(&image).unwrap();
        let coords: Vec<(f64, f64)> = layers[0].points.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            coords,
            vec![(0.0, 0.0), (50.0, 0.0), (0.0, 25.0), (50.0, 25.0)]
        );
    }
}
