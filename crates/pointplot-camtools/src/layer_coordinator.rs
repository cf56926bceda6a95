//! Layer Coordinator
//!
//! Runs the whole pipeline for one image: sample once, then order and
//! emit every layer. Produces one `layer_<k>.gcode` file per layer,
//! including empty layers. A sampling failure aborts the run so callers
//! get either every layer or an error.

use crate::error::CamToolResult;
use crate::gcode_emitter::GcodeEmitter;
use crate::output::GcodeFile;
use crate::path_order::PathOrderer;
use crate::sampler::{BrightnessSampler, Layer};
use pointplot_core::ImageBuffer;
use pointplot_settings::GenerationSettings;
use tracing::{debug, info};

/// Everything produced by one run
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutput {
    /// Sampled layers, points in grid order
    pub layers: Vec<Layer>,
    /// One file per layer, in layer order
    pub files: Vec<GcodeFile>,
}

/// Image to per-layer G-code pipeline
#[derive(Debug, Clone)]
pub struct LayerCoordinator {
    settings: GenerationSettings,
}

impl LayerCoordinator {
    /// Invalid settings values are replaced by their defaults.
    pub fn new(settings: GenerationSettings) -> Self {
        Self {
            settings: settings.sanitized(),
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Sample the image into brightness layers without emitting G-code
    pub fn generate_layers(&self, image: &ImageBuffer) -> CamToolResult<Vec<Layer>> {
        BrightnessSampler::from_settings(&self.settings)?.sample(image)
    }

    /// Generate one G-code file per layer
    pub fn generate(&self, image: &ImageBuffer) -> CamToolResult<Vec<GcodeFile>> {
        self.generate_with_progress(image, |_| {})
    }

    /// Generate one G-code file per layer with progress callback (0.0 to 1.0)
    pub fn generate_with_progress<F>(
        &self,
        image: &ImageBuffer,
        progress_callback: F,
    ) -> CamToolResult<Vec<GcodeFile>>
    where
        F: FnMut(f32),
    {
        Ok(self.run(image, progress_callback)?.files)
    }

    /// Sample, order and emit, keeping the sampled layers alongside the files
    pub fn run<F>(
        &self,
        image: &ImageBuffer,
        mut progress_callback: F,
    ) -> CamToolResult<GenerationOutput>
    where
        F: FnMut(f32),
    {
        progress_callback(0.0);

        let layers = self.generate_layers(image)?;
        progress_callback(0.1);

        let emitter = GcodeEmitter::new(self.settings.machine.clone());
        let total = layers.len();
        let mut files = Vec::with_capacity(total);

        for (done, layer) in layers.iter().enumerate() {
            let path = PathOrderer::nearest_neighbor(&layer.points);
            debug!(
                layer = layer.number(),
                points = path.len(),
                travel_mm = PathOrderer::path_length(&path),
                "Ordered layer"
            );

            let document = emitter.emit(&path, layer.number());
            files.push(GcodeFile::for_layer(layer.index, &document));

            progress_callback(0.1 + (done + 1) as f32 / total as f32 * 0.9);
        }

        info!(
            layers = files.len(),
            points = layers.iter().map(Layer::len).sum::<usize>(),
            "Generated G-code"
        );

        Ok(GenerationOutput { layers, files })
    }
}
