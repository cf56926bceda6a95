//! Interactive session state
//!
//! Holds what a front end keeps between user actions: the loaded image,
//! the current settings and the output of the last generation run. Every
//! action checks its inputs first and reports a missing image or missing
//! G-code as [`CamToolError::MissingInput`] without running anything.
//! Changing the image or the settings discards the last run's output.

use pointplot_camtools::{
    apply_spiral, render_overlay, write_all, CamToolError, CamToolResult, GcodeFile, GcodeSink,
    Layer, LayerCoordinator,
};
use pointplot_core::ImageBuffer;
use pointplot_settings::GenerationSettings;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Image as loaded, before any filter
    original: Option<ImageBuffer>,
    /// Image the pipeline samples
    image: Option<ImageBuffer>,
    settings: GenerationSettings,
    layers: Vec<Layer>,
    files: Vec<GcodeFile>,
}

impl Session {
    pub fn new(settings: GenerationSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Decode an image file and make it the current image
    pub fn load_image_file<P: AsRef<Path>>(&mut self, path: P) -> CamToolResult<()> {
        let image = image::open(path.as_ref())?.to_rgba8();
        info!(
            "Loaded {} ({}x{})",
            path.as_ref().display(),
            image.width(),
            image.height()
        );
        self.set_image(image);
        Ok(())
    }

    /// Replace the current image. Previously generated output is discarded.
    pub fn set_image(&mut self, image: ImageBuffer) {
        self.original = Some(image.clone());
        self.image = Some(image);
        self.clear_output();
    }

    pub fn image(&self) -> Option<&ImageBuffer> {
        self.image.as_ref()
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: GenerationSettings) {
        self.settings = settings;
        self.clear_output();
    }

    /// Replace the settings with the contents of a JSON or TOML file
    pub fn load_settings_file<P: AsRef<Path>>(&mut self, path: P) -> CamToolResult<()> {
        self.set_settings(GenerationSettings::load_from_file(path.as_ref())?);
        info!("Loaded settings from {}", path.as_ref().display());
        Ok(())
    }

    /// Layers sampled by the last generation run
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Files produced by the last generation run
    pub fn files(&self) -> &[GcodeFile] {
        &self.files
    }

    /// Replace the current image with the spiral-filtered loaded image.
    ///
    /// Always filters the image as loaded, so applying it again changes nothing.
    pub fn apply_filter(&mut self) -> CamToolResult<()> {
        let original = self
            .original
            .as_ref()
            .ok_or_else(|| CamToolError::MissingInput("no image loaded".to_string()))?;
        self.image = Some(apply_spiral(original));
        self.clear_output();
        Ok(())
    }

    /// Generate G-code for every layer of the current image
    pub fn generate(&mut self) -> CamToolResult<&[GcodeFile]> {
        self.generate_with_progress(|_| {})
    }

    pub fn generate_with_progress<F>(
        &mut self,
        progress_callback: F,
    ) -> CamToolResult<&[GcodeFile]>
    where
        F: FnMut(f32),
    {
        let image = self.require_image()?;
        let output =
            LayerCoordinator::new(self.settings.clone()).run(image, progress_callback)?;

        self.layers = output.layers;
        self.files = output.files;
        Ok(&self.files)
    }

    /// Current image with the last run's points drawn over it
    pub fn overlay(&self) -> CamToolResult<ImageBuffer> {
        let image = self.require_image()?;
        Ok(render_overlay(image, &self.layers, self.settings.sanitized().sheet))
    }

    /// Hand every generated file to a sink
    pub fn download_all<S: GcodeSink + ?Sized>(&self, sink: &mut S) -> CamToolResult<()> {
        if self.files.is_empty() {
            return Err(CamToolError::MissingInput(
                "no G-code generated yet".to_string(),
            ));
        }
        write_all(&self.files, sink)
    }

    fn require_image(&self) -> CamToolResult<&ImageBuffer> {
        self.image
            .as_ref()
            .ok_or_else(|| CamToolError::MissingInput("no image loaded".to_string()))
    }

    fn clear_output(&mut self) {
        self.layers.clear();
        self.files.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use pointplot_camtools::MemorySink;
    use pointplot_settings::SheetSize;

    fn checker() -> ImageBuffer {
        ImageBuffer::from_fn(8, 8, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
    }

    #[test]
    fn test_generate_without_image() {
        let mut session = Session::default();
        let err = session.generate().unwrap_err();
        assert!(matches!(err, CamToolError::MissingInput(_)));
        assert!(session.files().is_empty());
    }

    #[test]
    fn test_download_before_generate() {
        let mut session = Session::default();
        session.set_image(checker());
        let mut sink = MemorySink::default();
        assert!(matches!(
            session.download_all(&mut sink),
            Err(CamToolError::MissingInput(_))
        ));
        assert!(sink.files.is_empty());
    }

    #[test]
    fn test_filter_without_image() {
        let mut session = Session::default();
        assert!(matches!(
            session.apply_filter(),
            Err(CamToolError::MissingInput(_))
        ));
    }

    #[test]
    fn test_generate_and_download() {
        let mut session = Session::new(GenerationSettings {
            grid_size: 1,
            layer_count: 2,
            ..Default::default()
        });
        session.set_image(checker());

        let files = session.generate().unwrap().to_vec();
        assert_eq!(files.len(), 2);
        assert_eq!(session.layers().len(), 2);
        assert_eq!(session.layers()[0].len(), 32);
        assert_eq!(session.layers()[1].len(), 32);

        let mut sink = MemorySink::default();
        session.download_all(&mut sink).unwrap();
        assert_eq!(sink.files, files);
    }

    #[test]
    fn test_new_image_clears_output() {
        let mut session = Session::default();
        session.set_image(checker());
        session.generate().unwrap();
        assert!(!session.files().is_empty());

        session.apply_filter().unwrap();
        assert!(session.files().is_empty());
        assert!(session.layers().is_empty());
    }

    #[test]
    fn test_filter_is_not_cumulative() {
        let image =
            ImageBuffer::from_fn(16, 16, |x, y| Rgba([(x * 16) as u8, (y * 16) as u8, 0, 255]));
        let mut session = Session::default();
        session.set_image(image.clone());

        session.apply_filter().unwrap();
        let once = session.image().cloned().unwrap();
        assert_ne!(once, image);

        session.apply_filter().unwrap();
        assert_eq!(session.image(), Some(&once));
    }

    #[test]
    fn test_new_settings_clear_output() {
        let mut session = Session::default();
        session.set_image(ImageBuffer::from_pixel(20, 20, Rgba([0, 0, 0, 255])));
        session.generate().unwrap();
        let before = session.overlay().unwrap();
        assert!(!session.files().is_empty());

        session.set_settings(GenerationSettings {
            sheet: SheetSize::new(420.0, 594.0),
            ..Default::default()
        });
        assert!(session.files().is_empty());
        assert!(session.layers().is_empty());
        assert!(matches!(
            session.download_all(&mut MemorySink::default()),
            Err(CamToolError::MissingInput(_))
        ));

        session.generate().unwrap();
        assert_eq!(session.overlay().unwrap(), before);
    }

    #[test]
    fn test_overlay_requires_image() {
        let session = Session::default();
        assert!(session.overlay().is_err());

        let mut session = Session::default();
        session.set_image(checker());
        session.generate().unwrap();
        let overlay = session.overlay().unwrap();
        assert_eq!(overlay.dimensions(), (8, 8));
    }
}
