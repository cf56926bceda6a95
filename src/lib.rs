//! # PointPlot
//!
//! Turns a raster image into point-plotter G-code, one program per
//! brightness layer.
//!
//! ## Architecture
//!
//! PointPlot is organized as a workspace with multiple crates:
//!
//! 1. **pointplot-core** - Shared value types (points, image buffer)
//! 2. **pointplot-settings** - Machine parameters, sheet presets, settings files
//! 3. **pointplot-camtools** - Sampling, path ordering, G-code emission
//! 4. **pointplot** - Session adapter, logging and the command line entry point
//!
//! The pipeline itself is pure: image and settings in, named G-code files
//! out. Everything stateful (the loaded image, the last generated files,
//! writing files to disk) lives in [`session::Session`].

pub mod session;

pub use pointplot_camtools::{
    apply_spiral, render_overlay, BrightnessSampler, CamToolError, CamToolResult, DirectorySink,
    GcodeDocument, GcodeEmitter, GcodeFile, GcodeSink, Layer, LayerCoordinator, MemorySink,
    PathOrderer,
};
pub use pointplot_core::{ImageBuffer, Point};
pub use pointplot_settings::{
    GenerationSettings, MachineParameters, Orientation, PaperSize, RawSettings, SheetSize,
};
pub use session::Session;

/// Initialize logging
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // RUST_LOG wins when set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(tracing::Level::INFO.into()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
