//! # PointPlot CAM Tools
//!
//! Converts raster images into point-plotter G-code, one program per
//! brightness layer.
//!
//! ## Pipeline
//!
//! - **Brightness Sampler**: grid sampling of an RGBA image into N luminance bands
//! - **Path Orderer**: greedy nearest-neighbour visiting order per layer
//! - **G-code Emitter**: travel, move, plunge and retract blocks per point
//! - **Layer Coordinator**: runs the above for every layer and names the files
//!
//! ## Supporting Tools
//!
//! - **Spiral Filter**: toy pixel-remapping filter applied before sampling
//! - **Overlay**: draws sampled points back onto the image
//! - **Output**: G-code files, previews and sinks

pub mod error;
pub mod gcode_emitter;
pub mod layer_coordinator;
pub mod output;
pub mod overlay;
pub mod path_order;
pub mod sampler;
pub mod spiral_filter;

// Re-export commonly used items
pub use error::{CamToolError, CamToolResult, ParameterError};
pub use gcode_emitter::{GcodeDocument, GcodeEmitter};
pub use layer_coordinator::{GenerationOutput, LayerCoordinator};
pub use output::{write_all, DirectorySink, GcodeFile, GcodeSink, MemorySink, PREVIEW_LIMIT};
pub use overlay::{layer_color, render_overlay};
pub use path_order::PathOrderer;
pub use sampler::{band_index, luminance, BrightnessSampler, Layer};
pub use spiral_filter::apply_spiral;
