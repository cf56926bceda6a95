//! # PointPlot Core
//!
//! Core value types shared by the settings and CAM tool crates:
//! sampled plotter points and the image buffer type they are taken from.

pub mod geometry;
pub mod types;

pub use geometry::Point;
pub use types::ImageBuffer;
