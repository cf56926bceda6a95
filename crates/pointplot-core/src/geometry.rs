//! Plotter point geometry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single mark on the sheet, in millimetres.
///
/// `brightness` is the luminance (0-255) of the pixel the point was sampled
/// from. It is kept for overlays and diagnostics and takes no part in
/// distance calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub brightness: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, brightness: f64) -> Self {
        Self { x, y, brightness }
    }

    /// Euclidean distance in the XY plane
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
