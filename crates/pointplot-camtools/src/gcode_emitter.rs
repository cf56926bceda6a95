//! G-code Emitter
//!
//! Turns an ordered point path into a self-contained plotter program:
//! header comments, millimetre units, absolute positioning and homing,
//! then for every point a rapid XY move, a pen-down plunge and a retract
//! to travel height. The program ends by homing and `M30`.
//!
//! The emitter does no geometry and no I/O; points are written exactly in
//! the order given.

use pointplot_core::Point;
use pointplot_settings::MachineParameters;
use std::fmt;

/// Prefix of the XY move that starts each point block
const POINT_MOVE_PREFIX: &str = "G0 X";

/// One layer's G-code program as an ordered list of lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GcodeDocument {
    lines: Vec<String>,
}

impl GcodeDocument {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of point blocks (XY moves) in the program
    pub fn point_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| line.starts_with(POINT_MOVE_PREFIX))
            .count()
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

impl fmt::Display for GcodeDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

/// Generator for per-layer point plotting G-code
#[derive(Debug, Clone)]
pub struct GcodeEmitter {
    params: MachineParameters,
}

impl GcodeEmitter {
    pub fn new(params: MachineParameters) -> Self {
        Self { params }
    }

    /// Emit the program for one layer. `layer_number` is one-based.
    pub fn emit(&self, path: &[Point], layer_number: usize) -> GcodeDocument {
        let p = &self.params;
        let mut doc = GcodeDocument::default();

        // Header
        doc.push(format!("; G-Code generated for Layer {}", layer_number));
        doc.push(format!("; Point Diameter: {} mm", p.point_diameter));
        doc.push(format!("; Number of points: {}", path.len()));
        doc.push("");

        // Initialization
        doc.push("G21 ; Set units to millimeters");
        doc.push("G90 ; Set to absolute positioning");
        doc.push("G28 ; Home all axes");
        doc.push(format!(
            "G0 Z{:.3} F{:.0} ; Move to travel height",
            p.travel_z, p.feed_rate_z
        ));
        doc.push("");

        for point in path {
            doc.push(format!(
                "{}{:.3} Y{:.3} F{:.0}",
                POINT_MOVE_PREFIX, point.x, point.y, p.feed_rate_xy
            ));
            doc.push(format!("G0 Z{:.3} F{:.0}", p.pen_down_z, p.feed_rate_z));
            doc.push(format!("G0 Z{:.3} F{:.0}", p.travel_z, p.feed_rate_z));
        }

        // End
        doc.push("");
        doc.push("G28 ; Home all axes");
        doc.push("M30 ; Program end");

        doc
    }
}
