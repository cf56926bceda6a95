//! PointPlot Settings Crate
//!
//! Generation settings for the point plotter pipeline: grid and layer
//! counts, machine parameters, target sheet size, and lenient parsing of
//! raw form values with documented defaults.

pub mod config;
pub mod error;
mod lenient;
pub mod sheet;

pub use config::{GenerationSettings, MachineParameters, RawSettings, MAX_LAYER_COUNT};
pub use error::{SettingsError, SettingsResult};
pub use sheet::{Orientation, PaperSize, SheetSize};
