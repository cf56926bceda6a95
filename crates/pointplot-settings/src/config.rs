//! Generation settings
//!
//! Provides the settings consumed by the point plotter pipeline and
//! settings file handling (JSON or TOML, chosen by file extension).
//!
//! Settings are organized into:
//! - Sampling (grid size, layer count)
//! - Machine parameters (point diameter, Z heights, feed rates)
//! - Target sheet size
//!
//! Values typed into a form arrive as strings through [`RawSettings`].
//! Malformed or missing values never fail: they fall back to the defaults
//! below and a warning is logged. Settings files follow the same rule for
//! their values; only unreadable or syntactically broken files are errors.

use crate::error::{SettingsError, SettingsResult};
use crate::sheet::{Orientation, PaperSize, SheetSize};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

pub const DEFAULT_GRID_SIZE: u32 = 4;
pub const DEFAULT_LAYER_COUNT: u32 = 4;
pub const DEFAULT_POINT_DIAMETER: f64 = 4.0;
pub const DEFAULT_PEN_DOWN_Z: f64 = 0.0;
pub const DEFAULT_TRAVEL_Z: f64 = 10.0;
pub const DEFAULT_FEED_RATE_XY: f64 = 13000.0;
pub const DEFAULT_FEED_RATE_Z: f64 = 2500.0;

/// Luminance is an 8-bit value, so more bands than this cannot all be filled
pub const MAX_LAYER_COUNT: u32 = 255;

/// Plotter machine parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineParameters {
    /// Diameter of a single mark (mm), informational only
    #[serde(deserialize_with = "crate::lenient::float")]
    pub point_diameter: f64,
    /// Z height at which the pen touches the sheet (mm)
    #[serde(deserialize_with = "crate::lenient::float")]
    pub pen_down_z: f64,
    /// Z height for travel moves between points (mm)
    #[serde(deserialize_with = "crate::lenient::float")]
    pub travel_z: f64,
    /// XY feed rate (mm/min)
    #[serde(deserialize_with = "crate::lenient::float")]
    pub feed_rate_xy: f64,
    /// Z feed rate (mm/min)
    #[serde(deserialize_with = "crate::lenient::float")]
    pub feed_rate_z: f64,
}

impl Default for MachineParameters {
    fn default() -> Self {
        Self {
            point_diameter: DEFAULT_POINT_DIAMETER,
            pen_down_z: DEFAULT_PEN_DOWN_Z,
            travel_z: DEFAULT_TRAVEL_Z,
            feed_rate_xy: DEFAULT_FEED_RATE_XY,
            feed_rate_z: DEFAULT_FEED_RATE_Z,
        }
    }
}

impl MachineParameters {
    /// Validate machine parameters
    pub fn validate(&self) -> SettingsResult<()> {
        check_positive("point_diameter", self.point_diameter)?;
        check_positive("feed_rate_xy", self.feed_rate_xy)?;
        check_positive("feed_rate_z", self.feed_rate_z)?;
        check_finite("pen_down_z", self.pen_down_z)?;
        check_finite("travel_z", self.travel_z)?;
        Ok(())
    }

    /// Copy with every invalid value replaced by its default
    pub fn sanitized(&self) -> Self {
        Self {
            point_diameter: positive_or_default(
                "point_diameter",
                self.point_diameter,
                DEFAULT_POINT_DIAMETER,
            ),
            pen_down_z: finite_or_default("pen_down_z", self.pen_down_z, DEFAULT_PEN_DOWN_Z),
            travel_z: finite_or_default("travel_z", self.travel_z, DEFAULT_TRAVEL_Z),
            feed_rate_xy: positive_or_default(
                "feed_rate_xy",
                self.feed_rate_xy,
                DEFAULT_FEED_RATE_XY,
            ),
            feed_rate_z: positive_or_default("feed_rate_z", self.feed_rate_z, DEFAULT_FEED_RATE_Z),
        }
    }
}

/// Complete settings for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Sampling step in pixels along both axes
    #[serde(deserialize_with = "crate::lenient::count")]
    pub grid_size: u32,
    /// Number of brightness layers, at most [`MAX_LAYER_COUNT`]
    #[serde(deserialize_with = "crate::lenient::count")]
    pub layer_count: u32,
    pub machine: MachineParameters,
    pub sheet: SheetSize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            layer_count: DEFAULT_LAYER_COUNT,
            machine: MachineParameters::default(),
            sheet: SheetSize::default(),
        }
    }
}

impl GenerationSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build settings from raw form values, substituting defaults
    pub fn from_raw(raw: &RawSettings) -> Self {
        let machine = MachineParameters {
            point_diameter: parse_positive(
                "point_diameter",
                raw.point_diameter.as_deref(),
                DEFAULT_POINT_DIAMETER,
            ),
            pen_down_z: parse_finite("pen_down_z", raw.pen_down_z.as_deref(), DEFAULT_PEN_DOWN_Z),
            travel_z: parse_finite("travel_z", raw.travel_z.as_deref(), DEFAULT_TRAVEL_Z),
            feed_rate_xy: parse_positive(
                "feed_rate_xy",
                raw.feed_rate_xy.as_deref(),
                DEFAULT_FEED_RATE_XY,
            ),
            feed_rate_z: parse_positive(
                "feed_rate_z",
                raw.feed_rate_z.as_deref(),
                DEFAULT_FEED_RATE_Z,
            ),
        };

        Self {
            grid_size: parse_count("grid_size", raw.grid_size.as_deref(), DEFAULT_GRID_SIZE),
            layer_count: count_or_default(
                "layer_count",
                parse_count("layer_count", raw.layer_count.as_deref(), DEFAULT_LAYER_COUNT),
                MAX_LAYER_COUNT,
                DEFAULT_LAYER_COUNT,
            ),
            machine,
            sheet: raw.sheet(),
        }
    }

    /// Copy with every invalid value replaced by its default
    pub fn sanitized(&self) -> Self {
        let sheet = if self.sheet.is_valid() {
            self.sheet
        } else {
            warn!("Invalid sheet size {}, using default", self.sheet);
            SheetSize::default()
        };
        Self {
            grid_size: count_or_default("grid_size", self.grid_size, u32::MAX, DEFAULT_GRID_SIZE),
            layer_count: count_or_default(
                "layer_count",
                self.layer_count,
                MAX_LAYER_COUNT,
                DEFAULT_LAYER_COUNT,
            ),
            machine: self.machine.sanitized(),
            sheet,
        }
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        if self.grid_size == 0 {
            return Err(SettingsError::invalid("grid_size", "must be at least 1"));
        }
        if !(1..=MAX_LAYER_COUNT).contains(&self.layer_count) {
            return Err(SettingsError::invalid(
                "layer_count",
                format!("must be between 1 and {}", MAX_LAYER_COUNT),
            ));
        }
        self.machine.validate()?;
        self.sheet.validate()?;
        Ok(())
    }

    /// Load settings from file (JSON or TOML).
    ///
    /// Invalid values fall back to their defaults with a warning.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let settings: Self = match SettingsFormat::from_path(path)? {
            SettingsFormat::Json => serde_json::from_str(&content)?,
            SettingsFormat::Toml => toml::from_str(&content)?,
        };

        Ok(settings.sanitized())
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match SettingsFormat::from_path(path)? {
            SettingsFormat::Json => serde_json::to_string_pretty(self)?,
            SettingsFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }
}

enum SettingsFormat {
    Json,
    Toml,
}

impl SettingsFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// String-valued settings as typed into a form.
///
/// `None` means the field was left empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSettings {
    pub grid_size: Option<String>,
    pub layer_count: Option<String>,
    pub point_diameter: Option<String>,
    pub pen_down_z: Option<String>,
    pub travel_z: Option<String>,
    pub feed_rate_xy: Option<String>,
    pub feed_rate_z: Option<String>,
    /// Preset name (`A4`, `A3`, `A2`, optionally `_landscape`) or `Custom`
    pub plotter_size: Option<String>,
    pub orientation: Option<String>,
    pub custom_width: Option<String>,
    pub custom_height: Option<String>,
}

impl RawSettings {
    /// Resolve the target sheet. Unknown presets and bad custom sizes fall back.
    pub fn sheet(&self) -> SheetSize {
        let name = self.plotter_size.as_deref().unwrap_or("A4").trim();

        if name.eq_ignore_ascii_case("custom") {
            return SheetSize::new(
                parse_positive(
                    "custom_width",
                    self.custom_width.as_deref(),
                    crate::sheet::DEFAULT_SHEET_WIDTH_MM,
                ),
                parse_positive(
                    "custom_height",
                    self.custom_height.as_deref(),
                    crate::sheet::DEFAULT_SHEET_HEIGHT_MM,
                ),
            );
        }

        let mut sheet = match name.parse::<SheetSize>() {
            Ok(sheet) => sheet,
            Err(e) => {
                warn!("{}, using default sheet", e);
                return SheetSize::default();
            }
        };

        if let Some(orientation) = self.orientation.as_deref() {
            match orientation.parse::<Orientation>() {
                Ok(o) => {
                    if let Ok(paper) = name
                        .split(|c: char| c == '_' || c.is_whitespace())
                        .next()
                        .unwrap_or_default()
                        .parse::<PaperSize>()
                    {
                        sheet = SheetSize::preset(paper, o);
                    }
                }
                Err(e) => warn!("{}, keeping {}", e, sheet),
            }
        }
        sheet
    }
}

fn check_positive(key: &str, value: f64) -> SettingsResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SettingsError::invalid(
            key,
            format!("must be a positive number, got {}", value),
        ));
    }
    Ok(())
}

fn check_finite(key: &str, value: f64) -> SettingsResult<()> {
    if !value.is_finite() {
        return Err(SettingsError::invalid(key, "must be a finite number"));
    }
    Ok(())
}

fn positive_or_default(key: &str, value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        warn!(key, value, default, "Invalid setting, using default");
        default
    }
}

fn finite_or_default(key: &str, value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        warn!(key, value, default, "Invalid setting, using default");
        default
    }
}

fn count_or_default(key: &str, value: u32, max: u32, default: u32) -> u32 {
    if (1..=max).contains(&value) {
        value
    } else {
        warn!(key, value, max, default, "Invalid setting, using default");
        default
    }
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
}

fn parse_positive(key: &str, raw: Option<&str>, default: f64) -> f64 {
    match parse_number(raw) {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => {
            if raw.is_some_and(|s| !s.trim().is_empty()) {
                warn!(key, raw = ?raw, default, "Malformed setting, using default");
            }
            default
        }
    }
}

fn parse_finite(key: &str, raw: Option<&str>, default: f64) -> f64 {
    match parse_number(raw) {
        Some(v) if v.is_finite() => v,
        _ => {
            if raw.is_some_and(|s| !s.trim().is_empty()) {
                warn!(key, raw = ?raw, default, "Malformed setting, using default");
            }
            default
        }
    }
}

/// Integer counts accept `"6"` as well as `"6.7"` (truncated).
fn parse_count(key: &str, raw: Option<&str>, default: u32) -> u32 {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    let parsed = trimmed.parse::<u32>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 1.0 && *v <= u32::MAX as f64)
            .map(|v| v.trunc() as u32)
    });
    match parsed {
        Some(v) if v >= 1 => v,
        _ => {
            if !trimmed.is_empty() {
                warn!(key, raw = ?raw, default, "Malformed setting, using default");
            }
            default
        }
    }
}
