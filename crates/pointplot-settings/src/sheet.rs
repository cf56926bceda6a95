//! Target sheet sizes
//!
//! Fixed ISO presets (A4, A3, A2) in either orientation, or custom
//! dimensions. All values are millimetres.

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SHEET_WIDTH_MM: f64 = 210.0;
pub const DEFAULT_SHEET_HEIGHT_MM: f64 = 297.0;

/// Paper preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A2,
    /// User supplied width and height
    Custom,
}

impl PaperSize {
    /// Portrait dimensions `(width, height)` of a preset, `None` for custom
    pub fn portrait_mm(&self) -> Option<(f64, f64)> {
        match self {
            Self::A4 => Some((210.0, 297.0)),
            Self::A3 => Some((297.0, 420.0)),
            Self::A2 => Some((420.0, 594.0)),
            Self::Custom => None,
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A4 => write!(f, "A4"),
            Self::A3 => write!(f, "A3"),
            Self::A2 => write!(f, "A2"),
            Self::Custom => write!(f, "Custom"),
        }
    }
}

impl FromStr for PaperSize {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "a3" => Ok(Self::A3),
            "a2" => Ok(Self::A2),
            "custom" => Ok(Self::Custom),
            other => Err(SettingsError::UnknownPreset(other.to_string())),
        }
    }
}

/// Sheet orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => write!(f, "portrait"),
            Self::Landscape => write!(f, "landscape"),
        }
    }
}

impl FromStr for Orientation {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            other => Err(SettingsError::UnknownPreset(other.to_string())),
        }
    }
}

/// Physical size of the target sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetSize {
    #[serde(deserialize_with = "crate::lenient::float")]
    pub width_mm: f64,
    #[serde(deserialize_with = "crate::lenient::float")]
    pub height_mm: f64,
}

impl Default for SheetSize {
    fn default() -> Self {
        Self {
            width_mm: DEFAULT_SHEET_WIDTH_MM,
            height_mm: DEFAULT_SHEET_HEIGHT_MM,
        }
    }
}

impl SheetSize {
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    /// Size of a paper preset. `Custom` resolves to the default sheet.
    pub fn preset(paper: PaperSize, orientation: Orientation) -> Self {
        let (w, h) = paper
            .portrait_mm()
            .unwrap_or((DEFAULT_SHEET_WIDTH_MM, DEFAULT_SHEET_HEIGHT_MM));
        match orientation {
            Orientation::Portrait => Self::new(w, h),
            Orientation::Landscape => Self::new(h, w),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.width_mm.is_finite()
            && self.height_mm.is_finite()
            && self.width_mm > 0.0
            && self.height_mm > 0.0
    }

    pub fn validate(&self) -> SettingsResult<()> {
        if !self.is_valid() {
            return Err(SettingsError::invalid(
                "sheet",
                format!(
                    "dimensions must be positive, got {} x {}",
                    self.width_mm, self.height_mm
                ),
            ));
        }
        Ok(())
    }
}

/// Parses preset names such as `A4`, `A3_landscape` or `a2 portrait`.
impl FromStr for SheetSize {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split(|c: char| c == '_' || c.is_whitespace());
        let paper: PaperSize = parts.next().unwrap_or_default().parse()?;
        if paper == PaperSize::Custom {
            return Err(SettingsError::UnknownPreset(s.to_string()));
        }
        let orientation = match parts.find(|p| !p.is_empty()) {
            Some(o) => o.parse()?,
            None => Orientation::Portrait,
        };
        Ok(Self::preset(paper, orientation))
    }
}

impl fmt::Display for SheetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} mm", self.width_mm, self.height_mm)
    }
}
