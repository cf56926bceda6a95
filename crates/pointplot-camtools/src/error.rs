//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for the sampling,
//! ordering and emission pipeline and for writing generated files.

use pointplot_settings::SettingsError;
use std::io;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// A required input (image, generated files) is not available yet.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Invalid parameters were provided to a CAM tool.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Image decoding or processing failed.
    #[error("Image processing error: {0}")]
    ImageError(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// Settings could not be loaded or were invalid.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Errors related to CAM tool parameter validation.
#[derive(Error, Debug)]
pub enum ParameterError {
    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Dimensions are invalid (zero or negative).
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cam_tool_error_display() {
        let err = CamToolError::MissingInput("image".to_string());
        assert_eq!(err.to_string(), "Missing input: image");

        let err = CamToolError::InvalidParameters("grid step must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid parameters: grid step must be at least 1"
        );
    }

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::InvalidValue {
            name: "layer_count".to_string(),
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'layer_count': must be at least 1"
        );

        let err = ParameterError::InvalidDimensions("image is 0x0".to_string());
        assert_eq!(err.to_string(), "Invalid dimensions: image is 0x0");
    }

    #[test]
    fn test_error_conversion() {
        let param_err = ParameterError::InvalidDimensions("0x0".to_string());
        let cam_err: CamToolError = param_err.into();
        assert!(matches!(cam_err, CamToolError::Parameter(_)));

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let cam_err: CamToolError = io_err.into();
        assert!(matches!(cam_err, CamToolError::IoError(_)));
    }
}
