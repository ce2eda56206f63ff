/*
 *  display/error.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  Unified error types for the graphics engine and display transports
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use thiserror::Error;

/// Unified error type for all display and drawing operations
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Controller initialization sequence failed
    #[error("Display initialization failed: {0}")]
    InitializationFailed(String),

    /// I2C communication error
    #[error("I2C communication error: {0}")]
    I2cError(String),

    /// Invalid configuration (geometry, bus address, ...)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Unsupported operation for this transport
    #[error("Operation not supported by this display")]
    UnsupportedOperation,

    /// Invalid rotation angle
    #[error("Invalid rotation angle: {0} (must be 0, 90, 180, or 270)")]
    InvalidRotation(u16),

    /// Canvas or transfer size does not match the panel
    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Clip rectangle with the upper-left corner below/right of the lower-right one
    #[error("Invalid clip rectangle: ({x0},{y0})-({x1},{y1})")]
    InvalidClipRect { x0: i32, y0: i32, x1: i32, y1: i32 },

    /// Font asset whose bitmap does not cover its character range
    #[error("Invalid font: {0}")]
    InvalidFont(String),

    /// Display interface error
    #[error("Display interface error: {0:?}")]
    InterfaceError(display_interface::DisplayError),

    /// Writer error from a console transport
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

// display_interface::DisplayError doesn't implement std::error::Error
// so it can't be a #[from] source
impl From<display_interface::DisplayError> for DisplayError {
    fn from(err: display_interface::DisplayError) -> Self {
        DisplayError::InterfaceError(err)
    }
}

// Conversion from Linux I2C errors
#[cfg(feature = "linux-i2c")]
impl From<linux_embedded_hal::I2CError> for DisplayError {
    fn from(err: linux_embedded_hal::I2CError) -> Self {
        DisplayError::I2cError(format!("{:?}", err))
    }
}

/// Factory error types
#[derive(Debug, Error)]
pub enum DisplayFactoryError {
    /// No driver specified in configuration
    #[error("No display driver specified in configuration")]
    NoDriverSpecified,

    /// No bus configuration specified
    #[error("No bus configuration specified")]
    NoBusConfiguration,

    /// Display driver initialization failed
    #[error("Driver initialization failed: {0}")]
    DriverInitFailed(#[from] DisplayError),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DisplayError::InvalidRotation(45);
        assert_eq!(err.to_string(), "Invalid rotation angle: 45 (must be 0, 90, 180, or 270)");

        let err = DisplayError::BufferSizeMismatch { expected: 1024, actual: 512 };
        assert_eq!(err.to_string(), "Buffer size mismatch: expected 1024 bytes, got 512");
    }

    #[test]
    fn test_factory_error_wraps_display_error() {
        let err: DisplayFactoryError = DisplayError::UnsupportedOperation.into();
        assert!(matches!(err, DisplayFactoryError::DriverInitFailed(DisplayError::UnsupportedOperation)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_interface_error_conversion() {
        let err: DisplayError = display_interface::DisplayError::BusWriteError.into();
        assert!(matches!(err, DisplayError::InterfaceError(_)));
    }
}
