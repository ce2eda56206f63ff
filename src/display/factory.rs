/*
 *  display/factory.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display transport factory for configuration-driven construction
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

use crate::config::{BusConfig, DisplayConfig, DriverKind};
use crate::display::drivers::console::ConsoleTransport;
use crate::display::error::DisplayFactoryError;
use crate::display::traits::DisplayTransport;
use crate::graphics::canvas::{DisplayRotation, PanelGeometry};
use log::{debug, info};

#[cfg(feature = "linux-i2c")]
use crate::display::drivers::{port::I2cPort, ssd1306::Ssd1306};
#[cfg(feature = "linux-i2c")]
use crate::display::error::DisplayError;

/// Type alias for boxed display transport trait objects
pub type BoxedTransport = Box<dyn DisplayTransport>;

/// Factory for creating display transports from configuration
pub struct DisplayDriverFactory;

impl DisplayDriverFactory {
    /// Create a display transport from configuration
    ///
    /// This method examines the configuration and creates the appropriate
    /// transport based on the driver kind and bus configuration. The
    /// transport is not initialized; the graphics engine does that.
    ///
    /// # Arguments
    ///
    /// * `config` - Display configuration containing driver and bus settings
    ///
    /// # Returns
    ///
    /// A boxed trait object implementing DisplayTransport, or an error if the
    /// configuration is invalid or the driver/bus combination is unsupported.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let config = DisplayConfig {
    ///     driver: Some(DriverKind::Ssd1306),
    ///     bus: Some(BusConfig::I2c {
    ///         bus: "/dev/i2c-1".to_string(),
    ///         address: 0x3C,
    ///     }),
    ///     ..Default::default()
    /// };
    ///
    /// let transport = DisplayDriverFactory::create_from_config(&config)?;
    /// let gfx = MonoGraphics::new(transport, DisplayRotation::Landscape0)?;
    /// ```
    pub fn create_from_config(
        config: &DisplayConfig
    ) -> Result<BoxedTransport, DisplayFactoryError> {
        Self::validate_config(config)?;
        let driver_kind = config.driver
            .ok_or(DisplayFactoryError::NoDriverSpecified)?;

        match driver_kind {
            DriverKind::Console => {
                let (width, height) = config.panel_size();
                let geometry = PanelGeometry::new(width, height)?;
                info!("Creating console display {}x{}", width, height);
                Ok(Box::new(ConsoleTransport::new(std::io::stdout(), geometry)))
            }
            DriverKind::Ssd1306 => {
                let bus_config = config.bus.as_ref()
                    .ok_or(DisplayFactoryError::NoBusConfiguration)?;
                match bus_config {
                    BusConfig::I2c { bus, address } => Self::create_ssd1306_i2c(bus, *address, config),
                }
            }
        }
    }

    #[cfg(feature = "linux-i2c")]
    fn create_ssd1306_i2c(
        bus: &str,
        address: u8,
        config: &DisplayConfig,
    ) -> Result<BoxedTransport, DisplayFactoryError> {
        info!("Opening SSD1306 on {} at address 0x{:02X}", bus, address);

        let i2c = linux_embedded_hal::I2cdev::new(bus)
            .map_err(|e| DisplayError::I2cError(format!("Failed to open {}: {}", bus, e)))?;
        let port = I2cPort::new(i2c, address)?;
        let display = Ssd1306::new(port, config.ssd1306_config())?;

        debug!("SSD1306 transport ready");
        Ok(Box::new(display))
    }

    #[cfg(not(feature = "linux-i2c"))]
    fn create_ssd1306_i2c(
        bus: &str,
        _address: u8,
        _config: &DisplayConfig,
    ) -> Result<BoxedTransport, DisplayFactoryError> {
        debug!("Cannot open {}: built without I2C support", bus);
        Err(DisplayFactoryError::ConfigError(
            "SSD1306 over I2C not enabled. Enable with --features linux-i2c".to_string()
        ))
    }

    /// Validate a configuration without creating a transport
    ///
    /// This is useful for checking configuration at startup before attempting
    /// to initialize hardware.
    pub fn validate_config(config: &DisplayConfig) -> Result<(), DisplayFactoryError> {
        let driver_kind = config.driver
            .ok_or(DisplayFactoryError::NoDriverSpecified)?;

        if driver_kind == DriverKind::Ssd1306 && config.bus.is_none() {
            return Err(DisplayFactoryError::NoBusConfiguration);
        }

        if let Some(rotation) = config.rotate_deg {
            DisplayRotation::try_from(rotation)
                .map_err(|e| DisplayFactoryError::ConfigError(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::MonoGraphics;

    #[test]
    fn test_validate_config_no_driver() {
        let config = DisplayConfig {
            driver: None,
            bus: Some(BusConfig::I2c {
                bus: "/dev/i2c-1".to_string(),
                address: 0x3C,
            }),
            ..Default::default()
        };

        assert!(matches!(
            DisplayDriverFactory::validate_config(&config),
            Err(DisplayFactoryError::NoDriverSpecified)
        ));
    }

    #[test]
    fn test_validate_config_no_bus() {
        let config = DisplayConfig {
            driver: Some(DriverKind::Ssd1306),
            bus: None,
            ..Default::default()
        };

        assert!(matches!(
            DisplayDriverFactory::create_from_config(&config),
            Err(DisplayFactoryError::NoBusConfiguration)
        ));
    }

    #[test]
    fn test_validate_config_invalid_rotation() {
        let config = DisplayConfig {
            driver: Some(DriverKind::Console),
            rotate_deg: Some(45), // Invalid!
            ..Default::default()
        };

        assert!(DisplayDriverFactory::validate_config(&config).is_err());
    }

    #[test]
    fn test_console_transport_from_config() {
        let config = DisplayConfig {
            driver: Some(DriverKind::Console),
            width: Some(96),
            height: Some(16),
            ..Default::default()
        };

        let transport = DisplayDriverFactory::create_from_config(&config).unwrap();
        assert_eq!(transport.geometry(), PanelGeometry::new(96, 16).unwrap());

        let gfx = MonoGraphics::new(transport, DisplayRotation::Portrait90).unwrap();
        assert_eq!((gfx.screen_width(), gfx.screen_height()), (16, 96));
    }

    #[test]
    fn test_console_bad_geometry() {
        let config = DisplayConfig {
            driver: Some(DriverKind::Console),
            height: Some(20),
            ..Default::default()
        };

        assert!(matches!(
            DisplayDriverFactory::create_from_config(&config),
            Err(DisplayFactoryError::DriverInitFailed(_))
        ));
    }

    #[test]
    fn test_ssd1306_missing_device() {
        let config = DisplayConfig {
            driver: Some(DriverKind::Ssd1306),
            bus: Some(BusConfig::I2c {
                bus: "/dev/i2c-monogfx-missing".to_string(),
                address: 0x3C,
            }),
            ..Default::default()
        };

        assert!(DisplayDriverFactory::create_from_config(&config).is_err());
    }
}
