/*
 *  display/drivers/ssd1306.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  SSD1306 OLED controller driver
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

use log::{info, trace};
use serde::{Deserialize, Serialize};

use crate::display::drivers::port::CommandPort;
use crate::display::error::DisplayError;
use crate::display::traits::DisplayTransport;
use crate::graphics::canvas::{DisplayRotation, PanelGeometry};

// Command bytes from the SSD1306 datasheet
const SET_MEM_ADDR_MODE: u8 = 0x20;
const ADDR_MODE_HORIZONTAL: u8 = 0;
const ADDR_MODE_VERTICAL: u8 = 1;
const SET_COL_ADDR: u8 = 0x21;
const SET_PAGE_ADDR: u8 = 0x22;
const SET_DISP_START_LINE: u8 = 0x40;
const SET_CONTRAST: u8 = 0x81;
const SET_SEGMENT_REMAP_OFF: u8 = 0xA0;
const SET_SEGMENT_REMAP_ON: u8 = 0xA1;
const SET_ENTIRE_ON: u8 = 0xA4;
const SET_DISP_NORM: u8 = 0xA6;
const SET_DISP_INV: u8 = 0xA7;
const SET_MUX_RATIO: u8 = 0xA8;
const SET_DISP_OFF: u8 = 0xAE;
const SET_DISP_ON: u8 = 0xAF;
const SET_COM_OUT_FORWARD: u8 = 0xC0;
const SET_COM_OUT_REVERSE: u8 = 0xC8;
const SET_DISP_OFFSET: u8 = 0xD3;
const SET_DISP_CLK_DIV_FREQ: u8 = 0xD5;
const SET_PRECHARGE: u8 = 0xD9;
const SET_COM_PIN_CFG: u8 = 0xDA;
const SET_VCOM_DESEL: u8 = 0xDB;
const SET_CHARGE_PUMP: u8 = 0x8D;

const fn clk_div_freq(divider: u8, frequency: u8) -> u8 {
    (divider & 0x0F) | ((frequency & 0x0F) << 4)
}

const fn precharge_period(phase1: u8, phase2: u8) -> u8 {
    (phase1 & 0x0F) | ((phase2 & 0x0F) << 4)
}

const fn vcom_deselect(level: u8) -> u8 {
    (level & 0x07) << 4
}

const fn charge_pump(enable: bool) -> u8 {
    if enable { 0x14 } else { 0x10 }
}

/// COM pin hardware configuration (command 0xDA), panel specific
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComPinConfig {
    /// Sequential COM pins, no left/right remap; typical for 128x32
    SequentialNoRemap,
    /// Alternate COM pins, no left/right remap; typical for 128x64
    #[default]
    AlternateNoRemap,
    SequentialRemap,
    AlternateRemap,
}

impl ComPinConfig {
    pub fn command_byte(&self) -> u8 {
        match self {
            ComPinConfig::SequentialNoRemap => 0x02,
            ComPinConfig::AlternateNoRemap => 0x12,
            ComPinConfig::SequentialRemap => 0x22,
            ComPinConfig::AlternateRemap => 0x32,
        }
    }
}

/// Panel wiring and geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ssd1306Config {
    /// Landscape width in pixels, 1..=128
    pub width: u32,
    /// Landscape height in pixels, a multiple of 8 in 16..=64
    pub height: u32,
    pub com_pins: ComPinConfig,
    /// First display RAM column used by the panel
    pub first_column: u8,
    /// First display RAM page used by the panel
    pub first_page: u8,
    pub contrast: u8,
}

impl Default for Ssd1306Config {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            com_pins: ComPinConfig::AlternateNoRemap,
            first_column: 0,
            first_page: 0,
            contrast: 255,
        }
    }
}

/// Segment remap, COM scan direction and addressing mode for a rotation
fn rotation_constants(rotation: DisplayRotation) -> (u8, u8, u8) {
    match rotation {
        DisplayRotation::Landscape0 => (SET_SEGMENT_REMAP_OFF, SET_COM_OUT_FORWARD, ADDR_MODE_HORIZONTAL),
        DisplayRotation::Portrait90 => (SET_SEGMENT_REMAP_ON, SET_COM_OUT_FORWARD, ADDR_MODE_VERTICAL),
        DisplayRotation::Landscape180 => (SET_SEGMENT_REMAP_ON, SET_COM_OUT_REVERSE, ADDR_MODE_HORIZONTAL),
        DisplayRotation::Portrait270 => (SET_SEGMENT_REMAP_OFF, SET_COM_OUT_REVERSE, ADDR_MODE_VERTICAL),
    }
}

/// SSD1306 controller on a command port
pub struct Ssd1306<P: CommandPort> {
    port: P,
    config: Ssd1306Config,
    geometry: PanelGeometry,
    rotation: DisplayRotation,
    inverted: bool,
}

impl<P: CommandPort> Ssd1306<P> {
    /// Create a driver; nothing is sent until [`init`](DisplayTransport::init)
    ///
    /// # Arguments
    ///
    /// * `port` - Bus the controller is attached to
    /// * `config` - Panel geometry and wiring
    ///
    /// # Returns
    ///
    /// The driver, or `InvalidConfiguration` for a geometry the controller
    /// cannot drive
    pub fn new(port: P, config: Ssd1306Config) -> Result<Self, DisplayError> {
        if !(16..=64).contains(&config.height) || config.height % 8 != 0 {
            return Err(DisplayError::InvalidConfiguration(format!(
                "SSD1306 height {} must be a multiple of 8 between 16 and 64",
                config.height
            )));
        }
        if !(1..=128).contains(&config.width) {
            return Err(DisplayError::InvalidConfiguration(format!(
                "SSD1306 width {} must be between 1 and 128",
                config.width
            )));
        }
        let geometry = PanelGeometry::new(config.width, config.height)?;
        if config.first_column as u32 >= config.width || config.first_page as u32 >= geometry.num_pages() {
            return Err(DisplayError::InvalidConfiguration(format!(
                "first column {} / page {} outside the panel",
                config.first_column, config.first_page
            )));
        }

        Ok(Self {
            port,
            config,
            geometry,
            rotation: DisplayRotation::Landscape0,
            inverted: false,
        })
    }

    pub fn config(&self) -> &Ssd1306Config {
        &self.config
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn release(self) -> P {
        self.port
    }

    fn command(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        trace!("SSD1306 command {:02X?}", bytes);
        self.port.write_command(bytes)
    }

    /// Send a list of commands, each preceded by its byte count
    pub fn write_command_list(&mut self, list: &[u8]) -> Result<(), DisplayError> {
        let mut idx = 0;
        while idx < list.len() {
            let nbytes = list[idx] as usize;
            idx += 1;
            let cmd = list.get(idx..idx + nbytes).ok_or_else(|| {
                DisplayError::Other(format!("command list truncated at byte {}", idx))
            })?;
            self.command(cmd)?;
            idx += nbytes;
        }
        Ok(())
    }

    /// Program scan direction and addressing mode for a rotation
    ///
    /// Display RAM is not rewritten.
    pub fn set_display_rotation(&mut self, rotation: DisplayRotation) -> Result<(), DisplayError> {
        let (remap, com_dir, addr_mode) = rotation_constants(rotation);
        self.write_command_list(&[
            2, SET_MEM_ADDR_MODE, addr_mode,
            1, remap,
            1, com_dir,
        ])?;
        self.rotation = rotation;
        Ok(())
    }

    /// Swap lit and dark pixels without touching display RAM
    pub fn set_invert(&mut self, inverted: bool) -> Result<(), DisplayError> {
        self.command(&[if inverted { SET_DISP_INV } else { SET_DISP_NORM }])?;
        self.inverted = inverted;
        Ok(())
    }

    /// Write `buffer` to display RAM starting at (col, page)
    ///
    /// The address window runs from there to the last column and page; the
    /// controller wraps within it.
    pub fn write_display_window(&mut self, buffer: &[u8], col: u8, page: u8) -> Result<(), DisplayError> {
        let last_page = (self.geometry.num_pages() - 1) as u8;
        let last_col = (self.geometry.landscape_width - 1) as u8;
        if col > last_col || page > last_page {
            return Err(DisplayError::InvalidConfiguration(format!(
                "window origin column {} page {} outside the panel",
                col, page
            )));
        }
        self.write_command_list(&[
            3, SET_PAGE_ADDR, page, last_page,
            3, SET_COL_ADDR, col, last_col,
        ])?;
        self.port.write_data(buffer)
    }

    /// Zero display RAM from the panel's first column and page
    pub fn clear_display_mem(&mut self) -> Result<(), DisplayError> {
        let blank = vec![0u8; self.geometry.canvas_size()];
        self.write_display_window(&blank, self.config.first_column, self.config.first_page)
    }
}

impl<P: CommandPort> DisplayTransport for Ssd1306<P> {
    fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    fn init(&mut self, rotation: DisplayRotation) -> Result<(), DisplayError> {
        info!(
            "Initializing SSD1306 {}x{} at {} degrees",
            self.config.width,
            self.config.height,
            rotation.degrees()
        );
        let (remap, com_dir, addr_mode) = rotation_constants(rotation);

        #[rustfmt::skip]
        let init_commands = [
            1, SET_DISP_OFF,
            2, SET_MEM_ADDR_MODE, addr_mode,
            1, SET_DISP_START_LINE,
            1, remap,
            2, SET_MUX_RATIO, (self.config.height - 1) as u8,
            1, com_dir,
            2, SET_DISP_OFFSET, 0,
            2, SET_DISP_CLK_DIV_FREQ, clk_div_freq(0, 8),
            2, SET_PRECHARGE, precharge_period(2, 2),
            2, SET_COM_PIN_CFG, self.config.com_pins.command_byte(),
            2, SET_VCOM_DESEL, vcom_deselect(4),
            2, SET_CONTRAST, self.config.contrast,
            1, SET_DISP_NORM,
            2, SET_CHARGE_PUMP, charge_pump(true),
            1, SET_ENTIRE_ON,
            1, SET_DISP_ON,
        ];
        self.write_command_list(&init_commands)
            .map_err(|e| DisplayError::InitializationFailed(e.to_string()))?;

        self.rotation = rotation;
        self.inverted = false;
        Ok(())
    }

    fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: DisplayRotation) -> Result<(), DisplayError> {
        self.set_display_rotation(rotation)
    }

    fn write_display_memory(&mut self, buffer: &[u8]) -> Result<(), DisplayError> {
        let expected = self.geometry.canvas_size();
        if buffer.len() != expected {
            return Err(DisplayError::BufferSizeMismatch { expected, actual: buffer.len() });
        }
        self.write_display_window(buffer, 0, 0)
    }

    fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.command(&[SET_CONTRAST, contrast])?;
        self.config.contrast = contrast;
        Ok(())
    }

    fn set_invert(&mut self, inverted: bool) -> Result<(), DisplayError> {
        Ssd1306::set_invert(self, inverted)
    }

    fn deinit(&mut self) -> Result<(), DisplayError> {
        self.command(&[SET_DISP_OFF])
    }
}
