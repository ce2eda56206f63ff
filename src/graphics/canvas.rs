/*
 *  graphics/canvas.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  Canvas addressing model - rotation-aware pixel to byte/bit mapping
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

//! The controller's display RAM is organized as pages of 8 pixels. In
//! landscape a byte at (column, page) holds 8 vertical pixels, LSB at the
//! top. In portrait the controller runs in vertical addressing mode, so the
//! same bytes hold 8 horizontal pixels, LSB at the left. The canvas never
//! changes shape; only the formula selecting byte and bit does.

use crate::display::error::DisplayError;

/// Orientation of the display, clockwise from the controller's native landscape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayRotation {
    /// Native orientation, e.g. 128x64
    #[default]
    Landscape0,
    /// Rotated 90 degrees clockwise, e.g. 64x128
    Portrait90,
    /// Rotated 180 degrees clockwise, e.g. 128x64
    Landscape180,
    /// Rotated 270 degrees clockwise, e.g. 64x128
    Portrait270,
}

impl DisplayRotation {
    /// Whether the logical width and height are swapped relative to the panel
    pub fn is_portrait(&self) -> bool {
        matches!(self, DisplayRotation::Portrait90 | DisplayRotation::Portrait270)
    }

    pub fn degrees(&self) -> u16 {
        match self {
            DisplayRotation::Landscape0 => 0,
            DisplayRotation::Portrait90 => 90,
            DisplayRotation::Landscape180 => 180,
            DisplayRotation::Portrait270 => 270,
        }
    }
}

impl TryFrom<u16> for DisplayRotation {
    type Error = DisplayError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(DisplayRotation::Landscape0),
            90 => Ok(DisplayRotation::Portrait90),
            180 => Ok(DisplayRotation::Landscape180),
            270 => Ok(DisplayRotation::Portrait270),
            _ => Err(DisplayError::InvalidRotation(degrees)),
        }
    }
}

/// How a drawing operation changes the target bit
///
/// When the memory bit is 1 the pixel is lit in normal display mode and
/// dark in inverted display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelState {
    /// Set the memory bit to 1
    Set,
    /// Set the memory bit to 0
    Clear,
    /// Flip the memory bit
    Flip,
    /// Leave the memory bit unchanged
    Transparent,
}

/// Panel size in the controller's native (landscape) orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    pub landscape_width: u32,
    pub landscape_height: u32,
}

impl PanelGeometry {
    /// Create a geometry; the landscape height must be a whole number of pages
    pub fn new(landscape_width: u32, landscape_height: u32) -> Result<Self, DisplayError> {
        if landscape_width == 0 || landscape_height == 0 {
            return Err(DisplayError::InvalidConfiguration(
                "panel width/height must be > 0".to_string(),
            ));
        }
        if landscape_height % 8 != 0 {
            return Err(DisplayError::InvalidConfiguration(format!(
                "panel height {} is not a multiple of 8",
                landscape_height
            )));
        }
        Ok(Self { landscape_width, landscape_height })
    }

    /// Number of 8-pixel pages
    pub fn num_pages(&self) -> u32 {
        self.landscape_height / 8
    }

    /// Bytes needed to hold one bit per pixel
    pub fn canvas_size(&self) -> usize {
        self.num_pages() as usize * self.landscape_width as usize
    }

    /// Logical (width, height) for a rotation
    pub fn screen_size(&self, rotation: DisplayRotation) -> (u32, u32) {
        if rotation.is_portrait() {
            (self.landscape_height, self.landscape_width)
        } else {
            (self.landscape_width, self.landscape_height)
        }
    }
}

/// Map a logical pixel to its byte index and bit number
///
/// Returns `None` when `(x, y)` lies outside the logical screen for the
/// given rotation.
pub fn pixel_address(
    geometry: &PanelGeometry,
    rotation: DisplayRotation,
    x: u32,
    y: u32,
) -> Option<(usize, u8)> {
    let (width, height) = geometry.screen_size(rotation);
    if x >= width || y >= height {
        return None;
    }
    if rotation.is_portrait() {
        // bytes go left to right LSB to MSB in rows of num_pages bytes
        let page = (x / 8) as usize;
        let idx = page + y as usize * geometry.num_pages() as usize;
        Some((idx, (x % 8) as u8))
    } else {
        // bytes go top to bottom LSB to MSB in columns of num_pages bytes
        let page = (y / 8) as usize;
        let idx = page * geometry.landscape_width as usize + x as usize;
        Some((idx, (y % 8) as u8))
    }
}

/// One-bit-per-pixel drawing surface in controller memory order
#[derive(Debug, Clone)]
pub struct Canvas {
    buf: Vec<u8>,
    geometry: PanelGeometry,
    rotation: DisplayRotation,
}

impl Canvas {
    /// Allocate a zeroed canvas for the panel
    pub fn new(geometry: PanelGeometry, rotation: DisplayRotation) -> Self {
        Self {
            buf: vec![0; geometry.canvas_size()],
            geometry,
            rotation,
        }
    }

    pub fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    pub fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    /// Select the addressing formula; existing content is not rearranged
    pub fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.rotation = rotation;
    }

    /// Logical (width, height) for the current rotation
    pub fn screen_size(&self) -> (u32, u32) {
        self.geometry.screen_size(self.rotation)
    }

    /// Byte length, never zero for a validated geometry
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Raw bytes in display memory order
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Zero every bit
    pub fn clear(&mut self) {
        self.buf.fill(0);
    }

    /// Write one pixel at logical coordinates
    ///
    /// Coordinates must lie on the logical screen. Debug builds assert this;
    /// release builds ignore the write.
    pub fn set_pixel(&mut self, x: u32, y: u32, state: PixelState) {
        if state == PixelState::Transparent {
            return;
        }
        let address = pixel_address(&self.geometry, self.rotation, x, y);
        debug_assert!(
            address.is_some(),
            "pixel ({}, {}) outside {:?} screen {:?}",
            x,
            y,
            self.rotation,
            self.screen_size()
        );
        let Some((idx, bit)) = address else {
            return;
        };
        let Some(byte) = self.buf.get_mut(idx) else {
            return;
        };
        let mask = 1u8 << bit;
        match state {
            PixelState::Set => *byte |= mask,
            PixelState::Clear => *byte &= !mask,
            PixelState::Flip => *byte ^= mask,
            PixelState::Transparent => {}
        }
    }

    /// Read one pixel back; `None` when off screen
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<bool> {
        let (idx, bit) = pixel_address(&self.geometry, self.rotation, x, y)?;
        self.buf.get(idx).map(|byte| byte & (1 << bit) != 0)
    }

    /// Number of lit pixels
    pub fn count_set_pixels(&self) -> usize {
        self.buf.iter().map(|b| b.count_ones() as usize).sum()
    }
}
