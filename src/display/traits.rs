/*
 *  display/traits.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  Core trait definitions for display transport abstraction
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

use crate::display::error::DisplayError;
use crate::graphics::canvas::{DisplayRotation, PanelGeometry};

/// What the graphics engine needs from a display
///
/// A transport owns whatever bus talks to the controller. It knows the
/// panel's native geometry, configures the controller for a rotation and
/// moves a finished canvas into display memory. Every call is synchronous
/// and blocking from the caller's point of view.
pub trait DisplayTransport {
    /// Panel size in the controller's native landscape orientation
    fn geometry(&self) -> PanelGeometry;

    /// Byte length of a canvas for this panel
    fn minimum_canvas_size(&self) -> usize {
        self.geometry().canvas_size()
    }

    /// Initialize the display hardware for a rotation
    ///
    /// This should run the controller's power-up command sequence and
    /// leave the display on.
    fn init(&mut self, rotation: DisplayRotation) -> Result<(), DisplayError>;

    /// Current rotation
    fn rotation(&self) -> DisplayRotation;

    /// Reconfigure the controller's scan direction and addressing mode
    ///
    /// Display memory must be rewritten afterwards.
    fn set_rotation(&mut self, rotation: DisplayRotation) -> Result<(), DisplayError>;

    /// Bulk transfer of a whole canvas into display memory
    fn write_display_memory(&mut self, buffer: &[u8]) -> Result<(), DisplayError>;

    /// Set display contrast (0-255)
    ///
    /// Returns an error if the display doesn't support contrast control.
    fn set_contrast(&mut self, _contrast: u8) -> Result<(), DisplayError> {
        Err(DisplayError::UnsupportedOperation)
    }

    /// Swap lit and dark pixels in hardware
    fn set_invert(&mut self, _inverted: bool) -> Result<(), DisplayError> {
        Err(DisplayError::UnsupportedOperation)
    }

    /// Put the display to sleep
    fn deinit(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

impl<T: DisplayTransport + ?Sized> DisplayTransport for Box<T> {
    fn geometry(&self) -> PanelGeometry {
        (**self).geometry()
    }

    fn minimum_canvas_size(&self) -> usize {
        (**self).minimum_canvas_size()
    }

    fn init(&mut self, rotation: DisplayRotation) -> Result<(), DisplayError> {
        (**self).init(rotation)
    }

    fn rotation(&self) -> DisplayRotation {
        (**self).rotation()
    }

    fn set_rotation(&mut self, rotation: DisplayRotation) -> Result<(), DisplayError> {
        (**self).set_rotation(rotation)
    }

    fn write_display_memory(&mut self, buffer: &[u8]) -> Result<(), DisplayError> {
        (**self).write_display_memory(buffer)
    }

    fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        (**self).set_contrast(contrast)
    }

    fn set_invert(&mut self, inverted: bool) -> Result<(), DisplayError> {
        (**self).set_invert(inverted)
    }

    fn deinit(&mut self) -> Result<(), DisplayError> {
        (**self).deinit()
    }
}
