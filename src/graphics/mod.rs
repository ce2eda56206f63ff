/*
 *  graphics/mod.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  Graphics engine - owns the canvas and hands it to a display transport
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

pub mod canvas;
pub mod clip;
pub mod draw_target;
pub mod glyph;
pub mod primitives;

pub use canvas::{Canvas, DisplayRotation, PanelGeometry, PixelState, pixel_address};
pub use clip::ClipRect;
pub use glyph::{BitOrder, MonoFont};

use crate::display::error::DisplayError;
use crate::display::traits::DisplayTransport;

use log::{debug, info};

/// Monochrome graphics engine
///
/// Every drawing call mutates the canvas in place and returns once the
/// pixels are written. Nothing reaches the display until [`render`] is
/// called. Drawing methods take `&mut self`; sharing an engine between
/// threads needs an outer lock.
///
/// [`render`]: MonoGraphics::render
pub struct MonoGraphics<T: DisplayTransport> {
    /// The display the canvas is rendered to
    transport: T,

    /// Drawing surface in display memory order
    canvas: Canvas,

    /// Writes outside this rectangle are dropped
    clip: ClipRect,
}

impl<T: DisplayTransport> MonoGraphics<T> {
    /// Create the engine, initialize the display and allocate a blank canvas
    ///
    /// # Arguments
    ///
    /// * `transport` - The display to render to
    /// * `rotation` - Initial screen orientation
    ///
    /// # Returns
    ///
    /// The engine with a zeroed canvas and a full-screen clip rectangle, or
    /// an error if the transport's canvas size disagrees with its geometry
    /// or the controller could not be initialized.
    pub fn new(mut transport: T, rotation: DisplayRotation) -> Result<Self, DisplayError> {
        let geometry = transport.geometry();
        let expected = geometry.canvas_size();
        let reported = transport.minimum_canvas_size();
        if reported != expected {
            return Err(DisplayError::BufferSizeMismatch { expected, actual: reported });
        }

        transport.init(rotation)?;

        let canvas = Canvas::new(geometry, rotation);
        let (width, height) = canvas.screen_size();
        info!(
            "Graphics engine ready: {}x{} logical, {} degrees, {} byte canvas",
            width,
            height,
            rotation.degrees(),
            canvas.len()
        );

        Ok(Self {
            transport,
            canvas,
            clip: ClipRect::full_screen(width, height),
        })
    }

    /// Hand the canvas to the display
    ///
    /// Transport failures are returned unchanged; there is no retry.
    pub fn render(&mut self) -> Result<(), DisplayError> {
        debug!("Rendering {} bytes", self.canvas.len());
        self.transport.write_display_memory(self.canvas.as_bytes())
    }

    pub fn display_rotation(&self) -> DisplayRotation {
        self.canvas.rotation()
    }

    /// Change the screen orientation
    ///
    /// The canvas is not repainted; callers must redraw. The clip rectangle
    /// is reset to the new full screen.
    pub fn set_display_rotation(&mut self, rotation: DisplayRotation) -> Result<(), DisplayError> {
        self.transport.set_rotation(rotation)?;
        self.canvas.set_rotation(rotation);
        self.reset_clip_rect();
        debug!("Display rotation set to {} degrees", rotation.degrees());
        Ok(())
    }

    /// Logical width for the current rotation
    pub fn screen_width(&self) -> u32 {
        self.canvas.screen_size().0
    }

    /// Logical height for the current rotation
    pub fn screen_height(&self) -> u32 {
        self.canvas.screen_size().1
    }

    /// Restrict drawing to the inclusive rectangle (x0,y0)-(x1,y1)
    ///
    /// Reversed corners are rejected and the previous rectangle stays in effect.
    pub fn set_clip_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError> {
        self.clip = ClipRect::new(x0, y0, x1, y1)?;
        debug!("Clip rectangle ({},{})-({},{})", x0, y0, x1, y1);
        Ok(())
    }

    /// Clip to the whole logical screen
    pub fn reset_clip_rect(&mut self) {
        self.clip = ClipRect::full_screen(self.screen_width(), self.screen_height());
    }

    pub fn clip_rect(&self) -> ClipRect {
        self.clip
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Zero the whole canvas, ignoring the clip rectangle
    pub fn clear_canvas(&mut self) {
        self.canvas.clear();
    }

    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.transport.set_contrast(contrast)
    }

    pub fn set_invert(&mut self, inverted: bool) -> Result<(), DisplayError> {
        self.transport.set_invert(inverted)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Drop the canvas and give the transport back
    pub fn release(self) -> T {
        self.transport
    }
}
