/*
 *  display/drivers/console.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  Console transport - prints each rendered frame as ASCII art
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

use std::io::Write;

use log::info;

use crate::display::error::DisplayError;
use crate::display::traits::DisplayTransport;
use crate::graphics::canvas::{DisplayRotation, PanelGeometry, pixel_address};

const PIXEL_ON: char = '#';
const PIXEL_OFF: char = '.';

/// Display stand-in for development without hardware
///
/// Each frame is decoded with the current rotation's addressing and written
/// to the writer as one line per logical row.
pub struct ConsoleTransport<W: Write> {
    writer: W,
    geometry: PanelGeometry,
    rotation: DisplayRotation,
    frames: usize,
}

impl<W: Write> ConsoleTransport<W> {
    pub fn new(writer: W, geometry: PanelGeometry) -> Self {
        Self {
            writer,
            geometry,
            rotation: DisplayRotation::Landscape0,
            frames: 0,
        }
    }

    /// Number of frames written so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn release(self) -> W {
        self.writer
    }
}

impl<W: Write> DisplayTransport for ConsoleTransport<W> {
    fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    fn init(&mut self, rotation: DisplayRotation) -> Result<(), DisplayError> {
        self.rotation = rotation;
        let (width, height) = self.geometry.screen_size(rotation);
        info!("Console display {}x{} at {} degrees", width, height, rotation.degrees());
        Ok(())
    }

    fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: DisplayRotation) -> Result<(), DisplayError> {
        self.rotation = rotation;
        Ok(())
    }

    fn write_display_memory(&mut self, buffer: &[u8]) -> Result<(), DisplayError> {
        let expected = self.geometry.canvas_size();
        if buffer.len() != expected {
            return Err(DisplayError::BufferSizeMismatch { expected, actual: buffer.len() });
        }

        let (width, height) = self.geometry.screen_size(self.rotation);
        let mut frame = String::with_capacity(((width + 1) * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let on = pixel_address(&self.geometry, self.rotation, x, y)
                    .is_some_and(|(idx, bit)| buffer[idx] & (1 << bit) != 0);
                frame.push(if on { PIXEL_ON } else { PIXEL_OFF });
            }
            frame.push('\n');
        }
        self.writer.write_all(frame.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{MonoGraphics, PixelState};

    #[test]
    fn test_console_frame() {
        let geometry = PanelGeometry::new(16, 8).unwrap();
        let console = ConsoleTransport::new(Vec::new(), geometry);
        let mut gfx = MonoGraphics::new(console, DisplayRotation::Landscape0).unwrap();
        gfx.draw_line(0, 0, 15, 0, PixelState::Set);
        gfx.draw_dot(3, 7, PixelState::Set);
        gfx.render().unwrap();

        let console = gfx.release();
        assert_eq!(console.frames(), 1);
        let text = String::from_utf8(console.release()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "################");
        assert_eq!(lines[1], "................");
        assert_eq!(lines[7], "...#............");
        assert_eq!(lines[8], "");
    }

    #[test]
    fn test_console_portrait_frame() {
        let geometry = PanelGeometry::new(16, 8).unwrap();
        let console = ConsoleTransport::new(Vec::new(), geometry);
        let mut gfx = MonoGraphics::new(console, DisplayRotation::Portrait270).unwrap();
        gfx.draw_dot(7, 15, PixelState::Set);
        gfx.render().unwrap();

        let text = String::from_utf8(gfx.release().release()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].len(), 8);
        assert_eq!(lines[15], ".......#");
    }

    #[test]
    fn test_console_size_mismatch() {
        let geometry = PanelGeometry::new(16, 8).unwrap();
        let mut console = ConsoleTransport::new(Vec::new(), geometry);
        assert!(console.write_display_memory(&[0; 3]).is_err());
        assert_eq!(console.frames(), 0);
    }
}
