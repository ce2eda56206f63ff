/*
 *  graphics/draw_target.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  embedded-graphics bridge - lets e-g primitives and text draw on the canvas
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

use embedded_graphics::geometry::Size;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::MonoGraphics;
use super::canvas::PixelState;
use crate::display::traits::DisplayTransport;

impl From<BinaryColor> for PixelState {
    fn from(color: BinaryColor) -> Self {
        match color {
            BinaryColor::On => PixelState::Set,
            BinaryColor::Off => PixelState::Clear,
        }
    }
}

/// Pixels are written through the clip rectangle like any other primitive
impl<T: DisplayTransport> DrawTarget for MonoGraphics<T> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.draw_dot(point.x, point.y, color.into());
        }
        Ok(())
    }
}

impl<T: DisplayTransport> OriginDimensions for MonoGraphics<T> {
    fn size(&self) -> Size {
        Size::new(self.screen_width(), self.screen_height())
    }
}
