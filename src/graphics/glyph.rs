/*
 *  graphics/glyph.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  Fixed-width bitmap fonts and the glyph renderer
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

use log::warn;

use super::MonoGraphics;
use super::canvas::PixelState;
use crate::display::error::DisplayError;
use crate::display::traits::DisplayTransport;

/// Which end of a font byte holds the topmost pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    MsbFirst,
    LsbFirst,
}

/// Packed fixed-width bitmap font
///
/// Glyphs are stored in character order. Each glyph is `width` columns,
/// each column `ceil(height / 8)` bytes, top rows first.
#[derive(Debug, Clone, Copy)]
pub struct MonoFont<'a> {
    height: u8,
    width: u8,
    bytes: &'a [u8],
    first_char: u8,
    last_char: u8,
    bit_order: BitOrder,
}

impl<'a> MonoFont<'a> {
    /// Build a font in a const context
    ///
    /// Panics (a compile error in a `static`) when the bitmap is too short
    /// for the character range or a dimension is zero.
    pub const fn new(
        height: u8,
        width: u8,
        bytes: &'a [u8],
        first_char: u8,
        last_char: u8,
        bit_order: BitOrder,
    ) -> Self {
        assert!(height > 0 && width > 0, "font dimensions must be non-zero");
        assert!(first_char <= last_char, "font character range is reversed");
        let needed = (last_char - first_char) as usize + 1;
        let needed = needed * width as usize * height.div_ceil(8) as usize;
        assert!(bytes.len() >= needed, "font bitmap shorter than its character range");
        Self { height, width, bytes, first_char, last_char, bit_order }
    }

    /// Build a font from runtime data, checking the bitmap length
    pub fn try_new(
        height: u8,
        width: u8,
        bytes: &'a [u8],
        first_char: u8,
        last_char: u8,
        bit_order: BitOrder,
    ) -> Result<Self, DisplayError> {
        if height == 0 || width == 0 {
            return Err(DisplayError::InvalidFont(format!(
                "dimensions {}x{} must be non-zero",
                width, height
            )));
        }
        if first_char > last_char {
            return Err(DisplayError::InvalidFont(format!(
                "character range {:#04x}..{:#04x} is reversed",
                first_char, last_char
            )));
        }
        let needed = (last_char - first_char) as usize + 1;
        let needed = needed * width as usize * height.div_ceil(8) as usize;
        if bytes.len() < needed {
            return Err(DisplayError::InvalidFont(format!(
                "bitmap has {} bytes, character range needs {}",
                bytes.len(),
                needed
            )));
        }
        Ok(Self { height, width, bytes, first_char, last_char, bit_order })
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn first_char(&self) -> u8 {
        self.first_char
    }

    pub fn last_char(&self) -> u8 {
        self.last_char
    }

    pub fn bit_order(&self) -> BitOrder {
        self.bit_order
    }

    pub fn bytes_per_column(&self) -> usize {
        self.height.div_ceil(8) as usize
    }

    pub fn contains(&self, chr: char) -> bool {
        (self.first_char as u32..=self.last_char as u32).contains(&(chr as u32))
    }

    /// Packed columns of one character, `None` outside the font's range
    pub fn glyph(&self, chr: char) -> Option<&'a [u8]> {
        if !self.contains(chr) {
            return None;
        }
        let glyph_len = self.width as usize * self.bytes_per_column();
        let offset = (chr as u32 - self.first_char as u32) as usize * glyph_len;
        self.bytes.get(offset..offset + glyph_len)
    }

    /// Pixel width of `len` characters
    pub fn text_width(&self, len: usize) -> u32 {
        (len as u32).saturating_mul(self.width as u32)
    }
}

impl<T: DisplayTransport> MonoGraphics<T> {
    /// Draw one character with its upper-left corner at (x, y)
    ///
    /// Set font bits are written with `fg`, clear bits with `bg`. Every
    /// pixel goes through [`draw_dot`](MonoGraphics::draw_dot) so glyphs
    /// are clipped. `chr` must be in the font's range; release builds skip
    /// characters that are not.
    pub fn draw_character(
        &mut self,
        font: &MonoFont,
        x: i32,
        y: i32,
        chr: char,
        fg: PixelState,
        bg: PixelState,
    ) {
        let glyph = font.glyph(chr);
        debug_assert!(
            glyph.is_some(),
            "character {:?} outside font range {:#04x}..={:#04x}",
            chr,
            font.first_char,
            font.last_char
        );
        let Some(glyph) = glyph else {
            warn!("Skipping character {:?}, not in font", chr);
            return;
        };

        let bytes_per_column = font.bytes_per_column();
        for (col, column) in glyph.chunks(bytes_per_column).enumerate() {
            let xpixel = x as i64 + col as i64;
            for row in 0..font.height as usize {
                let rowbits = column[row / 8];
                let mask = match font.bit_order {
                    BitOrder::MsbFirst => 0x80u8 >> (row % 8),
                    BitOrder::LsbFirst => 0x01u8 << (row % 8),
                };
                let state = if rowbits & mask != 0 { fg } else { bg };
                self.plot(xpixel, y as i64 + row as i64, state);
            }
        }
    }

    /// Draw the first `len` characters of `text` on one line
    ///
    /// Each glyph advances the cursor by the font width. `len` must not
    /// exceed the character count of `text`; release builds clamp it.
    pub fn draw_string(
        &mut self,
        font: &MonoFont,
        x: i32,
        y: i32,
        text: &str,
        len: usize,
        fg: PixelState,
        bg: PixelState,
    ) {
        let count = text.chars().count();
        debug_assert!(len <= count, "length {} exceeds {:?}", len, text);
        if len > count {
            warn!("Clamping string length {} to {}", len, count);
        }

        for (i, chr) in text.chars().take(len).enumerate() {
            let xpos = x as i64 + i as i64 * font.width as i64;
            let Ok(xpos) = i32::try_from(xpos) else {
                break;
            };
            self.draw_character(font, xpos, y, chr, fg, bg);
        }
    }
}
