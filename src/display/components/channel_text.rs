/*
 *  display/components/channel_text.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  Channel strip text - two 7 character lines per mixer channel
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

//! Mackie Control style scribble strip. The controller's LCD is two lines
//! of 56 characters, 7 per channel. A sysex text update carries the start
//! offset in its first byte followed by the characters.

use log::warn;

use crate::display::traits::DisplayTransport;
use crate::graphics::{MonoFont, MonoGraphics, PixelState};

pub const CHARS_PER_LINE: usize = 7;
pub const LINES: usize = 2;

/// Offset of the second line in the controller's text memory
const SECOND_LINE_OFFSET: usize = 56;

fn printable(byte: u8) -> u8 {
    if byte.is_ascii_graphic() || byte == b' ' { byte } else { b' ' }
}

#[derive(Debug, Clone)]
pub struct ChannelText<'f> {
    x: i32,
    y: i32,
    channel: u8,
    font: &'f MonoFont<'f>,
    text: [[u8; CHARS_PER_LINE]; LINES],
}

impl<'f> ChannelText<'f> {
    /// Blank strip for `channel` (0-7) with its upper-left corner at (x, y)
    pub fn new(x: i32, y: i32, channel: u8, font: &'f MonoFont<'f>) -> Self {
        Self {
            x,
            y,
            channel,
            font,
            text: [[b' '; CHARS_PER_LINE]; LINES],
        }
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Current text of a line
    pub fn line(&self, line: usize) -> &str {
        self.text
            .get(line)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .unwrap_or("")
    }

    /// Replace the characters of `line` from `offset` on
    ///
    /// Position `i` takes character `i` of `text`; positions past the end of
    /// `text` keep their old characters. `line` must be 0 or 1 and `offset`
    /// below 7; release builds ignore other values.
    pub fn set_text<T: DisplayTransport>(
        &mut self,
        gfx: &mut MonoGraphics<T>,
        line: usize,
        offset: usize,
        text: &str,
    ) {
        debug_assert!(line < LINES, "line {} out of range", line);
        debug_assert!(offset < CHARS_PER_LINE, "offset {} out of range", offset);
        let Some(dest) = self.text.get_mut(line) else {
            warn!("Ignoring text for line {}", line);
            return;
        };
        for (slot, &byte) in dest.iter_mut().zip(text.as_bytes()).skip(offset) {
            *slot = printable(byte);
        }
        self.render(gfx);
    }

    /// Apply a text update from a controller sysex message
    ///
    /// `message[0]` is the offset into the 112 character text memory and
    /// `message[1..=num_chars]` the characters. Only lines whose field starts
    /// at or after the offset are updated.
    pub fn set_text_from_sysex<T: DisplayTransport>(
        &mut self,
        gfx: &mut MonoGraphics<T>,
        message: &[u8],
        num_chars: usize,
    ) {
        debug_assert!(num_chars >= 1, "empty text update");
        let Some(&offset) = message.first() else {
            return;
        };
        let offset = offset as usize;
        let mut line_offset = self.channel as usize * CHARS_PER_LINE;

        for line in self.text.iter_mut() {
            if line_offset >= offset {
                let first = 1 + line_offset - offset;
                let chars = message
                    .iter()
                    .enumerate()
                    .skip(first)
                    .take_while(|&(idx, _)| idx <= num_chars)
                    .map(|(_, &byte)| byte);
                for (slot, byte) in line.iter_mut().zip(chars) {
                    *slot = printable(byte);
                }
            }
            line_offset += SECOND_LINE_OFFSET;
        }
        self.render(gfx);
    }

    pub fn render<T: DisplayTransport>(&self, gfx: &mut MonoGraphics<T>) {
        let advance = self.font.width() as i32;
        for (row, line) in self.text.iter().enumerate() {
            let y = self.y + row as i32 * self.font.height() as i32;
            for (col, &byte) in line.iter().enumerate() {
                let chr = byte as char;
                if self.font.contains(chr) {
                    gfx.draw_character(
                        self.font,
                        self.x + col as i32 * advance,
                        y,
                        chr,
                        PixelState::Set,
                        PixelState::Clear,
                    );
                }
            }
        }
    }
}
