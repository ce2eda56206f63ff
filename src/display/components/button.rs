/*
 *  display/components/button.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  Button LED - a boxed label that lights up when on
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

use arrayvec::ArrayString;

use crate::display::error::DisplayError;
use crate::display::traits::DisplayTransport;
use crate::graphics::{MonoFont, MonoGraphics, PixelState};

/// Longest label a button holds (stack allocated)
pub const MAX_LABEL_LEN: usize = 16;

/// Bordered box with a centered label
///
/// When on, the border and label are lit; when off, the whole box is dark.
/// The interior is always cleared.
#[derive(Debug, Clone)]
pub struct ButtonLed<'f> {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    label: ArrayString<MAX_LABEL_LEN>,
    font: &'f MonoFont<'f>,
    is_on: bool,
}

impl<'f> ButtonLed<'f> {
    /// Create a button; every label character must be in `font`
    pub fn new(
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        label: &str,
        font: &'f MonoFont<'f>,
        is_on: bool,
    ) -> Result<Self, DisplayError> {
        let label = ArrayString::from(label).map_err(|_| {
            DisplayError::InvalidConfiguration(format!(
                "button label '{}' longer than {} bytes",
                label, MAX_LABEL_LEN
            ))
        })?;
        if let Some(missing) = label.chars().find(|&c| !font.contains(c)) {
            return Err(DisplayError::InvalidConfiguration(format!(
                "button label character {:?} not in font",
                missing
            )));
        }
        Ok(Self { x, y, width, height, label, font, is_on })
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Left edge of the label
    fn label_x(&self) -> i32 {
        let text_width = self.font.text_width(self.label.chars().count()) as i32;
        self.x + (self.width / 2) as i32 - text_width / 2
    }

    /// Switch on or off and redraw
    pub fn set_state<T: DisplayTransport>(&mut self, gfx: &mut MonoGraphics<T>, is_on: bool) {
        self.is_on = is_on;
        self.render(gfx);
    }

    pub fn render<T: DisplayTransport>(&self, gfx: &mut MonoGraphics<T>) {
        let fg = if self.is_on { PixelState::Set } else { PixelState::Clear };
        let bg = PixelState::Clear;
        gfx.draw_rectangle(self.x, self.y, self.width, self.height, fg, bg);
        gfx.draw_string(
            self.font,
            self.label_x(),
            self.y + 2,
            &self.label,
            self.label.chars().count(),
            fg,
            bg,
        );
    }
}
