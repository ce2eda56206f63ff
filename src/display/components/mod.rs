/*
 *  display/components/mod.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  UI components drawn through the graphics engine
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

pub mod button;
pub mod channel_text;

// Re-exports
pub use button::ButtonLed;
pub use channel_text::ChannelText;
