/*
 *  graphics/clip.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  Clip region - the rectangle drawing operations may write into
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

/// Inclusive rectangle in logical (rotated) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    x_upper_left: i32,
    y_upper_left: i32,
    x_lower_right: i32,
    y_lower_right: i32,
}

impl ClipRect {
    /// Create a clip rectangle from its upper-left and lower-right corners
    ///
    /// Corners are inclusive. Reversed corners are rejected.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Result<Self, DisplayError> {
        if x0 > x1 || y0 > y1 {
            return Err(DisplayError::InvalidClipRect { x0, y0, x1, y1 });
        }
        Ok(Self {
            x_upper_left: x0,
            y_upper_left: y0,
            x_lower_right: x1,
            y_lower_right: y1,
        })
    }

    /// The whole logical screen
    pub fn full_screen(width: u32, height: u32) -> Self {
        Self {
            x_upper_left: 0,
            y_upper_left: 0,
            x_lower_right: width as i32 - 1,
            y_lower_right: height as i32 - 1,
        }
    }

    pub fn upper_left(&self) -> (i32, i32) {
        (self.x_upper_left, self.y_upper_left)
    }

    pub fn lower_right(&self) -> (i32, i32) {
        (self.x_lower_right, self.y_lower_right)
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x_upper_left
            && x <= self.x_lower_right
            && y >= self.y_upper_left
            && y <= self.y_lower_right
    }

    /// The part of the rectangle on a `width` x `height` screen as inclusive
    /// (x0, y0, x1, y1), or `None` when nothing of it is visible
    pub fn visible_area(&self, width: u32, height: u32) -> Option<(i32, i32, i32, i32)> {
        if width == 0 || height == 0 {
            return None;
        }
        let x0 = self.x_upper_left.max(0);
        let y0 = self.y_upper_left.max(0);
        let x1 = (self.x_lower_right as i64).min(width as i64 - 1) as i32;
        let y1 = (self.y_lower_right as i64).min(height as i64 - 1) as i32;

        if x0 > x1 || y0 > y1 {
            None
        } else {
            Some((x0, y0, x1, y1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let clip = ClipRect::new(10, 10, 54, 54).unwrap();
        assert!(clip.contains(10, 10));
        assert!(clip.contains(54, 54));
        assert!(clip.contains(30, 30));
        assert!(!clip.contains(9, 30));
        assert!(!clip.contains(30, 55));
        assert!(!clip.contains(5, 5));
    }

    #[test]
    fn test_reversed_corners_rejected() {
        assert!(matches!(
            ClipRect::new(20, 0, 10, 5),
            Err(DisplayError::InvalidClipRect { x0: 20, y0: 0, x1: 10, y1: 5 })
        ));
        assert!(ClipRect::new(0, 9, 5, 8).is_err());
        // a single pixel is a valid rectangle
        assert!(ClipRect::new(4, 4, 4, 4).is_ok());
    }

    #[test]
    fn test_full_screen() {
        let clip = ClipRect::full_screen(64, 128);
        assert_eq!(clip.upper_left(), (0, 0));
        assert_eq!(clip.lower_right(), (63, 127));
        assert!(!clip.contains(-1, 0));
        assert!(!clip.contains(64, 0));
    }

    #[test]
    fn test_visible_area() {
        let clip = ClipRect::new(-100, 10, 1000, 54).unwrap();
        assert_eq!(clip.visible_area(128, 64), Some((0, 10, 127, 54)));

        let clip = ClipRect::new(10, 10, 54, 54).unwrap();
        assert_eq!(clip.visible_area(64, 64), Some((10, 10, 54, 54)));

        let clip = ClipRect::new(i32::MIN, i32::MIN, -1, 5).unwrap();
        assert_eq!(clip.visible_area(128, 64), None);

        let clip = ClipRect::new(200, 0, 300, 10).unwrap();
        assert_eq!(clip.visible_area(128, 64), None);
    }
}
