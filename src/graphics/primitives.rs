/*
 *  graphics/primitives.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  Primitive rasterizer - dots, lines, rectangles and circles
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

use arrayvec::ArrayVec;

use super::MonoGraphics;
use super::canvas::PixelState;
use crate::display::traits::DisplayTransport;

/// Inclusive (x0, y0, x1, y1) that writes can land in
type Bounds = (i64, i64, i64, i64);

/// Range of steps `first..=last` of a walk from `start` in direction `step`
/// over `count` steps that stays within `lo..=hi`
fn visible_steps(start: i64, step: i64, count: i64, lo: i64, hi: i64) -> Option<(i64, i64)> {
    let (first, last) = if step > 0 {
        ((lo - start).max(0), (hi - start).min(count))
    } else {
        ((start - hi).max(0), (start - lo).min(count))
    };
    (first <= last).then_some((first, last))
}

/// Minor axis offset of Bresenham step `k`: floor((2 * minor * k + bias) / (2 * major))
#[inline]
fn minor_offset(minor: i64, major: i64, k: i64, bias: i64) -> i64 {
    ((2 * minor as i128 * k as i128 + bias as i128) / (2 * major as i128)) as i64
}

/// Smallest value in `lo..hi` where `pred` holds, `hi` when it never does;
/// `pred` must be false then true across the range
fn partition_point(mut lo: i64, mut hi: i64, pred: impl Fn(i64) -> bool) -> i64 {
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// One octant of a midpoint circle
///
/// With `p0 = (5 - 4r) / 4` truncated, the decision variable at step `x` is
/// `x^2 + (y - 1/2)^2 - r^2 + delta` with a constant `delta`, so the `y` the
/// incremental loop reaches at any `x` can be computed directly.
struct MidpointArc {
    radius: i128,
    /// 4 * delta
    offset: i128,
    /// Last step the incremental loop visits
    last_x: i64,
}

impl MidpointArc {
    fn new(radius: u32) -> Self {
        let r = radius as i128;
        let p0 = (5 - 4 * r) / 4;
        let mut arc = Self { radius: r, offset: 4 * p0 - 5 + 4 * r, last_x: 0 };
        if radius > 0 {
            let last_x = partition_point(1, radius as i64, |x| x >= arc.y_at(x));
            arc.last_x = last_x;
        }
        arc
    }

    fn y_at(&self, x: i64) -> i64 {
        if x == 0 {
            return self.radius as i64;
        }
        let x = x as i128;
        let t = 4 * self.radius * self.radius - self.offset - 4 * x * x;
        if t <= 0 {
            return 0;
        }
        // smallest y with (2y + 1)^2 >= t
        let t = t as u128;
        let mut s = t.isqrt();
        if s * s < t {
            s += 1;
        }
        (s / 2) as i64
    }

    /// Step ranges that can write inside `bounds`, sorted and merged
    ///
    /// A step touches columns cx +/- x and cx +/- y and rows cy +/- x and
    /// cy +/- y; the spans all lie on those rows.
    fn relevant_steps(&self, cx: i64, cy: i64, bounds: Bounds) -> ArrayVec<(i64, i64), 6> {
        let (vx0, vy0, vx1, vy1) = bounds;
        let mut ranges: ArrayVec<(i64, i64), 6> = ArrayVec::new();

        // x itself on a visible column or row
        ranges.push((vx0 - cx, vx1 - cx));
        ranges.push((cx - vx1, cx - vx0));
        ranges.push((vy0 - cy, vy1 - cy));
        ranges.push((cy - vy1, cy - vy0));

        // y on a visible row; y never increases with x
        let end = self.last_x + 1;
        for (lo, hi) in [(vy0 - cy, vy1 - cy), (cy - vy1, cy - vy0)] {
            let lo = lo.max(0);
            if hi < lo {
                continue;
            }
            let first = partition_point(0, end, |x| self.y_at(x) <= hi);
            let stop = partition_point(0, end, |x| self.y_at(x) < lo);
            ranges.push((first, stop - 1));
        }

        let mut clamped: ArrayVec<(i64, i64), 6> = ranges
            .into_iter()
            .map(|(first, last)| (first.max(0), last.min(self.last_x)))
            .filter(|(first, last)| first <= last)
            .collect();
        clamped.sort_unstable();

        let mut merged: ArrayVec<(i64, i64), 6> = ArrayVec::new();
        for (first, last) in clamped {
            match merged.last_mut() {
                Some(prev) if first <= prev.1 + 1 => prev.1 = prev.1.max(last),
                _ => merged.push((first, last)),
            }
        }
        merged
    }
}

impl<T: DisplayTransport> MonoGraphics<T> {
    /// Write one pixel, honoring the clip rectangle
    ///
    /// Points outside the clip rectangle or the logical screen are dropped.
    pub fn draw_dot(&mut self, x: i32, y: i32, state: PixelState) {
        if state == PixelState::Transparent || !self.clip.contains(x, y) {
            return;
        }
        let (width, height) = self.canvas.screen_size();
        if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
            return;
        }
        self.canvas.set_pixel(x as u32, y as u32, state);
    }

    /// Points that do not fit an i32 cannot be on screen
    #[inline]
    pub(super) fn plot(&mut self, x: i64, y: i64, state: PixelState) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.draw_dot(x, y, state);
        }
    }

    /// Intersection of the clip rectangle and the logical screen
    fn visible_bounds(&self) -> Option<Bounds> {
        let (width, height) = self.canvas.screen_size();
        let (x0, y0, x1, y1) = self.clip.visible_area(width, height)?;
        Some((x0 as i64, y0 as i64, x1 as i64, y1 as i64))
    }

    /// Draw a line including both endpoints
    ///
    /// Bresenham with integer error accumulation. The endpoints are ordered
    /// first so swapping them yields the same pixels.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, state: PixelState) {
        if state == PixelState::Transparent {
            return;
        }
        let ((x0, y0), (x1, y1)) = if (x1, y1) < (x0, y0) {
            ((x1, y1), (x0, y0))
        } else {
            ((x0, y0), (x1, y1))
        };
        self.draw_line_i64(x0 as i64, y0 as i64, x1 as i64, y1 as i64, state);
    }

    /// Bresenham over the steps that can land in the visible area
    ///
    /// Step `k` along the major axis sits at minor offset
    /// `floor((2 * minor * k + major - 1) / (2 * major))` when x is the major
    /// axis and `floor((2 * minor * k + major) / (2 * major))` when y is, the
    /// same pixels the error accumulating loop produces.
    fn draw_line_i64(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, state: PixelState) {
        let Some((vx0, vy0, vx1, vy1)) = self.visible_bounds() else {
            return;
        };
        if x0.max(x1) < vx0 || x0.min(x1) > vx1 || y0.max(y1) < vy0 || y0.min(y1) > vy1 {
            return;
        }

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };

        if dx >= dy {
            let Some((first, last)) = visible_steps(x0, sx, dx, vx0, vx1) else {
                return;
            };
            for k in first..=last {
                let minor = if dx == 0 { 0 } else { minor_offset(dy, dx, k, dx - 1) };
                self.plot(x0 + sx * k, y0 + sy * minor, state);
            }
        } else {
            let Some((first, last)) = visible_steps(y0, sy, dy, vy0, vy1) else {
                return;
            };
            for k in first..=last {
                let minor = minor_offset(dx, dy, k, dy);
                self.plot(x0 + sx * minor, y0 + sy * k, state);
            }
        }
    }

    /// Horizontal run from x0 to x1 inclusive, trimmed to the visible area;
    /// nothing when x0 > x1
    fn draw_span(&mut self, x0: i64, x1: i64, y: i64, state: PixelState) {
        if state == PixelState::Transparent {
            return;
        }
        let Some((vx0, vy0, vx1, vy1)) = self.visible_bounds() else {
            return;
        };
        if y < vy0 || y > vy1 {
            return;
        }
        for x in x0.max(vx0)..=x1.min(vx1) {
            self.plot(x, y, state);
        }
    }

    /// Draw a rectangle with its upper-left corner at (x0, y0)
    ///
    /// The border is drawn with `fg` as four lines, so with
    /// [`PixelState::Flip`] each corner is toggled twice and ends unchanged.
    /// Unless `bg` is transparent, the interior inside the border is filled
    /// with `bg`. A zero width or height draws nothing.
    pub fn draw_rectangle(
        &mut self,
        x0: i32,
        y0: i32,
        width: u32,
        height: u32,
        fg: PixelState,
        bg: PixelState,
    ) {
        if width == 0 || height == 0 {
            return;
        }
        let x0 = x0 as i64;
        let y0 = y0 as i64;
        let x1 = x0 + width as i64 - 1;
        let y1 = y0 + height as i64 - 1;

        if fg != PixelState::Transparent {
            self.draw_line_i64(x0, y0, x1, y0, fg); // top
            self.draw_line_i64(x0, y1, x1, y1, fg); // bottom
            self.draw_line_i64(x0, y0, x0, y1, fg); // left
            self.draw_line_i64(x1, y0, x1, y1, fg); // right
        }

        if bg != PixelState::Transparent {
            let Some((_, vy0, _, vy1)) = self.visible_bounds() else {
                return;
            };
            for y in (y0 + 1).max(vy0)..y1.min(vy1 + 1) {
                self.draw_span(x0 + 1, x1 - 1, y, bg);
            }
        }
    }

    /// Draw a circle inside the square whose upper-left corner is (x0, y0)
    ///
    /// The radius is `diameter / 2`, so odd diameters draw the same circle
    /// as the even diameter below them.
    pub fn draw_circle(&mut self, x0: i32, y0: i32, diameter: u32, fg: PixelState, fill: PixelState) {
        let radius = diameter / 2;
        let cx = x0.saturating_add_unsigned(radius);
        let cy = y0.saturating_add_unsigned(radius);
        self.draw_centered_circle(cx, cy, radius, fg, fill);
    }

    /// Midpoint circle around (cx, cy)
    ///
    /// The outline is drawn with `fg`. Unless `fill` is transparent, each
    /// row between a mirrored pair of outline points is filled with `fill`.
    /// Steps of the octant walk that cannot reach the visible area are
    /// skipped; the rest run in their usual order.
    pub fn draw_centered_circle(&mut self, cx: i32, cy: i32, radius: u32, fg: PixelState, fill: PixelState) {
        let Some(bounds) = self.visible_bounds() else {
            return;
        };
        let cx = cx as i64;
        let cy = cy as i64;

        let arc = MidpointArc::new(radius);
        for (first, last) in arc.relevant_steps(cx, cy, bounds) {
            for x in first..=last {
                self.circle_points(cx, cy, x, arc.y_at(x), fg, fill);
            }
        }
    }

    /// Mirror one octant point into all eight and fill the rows between them
    fn circle_points(&mut self, cx: i64, cy: i64, x: i64, y: i64, fg: PixelState, fill: PixelState) {
        if x == 0 {
            self.plot(cx, cy + y, fg);
            self.plot(cx, cy - y, fg);
            self.plot(cx + y, cy, fg);
            self.plot(cx - y, cy, fg);
            self.draw_span(cx - y + 1, cx + y - 1, cy, fill);
        } else if x == y {
            self.plot(cx + x, cy + y, fg);
            self.plot(cx - x, cy + y, fg);
            self.draw_span(cx - x + 1, cx + x - 1, cy + y, fill);
            self.plot(cx + x, cy - y, fg);
            self.plot(cx - x, cy - y, fg);
            self.draw_span(cx - x + 1, cx + x - 1, cy - y, fill);
        } else if x < y {
            self.plot(cx + x, cy + y, fg);
            self.plot(cx - x, cy + y, fg);
            self.draw_span(cx - x + 1, cx + x - 1, cy + y, fill);
            self.plot(cx + x, cy - y, fg);
            self.plot(cx - x, cy - y, fg);
            self.draw_span(cx - x + 1, cx + x - 1, cy - y, fill);
            self.plot(cx + y, cy + x, fg);
            self.plot(cx - y, cy + x, fg);
            self.draw_span(cx - y + 1, cx + y - 1, cy + x, fill);
            self.plot(cx + y, cy - x, fg);
            self.plot(cx - y, cy - x, fg);
            self.draw_span(cx - y + 1, cx + y - 1, cy - x, fill);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::mock::MockPort;
    use crate::display::drivers::ssd1306::{Ssd1306, Ssd1306Config};
    use crate::graphics::DisplayRotation;

    fn engine(width: u32, height: u32) -> MonoGraphics<Ssd1306<MockPort>> {
        let config = Ssd1306Config {
            width,
            height,
            ..Default::default()
        };
        let display = Ssd1306::new(MockPort::new(), config).unwrap();
        MonoGraphics::new(display, DisplayRotation::Landscape0).unwrap()
    }

    fn lit(gfx: &MonoGraphics<Ssd1306<MockPort>>) -> Vec<(u32, u32)> {
        let (w, h) = gfx.canvas().screen_size();
        let mut pixels = Vec::new();
        for y in 0..h {
            for x in 0..w {
                if gfx.canvas().get_pixel(x, y) == Some(true) {
                    pixels.push((x, y));
                }
            }
        }
        pixels
    }

    #[test]
    fn test_dot_respects_clip() {
        let mut gfx = engine(64, 64);
        gfx.set_clip_rect(10, 10, 54, 54).unwrap();
        gfx.draw_dot(5, 5, PixelState::Set);
        assert_eq!(gfx.canvas().count_set_pixels(), 0);
        gfx.draw_dot(30, 30, PixelState::Set);
        assert_eq!(gfx.canvas().get_pixel(30, 30), Some(true));
        assert_eq!(gfx.canvas().count_set_pixels(), 1);
    }

    #[test]
    fn test_dot_off_screen_is_dropped() {
        let mut gfx = engine(128, 64);
        gfx.set_clip_rect(-100, -100, 1000, 1000).unwrap();
        gfx.draw_dot(-1, 0, PixelState::Set);
        gfx.draw_dot(128, 0, PixelState::Set);
        gfx.draw_dot(0, 64, PixelState::Set);
        assert_eq!(gfx.canvas().count_set_pixels(), 0);
    }

    #[test]
    fn test_degenerate_line_is_one_dot() {
        let mut gfx = engine(128, 64);
        gfx.draw_line(7, 9, 7, 9, PixelState::Set);
        assert_eq!(lit(&gfx), vec![(7, 9)]);
    }

    #[test]
    fn test_line_counts() {
        let mut gfx = engine(128, 64);
        gfx.draw_line(0, 0, 127, 0, PixelState::Set);
        assert_eq!(gfx.canvas().count_set_pixels(), 128);

        gfx.clear_canvas();
        gfx.draw_line(3, 63, 3, 0, PixelState::Set);
        assert_eq!(gfx.canvas().count_set_pixels(), 64);

        gfx.clear_canvas();
        gfx.draw_line(0, 0, 63, 63, PixelState::Set);
        assert_eq!(gfx.canvas().count_set_pixels(), 64);
        for i in 0..64 {
            assert_eq!(gfx.canvas().get_pixel(i, i), Some(true));
        }
    }

    #[test]
    fn test_line_is_symmetric() {
        let mut forward = engine(64, 64);
        let mut backward = engine(64, 64);
        let ends = [(0, 0), (2, 1), (13, 40), (63, 5), (31, 31), (7, 62), (50, 50)];
        for &(ax, ay) in &ends {
            for &(bx, by) in &ends {
                forward.clear_canvas();
                backward.clear_canvas();
                forward.draw_line(ax, ay, bx, by, PixelState::Set);
                backward.draw_line(bx, by, ax, ay, PixelState::Set);
                assert_eq!(
                    forward.canvas().as_bytes(),
                    backward.canvas().as_bytes(),
                    "({},{})-({},{})",
                    ax,
                    ay,
                    bx,
                    by
                );
            }
        }
    }

    #[test]
    fn test_line_flip_toggles() {
        let mut gfx = engine(128, 64);
        gfx.draw_line(0, 10, 20, 10, PixelState::Flip);
        assert_eq!(gfx.canvas().count_set_pixels(), 21);
        gfx.draw_line(20, 10, 0, 10, PixelState::Flip);
        assert_eq!(gfx.canvas().count_set_pixels(), 0);
    }

    #[test]
    fn test_line_partly_off_screen() {
        let mut gfx = engine(128, 64);
        gfx.draw_line(-1000, -1000, 1000, 1000, PixelState::Set);
        assert_eq!(gfx.canvas().count_set_pixels(), 64);
    }

    #[test]
    fn test_rectangle_outline() {
        let mut gfx = engine(128, 64);
        gfx.draw_rectangle(10, 5, 20, 12, PixelState::Set, PixelState::Transparent);
        assert_eq!(gfx.canvas().count_set_pixels(), 2 * 20 + 2 * 12 - 4);
        assert_eq!(gfx.canvas().get_pixel(10, 5), Some(true));
        assert_eq!(gfx.canvas().get_pixel(29, 16), Some(true));
        assert_eq!(gfx.canvas().get_pixel(11, 6), Some(false));
    }

    #[test]
    fn test_rectangle_fill() {
        let mut gfx = engine(128, 64);
        gfx.draw_rectangle(0, 0, 6, 5, PixelState::Set, PixelState::Set);
        assert_eq!(gfx.canvas().count_set_pixels(), 30);

        gfx.draw_rectangle(0, 0, 6, 5, PixelState::Transparent, PixelState::Clear);
        // interior is 4x3
        assert_eq!(gfx.canvas().count_set_pixels(), 30 - 12);
        assert_eq!(gfx.canvas().get_pixel(1, 1), Some(false));
        assert_eq!(gfx.canvas().get_pixel(0, 1), Some(true));
    }

    #[test]
    fn test_rectangle_flip_corners_unchanged() {
        let mut gfx = engine(128, 64);
        gfx.draw_rectangle(2, 2, 5, 4, PixelState::Flip, PixelState::Transparent);
        for (x, y) in [(2, 2), (6, 2), (2, 5), (6, 5)] {
            assert_eq!(gfx.canvas().get_pixel(x, y), Some(false));
        }
        assert_eq!(gfx.canvas().count_set_pixels(), 2 * 5 + 2 * 4 - 8);
    }

    #[test]
    fn test_rectangle_zero_size() {
        let mut gfx = engine(128, 64);
        gfx.draw_rectangle(5, 5, 0, 10, PixelState::Set, PixelState::Set);
        gfx.draw_rectangle(5, 5, 10, 0, PixelState::Set, PixelState::Set);
        assert_eq!(gfx.canvas().count_set_pixels(), 0);
    }

    #[test]
    fn test_small_filled_circle() {
        let mut gfx = engine(128, 64);
        gfx.draw_centered_circle(10, 10, 2, PixelState::Set, PixelState::Set);
        assert_eq!(gfx.canvas().count_set_pixels(), 13);
    }

    #[test]
    fn test_filled_circle_covers_disk() {
        for radius in [3u32, 5, 8, 13, 20] {
            let mut gfx = engine(128, 64);
            let (cx, cy) = (60i64, 30i64);
            gfx.draw_centered_circle(cx as i32, cy as i32, radius, PixelState::Set, PixelState::Set);
            let r2 = (radius * radius) as i64;
            for y in 0..64i64 {
                for x in 0..128i64 {
                    let d2 = (x - cx).pow(2) + (y - cy).pow(2);
                    let on = gfx.canvas().get_pixel(x as u32, y as u32) == Some(true);
                    if d2 <= r2 {
                        assert!(on, "r={} missing ({},{})", radius, x, y);
                    }
                    if on {
                        assert!(d2 <= r2 + radius as i64, "r={} stray ({},{})", radius, x, y);
                    }
                }
            }
        }
    }

    #[test]
    fn test_circle_outline_only() {
        let mut gfx = engine(128, 64);
        gfx.draw_centered_circle(30, 30, 10, PixelState::Set, PixelState::Transparent);
        assert_eq!(gfx.canvas().get_pixel(30, 30), Some(false));
        assert_eq!(gfx.canvas().get_pixel(40, 30), Some(true));
        assert_eq!(gfx.canvas().get_pixel(30, 20), Some(true));
        assert_eq!(gfx.canvas().get_pixel(20, 30), Some(true));
        assert_eq!(gfx.canvas().get_pixel(30, 40), Some(true));
    }

    #[test]
    fn test_odd_diameter_truncates() {
        let mut even = engine(128, 64);
        let mut odd = engine(128, 64);
        even.draw_circle(4, 4, 16, PixelState::Set, PixelState::Set);
        odd.draw_circle(4, 4, 17, PixelState::Set, PixelState::Set);
        assert_eq!(even.canvas().as_bytes(), odd.canvas().as_bytes());
        // centered at (12, 12)
        assert_eq!(even.canvas().get_pixel(12, 4), Some(true));
        assert_eq!(even.canvas().get_pixel(12, 3), Some(false));
    }

    #[test]
    fn test_zero_radius_circle() {
        let mut gfx = engine(128, 64);
        gfx.draw_centered_circle(5, 5, 0, PixelState::Set, PixelState::Set);
        assert_eq!(lit(&gfx), vec![(5, 5)]);
    }

    #[test]
    fn test_circle_off_screen_is_total() {
        let mut gfx = engine(128, 64);
        gfx.draw_centered_circle(-5, -5, 30, PixelState::Set, PixelState::Set);
        gfx.draw_centered_circle(i32::MAX, i32::MIN, 3, PixelState::Set, PixelState::Flip);
        gfx.draw_circle(i32::MAX - 1, 0, 40, PixelState::Set, PixelState::Set);
        assert!(gfx.canvas().count_set_pixels() > 0);
        assert_eq!(gfx.canvas().get_pixel(0, 0), Some(true));
    }

    #[test]
    fn test_narrow_rectangle_has_no_interior() {
        let mut gfx = engine(128, 64);
        gfx.draw_rectangle(5, 5, 2, 5, PixelState::Transparent, PixelState::Set);
        gfx.draw_rectangle(5, 5, 5, 2, PixelState::Transparent, PixelState::Set);
        gfx.draw_rectangle(20, 20, 1, 1, PixelState::Transparent, PixelState::Set);
        assert_eq!(gfx.canvas().count_set_pixels(), 0);
    }

    #[test]
    fn test_one_pixel_wide_rectangle() {
        let mut gfx = engine(128, 64);
        gfx.draw_rectangle(3, 3, 1, 6, PixelState::Set, PixelState::Set);
        assert_eq!(lit(&gfx), (3..9).map(|y| (3, y)).collect::<Vec<_>>());

        // ends are written three times, the middle twice
        gfx.clear_canvas();
        gfx.draw_rectangle(3, 3, 1, 6, PixelState::Flip, PixelState::Transparent);
        assert_eq!(lit(&gfx), vec![(3, 3), (3, 8)]);
    }

    // error accumulating Bresenham, one step per pixel
    fn stepwise_line(gfx: &mut MonoGraphics<Ssd1306<MockPort>>, x0: i32, y0: i32, x1: i32, y1: i32) {
        let ((mut x0, mut y0), (x1, y1)) = if (x1, y1) < (x0, y0) {
            ((x1 as i64, y1 as i64), (x0 as i64, y0 as i64))
        } else {
            ((x0 as i64, y0 as i64), (x1 as i64, y1 as i64))
        };
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            gfx.plot(x0, y0, PixelState::Set);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    // incremental midpoint walk over every octant step
    fn stepwise_circle(gfx: &mut MonoGraphics<Ssd1306<MockPort>>, cx: i64, cy: i64, r: i64, fill: PixelState) {
        let (mut x, mut y, mut p) = (0i64, r, (5 - r * 4) / 4);
        gfx.circle_points(cx, cy, x, y, PixelState::Set, fill);
        while x < y {
            x += 1;
            if p < 0 {
                p += 2 * x + 1;
            } else {
                y -= 1;
                p += 2 * (x - y) + 1;
            }
            gfx.circle_points(cx, cy, x, y, PixelState::Set, fill);
        }
    }

    #[test]
    fn test_clipped_line_matches_stepwise() {
        let mut fast = engine(64, 64);
        let mut slow = engine(64, 64);
        fast.set_clip_rect(5, 7, 50, 40).unwrap();
        slow.set_clip_rect(5, 7, 50, 40).unwrap();
        let ends = [
            (-80, -3), (0, 0), (12, 90), (63, 63), (140, 20), (33, -70),
            (6, 8), (49, 39), (-5, 45), (70, 70), (25, 25), (100, -100),
        ];
        for &(ax, ay) in &ends {
            for &(bx, by) in &ends {
                fast.clear_canvas();
                slow.clear_canvas();
                fast.draw_line(ax, ay, bx, by, PixelState::Set);
                stepwise_line(&mut slow, ax, ay, bx, by);
                assert_eq!(
                    fast.canvas().as_bytes(),
                    slow.canvas().as_bytes(),
                    "({},{})-({},{})",
                    ax,
                    ay,
                    bx,
                    by
                );
            }
        }
    }

    #[test]
    fn test_clipped_circle_matches_stepwise() {
        let mut fast = engine(64, 64);
        let mut slow = engine(64, 64);
        fast.set_clip_rect(4, 4, 59, 50).unwrap();
        slow.set_clip_rect(4, 4, 59, 50).unwrap();
        let centers = [(-30, 10), (32, 32), (70, -60), (10, 100), (100, 30), (0, 0)];
        for radius in [0u32, 1, 2, 3, 7, 20, 45, 90] {
            for &(cx, cy) in &centers {
                for fill in [PixelState::Transparent, PixelState::Set, PixelState::Flip] {
                    fast.clear_canvas();
                    slow.clear_canvas();
                    fast.draw_centered_circle(cx, cy, radius, PixelState::Set, fill);
                    stepwise_circle(&mut slow, cx as i64, cy as i64, radius as i64, fill);
                    assert_eq!(
                        fast.canvas().as_bytes(),
                        slow.canvas().as_bytes(),
                        "r={} at ({},{}) fill {:?}",
                        radius,
                        cx,
                        cy,
                        fill
                    );
                }
            }
        }
    }

    #[test]
    fn test_huge_shapes_only_touch_the_screen() {
        let mut gfx = engine(128, 64);
        gfx.draw_rectangle(-1_000_000, -1_000_000, 2_000_000, 2_000_000, PixelState::Transparent, PixelState::Set);
        assert_eq!(gfx.canvas().count_set_pixels(), 128 * 64);

        gfx.clear_canvas();
        gfx.draw_rectangle(-1_000_000, -1_000_000, 2_000_000, 2_000_000, PixelState::Set, PixelState::Transparent);
        assert_eq!(gfx.canvas().count_set_pixels(), 0);

        gfx.draw_line(i32::MIN, 5, i32::MAX, 5, PixelState::Flip);
        assert_eq!(gfx.canvas().count_set_pixels(), 128);

        gfx.clear_canvas();
        gfx.draw_line(-1_000_000, -2_000_000, 1_000_000, 2_000_000, PixelState::Set);
        assert_eq!(gfx.canvas().count_set_pixels(), 64);
        assert_eq!(gfx.canvas().get_pixel(0, 0), Some(true));
        assert_eq!(gfx.canvas().get_pixel(32, 63), Some(true));
    }

    #[test]
    fn test_huge_circles_only_touch_the_screen() {
        let mut gfx = engine(128, 64);
        gfx.draw_centered_circle(64, 1_000_032, 1_000_000, PixelState::Set, PixelState::Transparent);
        assert_eq!(gfx.canvas().get_pixel(64, 32), Some(true));
        assert_eq!(gfx.canvas().get_pixel(64, 31), Some(false));

        gfx.clear_canvas();
        gfx.draw_centered_circle(0, 0, u32::MAX, PixelState::Set, PixelState::Set);
        assert_eq!(gfx.canvas().count_set_pixels(), 128 * 64);

        gfx.clear_canvas();
        gfx.draw_circle(i32::MAX - 10, i32::MAX - 10, u32::MAX, PixelState::Set, PixelState::Set);
        assert_eq!(gfx.canvas().count_set_pixels(), 0);
    }
}
