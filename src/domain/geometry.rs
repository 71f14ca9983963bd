// SPDX-License-Identifier: MPL-2.0
//! Plain geometry value types shared by the engine and the display surface.
//!
//! Integer [`Size`] and [`PixelRect`] describe bitmaps; floating [`Point`] and
//! [`Rect`] describe positions that are only rounded when pixels are touched.

#![allow(clippy::cast_precision_loss)]

/// Pixel dimensions of a bitmap or widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }

    #[must_use]
    pub fn shorter_side(self) -> u32 {
        self.width.min(self.height)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Largest size with this aspect ratio that fits inside `bounds`.
    ///
    /// One axis always matches `bounds` exactly; the other is rounded and kept
    /// at least one pixel.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn fit_within(self, bounds: Size) -> Size {
        if self.is_empty() || bounds.is_empty() {
            return Size::new(bounds.width.max(1), bounds.height.max(1));
        }
        let (w, h) = (u64::from(self.width), u64::from(self.height));
        let (bw, bh) = (u64::from(bounds.width), u64::from(bounds.height));
        if w * bh > h * bw {
            let height = (h as f64 * bw as f64 / w as f64).round().max(1.0) as u32;
            Size::new(bounds.width, height.min(bounds.height))
        } else {
            let width = (w as f64 * bh as f64 / h as f64).round().max(1.0) as u32;
            Size::new(width.min(bounds.width), bounds.height)
        }
    }
}

/// A position in widget or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with floating coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanned by two opposite corners, in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Uniformly scales position and size, then shifts by `offset`.
    #[must_use]
    pub fn scaled(&self, ratio: f64, offset: Point) -> Self {
        Self::new(
            self.x * ratio + offset.x,
            self.y * ratio + offset.y,
            self.width * ratio,
            self.height * ratio,
        )
    }

    /// Intersection with the rectangle `(0, 0, size)`.
    #[must_use]
    pub fn clamped_to(&self, size: Size) -> Self {
        let left = self.x.clamp(0.0, f64::from(size.width));
        let top = self.y.clamp(0.0, f64::from(size.height));
        let right = self.right().clamp(0.0, f64::from(size.width));
        let bottom = self.bottom().clamp(0.0, f64::from(size.height));
        Self::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }

    /// Rounds the edges to whole pixels inside a bitmap of `bounds`.
    ///
    /// Returns `None` when nothing of the rectangle survives rounding.
    #[must_use]
    pub fn to_pixel_rect(&self, bounds: Size) -> Option<PixelRect> {
        let round_to = |v: f64, max: u32| -> u32 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let v = v.round().clamp(0.0, f64::from(max)) as u32;
            v
        };
        let left = round_to(self.x, bounds.width);
        let top = round_to(self.y, bounds.height);
        let right = round_to(self.right(), bounds.width);
        let bottom = round_to(self.bottom(), bounds.height);
        if right <= left || bottom <= top {
            return None;
        }
        Some(PixelRect::new(left, top, right - left, bottom - top))
    }
}

/// Rectangle in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn fit_within_matches_width_for_wide_content() {
        let fitted = Size::new(1600, 900).fit_within(Size::new(800, 800));
        assert_eq!(fitted, Size::new(800, 450));
    }

    #[test]
    fn fit_within_matches_height_for_tall_content() {
        let fitted = Size::new(600, 1200).fit_within(Size::new(800, 600));
        assert_eq!(fitted, Size::new(300, 600));
    }

    #[test]
    fn fit_within_upscales_small_content() {
        let fitted = Size::new(16, 9).fit_within(Size::new(320, 400));
        assert_eq!(fitted, Size::new(320, 180));
    }

    #[test]
    fn fit_within_keeps_one_pixel_minimum() {
        let fitted = Size::new(10_000, 1).fit_within(Size::new(100, 100));
        assert_eq!(fitted, Size::new(100, 1));
    }

    #[test]
    fn from_corners_normalizes_order() {
        let rect = Rect::from_corners(Point::new(30.0, 5.0), Point::new(10.0, 25.0));
        assert_eq!(rect, Rect::new(10.0, 5.0, 20.0, 20.0));
    }

    #[test]
    fn scaled_applies_ratio_then_offset() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0).scaled(0.5, Point::new(3.0, 0.0));
        assert_abs_diff_eq!(rect.x, 8.0);
        assert_abs_diff_eq!(rect.y, 10.0);
        assert_abs_diff_eq!(rect.width, 50.0);
        assert_abs_diff_eq!(rect.height, 25.0);
    }

    #[test]
    fn clamped_to_cuts_outside_parts() {
        let rect = Rect::new(-10.0, 90.0, 50.0, 50.0).clamped_to(Size::new(100, 100));
        assert_eq!(rect, Rect::new(0.0, 90.0, 40.0, 10.0));
    }

    #[test]
    fn to_pixel_rect_rounds_edges() {
        let rect = Rect::new(0.4, 0.6, 10.2, 9.8);
        let pixels = rect.to_pixel_rect(Size::new(100, 100)).unwrap();
        assert_eq!(pixels, PixelRect::new(0, 1, 11, 9));
    }

    #[test]
    fn to_pixel_rect_rejects_slivers() {
        let rect = Rect::new(5.0, 5.0, 0.3, 10.0);
        assert!(rect.to_pixel_rect(Size::new(100, 100)).is_none());
    }
}
