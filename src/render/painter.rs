// SPDX-License-Identifier: MPL-2.0
//! Scoped drawing onto an RGBA buffer.
//!
//! A [`Painter`] mutably borrows its target for the length of one drawing
//! block. The borrow ends on every exit path, including early returns and `?`,
//! so no explicit begin/end pairing is needed:
//!
//! ```
//! use wallcrop::render::Painter;
//! use wallcrop::domain::Rect;
//! use image_rs::{Rgba, RgbaImage};
//!
//! let mut target = RgbaImage::new(8, 8);
//! {
//!     let mut painter = Painter::begin(&mut target);
//!     painter.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba([255, 0, 0, 255]));
//! }
//! assert_eq!(target.get_pixel(1, 1), &Rgba([255, 0, 0, 255]));
//! ```
//!
//! Shapes are rasterized by `tiny-skia` without anti-aliasing and written with
//! [`BlendMode::Source`], so drawn pixels take the exact color given.

use crate::domain::{PixelRect, Rect, Size};
use image_rs::{imageops, GenericImageView, Rgba, RgbaImage};
use tiny_skia::{
    BlendMode, Color, ColorU8, IntSize, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

/// Runs `f` on a premultiplied copy of `img` and writes the result back.
///
/// `RgbaImage` holds straight alpha while `Pixmap` holds premultiplied alpha.
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let Some(size) = IntSize::from_wh(img.width(), img.height()) else {
        return;
    };
    let mut data = Vec::with_capacity(img.as_raw().len());
    for pixel in img.pixels() {
        let [r, g, b, a] = pixel.0;
        let premultiplied = ColorU8::from_rgba(r, g, b, a).premultiply();
        data.extend_from_slice(&[
            premultiplied.red(),
            premultiplied.green(),
            premultiplied.blue(),
            premultiplied.alpha(),
        ]);
    }
    let Some(mut pixmap) = Pixmap::from_vec(data, size) else {
        return;
    };

    f(&mut pixmap);

    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
}

fn solid_paint(color: Rgba<u8>) -> Paint<'static> {
    let [r, g, b, a] = color.0;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = false;
    paint.blend_mode = BlendMode::Source;
    paint
}

fn skia_rect(area: PixelRect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(
        area.x as f32,
        area.y as f32,
        area.width as f32,
        area.height as f32,
    )
}

pub struct Painter<'a> {
    target: &'a mut RgbaImage,
}

impl<'a> Painter<'a> {
    pub fn begin(target: &'a mut RgbaImage) -> Self {
        Self { target }
    }

    pub fn size(&self) -> Size {
        Size::new(self.target.width(), self.target.height())
    }

    /// Fills the whole target.
    pub fn fill(&mut self, color: Rgba<u8>) {
        let [r, g, b, a] = color.0;
        with_pixmap(self.target, |pixmap| pixmap.fill(Color::from_rgba8(r, g, b, a)));
    }

    /// Fills `rect`, rounded to whole pixels and clipped to the target.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        self.fill_rects(std::slice::from_ref(&rect), color);
    }

    /// Fills every rectangle in `rects` in a single pass over the target.
    pub fn fill_rects(&mut self, rects: &[Rect], color: Rgba<u8>) {
        let size = self.size();
        let areas: Vec<tiny_skia::Rect> = rects
            .iter()
            .filter_map(|rect| rect.to_pixel_rect(size))
            .filter_map(skia_rect)
            .collect();
        if areas.is_empty() {
            return;
        }
        let paint = solid_paint(color);
        with_pixmap(self.target, |pixmap| {
            for area in areas {
                pixmap.fill_rect(area, &paint, Transform::identity(), None);
            }
        });
    }

    /// Copies `source` with its top-left corner at `(x, y)`.
    ///
    /// Pixels are replaced, not blended, so transparent sources stay transparent.
    pub fn blit<I>(&mut self, source: &I, x: i64, y: i64)
    where
        I: GenericImageView<Pixel = Rgba<u8>>,
    {
        imageops::replace(&mut *self.target, source, x, y);
    }

    /// Draws a one pixel outline just inside `rect`.
    pub fn stroke_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        let Some(area) = rect.to_pixel_rect(self.size()) else {
            return;
        };
        // The outline of a one pixel wide or tall area is the area itself.
        if area.width < 2 || area.height < 2 {
            if let Some(filled) = skia_rect(area) {
                let paint = solid_paint(color);
                with_pixmap(self.target, |pixmap| {
                    pixmap.fill_rect(filled, &paint, Transform::identity(), None);
                });
            }
            return;
        }
        // Centered on the outermost pixel row and column.
        let Some(outline) = tiny_skia::Rect::from_ltrb(
            area.x as f32 + 0.5,
            area.y as f32 + 0.5,
            (area.x + area.width) as f32 - 0.5,
            (area.y + area.height) as f32 - 0.5,
        ) else {
            return;
        };
        let path = PathBuilder::from_rect(outline);
        let paint = solid_paint(color);
        let stroke = Stroke {
            width: 1.0,
            ..Stroke::default()
        };
        with_pixmap(self.target, |pixmap| {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        });
    }
}
