// SPDX-License-Identifier: MPL-2.0
//! Padded canvas: the original image letterboxed or pillarboxed to the
//! desktop aspect ratio.
//!
//! Both the on-screen preview and the saved crop are taken from this buffer,
//! so background padding and erased areas become part of the wallpaper.

#![allow(clippy::cast_precision_loss)]

use crate::domain::{BackgroundColor, DesktopTarget, Rect, Size};
use crate::render::Painter;
use image_rs::RgbaImage;

/// Largest canvas the engine allocates, in pixels.
pub const MAX_CANVAS_PIXELS: u64 = 16_384 * 16_384;

/// Size of the smallest canvas with the desktop aspect ratio that contains
/// an image of `image` size.
///
/// Only one axis grows. The grown side is rounded up, so the canvas is never
/// a fraction of a pixel too small for the image. Returns `None` when the
/// canvas would exceed [`MAX_CANVAS_PIXELS`].
#[must_use]
pub fn padded_size(image: Size, desktop: DesktopTarget) -> Option<Size> {
    let (iw, ih) = (u64::from(image.width), u64::from(image.height));
    let (dw, dh) = (u64::from(desktop.width()), u64::from(desktop.height()));

    let (width, height) = if iw * dh > ih * dw {
        // Image is relatively wider: grow height
        (iw, (iw * dh).div_ceil(dw))
    } else {
        ((ih * dw).div_ceil(dh), ih)
    };
    if width.checked_mul(height)? > MAX_CANVAS_PIXELS {
        return None;
    }
    Some(Size::new(u32::try_from(width).ok()?, u32::try_from(height).ok()?))
}

/// Top-left corner of an `image` centered in `canvas`, floored at zero.
#[must_use]
pub fn centered_offset(canvas: Size, image: Size) -> (u32, u32) {
    (
        canvas.width.saturating_sub(image.width) / 2,
        canvas.height.saturating_sub(image.height) / 2,
    )
}

/// Clip shown right after a reset.
///
/// The desktop resolution itself when it fits inside the canvas, otherwise the
/// desktop aspect scaled down to fit; centered either way.
#[must_use]
pub fn default_clip(canvas: Size, desktop: DesktopTarget) -> Rect {
    centered_clip(canvas, desktop, 1.0)
}

/// Largest clip with the exact desktop aspect ratio that fits the canvas.
///
/// The canvas itself is rounded to whole pixels, so this can be a fraction of
/// a pixel narrower or shorter than the canvas.
#[must_use]
pub fn full_clip(canvas: Size, desktop: DesktopTarget) -> Rect {
    centered_clip(canvas, desktop, f64::INFINITY)
}

fn centered_clip(canvas: Size, desktop: DesktopTarget, max_scale: f64) -> Rect {
    let (cw, ch) = (f64::from(canvas.width), f64::from(canvas.height));
    let (dw, dh) = (f64::from(desktop.width()), f64::from(desktop.height()));
    let scale = (cw / dw).min(ch / dh).min(max_scale);
    let (w, h) = (dw * scale, dh * scale);
    Rect::new(((cw - w) / 2.0).max(0.0), ((ch - h) / 2.0).max(0.0), w, h)
}

/// The rendered padded canvas.
#[derive(Debug, Clone)]
pub struct PaddedCanvas {
    pixels: RgbaImage,
    image_offset: (u32, u32),
    image_size: Size,
}

impl PaddedCanvas {
    /// Builds and paints a canvas for `original`.
    ///
    /// Returns `None` when the padded canvas would be too large to allocate.
    pub fn render(
        original: &RgbaImage,
        desktop: DesktopTarget,
        background: BackgroundColor,
        erased: &[Rect],
    ) -> Option<Self> {
        let image_size = Size::new(original.width(), original.height());
        let size = padded_size(image_size, desktop)?;
        let mut canvas = Self {
            pixels: RgbaImage::new(size.width, size.height),
            image_offset: centered_offset(size, image_size),
            image_size,
        };
        canvas.repaint(original, background, erased);
        log::debug!(
            "Padded {}x{} image to {}x{} for desktop {}",
            image_size.width,
            image_size.height,
            size.width,
            size.height,
            desktop
        );
        Some(canvas)
    }

    /// Repaints in place: background, then the original, then erased areas.
    pub fn repaint(&mut self, original: &RgbaImage, background: BackgroundColor, erased: &[Rect]) {
        let color = background.rgba();
        let (x, y) = self.image_offset;
        let mut painter = Painter::begin(&mut self.pixels);
        painter.fill(color);
        painter.blit(original, i64::from(x), i64::from(y));
        painter.fill_rects(erased, color);
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.pixels.width(), self.pixels.height())
    }

    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    #[must_use]
    pub fn image_offset(&self) -> (u32, u32) {
        self.image_offset
    }

    /// Where the original image sits inside the canvas.
    #[must_use]
    pub fn image_rect(&self) -> Rect {
        Rect::new(
            f64::from(self.image_offset.0),
            f64::from(self.image_offset.1),
            f64::from(self.image_size.width),
            f64::from(self.image_size.height),
        )
    }
}
