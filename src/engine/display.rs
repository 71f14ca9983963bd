// SPDX-License-Identifier: MPL-2.0
//! Mapping between canvas pixels and widget pixels.

use super::CropFrameEngine;
use crate::domain::{Point, Rect, Size};
use image_rs::{imageops, RgbaImage};

/// Uniform scale plus centering offset from canvas space to widget space.
///
/// Recomputed on every display request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayScale {
    pub ratio: f64,
    pub offset: Point,
    pub scaled: Size,
    pub widget: Size,
}

impl DisplayScale {
    /// Scale for `content` shown as a `scaled` bitmap centered in `widget`.
    #[must_use]
    pub fn new(content: Size, scaled: Size, widget: Size) -> Self {
        let ratio = f64::from(scaled.width) / f64::from(content.width.max(1));
        let offset = Point::new(
            (f64::from(widget.width) - f64::from(scaled.width)) / 2.0,
            (f64::from(widget.height) - f64::from(scaled.height)) / 2.0,
        );
        Self {
            ratio,
            offset,
            scaled,
            widget,
        }
    }

    /// Scale for `content` fitted into `widget` with its aspect preserved.
    #[must_use]
    pub fn fit(content: Size, widget: Size) -> Self {
        Self::new(content, content.fit_within(widget), widget)
    }

    #[must_use]
    pub fn to_widget(&self, rect: Rect) -> Rect {
        rect.scaled(self.ratio, self.offset)
    }

    #[must_use]
    pub fn to_canvas(&self, rect: Rect) -> Rect {
        Rect::new(
            (rect.x - self.offset.x) / self.ratio,
            (rect.y - self.offset.y) / self.ratio,
            rect.width / self.ratio,
            rect.height / self.ratio,
        )
    }

    #[must_use]
    pub fn to_canvas_delta(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.ratio, dy / self.ratio)
    }
}

/// Resizes `source` to fit `widget`.
///
/// Returns the source unchanged in size when it already matches.
#[must_use]
pub fn scale_to_fit(source: &RgbaImage, widget: Size) -> RgbaImage {
    let size = Size::new(source.width(), source.height()).fit_within(widget);
    if size == Size::new(source.width(), source.height()) {
        return source.clone();
    }
    imageops::resize(source, size.width, size.height, imageops::FilterType::Triangle)
}

impl CropFrameEngine {
    /// Scales the canvas, or the active preview, to fit a widget.
    ///
    /// Returns the bitmap and its size. Showing the canvas records the
    /// [`DisplayScale`] used by later pointer and frame queries.
    pub fn display_image(&mut self, widget_width: u32, widget_height: u32) -> Option<(RgbaImage, Size)> {
        let widget = Size::new(widget_width, widget_height);
        let loaded = self.loaded_mut()?;
        if let Some(preview) = &loaded.preview {
            let bitmap = scale_to_fit(preview.image(), widget);
            let size = Size::new(bitmap.width(), bitmap.height());
            return Some((bitmap, size));
        }

        let bitmap = scale_to_fit(loaded.canvas.pixels(), widget);
        let size = Size::new(bitmap.width(), bitmap.height());
        let scale = DisplayScale::new(loaded.canvas.size(), size, widget);
        if loaded.display != Some(scale) {
            log::debug!(
                "Display scale {:.4} at offset ({:.1}, {:.1}) for widget {}x{}",
                scale.ratio,
                scale.offset.x,
                scale.offset.y,
                widget.width,
                widget.height
            );
        }
        loaded.display = Some(scale);
        Some((bitmap, size))
    }

    /// Clip rectangle in widget coordinates for a canvas shown as `scaled`
    /// inside `widget`.
    #[must_use]
    pub fn frame_rect(&self, scaled: Size, widget: Size) -> Option<Rect> {
        let loaded = self.loaded()?;
        if loaded.preview.is_some() {
            return None;
        }
        Some(DisplayScale::new(loaded.canvas.size(), scaled, widget).to_widget(loaded.clip))
    }

    /// Clip rectangle in widget coordinates for the last displayed canvas.
    ///
    /// `None` while a preview is shown or before the first display request.
    #[must_use]
    pub fn frame_rect_for_display(&self) -> Option<Rect> {
        let loaded = self.loaded()?;
        if loaded.preview.is_some() {
            return None;
        }
        loaded.display.map(|scale| scale.to_widget(loaded.clip))
    }

    #[must_use]
    pub fn display_scale(&self) -> Option<DisplayScale> {
        self.loaded().and_then(|l| l.display)
    }

    /// Converts a widget position to canvas coordinates.
    #[must_use]
    pub fn widget_to_canvas(&self, pos: Point) -> Option<Point> {
        let scale = self.display_scale()?;
        Some(Point::new(
            (pos.x - scale.offset.x) / scale.ratio,
            (pos.y - scale.offset.y) / scale.ratio,
        ))
    }
}
