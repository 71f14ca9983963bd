// SPDX-License-Identifier: MPL-2.0
//! Headless display surface.
//!
//! Stands in for the window widget: composes the engine's scaled bitmap and
//! frame outline into a widget-sized buffer, and routes toolkit-independent
//! pointer events to engine operations. All geometry comes from the engine.

use crate::domain::{Point, Size};
use crate::engine::CropFrameEngine;
use crate::error::EngineError;
use crate::render::Painter;
use image_rs::{Rgba, RgbaImage};

/// Color of the clip outline.
pub const FRAME_COLOR: Rgba<u8> = Rgba([255, 255, 0, 255]);

/// Color of the outline of an erase stroke in progress.
pub const ERASE_STROKE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Fill behind the scaled bitmap.
pub const SURFACE_BACKGROUND: Rgba<u8> = Rgba([32, 32, 32, 255]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Drags the frame
    Left,
    /// Draws erase rectangles
    Right,
}

/// Pointer input in widget coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed { position: Point, button: MouseButton },
    Moved { position: Point },
    Released { button: MouseButton },
    /// Scroll in notches; positive values add padding
    Wheel { ticks: f64 },
    /// The pointer left the widget
    Left,
}

#[derive(Debug, Clone)]
pub struct DisplaySurface {
    size: Size,
}

impl DisplaySurface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
        }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = Size::new(width, height);
    }

    /// Renders one frame of the widget.
    pub fn render(&self, engine: &mut CropFrameEngine) -> RgbaImage {
        let mut target = RgbaImage::new(self.size.width.max(1), self.size.height.max(1));
        let displayed = engine.display_image(self.size.width, self.size.height);

        let mut painter = Painter::begin(&mut target);
        painter.fill(SURFACE_BACKGROUND);
        let Some((bitmap, scaled)) = displayed else {
            return target;
        };
        let x = (i64::from(self.size.width) - i64::from(scaled.width)) / 2;
        let y = (i64::from(self.size.height) - i64::from(scaled.height)) / 2;
        painter.blit(&bitmap, x, y);

        if let Some(frame) = engine.frame_rect_for_display() {
            painter.stroke_rect(frame, FRAME_COLOR);
        }
        if let Some(stroke) = engine.pending_erase_rect() {
            painter.stroke_rect(stroke, ERASE_STROKE_COLOR);
        }
        target
    }

    /// Forwards a pointer event to the engine.
    pub fn handle_pointer(&self, engine: &mut CropFrameEngine, event: PointerEvent) {
        match event {
            PointerEvent::Pressed {
                position,
                button: MouseButton::Left,
            } => engine.begin_drag(position),
            PointerEvent::Pressed {
                position,
                button: MouseButton::Right,
            } => engine.begin_erase(position),
            PointerEvent::Moved { position } => {
                if engine.is_dragging() {
                    engine.drag_to(position);
                } else if engine.is_erasing() {
                    engine.update_erase(position);
                }
            }
            PointerEvent::Released {
                button: MouseButton::Left,
            } => engine.end_drag(),
            PointerEvent::Released {
                button: MouseButton::Right,
            } => {
                engine.commit_erase();
            }
            PointerEvent::Wheel { ticks } => match engine.wheel(ticks) {
                Ok(()) | Err(EngineError::NoImage) => {}
                Err(err) => log::debug!("Wheel ignored: {}", err),
            },
            PointerEvent::Left => {
                engine.end_drag();
                engine.cancel_erase();
            }
        }
    }
}

impl Default for DisplaySurface {
    fn default() -> Self {
        use crate::config::defaults::{DEFAULT_VIEW_HEIGHT, DEFAULT_VIEW_WIDTH};
        Self::new(DEFAULT_VIEW_WIDTH, DEFAULT_VIEW_HEIGHT)
    }
}
