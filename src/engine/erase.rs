// SPDX-License-Identifier: MPL-2.0
//! Erase tool: rectangles painted over with the padding background.
//!
//! A stroke is collected in widget coordinates while the pointer moves and
//! converted to canvas coordinates on commit. Erasing repaints the canvas but
//! never touches the clip.

use super::CropFrameEngine;
use crate::domain::{Point, Rect};

#[derive(Debug, Clone, Default)]
pub(crate) struct EraseTool {
    committed: Vec<Rect>,
    /// Anchor and current corner of the stroke in progress, widget coordinates
    pending: Option<(Point, Point)>,
}

impl EraseTool {
    pub fn committed(&self) -> &[Rect] {
        &self.committed
    }

    pub fn pending(&self) -> Option<Rect> {
        self.pending.map(|(a, b)| Rect::from_corners(a, b))
    }

    pub fn begin(&mut self, pos: Point) {
        self.pending = Some((pos, pos));
    }

    pub fn update(&mut self, pos: Point) {
        if let Some((_, corner)) = &mut self.pending {
            *corner = pos;
        }
    }

    pub fn take_pending(&mut self) -> Option<Rect> {
        self.pending.take().map(|(a, b)| Rect::from_corners(a, b))
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn push(&mut self, rect: Rect) {
        self.committed.push(rect);
    }

    pub fn clear(&mut self) {
        self.committed.clear();
        self.pending = None;
    }
}

impl CropFrameEngine {
    /// Starts an erase stroke at widget position `pos`.
    ///
    /// Ignored while a preview is shown or before anything was displayed.
    pub fn begin_erase(&mut self, pos: Point) {
        let Some(loaded) = self.loaded_mut() else {
            return;
        };
        if loaded.preview.is_none() && loaded.display.is_some() {
            loaded.erase.begin(pos);
        }
    }

    pub fn update_erase(&mut self, pos: Point) {
        if let Some(loaded) = self.loaded_mut() {
            loaded.erase.update(pos);
        }
    }

    /// Commits the pending stroke and repaints the canvas.
    ///
    /// Returns the committed rectangle in canvas coordinates, or `None` when
    /// there was no stroke or it lies entirely outside the canvas.
    pub fn commit_erase(&mut self) -> Option<Rect> {
        let background = self.background;
        let loaded = self.loaded_mut()?;
        let stroke = loaded.erase.take_pending()?;
        let scale = loaded.display?;

        let rect = scale.to_canvas(stroke).clamped_to(loaded.canvas.size());
        if rect.is_empty() {
            log::debug!("Erase stroke {:?} misses the canvas", stroke);
            return None;
        }
        loaded.erase.push(rect);
        loaded
            .canvas
            .repaint(&loaded.original, background, loaded.erase.committed());
        log::debug!("Erased {:?}", rect);
        Some(rect)
    }

    pub fn cancel_erase(&mut self) {
        if let Some(loaded) = self.loaded_mut() {
            loaded.erase.cancel();
        }
    }

    /// The stroke in progress, in widget coordinates.
    #[must_use]
    pub fn pending_erase_rect(&self) -> Option<Rect> {
        self.loaded().and_then(|l| l.erase.pending())
    }

    #[must_use]
    pub fn is_erasing(&self) -> bool {
        self.pending_erase_rect().is_some()
    }
}
