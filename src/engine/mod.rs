// SPDX-License-Identifier: MPL-2.0
//! Crop-frame engine.
//!
//! Owns the original image, the padded canvas and the clip rectangle, and
//! keeps them consistent across desktop changes, drags, padding changes and
//! erase strokes. All coordinates outside this module are widget pixels; all
//! coordinates inside are canvas pixels unless a name says otherwise.
//!
//! # Lifecycle
//!
//! ```text
//! set_image ──► reset ──► display_image ──► frame_rect_for_display
//!                 ▲             │
//! set_desktop_target      drag / wheel / erase ──► clip or canvas update
//! ```
//!
//! The engine is synchronous and never touches storage.

mod canvas;
mod display;
mod erase;
mod frame;


pub use canvas::{
    centered_offset, default_clip, full_clip, padded_size, PaddedCanvas, MAX_CANVAS_PIXELS,
};
pub use display::DisplayScale;
pub use frame::{clamp_axis, wheel_steps};

use crate::config::defaults::PADDING_STEPS_PER_SIDE;
use crate::domain::{BackgroundColor, DesktopTarget, Point, Rect, Size};
use crate::error::{EngineError, ImageError};
use erase::EraseTool;
use image_rs::{imageops, DynamicImage, RgbaImage};

/// Image shown instead of the padded canvas.
#[derive(Debug, Clone)]
pub enum PreviewOverride {
    /// Snapshot of the current crop
    Crop(RgbaImage),
    /// An external image, typically the preserved original, for comparison
    Original(RgbaImage),
}

impl PreviewOverride {
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        match self {
            PreviewOverride::Crop(image) | PreviewOverride::Original(image) => image,
        }
    }
}

/// Everything that exists only while an image is loaded.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    original: RgbaImage,
    canvas: PaddedCanvas,
    clip: Rect,
    erase: EraseTool,
    drag_anchor: Option<Point>,
    display: Option<DisplayScale>,
    preview: Option<PreviewOverride>,
}

impl LoadedImage {
    #[must_use]
    pub fn original(&self) -> &RgbaImage {
        &self.original
    }

    #[must_use]
    pub fn canvas(&self) -> &PaddedCanvas {
        &self.canvas
    }

    #[must_use]
    pub fn clip(&self) -> Rect {
        self.clip
    }

    #[must_use]
    pub fn preview(&self) -> Option<&PreviewOverride> {
        self.preview.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub enum EngineState {
    #[default]
    NoImage,
    Loaded(Box<LoadedImage>),
}

#[derive(Debug, Clone, Default)]
pub struct CropFrameEngine {
    desktop: DesktopTarget,
    background: BackgroundColor,
    state: EngineState,
}

impl CropFrameEngine {
    #[must_use]
    pub fn new(desktop: DesktopTarget, background: BackgroundColor) -> Self {
        Self {
            desktop,
            background,
            state: EngineState::NoImage,
        }
    }

    // =========================================================================
    // State
    // =========================================================================

    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        matches!(self.state, EngineState::Loaded(_))
    }

    #[must_use]
    pub fn desktop_target(&self) -> DesktopTarget {
        self.desktop
    }

    #[must_use]
    pub fn padding_background(&self) -> BackgroundColor {
        self.background
    }

    #[must_use]
    pub fn original_size(&self) -> Option<Size> {
        self.loaded()
            .map(|l| Size::new(l.original.width(), l.original.height()))
    }

    #[must_use]
    pub fn canvas_size(&self) -> Option<Size> {
        self.loaded().map(|l| l.canvas.size())
    }

    /// The rendered padded canvas at full resolution.
    #[must_use]
    pub fn padded_canvas(&self) -> Option<&RgbaImage> {
        self.loaded().map(|l| l.canvas.pixels())
    }

    /// Current clip in canvas coordinates.
    #[must_use]
    pub fn clip_rect(&self) -> Option<Rect> {
        self.loaded().map(|l| l.clip)
    }

    /// Committed erase rectangles in canvas coordinates.
    #[must_use]
    pub fn erase_rects(&self) -> &[Rect] {
        self.loaded().map_or(&[], |l| l.erase.committed())
    }

    #[must_use]
    pub fn preview_override(&self) -> Option<&PreviewOverride> {
        self.loaded().and_then(|l| l.preview.as_ref())
    }

    #[must_use]
    pub fn is_previewing(&self) -> bool {
        self.preview_override().is_some()
    }

    /// Canvas distance covered by one keyboard or padding step.
    #[must_use]
    pub fn step_size(&self) -> Option<f64> {
        self.canvas_size()
            .map(|size| (f64::from(size.shorter_side()) / PADDING_STEPS_PER_SIDE).max(1.0))
    }

    pub(crate) fn loaded(&self) -> Option<&LoadedImage> {
        match &self.state {
            EngineState::Loaded(loaded) => Some(loaded),
            EngineState::NoImage => None,
        }
    }

    pub(crate) fn loaded_mut(&mut self) -> Option<&mut LoadedImage> {
        match &mut self.state {
            EngineState::Loaded(loaded) => Some(&mut **loaded),
            EngineState::NoImage => None,
        }
    }

    // =========================================================================
    // Loading and reset
    // =========================================================================

    /// Replaces the original image, dropping any preview and erase state.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Empty`] for an image without pixels and
    /// [`ImageError::TooLarge`] when its padded canvas would exceed
    /// [`MAX_CANVAS_PIXELS`]; the previous image stays loaded.
    pub fn set_image(&mut self, image: DynamicImage) -> Result<(), ImageError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ImageError::Empty);
        }
        let original = image.into_rgba8();
        let canvas = PaddedCanvas::render(&original, self.desktop, self.background, &[])
            .ok_or(ImageError::TooLarge)?;
        let clip = default_clip(canvas.size(), self.desktop);
        self.state = EngineState::Loaded(Box::new(LoadedImage {
            original,
            canvas,
            clip,
            erase: EraseTool::default(),
            drag_anchor: None,
            display: None,
            preview: None,
        }));
        Ok(())
    }

    /// Drops the image and returns to the empty state.
    pub fn clear(&mut self) {
        self.state = EngineState::NoImage;
    }

    /// Changes the desktop resolution and resets the canvas and clip.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DegenerateTarget`] when either side is zero, or
    /// when the loaded image padded to that aspect would exceed
    /// [`MAX_CANVAS_PIXELS`]; the previous target is kept.
    pub fn set_desktop_target(&mut self, width: u32, height: u32) -> Result<(), EngineError> {
        let desktop = DesktopTarget::new(width, height).ok_or(EngineError::DegenerateTarget)?;
        if let Some(size) = self.original_size() {
            padded_size(size, desktop).ok_or(EngineError::DegenerateTarget)?;
        }
        if desktop != self.desktop {
            log::debug!("Desktop target changed from {} to {}", self.desktop, desktop);
        }
        self.desktop = desktop;
        self.reset();
        Ok(())
    }

    /// Rebuilds the canvas for the current desktop and restores the default clip.
    ///
    /// Committed erase rectangles survive a reset only while the canvas keeps
    /// its size; otherwise their coordinates no longer mean anything.
    pub fn reset(&mut self) {
        let (desktop, background) = (self.desktop, self.background);
        let Some(loaded) = self.loaded_mut() else {
            return;
        };
        let image_size = Size::new(loaded.original.width(), loaded.original.height());
        let Some(size) = padded_size(image_size, desktop) else {
            log::warn!("Canvas for desktop {} is too large, keeping the previous one", desktop);
            return;
        };
        if size != loaded.canvas.size() {
            loaded.erase.clear();
        }
        if let Some(canvas) = PaddedCanvas::render(
            &loaded.original,
            desktop,
            background,
            loaded.erase.committed(),
        ) {
            loaded.canvas = canvas;
        }
        loaded.clip = default_clip(loaded.canvas.size(), desktop);
        loaded.drag_anchor = None;
        loaded.display = None;
        loaded.erase.cancel();
    }

    /// Changes the padding color and repaints the canvas. The clip is kept.
    pub fn set_padding_background(&mut self, background: BackgroundColor) {
        self.background = background;
        if let Some(loaded) = self.loaded_mut() {
            loaded
                .canvas
                .repaint(&loaded.original, background, loaded.erase.committed());
        }
    }

    // =========================================================================
    // Preview overrides
    // =========================================================================

    /// Shows the current crop instead of the canvas, or goes back to the canvas.
    ///
    /// Returns whether the crop preview is now active.
    pub fn toggle_preview(&mut self) -> bool {
        let Some(loaded) = self.loaded_mut() else {
            return false;
        };
        if matches!(loaded.preview, Some(PreviewOverride::Crop(_))) {
            loaded.preview = None;
            return false;
        }
        let crop = crop_canvas(&loaded.canvas, loaded.clip);
        loaded.preview = Some(PreviewOverride::Crop(crop));
        loaded.drag_anchor = None;
        loaded.erase.cancel();
        true
    }

    /// Shows `original` for comparison, or goes back to the canvas when a
    /// comparison is already shown.
    ///
    /// Returns whether the comparison is now active.
    pub fn toggle_original(&mut self, original: RgbaImage) -> bool {
        let Some(loaded) = self.loaded_mut() else {
            return false;
        };
        if matches!(loaded.preview, Some(PreviewOverride::Original(_))) {
            loaded.preview = None;
            return false;
        }
        loaded.preview = Some(PreviewOverride::Original(original));
        loaded.drag_anchor = None;
        loaded.erase.cancel();
        true
    }

    /// Goes back to the canvas, whichever preview is shown.
    pub fn clear_preview(&mut self) {
        if let Some(loaded) = self.loaded_mut() {
            loaded.preview = None;
        }
    }

    // =========================================================================
    // Extraction
    // =========================================================================

    /// The part of the full-resolution canvas under the clip.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoImage`] when nothing is loaded.
    pub fn extract_crop(&self) -> Result<RgbaImage, EngineError> {
        let loaded = self.loaded().ok_or(EngineError::NoImage)?;
        Ok(crop_canvas(&loaded.canvas, loaded.clip))
    }
}

fn crop_canvas(canvas: &PaddedCanvas, clip: Rect) -> RgbaImage {
    let area = clip.to_pixel_rect(canvas.size()).unwrap_or_else(|| {
        log::warn!("Clip {:?} rounds to nothing, cropping the whole canvas", clip);
        let size = canvas.size();
        crate::domain::PixelRect::new(0, 0, size.width, size.height)
    });
    imageops::crop_imm(canvas.pixels(), area.x, area.y, area.width, area.height).to_image()
}
