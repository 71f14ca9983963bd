// SPDX-License-Identifier: MPL-2.0
//! Clip movement and padding.
//!
//! The clip always keeps the desktop aspect ratio and stays inside the canvas.
//! Moves are clamped per axis against two ranges, the canvas itself and a
//! range relative to where the original image sits, and the tighter bound
//! wins at each edge.

use super::{full_clip, CropFrameEngine};
use crate::config::defaults::{MIN_CLIP_SIDE, PADDING_STEPS_PER_SIDE};
use crate::domain::{DesktopTarget, Point, Rect, Size};
use crate::error::EngineError;

/// Growth smaller than this counts as none.
const GROWTH_EPSILON: f64 = 1e-6;

/// Clamps a clip position along one axis.
///
/// * `position`, `clip_len`: the clip's start and length on this axis
/// * `canvas_len`: canvas length on this axis
/// * `image_offset`, `image_len`: where the original image sits on this axis
#[must_use]
pub fn clamp_axis(
    position: f64,
    clip_len: f64,
    canvas_len: f64,
    image_offset: f64,
    image_len: f64,
) -> f64 {
    let canvas_max = (canvas_len - clip_len).max(0.0);

    let pad_before = image_offset;
    let pad_after = canvas_len - image_len - image_offset;
    let excess = (clip_len - image_len).max(0.0);
    let image_min = image_offset - pad_before - excess;
    let image_max = image_offset + image_len - clip_len + pad_after + excess;

    let low = image_min.max(0.0);
    let high = image_max.min(canvas_max).max(low);
    position.clamp(low, high)
}

/// Converts scroll ticks into padding steps.
///
/// One tick is a fiftieth of the canvas's shorter side. Any non-zero scroll
/// moves at least one step.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn wheel_steps(ticks: f64, canvas: Size) -> i32 {
    if ticks == 0.0 || !ticks.is_finite() {
        return 0;
    }
    let steps = (ticks * f64::from(canvas.shorter_side()) / PADDING_STEPS_PER_SIDE).round();
    if steps == 0.0 {
        ticks.signum() as i32
    } else {
        steps.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    }
}

/// Clamps `clip`'s origin on both axes, leaving its size alone.
fn clamp_origin(clip: Rect, canvas: Size, image: Rect) -> Rect {
    Rect::new(
        clamp_axis(
            clip.x,
            clip.width,
            f64::from(canvas.width),
            image.x,
            image.width,
        ),
        clamp_axis(
            clip.y,
            clip.height,
            f64::from(canvas.height),
            image.y,
            image.height,
        ),
        clip.width,
        clip.height,
    )
}

/// Clip resized by `steps` pixels along the driving axis around its center.
fn padded_clip(clip: Rect, steps: i32, canvas: Size, desktop: DesktopTarget) -> Option<Rect> {
    let aspect = desktop.aspect();
    let steps = f64::from(steps);
    let (mut width, mut height) = if desktop.is_portrait() {
        let width = clip.width + steps;
        (width, width / aspect)
    } else {
        let height = clip.height + steps;
        (height * aspect, height)
    };
    if width < MIN_CLIP_SIDE || height < MIN_CLIP_SIDE {
        return None;
    }

    let (canvas_w, canvas_h) = (f64::from(canvas.width), f64::from(canvas.height));
    if width > canvas_w {
        width = canvas_w;
        height = width / aspect;
    }
    if height > canvas_h {
        height = canvas_h;
        width = height * aspect;
    }

    let center = clip.center();
    Some(Rect::new(
        center.x - width / 2.0,
        center.y - height / 2.0,
        width,
        height,
    ))
}

impl CropFrameEngine {
    /// Translates the clip by `(dx, dy)` canvas pixels, clamped.
    pub fn move_frame(&mut self, dx: f64, dy: f64) {
        let Some(loaded) = self.loaded_mut() else {
            return;
        };
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let moved = loaded.clip.translated(dx, dy);
        loaded.clip = clamp_origin(moved, loaded.canvas.size(), loaded.canvas.image_rect());
    }

    /// Grows (positive) or shrinks (negative) the clip by `steps` pixels.
    ///
    /// # Errors
    ///
    /// * [`EngineError::NoImage`] when nothing is loaded
    /// * [`EngineError::PaddingLimitReached`] when a side would drop below one
    ///   pixel, or the clip already fills the canvas and cannot grow
    pub fn add_padding(&mut self, steps: i32) -> Result<(), EngineError> {
        let desktop = self.desktop;
        let loaded = self.loaded_mut().ok_or(EngineError::NoImage)?;
        if steps == 0 {
            return Ok(());
        }
        let canvas = loaded.canvas.size();
        let resized =
            padded_clip(loaded.clip, steps, canvas, desktop).ok_or(EngineError::PaddingLimitReached)?;
        if steps > 0 && resized.width - loaded.clip.width < GROWTH_EPSILON {
            return Err(EngineError::PaddingLimitReached);
        }
        loaded.clip = clamp_origin(resized, canvas, loaded.canvas.image_rect());
        log::debug!(
            "Clip resized by {} step(s) to {:.1}x{:.1}",
            steps,
            loaded.clip.width,
            loaded.clip.height
        );
        Ok(())
    }

    /// Applies a scroll gesture of `ticks` notches as padding.
    ///
    /// Ignored while a preview is shown.
    ///
    /// # Errors
    ///
    /// Same as [`CropFrameEngine::add_padding`].
    pub fn wheel(&mut self, ticks: f64) -> Result<(), EngineError> {
        let canvas = self.canvas_size().ok_or(EngineError::NoImage)?;
        if self.is_previewing() {
            return Ok(());
        }
        self.add_padding(wheel_steps(ticks, canvas))
    }

    /// Expands the clip to the whole canvas.
    pub fn select_all(&mut self) {
        let desktop = self.desktop;
        if let Some(loaded) = self.loaded_mut() {
            loaded.clip = full_clip(loaded.canvas.size(), desktop);
        }
    }

    // =========================================================================
    // Pointer drag
    // =========================================================================

    /// Latches a drag at widget position `pos`.
    ///
    /// Ignored while a preview is shown or before anything was displayed.
    pub fn begin_drag(&mut self, pos: Point) {
        let Some(loaded) = self.loaded_mut() else {
            return;
        };
        if loaded.preview.is_none() && loaded.display.is_some() {
            loaded.drag_anchor = Some(pos);
        }
    }

    /// Moves the clip by the widget distance since the last drag position.
    pub fn drag_to(&mut self, pos: Point) {
        let Some(loaded) = self.loaded_mut() else {
            return;
        };
        let (Some(anchor), Some(scale)) = (loaded.drag_anchor, loaded.display) else {
            return;
        };
        loaded.drag_anchor = Some(pos);
        let (dx, dy) = scale.to_canvas_delta(pos.x - anchor.x, pos.y - anchor.y);
        self.move_frame(dx, dy);
    }

    pub fn end_drag(&mut self) {
        if let Some(loaded) = self.loaded_mut() {
            loaded.drag_anchor = None;
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.loaded().is_some_and(|l| l.drag_anchor.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn clamp_axis_keeps_clip_inside_canvas() {
        // Canvas 1067 wide, image 800 wide at offset 133, clip 500 wide
        assert_abs_diff_eq!(clamp_axis(-40.0, 500.0, 1067.0, 133.0, 800.0), 0.0);
        assert_abs_diff_eq!(clamp_axis(900.0, 500.0, 1067.0, 133.0, 800.0), 567.0);
        assert_abs_diff_eq!(clamp_axis(250.0, 500.0, 1067.0, 133.0, 800.0), 250.0);
    }

    #[test]
    fn clamp_axis_pins_clip_as_large_as_canvas() {
        assert_abs_diff_eq!(clamp_axis(12.0, 600.0, 600.0, 0.0, 600.0), 0.0);
    }

    #[test]
    fn clamp_axis_never_inverts_range_for_oversized_clip() {
        // Clip longer than the canvas still resolves to the canvas origin
        assert_abs_diff_eq!(clamp_axis(5.0, 700.0, 600.0, 0.0, 600.0), 0.0);
    }

    #[test]
    fn wheel_steps_scale_with_shorter_side() {
        let canvas = Size::new(1920, 1000);
        assert_eq!(wheel_steps(1.0, canvas), 20);
        assert_eq!(wheel_steps(-2.0, canvas), -40);
        assert_eq!(wheel_steps(0.0, canvas), 0);
    }

    #[test]
    fn wheel_steps_move_at_least_one_step() {
        let canvas = Size::new(40, 30);
        assert_eq!(wheel_steps(0.1, canvas), 1);
        assert_eq!(wheel_steps(-0.1, canvas), -1);
    }

    #[test]
    fn padded_clip_grows_landscape_by_height() {
        let desktop = DesktopTarget::new(16, 9).unwrap();
        let clip = Rect::new(100.0, 100.0, 160.0, 90.0);
        let grown = padded_clip(clip, 18, Size::new(1600, 900), desktop).unwrap();
        assert_abs_diff_eq!(grown.height, 108.0);
        assert_abs_diff_eq!(grown.width, 192.0);
        assert_abs_diff_eq!(grown.center().x, clip.center().x);
        assert_abs_diff_eq!(grown.center().y, clip.center().y);
    }

    #[test]
    fn padded_clip_grows_portrait_by_width() {
        let desktop = DesktopTarget::new(9, 16).unwrap();
        let clip = Rect::new(0.0, 0.0, 90.0, 160.0);
        let grown = padded_clip(clip, 9, Size::new(900, 1600), desktop).unwrap();
        assert_abs_diff_eq!(grown.width, 99.0);
        assert_abs_diff_eq!(grown.height, 176.0);
    }

    #[test]
    fn padded_clip_rejects_sub_pixel_sides() {
        let desktop = DesktopTarget::new(16, 9).unwrap();
        let clip = Rect::new(0.0, 0.0, 16.0, 9.0);
        assert!(padded_clip(clip, -9, Size::new(160, 90), desktop).is_none());
        assert!(padded_clip(clip, -8, Size::new(160, 90), desktop).is_some());
    }

    #[test]
    fn padded_clip_is_limited_by_canvas() {
        let desktop = DesktopTarget::new(16, 9).unwrap();
        let clip = Rect::new(0.0, 0.0, 160.0, 90.0);
        let grown = padded_clip(clip, 1000, Size::new(320, 180), desktop).unwrap();
        assert_abs_diff_eq!(grown.width, 320.0);
        assert_abs_diff_eq!(grown.height, 180.0);
    }
}
