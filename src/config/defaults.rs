// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Desktop**: Target wallpaper resolution
//! - **Padding**: Zoom step granularity and background color
//! - **View**: Headless widget size used when no window exists

// ==========================================================================
// Desktop Defaults
// ==========================================================================

/// Default desktop width in pixels when no setting is stored.
pub const DEFAULT_DESKTOP_WIDTH: u32 = 1920;

/// Default desktop height in pixels when no setting is stored.
pub const DEFAULT_DESKTOP_HEIGHT: u32 = 1080;

// ==========================================================================
// Padding Defaults
// ==========================================================================

/// Number of wheel ticks needed to traverse the shorter canvas side.
pub const PADDING_STEPS_PER_SIDE: f64 = 50.0;

/// Smallest clip side, in canvas pixels.
pub const MIN_CLIP_SIDE: f64 = 1.0;

/// Default padding background, as `#rrggbb`.
pub const DEFAULT_PADDING_BACKGROUND: &str = "#000000";

// ==========================================================================
// View Defaults
// ==========================================================================

/// Default widget width for headless previews.
pub const DEFAULT_VIEW_WIDTH: u32 = 800;

/// Default widget height for headless previews.
pub const DEFAULT_VIEW_HEIGHT: u32 = 600;

/// Suffix appended to the file stem when no wallpaper folder is configured.
pub const WALLPAPER_SUFFIX: &str = "-wallpaper";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_DESKTOP_WIDTH > 0);
    assert!(DEFAULT_DESKTOP_HEIGHT > 0);
    assert!(PADDING_STEPS_PER_SIDE >= 1.0);
    assert!(MIN_CLIP_SIDE > 0.0);
    assert!(DEFAULT_VIEW_WIDTH > 0);
    assert!(DEFAULT_VIEW_HEIGHT > 0);
};
