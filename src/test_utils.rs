// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and synthetic images.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use image_rs::{Rgba, RgbaImage};

/// Tolerance for aspect-ratio comparisons that may be off by one rounded pixel.
pub fn one_pixel_aspect_tolerance(width: f64, height: f64) -> f64 {
    (width + 1.0) / (height - 1.0).max(1.0) - width / height
}

/// Creates an image filled with a single color.
pub fn solid_image(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}
