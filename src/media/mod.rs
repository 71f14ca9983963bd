// SPDX-License-Identifier: MPL-2.0
//! Image file handling: which files count as images, and how they are
//! decoded and written.
//!
//! Decoding and encoding are delegated entirely to the `image` crate.

pub mod image;

use std::path::Path;

pub use image::{load_image, save_crop, save_image};

/// Supported image extensions
pub mod extensions {
    /// Image file extensions that can be opened for cropping
    pub const IMAGE_EXTENSIONS: &[&str] = &[
        "jpg", "jpeg", "png", "gif", "tiff", "tif", "webp", "bmp", "ico",
    ];

    /// Extension every cropped wallpaper is written with
    pub const CROP_EXTENSION: &str = "png";
}

pub use extensions::IMAGE_EXTENSIONS;

/// Checks if a file has a supported image extension (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
