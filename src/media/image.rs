// SPDX-License-Identifier: MPL-2.0
//! Image loading and saving.

use crate::error::{ImageError, Result};
use crate::media::extensions::CROP_EXTENSION;
use image_rs::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use std::path::{Path, PathBuf};

/// Decodes the image at `path`.
///
/// The format is guessed from the file content, so a mislabeled extension still
/// loads. Zero-sized results are rejected with [`ImageError::Empty`].
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    if image.width() == 0 || image.height() == 0 {
        return Err(ImageError::Empty.into());
    }
    log::info!(
        "Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Writes `image` to `path`, choosing the format from the extension.
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    image.save(path)?;
    log::info!("Saved {}", path.display());
    Ok(())
}

/// Writes a cropped wallpaper as PNG, whatever extension `path` carries.
///
/// Returns the path actually written (with the extension replaced).
pub fn save_crop(crop: &RgbaImage, path: &Path) -> Result<PathBuf> {
    let target = path.with_extension(CROP_EXTENSION);
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    crop.save_with_format(&target, ImageFormat::Png)?;
    log::info!(
        "Wrote wallpaper {} ({}x{})",
        target.display(),
        crop.width(),
        crop.height()
    );
    Ok(target)
}
