// SPDX-License-Identifier: MPL-2.0
//! Cropping newtypes.
//!
//! This module provides type-safe wrappers for user-supplied cropping values,
//! ensuring they are always valid once constructed.

use crate::config::defaults::{DEFAULT_DESKTOP_HEIGHT, DEFAULT_DESKTOP_WIDTH};
use crate::domain::geometry::Size;
use crate::error::Error;
use image_rs::Rgba;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// DesktopTarget
// =============================================================================

/// Desktop resolution the wallpaper is cropped for.
///
/// Both sides are guaranteed to be positive, so the aspect ratio is always
/// finite and non-zero.
///
/// # Example
///
/// ```
/// use wallcrop::domain::DesktopTarget;
///
/// let target = DesktopTarget::new(1920, 1080).unwrap();
/// assert!(!target.is_portrait());
/// assert!(DesktopTarget::new(0, 1080).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopTarget {
    width: u32,
    height: u32,
}

impl DesktopTarget {
    /// Creates a target, rejecting zero-sized sides.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    #[must_use]
    pub fn width(self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Portrait desktops drive zoom by width, all others by height.
    #[must_use]
    pub fn is_portrait(self) -> bool {
        self.width < self.height
    }
}

impl Default for DesktopTarget {
    fn default() -> Self {
        Self {
            width: DEFAULT_DESKTOP_WIDTH,
            height: DEFAULT_DESKTOP_HEIGHT,
        }
    }
}

impl fmt::Display for DesktopTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for DesktopTarget {
    type Err = Error;

    /// Parses `WIDTHxHEIGHT`, e.g. `2560x1440`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::Config(format!("invalid desktop size {:?}, expected WxH", s));
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = w.trim().parse().map_err(|_| invalid())?;
        let height = h.trim().parse().map_err(|_| invalid())?;
        Self::new(width, height).ok_or_else(invalid)
    }
}

// =============================================================================
// BackgroundColor
// =============================================================================

/// Fill color for the padding around the original image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundColor(Rgba<u8>);

impl BackgroundColor {
    #[must_use]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self(Rgba([r, g, b, 255]))
    }

    #[must_use]
    pub fn rgba(self) -> Rgba<u8> {
        self.0
    }
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

impl From<Rgba<u8>> for BackgroundColor {
    fn from(color: Rgba<u8>) -> Self {
        Self(color)
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0 .0;
        if a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }
}

impl FromStr for BackgroundColor {
    type Err = Error;

    /// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::Config(format!("invalid color {:?}, expected #rrggbb", s));
        let hex = s.trim().trim_start_matches('#');
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self(Rgba([channel(0)?, channel(2)?, channel(4)?, alpha])))
    }
}
