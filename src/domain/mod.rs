// SPDX-License-Identifier: MPL-2.0
//! Domain value types.
//!
//! Pure types with no I/O: geometry primitives and validated newtypes for the
//! values a user can configure.

pub mod geometry;
pub mod newtypes;

pub use geometry::{PixelRect, Point, Rect, Size};
pub use newtypes::{BackgroundColor, DesktopTarget};
