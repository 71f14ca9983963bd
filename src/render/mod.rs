// SPDX-License-Identifier: MPL-2.0
//! Raster drawing helpers.

pub mod painter;

pub use painter::Painter;
