// SPDX-License-Identifier: MPL-2.0
//! `wallcrop` crops images into desktop wallpapers.
//!
//! The image is padded to the desktop aspect ratio, a frame of that aspect is
//! positioned over it by dragging and scrolling, and the framed part is written
//! as a PNG while the original file is preserved.
//!
//! The geometry lives in [`engine`]; [`surface`] and [`session`] wire it to
//! pointer input and to the filesystem.

#![doc(html_root_url = "https://docs.rs/wallcrop/0.1.0")]

pub mod command;
pub mod config;
pub mod directory_scanner;
pub mod domain;
pub mod engine;
pub mod error;
pub mod media;
pub mod paths;
pub mod render;
pub mod session;
pub mod surface;

#[cfg(test)]
pub(crate) mod test_utils;
