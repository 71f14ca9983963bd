// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Image(ImageError),
    Engine(EngineError),
}

/// Specific error types for image loading and saving.
/// Used to provide the user-facing prompt shown when a load fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// The file could not be decoded as an image (unknown format, corrupt data)
    NotAnImage(String),

    /// The decoder produced an image with zero width or height
    Empty,

    /// Padding the image to the desktop aspect needs an oversized canvas
    TooLarge,

    /// Encoding the output file failed
    Encode(String),
}

impl ImageError {
    /// Returns the short hint printed when an image cannot be opened.
    pub fn prompt(&self) -> &'static str {
        match self {
            ImageError::NotAnImage(_) => "Not an image, pass another file or folder",
            ImageError::Empty => "The image is empty, pass another file or folder",
            ImageError::TooLarge => {
                "The image is too large for this desktop size, try another --desktop"
            }
            ImageError::Encode(_) => "The wallpaper could not be written",
        }
    }
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::NotAnImage(msg) => write!(f, "Not an image: {}", msg),
            ImageError::Empty => write!(f, "Image has no pixels"),
            ImageError::TooLarge => write!(f, "Padded canvas would be too large"),
            ImageError::Encode(msg) => write!(f, "Encoding failed: {}", msg),
        }
    }
}

/// Rejections reported by the crop engine.
///
/// None of these change engine state; interactive callers are free to ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The operation needs a loaded image
    NoImage,

    /// Desktop width or height was zero
    DegenerateTarget,

    /// The clip would shrink below one pixel
    PaddingLimitReached,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NoImage => write!(f, "No image loaded"),
            EngineError::DegenerateTarget => {
                write!(f, "Desktop size must be positive and fit the image")
            }
            EngineError::PaddingLimitReached => write!(f, "Padding limit reached"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Engine(e) => write!(f, "Engine Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ImageError> for Error {
    fn from(err: ImageError) -> Self {
        Error::Image(err)
    }
}

impl From<EngineError> for Error {
    fn from(err: EngineError) -> Self {
        Error::Engine(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        match err {
            image_rs::ImageError::IoError(io) => Error::Io(io.to_string()),
            image_rs::ImageError::Encoding(e) => Error::Image(ImageError::Encode(e.to_string())),
            other => Error::Image(ImageError::NotAnImage(other.to_string())),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
