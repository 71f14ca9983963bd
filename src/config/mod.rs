// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[desktop]` - Target wallpaper resolution
//! - `[crop]` - Padding background color
//! - `[paths]` - Source, wallpaper and backup folders
//!
//! Besides typed access, every setting is reachable through a dotted string key
//! (`desktop.width`, `paths.backup_dir`, ...) via [`Config::get`] and [`Config::set`].
//!
//! # Examples
//!
//! ```no_run
//! use wallcrop::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.set("desktop.width", "2560").expect("valid width");
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::newtypes::{BackgroundColor, DesktopTarget};
use crate::error::{Error, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Every key accepted by [`Config::get`] and [`Config::set`].
pub const SETTING_KEYS: &[&str] = &[
    "desktop.width",
    "desktop.height",
    "crop.background",
    "paths.source_dir",
    "paths.wallpaper_dir",
    "paths.backup_dir",
];

// =============================================================================
// Section Structs
// =============================================================================

/// Target desktop resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesktopConfig {
    #[serde(default = "default_desktop_width", skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default = "default_desktop_height", skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            width: default_desktop_width(),
            height: default_desktop_height(),
        }
    }
}

/// Crop rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropConfig {
    /// Fill color for the padding around the image, `#rrggbb` or `#rrggbbaa`.
    #[serde(default = "default_background", skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
        }
    }
}

/// Folder locations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PathsConfig {
    /// Folder browsed when no path is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<PathBuf>,

    /// Folder receiving cropped wallpapers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallpaper_dir: Option<PathBuf>,

    /// Folder where untouched originals are preserved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub desktop: DesktopConfig,

    #[serde(default)]
    pub crop: CropConfig,

    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Returns the configured desktop target, falling back to the defaults
    /// when the stored size is missing or degenerate.
    pub fn desktop_target(&self) -> DesktopTarget {
        let width = self.desktop.width.unwrap_or(DEFAULT_DESKTOP_WIDTH);
        let height = self.desktop.height.unwrap_or(DEFAULT_DESKTOP_HEIGHT);
        DesktopTarget::new(width, height).unwrap_or_else(|| {
            log::warn!("Ignoring stored desktop size {}x{}", width, height);
            DesktopTarget::default()
        })
    }

    /// Returns the configured padding background, or black when unparsable.
    pub fn padding_background(&self) -> BackgroundColor {
        match self.crop.background.as_deref() {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid background color {:?}", raw);
                BackgroundColor::default()
            }),
            None => BackgroundColor::default(),
        }
    }

    /// Reads a setting by its dotted key.
    ///
    /// Returns `None` for unknown keys and for settings that are unset.
    pub fn get(&self, key: &str) -> Option<String> {
        let path_string = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string());
        match key {
            "desktop.width" => self.desktop.width.map(|v| v.to_string()),
            "desktop.height" => self.desktop.height.map(|v| v.to_string()),
            "crop.background" => self.crop.background.clone(),
            "paths.source_dir" => path_string(&self.paths.source_dir),
            "paths.wallpaper_dir" => path_string(&self.paths.wallpaper_dir),
            "paths.backup_dir" => path_string(&self.paths.backup_dir),
            _ => None,
        }
    }

    /// Writes a setting by its dotted key.
    ///
    /// Values are validated before they are stored; an empty value clears a path.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        let path_value = || (!value.is_empty()).then(|| PathBuf::from(value));
        match key {
            "desktop.width" => self.desktop.width = Some(parse_dimension(key, value)?),
            "desktop.height" => self.desktop.height = Some(parse_dimension(key, value)?),
            "crop.background" => {
                let color: BackgroundColor = value.parse()?;
                self.crop.background = Some(color.to_string());
            }
            "paths.source_dir" => self.paths.source_dir = path_value(),
            "paths.wallpaper_dir" => self.paths.wallpaper_dir = path_value(),
            "paths.backup_dir" => self.paths.backup_dir = path_value(),
            other => return Err(Error::Config(format!("unknown setting: {}", other))),
        }
        Ok(())
    }
}

fn parse_dimension(key: &str, value: &str) -> Result<u32> {
    match value.parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(Error::Config(format!(
            "{} must be a positive integer, got {:?}",
            key, value
        ))),
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_desktop_width() -> Option<u32> {
    Some(DEFAULT_DESKTOP_WIDTH)
}

fn default_desktop_height() -> Option<u32> {
    Some(DEFAULT_DESKTOP_HEIGHT)
}

fn default_background() -> Option<String> {
    Some(DEFAULT_PADDING_BACKGROUND.to_string())
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("Falling back to default settings: {}", err);
                    return (Config::default(), Some(format!("config-load-error: {}", err)));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    match get_config_path_with_override(base_dir) {
        Some(path) => save_to_path(config, &path),
        None => Err(Error::Config("no config directory available".into())),
    }
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    log::debug!("Saved settings to {}", path.display());
    Ok(())
}
