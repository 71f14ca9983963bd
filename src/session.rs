// SPDX-License-Identifier: MPL-2.0
//! Cropping session: the engine plus the files around it.
//!
//! A session knows which file is loaded, which folder is being browsed and
//! where wallpapers and backups go. It is the only place that touches storage;
//! the engine itself stays pure.

use crate::command::Command;
use crate::config::defaults::WALLPAPER_SUFFIX;
use crate::config::Config;
use crate::directory_scanner::{Direction, ImageList};
use crate::domain::BackgroundColor;
use crate::engine::{CropFrameEngine, PreviewOverride};
use crate::error::{EngineError, Error, Result};
use crate::media::{self, extensions::CROP_EXTENSION};
use std::fs;
use std::path::{Path, PathBuf};

/// Files written by [`Session::save_wallpaper`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedWallpaper {
    pub wallpaper: PathBuf,
    /// Backup copy of the original, when one was made by this save
    pub backup: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    config: Config,
    engine: CropFrameEngine,
    images: ImageList,
    current: Option<PathBuf>,
}

impl Session {
    /// Creates an empty session using the desktop size and padding color from
    /// `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let engine = CropFrameEngine::new(config.desktop_target(), config.padding_background());
        Self {
            config,
            engine,
            images: ImageList::new(),
            current: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn engine(&self) -> &CropFrameEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut CropFrameEngine {
        &mut self.engine
    }

    #[must_use]
    pub fn images(&self) -> &ImageList {
        &self.images
    }

    /// Path of the loaded image.
    #[must_use]
    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Changes the desktop size for the engine and the stored settings.
    pub fn set_desktop_target(&mut self, width: u32, height: u32) -> Result<()> {
        self.engine.set_desktop_target(width, height)?;
        self.config.desktop.width = Some(width);
        self.config.desktop.height = Some(height);
        Ok(())
    }

    pub fn set_padding_background(&mut self, background: BackgroundColor) {
        self.engine.set_padding_background(background);
        self.config.crop.background = Some(background.to_string());
    }

    // =========================================================================
    // Opening and browsing
    // =========================================================================

    /// Opens an image file, or the first loadable image of a directory.
    ///
    /// # Errors
    ///
    /// Opening a file that cannot be decoded fails and keeps the previous
    /// image. A directory without any loadable image leaves the session empty.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        if path.is_dir() {
            self.images = ImageList::scan_directory_direct(path)?;
            let candidates: Vec<PathBuf> = (0..self.images.len())
                .filter_map(|i| self.images.get(i).map(Path::to_path_buf))
                .collect();
            if !self.load_first(candidates) {
                log::warn!("No loadable image in {}", path.display());
            }
            return Ok(());
        }

        self.load(path)?;
        self.images = ImageList::scan_directory(path).unwrap_or_else(|err| {
            log::warn!("Cannot browse next to {}: {}", path.display(), err);
            ImageList::new()
        });
        Ok(())
    }

    /// Steps to the next loadable image, wrapping around.
    ///
    /// Returns `false` when nothing could be loaded. The session is empty
    /// afterwards unless there was nothing to browse, in which case the current
    /// image stays.
    pub fn next(&mut self) -> bool {
        self.step(Direction::Next)
    }

    /// Steps to the previous loadable image, wrapping around.
    pub fn previous(&mut self) -> bool {
        self.step(Direction::Previous)
    }

    fn step(&mut self, direction: Direction) -> bool {
        let candidates: Vec<PathBuf> = self
            .images
            .candidates(direction)
            .map(Path::to_path_buf)
            .collect();
        if candidates.is_empty() {
            log::debug!("Nothing to browse");
            return false;
        }
        self.load_first(candidates)
    }

    fn load_first(&mut self, candidates: Vec<PathBuf>) -> bool {
        for candidate in candidates {
            match self.load(&candidate) {
                Ok(()) => return true,
                Err(err) => log::warn!("Skipping {}: {}", candidate.display(), err),
            }
        }
        self.engine.clear();
        self.current = None;
        false
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        let image = media::load_image(path)?;
        self.engine.set_image(image)?;
        self.images.set_current(path);
        self.current = Some(path.to_path_buf());
        Ok(())
    }

    // =========================================================================
    // Saving
    // =========================================================================

    /// Where the wallpaper for `source` is written.
    ///
    /// Into the configured wallpaper folder under the source's name, otherwise
    /// next to the source with a suffix. Never the source file itself.
    #[must_use]
    pub fn wallpaper_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "wallpaper".to_string());
        let suffixed =
            || source.with_file_name(format!("{}{}.{}", stem, WALLPAPER_SUFFIX, CROP_EXTENSION));

        match &self.config.paths.wallpaper_dir {
            Some(dir) => {
                let target = dir.join(format!("{}.{}", stem, CROP_EXTENSION));
                if same_file(&target, source) {
                    suffixed()
                } else {
                    target
                }
            }
            None => suffixed(),
        }
    }

    /// Where the original of `source` is preserved, if a backup folder is set.
    #[must_use]
    pub fn backup_path(&self, source: &Path) -> Option<PathBuf> {
        let dir = self.config.paths.backup_dir.as_ref()?;
        Some(dir.join(source.file_name()?))
    }

    /// Writes the current crop as a PNG wallpaper and preserves the original.
    ///
    /// # Errors
    ///
    /// Fails without an image, or when the wallpaper or backup cannot be written.
    pub fn save_wallpaper(&self) -> Result<SavedWallpaper> {
        let source = self.current.as_deref().ok_or(EngineError::NoImage)?;
        let crop = self.engine.extract_crop()?;
        let wallpaper = media::save_crop(&crop, &self.wallpaper_path(source))?;
        let backup = self.preserve_original(source)?;
        Ok(SavedWallpaper { wallpaper, backup })
    }

    fn preserve_original(&self, source: &Path) -> Result<Option<PathBuf>> {
        let Some(backup) = self.backup_path(source) else {
            return Ok(None);
        };
        if backup.exists() {
            log::debug!("Original already preserved at {}", backup.display());
            return Ok(None);
        }
        if let Some(parent) = backup.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, &backup)?;
        log::info!("Preserved original as {}", backup.display());
        Ok(Some(backup))
    }

    /// Shows the preserved original next to the crop, or hides it again.
    ///
    /// Falls back to the source file when no backup exists. Returns whether
    /// the comparison is now shown.
    pub fn compare_with_backup(&mut self) -> Result<bool> {
        if matches!(
            self.engine.preview_override(),
            Some(PreviewOverride::Original(_))
        ) {
            self.engine.clear_preview();
            return Ok(false);
        }
        let source = self.current.as_deref().ok_or(EngineError::NoImage)?;
        let reference = self
            .backup_path(source)
            .filter(|backup| backup.is_file())
            .unwrap_or_else(|| source.to_path_buf());
        let image = media::load_image(&reference)?;
        Ok(self.engine.toggle_original(image.into_rgba8()))
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Runs one user command.
    ///
    /// Padding limits are not errors here; the command simply has no effect.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        log::debug!("Executing {}", command);
        match command {
            Command::MoveLeft | Command::MoveRight | Command::MoveUp | Command::MoveDown => {
                if let (Some((dx, dy)), Some(step)) =
                    (command.move_direction(), self.engine.step_size())
                {
                    self.engine.move_frame(dx * step, dy * step);
                }
            }
            Command::PaddingIn => ignore_padding_limit(self.engine.wheel(-1.0))?,
            Command::PaddingOut => ignore_padding_limit(self.engine.wheel(1.0))?,
            Command::SelectAll => self.engine.select_all(),
            Command::Reset => self.engine.reset(),
            Command::TogglePreview => {
                self.engine.toggle_preview();
            }
            Command::ToggleOriginal => {
                self.compare_with_backup()?;
            }
            Command::Save => {
                let saved = self.save_wallpaper()?;
                log::info!("Saved wallpaper {}", saved.wallpaper.display());
            }
            Command::Next => {
                self.next();
            }
            Command::Previous => {
                self.previous();
            }
        }
        Ok(())
    }
}

fn ignore_padding_limit(result: std::result::Result<(), EngineError>) -> Result<()> {
    match result {
        Ok(()) | Err(EngineError::PaddingLimitReached) => Ok(()),
        Err(err) => Err(Error::Engine(err)),
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::solid_image;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        solid_image(width, height, [10, 120, 30, 255])
            .save(&path)
            .expect("failed to write test image");
        path
    }

    fn write_garbage(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).expect("failed to create file");
        file.write_all(b"not an image").expect("failed to write file");
        path
    }

    fn small_desktop_config() -> Config {
        let mut config = Config::default();
        config.set("desktop.width", "16").unwrap();
        config.set("desktop.height", "9").unwrap();
        config
    }

    #[test]
    fn open_file_loads_and_lists_siblings() {
        let dir = tempdir().unwrap();
        let a = write_png(dir.path(), "a.png", 32, 18);
        write_png(dir.path(), "b.png", 20, 20);

        let mut session = Session::new(small_desktop_config());
        session.open(&a).unwrap();

        assert_eq!(session.current_path(), Some(a.as_path()));
        assert_eq!(session.images().len(), 2);
        assert!(session.engine().has_image());
    }

    #[test]
    fn open_broken_file_keeps_previous_image() {
        let dir = tempdir().unwrap();
        let good = write_png(dir.path(), "good.png", 32, 18);
        let bad = write_garbage(dir.path(), "bad.png");

        let mut session = Session::new(small_desktop_config());
        session.open(&good).unwrap();
        let err = session.open(&bad).unwrap_err();

        assert!(matches!(err, Error::Image(_)));
        assert_eq!(session.current_path(), Some(good.as_path()));
        assert!(session.engine().has_image());
    }

    #[test]
    fn open_directory_skips_unloadable_files() {
        let dir = tempdir().unwrap();
        write_garbage(dir.path(), "a.png");
        let b = write_png(dir.path(), "b.png", 20, 20);

        let mut session = Session::new(small_desktop_config());
        session.open(dir.path()).unwrap();

        assert_eq!(session.current_path(), Some(b.as_path()));
    }

    #[test]
    fn browsing_skips_failures_and_wraps() {
        let dir = tempdir().unwrap();
        let a = write_png(dir.path(), "a.png", 20, 20);
        write_garbage(dir.path(), "b.png");
        let c = write_png(dir.path(), "c.png", 20, 20);

        let mut session = Session::new(small_desktop_config());
        session.open(&a).unwrap();

        assert!(session.next());
        assert_eq!(session.current_path(), Some(c.as_path()));
        assert!(session.next());
        assert_eq!(session.current_path(), Some(a.as_path()));
        assert!(session.previous());
        assert_eq!(session.current_path(), Some(c.as_path()));
    }

    #[test]
    fn browsing_with_nothing_loadable_empties_session() {
        let dir = tempdir().unwrap();
        let a = write_png(dir.path(), "a.png", 20, 20);

        let mut session = Session::new(small_desktop_config());
        session.open(&a).unwrap();
        fs::write(&a, b"corrupted since").unwrap();

        assert!(!session.next());
        assert!(session.current_path().is_none());
        assert!(!session.engine().has_image());
    }

    #[test]
    fn browsing_with_empty_list_keeps_current_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shot.raw");
        let mut png = std::io::Cursor::new(Vec::new());
        solid_image(20, 20, [10, 120, 30, 255])
            .write_to(&mut png, image_rs::ImageFormat::Png)
            .unwrap();
        fs::write(&path, png.into_inner()).unwrap();

        let mut session = Session::new(small_desktop_config());
        session.open(&path).unwrap();
        assert!(session.images().is_empty());

        assert!(!session.next());
        assert!(!session.previous());
        assert!(session.engine().has_image());
        assert_eq!(session.current_path(), Some(path.as_path()));
    }

    #[test]
    fn save_next_to_source_uses_suffix_and_png() {
        let dir = tempdir().unwrap();
        let source = write_png(dir.path(), "photo.png", 32, 24);

        let mut session = Session::new(small_desktop_config());
        session.open(&source).unwrap();
        let saved = session.save_wallpaper().unwrap();

        assert_eq!(saved.wallpaper, dir.path().join("photo-wallpaper.png"));
        assert_eq!(saved.backup, None);
        let written = image_rs::open(&saved.wallpaper).unwrap();
        assert_eq!((written.width(), written.height()), (16, 9));
    }

    #[test]
    fn save_into_wallpaper_dir_and_preserve_original_once() {
        let dir = tempdir().unwrap();
        let source = write_png(dir.path(), "photo.png", 32, 18);
        let mut config = small_desktop_config();
        config
            .set("paths.wallpaper_dir", &dir.path().join("walls").display().to_string())
            .unwrap();
        config
            .set("paths.backup_dir", &dir.path().join("originals").display().to_string())
            .unwrap();

        let mut session = Session::new(config);
        session.open(&source).unwrap();

        let first = session.save_wallpaper().unwrap();
        assert_eq!(first.wallpaper, dir.path().join("walls").join("photo.png"));
        assert_eq!(
            first.backup,
            Some(dir.path().join("originals").join("photo.png"))
        );

        let second = session.save_wallpaper().unwrap();
        assert_eq!(second.backup, None);
    }

    #[test]
    fn wallpaper_never_overwrites_source() {
        let dir = tempdir().unwrap();
        let source = write_png(dir.path(), "photo.png", 32, 18);
        let mut config = small_desktop_config();
        config
            .set("paths.wallpaper_dir", &dir.path().display().to_string())
            .unwrap();

        let session = Session::new(config);
        assert_eq!(
            session.wallpaper_path(&source),
            dir.path().join("photo-wallpaper.png")
        );
    }

    #[test]
    fn save_without_image_fails() {
        let session = Session::new(Config::default());
        let err = session.save_wallpaper().unwrap_err();
        assert!(matches!(err, Error::Engine(EngineError::NoImage)));
    }

    #[test]
    fn compare_with_backup_toggles() {
        let dir = tempdir().unwrap();
        let source = write_png(dir.path(), "photo.png", 32, 18);

        let mut session = Session::new(small_desktop_config());
        session.open(&source).unwrap();

        assert!(session.compare_with_backup().unwrap());
        assert!(session.engine().is_previewing());
        assert!(!session.compare_with_backup().unwrap());
        assert!(!session.engine().is_previewing());
    }

    #[test]
    fn commands_drive_the_engine() {
        let dir = tempdir().unwrap();
        let source = write_png(dir.path(), "photo.png", 320, 180);

        let mut session = Session::new(small_desktop_config());
        session.open(&source).unwrap();
        let start = session.engine().clip_rect().unwrap();

        session.execute(Command::MoveRight).unwrap();
        let moved = session.engine().clip_rect().unwrap();
        // One step is a fiftieth of the 180 pixel short side
        assert!((moved.x - start.x - 3.6).abs() < 1e-9);

        session.execute(Command::PaddingOut).unwrap();
        assert!(session.engine().clip_rect().unwrap().height > start.height);

        session.execute(Command::SelectAll).unwrap();
        session.execute(Command::PaddingOut).unwrap();

        session.execute(Command::Reset).unwrap();
        assert_eq!(session.engine().clip_rect(), Some(start));

        session.execute(Command::TogglePreview).unwrap();
        assert!(session.engine().is_previewing());
    }

    #[test]
    fn desktop_change_is_remembered_in_config() {
        let mut session = Session::new(Config::default());
        session.set_desktop_target(2560, 1440).unwrap();
        assert_eq!(session.config().get("desktop.width").as_deref(), Some("2560"));
        assert!(session.set_desktop_target(0, 1440).is_err());
        assert_eq!(session.config().get("desktop.width").as_deref(), Some("2560"));
    }
}
