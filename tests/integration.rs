// SPDX-License-Identifier: MPL-2.0
use approx::assert_abs_diff_eq;
use image_rs::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use wallcrop::command::Command;
use wallcrop::config::{self, Config};
use wallcrop::domain::Point;
use wallcrop::session::Session;
use wallcrop::surface::{DisplaySurface, MouseButton, PointerEvent, FRAME_COLOR};

fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(width, height, Rgba([180, 60, 20, 255]))
        .save(&path)
        .expect("Failed to write test image");
    path
}

#[test]
fn test_crop_workflow_end_to_end() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let source = write_image(dir.path(), "landscape.png", 800, 600);

    let mut settings = Config::default();
    settings
        .set("paths.backup_dir", &dir.path().join("originals").display().to_string())
        .expect("valid path");
    let mut session = Session::new(settings);
    session.open(&source).expect("Failed to open image");
    assert_eq!(
        session.engine().canvas_size().map(|s| (s.width, s.height)),
        Some((1067, 600))
    );

    // Show it, then drag the frame left by 40 widget pixels
    let surface = DisplaySurface::new(800, 600);
    let frame = surface.render(session.engine_mut());
    assert!(frame.pixels().any(|p| *p == FRAME_COLOR));

    for _ in 0..10 {
        session.execute(Command::PaddingIn).expect("padding in");
    }
    let before = session.engine().clip_rect().expect("clip");
    for event in [
        PointerEvent::Pressed {
            position: Point::new(400.0, 300.0),
            button: MouseButton::Left,
        },
        PointerEvent::Moved {
            position: Point::new(360.0, 300.0),
        },
        PointerEvent::Released {
            button: MouseButton::Left,
        },
    ] {
        surface.handle_pointer(session.engine_mut(), event);
    }
    let after = session.engine().clip_rect().expect("clip");
    let ratio = session.engine().display_scale().expect("displayed").ratio;
    assert_abs_diff_eq!(after.x, before.x - 40.0 / ratio, epsilon = 1e-9);

    let saved = session.save_wallpaper().expect("Failed to save wallpaper");
    let wallpaper = image_rs::open(&saved.wallpaper).expect("wallpaper is readable");
    let aspect = f64::from(wallpaper.width()) / f64::from(wallpaper.height());
    assert_abs_diff_eq!(aspect, 16.0 / 9.0, epsilon = 0.01);

    let backup = saved.backup.expect("original preserved");
    assert_eq!(
        std::fs::read(&backup).expect("backup readable"),
        std::fs::read(&source).expect("source readable")
    );
}

#[test]
fn test_browse_folder_with_broken_file() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let first = write_image(dir.path(), "01.png", 64, 64);
    std::fs::write(dir.path().join("02.jpg"), b"truncated").expect("write");
    let third = write_image(dir.path(), "03.png", 32, 64);
    std::fs::write(dir.path().join("notes.txt"), b"ignored").expect("write");

    let mut session = Session::new(Config::default());
    session.open(dir.path()).expect("Failed to open folder");
    assert_eq!(session.current_path(), Some(first.as_path()));
    assert_eq!(session.images().len(), 3);

    session.execute(Command::Next).expect("next");
    assert_eq!(session.current_path(), Some(third.as_path()));
    session.execute(Command::Next).expect("next");
    assert_eq!(session.current_path(), Some(first.as_path()));
}

#[test]
fn test_desktop_size_survives_settings_round_trip() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let settings_path = dir.path().join("settings.toml");

    let mut session = Session::new(Config::default());
    session.set_desktop_target(1080, 1920).expect("valid size");
    config::save_to_path(session.config(), &settings_path).expect("Failed to write settings");

    let loaded = config::load_from_path(&settings_path).expect("Failed to read settings");
    let restored = Session::new(loaded);
    assert_eq!(restored.engine().desktop_target().width(), 1080);
    assert_eq!(restored.engine().desktop_target().height(), 1920);
}
