// SPDX-License-Identifier: MPL-2.0
use image_rs::DynamicImage;
use std::path::PathBuf;
use std::process::ExitCode;
use wallcrop::command::{Command, COMMAND_NAMES};
use wallcrop::config::{self, DEFAULT_VIEW_HEIGHT, DEFAULT_VIEW_WIDTH};
use wallcrop::domain::{BackgroundColor, DesktopTarget, Point, Rect, Size};
use wallcrop::error::{Error, Result};
use wallcrop::session::Session;
use wallcrop::surface::{DisplaySurface, MouseButton, PointerEvent};
use wallcrop::{media, paths};

const HELP: &str = "\
wallcrop - crop images into desktop wallpapers

USAGE:
  wallcrop [OPTIONS] [IMAGE|DIR]

Without a path, the configured source folder is opened.

OPTIONS:
  --desktop WxH        Target desktop resolution
  --background COLOR   Padding color, #rrggbb
  --view WxH           Size of the preview widget
  --erase X,Y,W,H      Erase a widget-space rectangle (repeatable)
  --do COMMAND         Run a command (repeatable, see below)
  --output PATH        Write the crop as PNG to PATH
  --preview PATH       Write the rendered widget to PATH
  --config-dir DIR     Use DIR for settings.toml
  --save-settings      Store desktop size and color in settings.toml
  -h, --help           Print this help

Set RUST_LOG=debug for geometry traces.
";

struct Args {
    desktop: Option<DesktopTarget>,
    background: Option<BackgroundColor>,
    view: Size,
    erase: Vec<Rect>,
    commands: Vec<Command>,
    output: Option<PathBuf>,
    preview: Option<PathBuf>,
    save_settings: bool,
    path: Option<PathBuf>,
}

fn parse_size(s: &str) -> Result<Size> {
    s.parse::<DesktopTarget>().map(DesktopTarget::size)
}

fn parse_rect(s: &str) -> Result<Rect> {
    let values: Vec<f64> = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| Error::Config(format!("invalid rectangle {:?}, expected X,Y,W,H", s)))?;
    match values[..] {
        [x, y, w, h] => Ok(Rect::new(x, y, w, h)),
        _ => Err(Error::Config(format!(
            "invalid rectangle {:?}, expected X,Y,W,H",
            s
        ))),
    }
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = pico_args::Arguments::from_env();
    let cli_error = |e: pico_args::Error| Error::Config(e.to_string());

    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        println!("COMMANDS:");
        for (name, _) in COMMAND_NAMES {
            println!("  {}", name);
        }
        return Ok(None);
    }

    paths::init_cli_overrides(args.opt_value_from_str("--config-dir").map_err(cli_error)?);

    let parsed = Args {
        desktop: args.opt_value_from_str("--desktop").map_err(cli_error)?,
        background: args.opt_value_from_str("--background").map_err(cli_error)?,
        view: args
            .opt_value_from_fn("--view", parse_size)
            .map_err(cli_error)?
            .unwrap_or(Size::new(DEFAULT_VIEW_WIDTH, DEFAULT_VIEW_HEIGHT)),
        erase: args.values_from_fn("--erase", parse_rect).map_err(cli_error)?,
        commands: args.values_from_str("--do").map_err(cli_error)?,
        output: args.opt_value_from_str("--output").map_err(cli_error)?,
        preview: args.opt_value_from_str("--preview").map_err(cli_error)?,
        save_settings: args.contains("--save-settings"),
        path: args.finish().into_iter().next().map(PathBuf::from),
    };
    Ok(Some(parsed))
}

fn erase(surface: &DisplaySurface, session: &mut Session, rect: Rect) {
    let events = [
        PointerEvent::Pressed {
            position: Point::new(rect.x, rect.y),
            button: MouseButton::Right,
        },
        PointerEvent::Moved {
            position: Point::new(rect.right(), rect.bottom()),
        },
        PointerEvent::Released {
            button: MouseButton::Right,
        },
    ];
    for event in events {
        surface.handle_pointer(session.engine_mut(), event);
    }
}

fn run(args: Args) -> Result<()> {
    let (settings, warning) = config::load();
    if let Some(warning) = warning {
        log::warn!("{}", warning);
    }
    let source = args
        .path
        .clone()
        .or_else(|| settings.paths.source_dir.clone())
        .ok_or_else(|| Error::Config("no image or folder given, see --help".to_string()))?;

    let mut session = Session::new(settings);
    if let Some(desktop) = args.desktop {
        session.set_desktop_target(desktop.width(), desktop.height())?;
    }
    if let Some(background) = args.background {
        session.set_padding_background(background);
    }

    if let Err(err) = session.open(&source) {
        if let Error::Image(image_error) = &err {
            eprintln!("{}", image_error.prompt());
        }
        return Err(err);
    }

    let surface = DisplaySurface::new(args.view.width, args.view.height);
    let _ = surface.render(session.engine_mut());
    for rect in args.erase {
        erase(&surface, &mut session, rect);
    }
    for command in args.commands {
        session.execute(command)?;
    }

    match (session.current_path(), session.engine().clip_rect()) {
        (Some(path), Some(clip)) => println!(
            "{}: clip {:.1}x{:.1} at ({:.1}, {:.1}) for desktop {}",
            path.display(),
            clip.width,
            clip.height,
            clip.x,
            clip.y,
            session.engine().desktop_target()
        ),
        _ => println!("No image loaded"),
    }

    if let Some(output) = &args.output {
        let crop = session.engine().extract_crop()?;
        let written = media::save_crop(&crop, output)?;
        println!("Wrote {}", written.display());
    }
    if let Some(preview) = &args.preview {
        let frame = surface.render(session.engine_mut());
        media::save_image(&DynamicImage::ImageRgba8(frame), preview)?;
        println!("Wrote {}", preview.display());
    }
    if args.save_settings {
        config::save(session.config())?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
