// Copyright (c) 2026 rezky_nightky

mod anim;
mod cell;
mod config;
mod frame;
mod gallery;
mod geometry;
mod palette;
mod terminal;

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

#[cfg(unix)]
use std::thread;

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::config::Args;
use crate::frame::Frame;
use crate::gallery::{Action, Gallery};
use crate::geometry::Geometry;
use crate::palette::{detect_color_mode_auto, ColorMode, Palette};
use crate::terminal::{restore_terminal_best_effort, Terminal};

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn require_f64_range(name: &str, v: f64, min: f64, max: f64) -> f64 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn detect_color_mode(args: &Args) -> ColorMode {
    if let Some(m) = args.colormode {
        return match m {
            0 => ColorMode::Mono,
            8 => ColorMode::Color256,
            24 => ColorMode::TrueColor,
            _ => {
                eprintln!("invalid --colormode: {} (allowed: 0,8,24)", m);
                std::process::exit(1);
            }
        };
    }

    detect_color_mode_auto()
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}

/// Names taken from the roster itself so the list flag, the status bar
/// and --start can never drift apart.
fn roster_names() -> Vec<&'static str> {
    let mut master = StdRng::seed_from_u64(0);
    anim::roster(0, 0, &mut master)
        .iter()
        .map(|a| a.name())
        .collect()
}

fn resolve_start(spec: &str) -> Option<usize> {
    let names = roster_names();
    if let Ok(n) = spec.trim().parse::<usize>() {
        if n >= 1 && n <= names.len() {
            return Some(n - 1);
        }
        return None;
    }
    let needle = spec.trim().to_ascii_lowercase();
    names
        .iter()
        .position(|name| name.to_ascii_lowercase().starts_with(needle.as_str()))
}

fn print_roster() {
    for (i, name) in roster_names().iter().enumerate() {
        println!("{:>2}  {}", i + 1, name);
    }
}

fn decode_key(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Right => Some(Action::Next),
        KeyCode::Left => Some(Action::Prev),
        KeyCode::Char(c @ '1'..='9') => Some(Action::Jump(c as usize - '1' as usize)),
        KeyCode::Char('0') => Some(Action::Jump(9)),
        KeyCode::Char(' ') => Some(Action::TogglePause),
        KeyCode::Char('r') => Some(Action::ResetCurrent),
        _ => None,
    }
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let cmd = Args::command().styles(clap_styles());
    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.list_animations {
        print_roster();
        return Ok(());
    }

    let target_fps = require_f64_range("--fps", args.fps, 1.0, 120.0);
    let duration_s = args
        .duration
        .map(|s| require_f64_range("--duration", s, 0.1, 86400.0));
    let color_mode = detect_color_mode(&args);
    let seed = args.seed.unwrap_or_else(time_seed);

    let start_at = match &args.start {
        Some(spec) => match resolve_start(spec) {
            Some(i) => Some(i),
            None => {
                eprintln!("unknown animation: {} (see --list-animations)", spec);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let palette = Palette::new(color_mode);
    let mut term = Terminal::new()?;
    let (w, h) = term.size()?;

    let mut gallery = Gallery::new(Geometry::new(w, h), seed);
    if let Some(i) = start_at {
        gallery.apply(Action::Jump(i));
    }

    let mut frame = Frame::new(w, h);

    let start_time = Instant::now();
    let end_time = duration_s.map(|s| start_time + Duration::from_secs_f64(s));
    let target_period = Duration::from_secs_f64(1.0 / target_fps);
    let mut next_frame = Instant::now();

    while gallery.is_running() {
        if end_time.is_some_and(|end| Instant::now() >= end) {
            break;
        }

        let mut pending_resize: Option<(u16, u16)> = None;
        let mut action: Option<Action> = None;

        // the bounded poll doubles as the frame clock; at most one key
        // is consumed per frame
        loop {
            let now = Instant::now();
            if now >= next_frame {
                break;
            }
            let mut timeout = next_frame - now;
            if let Some(end) = end_time {
                if now >= end {
                    break;
                }
                timeout = timeout.min(end - now);
            }
            if Terminal::poll_event(timeout)? {
                match Terminal::read_event()? {
                    Event::Resize(nw, nh) => pending_resize = Some((nw, nh)),
                    Event::Key(k) if k.kind == KeyEventKind::Press => {
                        if let Some(a) = decode_key(k) {
                            action = Some(a);
                            break;
                        }
                    }
                    _ => {}
                }
            }
        }

        // catch resizes that never arrived as events
        let (nw, nh) = term.size()?;
        if (nw, nh) != (frame.width, frame.height) {
            pending_resize = Some((nw, nh));
        }
        if let Some((nw, nh)) = pending_resize {
            gallery.resize(Geometry::new(nw, nh));
            frame = Frame::new(nw, nh);
        }

        if let Some(a) = action {
            gallery.apply(a);
        }
        if !gallery.is_running() {
            break;
        }

        gallery.tick();
        gallery.render(&mut frame);
        term.draw(&frame, &palette)?;

        next_frame += target_period;
        let now = Instant::now();
        if now > next_frame {
            next_frame = now;
        }
    }

    Ok(())
}
