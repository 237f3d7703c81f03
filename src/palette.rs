// Copyright (c) 2026 rezky_nightky

use std::env;

use crossterm::style::Color;

use crate::cell::Style;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    Color16,
    Color256,
    TrueColor,
}

/// Concrete terminal attributes for one cell, produced by resolving a
/// logical style against the active color mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attr {
    pub fg: Option<Color>,
    pub bold: bool,
    pub reverse: bool,
}

pub fn detect_color_mode_auto() -> ColorMode {
    if env::var_os("NO_COLOR").is_some() {
        return ColorMode::Mono;
    }

    let colorterm = env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term == "dumb" {
        return ColorMode::Mono;
    }
    if term.contains("256color") {
        return ColorMode::Color256;
    }

    ColorMode::Color16
}

fn from_ansi_list(list: &[u8]) -> Vec<Color> {
    list.iter().map(|&v| Color::AnsiValue(v)).collect()
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let a = a as f32;
    let b = b as f32;
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

fn gradient_from_stops(stops: &[(u8, u8, u8)], steps: usize) -> Vec<Color> {
    if steps == 0 || stops.is_empty() {
        return Vec::new();
    }
    if stops.len() == 1 || steps == 1 {
        let (r, g, b) = stops[0];
        return vec![Color::Rgb { r, g, b }; steps];
    }

    let segs = stops.len() - 1;
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        let t = (i as f32) / ((steps - 1) as f32);
        let pos = t * (segs as f32);
        let seg = (pos.floor() as usize).min(segs - 1);
        let lt = pos - (seg as f32);
        let (r0, g0, b0) = stops[seg];
        let (r1, g1, b1) = stops[seg + 1];
        out.push(Color::Rgb {
            r: lerp_u8(r0, r1, lt),
            g: lerp_u8(g0, g1, lt),
            b: lerp_u8(b0, b1, lt),
        });
    }
    out
}

fn basic_cycle(len: usize) -> Vec<Color> {
    const BASICS: [Color; 7] = [
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];
    (0..len).map(|i| BASICS[i % BASICS.len()]).collect()
}

/// Resolves logical styles to terminal attributes. Ramp sizes match the
/// style bucket counts: 10 green shades, 30 rainbow hues, 10 burst
/// colors.
#[derive(Clone, Debug)]
pub struct Palette {
    pub mode: ColorMode,
    greens: Vec<Color>,
    rainbow: Vec<Color>,
    burst: Vec<Color>,
}

const GREENS_256: [u8; 10] = [22, 28, 34, 40, 46, 82, 118, 154, 190, 226];

const RAINBOW_256: [u8; 30] = [
    196, 202, 208, 214, 220, 226, 190, 154, 118, 82, 46, 47, 48, 49, 50, 51, 45, 39, 33, 27, 21,
    57, 93, 129, 165, 201, 200, 199, 198, 197,
];

const BURST_256: [u8; 10] = [196, 208, 226, 46, 51, 21, 201, 231, 214, 118];

const GREENS_RGB: [(u8, u8, u8); 4] = [(0, 55, 0), (0, 160, 40), (70, 255, 120), (220, 255, 200)];

const RAINBOW_RGB: [(u8, u8, u8); 9] = [
    (255, 0, 0),
    (255, 135, 0),
    (255, 255, 0),
    (0, 255, 0),
    (0, 255, 215),
    (0, 95, 255),
    (95, 0, 255),
    (255, 0, 255),
    (255, 0, 135),
];

const BURST_RGB: [(u8, u8, u8); 10] = [
    (255, 0, 0),
    (255, 135, 0),
    (255, 255, 0),
    (0, 255, 0),
    (0, 255, 255),
    (0, 0, 255),
    (255, 0, 255),
    (255, 255, 255),
    (255, 175, 0),
    (135, 255, 0),
];

impl Palette {
    pub fn new(mode: ColorMode) -> Self {
        let (greens, rainbow, burst) = match mode {
            ColorMode::Mono => (Vec::new(), Vec::new(), Vec::new()),
            ColorMode::Color16 => (
                vec![Color::DarkGreen; 5]
                    .into_iter()
                    .chain(vec![Color::Green; 5])
                    .collect(),
                basic_cycle(30),
                basic_cycle(10),
            ),
            ColorMode::Color256 => (
                from_ansi_list(&GREENS_256),
                from_ansi_list(&RAINBOW_256),
                from_ansi_list(&BURST_256),
            ),
            ColorMode::TrueColor => (
                gradient_from_stops(&GREENS_RGB, 10),
                gradient_from_stops(&RAINBOW_RGB, 30),
                BURST_RGB
                    .iter()
                    .map(|&(r, g, b)| Color::Rgb { r, g, b })
                    .collect(),
            ),
        };
        Self {
            mode,
            greens,
            rainbow,
            burst,
        }
    }

    fn ramp(&self, ramp: &[Color], idx: u8) -> Option<Color> {
        if ramp.is_empty() {
            return None;
        }
        ramp.get((idx as usize).min(ramp.len() - 1)).copied()
    }

    fn basic(&self, idx: u8) -> Option<Color> {
        match idx % 8 {
            1 => Some(Color::Red),
            2 => Some(Color::Green),
            3 => Some(Color::Yellow),
            4 => Some(Color::Blue),
            5 => Some(Color::Magenta),
            6 => Some(Color::Cyan),
            7 => Some(Color::White),
            _ => None,
        }
    }

    pub fn resolve(&self, style: Style, bold: bool) -> Attr {
        if self.mode == ColorMode::Mono {
            return Attr {
                fg: None,
                bold,
                reverse: style == Style::StatusBar,
            };
        }

        let (fg, reverse) = match style {
            Style::Default => (None, false),
            Style::Dim => (Some(Color::DarkGrey), false),
            Style::White => (Some(Color::White), false),
            Style::Basic(k) => (self.basic(k), false),
            Style::GreenShade(k) => (self.ramp(&self.greens, k), false),
            Style::Rainbow(k) => (self.ramp(&self.rainbow, k), false),
            Style::Burst(k) => (self.ramp(&self.burst, k), false),
            Style::StatusBar => (None, true),
        };

        Attr { fg, bold, reverse }
    }
}
