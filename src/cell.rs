// Copyright (c) 2026 rezky_nightky

/// Logical color category, resolved to a concrete terminal attribute by
/// the palette. Animations only ever pick one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Default,
    Dim,
    White,
    /// One of the seven standard ANSI colors, by index 1-7.
    Basic(u8),
    /// Dark-to-bright green ramp, 10 steps.
    GreenShade(u8),
    /// Hue wheel, 30 steps.
    Rainbow(u8),
    /// Firework burst colors, 10 entries.
    Burst(u8),
    /// Reverse-video row reserved for the gallery status line.
    StatusBar,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
    pub bold: bool,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        style: Style::Default,
        bold: false,
    };

    pub fn new(ch: char, style: Style) -> Self {
        Self {
            ch,
            style,
            bold: false,
        }
    }

    pub fn bold(ch: char, style: Style) -> Self {
        Self {
            ch,
            style,
            bold: true,
        }
    }
}
