// Copyright (c) 2026 rezky_nightky

use rand::rngs::StdRng;
use rand::Rng;

use crate::cell::{Cell, Style};
use crate::frame::Frame;

use super::Animation;

const GLYPHS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789@#$%&*(){}[]<>?/\\|~";

#[derive(Clone, Copy, Debug)]
struct Drop {
    x: u16,
    y: f32,
    speed: f32,
    length: u16,
}

pub struct MatrixRain {
    h: u16,
    w: u16,
    rng: StdRng,
    drops: Vec<Drop>,
}

impl MatrixRain {
    pub fn new(h: u16, w: u16, rng: StdRng) -> Self {
        let mut s = Self {
            h,
            w,
            rng,
            drops: Vec::new(),
        };
        s.reset();
        s
    }

    fn roll_drop(&mut self, x: u16, y_low: f32) -> Drop {
        let max_len = (self.h / 2).max(5);
        Drop {
            x,
            y: self.rng.random_range(y_low..=0.0),
            speed: self.rng.random_range(1.0..3.0),
            length: self.rng.random_range(5..=max_len),
        }
    }

    fn glyph(&mut self) -> char {
        GLYPHS[self.rng.random_range(0..GLYPHS.len())] as char
    }
}

impl Animation for MatrixRain {
    fn name(&self) -> &'static str {
        "Matrix Rain"
    }

    fn reset(&mut self) {
        self.drops.clear();
        for x in 0..self.w {
            if self.rng.random_bool(0.4) {
                let d = self.roll_drop(x, -(self.h as f32));
                self.drops.push(d);
            }
        }
    }

    fn resize(&mut self, h: u16, w: u16) {
        self.h = h;
        self.w = w;
        self.reset();
    }

    fn update(&mut self) {
        if self.w == 0 {
            return;
        }
        for i in 0..self.drops.len() {
            let mut d = self.drops[i];
            d.y += d.speed;
            if d.y - d.length as f32 > self.h as f32 {
                let x = self.rng.random_range(0..self.w);
                d = self.roll_drop(x, -(self.h as f32) / 2.0);
            }
            self.drops[i] = d;
        }
        // trickle in new drops up to one per column
        if self.drops.len() < self.w as usize && self.rng.random_bool(0.3) {
            let x = self.rng.random_range(0..self.w);
            let d = self.roll_drop(x, -10.0);
            self.drops.push(d);
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        for i in 0..self.drops.len() {
            let d = self.drops[i];
            if d.x >= self.w {
                continue;
            }
            let head = d.y.floor() as i32;
            for k in 0..d.length as i32 {
                let y = head - k;
                if y < 0 || y >= self.h as i32 {
                    continue;
                }
                let ch = self.glyph();
                let cell = if k == 0 {
                    Cell::bold(ch, Style::White)
                } else {
                    let shade = (9 - (k * 10 / d.length.max(1) as i32)).clamp(0, 9);
                    Cell::new(ch, Style::GreenShade(shade as u8))
                };
                frame.set(d.x as i32, y, cell);
            }
        }
    }
}
