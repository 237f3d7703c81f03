// Copyright (c) 2026 rezky_nightky

use rand::rngs::StdRng;
use rand::Rng;

use crate::cell::{Cell, Style};
use crate::frame::Frame;

use super::Animation;

const STAR_COUNT: usize = 120;
const NEAR_PLANE: f32 = 0.005;

#[derive(Clone, Copy, Debug)]
struct Star {
    x: f32,
    y: f32,
    z: f32,
}

pub struct Starfield {
    h: u16,
    w: u16,
    rng: StdRng,
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(h: u16, w: u16, rng: StdRng) -> Self {
        let mut s = Self {
            h,
            w,
            rng,
            stars: Vec::new(),
        };
        s.reset();
        s
    }

    fn roll_star(&mut self, z: Option<f32>) -> Star {
        Star {
            x: self.rng.random_range(-1.0..1.0),
            y: self.rng.random_range(-1.0..1.0),
            z: z.unwrap_or_else(|| self.rng.random_range(0.1..1.0)),
        }
    }
}

impl Animation for Starfield {
    fn name(&self) -> &'static str {
        "Starfield"
    }

    fn reset(&mut self) {
        self.stars.clear();
        for _ in 0..STAR_COUNT {
            let s = self.roll_star(None);
            self.stars.push(s);
        }
    }

    fn resize(&mut self, h: u16, w: u16) {
        self.h = h;
        self.w = w;
    }

    fn update(&mut self) {
        for i in 0..self.stars.len() {
            let mut s = self.stars[i];
            s.z -= 0.02;
            if s.z <= NEAR_PLANE {
                s = self.roll_star(Some(1.0));
            }
            self.stars[i] = s;
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let cx = (self.w / 2) as f32;
        let cy = (self.h / 2) as f32;
        for s in &self.stars {
            let sx = (cx + s.x / s.z * cx) as i32;
            let sy = (cy + s.y / s.z * cy) as i32;
            if sy < 0 || sy >= self.h as i32 || sx < 0 || sx >= self.w as i32 {
                continue;
            }
            let brightness = 1.0 - s.z;
            let cell = if brightness > 0.8 {
                Cell::bold('*', Style::White)
            } else if brightness > 0.5 {
                Cell::new('+', Style::White)
            } else if brightness > 0.2 {
                Cell::new('.', Style::Basic(6))
            } else {
                Cell::new('.', Style::Dim)
            };
            frame.set(sx, sy, cell);
        }
    }
}
