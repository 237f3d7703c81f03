// Copyright (c) 2026 rezky_nightky

use rand::rngs::StdRng;
use rand::Rng;

use crate::cell::{Cell, Style};
use crate::frame::Frame;

use super::Animation;

const EDGE_THRESHOLD: f32 = 1.2;
const MAX_DRIFT: f32 = 0.5;

#[derive(Clone, Copy, Debug)]
struct Seed {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    color: u8,
}

/// Voronoi diagram of drifting seeds. Cells are colored by their
/// nearest seed; cells sitting close to a region boundary get an edge
/// glyph instead.
pub struct VoronoiLandscape {
    h: u16,
    w: u16,
    rng: StdRng,
    seeds: Vec<Seed>,
}

impl VoronoiLandscape {
    pub fn new(h: u16, w: u16, rng: StdRng) -> Self {
        let mut s = Self {
            h,
            w,
            rng,
            seeds: Vec::new(),
        };
        s.reset();
        s
    }

    /// Squared distances to the nearest and second-nearest seed, with
    /// the vertical axis weighted double for cell aspect.
    fn nearest_two(&self, x: f32, y: f32) -> (usize, f32, f32) {
        let mut best_i = 0;
        let mut best_d = f32::INFINITY;
        let mut second_d = f32::INFINITY;
        for (i, s) in self.seeds.iter().enumerate() {
            let dx = x - s.x;
            let dy = (y - s.y) * 2.0;
            let d = dx * dx + dy * dy;
            if d < best_d {
                second_d = best_d;
                best_d = d;
                best_i = i;
            } else if d < second_d {
                second_d = d;
            }
        }
        (best_i, best_d, second_d)
    }

    fn cell_at(&self, x: u16, y: u16) -> Cell {
        let (nearest, d1, d2) = self.nearest_two(x as f32, y as f32);
        let edge = if d2.is_finite() {
            d2.sqrt() - d1.sqrt()
        } else {
            f32::INFINITY
        };
        if edge < EDGE_THRESHOLD {
            Cell::bold('\u{00b7}', Style::White)
        } else {
            Cell::new('\u{2588}', Style::Rainbow(self.seeds[nearest].color))
        }
    }
}

impl Animation for VoronoiLandscape {
    fn name(&self) -> &'static str {
        "Voronoi Landscape"
    }

    fn reset(&mut self) {
        self.seeds.clear();
        if self.h == 0 || self.w == 0 {
            return;
        }
        let n = self.rng.random_range(12..=16);
        for i in 0..n {
            let s = Seed {
                x: self.rng.random_range(0.0..self.w as f32),
                y: self.rng.random_range(0.0..self.h as f32),
                vx: self.rng.random_range(-0.3..0.3),
                vy: self.rng.random_range(-0.3..0.3),
                color: (i % 30) as u8,
            };
            self.seeds.push(s);
        }
    }

    fn resize(&mut self, h: u16, w: u16) {
        self.h = h;
        self.w = w;
        self.reset();
    }

    fn update(&mut self) {
        let w = self.w as f32;
        let h = self.h as f32;
        for i in 0..self.seeds.len() {
            let mut s = self.seeds[i];
            s.x += s.vx;
            s.y += s.vy;
            if s.x < 0.0 || s.x >= w {
                s.vx = -s.vx;
                s.x = s.x.clamp(0.0, (w - 1.0).max(0.0));
            }
            if s.y < 0.0 || s.y >= h {
                s.vy = -s.vy;
                s.y = s.y.clamp(0.0, (h - 1.0).max(0.0));
            }
            s.vx = (s.vx + self.rng.random_range(-0.02..0.02)).clamp(-MAX_DRIFT, MAX_DRIFT);
            s.vy = (s.vy + self.rng.random_range(-0.02..0.02)).clamp(-MAX_DRIFT, MAX_DRIFT);
            self.seeds[i] = s;
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        if self.seeds.is_empty() {
            return;
        }
        // sample every other column on wide viewports to bound cost
        let step: u16 = if self.w > 150 { 2 } else { 1 };
        for y in 0..self.h {
            let mut x = 0;
            while x < self.w {
                let cell = self.cell_at(x, y);
                frame.set(x as i32, y as i32, cell);
                if step == 2 && x + 1 < self.w {
                    frame.set(x as i32 + 1, y as i32, cell);
                }
                x += step;
            }
        }
    }
}
