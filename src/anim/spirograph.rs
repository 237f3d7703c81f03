// Copyright (c) 2026 rezky_nightky

use std::f32::consts::PI;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cell::{Cell, Style};
use crate::frame::Frame;

use super::Animation;

const TRAIL_MAX_AGE: u16 = 80;
const RESEED_TICKS: u32 = 400;
const POINTS_PER_TICK: usize = 3;

#[derive(Clone, Copy, Debug)]
struct TrailPoint {
    x: i32,
    y: i32,
    age: u16,
}

#[derive(Clone, Debug)]
struct Curve {
    big_r: f32,
    small_r: f32,
    d: f32,
    t: f32,
    color_base: u8,
    trail: Vec<TrailPoint>,
}

pub struct Spirograph {
    h: u16,
    w: u16,
    rng: StdRng,
    curves: Vec<Curve>,
    tick: u32,
}

impl Spirograph {
    pub fn new(h: u16, w: u16, rng: StdRng) -> Self {
        let mut s = Self {
            h,
            w,
            rng,
            curves: Vec::new(),
            tick: 0,
        };
        s.reset();
        s
    }

    fn new_curve_set(&mut self) {
        let mut offsets = [0u8, 10, 20];
        offsets.shuffle(&mut self.rng);
        self.curves = offsets
            .iter()
            .map(|&color_base| Curve {
                big_r: self.rng.random_range(8.0..16.0),
                small_r: self.rng.random_range(2.0..7.0),
                d: self.rng.random_range(3.0..10.0),
                t: self.rng.random_range(0.0..PI),
                color_base,
                trail: Vec::new(),
            })
            .collect();
    }

    fn hypotrochoid(c: &Curve) -> (f32, f32) {
        let (big_r, r, d, t) = (c.big_r, c.small_r, c.d, c.t);
        let x = (big_r - r) * t.cos() + d * ((big_r - r) / r * t).cos();
        let y = (big_r - r) * t.sin() - d * ((big_r - r) / r * t).sin();
        (x, y)
    }
}

impl Animation for Spirograph {
    fn name(&self) -> &'static str {
        "Spirograph"
    }

    fn reset(&mut self) {
        self.tick = 0;
        self.new_curve_set();
    }

    fn resize(&mut self, h: u16, w: u16) {
        self.h = h;
        self.w = w;
    }

    fn update(&mut self) {
        self.tick += 1;
        let cx = self.w as f32 / 2.0;
        let cy = self.h as f32 / 2.0;
        let scale = self.h.min(self.w) as f32 * 0.35;
        for c in &mut self.curves {
            for _ in 0..POINTS_PER_TICK {
                let (x, y) = Self::hypotrochoid(c);
                let norm = c.big_r + c.d;
                let sx = (cx + x / norm * scale) as i32;
                // halve the vertical reach to counter cell aspect
                let sy = (cy + y / norm * scale * 0.5) as i32;
                c.trail.push(TrailPoint { x: sx, y: sy, age: 0 });
                c.t += 0.05;
            }
            for p in &mut c.trail {
                p.age += 1;
            }
            c.trail.retain(|p| p.age <= TRAIL_MAX_AGE);
        }
        if self.tick > RESEED_TICKS {
            self.tick = 0;
            self.new_curve_set();
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        for c in &self.curves {
            for p in &c.trail {
                if p.y < 0 || p.y >= self.h as i32 || p.x < 0 || p.x >= self.w as i32 {
                    continue;
                }
                let (ch, bold) = match p.age {
                    0..=4 => ('@', true),
                    5..=19 => ('*', true),
                    20..=39 => ('+', false),
                    _ => ('.', false),
                };
                let shade = (c.color_base + (p.age / 3).min(9) as u8) % 30;
                let style = Style::Rainbow(shade);
                frame.set(
                    p.x,
                    p.y,
                    if bold {
                        Cell::bold(ch, style)
                    } else {
                        Cell::new(ch, style)
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn trail_ages_are_capped() {
        let mut spiro = Spirograph::new(24, 80, StdRng::seed_from_u64(14));
        for _ in 0..300 {
            spiro.update();
        }
        for c in &spiro.curves {
            assert!(!c.trail.is_empty());
            assert!(c.trail.iter().all(|p| p.age >= 1 && p.age <= TRAIL_MAX_AGE));
            assert!(c.trail.len() <= (TRAIL_MAX_AGE as usize) * POINTS_PER_TICK);
        }
    }

    #[test]
    fn curve_set_reseeds_on_schedule() {
        let mut spiro = Spirograph::new(24, 80, StdRng::seed_from_u64(15));
        for _ in 0..=RESEED_TICKS {
            spiro.update();
        }
        assert_eq!(spiro.tick, 0);
        assert!(spiro.curves.iter().all(|c| c.trail.is_empty()));
    }

    #[test]
    fn always_three_curves_with_distinct_bases() {
        let mut spiro = Spirograph::new(24, 80, StdRng::seed_from_u64(16));
        spiro.reset();
        let mut bases: Vec<u8> = spiro.curves.iter().map(|c| c.color_base).collect();
        bases.sort_unstable();
        assert_eq!(bases, vec![0, 10, 20]);
    }
}
