// Copyright (c) 2026 rezky_nightky

use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cell::{Cell, Style};
use crate::frame::Frame;

use super::Animation;

const DECAY: f32 = 0.93;
const RESHUFFLE_TICKS: u32 = 600;
const BASE_RATIOS: [(f32, f32); 4] = [(3.0, 2.0), (5.0, 4.0), (3.0, 4.0), (7.0, 6.0)];
const FULL_RATIOS: [(f32, f32); 6] = [
    (3.0, 2.0),
    (5.0, 4.0),
    (3.0, 4.0),
    (7.0, 6.0),
    (5.0, 3.0),
    (4.0, 3.0),
];

#[derive(Clone, Copy, Debug)]
struct Beam {
    a: f32,
    b: f32,
    t: f32,
    delta: f32,
    delta_drift: f32,
}

/// Four Lissajous beams writing into a phosphor grid that fades a
/// little every tick, like afterglow on a CRT.
pub struct LissajousWeaver {
    h: u16,
    w: u16,
    rng: StdRng,
    phosphor: Vec<f32>,
    beams: Vec<Beam>,
    tick: u32,
}

impl LissajousWeaver {
    pub fn new(h: u16, w: u16, rng: StdRng) -> Self {
        let mut s = Self {
            h,
            w,
            rng,
            phosphor: Vec::new(),
            beams: Vec::new(),
            tick: 0,
        };
        s.reset();
        s
    }

    fn stamp(&mut self, x: i32, y: i32) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= self.w as i32 || ny >= self.h as i32 {
                    continue;
                }
                let i = ny as usize * self.w as usize + nx as usize;
                let v = if dx == 0 && dy == 0 { 1.0 } else { 0.5 };
                self.phosphor[i] = (self.phosphor[i] + v).min(1.0);
            }
        }
    }
}

impl Animation for LissajousWeaver {
    fn name(&self) -> &'static str {
        "Lissajous Weaver"
    }

    fn reset(&mut self) {
        self.phosphor = vec![0.0; self.h as usize * self.w as usize];
        self.beams = BASE_RATIOS
            .iter()
            .map(|&(a, b)| Beam {
                a,
                b,
                t: 0.0,
                delta: self.rng.random_range(0.0..TAU),
                delta_drift: self.rng.random_range(0.001..0.004),
            })
            .collect();
        self.tick = 0;
    }

    fn resize(&mut self, h: u16, w: u16) {
        // the grid is reshaped, the beams keep their phase
        self.h = h;
        self.w = w;
        self.phosphor = vec![0.0; h as usize * w as usize];
    }

    fn update(&mut self) {
        self.tick += 1;
        for v in &mut self.phosphor {
            *v *= DECAY;
        }

        let cx = self.w as f32 / 2.0;
        let cy = self.h as f32 / 2.0;
        let sx = self.w as f32 * 0.42;
        let sy = self.h as f32 * 0.42;
        for i in 0..self.beams.len() {
            let mut beam = self.beams[i];
            beam.t += 0.04;
            beam.delta += beam.delta_drift;
            self.beams[i] = beam;
            let px = (beam.a * beam.t + beam.delta).sin() * sx + cx;
            let py = (beam.b * beam.t).sin() * sy + cy;
            self.stamp(px as i32, py as i32);
        }

        if self.tick > RESHUFFLE_TICKS {
            self.tick = 0;
            let mut ratios = FULL_RATIOS;
            ratios.shuffle(&mut self.rng);
            for (beam, &(a, b)) in self.beams.iter_mut().zip(ratios.iter()) {
                beam.a = a;
                beam.b = b;
            }
            let deltas: Vec<f32> = (0..self.beams.len())
                .map(|_| self.rng.random_range(0.0..TAU))
                .collect();
            for (beam, delta) in self.beams.iter_mut().zip(deltas) {
                beam.delta = delta;
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        for y in 0..self.h as usize {
            for x in 0..self.w as usize {
                let v = self.phosphor[y * self.w as usize + x];
                if v <= 0.05 {
                    continue;
                }
                let ch = if v > 0.8 {
                    '\u{2588}'
                } else if v > 0.5 {
                    '#'
                } else if v > 0.3 {
                    '*'
                } else if v > 0.15 {
                    '+'
                } else {
                    '.'
                };
                let shade = ((v * 9.0) as u8).min(9);
                let style = Style::GreenShade(shade);
                let cell = if v > 0.6 {
                    Cell::bold(ch, style)
                } else {
                    Cell::new(ch, style)
                };
                frame.set(x as i32, y as i32, cell);
            }
        }
    }
}
