// Copyright (c) 2026 rezky_nightky

use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::Rng;

use crate::cell::{Cell, Style};
use crate::frame::Frame;

use super::Animation;

const GRAVITY: f32 = 0.08;
const DRAG: f32 = 0.98;

#[derive(Clone, Copy, Debug)]
struct Rocket {
    x: f32,
    y: f32,
    vy: f32,
    target_y: f32,
}

#[derive(Clone, Copy, Debug)]
struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    life: i32,
    color: u8,
}

pub struct Fireworks {
    h: u16,
    w: u16,
    rng: StdRng,
    rockets: Vec<Rocket>,
    particles: Vec<Particle>,
    tick: u32,
}

impl Fireworks {
    pub fn new(h: u16, w: u16, rng: StdRng) -> Self {
        Self {
            h,
            w,
            rng,
            rockets: Vec::new(),
            particles: Vec::new(),
            tick: 0,
        }
    }

    fn explode(&mut self, x: f32, y: f32) {
        let color = self.rng.random_range(0..10u8);
        let count = self.rng.random_range(20..=40);
        for _ in 0..count {
            let angle = self.rng.random_range(0.0..TAU);
            let speed = self.rng.random_range(0.5..2.5);
            self.particles.push(Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed - 0.5,
                life: self.rng.random_range(10..=25),
                color,
            });
        }
    }
}

impl Animation for Fireworks {
    fn name(&self) -> &'static str {
        "Fireworks"
    }

    fn reset(&mut self) {
        self.rockets.clear();
        self.particles.clear();
        self.tick = 0;
    }

    fn resize(&mut self, h: u16, w: u16) {
        self.h = h;
        self.w = w;
    }

    fn update(&mut self) {
        self.tick += 1;

        if self.w > 0 && self.h > 1 && (self.tick % 15 == 0 || self.rng.random_bool(0.08)) {
            let w = self.w as f32;
            let h = self.h as f32;
            self.rockets.push(Rocket {
                x: self.rng.random_range(w * 0.1..w * 0.9),
                y: h - 1.0,
                vy: -self.rng.random_range(1.0..2.0),
                target_y: self.rng.random_range(h * 0.1..h * 0.5),
            });
        }

        for r in &mut self.rockets {
            r.y += r.vy;
        }
        let mut i = 0;
        while i < self.rockets.len() {
            if self.rockets[i].y <= self.rockets[i].target_y {
                let r = self.rockets.swap_remove(i);
                self.explode(r.x, r.y);
            } else {
                i += 1;
            }
        }

        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += GRAVITY;
            p.vx *= DRAG;
            p.life -= 1;
        }
        self.particles.retain(|p| p.life > 0);
    }

    fn draw(&mut self, frame: &mut Frame) {
        for r in &self.rockets {
            let (x, y) = (r.x as i32, r.y as i32);
            if y >= 0 && y < self.h as i32 && x >= 0 && x < self.w as i32 {
                frame.set(x, y, Cell::bold('|', Style::White));
            }
        }
        for p in &self.particles {
            let (x, y) = (p.x as i32, p.y as i32);
            if y < 0 || y >= self.h as i32 || x < 0 || x >= self.w as i32 {
                continue;
            }
            let cell = if p.life > 15 {
                Cell::bold('*', Style::Burst(p.color))
            } else if p.life > 8 {
                Cell::new('+', Style::Burst(p.color))
            } else {
                Cell::new('.', Style::Burst(p.color))
            };
            frame.set(x, y, cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn explosion_spawns_between_20_and_40_particles() {
        for seed in 0..20 {
            let mut fw = Fireworks::new(30, 80, StdRng::seed_from_u64(seed));
            fw.explode(40.0, 10.0);
            assert!((20..=40).contains(&fw.particles.len()));
        }
    }

    #[test]
    fn particle_life_decays_to_removal() {
        // Zero geometry keeps the launcher quiet so only the manually
        // spawned burst is in play.
        let mut fw = Fireworks::new(0, 0, StdRng::seed_from_u64(6));
        fw.explode(40.0, 10.0);
        let mut prev: Vec<i32> = fw.particles.iter().map(|p| p.life).collect();
        for _ in 0..30 {
            fw.update();
            let mut expect: Vec<i32> = prev.iter().map(|l| l - 1).filter(|l| *l > 0).collect();
            let mut got: Vec<i32> = fw.particles.iter().map(|p| p.life).collect();
            expect.sort_unstable();
            got.sort_unstable();
            assert_eq!(got, expect);
            prev = got;
        }
        assert!(fw.particles.is_empty());
    }

    #[test]
    fn rockets_explode_at_target_altitude() {
        let mut fw = Fireworks::new(40, 80, StdRng::seed_from_u64(7));
        for _ in 0..200 {
            fw.update();
            for r in &fw.rockets {
                assert!(r.y > r.target_y);
            }
        }
        assert!(!fw.particles.is_empty() || !fw.rockets.is_empty());
    }
}
