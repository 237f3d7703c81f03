// Copyright (c) 2026 rezky_nightky

use rand::rngs::StdRng;
use rand::Rng;

use crate::cell::{Cell, Style};
use crate::frame::Frame;

use super::Animation;

const GRADIENT: &[u8] = b" .:-=+*#%@";
const MAX_RIPPLES: usize = 10;
const GROWTH_PER_TICK: f32 = 0.8;
const RING_WIDTH: f32 = 2.5;

#[derive(Clone, Copy, Debug)]
struct Ripple {
    cx: f32,
    cy: f32,
    radius: f32,
    max_radius: f32,
}

pub struct RaindropRipples {
    h: u16,
    w: u16,
    rng: StdRng,
    ripples: Vec<Ripple>,
}

impl RaindropRipples {
    pub fn new(h: u16, w: u16, rng: StdRng) -> Self {
        Self {
            h,
            w,
            rng,
            ripples: Vec::new(),
        }
    }

    fn intensity_at(&self, x: f32, y: f32) -> f32 {
        let mut intensity = 0.0;
        for r in &self.ripples {
            let dx = x - r.cx;
            // vertical distance doubled to counter cell aspect
            let dy = (y - r.cy) * 2.0;
            let dist = (dx * dx + dy * dy).sqrt();
            let ring = (1.0 - (dist - r.radius).abs() / RING_WIDTH).max(0.0);
            let fade = (1.0 - r.radius / r.max_radius).max(0.0);
            intensity += ring * fade;
        }
        intensity
    }
}

impl Animation for RaindropRipples {
    fn name(&self) -> &'static str {
        "Raindrop Ripples"
    }

    fn reset(&mut self) {
        self.ripples.clear();
    }

    fn resize(&mut self, h: u16, w: u16) {
        self.h = h;
        self.w = w;
    }

    fn update(&mut self) {
        for r in &mut self.ripples {
            r.radius += GROWTH_PER_TICK;
        }
        self.ripples.retain(|r| r.radius < r.max_radius);

        if self.w > 0 && self.h > 0 && self.ripples.len() < MAX_RIPPLES && self.rng.random_bool(0.1)
        {
            let short = self.h.min(self.w) as f32;
            let long = self.h.max(self.w) as f32;
            let r = Ripple {
                cx: self.rng.random_range(0.0..self.w as f32),
                cy: self.rng.random_range(0.0..self.h as f32),
                radius: 0.0,
                max_radius: self.rng.random_range(short * 0.5..long * 1.2),
            };
            self.ripples.push(r);
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        if self.ripples.is_empty() {
            return;
        }
        for y in 0..self.h {
            for x in 0..self.w {
                let intensity = self.intensity_at(x as f32, y as f32).min(1.0);
                if intensity <= 0.05 {
                    continue;
                }
                let ci = (intensity * (GRADIENT.len() - 1) as f32) as usize;
                let ch = GRADIENT[ci.min(GRADIENT.len() - 1)] as char;
                // cool end of the wheel, brightest at the ring crest
                let shade = 15 + ((1.0 - intensity) * 14.0) as u8;
                let style = Style::Rainbow(shade.min(29));
                let cell = if intensity > 0.7 {
                    Cell::bold(ch, style)
                } else {
                    Cell::new(ch, style)
                };
                frame.set(x as i32, y as i32, cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn ripple_count_is_capped() {
        let mut rain = RaindropRipples::new(24, 80, StdRng::seed_from_u64(17));
        for _ in 0..2000 {
            rain.update();
            assert!(rain.ripples.len() <= MAX_RIPPLES);
        }
    }

    #[test]
    fn ripples_are_removed_exactly_at_max_radius() {
        // zero geometry keeps the spawner quiet
        let mut rain = RaindropRipples::new(0, 0, StdRng::seed_from_u64(18));
        rain.ripples.push(Ripple {
            cx: 10.0,
            cy: 10.0,
            radius: 0.0,
            max_radius: 4.0,
        });
        for expected in [0.8f32, 1.6, 2.4, 3.2] {
            rain.update();
            assert_eq!(rain.ripples.len(), 1);
            assert!((rain.ripples[0].radius - expected).abs() < 1e-4);
        }
        rain.update();
        assert!(rain.ripples.is_empty());
    }

    #[test]
    fn intensity_peaks_on_the_ring() {
        let mut rain = RaindropRipples::new(0, 0, StdRng::seed_from_u64(19));
        rain.ripples.push(Ripple {
            cx: 0.0,
            cy: 0.0,
            radius: 5.0,
            max_radius: 100.0,
        });
        let on_ring = rain.intensity_at(5.0, 0.0);
        let off_ring = rain.intensity_at(20.0, 0.0);
        assert!(on_ring > 0.9);
        assert!(off_ring == 0.0);
    }
}
