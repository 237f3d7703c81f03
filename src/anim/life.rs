// Copyright (c) 2026 rezky_nightky

use rand::rngs::StdRng;
use rand::Rng;

use crate::cell::{Cell, Style};
use crate::frame::Frame;

use super::Animation;

/// Conway's Game of Life on a toroidal grid. The age grid counts
/// consecutive live generations per cell and drives the color ramp.
pub struct GameOfLife {
    h: u16,
    w: u16,
    rng: StdRng,
    grid: Vec<bool>,
    age: Vec<u16>,
}

impl GameOfLife {
    pub fn new(h: u16, w: u16, rng: StdRng) -> Self {
        let mut s = Self {
            h,
            w,
            rng,
            grid: Vec::new(),
            age: Vec::new(),
        };
        s.reset();
        s
    }

    fn idx(&self, y: usize, x: usize) -> usize {
        y * self.w as usize + x
    }

    fn live_neighbors(&self, y: usize, x: usize) -> u8 {
        let h = self.h as i32;
        let w = self.w as i32;
        let mut n = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dy == 0 && dx == 0 {
                    continue;
                }
                let ny = (y as i32 + dy).rem_euclid(h) as usize;
                let nx = (x as i32 + dx).rem_euclid(w) as usize;
                if self.grid[self.idx(ny, nx)] {
                    n += 1;
                }
            }
        }
        n
    }
}

impl Animation for GameOfLife {
    fn name(&self) -> &'static str {
        "Game of Life"
    }

    fn reset(&mut self) {
        let len = self.h as usize * self.w as usize;
        self.grid = (0..len).map(|_| self.rng.random_bool(0.3)).collect();
        self.age = vec![0; len];
    }

    fn resize(&mut self, h: u16, w: u16) {
        self.h = h;
        self.w = w;
        self.reset();
    }

    fn update(&mut self) {
        if self.h == 0 || self.w == 0 {
            return;
        }
        let mut next = vec![false; self.grid.len()];
        for y in 0..self.h as usize {
            for x in 0..self.w as usize {
                let i = self.idx(y, x);
                let n = self.live_neighbors(y, x);
                let alive = self.grid[i];
                let lives = if alive { n == 2 || n == 3 } else { n == 3 };
                next[i] = lives;
                self.age[i] = if lives {
                    if alive {
                        self.age[i].saturating_add(1)
                    } else {
                        1
                    }
                } else {
                    0
                };
            }
        }
        self.grid = next;
    }

    fn draw(&mut self, frame: &mut Frame) {
        for y in 0..self.h as usize {
            for x in 0..self.w as usize {
                let i = self.idx(y, x);
                if self.grid[i] {
                    let shade = self.age[i].min(29) as u8;
                    frame.set(x as i32, y as i32, Cell::new('\u{2588}', Style::Rainbow(shade)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn empty_board(h: u16, w: u16) -> GameOfLife {
        let mut life = GameOfLife::new(h, w, StdRng::seed_from_u64(8));
        life.grid.fill(false);
        life.age.fill(0);
        life
    }

    fn live_cells(life: &GameOfLife) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for y in 0..life.h as usize {
            for x in 0..life.w as usize {
                if life.grid[life.idx(y, x)] {
                    out.push((y, x));
                }
            }
        }
        out
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let mut life = empty_board(5, 5);
        for x in 1..=3 {
            let i = life.idx(2, x);
            life.grid[i] = true;
        }
        let horizontal = live_cells(&life);

        life.update();
        assert_eq!(live_cells(&life), vec![(1, 2), (2, 2), (3, 2)]);

        life.update();
        assert_eq!(live_cells(&life), horizontal);
    }

    #[test]
    fn age_tracks_consecutive_live_generations() {
        let mut life = empty_board(6, 6);
        // 2x2 block: a still life, so ages keep climbing
        for (y, x) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
            let i = life.idx(y, x);
            life.grid[i] = true;
        }
        for gen in 1..=4u16 {
            life.update();
            for (y, x) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
                assert_eq!(life.age[life.idx(y, x)], gen);
            }
        }
        assert_eq!(life.age[life.idx(0, 0)], 0);
    }

    #[test]
    fn neighbor_count_wraps_toroidally() {
        let mut life = empty_board(4, 4);
        for (y, x) in [(0, 0), (0, 3), (3, 0)] {
            let i = life.idx(y, x);
            life.grid[i] = true;
        }
        // the three corners are mutual neighbors across the wrap, so
        // the fourth corner is born
        life.update();
        assert!(life.grid[life.idx(3, 3)]);
    }

    #[test]
    fn zero_geometry_updates_are_no_ops() {
        let mut life = GameOfLife::new(0, 0, StdRng::seed_from_u64(9));
        life.update();
        let mut frame = Frame::new(0, 0);
        life.draw(&mut frame);
    }
}
