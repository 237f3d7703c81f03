// Copyright (c) 2026 rezky_nightky

use rand::rngs::StdRng;
use rand::Rng;

use crate::cell::{Cell, Style};
use crate::frame::Frame;

use super::Animation;

const DONE_HOLD_TICKS: u16 = 80;
const WALL_SHADE: u8 = 15;

/// Recursive-backtracker maze carving, animated. Cells live on odd
/// coordinates; even coordinates are carvable walls. Carving is capped
/// per tick so large viewports stay within frame budget.
pub struct MazeGenerator {
    h: u16,
    w: u16,
    rng: StdRng,
    mh: u16,
    mw: u16,
    walls: Vec<bool>,
    visited: Vec<bool>,
    stack: Vec<(u16, u16)>,
    done: bool,
    done_tick: u16,
}

impl MazeGenerator {
    pub fn new(h: u16, w: u16, rng: StdRng) -> Self {
        let mut s = Self {
            h,
            w,
            rng,
            mh: 0,
            mw: 0,
            walls: Vec::new(),
            visited: Vec::new(),
            stack: Vec::new(),
            done: false,
            done_tick: 0,
        };
        s.reset();
        s
    }

    fn idx(&self, y: u16, x: u16) -> usize {
        y as usize * self.mw as usize + x as usize
    }

    fn unvisited_neighbors(&self, y: u16, x: u16) -> [(u16, u16); 4] {
        // unused slots stay at the u16::MAX sentinel
        let mut out = [(u16::MAX, u16::MAX); 4];
        let mut n = 0;
        let candidates = [
            (y.wrapping_sub(2), x),
            (y + 2, x),
            (y, x.wrapping_sub(2)),
            (y, x + 2),
        ];
        for (ny, nx) in candidates {
            if ny >= 1
                && ny < self.mh.saturating_sub(1)
                && nx >= 1
                && nx < self.mw.saturating_sub(1)
                && !self.visited[self.idx(ny, nx)]
            {
                out[n] = (ny, nx);
                n += 1;
            }
        }
        out
    }

    fn carve_step(&mut self) {
        let Some(&(cy, cx)) = self.stack.last() else {
            self.done = true;
            return;
        };
        let nbrs = self.unvisited_neighbors(cy, cx);
        let count = nbrs.iter().filter(|&&(y, _)| y != u16::MAX).count();
        if count == 0 {
            self.stack.pop();
            return;
        }
        let (ny, nx) = nbrs[self.rng.random_range(0..count)];
        let (wy, wx) = ((cy + ny) / 2, (cx + nx) / 2);
        let wall = self.idx(wy, wx);
        self.walls[wall] = false;
        let cell = self.idx(ny, nx);
        self.walls[cell] = false;
        self.visited[cell] = true;
        self.stack.push((ny, nx));
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl Animation for MazeGenerator {
    fn name(&self) -> &'static str {
        "Maze Generator"
    }

    fn reset(&mut self) {
        self.mh = (self.h / 2) * 2 + 1;
        self.mw = (self.w / 2) * 2 + 1;
        let len = self.mh as usize * self.mw as usize;
        self.walls = vec![true; len];
        self.visited = vec![false; len];
        self.stack.clear();
        self.done = false;
        self.done_tick = 0;

        let (sy, sx) = (1u16, 1u16);
        if sy < self.mh && sx < self.mw {
            let i = self.idx(sy, sx);
            self.walls[i] = false;
            self.visited[i] = true;
            self.stack.push((sy, sx));
        }
    }

    fn resize(&mut self, h: u16, w: u16) {
        self.h = h;
        self.w = w;
        self.reset();
    }

    fn update(&mut self) {
        if self.done {
            self.done_tick += 1;
            if self.done_tick > DONE_HOLD_TICKS {
                self.reset();
            }
            return;
        }
        let steps = ((self.mh as usize * self.mw as usize) / 200).max(1);
        for _ in 0..steps {
            if self.done {
                return;
            }
            self.carve_step();
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let head = self.stack.last().copied();
        for y in 0..self.mh.min(self.h) {
            for x in 0..self.mw.min(self.w) {
                if self.walls[self.idx(y, x)] {
                    frame.set(
                        x as i32,
                        y as i32,
                        Cell::new('\u{2588}', Style::Rainbow(WALL_SHADE)),
                    );
                } else if head == Some((y, x)) {
                    frame.set(x as i32, y as i32, Cell::bold('\u{00b7}', Style::White));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn run_to_done(maze: &mut MazeGenerator, max_ticks: u32) -> Option<u32> {
        for t in 0..max_ticks {
            if maze.done {
                return Some(t);
            }
            maze.update();
        }
        None
    }

    /// Flood-fills the passage graph from the start cell and counts
    /// reachable cells and passage-adjacency edges.
    fn passage_graph(maze: &MazeGenerator) -> (usize, usize, usize) {
        let mut cells = 0;
        let mut edges = 0;
        for y in (1..maze.mh).step_by(2) {
            for x in (1..maze.mw).step_by(2) {
                if !maze.walls[maze.idx(y, x)] {
                    cells += 1;
                    if x + 2 < maze.mw && !maze.walls[maze.idx(y, x + 1)] {
                        edges += 1;
                    }
                    if y + 2 < maze.mh && !maze.walls[maze.idx(y + 1, x)] {
                        edges += 1;
                    }
                }
            }
        }

        let mut seen = vec![false; maze.walls.len()];
        let mut reached = 0;
        let mut queue = vec![(1u16, 1u16)];
        seen[maze.idx(1, 1)] = true;
        while let Some((y, x)) = queue.pop() {
            reached += 1;
            let steps = [
                (y.wrapping_sub(2), x, y.wrapping_sub(1), x),
                (y + 2, x, y + 1, x),
                (y, x.wrapping_sub(2), y, x.wrapping_sub(1)),
                (y, x + 2, y, x + 1),
            ];
            for (ny, nx, wy, wx) in steps {
                if ny < maze.mh
                    && nx < maze.mw
                    && !maze.walls[maze.idx(wy, wx)]
                    && !maze.walls[maze.idx(ny, nx)]
                    && !seen[maze.idx(ny, nx)]
                {
                    seen[maze.idx(ny, nx)] = true;
                    queue.push((ny, nx));
                }
            }
        }
        (cells, edges, reached)
    }

    #[test]
    fn finished_maze_is_a_perfect_maze() {
        let mut maze = MazeGenerator::new(21, 31, StdRng::seed_from_u64(10));
        assert!(run_to_done(&mut maze, 10_000).is_some());
        let (cells, edges, reached) = passage_graph(&maze);
        let expected = (maze.mh as usize / 2) * (maze.mw as usize / 2);
        assert_eq!(cells, expected);
        assert_eq!(reached, cells);
        assert_eq!(edges, cells - 1);
    }

    #[test]
    fn large_viewport_finishes_before_tick_500() {
        let mut maze = MazeGenerator::new(40, 120, StdRng::seed_from_u64(11));
        let done_at = run_to_done(&mut maze, 500);
        assert!(done_at.is_some());
        let (cells, _, reached) = passage_graph(&maze);
        assert_eq!(reached, cells);
        assert_eq!(cells, (maze.mh as usize / 2) * (maze.mw as usize / 2));
    }

    #[test]
    fn done_state_holds_then_restarts() {
        let mut maze = MazeGenerator::new(9, 9, StdRng::seed_from_u64(12));
        run_to_done(&mut maze, 10_000).unwrap();
        for _ in 0..DONE_HOLD_TICKS {
            maze.update();
        }
        assert!(maze.done);
        maze.update();
        assert!(!maze.done);
        assert_eq!(maze.stack.len(), 1);
    }

    #[test]
    fn degenerate_geometry_completes_immediately() {
        let mut maze = MazeGenerator::new(0, 0, StdRng::seed_from_u64(13));
        maze.update();
        assert!(maze.is_done());
        let mut frame = Frame::new(0, 0);
        maze.draw(&mut frame);
    }
}
