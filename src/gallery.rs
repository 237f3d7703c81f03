// Copyright (c) 2026 rezky_nightky

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::anim::{self, Animation};
use crate::cell::{Cell, Style};
use crate::frame::Frame;
use crate::geometry::Geometry;

const CONTROLS_HINT: &str = " \u{2190}/\u{2192}:switch  1-0:jump  Space:pause  r:reset  q:quit ";

/// Control actions decoded from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Next,
    Prev,
    Jump(usize),
    TogglePause,
    ResetCurrent,
}

/// Owns the animation roster and routes control and geometry events.
/// Exactly one animation is active; the rest stay frozen until they
/// are selected again.
pub struct Gallery {
    anims: Vec<Box<dyn Animation>>,
    geom: Geometry,
    current: usize,
    paused: bool,
    running: bool,
}

impl Gallery {
    pub fn new(geom: Geometry, seed: u64) -> Self {
        let mut master = StdRng::seed_from_u64(seed);
        let anims = anim::roster(geom.art_height(), geom.width, &mut master);
        Self {
            anims,
            geom,
            current: 0,
            paused: false,
            running: true,
        }
    }

    pub fn len(&self) -> usize {
        self.anims.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_name(&self) -> &'static str {
        self.anims[self.current].name()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Next => self.current = (self.current + 1) % self.anims.len(),
            Action::Prev => {
                self.current = (self.current + self.anims.len() - 1) % self.anims.len()
            }
            Action::Jump(i) => {
                if i < self.anims.len() {
                    self.current = i;
                }
            }
            Action::TogglePause => self.paused = !self.paused,
            Action::ResetCurrent => self.anims[self.current].reset(),
        }
    }

    /// Broadcasts new geometry to every animation, the inactive ones
    /// included, so switching mid-resize stays consistent.
    pub fn resize(&mut self, geom: Geometry) {
        self.geom = geom;
        for a in &mut self.anims {
            a.resize(geom.art_height(), geom.width);
        }
    }

    /// Advances the active animation by one tick unless paused.
    pub fn tick(&mut self) {
        if !self.paused {
            self.anims[self.current].update();
        }
    }

    /// Clears the frame, draws the active animation and the status bar.
    pub fn render(&mut self, frame: &mut Frame) {
        frame.clear();
        self.anims[self.current].draw(frame);
        self.draw_status(frame);
    }

    fn draw_status(&self, frame: &mut Frame) {
        if self.geom.height == 0 || self.geom.width == 0 {
            return;
        }
        let mut bar = format!(
            " [{}/{}] {}",
            self.current + 1,
            self.anims.len(),
            self.current_name()
        );
        if self.paused {
            bar.push_str("  [PAUSED]");
        }

        let width = self.geom.width as usize;
        let bar_len = bar.chars().count();
        let hint_len = CONTROLS_HINT.chars().count();
        let mut line: Vec<char> = bar.chars().collect();
        if bar_len + hint_len < width {
            line.extend(std::iter::repeat(' ').take(width - bar_len - hint_len));
            line.extend(CONTROLS_HINT.chars());
        }
        line.truncate(width);
        while line.len() < width {
            line.push(' ');
        }

        let y = (self.geom.height - 1) as i32;
        for (x, ch) in line.into_iter().enumerate() {
            frame.set(x as i32, y, Cell::new(ch, Style::StatusBar));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> Gallery {
        Gallery::new(Geometry::new(40, 13), 99)
    }

    #[test]
    fn next_wraps_back_to_the_start() {
        let mut g = gallery();
        let n = g.len();
        for _ in 0..n {
            g.apply(Action::Next);
        }
        assert_eq!(g.current_index(), 0);
    }

    #[test]
    fn prev_from_zero_wraps_to_the_end() {
        let mut g = gallery();
        g.apply(Action::Prev);
        assert_eq!(g.current_index(), g.len() - 1);
    }

    #[test]
    fn out_of_range_jump_is_rejected() {
        let mut g = gallery();
        g.apply(Action::Jump(3));
        assert_eq!(g.current_index(), 3);
        g.apply(Action::Jump(99));
        assert_eq!(g.current_index(), 3);
        g.apply(Action::Jump(g.len()));
        assert_eq!(g.current_index(), 3);
    }

    #[test]
    fn pause_gates_updates_but_not_rendering() {
        let mut g = gallery();
        // plasma's clock only moves when unpaused
        g.apply(Action::Jump(4));
        g.apply(Action::TogglePause);
        assert!(g.is_paused());
        let mut a = Frame::new(40, 13);
        let mut b = Frame::new(40, 13);
        g.tick();
        g.render(&mut a);
        g.tick();
        g.render(&mut b);
        assert_eq!(a.cells(), b.cells());

        g.apply(Action::TogglePause);
        for _ in 0..10 {
            g.tick();
        }
        let mut c = Frame::new(40, 13);
        g.render(&mut c);
        assert_ne!(b.cells(), c.cells());
    }

    #[test]
    fn quit_stops_the_loop_flag() {
        let mut g = gallery();
        assert!(g.is_running());
        g.apply(Action::Quit);
        assert!(!g.is_running());
    }

    #[test]
    fn resize_reaches_inactive_variants() {
        let mut g = gallery();
        g.resize(Geometry::new(20, 7));
        // switching after the resize must not draw outside the new
        // bounds for any variant
        let mut frame = Frame::new(30, 12);
        for i in 0..g.len() {
            g.apply(Action::Jump(i));
            for _ in 0..30 {
                g.tick();
            }
            frame.clear();
            g.anims[g.current].draw(&mut frame);
            for y in 0..12 {
                for x in 0..30 {
                    if y >= 6 || x >= 20 {
                        assert_eq!(*frame.get(x, y).unwrap(), Cell::BLANK);
                    }
                }
            }
        }
    }

    #[test]
    fn animations_never_write_the_status_row() {
        let mut g = gallery();
        let mut frame = Frame::new(40, 13);
        for i in 0..g.len() {
            g.apply(Action::Jump(i));
            for _ in 0..50 {
                g.tick();
                g.render(&mut frame);
            }
            for x in 0..40 {
                let c = frame.get(x, 12).unwrap();
                assert_eq!(c.style, Style::StatusBar);
            }
        }
    }

    #[test]
    fn same_seed_replays_identically() {
        let mut a = Gallery::new(Geometry::new(32, 11), 1234);
        let mut b = Gallery::new(Geometry::new(32, 11), 1234);
        let mut fa = Frame::new(32, 11);
        let mut fb = Frame::new(32, 11);
        for i in 0..a.len() {
            a.apply(Action::Jump(i));
            b.apply(Action::Jump(i));
            for _ in 0..20 {
                a.tick();
                b.tick();
                a.render(&mut fa);
                b.render(&mut fb);
                assert_eq!(fa.cells(), fb.cells());
            }
        }
    }

    #[test]
    fn reset_only_touches_the_active_variant() {
        let mut g = gallery();
        // park the maze (index 5) in a known mid-carve state
        g.apply(Action::Jump(5));
        for _ in 0..3 {
            g.tick();
        }
        // switch away, reset the plasma clock, switch back: the maze
        // must resume from its frozen state, not restart
        g.apply(Action::Jump(4));
        g.apply(Action::ResetCurrent);
        g.apply(Action::Jump(5));
        let mut frame = Frame::new(40, 13);
        g.render(&mut frame);
        // a freshly reset maze shows a single open cell; a mid-carve
        // one has accumulated many
        let open: usize = (0..12)
            .map(|y| {
                (0..40)
                    .filter(|&x| frame.get(x, y).unwrap().ch != '\u{2588}')
                    .count()
            })
            .sum();
        assert!(open >= 5, "maze should resume mid-carve, found {open}");
    }
}
