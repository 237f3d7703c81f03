// Copyright (c) 2026 rezky_nightky

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::frame::Frame;

mod fireworks;
mod life;
mod lissajous;
mod matrix_rain;
mod maze;
mod plasma;
mod ripples;
mod spirograph;
mod starfield;
mod voronoi;

use fireworks::Fireworks;
use life::GameOfLife;
use lissajous::LissajousWeaver;
use matrix_rain::MatrixRain;
use maze::MazeGenerator;
use plasma::PlasmaWaves;
use ripples::RaindropRipples;
use spirograph::Spirograph;
use starfield::Starfield;
use voronoi::VoronoiLandscape;

/// One procedural animation. Implementations own all of their state and
/// never signal errors: zero-sized geometry yields empty frames, and
/// writes that would land outside the frame are dropped by the frame
/// itself or by the per-variant bounds checks.
pub trait Animation {
    fn name(&self) -> &'static str;

    /// Re-rolls internal state from the variant's own random stream.
    /// Geometry is untouched.
    fn reset(&mut self);

    /// Adopts new geometry. Grid-shaped variants rebuild from scratch;
    /// continuous-field variants keep their entities and use the new
    /// bounds from the next frame on.
    fn resize(&mut self, h: u16, w: u16);

    /// Advances one tick. Time is discrete; no wall-clock deltas.
    fn update(&mut self);

    fn draw(&mut self, frame: &mut Frame);
}

/// Builds the full animation roster with independent random streams
/// split off the master generator.
pub fn roster(h: u16, w: u16, master: &mut StdRng) -> Vec<Box<dyn Animation>> {
    vec![
        Box::new(MatrixRain::new(h, w, StdRng::from_rng(master))),
        Box::new(Starfield::new(h, w, StdRng::from_rng(master))),
        Box::new(Fireworks::new(h, w, StdRng::from_rng(master))),
        Box::new(GameOfLife::new(h, w, StdRng::from_rng(master))),
        Box::new(PlasmaWaves::new(h, w)),
        Box::new(MazeGenerator::new(h, w, StdRng::from_rng(master))),
        Box::new(Spirograph::new(h, w, StdRng::from_rng(master))),
        Box::new(RaindropRipples::new(h, w, StdRng::from_rng(master))),
        Box::new(LissajousWeaver::new(h, w, StdRng::from_rng(master))),
        Box::new(VoronoiLandscape::new(h, w, StdRng::from_rng(master))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    fn full_roster() -> Vec<Box<dyn Animation>> {
        let mut master = StdRng::seed_from_u64(7);
        roster(12, 30, &mut master)
    }

    #[test]
    fn roster_has_ten_distinct_names() {
        let anims = full_roster();
        assert_eq!(anims.len(), 10);
        let mut names: Vec<_> = anims.iter().map(|a| a.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn reset_twice_is_valid_for_every_variant() {
        let mut anims = full_roster();
        let mut frame = Frame::new(30, 13);
        for a in &mut anims {
            a.reset();
            a.reset();
            for _ in 0..5 {
                a.update();
            }
            a.draw(&mut frame);
        }
    }

    #[test]
    fn draw_after_resize_stays_inside_declared_bounds() {
        // The frame is one row taller and two columns wider than the
        // area handed to the animations; that margin must stay blank.
        let mut anims = full_roster();
        for a in &mut anims {
            a.resize(10, 20);
            let mut frame = Frame::new(22, 11);
            for _ in 0..40 {
                a.update();
                frame.clear();
                a.draw(&mut frame);
            }
            for x in 0..22 {
                assert_eq!(*frame.get(x, 10).unwrap(), Cell::BLANK, "{}", a.name());
            }
            for y in 0..11 {
                assert_eq!(*frame.get(20, y).unwrap(), Cell::BLANK, "{}", a.name());
                assert_eq!(*frame.get(21, y).unwrap(), Cell::BLANK, "{}", a.name());
            }
        }
    }

    #[test]
    fn zero_geometry_degrades_to_empty_frames() {
        let mut master = StdRng::seed_from_u64(3);
        let mut anims = roster(0, 0, &mut master);
        let mut frame = Frame::new(0, 0);
        for a in &mut anims {
            for _ in 0..10 {
                a.update();
            }
            a.draw(&mut frame);
            a.reset();
            a.resize(0, 0);
            a.update();
            a.draw(&mut frame);
        }
    }
}
