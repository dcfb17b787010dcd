//! The digital floor: a scrolling grid with perspective streaks beneath the cloud.

use crate::sampling::SampleExt;
use glam::Vec3;
use rand::Rng;

/// Grid edge length.
pub const GRID_SIZE: f32 = 2000.0;
/// Cells per grid edge.
pub const GRID_DIVISIONS: usize = 60;
/// Height of the floor plane.
pub const FLOOR_Y: f32 = -80.0;
/// Candidate streak count; streaks too close to the center are skipped.
const STREAK_CANDIDATES: usize = 100;

/// A line segment on the floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
}

/// Grid plus streaks; only the grid scrolls.
#[derive(Clone, Debug)]
pub struct Floor {
    streaks: Vec<Segment>,
    /// Scroll offset of the grid along Z.
    pub offset_z: f32,
}

impl Floor {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let streaks = (0..STREAK_CANDIDATES)
            .filter_map(|_| {
                let x = rng.centered() * 1000.0;
                (x.abs() > 50.0).then(|| Segment {
                    start: Vec3::new(x, FLOOR_Y, -1000.0),
                    end: Vec3::new(x * 1.5, FLOOR_Y, 500.0),
                })
            })
            .collect();
        Self {
            streaks,
            offset_z: 0.0,
        }
    }

    /// Turbo scroll: advance by `distance`, snapping back once past 100.
    pub fn rush(&mut self, distance: f32) {
        self.offset_z += distance;
        if self.offset_z > 100.0 {
            self.offset_z = 0.0;
        }
    }

    /// Idle scroll, a pure function of wall-clock milliseconds.
    pub fn drift(&mut self, clock_ms: f64) {
        self.offset_z = ((clock_ms * 0.05) % 50.0) as f32;
    }

    pub fn streaks(&self) -> &[Segment] {
        &self.streaks
    }

    /// Grid lines (both directions) in world space, including the scroll offset.
    pub fn grid_lines(&self) -> impl Iterator<Item = Segment> + '_ {
        let half = GRID_SIZE / 2.0;
        let step = GRID_SIZE / GRID_DIVISIONS as f32;
        let z = self.offset_z;
        (0..=GRID_DIVISIONS).flat_map(move |k| {
            let d = -half + k as f32 * step;
            [
                Segment {
                    start: Vec3::new(-half, FLOOR_Y, d + z),
                    end: Vec3::new(half, FLOOR_Y, d + z),
                },
                Segment {
                    start: Vec3::new(d, FLOOR_Y, -half + z),
                    end: Vec3::new(d, FLOOR_Y, half + z),
                },
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_streaks_avoid_center() {
        let floor = Floor::new(&mut StdRng::seed_from_u64(9));
        assert!(!floor.streaks().is_empty());
        assert!(floor.streaks().len() <= STREAK_CANDIDATES);
        for s in floor.streaks() {
            assert!(s.start.x.abs() > 50.0);
            assert_eq!(s.start.y, FLOOR_Y);
        }
    }

    #[test]
    fn test_rush_wraps() {
        let mut floor = Floor::new(&mut StdRng::seed_from_u64(1));
        floor.rush(60.0);
        assert_eq!(floor.offset_z, 60.0);
        floor.rush(60.0);
        assert_eq!(floor.offset_z, 0.0);
    }

    #[test]
    fn test_drift_range() {
        let mut floor = Floor::new(&mut StdRng::seed_from_u64(1));
        for ms in [0.0, 999.0, 12_345.6, 1e9] {
            floor.drift(ms);
            assert!((0.0..50.0).contains(&floor.offset_z));
        }
    }

    #[test]
    fn test_grid_line_count() {
        let floor = Floor::new(&mut StdRng::seed_from_u64(1));
        assert_eq!(floor.grid_lines().count(), (GRID_DIVISIONS + 1) * 2);
    }
}
