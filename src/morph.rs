//! Shape morphing of the shared position buffer.
//!
//! A morph snapshots the buffer once when it starts, then every frame writes
//! `from[i] + (to[i] - from[i]) * ease(t)` back into the same buffer. There is
//! a single morph slot: starting a new morph replaces the in-flight one, and
//! the new snapshot is taken from wherever the particles are at that moment.

use crate::easing::Easing;
use crate::shapes::{Shape, ShapeTarget};
use crate::tween::Tween;
use glam::Vec3;

/// Default morph duration in milliseconds.
pub const MORPH_DURATION_MS: f32 = 1500.0;

/// An in-flight morph.
#[derive(Clone, Debug)]
pub struct Morph {
    from: Vec<Vec3>,
    to: Vec<Vec3>,
    shape: Shape,
    tween: Tween,
}

impl Morph {
    /// Snapshot `current` and prepare to interpolate toward `target`.
    pub fn new(current: &[Vec3], target: ShapeTarget, duration_ms: f32, easing: Easing) -> Self {
        let shape = target.shape();
        Self {
            from: current.to_vec(),
            to: target.into_positions(),
            shape,
            tween: Tween::new(duration_ms, easing),
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.tween.progress()
    }

    /// Write the buffer state for eased progress `e` into `positions`.
    ///
    /// Index-paired: only the common prefix of snapshot, target and buffer is
    /// touched.
    pub fn sample_into(&self, e: f32, positions: &mut [Vec3]) {
        for ((p, from), to) in positions.iter_mut().zip(&self.from).zip(&self.to) {
            *p = *from + (*to - *from) * e;
        }
    }

    /// Advance by `dt_ms`, write the new state, and report whether the morph
    /// has reached its target.
    pub fn advance(&mut self, dt_ms: f32, positions: &mut [Vec3]) -> bool {
        let e = self.tween.advance(dt_ms);
        self.sample_into(e, positions);
        self.tween.is_finished()
    }
}

/// Owner of the single morph slot.
#[derive(Clone, Debug, Default)]
pub struct MorphEngine {
    active: Option<Morph>,
}

impl MorphEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start morphing `positions` toward `target`, superseding any morph that
    /// is still in flight.
    pub fn start(&mut self, positions: &[Vec3], target: ShapeTarget, duration_ms: f32, easing: Easing) {
        if let Some(previous) = &self.active {
            tracing::debug!(
                from = %previous.shape(),
                to = %target.shape(),
                "superseding in-flight morph"
            );
        }
        self.active = Some(Morph::new(positions, target, duration_ms, easing));
    }

    /// Advance the active morph, if any. Finished morphs release their slot.
    pub fn advance(&mut self, dt_ms: f32, positions: &mut [Vec3]) {
        if let Some(morph) = &mut self.active {
            if morph.advance(dt_ms, positions) {
                self.active = None;
            }
        }
    }

    /// Drop the in-flight morph, leaving the buffer where it is.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&Morph> {
        self.active.as_ref()
    }
}
