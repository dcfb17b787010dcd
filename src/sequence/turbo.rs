//! Turbo: accelerate, explode the cloud, flash a supernova, condense it and
//! restore the shape the cloud had before the sequence started.
//!
//! | Phase | Start | Length | What moves |
//! |-------|------:|-------:|------------|
//! | Accelerating | 0 | 1000 | floor speed 0 → 80 |
//! | Exploding | 1000 | 1500 | particles pushed out 500 units, opacity 1 → 0, warp 0 → 1, bloom 1.2 → 2.5 |
//! | Supernova | 3500 | 2000 | 5000-point burst, radius 0 → 150, opacity 1 → 0.8, bloom 2.5 → 4.0 |
//! | Condensing | 6500 | 1500 | burst scaled 1 → 0, opacity 0.8 → 0, then discarded |
//! | Restoring | 8000 | 2000 | speed 80 → 0, bloom 4.0 → 1.2, opacity 0 → 1, warp 1 → 0, positions back to the snapshot |
//!
//! Every window eases with cubic in/out.

use super::{PhaseWindow, SequenceStatus};
use crate::easing::Easing;
use crate::particles::{Supernova, BLOOM_IDLE};
use crate::scene::Stage;
use crate::tween::Ramp;
use glam::Vec3;
use rand::Rng;
use std::fmt;

/// Peak floor speed, units per reference frame.
pub const TURBO_SPEED: f32 = 80.0;
/// How far the explosion pushes each particle.
pub const EXPLODE_DISTANCE: f32 = 500.0;
/// Radius of the fully expanded supernova.
pub const SUPERNOVA_RADIUS: f32 = 150.0;

const SPEED_UP: Ramp = Ramp::new(0.0, TURBO_SPEED);
const EXPLODE_OPACITY: Ramp = Ramp::new(1.0, 0.0);
const EXPLODE_WARP: Ramp = Ramp::new(0.0, 1.0);
const EXPLODE_BLOOM: Ramp = Ramp::new(BLOOM_IDLE, 2.5);
const NOVA_RADIUS: Ramp = Ramp::new(0.0, SUPERNOVA_RADIUS);
const NOVA_OPACITY: Ramp = Ramp::new(1.0, 0.8);
const NOVA_BLOOM: Ramp = Ramp::new(2.5, 4.0);
const CONDENSE_SCALE: Ramp = Ramp::new(1.0, 0.0);
const CONDENSE_OPACITY: Ramp = Ramp::new(0.8, 0.0);
const RESTORE_SPEED: Ramp = Ramp::new(TURBO_SPEED, 0.0);
const RESTORE_BLOOM: Ramp = Ramp::new(4.0, BLOOM_IDLE);
const RESTORE_OPACITY: Ramp = Ramp::new(0.0, 1.0);
const RESTORE_WARP: Ramp = Ramp::new(1.0, 0.0);

/// Where the turbo sequence is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TurboPhase {
    #[default]
    Idle,
    Accelerating,
    Exploding,
    Supernova,
    Condensing,
    Restoring,
}

impl TurboPhase {
    /// The active phases in timeline order.
    pub const TIMELINE: [TurboPhase; 5] = [
        TurboPhase::Accelerating,
        TurboPhase::Exploding,
        TurboPhase::Supernova,
        TurboPhase::Condensing,
        TurboPhase::Restoring,
    ];

    /// Timeline slot of the phase; `None` for [`TurboPhase::Idle`].
    pub fn window(self) -> Option<PhaseWindow> {
        let ease = Easing::CubicInOut;
        match self {
            TurboPhase::Idle => None,
            TurboPhase::Accelerating => Some(PhaseWindow::new(0.0, 1000.0, ease)),
            TurboPhase::Exploding => Some(PhaseWindow::new(1000.0, 1500.0, ease)),
            TurboPhase::Supernova => Some(PhaseWindow::new(3500.0, 2000.0, ease)),
            TurboPhase::Condensing => Some(PhaseWindow::new(6500.0, 1500.0, ease)),
            TurboPhase::Restoring => Some(PhaseWindow::new(8000.0, 2000.0, ease)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TurboPhase::Idle => "idle",
            TurboPhase::Accelerating => "accelerating",
            TurboPhase::Exploding => "exploding",
            TurboPhase::Supernova => "supernova",
            TurboPhase::Condensing => "condensing",
            TurboPhase::Restoring => "restoring",
        }
    }
}

impl fmt::Display for TurboPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Total length of an uninterrupted turbo run.
pub fn turbo_duration_ms() -> f32 {
    TurboPhase::Restoring.window().map_or(0.0, |w| w.end_ms())
}

/// A running turbo sequence.
#[derive(Clone, Debug)]
pub struct TurboSequence {
    elapsed_ms: f32,
    /// Index into [`TurboPhase::TIMELINE`] of the next phase to finish.
    cursor: usize,
    entered: bool,
    phase: TurboPhase,
    /// Base positions when the sequence started.
    saved: Vec<Vec3>,
    /// Supernova positions when condensing began.
    nova_entry: Vec<Vec3>,
    /// Base positions when restoring began.
    exploded: Vec<Vec3>,
}

impl TurboSequence {
    /// Snapshot the base cloud and start accelerating.
    pub fn start(stage: &mut Stage) -> Self {
        tracing::info!(particles = stage.particles.len(), "turbo engaged");
        stage.hud.overlays.noise_distort = true;
        Self {
            elapsed_ms: 0.0,
            cursor: 0,
            entered: false,
            phase: TurboPhase::Idle,
            saved: stage.particles.positions().to_vec(),
            nova_entry: Vec::new(),
            exploded: Vec::new(),
        }
    }

    /// The most recently entered phase.
    pub fn phase(&self) -> TurboPhase {
        self.phase
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// The positions the cloud returns to.
    pub fn saved(&self) -> &[Vec3] {
        &self.saved
    }

    /// Advance the timeline by `dt_ms`, running every phase boundary crossed
    /// on the way in order.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        dt_ms: f32,
        stage: &mut Stage,
        rng: &mut R,
    ) -> SequenceStatus {
        self.elapsed_ms += dt_ms.max(0.0);
        let now = self.elapsed_ms;

        while let Some(&phase) = TurboPhase::TIMELINE.get(self.cursor) {
            let Some(window) = phase.window() else { break };
            if !window.has_started(now) {
                break;
            }
            if !self.entered {
                self.entered = true;
                self.phase = phase;
                if self.enter(phase, stage, rng) == SequenceStatus::Finished {
                    self.cursor = TurboPhase::TIMELINE.len();
                    return self.finish(stage);
                }
            }
            self.update(phase, window.eased(now), stage);
            if now < window.end_ms() {
                break;
            }
            self.complete(phase, stage);
            self.cursor += 1;
            self.entered = false;
        }

        if self.cursor >= TurboPhase::TIMELINE.len() {
            self.finish(stage)
        } else {
            SequenceStatus::Running
        }
    }

    fn enter<R: Rng + ?Sized>(
        &mut self,
        phase: TurboPhase,
        stage: &mut Stage,
        rng: &mut R,
    ) -> SequenceStatus {
        tracing::info!(phase = %phase, at_ms = self.elapsed_ms, "turbo phase");
        match phase {
            TurboPhase::Supernova => {
                stage.supernova = Some(Supernova::spawn(rng));
            }
            TurboPhase::Condensing => match &stage.supernova {
                Some(nova) => self.nova_entry = nova.positions().to_vec(),
                None => tracing::warn!("no supernova to condense, skipping to restore"),
            },
            TurboPhase::Restoring => {
                if self.saved.is_empty() {
                    tracing::warn!("saved positions unavailable, leaving particles exploded");
                    return SequenceStatus::Finished;
                }
                self.exploded = stage.particles.positions().to_vec();
            }
            _ => {}
        }
        SequenceStatus::Running
    }

    fn update(&mut self, phase: TurboPhase, e: f32, stage: &mut Stage) {
        match phase {
            TurboPhase::Idle => {}
            TurboPhase::Accelerating => {
                stage.effects.floor_speed = SPEED_UP.at(e);
            }
            TurboPhase::Exploding => {
                for (p, saved) in stage.particles.positions_mut().iter_mut().zip(&self.saved) {
                    *p = *saved + saved.normalize_or_zero() * e * EXPLODE_DISTANCE;
                }
                stage.particles.opacity = EXPLODE_OPACITY.at(e);
                stage.warp.opacity = EXPLODE_WARP.at(e);
                stage.effects.bloom = EXPLODE_BLOOM.at(e);
            }
            TurboPhase::Supernova => {
                if let Some(nova) = stage.supernova.as_mut() {
                    nova.expand_to(NOVA_RADIUS.at(e));
                    nova.opacity = NOVA_OPACITY.at(e);
                }
                stage.effects.bloom = NOVA_BLOOM.at(e);
            }
            TurboPhase::Condensing => {
                if let Some(nova) = stage.supernova.as_mut() {
                    nova.scale_from(&self.nova_entry, CONDENSE_SCALE.at(e));
                    nova.opacity = CONDENSE_OPACITY.at(e);
                }
            }
            TurboPhase::Restoring => {
                let targets = self.exploded.iter().zip(&self.saved);
                for (p, (from, to)) in stage.particles.positions_mut().iter_mut().zip(targets) {
                    *p = from.lerp(*to, e);
                }
                stage.effects.floor_speed = RESTORE_SPEED.at(e);
                stage.effects.bloom = RESTORE_BLOOM.at(e);
                stage.particles.opacity = RESTORE_OPACITY.at(e);
                stage.warp.opacity = RESTORE_WARP.at(e);
            }
        }
    }

    fn complete(&mut self, phase: TurboPhase, stage: &mut Stage) {
        if phase == TurboPhase::Condensing {
            stage.supernova = None;
            self.nova_entry = Vec::new();
        }
    }

    fn finish(&mut self, stage: &mut Stage) -> SequenceStatus {
        stage.supernova = None;
        stage.hud.overlays.noise_distort = false;
        self.phase = TurboPhase::Idle;
        tracing::info!(at_ms = self.elapsed_ms, "turbo complete");
        SequenceStatus::Finished
    }

    #[cfg(test)]
    fn forget_snapshot(&mut self) {
        self.saved.clear();
    }
}
