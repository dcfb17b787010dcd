//! Showpiece sequences: turbo (explode → supernova → condense → restore) and
//! scan (wave sweep with a typed message feed).
//!
//! Both are state machines over one accumulated clock. Every phase is a
//! [`PhaseWindow`] with a fixed start offset, so the boundaries are a pure
//! function of elapsed time and a long frame simply crosses several windows
//! in order instead of letting independent timers drift apart.

pub mod scan;
pub mod turbo;

pub use scan::{ScanSequence, SCAN_MESSAGES};
pub use turbo::{TurboPhase, TurboSequence};

use crate::easing::Easing;

/// Whether a sequence wants more frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceStatus {
    Running,
    Finished,
}

/// A slice of a sequence's timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseWindow {
    /// Offset from sequence start, in milliseconds.
    pub start_ms: f32,
    pub duration_ms: f32,
    pub easing: Easing,
}

impl PhaseWindow {
    pub const fn new(start_ms: f32, duration_ms: f32, easing: Easing) -> Self {
        Self {
            start_ms,
            duration_ms,
            easing,
        }
    }

    pub fn end_ms(&self) -> f32 {
        self.start_ms + self.duration_ms
    }

    /// Whether the window has opened at `elapsed_ms`.
    pub fn has_started(&self, elapsed_ms: f32) -> bool {
        elapsed_ms >= self.start_ms
    }

    /// Linear progress at `elapsed_ms`, clamped to `[0, 1]`.
    pub fn progress(&self, elapsed_ms: f32) -> f32 {
        if self.duration_ms <= 0.0 {
            return if self.has_started(elapsed_ms) { 1.0 } else { 0.0 };
        }
        ((elapsed_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Eased progress at `elapsed_ms`.
    pub fn eased(&self, elapsed_ms: f32) -> f32 {
        self.easing.apply(self.progress(elapsed_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_progress() {
        let w = PhaseWindow::new(1000.0, 1500.0, Easing::Linear);
        assert!(!w.has_started(999.0));
        assert_eq!(w.progress(500.0), 0.0);
        assert!((w.progress(1750.0) - 0.5).abs() < 1e-6);
        assert_eq!(w.progress(9000.0), 1.0);
        assert_eq!(w.end_ms(), 2500.0);
    }

    #[test]
    fn test_zero_length_window() {
        let w = PhaseWindow::new(200.0, 0.0, Easing::CubicInOut);
        assert_eq!(w.progress(100.0), 0.0);
        assert_eq!(w.eased(200.0), 1.0);
    }
}
