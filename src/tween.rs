//! Time-driven interpolation.
//!
//! A [`Tween`] only tracks progress; the values it drives are computed by the
//! owner with [`lerp`] or a [`Ramp`]. Several tweens can be in flight at once,
//! each advanced by the same frame delta.
//!
//! ```ignore
//! let mut fade = Tween::new(1500.0, Easing::CubicInOut);
//! let opacity = Ramp::new(1.0, 0.0);
//!
//! // each frame
//! let e = fade.advance(dt_ms);
//! particles.opacity = opacity.at(e);
//! ```

use crate::easing::Easing;

/// Progress of one in-flight interpolation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
}

impl Tween {
    /// Create a tween of the given duration. Negative durations count as zero.
    pub fn new(duration_ms: f32, easing: Easing) -> Self {
        Self {
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
            easing,
        }
    }

    /// Advance by `dt_ms` and return the eased progress.
    pub fn advance(&mut self, dt_ms: f32) -> f32 {
        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.duration_ms);
        self.value()
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    /// Eased progress in `[0, 1]`.
    pub fn value(&self) -> f32 {
        self.easing.apply(self.progress())
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A scalar start/end pair driven by eased progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ramp {
    pub from: f32,
    pub to: f32,
}

impl Ramp {
    pub const fn new(from: f32, to: f32) -> Self {
        Self { from, to }
    }

    #[inline]
    pub fn at(&self, t: f32) -> f32 {
        lerp(self.from, self.to, t)
    }
}
