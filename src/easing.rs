//! Easing curves for tweens.
//!
//! The formulas match the classic Robert Penner set as shipped by Tween.js,
//! so timings tuned against those curves carry over unchanged.

/// An easing curve mapping linear progress `t ∈ [0, 1]` to eased progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// No easing.
    #[default]
    Linear,
    /// Slow start and finish, fast middle.
    CubicInOut,
    /// Fast start, long slow settle. Used by shape morphs.
    ExponentialOut,
}

impl Easing {
    /// Apply the curve. Input is clamped to `[0, 1]`; both ends are exact.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                let k = t * 2.0;
                if k < 1.0 {
                    0.5 * k * k * k
                } else {
                    let k = k - 2.0;
                    0.5 * (k * k * k + 2.0)
                }
            }
            Easing::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 3] = [Easing::Linear, Easing::CubicInOut, Easing::ExponentialOut];

    #[test]
    fn test_endpoints_exact() {
        for e in ALL {
            assert_eq!(e.apply(0.0), 0.0, "{e:?}");
            assert_eq!(e.apply(1.0), 1.0, "{e:?}");
        }
    }

    #[test]
    fn test_monotonic() {
        for e in ALL {
            let mut last = 0.0;
            for step in 1..=100 {
                let v = e.apply(step as f32 / 100.0);
                assert!(v >= last, "{e:?} not monotonic at {step}");
                last = v;
            }
        }
    }

    #[test]
    fn test_cubic_in_out_midpoint() {
        assert!((Easing::CubicInOut.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_exponential_out_front_loaded() {
        // Most of the distance is covered in the first quarter
        assert!(Easing::ExponentialOut.apply(0.25) > 0.8);
    }

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(Easing::CubicInOut.apply(-1.0), 0.0);
        assert_eq!(Easing::ExponentialOut.apply(3.0), 1.0);
    }
}
