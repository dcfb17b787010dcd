//! Random sampling helpers shared by the shape generators and effects.
//!
//! Everything here works on any [`rand::Rng`], so callers decide whether a
//! sample stream is seeded (tests, reproducible runs) or entropy-backed.
//!
//! ```ignore
//! use aion::sampling::SampleExt;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let dir = rng.sphere_direction();   // uniform on the unit sphere
//! let jitter = rng.centered() * 20.0; // [-10, 10)
//! ```

use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Sampling shortcuts on top of [`Rng`].
///
/// Blanket-implemented for every generator.
pub trait SampleExt: Rng {
    /// Uniform `f32` in `[0, 1)`.
    #[inline]
    fn unit(&mut self) -> f32 {
        self.gen::<f32>()
    }

    /// Uniform `f32` in `[-0.5, 0.5)`.
    #[inline]
    fn centered(&mut self) -> f32 {
        self.gen::<f32>() - 0.5
    }

    /// Uniform angle in `[0, 2π)`.
    #[inline]
    fn angle(&mut self) -> f32 {
        self.gen::<f32>() * TAU
    }

    /// Polar angle for a uniform sphere: `acos(2u - 1)`.
    ///
    /// Sampling the latitude through the inverse cosine keeps the poles from
    /// clustering the way a uniform `[0, π)` latitude would.
    #[inline]
    fn polar_angle(&mut self) -> f32 {
        (self.gen::<f32>() * 2.0 - 1.0).clamp(-1.0, 1.0).acos()
    }

    /// Uniform direction on the unit sphere.
    fn sphere_direction(&mut self) -> Vec3 {
        let theta = self.angle();
        let phi = self.polar_angle();
        spherical(1.0, theta, phi)
    }
}

impl<R: Rng + ?Sized> SampleExt for R {}

/// Point on a sphere of radius `r` at azimuth `theta` and polar angle `phi`.
#[inline]
pub fn spherical(r: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Rotate `v` around the Z axis by `angle` radians.
#[inline]
pub fn rotate_z(v: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x * c - v.y * s, v.x * s + v.y * c, v.z)
}

/// Rotate `v` in the XZ plane (`x' = x cos - z sin`, `z' = x sin + z cos`).
#[inline]
pub fn rotate_xz(v: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x * c - v.z * s, v.y, v.x * s + v.z * c)
}

/// Convert a `0xRRGGBB` literal to linear-ish RGB in `[0, 1]`.
pub fn hex_color(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    )
}

/// Half a turn, for readability in the parametric formulas.
pub const HALF_TURN: f32 = PI;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sphere_direction_is_unit() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let d = rng.sphere_direction();
            assert!((d.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_polar_angle_covers_both_hemispheres() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut north = 0;
        for _ in 0..2000 {
            if rng.polar_angle() < HALF_TURN / 2.0 {
                north += 1;
            }
        }
        // acos(2u-1) splits evenly at the equator
        assert!((800..1200).contains(&north), "north = {north}");
    }

    #[test]
    fn test_centered_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let v = rng.centered();
            assert!((-0.5..0.5).contains(&v));
        }
    }

    #[test]
    fn test_rotate_z_quarter_turn() {
        let v = rotate_z(Vec3::X, HALF_TURN / 2.0);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_hex_color() {
        let cyan = hex_color(0x00ffff);
        assert_eq!(cyan, Vec3::new(0.0, 1.0, 1.0));
        let blue = hex_color(0x0099ff);
        assert!((blue.y - 0.6).abs() < 1e-6);
    }
}
