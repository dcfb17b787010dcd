//! Particle buffers owned by the scene.
//!
//! | Cloud | Points | Role |
//! |-------|--------|------|
//! | [`ParticleSystem`] | N (18 000) | the morphing shape |
//! | [`WarpTrails`] | 1 000 | light streaks rushing past during turbo |
//! | [`Supernova`] | 5 000 | burst spawned mid-turbo, discarded after condensing |
//!
//! Scalars modulated by the sequences (bloom, floor speed, opacities) live in
//! [`Effects`].

use crate::sampling::{hex_color, SampleExt};
use glam::{Vec2, Vec3};
use rand::Rng;

/// Signature cyan of the experience.
pub const CYAN: u32 = 0x00ffff;
/// Pure white.
pub const WHITE: u32 = 0xffffff;
/// Deep blue used by the supernova.
pub const AZURE: u32 = 0x0099ff;

/// The main particle cloud: N positions and N colors, never resized.
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    /// Material opacity.
    pub opacity: f32,
    /// Idle spin around Y, radians.
    pub spin: f32,
}

impl ParticleSystem {
    /// All particles start at the origin; 70% cyan, 30% white.
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let cyan = hex_color(CYAN);
        let white = hex_color(WHITE);
        let colors = (0..count)
            .map(|_| if rng.unit() > 0.3 { cyan } else { white })
            .collect();
        Self {
            positions: vec![Vec3::ZERO; count],
            colors,
            opacity: 1.0,
            spin: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Mutable view of the positions; the length is fixed.
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut [Vec3] {
        &mut self.colors
    }

    /// Positions and colors at once, for passes that read one and write the other.
    pub fn split_mut(&mut self) -> (&[Vec3], &mut [Vec3]) {
        (&self.positions, &mut self.colors)
    }
}

/// Number of warp streak points.
pub const WARP_TRAIL_COUNT: usize = 1000;
/// Streaks are recycled once they pass this depth.
pub const WARP_RECYCLE_Z: f32 = 500.0;
/// Recycled streaks restart at this depth.
pub const WARP_RESPAWN_Z: f32 = -1000.0;

/// Light streaks on both sides of the view, invisible until turbo.
#[derive(Clone, Debug)]
pub struct WarpTrails {
    positions: Vec<Vec3>,
    /// Material opacity.
    pub opacity: f32,
}

impl WarpTrails {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let positions = (0..WARP_TRAIL_COUNT)
            .map(|i| {
                let side = if i % 2 == 0 { 1.0 } else { -1.0 };
                Vec3::new(
                    side * (200.0 + rng.unit() * 100.0),
                    rng.centered() * 300.0,
                    rng.unit() * WARP_RESPAWN_Z,
                )
            })
            .collect();
        Self {
            positions,
            opacity: 0.0,
        }
    }

    /// Move every streak toward the camera by `distance`, recycling those
    /// that pass the camera plane.
    pub fn advance(&mut self, distance: f32) {
        for p in &mut self.positions {
            p.z += distance;
            if p.z > WARP_RECYCLE_Z {
                p.z = WARP_RESPAWN_Z;
            }
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn color(&self) -> Vec3 {
        hex_color(CYAN)
    }
}

/// Number of supernova points.
pub const SUPERNOVA_COUNT: usize = 5000;

/// The supernova burst: fixed unit directions scaled by a shared radius.
#[derive(Clone, Debug)]
pub struct Supernova {
    directions: Vec<Vec3>,
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    /// Material opacity.
    pub opacity: f32,
    /// Slow tumble (x, y) in radians.
    pub rotation: Vec2,
}

impl Supernova {
    /// Spawn the burst collapsed at the origin.
    ///
    /// Colors: above 0.7 white, 0.4–0.7 cyan, otherwise azure.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let colors = (0..SUPERNOVA_COUNT)
            .map(|_| {
                let choice = rng.unit();
                if choice > 0.7 {
                    hex_color(WHITE)
                } else if choice > 0.4 {
                    hex_color(CYAN)
                } else {
                    hex_color(AZURE)
                }
            })
            .collect();
        let directions = (0..SUPERNOVA_COUNT).map(|_| rng.sphere_direction()).collect();
        Self {
            directions,
            positions: vec![Vec3::ZERO; SUPERNOVA_COUNT],
            colors,
            opacity: 1.0,
            rotation: Vec2::ZERO,
        }
    }

    /// Place every point at `radius` along its own direction.
    pub fn expand_to(&mut self, radius: f32) {
        for (p, dir) in self.positions.iter_mut().zip(&self.directions) {
            *p = *dir * radius;
        }
    }

    /// Scale `from` (a snapshot of this cloud) by `scale` into the live buffer.
    pub fn scale_from(&mut self, from: &[Vec3], scale: f32) {
        for (p, start) in self.positions.iter_mut().zip(from) {
            *p = *start * scale;
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn directions(&self) -> &[Vec3] {
        &self.directions
    }
}

/// Baseline bloom when nothing special is happening.
pub const BLOOM_IDLE: f32 = 1.2;

/// Scalars the sequences modulate and the renderer reads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Effects {
    /// Post-process glow intensity.
    pub bloom: f32,
    /// Turbo floor speed, units per reference frame.
    pub floor_speed: f32,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            bloom: BLOOM_IDLE,
            floor_speed: 0.0,
        }
    }
}
