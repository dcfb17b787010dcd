//! Parametric target geometries for the particle cloud.
//!
//! Every shape maps a particle index `i` in `[0, count)` to a 3D position.
//! Index order is part of the contract: the morph interpolates index-to-index,
//! so particle `i` of one shape flies to particle `i` of the next. Shapes that
//! sweep a curve (spiral, DNA helix, trefoil, torus knot, Möbius) derive their
//! position from `i / count` so that order reads as a continuous path; the
//! rest sample randomly and are only statistically stable between calls.
//!
//! # Shapes
//!
//! | Id | Formula |
//! |----|---------|
//! | `sphere` | uniform sphere, r = 90 |
//! | `torus` | R = 80, r = 25, x/z swapped |
//! | `triangle` | barycentric fold inside a fixed triangle |
//! | `complex` | rippled blob (also the fallback) |
//! | `spiral` | 8 twisted arms over a 12π sweep |
//! | `torusknot` | (3, 2) knot with tube thickness |
//! | `kleinbottle` | Klein bottle with a half twist |
//! | `mobius` | Möbius strip, width 30 |
//! | `dyson` | paneled shell on a 12×12 grid |
//! | `nebula` | five Gaussian clusters plus escapers |
//! | `lorenz` | short Euler runs of the Lorenz system |
//! | `dnahelix` | two strands joined by rungs |
//! | `trefoil` | trefoil knot with tube jitter |
//! | `pulsar` | dense core and two tapered beams |

use crate::sampling::{rotate_xz, rotate_z, spherical, SampleExt};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};
use std::fmt;

/// Particle count of the full experience.
pub const DEFAULT_PARTICLE_COUNT: usize = 18_000;

/// Identifier of a target geometry.
///
/// The set is closed; [`Shape::from_id`] maps anything unknown to
/// [`Shape::Complex`], whose blob formula doubles as the default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Sphere,
    Torus,
    Triangle,
    Complex,
    Spiral,
    TorusKnot,
    KleinBottle,
    Mobius,
    Dyson,
    Nebula,
    Lorenz,
    DnaHelix,
    Trefoil,
    Pulsar,
}

impl Shape {
    /// All shapes in click-cycle order.
    pub const ALL: [Shape; 14] = [
        Shape::Sphere,
        Shape::Torus,
        Shape::Triangle,
        Shape::Complex,
        Shape::Spiral,
        Shape::TorusKnot,
        Shape::KleinBottle,
        Shape::Mobius,
        Shape::Dyson,
        Shape::Nebula,
        Shape::Lorenz,
        Shape::DnaHelix,
        Shape::Trefoil,
        Shape::Pulsar,
    ];

    /// Resolve a shape identifier, falling back to the blob formula.
    ///
    /// Never fails: an unknown identifier is a cosmetic problem, not an error.
    pub fn from_id(id: &str) -> Shape {
        match Shape::ALL.iter().find(|s| s.id() == id) {
            Some(shape) => *shape,
            None => {
                tracing::debug!(id, "unknown shape id, using blob formula");
                Shape::Complex
            }
        }
    }

    /// Stable string identifier.
    pub fn id(self) -> &'static str {
        match self {
            Shape::Sphere => "sphere",
            Shape::Torus => "torus",
            Shape::Triangle => "triangle",
            Shape::Complex => "complex",
            Shape::Spiral => "spiral",
            Shape::TorusKnot => "torusknot",
            Shape::KleinBottle => "kleinbottle",
            Shape::Mobius => "mobius",
            Shape::Dyson => "dyson",
            Shape::Nebula => "nebula",
            Shape::Lorenz => "lorenz",
            Shape::DnaHelix => "dnahelix",
            Shape::Trefoil => "trefoil",
            Shape::Pulsar => "pulsar",
        }
    }

    /// Position of this shape in the cycle.
    pub fn index(self) -> usize {
        Shape::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// The shape after this one in the click cycle (wraps).
    pub fn next(self) -> Shape {
        Shape::ALL[(self.index() + 1) % Shape::ALL.len()]
    }

    /// Generate `count` target positions for this shape.
    pub fn generate<R: Rng + ?Sized>(self, count: usize, rng: &mut R) -> ShapeTarget {
        let positions = (0..count).map(|i| self.point(i, count, rng)).collect();
        ShapeTarget { shape: self, positions }
    }

    /// Position of particle `i` out of `count`.
    pub fn point<R: Rng + ?Sized>(self, i: usize, count: usize, rng: &mut R) -> Vec3 {
        // Fraction of the sweep covered by this index, in [0, 1)
        let f = if count == 0 { 0.0 } else { i as f32 / count as f32 };
        match self {
            Shape::Sphere => sphere(rng),
            Shape::Torus => torus(rng),
            Shape::Triangle => triangle(rng),
            Shape::Complex => blob(rng),
            Shape::Spiral => spiral(i, f),
            Shape::TorusKnot => torus_knot(f, rng),
            Shape::KleinBottle => klein_bottle(rng),
            Shape::Mobius => mobius(f, rng),
            Shape::Dyson => dyson(rng),
            Shape::Nebula => nebula(rng),
            Shape::Lorenz => lorenz(rng),
            Shape::DnaHelix => dna_helix(i, f, rng),
            Shape::Trefoil => trefoil(f, rng),
            Shape::Pulsar => pulsar(i, f, rng),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One generated geometry: exactly `count` positions in index order.
#[derive(Clone, Debug)]
pub struct ShapeTarget {
    shape: Shape,
    positions: Vec<Vec3>,
}

impl ShapeTarget {
    /// Shape that produced these positions.
    pub fn shape(&self) -> Shape {
        self.shape
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

    pub fn into_positions(self) -> Vec<Vec3> {
        self.positions
    }
}

fn sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.angle();
    let phi = rng.polar_angle();
    spherical(90.0, theta, phi)
}

fn torus<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let (major, minor) = (80.0, 25.0);
    let u = rng.angle();
    let v = rng.angle();
    let ring = major + minor * v.cos();
    // Swap x and z so the ring faces the camera edge-on
    Vec3::new(minor * v.sin(), ring * u.sin(), ring * u.cos())
}

fn triangle<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let size = 160.0;
    let mut r1 = rng.unit();
    let mut r2 = rng.unit();
    if r1 + r2 > 1.0 {
        r1 = 1.0 - r1;
        r2 = 1.0 - r2;
    }
    let r3 = 1.0 - r1 - r2;

    let v1 = (0.0, size);
    let v2 = (-size, -size / 1.5);
    let v3 = (size, -size / 1.5);

    let x = v1.0 * r1 + v2.0 * r2 + v3.0 * r3;
    let y = v1.1 * r1 + v2.1 * r2 + v3.1 * r3;
    let mut z = rng.centered() * 20.0;
    if (x * x + y * y).sqrt() < 40.0 {
        z += 50.0;
    }
    Vec3::new(x, y, z)
}

fn blob<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let u = rng.angle();
    let v = rng.unit() * PI;
    let r = 80.0 + 20.0 * (5.0 * u).sin() * (4.0 * v).cos();
    spherical(r, u, v)
}

fn spiral(i: usize, f: f32) -> Vec3 {
    let t = f * PI * 12.0;
    let radius = 100.0 * (1.0 - f);
    let depth = 150.0 * (f - 0.5);

    let arms = 8;
    let arm_offset = (i % arms) as f32 * (TAU / arms as f32);

    let p = Vec3::new(
        radius * (t + arm_offset).cos(),
        radius * (t + arm_offset).sin(),
        depth,
    );
    rotate_z(p, t * 0.3)
}

fn torus_knot<R: Rng + ?Sized>(f: f32, rng: &mut R) -> Vec3 {
    let (p, q) = (3.0, 2.0);
    let t = f * TAU * q;

    let r = 60.0 + 30.0 * (p * t).cos();
    let center = Vec3::new(r * (q * t).cos(), r * (q * t).sin(), 40.0 * (p * t).sin());

    let thickness = 8.0;
    let angle = rng.angle();
    let offset = rng.unit() * thickness;
    // Approximate normal around the tube, perpendicular to the ring tangent
    let normal = Vec3::new(
        -(q * t).sin() * angle.cos(),
        (q * t).cos() * angle.cos(),
        angle.sin(),
    );
    center + normal * offset
}

fn klein_bottle<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let u = rng.angle();
    let v = rng.angle();
    let a = 60.0;

    let r = a * (1.0 + v.cos());
    let x = r * u.cos() * (1.0 + v.sin());
    let y = r * u.sin() * (1.0 + v.sin());
    let z = if u < PI { -a * v.sin() } else { a * v.sin() };

    rotate_xz(Vec3::new(x, y, z), u * 0.5)
}

fn mobius<R: Rng + ?Sized>(f: f32, rng: &mut R) -> Vec3 {
    let u = f * TAU;
    let v = rng.centered() * 30.0;
    let radius = 80.0;

    let band = radius + v * (u / 2.0).cos();
    let strip = Vec3::new(band * u.cos(), band * u.sin(), v * (u / 2.0).sin());

    let thickness = rng.unit() * 3.0;
    let normal = rng.angle();
    strip + Vec3::new(normal.cos() * thickness, normal.sin() * thickness, 0.0)
}

fn dyson<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let r = 95.0;
    let theta = rng.angle();
    let phi = rng.polar_angle();
    let base = spherical(r, theta, phi);

    let grid = 12.0;
    let theta_cell = (theta / TAU * grid).floor() as i32;
    let phi_cell = (phi / PI * grid).floor() as i32;

    let shell = if (theta_cell + phi_cell) % 4 == 0 {
        // Structural ribs sit slightly inside the panels
        base * 0.95
    } else {
        let panel_offset = rng.unit() * 3.0;
        base * (1.0 + panel_offset / r)
    };

    let section_angle = (theta_cell as f32 * 0.3) % TAU;
    rotate_z(shell, section_angle)
}

fn nebula<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let clusters = 5;
    let cluster = rng.gen_range(0..clusters);

    let cluster_angle = cluster as f32 / clusters as f32 * TAU;
    let cluster_dist = 40.0 + rng.unit() * 30.0;
    let center = Vec3::new(
        cluster_angle.cos() * cluster_dist,
        cluster_angle.sin() * cluster_dist,
        rng.centered() * 40.0,
    );

    // Box-Muller radial spread; 1 - u keeps ln away from zero
    let spread = 25.0 + rng.unit() * 20.0;
    let r = spread * (-2.0 * (1.0 - rng.unit()).ln()).sqrt();
    let theta = rng.angle();
    let phi = rng.angle();

    let mut p = center
        + Vec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos() * 0.5,
        );
    p.z += (p.x * 0.1).sin() * (p.y * 0.1).cos() * 15.0;

    if rng.unit() < 0.15 {
        let escape = rng.angle();
        p.x += escape.cos() * 50.0;
        p.y += escape.sin() * 50.0;
    }
    p
}

/// Lorenz system constants.
const LORENZ_SIGMA: f32 = 10.0;
const LORENZ_RHO: f32 = 28.0;
const LORENZ_BETA: f32 = 8.0 / 3.0;
const LORENZ_DT: f32 = 0.01;

fn lorenz<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let mut x = rng.centered() * 20.0;
    let mut y = rng.centered() * 20.0;
    let mut z = 20.0 + rng.unit() * 10.0;

    let steps = 50 + rng.gen_range(0..200);
    for _ in 0..steps {
        let dx = LORENZ_SIGMA * (y - x) * LORENZ_DT;
        let dy = (x * (LORENZ_RHO - z) - y) * LORENZ_DT;
        let dz = (x * y - LORENZ_BETA * z) * LORENZ_DT;
        x += dx;
        y += dy;
        z += dz;
    }

    Vec3::new(x * 3.0, y * 3.0, (z - 25.0) * 3.0)
}

fn dna_helix<R: Rng + ?Sized>(i: usize, f: f32, rng: &mut R) -> Vec3 {
    let turns = PI * 8.0;
    let t = f * turns;
    let radius = 40.0;
    let height = 150.0;

    let strand = (i % 2) as f32 * PI;
    let mut x = radius * (t + strand).cos();
    let y = (t / turns) * height - height / 2.0;
    let mut z = radius * (t + strand).sin();

    // Five of every thirty particles form a rung across the strands
    let rung = i % 30;
    if rung < 5 {
        let s = rung as f32 / 5.0;
        let (x1, z1) = (radius * t.cos(), radius * t.sin());
        let (x2, z2) = (radius * (t + PI).cos(), radius * (t + PI).sin());
        x = x1 + (x2 - x1) * s;
        z = z1 + (z2 - z1) * s;
    }

    let thickness = 3.0;
    let angle = rng.angle();
    x += angle.cos() * thickness * rng.unit();
    z += angle.sin() * thickness * rng.unit();
    Vec3::new(x, y, z)
}

fn trefoil<R: Rng + ?Sized>(f: f32, rng: &mut R) -> Vec3 {
    let t = f * TAU;
    let scale = 35.0;
    let center = Vec3::new(
        (2.0 + (3.0 * t).cos()) * (2.0 * t).cos() * scale,
        (2.0 + (3.0 * t).cos()) * (2.0 * t).sin() * scale,
        (3.0 * t).sin() * scale,
    );

    let tube = 8.0;
    let a1 = rng.angle();
    let a2 = rng.angle();
    let normal = Vec3::new(-(2.0 * t).sin(), (2.0 * t).cos(), (3.0 * t).cos() * 0.5);
    let offset = rng.unit() * tube;

    Vec3::new(
        center.x + normal.x * offset * a1.cos(),
        center.y + normal.y * offset * a1.cos(),
        center.z + normal.z * offset + a2.sin() * tube * 0.5,
    )
}

fn pulsar<R: Rng + ?Sized>(i: usize, f: f32, rng: &mut R) -> Vec3 {
    let p = if i < 500 {
        let r = 8.0 + rng.unit() * 4.0;
        let theta = rng.angle();
        let phi = rng.polar_angle();
        spherical(r, theta, phi)
    } else {
        let beam_angle = (i % 2) as f32 / 2.0 * TAU;
        let length = f * 180.0;
        let width = 15.0 * (1.0 - f * 0.7);

        let spread_angle = rng.angle();
        let spread = rng.unit() * width;
        let perp = Vec3::new(-beam_angle.sin(), beam_angle.cos(), 0.0);

        let mut p = Vec3::new(beam_angle.cos() * length, beam_angle.sin() * length, 0.0);
        p.x += perp.x * spread_angle.cos() * spread;
        p.y += perp.y * spread_angle.cos() * spread;
        p.z += spread_angle.sin() * spread;
        p.z += (f * PI * 8.0).sin() * 10.0;
        p
    };

    rotate_z(p, f * PI * 0.2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0xA10)
    }

    #[test]
    fn test_ids_round_trip() {
        for shape in Shape::ALL {
            assert_eq!(Shape::from_id(shape.id()), shape);
        }
    }

    #[test]
    fn test_unknown_id_falls_back_to_blob() {
        assert_eq!(Shape::from_id("hypercube"), Shape::Complex);
        assert_eq!(Shape::from_id(""), Shape::Complex);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Shape::Pulsar.next(), Shape::Sphere);
        assert_eq!(Shape::Triangle.next(), Shape::Complex);
        assert_eq!(Shape::Triangle.index(), 2);
    }

    #[test]
    fn test_sphere_radius() {
        let target = Shape::Sphere.generate(1000, &mut rng());
        for p in target.positions() {
            assert!((p.length() - 90.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_torus_tube_distance() {
        let target = Shape::Torus.generate(1000, &mut rng());
        for p in target.positions() {
            // After the swap the ring lies in the YZ plane
            let ring = (p.y * p.y + p.z * p.z).sqrt();
            let tube = ((ring - 80.0).powi(2) + p.x * p.x).sqrt();
            assert!((tube - 25.0).abs() < 1e-2, "tube = {tube}");
        }
    }

    #[test]
    fn test_triangle_stays_inside() {
        let target = Shape::Triangle.generate(2000, &mut rng());
        for p in target.positions() {
            assert!(p.y <= 160.0 + 1e-3);
            assert!(p.y >= -160.0 / 1.5 - 1e-3);
            assert!(p.x.abs() <= 160.0 + 1e-3);
            assert!(p.z >= -10.0 && p.z < 60.0);
        }
    }

    #[test]
    fn test_spiral_is_deterministic() {
        let a = Shape::Spiral.generate(500, &mut StdRng::seed_from_u64(1));
        let b = Shape::Spiral.generate(500, &mut StdRng::seed_from_u64(2));
        assert_eq!(a.positions(), b.positions());
        // First particle sits at full radius on the back plane
        let first = a.positions()[0];
        assert!((first.z + 75.0).abs() < 1e-4);
        assert!((first.truncate().length() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_dna_rungs_span_strands() {
        let target = Shape::DnaHelix.generate(600, &mut rng());
        let rungs = (0..600).filter(|i| i % 30 < 5).count();
        assert_eq!(rungs, 100);
        for (i, p) in target.positions().iter().enumerate() {
            let radial = (p.x * p.x + p.z * p.z).sqrt();
            assert!(radial <= 40.0 + 3.0 + 1e-3);
            if i % 30 >= 5 {
                assert!(radial >= 40.0 - 3.0 - 1e-3);
            }
        }
    }

    #[test]
    fn test_lorenz_is_finite() {
        let target = Shape::Lorenz.generate(2000, &mut rng());
        for p in target.positions() {
            assert!(p.is_finite());
            assert!(p.length() < 400.0);
        }
    }

    #[test]
    fn test_dyson_shells() {
        let target = Shape::Dyson.generate(2000, &mut rng());
        for p in target.positions() {
            let r = p.length();
            let structural = (r - 95.0 * 0.95).abs() < 1e-2;
            let panel = r >= 95.0 - 1e-2 && r <= 98.0 + 1e-2;
            assert!(structural || panel, "r = {r}");
        }
    }

    #[test]
    fn test_pulsar_core() {
        let target = Shape::Pulsar.generate(DEFAULT_PARTICLE_COUNT, &mut rng());
        for p in &target.positions()[..500] {
            let r = p.length();
            assert!((8.0 - 1e-3..=12.0 + 1e-3).contains(&r));
        }
    }

    #[test]
    fn test_zero_count() {
        for shape in Shape::ALL {
            assert!(shape.generate(0, &mut rng()).is_empty());
        }
    }
}
