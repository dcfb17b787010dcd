//! GPU-ready vertex data built from a [`Scene`](crate::Scene) each frame.
//!
//! Points are drawn as camera-facing quads, one instance per point. Lines are
//! a plain line list. Per-cloud transforms (idle spin, supernova tumble) and
//! opacities are baked in here so the shader only needs the camera.

use crate::floor::Segment;
use crate::particles::CYAN;
use crate::sampling::hex_color;
use crate::scene::Scene;
use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat3, Vec3, Vec4};

/// World-space size of a base particle.
pub const PARTICLE_SIZE: f32 = 0.5;
/// World-space size of a warp streak point.
pub const WARP_SIZE: f32 = 2.0;
/// World-space size of a supernova point.
pub const SUPERNOVA_SIZE: f32 = 1.5;

/// Color of the two center lines of the grid.
pub const GRID_CENTER_COLOR: u32 = 0x00e6e6;
/// Color of every other grid line.
pub const GRID_COLOR: u32 = 0x052040;
const STREAK_OPACITY: f32 = 0.2;

/// One point instance.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub size: f32,
    /// Linear RGB plus opacity.
    pub color: [f32; 4],
}

impl PointVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32, 2 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// One end of a line segment.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub _pad: f32,
    pub color: [f32; 4],
}

impl LineVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        wgpu::VertexAttribute {
            offset: 16,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x4,
        },
    ];

    pub fn new(position: Vec3, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            _pad: 0.0,
            color: color.to_array(),
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

fn point(position: Vec3, size: f32, color: Vec3, opacity: f32) -> PointVertex {
    PointVertex {
        position: position.to_array(),
        size,
        color: color.extend(opacity).to_array(),
    }
}

/// Fill `out` with every visible point: the base cloud, the warp streaks
/// and, while it exists, the supernova. Fully transparent clouds are skipped.
pub fn build_points(scene: &Scene, out: &mut Vec<PointVertex>) {
    out.clear();
    let stage = scene.stage();

    let base = &stage.particles;
    if base.opacity > 0.0 {
        let spin = Mat3::from_rotation_y(base.spin);
        out.extend(
            base.positions()
                .iter()
                .zip(base.colors())
                .map(|(p, c)| point(spin * *p, PARTICLE_SIZE, *c, base.opacity)),
        );
    }

    let warp = &stage.warp;
    if warp.opacity > 0.0 {
        let color = warp.color();
        out.extend(
            warp.positions()
                .iter()
                .map(|p| point(*p, WARP_SIZE, color, warp.opacity)),
        );
    }

    if let Some(nova) = stage.supernova.as_ref().filter(|n| n.opacity > 0.0) {
        let tumble = Mat3::from_euler(EulerRot::XYZ, nova.rotation.x, nova.rotation.y, 0.0);
        out.extend(
            nova.positions()
                .iter()
                .zip(nova.colors())
                .map(|(p, c)| point(tumble * *p, SUPERNOVA_SIZE, *c, nova.opacity)),
        );
    }
}

fn segment(out: &mut Vec<LineVertex>, s: Segment, color: Vec4) {
    out.push(LineVertex::new(s.start, color));
    out.push(LineVertex::new(s.end, color));
}

/// Fill `out` with the floor: scrolled grid plus static streaks.
pub fn build_lines(scene: &Scene, out: &mut Vec<LineVertex>) {
    out.clear();
    let floor = &scene.stage().floor;

    let center = hex_color(GRID_CENTER_COLOR).extend(1.0);
    let grid = hex_color(GRID_COLOR).extend(1.0);
    let middle = crate::floor::GRID_DIVISIONS;
    for (i, s) in floor.grid_lines().enumerate() {
        // Lines come in (x, z) pairs per division; the middle pair is the center cross
        let color = if i / 2 == middle / 2 { center } else { grid };
        segment(out, s, color);
    }

    let streak = hex_color(CYAN).extend(STREAK_OPACITY);
    for s in floor.streaks() {
        segment(out, *s, streak);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::hud::HudBoard;
    use crate::particles::WARP_TRAIL_COUNT;
    use crate::Scene;

    fn scene() -> Scene {
        Scene::new(&SceneConfig {
            particle_count: 300,
            seed: Some(5),
            ..SceneConfig::default()
        })
    }

    #[test]
    fn test_layouts_match_structs() {
        assert_eq!(std::mem::size_of::<PointVertex>(), 32);
        assert_eq!(std::mem::size_of::<LineVertex>(), 32);
        assert_eq!(PointVertex::layout().array_stride, 32);
        assert_eq!(LineVertex::ATTRIBUTES[1].offset, 16);
    }

    #[test]
    fn test_idle_scene_hides_warp() {
        let scene = scene();
        let mut points = Vec::new();
        build_points(&scene, &mut points);
        assert_eq!(points.len(), 300);
        assert!(points.iter().all(|p| p.size == PARTICLE_SIZE));
    }

    #[test]
    fn test_turbo_shows_warp_and_supernova() {
        let mut scene = scene();
        let mut board = HudBoard::new();
        scene.activate_turbo();
        for _ in 0..(60 * 5) {
            scene.tick(1.0 / 60.0, &mut board);
        }
        let mut points = Vec::new();
        build_points(&scene, &mut points);
        // Base cloud fully faded, streaks and burst visible
        assert_eq!(
            points.len(),
            WARP_TRAIL_COUNT + crate::particles::SUPERNOVA_COUNT
        );
    }

    #[test]
    fn test_floor_lines() {
        let scene = scene();
        let mut lines = Vec::new();
        build_lines(&scene, &mut lines);
        let grid = (crate::floor::GRID_DIVISIONS + 1) * 2;
        assert_eq!(lines.len(), (grid + scene.stage().floor.streaks().len()) * 2);
        let center = hex_color(GRID_CENTER_COLOR).extend(1.0).to_array();
        assert_eq!(lines.iter().filter(|l| l.color == center).count(), 4);
    }
}
