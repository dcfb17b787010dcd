//! WGSL source and the uniform block it reads.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

pub const SCENE_SHADER: &str = include_str!("scene.wgsl");

/// Background and fog color (`#051020`).
pub const FOG_COLOR: u32 = 0x051020;
/// Exponential-squared fog density.
pub const FOG_DENSITY: f32 = 0.0025;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub fog_color: [f32; 3],
    pub fog_density: f32,
    pub bloom: f32,
    pub _padding: [f32; 3],
}

impl Uniforms {
    pub fn new(view: Mat4, proj: Mat4, fog_color: Vec3, bloom: f32) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            fog_color: fog_color.to_array(),
            fog_density: FOG_DENSITY,
            bloom,
            _padding: [0.0; 3],
        }
    }
}
