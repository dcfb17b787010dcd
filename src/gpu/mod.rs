//! GPU renderer: one pipeline for point billboards, one for floor lines.
//!
//! Vertex buffers are rebuilt from the scene every frame and grow on demand;
//! nothing is simulated on the GPU.

use std::sync::Arc;

use bytemuck::Zeroable;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::GpuError;
use crate::sampling::hex_color;
use crate::scene::Scene;
use crate::shader::{Uniforms, FOG_COLOR, SCENE_SHADER};
use crate::vertex::{build_lines, build_points, LineVertex, PointVertex};

/// Vertices per point billboard (two triangles).
const QUAD_VERTICES: u32 = 6;

/// Additive blending, as the glow look needs.
const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// A vertex buffer that is recreated larger when it overflows.
struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: u64,
    label: &'static str,
    len: u32,
}

impl DynamicBuffer {
    fn new(device: &wgpu::Device, label: &'static str, capacity: u64) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity.max(4),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            capacity,
            label,
            len: 0,
        }
    }

    fn upload<T: bytemuck::Pod>(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        if bytes.len() as u64 > self.capacity {
            let capacity = (bytes.len() as u64).next_power_of_two();
            tracing::debug!(label = self.label, capacity, "growing vertex buffer");
            *self = Self::new(device, self.label, capacity);
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.len = data.len() as u32;
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    point_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    points: DynamicBuffer,
    lines: DynamicBuffer,
    point_scratch: Vec<PointVertex>,
    line_scratch: Vec<LineVertex>,
}

impl GpuState {
    pub async fn new(window: Arc<Window>, particle_count: usize) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;
        tracing::info!(adapter = ?adapter.get_info().name, "GPU adapter selected");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::UnsupportedSurface)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(GpuError::UnsupportedSurface)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::bytes_of(&Uniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let point_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            config.format,
            PipelineKind::Points,
        );
        let line_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            config.format,
            PipelineKind::Lines,
        );

        let point_bytes = (particle_count * std::mem::size_of::<PointVertex>()) as u64;
        let points = DynamicBuffer::new(&device, "Point Buffer", point_bytes);
        let lines = DynamicBuffer::new(&device, "Line Buffer", 4096);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            point_pipeline,
            line_pipeline,
            uniform_buffer,
            uniform_bind_group,
            points,
            lines,
            point_scratch: Vec::with_capacity(particle_count),
            line_scratch: Vec::new(),
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface after it was lost or became outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let camera = scene.camera();
        let fog = hex_color(FOG_COLOR);
        let uniforms = Uniforms::new(
            camera.view_matrix() * camera.scene_matrix(),
            camera.projection(self.aspect()),
            fog,
            scene.stage().effects.bloom,
        );
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        build_points(scene, &mut self.point_scratch);
        build_lines(scene, &mut self.line_scratch);
        self.points
            .upload(&self.device, &self.queue, &self.point_scratch);
        self.lines.upload(&self.device, &self.queue, &self.line_scratch);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(fog.x),
                            g: f64::from(fog.y),
                            b: f64::from(fog.z),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            if self.lines.len > 0 {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_vertex_buffer(0, self.lines.buffer.slice(..));
                render_pass.draw(0..self.lines.len, 0..1);
            }

            if self.points.len > 0 {
                render_pass.set_pipeline(&self.point_pipeline);
                render_pass.set_vertex_buffer(0, self.points.buffer.slice(..));
                render_pass.draw(0..QUAD_VERTICES, 0..self.points.len);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[derive(Clone, Copy)]
enum PipelineKind {
    Points,
    Lines,
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    kind: PipelineKind,
) -> wgpu::RenderPipeline {
    let (label, vs, fs, buffer, topology) = match kind {
        PipelineKind::Points => (
            "Point Pipeline",
            "vs_point",
            "fs_point",
            PointVertex::layout(),
            wgpu::PrimitiveTopology::TriangleList,
        ),
        PipelineKind::Lines => (
            "Line Pipeline",
            "vs_line",
            "fs_line",
            LineVertex::layout(),
            wgpu::PrimitiveTopology::LineList,
        ),
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs),
            buffers: &[buffer],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(ADDITIVE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
