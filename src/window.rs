//! Native viewer: a winit window driving a [`Scene`] and the GPU renderer.
//!
//! | Input | Action |
//! |-------|--------|
//! | left click | next shape |
//! | `T` | turbo |
//! | `S` | start or cancel a scan |
//! | `Esc` | quit |
//!
//! The HUD is not drawn in the window; its readouts go to the window title.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::config::SceneConfig;
use crate::error::{GpuError, ViewerError};
use crate::gpu::GpuState;
use crate::hud::HudBoard;
use crate::scene::Scene;
use crate::time::FrameClock;

/// Frames between window title refreshes.
const TITLE_INTERVAL: u64 = 15;

/// Open a window and run the scene until it is closed.
pub fn run(config: SceneConfig) -> Result<(), ViewerError> {
    config.validate()?;
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    config: SceneConfig,
    scene: Scene,
    board: HudBoard,
    clock: FrameClock,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    /// Set when setup fails inside the event loop; returned by [`run`].
    error: Option<ViewerError>,
}

impl App {
    fn new(config: SceneConfig) -> Self {
        let scene = Scene::new(&config);
        Self {
            config,
            scene,
            board: HudBoard::new(),
            clock: FrameClock::new(),
            window: None,
            gpu_state: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title("AION")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu_state = pollster::block_on(GpuState::new(
            window.clone(),
            self.config.particle_count,
        ))?;
        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        tracing::error!(%err, "viewer stopped");
        self.error = Some(err);
        event_loop.exit();
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, key: &Key) {
        match key {
            Key::Named(NamedKey::Escape) => event_loop.exit(),
            Key::Character(c) if c.eq_ignore_ascii_case("t") => {
                self.scene.activate_turbo();
            }
            Key::Character(c) if c.eq_ignore_ascii_case("s") => {
                self.scene.toggle_scan();
            }
            _ => {}
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();
        self.scene.tick(dt, &mut self.board);

        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };
        match gpu_state.render(&self.scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, GpuError::OutOfMemory.into());
                return;
            }
            Err(e) => tracing::warn!(error = ?e, "render error"),
        }

        if let Some(window) = &self.window {
            if self.clock.frame() % TITLE_INTERVAL == 0 {
                window.set_title(&format!(
                    "AION | {} | {} | {:.0} fps",
                    self.scene.shape(),
                    self.board.summary(),
                    self.clock.fps()
                ));
            }
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.scene.next_shape();
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    let x = position.x - f64::from(size.width) / 2.0;
                    let y = position.y - f64::from(size.height) / 2.0;
                    self.scene.set_pointer(x as f32, y as f32);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.on_key(event_loop, &logical_key);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
