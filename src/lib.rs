//! # AION - particle shape morphing scene
//!
//! A cloud of points that morphs between parametric shapes, with two
//! scripted showpiece sequences on top:
//!
//! - **Turbo**: the cloud accelerates, explodes outward, collapses into a
//!   supernova burst, condenses and restores to the shape it left.
//! - **Scan**: a sweeping wave recolors the cloud while a typed message feed
//!   reports progress.
//!
//! The library is headless. [`Scene`] owns every buffer and is advanced with
//! [`Scene::tick`]; HUD readouts are published through the [`HudSink`] trait.
//! The `aion` binary wraps the scene in a winit window with a wgpu renderer.
//!
//! ## Quick Start
//!
//! ```
//! use aion::prelude::*;
//!
//! let mut scene = Scene::new(&SceneConfig {
//!     particle_count: 2_000,
//!     seed: Some(7),
//!     ..SceneConfig::default()
//! });
//! let mut board = HudBoard::new();
//!
//! scene.trigger(Shape::Torus);
//! for _ in 0..120 {
//!     scene.tick(1.0 / 60.0, &mut board);
//! }
//! assert!(!scene.is_morphing());
//!
//! scene.activate_turbo();
//! assert!(scene.is_turbo());
//! ```
//!
//! ## Invocation points
//!
//! | Call | Effect |
//! |------|--------|
//! | [`Scene::trigger_shape`] | morph to a shape by id (unknown ids fall back) |
//! | [`Scene::activate_turbo`] | start turbo unless turbo or scan is running |
//! | [`Scene::activate_scan`] | start scan unless turbo or scan is running |
//! | [`Scene::tick`] | advance one frame |
//!
//! ## Shapes
//!
//! `sphere`, `torus`, `triangle`, `complex`, `spiral`, `torusknot`,
//! `kleinbottle`, `mobius`, `dyson`, `nebula`, `lorenz`, `dnahelix`,
//! `trefoil`, `pulsar`. See [`Shape`].

pub mod camera;
pub mod config;
pub mod easing;
pub mod error;
pub mod floor;
mod gpu;
pub mod hud;
pub mod morph;
pub mod particles;
pub mod sampling;
pub mod scene;
pub mod sequence;
pub mod shader;
pub mod shapes;
pub mod telemetry;
pub mod time;
pub mod tween;
pub mod vertex;
mod window;

pub use config::SceneConfig;
pub use easing::Easing;
pub use error::{ConfigError, GpuError, ViewerError};
pub use glam::{Vec2, Vec3, Vec4};
pub use hud::{HudBoard, HudKey, HudSink, Level};
pub use scene::{Mode, Scene, Stage};
pub use sequence::{SequenceStatus, TurboPhase};
pub use shapes::{Shape, ShapeTarget};
pub use telemetry::Telemetry;
pub use time::FrameClock;
pub use window::run;

/// Convenient re-exports for common usage.
///
/// ```
/// use aion::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::SceneConfig;
    pub use crate::easing::Easing;
    pub use crate::hud::{HudBoard, HudKey, HudSink};
    pub use crate::scene::{Mode, Scene};
    pub use crate::sequence::TurboPhase;
    pub use crate::shapes::Shape;
    pub use crate::time::FrameClock;
    pub use crate::{Vec2, Vec3, Vec4};
}
