//! The scene: every buffer, the current mode and the per-frame loop.
//!
//! [`Scene`] is the only thing a host talks to. It exposes the invocation
//! points (change shape, turbo, scan, pointer) and [`Scene::tick`], which
//! advances everything by one display frame and publishes the HUD.
//!
//! The visual state the sequences mutate is grouped in [`Stage`] so the
//! active [`Mode`] can borrow it mutably alongside itself.

use crate::camera::CameraRig;
use crate::config::SceneConfig;
use crate::easing::Easing;
use crate::floor::Floor;
use crate::hud::{horizon_offset, HudKey, HudSink, HudState};
use crate::morph::MorphEngine;
use crate::particles::{Effects, ParticleSystem, Supernova, WarpTrails};
use crate::sequence::scan::apply_wave;
use crate::sequence::{ScanSequence, SequenceStatus, TurboPhase, TurboSequence};
use crate::shapes::Shape;
use crate::telemetry::Telemetry;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Pointer pixels to scene-tilt radians.
pub const POINTER_SCALE: f32 = 0.0005;
/// Reference frame rate the per-frame constants are tuned for.
pub const REFERENCE_FPS: f32 = 60.0;

const IDLE_SPIN: f32 = 0.002;
const NOVA_SPIN: Vec2 = Vec2::new(0.002, 0.005);

/// Everything visible that the sequences are allowed to touch.
#[derive(Clone, Debug)]
pub struct Stage {
    pub particles: ParticleSystem,
    pub warp: WarpTrails,
    /// Only present between the supernova and condensing phases of a turbo.
    pub supernova: Option<Supernova>,
    pub floor: Floor,
    pub effects: Effects,
    pub hud: HudState,
}

impl Stage {
    pub fn new<R: rand::Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Self {
        Self {
            particles: ParticleSystem::new(config.particle_count, rng),
            warp: WarpTrails::new(rng),
            supernova: None,
            floor: Floor::new(rng),
            effects: Effects::default(),
            hud: HudState::default(),
        }
    }
}

/// Which showpiece, if any, is running. Turbo and scan exclude each other.
#[derive(Clone, Debug, Default)]
pub enum Mode {
    #[default]
    Normal,
    Turbo(TurboSequence),
    Scan(ScanSequence),
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Turbo(_) => "turbo",
            Mode::Scan(_) => "scan",
        }
    }
}

/// The whole experience.
pub struct Scene {
    stage: Stage,
    mode: Mode,
    morph: MorphEngine,
    camera: CameraRig,
    telemetry: Telemetry,
    shape: Shape,
    morph_duration_ms: f32,
    clock_ms: f64,
    rng: StdRng,
}

impl Scene {
    /// Build the scene and start morphing from the origin to the configured
    /// initial shape.
    pub fn new(config: &SceneConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let stage = Stage::new(config, &mut rng);
        let mut scene = Self {
            stage,
            mode: Mode::Normal,
            morph: MorphEngine::new(),
            camera: CameraRig::new(
                config.camera_float_speed,
                config.camera_float_amount,
                config.pointer_damping,
            ),
            telemetry: Telemetry::new(),
            shape: config.initial_shape(),
            morph_duration_ms: config.morph_duration_ms,
            clock_ms: 0.0,
            rng,
        };
        tracing::info!(
            particles = config.particle_count,
            shape = %scene.shape,
            "scene created"
        );
        scene.morph_to(scene.shape);
        scene
    }

    /// Morph to the shape named `id`. Unknown ids use the fallback shape.
    ///
    /// Returns `false` when turbo owns the particle buffer.
    pub fn trigger_shape(&mut self, id: &str) -> bool {
        self.trigger(Shape::from_id(id))
    }

    /// Morph to `shape`. Returns `false` while turbo is running.
    pub fn trigger(&mut self, shape: Shape) -> bool {
        if matches!(self.mode, Mode::Turbo(_)) {
            tracing::debug!(shape = %shape, "shape change ignored during turbo");
            return false;
        }
        self.shape = shape;
        self.morph_to(shape);
        true
    }

    /// Advance to the next shape in the cycle.
    pub fn next_shape(&mut self) -> bool {
        self.trigger(self.shape.next())
    }

    fn morph_to(&mut self, shape: Shape) {
        let target = shape.generate(self.stage.particles.len(), &mut self.rng);
        self.morph.start(
            self.stage.particles.positions(),
            target,
            self.morph_duration_ms,
            Easing::ExponentialOut,
        );
    }

    /// Start turbo. No-op (returns `false`) while turbo or scan is running.
    pub fn activate_turbo(&mut self) -> bool {
        if !matches!(self.mode, Mode::Normal) {
            tracing::debug!(mode = self.mode.name(), "turbo request ignored");
            return false;
        }
        if self.morph.is_active() {
            tracing::debug!("cancelling in-flight morph for turbo");
            self.morph.cancel();
        }
        self.mode = Mode::Turbo(TurboSequence::start(&mut self.stage));
        true
    }

    /// Start scanning. No-op (returns `false`) while turbo or scan is running.
    pub fn activate_scan(&mut self) -> bool {
        if !matches!(self.mode, Mode::Normal) {
            tracing::debug!(mode = self.mode.name(), "scan request ignored");
            return false;
        }
        self.mode = Mode::Scan(ScanSequence::start(&mut self.stage));
        true
    }

    /// Stop a running scan early. Returns `false` if no scan was running.
    pub fn cancel_scan(&mut self) -> bool {
        match std::mem::take(&mut self.mode) {
            Mode::Scan(scan) => {
                scan.cancel(&mut self.stage);
                true
            }
            other => {
                self.mode = other;
                false
            }
        }
    }

    /// Start a scan, or cancel the one that is running.
    pub fn toggle_scan(&mut self) -> bool {
        if matches!(self.mode, Mode::Scan(_)) {
            self.cancel_scan()
        } else {
            self.activate_scan()
        }
    }

    /// Pointer position in pixels relative to the window center.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.camera.pointer = Vec2::new(x, y) * POINTER_SCALE;
    }

    /// Advance everything by `dt_secs` and publish the HUD to `sink`.
    pub fn tick(&mut self, dt_secs: f32, sink: &mut impl HudSink) {
        let dt_secs = if dt_secs.is_finite() { dt_secs.max(0.0) } else { 0.0 };
        let dt_ms = dt_secs * 1000.0;
        let frames = dt_secs * REFERENCE_FPS;
        self.clock_ms += f64::from(dt_ms);

        self.morph.advance(dt_ms, self.stage.particles.positions_mut());

        let status = match &mut self.mode {
            Mode::Normal => SequenceStatus::Running,
            Mode::Turbo(turbo) => turbo.advance(dt_ms, &mut self.stage, &mut self.rng),
            Mode::Scan(scan) => scan.advance(dt_ms, &mut self.stage),
        };
        if status == SequenceStatus::Finished {
            self.mode = Mode::Normal;
        }
        self.stage.hud.feed.tick(dt_ms);

        self.telemetry
            .update(frames, matches!(self.mode, Mode::Turbo(_)), &mut self.rng);
        self.telemetry.publish(sink);

        match &self.mode {
            Mode::Turbo(_) => {
                let speed = self.stage.effects.floor_speed;
                self.stage.warp.advance(speed * frames);
                if let Some(nova) = self.stage.supernova.as_mut() {
                    nova.rotation += NOVA_SPIN * frames;
                }
                self.stage.floor.rush(speed * 0.5 * frames);
            }
            Mode::Normal | Mode::Scan(_) => {
                self.stage.particles.spin += IDLE_SPIN * frames;
                self.camera.follow_pointer(frames);
                if let Mode::Scan(scan) = &self.mode {
                    let (positions, colors) = self.stage.particles.split_mut();
                    apply_wave(positions, colors, scan.wave_radius());
                }
                self.stage.floor.drift(self.clock_ms);
            }
        }
        self.camera.float(frames);

        self.stage.hud.ticker.tick(dt_ms);
        sink.set_text(HudKey::Ticker, self.stage.hud.ticker.message());
        sink.set_text(
            HudKey::ScanProgress,
            &format!("{}%", self.stage.hud.scan_progress),
        );
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_turbo(&self) -> bool {
        matches!(self.mode, Mode::Turbo(_))
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self.mode, Mode::Scan(_))
    }

    /// Phase of the running turbo, [`TurboPhase::Idle`] otherwise.
    pub fn turbo_phase(&self) -> TurboPhase {
        match &self.mode {
            Mode::Turbo(turbo) => turbo.phase(),
            _ => TurboPhase::Idle,
        }
    }

    /// The shape most recently asked for.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn is_morphing(&self) -> bool {
        self.morph.is_active()
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    /// Milliseconds of scene time since creation.
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Horizon line offset in pixels for the current pitch.
    pub fn horizon_offset(&self) -> f32 {
        horizon_offset(self.telemetry.pitch)
    }
}
