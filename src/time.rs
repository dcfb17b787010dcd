//! Frame clock for the viewer.
//!
//! Turns wall-clock instants into the `dt` handed to [`Scene::tick`](crate::Scene::tick).
//! Deltas are clamped so a stalled window (drag, minimise, debugger) resumes
//! with one ordinary frame instead of fast-forwarding the sequences.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//! // every redraw:
//! let dt = clock.tick();
//! scene.tick(dt, &mut board);
//! ```

use std::time::{Duration, Instant};

/// Longest delta a single frame may report, in seconds.
pub const DEFAULT_MAX_DELTA: f32 = 0.1;

#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
    delta_secs: f32,
    max_delta: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
    /// Deterministic stepping, e.g. for recordings.
    fixed_delta: Option<f32>,
    time_scale: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta_secs: 0.0,
            max_delta: DEFAULT_MAX_DELTA,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Mark a new frame and return its delta in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if self.paused {
            self.delta_secs = 0.0;
            return 0.0;
        }

        self.delta_secs = self.fixed_delta.unwrap_or(raw).min(self.max_delta) * self.time_scale;
        self.frame_count += 1;

        let since_fps = now.duration_since(self.fps_update_time);
        if since_fps >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since_fps.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    pub fn set_max_delta(&mut self, max: f32) {
        self.max_delta = max.max(0.0);
    }

    /// Slow motion below 1, fast forward above. Negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
