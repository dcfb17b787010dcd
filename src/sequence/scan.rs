//! Scan: overlays on, a radial wave sweeps the cloud, and five messages are
//! typed into the feed on a widening cadence.
//!
//! Launches are cumulative: message `i` goes out `1500 + 300·i` ms after the
//! previous one (1500, 3300, 5400, 7800, 10500). The scan ends on its own
//! 2000 ms after the last launch.

use super::SequenceStatus;
use crate::particles::CYAN;
use crate::sampling::hex_color;
use crate::scene::Stage;
use glam::Vec3;

/// Narrative typed into the feed, in order.
pub const SCAN_MESSAGES: [&str; 5] = [
    "AION: Initiating structural sweep.",
    "AION: Particles resonating. Deep reading started.",
    "AION: Fractal structures detected.",
    "AION: Anomaly identified — analysing...",
    "AION: Sweep complete.",
];

/// Bloom while scanning.
pub const SCAN_BLOOM: f32 = 2.5;
/// Bloom left behind once the scan ends.
pub const POST_SCAN_BLOOM: f32 = 1.5;
/// Hold after the last launch before the scan switches itself off.
const EXIT_HOLD_MS: f32 = 2000.0;

/// Period of one wave sweep, seconds.
pub const WAVE_PERIOD_SECS: f32 = 1.2;
/// Wave front speed, units per second.
pub const WAVE_SPEED: f32 = 833.0;
/// Half-width of the bright band around the wave front.
pub const WAVE_THICKNESS: f32 = 50.0;

/// Offset from scan start at which message `index` launches.
pub fn launch_at_ms(index: usize) -> f32 {
    (0..=index).map(|i| 1500.0 + 300.0 * i as f32).sum()
}

/// Offset from scan start at which the scan ends by itself.
pub fn scan_duration_ms() -> f32 {
    launch_at_ms(SCAN_MESSAGES.len() - 1) + EXIT_HOLD_MS
}

/// A running scan.
#[derive(Clone, Debug, Default)]
pub struct ScanSequence {
    elapsed_ms: f32,
    launched: usize,
}

impl ScanSequence {
    /// Switch the scan overlays on and clear the feed.
    pub fn start(stage: &mut Stage) -> Self {
        tracing::info!("scan engaged");
        stage.hud.overlays.engage_scan();
        stage.hud.overlays.noise_distort = true;
        stage.hud.feed.clear();
        stage.hud.scan_progress = 0.0;
        stage.effects.bloom = SCAN_BLOOM;
        Self::default()
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// Messages launched so far.
    pub fn launched(&self) -> usize {
        self.launched
    }

    /// Launch every message that has come due, then end the scan once the
    /// hold after the last one has passed.
    pub fn advance(&mut self, dt_ms: f32, stage: &mut Stage) -> SequenceStatus {
        self.elapsed_ms += dt_ms.max(0.0);

        while self.launched < SCAN_MESSAGES.len() && self.elapsed_ms >= launch_at_ms(self.launched) {
            stage.hud.feed.push(SCAN_MESSAGES[self.launched]);
            self.launched += 1;
            stage.hud.scan_progress = self.launched as f32 / SCAN_MESSAGES.len() as f32 * 100.0;
            tracing::debug!(message = self.launched, "scan message launched");
        }

        if self.elapsed_ms >= scan_duration_ms() {
            Self::release(stage);
            SequenceStatus::Finished
        } else {
            SequenceStatus::Running
        }
    }

    /// Stop before the schedule ends. Lines already in the feed keep typing.
    pub fn cancel(self, stage: &mut Stage) {
        tracing::info!(launched = self.launched, "scan cancelled");
        Self::release(stage);
    }

    fn release(stage: &mut Stage) {
        tracing::info!("scan overlays released");
        stage.hud.overlays.release_scan();
        stage.hud.overlays.noise_distort = false;
        stage.hud.scan_progress = 0.0;
        stage.effects.bloom = POST_SCAN_BLOOM;
    }

    /// Current radius of the wave front.
    pub fn wave_radius(&self) -> f32 {
        (self.elapsed_ms / 1000.0) % WAVE_PERIOD_SECS * WAVE_SPEED
    }
}

/// Recolor the cloud for one wave position: particles near the front (by
/// distance from the Z axis) glow toward white, everything else is cyan.
pub fn apply_wave(positions: &[Vec3], colors: &mut [Vec3], radius: f32) {
    let cyan = hex_color(CYAN);
    for (p, c) in positions.iter().zip(colors.iter_mut()) {
        let off = (p.truncate().length() - radius).abs();
        *c = if off < WAVE_THICKNESS {
            let intensity = 1.0 - off / WAVE_THICKNESS;
            Vec3::new(intensity * 0.5, 1.0, 1.0)
        } else {
            cyan
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn stage() -> Stage {
        let config = SceneConfig {
            particle_count: 100,
            ..SceneConfig::default()
        };
        Stage::new(&config, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_launch_schedule() {
        let launches: Vec<f32> = (0..SCAN_MESSAGES.len()).map(launch_at_ms).collect();
        assert_eq!(launches, vec![1500.0, 3300.0, 5400.0, 7800.0, 10_500.0]);
        assert_eq!(scan_duration_ms(), 12_500.0);
    }

    #[test]
    fn test_start_engages_overlays() {
        let mut stage = stage();
        stage.hud.feed.push("stale");
        let _scan = ScanSequence::start(&mut stage);
        assert!(stage.hud.overlays.scan_overlay);
        assert!(stage.hud.overlays.turbo_locked);
        assert!(stage.hud.overlays.noise_distort);
        assert!(stage.hud.feed.lines().is_empty());
        assert_eq!(stage.effects.bloom, SCAN_BLOOM);
    }

    #[test]
    fn test_progress_follows_launches() {
        let mut stage = stage();
        let mut scan = ScanSequence::start(&mut stage);

        scan.advance(1499.0, &mut stage);
        assert_eq!(scan.launched(), 0);
        assert_eq!(stage.hud.scan_progress, 0.0);

        scan.advance(1.0, &mut stage);
        assert_eq!(scan.launched(), 1);
        assert_eq!(stage.hud.scan_progress, 20.0);

        scan.advance(9000.0, &mut stage);
        assert_eq!(scan.launched(), 5);
        assert_eq!(stage.hud.scan_progress, 100.0);
        assert_eq!(stage.hud.feed.lines().len(), 5);
    }

    #[test]
    fn test_finishes_and_restores() {
        let mut stage = stage();
        let mut scan = ScanSequence::start(&mut stage);
        assert_eq!(scan.advance(12_499.0, &mut stage), SequenceStatus::Running);
        assert_eq!(scan.advance(1.0, &mut stage), SequenceStatus::Finished);
        assert!(!stage.hud.overlays.scan_overlay);
        assert!(!stage.hud.overlays.turbo_locked);
        assert_eq!(stage.hud.overlays.compass_label, None);
        assert_eq!(stage.hud.scan_progress, 0.0);
        assert_eq!(stage.effects.bloom, POST_SCAN_BLOOM);
    }

    #[test]
    fn test_cancel_lets_typing_finish() {
        let mut stage = stage();
        let mut scan = ScanSequence::start(&mut stage);
        scan.advance(1600.0, &mut stage);
        scan.cancel(&mut stage);

        assert!(!stage.hud.overlays.scan_panel);
        assert_eq!(stage.hud.feed.lines().len(), 1);
        assert!(stage.hud.feed.is_typing());
        stage.hud.feed.tick(5000.0);
        assert!(!stage.hud.feed.is_typing());
    }

    #[test]
    fn test_wave_band() {
        let positions = [
            Vec3::new(100.0, 0.0, 40.0),
            Vec3::new(0.0, 130.0, 0.0),
            Vec3::new(400.0, 0.0, 0.0),
        ];
        let mut colors = [Vec3::ZERO; 3];
        apply_wave(&positions, &mut colors, 100.0);
        assert_eq!(colors[0], Vec3::new(0.5, 1.0, 1.0));
        assert!((colors[1].x - 0.2).abs() < 1e-5);
        assert_eq!(colors[2], hex_color(CYAN));
    }

    #[test]
    fn test_wave_radius_cycles() {
        let mut stage = stage();
        let mut scan = ScanSequence::start(&mut stage);
        assert_eq!(scan.wave_radius(), 0.0);
        scan.advance(600.0, &mut stage);
        assert!((scan.wave_radius() - 0.6 * WAVE_SPEED).abs() < 1e-2);
        scan.advance(600.0, &mut stage);
        assert!(scan.wave_radius() < 1.0);
    }
}
