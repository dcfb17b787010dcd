//! Heads-up display state and the sink it is published through.
//!
//! The scene never touches a concrete UI. Readouts go out through the
//! [`HudSink`] trait as key → text updates; the native viewer and the tests
//! both use the in-memory [`HudBoard`]. Longer-lived HUD state (overlay
//! flags, the scan message feed, the status ticker) lives in [`HudState`].

use std::collections::BTreeMap;

/// Named readout slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HudKey {
    Proximity,
    Velocity,
    Altitude,
    NavCode,
    Yaw,
    Pitch,
    Roll,
    Power,
    Shield,
    Fuel,
    /// Width of the status bar, e.g. `"84%"`.
    StatusBar,
    /// Width of the scan progress bar.
    ScanProgress,
    /// Rotating status line.
    Ticker,
}

/// Color class of a readout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Green,
    Cyan,
    Yellow,
    Orange,
    Red,
}

/// Destination for HUD updates.
pub trait HudSink {
    /// Replace the text shown in `key`.
    fn set_text(&mut self, key: HudKey, text: &str);

    /// Change the color class of `key`. Sinks without colors can ignore it.
    fn set_level(&mut self, _key: HudKey, _level: Level) {}
}

/// In-memory sink that remembers the latest value of every key.
#[derive(Clone, Debug, Default)]
pub struct HudBoard {
    texts: BTreeMap<HudKey, String>,
    levels: BTreeMap<HudKey, Level>,
}

impl HudBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: HudKey) -> Option<&str> {
        self.texts.get(&key).map(String::as_str)
    }

    pub fn level(&self, key: HudKey) -> Option<Level> {
        self.levels.get(&key).copied()
    }

    /// One-line summary of the flight readouts, e.g. for a window title.
    pub fn summary(&self) -> String {
        [
            HudKey::Velocity,
            HudKey::Proximity,
            HudKey::Altitude,
            HudKey::Power,
            HudKey::Shield,
            HudKey::Fuel,
            HudKey::NavCode,
        ]
        .iter()
        .filter_map(|k| self.get(*k))
        .collect::<Vec<_>>()
        .join(" | ")
    }
}

impl HudSink for HudBoard {
    fn set_text(&mut self, key: HudKey, text: &str) {
        match self.texts.get_mut(&key) {
            Some(existing) => {
                existing.clear();
                existing.push_str(text);
            }
            None => {
                self.texts.insert(key, text.to_owned());
            }
        }
    }

    fn set_level(&mut self, key: HudKey, level: Level) {
        self.levels.insert(key, level);
    }
}

/// Overlay switches toggled by the sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overlays {
    pub scan_overlay: bool,
    pub scan_wave: bool,
    pub scan_panel: bool,
    pub scan_button: bool,
    pub crosshair_scan: bool,
    /// Turbo control disabled while scanning.
    pub turbo_locked: bool,
    /// Holographic noise layer distorts while a sequence runs.
    pub noise_distort: bool,
    /// Replacement compass label while scanning.
    pub compass_label: Option<&'static str>,
    /// Replacement energy label while scanning.
    pub energy_label: Option<&'static str>,
}

impl Overlays {
    /// Switch on everything the scan shows.
    pub fn engage_scan(&mut self) {
        self.scan_overlay = true;
        self.scan_wave = true;
        self.scan_panel = true;
        self.scan_button = true;
        self.crosshair_scan = true;
        self.turbo_locked = true;
        self.compass_label = Some("SCAN RANGE");
        self.energy_label = Some("SCAN POWER");
    }

    /// Undo [`Overlays::engage_scan`].
    pub fn release_scan(&mut self) {
        self.scan_overlay = false;
        self.scan_wave = false;
        self.scan_panel = false;
        self.scan_button = false;
        self.crosshair_scan = false;
        self.turbo_locked = false;
        self.compass_label = None;
        self.energy_label = None;
    }
}

/// Typing cadence of the scan feed.
pub const TYPE_INTERVAL_MS: f32 = 30.0;
/// Speaker prefix split off into a label.
const SPEAKER: &str = "AION:";

/// A message being typed into the feed one character at a time.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedLine {
    label: Option<&'static str>,
    text: String,
    len: usize,
    elapsed_ms: f32,
}

impl TypedLine {
    pub fn new(message: &str) -> Self {
        let label = message.contains(SPEAKER).then_some(SPEAKER);
        let text = message.replacen("AION: ", "", 1);
        let len = text.chars().count();
        Self {
            label,
            text,
            len,
            elapsed_ms: 0.0,
        }
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.elapsed_ms += dt_ms.max(0.0);
    }

    /// Characters revealed so far.
    pub fn typed(&self) -> usize {
        ((self.elapsed_ms / TYPE_INTERVAL_MS) as usize).min(self.len)
    }

    pub fn is_complete(&self) -> bool {
        self.typed() == self.len
    }

    pub fn label(&self) -> Option<&'static str> {
        self.label
    }

    /// The revealed part of the message, without the label.
    pub fn visible(&self) -> String {
        self.text.chars().take(self.typed()).collect()
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }
}

/// The scan message feed.
#[derive(Clone, Debug, Default)]
pub struct MessageFeed {
    lines: Vec<TypedLine>,
}

impl MessageFeed {
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn push(&mut self, message: &str) {
        self.lines.push(TypedLine::new(message));
    }

    /// Keep typing every line that has not finished.
    pub fn tick(&mut self, dt_ms: f32) {
        for line in self.lines.iter_mut().filter(|l| !l.is_complete()) {
            line.tick(dt_ms);
        }
    }

    pub fn lines(&self) -> &[TypedLine] {
        &self.lines
    }

    pub fn is_typing(&self) -> bool {
        self.lines.iter().any(|l| !l.is_complete())
    }
}

/// Status lines cycled by the ticker.
pub const TICKER_MESSAGES: [&str; 10] = [
    "SYNCING STAR MAP...",
    "ROUTE VECTOR CONFIRMED",
    "GRAV FIELD NOMINAL",
    "MICRO-PARTICLES DETECTED",
    "SIGNAL CLEAN",
    "QUANTUM LOCK STABLE",
    "DIMENSIONAL ANCHOR OK",
    "SCANNING ANOMALIES",
    "ENERGY LEVELS OPTIMAL",
    "TELEMETRY SYNCHRONIZED",
];
const TICKER_PERIOD_MS: f32 = 4000.0;
const TICKER_FADE_MS: f32 = 500.0;

/// Rotating status line: every period it fades out, swaps, and fades back in.
#[derive(Clone, Debug, Default)]
pub struct Ticker {
    index: usize,
    since_rotate_ms: f32,
    fade_ms: Option<f32>,
}

impl Ticker {
    /// Advance the ticker; returns `true` when the visible message changed.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let dt_ms = dt_ms.max(0.0);
        self.since_rotate_ms += dt_ms;
        if self.since_rotate_ms >= TICKER_PERIOD_MS {
            self.since_rotate_ms -= TICKER_PERIOD_MS;
            self.fade_ms = Some(0.0);
        }
        if let Some(fade) = self.fade_ms.as_mut() {
            *fade += dt_ms;
            if *fade >= TICKER_FADE_MS {
                self.fade_ms = None;
                self.index = (self.index + 1) % TICKER_MESSAGES.len();
                return true;
            }
        }
        false
    }

    pub fn message(&self) -> &'static str {
        TICKER_MESSAGES[self.index]
    }

    /// 0 while swapping, 1 otherwise.
    pub fn opacity(&self) -> f32 {
        if self.fade_ms.is_some() {
            0.0
        } else {
            1.0
        }
    }
}

/// Vertical offset of the horizon line in pixels for a pitch in degrees.
pub fn horizon_offset(pitch_degrees: f32) -> f32 {
    pitch_degrees / 30.0 * 8.0
}

/// Everything HUD-side the scene keeps between frames.
#[derive(Clone, Debug, Default)]
pub struct HudState {
    pub overlays: Overlays,
    pub feed: MessageFeed,
    /// Scan progress in percent.
    pub scan_progress: f32,
    pub ticker: Ticker,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_overwrites() {
        let mut board = HudBoard::new();
        board.set_text(HudKey::Fuel, "67%");
        board.set_text(HudKey::Fuel, "66%");
        board.set_level(HudKey::Fuel, Level::Yellow);
        assert_eq!(board.get(HudKey::Fuel), Some("66%"));
        assert_eq!(board.level(HudKey::Fuel), Some(Level::Yellow));
        assert_eq!(board.get(HudKey::Shield), None);
    }

    #[test]
    fn test_typed_line_cadence() {
        let mut line = TypedLine::new("AION: Signal clean.");
        assert_eq!(line.label(), Some("AION:"));
        assert_eq!(line.full_text(), "Signal clean.");
        assert_eq!(line.visible(), "");

        line.tick(95.0);
        assert_eq!(line.visible(), "Sig");
        line.tick(10_000.0);
        assert!(line.is_complete());
        assert_eq!(line.visible(), "Signal clean.");
    }

    #[test]
    fn test_typed_line_without_speaker() {
        let line = TypedLine::new("plain text");
        assert_eq!(line.label(), None);
        assert_eq!(line.full_text(), "plain text");
    }

    #[test]
    fn test_typed_line_counts_chars() {
        let mut line = TypedLine::new("AION: Anomalia — ok");
        line.tick(30.0 * 100.0);
        assert_eq!(line.visible(), "Anomalia — ok");
    }

    #[test]
    fn test_overlays_round_trip() {
        let mut overlays = Overlays::default();
        overlays.engage_scan();
        assert!(overlays.turbo_locked);
        assert_eq!(overlays.compass_label, Some("SCAN RANGE"));
        overlays.release_scan();
        assert_eq!(overlays, Overlays::default());
    }

    #[test]
    fn test_ticker_rotates() {
        let mut ticker = Ticker::default();
        assert_eq!(ticker.message(), TICKER_MESSAGES[0]);
        assert!(!ticker.tick(3999.0));
        assert!(!ticker.tick(1.0));
        assert_eq!(ticker.opacity(), 0.0);
        assert!(ticker.tick(500.0));
        assert_eq!(ticker.message(), TICKER_MESSAGES[1]);
        assert_eq!(ticker.opacity(), 1.0);
    }

    #[test]
    fn test_horizon_offset() {
        assert_eq!(horizon_offset(30.0), 8.0);
        assert_eq!(horizon_offset(-15.0), -4.0);
    }
}
