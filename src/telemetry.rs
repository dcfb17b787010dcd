//! Cosmetic flight instruments.
//!
//! Values random-walk once per 60 Hz reference frame inside fixed bands and
//! are published to a [`HudSink`] as formatted strings with a color class.
//! Nothing here reflects real state; it only has to look alive.

use crate::hud::{HudKey, HudSink, Level};
use crate::sampling::SampleExt;
use rand::Rng;

/// Most reference-frame steps run in a single update; anything beyond is dropped.
const MAX_STEPS_PER_UPDATE: u32 = 600;

/// Instrument readings.
#[derive(Clone, Debug, PartialEq)]
pub struct Telemetry {
    /// Kilometers to the nearest object.
    pub proximity: f32,
    /// Fraction of light speed.
    pub velocity: f32,
    /// Meters.
    pub altitude: f32,
    pub nav_code: String,
    /// Degrees, `[0, 360)`.
    pub yaw: f32,
    /// Degrees, `[-30, 30]`.
    pub pitch: f32,
    /// Degrees, `[-15, 15]`.
    pub roll: f32,
    /// Percentages.
    pub power: f32,
    pub shield: f32,
    pub fuel: f32,
    pending_frames: f32,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self {
            proximity: 12.4,
            velocity: 0.8,
            altitude: 2847.0,
            nav_code: "AX7-912".to_owned(),
            yaw: 285.0,
            pitch: -12.0,
            roll: 3.0,
            power: 89.0,
            shield: 100.0,
            fuel: 67.0,
            pending_frames: 0.0,
        }
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one step for every whole reference frame in `frames` (carrying
    /// the remainder to the next call). Returns the number of steps taken.
    pub fn update<R: Rng + ?Sized>(&mut self, frames: f32, turbo: bool, rng: &mut R) -> u32 {
        self.pending_frames += frames.max(0.0);
        let mut steps = 0;
        while self.pending_frames >= 1.0 {
            self.pending_frames -= 1.0;
            if steps < MAX_STEPS_PER_UPDATE {
                self.step(turbo, rng);
                steps += 1;
            }
        }
        steps
    }

    /// One reference-frame step.
    pub fn step<R: Rng + ?Sized>(&mut self, turbo: bool, rng: &mut R) {
        self.velocity = (self.velocity + rng.centered() * 0.05).clamp(0.7, 0.9);

        self.proximity += (rng.unit() - 0.3) * 0.8;
        if self.proximity < 0.0 {
            self.proximity = 15.0 + rng.unit() * 5.0;
        }

        self.altitude = (self.altitude + rng.centered() * 50.0).clamp(2500.0, 3200.0);

        if rng.unit() < 0.02 {
            self.nav_code = random_nav_code(rng);
        }

        self.yaw += rng.centered() * 2.0;
        if self.yaw < 0.0 {
            self.yaw += 360.0;
        }
        if self.yaw >= 360.0 {
            self.yaw -= 360.0;
        }
        self.pitch = (self.pitch + rng.centered() * 1.5).clamp(-30.0, 30.0);
        self.roll = (self.roll + rng.centered()).clamp(-15.0, 15.0);

        if turbo {
            self.power = (self.power - 0.15).max(0.0);
        } else {
            self.power -= 0.01;
            if self.power < 75.0 {
                self.power = 95.0 + rng.unit() * 5.0;
            }
        }

        if self.shield < 100.0 {
            self.shield += 0.2;
        } else if rng.unit() < 0.01 {
            self.shield -= rng.unit() * 5.0;
        }
        self.shield = self.shield.clamp(0.0, 100.0);

        self.fuel -= if turbo { 0.08 } else { 0.01 };
        if self.fuel < 30.0 {
            self.fuel = 85.0 + rng.unit() * 15.0;
        }
    }

    /// Mean of power, shield and fuel.
    pub fn status(&self) -> f32 {
        (self.power + self.shield + self.fuel) / 3.0
    }

    pub fn power_level(&self) -> Level {
        if self.power > 80.0 {
            Level::Green
        } else if self.power > 50.0 {
            Level::Yellow
        } else {
            Level::Red
        }
    }

    pub fn shield_level(&self) -> Level {
        if self.shield > 80.0 {
            Level::Cyan
        } else if self.shield > 50.0 {
            Level::Yellow
        } else {
            Level::Red
        }
    }

    pub fn fuel_level(&self) -> Level {
        if self.fuel > 50.0 {
            Level::Yellow
        } else if self.fuel > 30.0 {
            Level::Orange
        } else {
            Level::Red
        }
    }

    /// Write every readout to `sink`.
    pub fn publish(&self, sink: &mut impl HudSink) {
        sink.set_text(HudKey::Proximity, &format!("{:.1} KM", self.proximity));
        sink.set_text(HudKey::Velocity, &format!("{:.1}c", self.velocity));
        sink.set_text(
            HudKey::Altitude,
            &format!("{} M", group_thousands(self.altitude.floor() as i64)),
        );
        sink.set_text(HudKey::NavCode, &format!("NAV-CODE: {}", self.nav_code));
        sink.set_text(HudKey::Yaw, &format!("{}°", self.yaw.floor()));
        sink.set_text(HudKey::Pitch, &signed_degrees(self.pitch));
        sink.set_text(HudKey::Roll, &signed_degrees(self.roll));

        sink.set_text(HudKey::Power, &format!("{}%", self.power.floor()));
        sink.set_text(HudKey::Shield, &format!("{}%", self.shield.floor()));
        sink.set_text(HudKey::Fuel, &format!("{}%", self.fuel.floor()));
        sink.set_level(HudKey::Power, self.power_level());
        sink.set_level(HudKey::Shield, self.shield_level());
        sink.set_level(HudKey::Fuel, self.fuel_level());

        sink.set_text(HudKey::StatusBar, &format!("{}%", self.status().floor()));
    }
}

/// `LL#-###`, e.g. `QK4-318`.
fn random_nav_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    let letter = |rng: &mut R| char::from(b'A' + rng.gen_range(0..26u8));
    let a = letter(rng);
    let b = letter(rng);
    let digit = rng.gen_range(0..10);
    let num = rng.gen_range(100..1000);
    format!("{a}{b}{digit}-{num}")
}

/// `+3°`, `-12°`; the sign follows the unfloored value.
fn signed_degrees(value: f32) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{}°", value.floor())
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::HudBoard;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bands_hold() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut t = Telemetry::new();
        for i in 0..50_000 {
            t.step(i % 7 == 0, &mut rng);
            assert!((0.7..=0.9).contains(&t.velocity));
            assert!((0.0..=100.0).contains(&t.shield));
            assert!((2500.0..=3200.0).contains(&t.altitude));
            assert!((0.0..360.0).contains(&t.yaw));
            assert!((-30.0..=30.0).contains(&t.pitch));
            assert!((-15.0..=15.0).contains(&t.roll));
            assert!(t.fuel >= 30.0);
            assert!(t.proximity >= 0.0);
            assert!(t.power >= 0.0);
        }
    }

    #[test]
    fn test_turbo_drain_floors_power() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut t = Telemetry::new();
        for _ in 0..2000 {
            t.step(true, &mut rng);
        }
        assert_eq!(t.power, 0.0);
        for _ in 0..10 {
            t.step(false, &mut rng);
        }
        assert!(t.power >= 95.0);
    }

    #[test]
    fn test_fractional_frames_accumulate() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut t = Telemetry::new();
        assert_eq!(t.update(0.6, false, &mut rng), 0);
        assert_eq!(t.update(0.6, false, &mut rng), 1);
        assert_eq!(t.update(2.0, false, &mut rng), 2);
    }

    #[test]
    fn test_levels() {
        let mut t = Telemetry::new();
        t.power = 81.0;
        t.shield = 60.0;
        t.fuel = 40.0;
        assert_eq!(t.power_level(), Level::Green);
        assert_eq!(t.shield_level(), Level::Yellow);
        assert_eq!(t.fuel_level(), Level::Orange);
        t.power = 50.0;
        t.shield = 10.0;
        t.fuel = 51.0;
        assert_eq!(t.power_level(), Level::Red);
        assert_eq!(t.shield_level(), Level::Red);
        assert_eq!(t.fuel_level(), Level::Yellow);
    }

    #[test]
    fn test_publish_formats() {
        let mut board = HudBoard::new();
        Telemetry::new().publish(&mut board);
        assert_eq!(board.get(HudKey::Proximity), Some("12.4 KM"));
        assert_eq!(board.get(HudKey::Velocity), Some("0.8c"));
        assert_eq!(board.get(HudKey::Altitude), Some("2,847 M"));
        assert_eq!(board.get(HudKey::NavCode), Some("NAV-CODE: AX7-912"));
        assert_eq!(board.get(HudKey::Yaw), Some("285°"));
        assert_eq!(board.get(HudKey::Pitch), Some("-12°"));
        assert_eq!(board.get(HudKey::Roll), Some("+3°"));
        assert_eq!(board.get(HudKey::Power), Some("89%"));
        assert_eq!(board.get(HudKey::StatusBar), Some("85%"));
        assert_eq!(board.level(HudKey::Shield), Some(Level::Cyan));
    }

    #[test]
    fn test_nav_code_shape() {
        let mut rng = StdRng::seed_from_u64(14);
        for _ in 0..100 {
            let code = random_nav_code(&mut rng);
            let bytes = code.as_bytes();
            assert_eq!(bytes.len(), 7);
            assert!(bytes[..2].iter().all(u8::is_ascii_uppercase));
            assert!(bytes[2].is_ascii_digit());
            assert_eq!(bytes[3], b'-');
            assert!(bytes[4..].iter().all(u8::is_ascii_digit));
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(2847), "2,847");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-3200), "-3,200");
    }
}
