//! Scene configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all) is
//! a valid configuration. Command-line flags override what the file says.

use crate::error::ConfigError;
use crate::morph::MORPH_DURATION_MS;
use crate::shapes::{Shape, DEFAULT_PARTICLE_COUNT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Points in the main cloud.
    pub particle_count: usize,
    /// Length of a shape morph.
    pub morph_duration_ms: f32,
    /// Shape id shown first; unknown ids fall back like any other shape id.
    pub initial_shape: String,
    pub camera_float_speed: f32,
    pub camera_float_amount: f32,
    /// Pointer-follow damping per reference frame, `[0, 1]`.
    pub pointer_damping: f32,
    /// Fixed RNG seed; random when absent.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            morph_duration_ms: MORPH_DURATION_MS,
            initial_shape: Shape::Triangle.id().to_owned(),
            camera_float_speed: 0.0003,
            camera_float_amount: 8.0,
            pointer_damping: 0.05,
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Encode)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::Invalid("particle_count must be positive".into()));
        }
        if !self.morph_duration_ms.is_finite() || self.morph_duration_ms < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "morph_duration_ms must be finite and non-negative, got {}",
                self.morph_duration_ms
            )));
        }
        for (name, value) in [
            ("camera_float_speed", self.camera_float_speed),
            ("camera_float_amount", self.camera_float_amount),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }
        if !(0.0..=1.0).contains(&self.pointer_damping) {
            return Err(ConfigError::Invalid(format!(
                "pointer_damping must be within [0, 1], got {}",
                self.pointer_damping
            )));
        }
        Ok(())
    }

    /// The configured starting shape.
    pub fn initial_shape(&self) -> Shape {
        Shape::from_id(&self.initial_shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.particle_count, 18_000);
        assert_eq!(config.morph_duration_ms, 1500.0);
        assert_eq!(config.initial_shape(), Shape::Triangle);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "particle_count": 500, "seed": 42 }}"#).unwrap();

        let config = SceneConfig::load(file.path()).unwrap();
        assert_eq!(config.particle_count, 500);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.pointer_damping, 0.05);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let config = SceneConfig {
            initial_shape: "lorenz".into(),
            ..SceneConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(SceneConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_particles() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "particle_count": 0 }}"#).unwrap();
        assert!(matches!(
            SceneConfig::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_negative_duration() {
        let config = SceneConfig {
            morph_duration_ms: -1.0,
            ..SceneConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reports_parse_and_io_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            SceneConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            SceneConfig::load("/definitely/not/here.json"),
            Err(ConfigError::Io { .. })
        ));
    }
}
