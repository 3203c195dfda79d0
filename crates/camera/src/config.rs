use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::camera::{
    DEFAULT_FOV, DEFAULT_PITCH, DEFAULT_SENSITIVITY, DEFAULT_SPEED, DEFAULT_YAW, FOV_MAX, FOV_MIN,
    is_valid_tuning,
};

/// Errors from loading or validating a camera config.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("non-finite value in `{field}`")]
    NonFinite { field: &'static str },
    #[error("world_up must be a non-zero vector")]
    DegenerateWorldUp,
    #[error("`{field}` must be positive, got {value}")]
    InvalidTuning { field: &'static str, value: f32 },
    #[error("field of view {0} is outside [1, 45] degrees")]
    FieldOfViewOutOfRange(f32),
}

/// Initial camera state and tuning, loadable from JSON.
///
/// Every field has a default, so partial files (e.g. only `position`) work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub world_up: Vec3,
    /// Degrees.
    pub yaw: f32,
    /// Degrees. Clamped to ±89° when the camera is built.
    pub pitch: f32,
    pub movement_speed: f32,
    pub look_sensitivity: f32,
    /// Degrees, in [1, 45].
    pub field_of_view: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            world_up: Vec3::Y,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            movement_speed: DEFAULT_SPEED,
            look_sensitivity: DEFAULT_SENSITIVITY,
            field_of_view: DEFAULT_FOV,
        }
    }
}

impl CameraConfig {
    pub fn from_json_str(json: &str) -> Result<Self, CameraError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CameraError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "loaded camera config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CameraError> {
        for (field, v) in [("position", self.position), ("world_up", self.world_up)] {
            if !v.is_finite() {
                return Err(CameraError::NonFinite { field });
            }
        }
        for (field, v) in [
            ("yaw", self.yaw),
            ("pitch", self.pitch),
            ("movement_speed", self.movement_speed),
            ("look_sensitivity", self.look_sensitivity),
            ("field_of_view", self.field_of_view),
        ] {
            if !v.is_finite() {
                return Err(CameraError::NonFinite { field });
            }
        }

        if self.world_up.length_squared() <= f32::EPSILON {
            return Err(CameraError::DegenerateWorldUp);
        }

        for (field, value) in [
            ("movement_speed", self.movement_speed),
            ("look_sensitivity", self.look_sensitivity),
        ] {
            if !is_valid_tuning(value) {
                return Err(CameraError::InvalidTuning { field, value });
            }
        }

        if !(FOV_MIN..=FOV_MAX).contains(&self.field_of_view) {
            return Err(CameraError::FieldOfViewOutOfRange(self.field_of_view));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Camera;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = CameraConfig::default();
        assert!(config.validate().is_ok());
        let cam = Camera::from_config(&config).unwrap();
        assert_eq!(cam, Camera::default());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = CameraConfig::from_json_str(r#"{ "position": [0.0, 0.0, 3.0] }"#).unwrap();
        assert_eq!(config.position, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(config.yaw, DEFAULT_YAW);
        assert_eq!(config.field_of_view, DEFAULT_FOV);
    }

    #[test]
    fn tuning_flows_into_camera() {
        let config = CameraConfig {
            movement_speed: 5.0,
            look_sensitivity: 0.2,
            field_of_view: 30.0,
            ..CameraConfig::default()
        };
        let cam = Camera::from_config(&config).unwrap();
        assert_eq!(cam.movement_speed(), 5.0);
        assert_eq!(cam.look_sensitivity(), 0.2);
        assert_eq!(cam.field_of_view(), 30.0);
    }

    #[test]
    fn zero_world_up_rejected() {
        let config = CameraConfig {
            world_up: Vec3::ZERO,
            ..CameraConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CameraError::DegenerateWorldUp)
        ));
    }

    #[test]
    fn non_positive_speed_rejected() {
        let config = CameraConfig {
            movement_speed: 0.0,
            ..CameraConfig::default()
        };
        assert!(matches!(
            Camera::from_config(&config),
            Err(CameraError::InvalidTuning {
                field: "movement_speed",
                ..
            })
        ));
    }

    #[test]
    fn fov_out_of_range_rejected() {
        let err = CameraConfig::from_json_str(r#"{ "field_of_view": 60.0 }"#).unwrap_err();
        assert!(matches!(err, CameraError::FieldOfViewOutOfRange(f) if f == 60.0));
    }

    #[test]
    fn non_finite_rejected() {
        let config = CameraConfig {
            yaw: f32::NAN,
            ..CameraConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CameraError::NonFinite { field: "yaw" })
        ));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = CameraConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CameraError::Json(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "yaw": 0.0, "pitch": 30.0 }}"#).unwrap();
        let config = CameraConfig::load(file.path()).unwrap();
        assert_eq!(config.yaw, 0.0);
        assert_eq!(config.pitch, 30.0);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CameraConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CameraError::Io(_)));
    }
}
