//! Orientation Model: a fly camera driven by yaw/pitch angles and discrete
//! movement, look, and zoom events.
//!
//! # Invariants
//! - `front`, `right`, `up` are derived from yaw/pitch/world_up and are
//!   recomputed on every mutating call; they are never stale.
//! - The basis is orthonormal after every update.
//! - Field of view stays in [1°, 45°].
//! - Projection is not built here; renderers consume `field_of_view()`.

pub mod camera;
pub mod config;

pub use camera::{
    Basis, Camera, Movement, DEFAULT_FOV, DEFAULT_PITCH, DEFAULT_SENSITIVITY, DEFAULT_SPEED,
    DEFAULT_YAW, FOV_MAX, FOV_MIN, PITCH_LIMIT,
};
pub use config::{CameraConfig, CameraError};

pub fn crate_info() -> &'static str {
    "eyeline-camera v0.1.0"
}
