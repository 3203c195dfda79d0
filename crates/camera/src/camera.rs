use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::{CameraConfig, CameraError};

/// Yaw of 0° points `front` along +X, so cameras start rotated to face -Z.
pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_SPEED: f32 = 2.5;
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
pub const DEFAULT_FOV: f32 = 45.0;

/// Pitch bound in degrees. Keeps `front` away from `world_up`.
pub const PITCH_LIMIT: f32 = 89.0;
pub const FOV_MIN: f32 = 1.0;
pub const FOV_MAX: f32 = 45.0;

/// Cross products shorter than this are treated as degenerate.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Discrete movement direction forwarded by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Orthonormal camera basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub front: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

/// Fly camera with position, Euler angles (degrees), and tuning parameters.
///
/// All mutation goes through `apply_*`, which re-derives the basis before
/// returning. The `apply_*` methods drop non-finite inputs; constructors
/// require finite angles.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    movement_speed: f32,
    look_sensitivity: f32,
    field_of_view: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y)
    }
}

impl Camera {
    /// Camera at `position` with the default yaw (-90°) and pitch (0°).
    pub fn new(position: Vec3, world_up: Vec3) -> Self {
        Self::with_angles(position, world_up, DEFAULT_YAW, DEFAULT_PITCH)
    }

    /// Camera with explicit angles in degrees. Pitch is clamped to ±89°.
    ///
    /// `world_up` must be non-zero; it is stored normalized.
    pub fn with_angles(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        debug_assert!(
            world_up.length_squared() > 0.0,
            "world_up must be a non-zero vector"
        );
        debug_assert!(
            yaw.is_finite() && pitch.is_finite(),
            "yaw and pitch must be finite"
        );
        let mut camera = Self {
            position,
            world_up: world_up.normalize_or(Vec3::Y),
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            movement_speed: DEFAULT_SPEED,
            look_sensitivity: DEFAULT_SENSITIVITY,
            field_of_view: DEFAULT_FOV,
        };
        camera.update_basis();
        camera
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_scalars(
        pos_x: f32,
        pos_y: f32,
        pos_z: f32,
        up_x: f32,
        up_y: f32,
        up_z: f32,
        yaw: f32,
        pitch: f32,
    ) -> Self {
        Self::with_angles(
            Vec3::new(pos_x, pos_y, pos_z),
            Vec3::new(up_x, up_y, up_z),
            yaw,
            pitch,
        )
    }

    /// Build a camera from a validated config.
    pub fn from_config(config: &CameraConfig) -> Result<Self, CameraError> {
        config.validate()?;
        let mut camera =
            Self::with_angles(config.position, config.world_up, config.yaw, config.pitch);
        camera.movement_speed = config.movement_speed;
        camera.look_sensitivity = config.look_sensitivity;
        camera.field_of_view = config.field_of_view;
        tracing::debug!(
            position = ?camera.position,
            yaw = camera.yaw,
            pitch = camera.pitch,
            fov = camera.field_of_view,
            "camera built from config"
        );
        Ok(camera)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// Yaw in degrees. Unbounded.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn basis(&self) -> Basis {
        Basis {
            front: self.front,
            right: self.right,
            up: self.up,
        }
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn look_sensitivity(&self) -> f32 {
        self.look_sensitivity
    }

    /// Field of view in degrees, for the renderer's projection.
    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    /// Ignored unless finite and positive, as in `CameraConfig::validate`.
    pub fn set_movement_speed(&mut self, speed: f32) {
        if is_valid_tuning(speed) {
            self.movement_speed = speed;
        } else {
            tracing::trace!(speed, "ignoring invalid movement speed");
        }
    }

    /// Ignored unless finite and positive, as in `CameraConfig::validate`.
    pub fn set_look_sensitivity(&mut self, sensitivity: f32) {
        if is_valid_tuning(sensitivity) {
            self.look_sensitivity = sensitivity;
        } else {
            tracing::trace!(sensitivity, "ignoring invalid look sensitivity");
        }
    }

    /// Right-handed look-at from `position` towards `position + front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Displace along `front` or `right` by `movement_speed * elapsed`.
    pub fn apply_movement(&mut self, direction: Movement, elapsed: f32) {
        if !elapsed.is_finite() {
            tracing::trace!(elapsed, "dropping non-finite movement step");
            return;
        }
        let velocity = self.movement_speed * elapsed;
        match direction {
            Movement::Forward => self.position += self.front * velocity,
            Movement::Backward => self.position -= self.front * velocity,
            Movement::Left => self.position -= self.right * velocity,
            Movement::Right => self.position += self.right * velocity,
        }
    }

    /// Add scaled cursor deltas to yaw/pitch, then re-derive the basis.
    pub fn apply_look(&mut self, delta_x: f32, delta_y: f32, constrain_pitch: bool) {
        if !delta_x.is_finite() || !delta_y.is_finite() {
            tracing::trace!(delta_x, delta_y, "dropping non-finite look delta");
            return;
        }
        self.yaw += delta_x * self.look_sensitivity;
        self.pitch += delta_y * self.look_sensitivity;

        if constrain_pitch {
            let clamped = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
            if clamped != self.pitch {
                tracing::trace!(pitch = self.pitch, clamped, "pitch clamped");
            }
            self.pitch = clamped;
        }

        self.update_basis();
    }

    /// Subtract `delta` from the field of view, then clamp to [1°, 45°].
    pub fn apply_zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            tracing::trace!(delta, "dropping non-finite zoom delta");
            return;
        }
        let fov = self.field_of_view - delta;
        self.field_of_view = fov.clamp(FOV_MIN, FOV_MAX);
        if self.field_of_view != fov {
            tracing::trace!(requested = fov, fov = self.field_of_view, "zoom clamped");
        }
    }

    fn update_basis(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        let front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();

        let cross = front.cross(self.world_up);
        let right = if cross.length() > DEGENERATE_EPSILON {
            cross.normalize()
        } else {
            // front is parallel to world_up: take right from yaw alone, the
            // limit of cross(front, world_up) as pitch approaches the pole.
            tracing::warn!(
                yaw = self.yaw,
                pitch = self.pitch,
                "front parallel to world_up, deriving right from yaw"
            );
            let heading_right = Vec3::new(yaw.cos(), 0.0, yaw.sin()).cross(self.world_up);
            (heading_right - front * heading_right.dot(front))
                .try_normalize()
                .unwrap_or_else(|| front.any_orthonormal_vector())
        };

        self.front = front;
        self.right = right;
        self.up = right.cross(front).normalize();
    }
}

/// Tuning scalars must be finite and positive.
pub(crate) fn is_valid_tuning(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    fn assert_orthonormal(cam: &Camera, tol: f32) {
        let Basis { front, right, up } = cam.basis();
        assert!((front.length() - 1.0).abs() < tol, "front {front}");
        assert!((right.length() - 1.0).abs() < tol, "right {right}");
        assert!((up.length() - 1.0).abs() < tol, "up {up}");
        assert!(front.dot(right).abs() < tol);
        assert!(front.dot(up).abs() < tol);
        assert!(right.dot(up).abs() < tol);
    }

    #[test]
    fn default_camera_faces_negative_z() {
        let cam = Camera::new(Vec3::ZERO, Vec3::Y);
        assert!(approx(cam.front(), Vec3::NEG_Z));
        assert!(approx(cam.right(), Vec3::X));
        assert!(approx(cam.up(), Vec3::Y));
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.pitch(), 0.0);
        assert_eq!(cam.field_of_view(), 45.0);
    }

    #[test]
    fn zero_yaw_faces_positive_x() {
        let cam = Camera::with_angles(Vec3::ZERO, Vec3::Y, 0.0, 0.0);
        assert!(approx(cam.front(), Vec3::X));
    }

    #[test]
    fn basis_is_orthonormal_across_angles() {
        let mut yaw = -360.0_f32;
        while yaw <= 360.0 {
            let mut pitches = vec![-88.9_f32, -88.5, 88.5, 88.9];
            let mut pitch = -84.0_f32;
            while pitch <= 84.0 {
                pitches.push(pitch);
                pitch += 7.0;
            }
            for pitch in pitches {
                let cam = Camera::with_angles(Vec3::ZERO, Vec3::Y, yaw, pitch);
                assert_eq!(cam.pitch(), pitch);
                assert_orthonormal(&cam, EPS);
            }
            yaw += 15.0;
        }
    }

    #[test]
    fn forward_movement_uses_speed_and_elapsed() {
        let mut cam = Camera::new(Vec3::ZERO, Vec3::Y);
        cam.apply_movement(Movement::Forward, 1.0);
        assert!(approx(cam.position(), Vec3::new(0.0, 0.0, -2.5)));
    }

    #[test]
    fn strafe_and_backward_movement() {
        let mut cam = Camera::new(Vec3::ZERO, Vec3::Y);
        cam.apply_movement(Movement::Left, 1.0);
        assert!(approx(cam.position(), Vec3::new(-2.5, 0.0, 0.0)));
        cam.apply_movement(Movement::Right, 2.0);
        assert!(approx(cam.position(), Vec3::new(2.5, 0.0, 0.0)));
        cam.apply_movement(Movement::Backward, 0.5);
        assert!(approx(cam.position(), Vec3::new(2.5, 0.0, 1.25)));
    }

    #[test]
    fn movement_does_not_touch_orientation() {
        let mut cam = Camera::new(Vec3::ZERO, Vec3::Y);
        let basis = cam.basis();
        cam.apply_movement(Movement::Forward, 3.0);
        assert_eq!(cam.basis(), basis);
    }

    #[test]
    fn large_look_delta_clamps_pitch() {
        let mut cam = Camera::default();
        cam.apply_look(0.0, 10_000.0, true);
        assert_eq!(cam.pitch(), 89.0);
        cam.apply_look(0.0, -100_000.0, true);
        assert_eq!(cam.pitch(), -89.0);
    }

    #[test]
    fn repeated_look_converges_to_limit() {
        let mut cam = Camera::default();
        for _ in 0..20 {
            cam.apply_look(0.0, 1000.0, true);
            assert!(cam.pitch() <= PITCH_LIMIT);
        }
        assert_eq!(cam.pitch(), 89.0);
        assert_orthonormal(&cam, EPS);
    }

    #[test]
    fn look_rederives_basis() {
        let mut cam = Camera::default();
        // 900 * 0.1 = 90 degrees of yaw: -90 -> 0, front turns to +X.
        cam.apply_look(900.0, 0.0, true);
        assert!((cam.yaw() - 0.0).abs() < 1e-4);
        assert!(approx(cam.front(), Vec3::X));
        assert!(approx(cam.right(), Vec3::Z));
    }

    #[test]
    fn unconstrained_pitch_at_pole_keeps_basis_valid() {
        let mut cam = Camera::default();
        cam.apply_look(0.0, 900.0, false);
        assert_eq!(cam.pitch(), 90.0);
        assert!(!cam.front().is_nan() && !cam.right().is_nan() && !cam.up().is_nan());
        assert_orthonormal(&cam, 1e-4);
        assert!(!cam.view_matrix().is_nan());
    }

    #[test]
    fn unconstrained_pitch_past_pole_is_kept() {
        let mut cam = Camera::default();
        cam.apply_look(0.0, 1200.0, false);
        assert_eq!(cam.pitch(), 120.0);
        assert_orthonormal(&cam, 1e-4);
    }

    #[test]
    fn pole_basis_matches_limit_just_below_pole() {
        let mut at_pole = Camera::default();
        at_pole.apply_look(900.0, 900.0, false);
        let mut below_pole = Camera::default();
        below_pole.apply_look(900.0, 899.99, false);

        assert_eq!(at_pole.pitch(), 90.0);
        assert!(below_pole.pitch() < 90.0);
        assert!(
            (at_pole.right() - below_pole.right()).length() < 1e-2,
            "at pole {} vs below {}",
            at_pole.right(),
            below_pole.right()
        );
        assert!(approx(at_pole.right(), Vec3::Z));
        assert_orthonormal(&at_pole, 1e-4);
    }

    #[test]
    fn yaw_at_pole_still_turns_right_vector() {
        let mut cam = Camera::default();
        cam.apply_look(0.0, 900.0, false);
        assert!(approx(cam.right(), Vec3::X), "right {}", cam.right());

        // yaw -90 -> 0 while pitch stays at 90.
        cam.apply_look(900.0, 0.0, false);
        assert_eq!(cam.pitch(), 90.0);
        assert!(approx(cam.right(), Vec3::Z), "right {}", cam.right());

        let direct = {
            let mut c = Camera::with_angles(Vec3::ZERO, Vec3::Y, 0.0, 0.0);
            c.apply_look(0.0, 900.0, false);
            c
        };
        assert!(approx(cam.right(), direct.right()));
        assert!(approx(cam.up(), direct.up()));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "yaw and pitch must be finite")]
    fn non_finite_construction_angles_panic_in_debug() {
        let _ = Camera::with_angles(Vec3::ZERO, Vec3::Y, f32::NAN, 0.0);
    }

    #[test]
    fn construction_clamps_pitch() {
        let cam = Camera::with_angles(Vec3::ZERO, Vec3::Y, -90.0, 135.0);
        assert_eq!(cam.pitch(), 89.0);
    }

    #[test]
    fn zoom_subtracts_then_clamps() {
        let mut cam = Camera::default();
        cam.apply_zoom(2.0);
        assert_eq!(cam.field_of_view(), 43.0);
        cam.apply_zoom(100.0);
        assert_eq!(cam.field_of_view(), 1.0);
        cam.apply_zoom(-0.5);
        assert_eq!(cam.field_of_view(), 1.5);
        cam.apply_zoom(-1000.0);
        assert_eq!(cam.field_of_view(), 45.0);
    }

    #[test]
    fn zoom_never_leaves_bounds() {
        let mut cam = Camera::default();
        for _ in 0..200 {
            cam.apply_zoom(0.7);
            assert!(cam.field_of_view() >= FOV_MIN);
        }
        assert_eq!(cam.field_of_view(), FOV_MIN);
        for _ in 0..200 {
            cam.apply_zoom(-0.7);
            assert!(cam.field_of_view() <= FOV_MAX);
        }
        assert_eq!(cam.field_of_view(), FOV_MAX);
    }

    #[test]
    fn view_matrix_is_pure() {
        let mut cam = Camera::default();
        cam.apply_look(123.0, -45.0, true);
        cam.apply_movement(Movement::Forward, 0.25);
        let a = cam.view_matrix().to_cols_array();
        let b = cam.view_matrix().to_cols_array();
        assert_eq!(a, b);
    }

    #[test]
    fn view_matrix_maps_front_to_negative_z() {
        let mut cam = Camera::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Y);
        cam.apply_look(300.0, 150.0, true);
        let target = cam.position() + cam.front();
        let in_view = cam.view_matrix().transform_point3(target);
        assert!(approx(in_view, Vec3::NEG_Z), "got {in_view}");
        let eye = cam.view_matrix().transform_point3(cam.position());
        assert!(approx(eye, Vec3::ZERO));
    }

    #[test]
    fn scalar_constructor_matches_vector_constructor() {
        let a = Camera::from_scalars(1.0, 2.0, 3.0, 0.0, 1.0, 0.0, -45.0, 10.0);
        let b = Camera::with_angles(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, -45.0, 10.0);
        assert_eq!(a, b);
    }

    #[test]
    fn world_up_is_normalized() {
        let cam = Camera::new(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(cam.world_up(), Vec3::Y);
        assert!(approx(cam.front(), Vec3::NEG_Z));
    }

    #[test]
    fn non_finite_inputs_are_dropped() {
        let mut cam = Camera::default();
        let before = cam.clone();
        cam.apply_look(f32::NAN, 1.0, true);
        cam.apply_zoom(f32::INFINITY);
        cam.apply_movement(Movement::Forward, f32::NAN);
        assert_eq!(cam, before);
    }

    #[test]
    fn tuning_setters_keep_basis() {
        let mut cam = Camera::default();
        let basis = cam.basis();
        cam.set_movement_speed(10.0);
        cam.set_look_sensitivity(0.5);
        assert_eq!(cam.basis(), basis);
        cam.apply_movement(Movement::Forward, 1.0);
        assert!(approx(cam.position(), Vec3::new(0.0, 0.0, -10.0)));
    }

    #[test]
    fn tuning_setters_reject_non_positive_values() {
        let mut cam = Camera::default();
        cam.set_movement_speed(0.0);
        cam.set_movement_speed(-3.0);
        cam.set_look_sensitivity(0.0);
        cam.set_look_sensitivity(-0.1);
        cam.set_look_sensitivity(f32::NAN);
        assert_eq!(cam.movement_speed(), DEFAULT_SPEED);
        assert_eq!(cam.look_sensitivity(), DEFAULT_SENSITIVITY);
    }

    #[test]
    fn movement_serde_names_are_lowercase() {
        let json = serde_json::to_string(&Movement::Backward).unwrap();
        assert_eq!(json, "\"backward\"");
        let parsed: Movement = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(parsed, Movement::Left);
    }
}
