use eyeline_camera::Camera;
use glam::{Mat4, Vec3};

/// Perspective parameters owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    /// Projection for a framebuffer; zero dimensions (a minimized window)
    /// are treated as 1.
    pub fn from_viewport(width: u32, height: u32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            ..Self::default()
        }
    }

    /// OpenGL-style (-1..1 depth) right-handed perspective matrix.
    pub fn matrix(&self, fov_degrees: f32) -> Mat4 {
        Mat4::perspective_rh_gl(fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

/// Everything a renderer needs from the camera for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    pub frame: u64,
    pub eye: Vec3,
    pub front: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl RenderView {
    pub fn from_camera(camera: &Camera, projection: &Projection, frame: u64) -> Self {
        let fov_degrees = camera.field_of_view();
        Self {
            frame,
            eye: camera.position(),
            front: camera.front(),
            right: camera.right(),
            up: camera.up(),
            view: camera.view_matrix(),
            projection: projection.matrix(fov_degrees),
            fov_degrees,
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}
