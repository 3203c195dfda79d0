use eyeline_camera::{Camera, Movement};

/// A discrete camera update produced by the input layer.
///
/// The camera consumes actions, never raw input events, so any windowing
/// backend drives it the same way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraAction {
    /// Move along the camera basis for `dt` seconds.
    Move { direction: Movement, dt: f32 },
    /// Cursor delta in pixels, +y meaning "look up".
    Look { dx: f32, dy: f32 },
    /// Scroll amount; positive narrows the field of view.
    Zoom(f32),
}

impl CameraAction {
    pub fn apply(&self, camera: &mut Camera) {
        match *self {
            Self::Move { direction, dt } => camera.apply_movement(direction, dt),
            Self::Look { dx, dy } => camera.apply_look(dx, dy, true),
            Self::Zoom(delta) => camera.apply_zoom(delta),
        }
    }
}
