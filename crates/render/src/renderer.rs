use glam::Vec3;

use crate::view::RenderView;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads a view built from the camera and produces output. It
/// never mutates camera state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given view.
    fn render(&self, view: &RenderView) -> Self::Output;
}

/// Text renderer for headless runs, logs, and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn fmt_vec(v: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Frame {} ===\n", view.frame));
        out.push_str(&format!(
            "Camera: eye={} fov={:.1}\n",
            fmt_vec(view.eye),
            view.fov_degrees
        ));
        out.push_str(&format!(
            "Basis: front={} right={} up={}\n",
            fmt_vec(view.front),
            fmt_vec(view.right),
            fmt_vec(view.up)
        ));
        out
    }
}
