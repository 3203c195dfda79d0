//! Rendering Adapter: renderer-agnostic interface consumed by draw loops.
//!
//! # Invariants
//! - Renderers read camera state; they never mutate it.
//! - Projection is built here from the camera's field of view.
//! - Shader stage objects are released whether or not a program links.
//!
//! No GPU calls are made in this crate. Backends implement `Renderer` and
//! `ShaderBackend`; `DebugTextRenderer` stands in for headless runs.

mod renderer;
pub mod shader;
mod view;

pub use renderer::{DebugTextRenderer, Renderer};
pub use shader::{
    DiagnosticSource, ShaderBackend, ShaderDiagnostic, ShaderError, ShaderStage, Uniform,
    build_program, upload_camera,
};
pub use view::{Projection, RenderView};

pub fn crate_info() -> &'static str {
    "eyeline-render v0.1.0"
}
