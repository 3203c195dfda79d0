//! Shader program seam.
//!
//! A backend compiles GLSL stages and links them; `build_program` drives the
//! straight-line compile/link sequence and collects every diagnostic instead
//! of stopping at the first failure.

use glam::{Mat2, Mat3, Mat4};
use std::fmt;

use crate::view::RenderView;

/// Uniform names the camera upload writes.
pub const VIEW_UNIFORM: &str = "view";
pub const PROJECTION_UNIFORM: &str = "projection";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Where a diagnostic came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSource {
    Stage(ShaderStage),
    Link,
}

/// A driver info log attached to the step that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDiagnostic {
    pub source: DiagnosticSource,
    pub log: String,
}

impl fmt::Display for ShaderDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            DiagnosticSource::Stage(stage) => write!(f, "{stage} stage: {}", self.log.trim_end()),
            DiagnosticSource::Link => write!(f, "link: {}", self.log.trim_end()),
        }
    }
}

fn join_diagnostics(diagnostics: &[ShaderDiagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors from building a shader program.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("shader compilation failed: {}", join_diagnostics(.0))]
    Compile(Vec<ShaderDiagnostic>),
    #[error("shader program linking failed: {0}")]
    Link(ShaderDiagnostic),
}

impl ShaderError {
    pub fn diagnostics(&self) -> &[ShaderDiagnostic] {
        match self {
            Self::Compile(diagnostics) => diagnostics,
            Self::Link(diagnostic) => std::slice::from_ref(diagnostic),
        }
    }
}

/// A value for one of the program's uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uniform {
    Bool(bool),
    Int(i32),
    Float(f32),
    Mat2(Mat2),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl From<bool> for Uniform {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Uniform {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for Uniform {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Mat2> for Uniform {
    fn from(v: Mat2) -> Self {
        Self::Mat2(v)
    }
}

impl From<Mat3> for Uniform {
    fn from(v: Mat3) -> Self {
        Self::Mat3(v)
    }
}

impl From<Mat4> for Uniform {
    fn from(v: Mat4) -> Self {
        Self::Mat4(v)
    }
}

/// Graphics API hooks for compiling, linking, and feeding a shader program.
///
/// `Stage` and `Program` are opaque handles owned by the backend.
pub trait ShaderBackend {
    type Stage;
    type Program;

    /// Compile one stage. `Err` carries the driver's info log.
    fn compile(&mut self, stage: ShaderStage, source: &str) -> Result<Self::Stage, String>;

    /// Link two compiled stages. `Err` carries the driver's info log.
    fn link(
        &mut self,
        vertex: &Self::Stage,
        fragment: &Self::Stage,
    ) -> Result<Self::Program, String>;

    /// Release a stage object once it is no longer needed.
    fn delete_stage(&mut self, stage: Self::Stage);

    fn set_uniform(&mut self, program: &Self::Program, name: &str, value: Uniform);
}

/// Compile both stages, link them, and release the stage objects.
///
/// Both stages are always compiled so a failing vertex shader does not hide
/// fragment errors.
pub fn build_program<B: ShaderBackend>(
    backend: &mut B,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<B::Program, ShaderError> {
    let vertex = backend.compile(ShaderStage::Vertex, vertex_source);
    let fragment = backend.compile(ShaderStage::Fragment, fragment_source);

    match (vertex, fragment) {
        (Ok(vertex), Ok(fragment)) => {
            let linked = backend.link(&vertex, &fragment);
            backend.delete_stage(vertex);
            backend.delete_stage(fragment);
            match linked {
                Ok(program) => {
                    tracing::debug!("shader program linked");
                    Ok(program)
                }
                Err(log) => {
                    tracing::error!(log = %log.trim_end(), "shader program linking failed");
                    Err(ShaderError::Link(ShaderDiagnostic {
                        source: DiagnosticSource::Link,
                        log,
                    }))
                }
            }
        }
        (vertex, fragment) => {
            let mut diagnostics = Vec::new();
            for (stage, result) in [
                (ShaderStage::Vertex, vertex),
                (ShaderStage::Fragment, fragment),
            ] {
                match result {
                    Ok(compiled) => backend.delete_stage(compiled),
                    Err(log) => {
                        tracing::error!(%stage, log = %log.trim_end(), "shader compilation failed");
                        diagnostics.push(ShaderDiagnostic {
                            source: DiagnosticSource::Stage(stage),
                            log,
                        });
                    }
                }
            }
            Err(ShaderError::Compile(diagnostics))
        }
    }
}

/// Write the view and projection matrices for `view` into `program`.
pub fn upload_camera<B: ShaderBackend>(backend: &mut B, program: &B::Program, view: &RenderView) {
    backend.set_uniform(program, VIEW_UNIFORM, view.view.into());
    backend.set_uniform(program, PROJECTION_UNIFORM, view.projection.into());
}
