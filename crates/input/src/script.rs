//! Recorded input for headless replay.
//!
//! A script is a JSON document of frames, each with an elapsed time and the
//! events that arrived during it:
//! ```text
//! { "frames": [
//!     { "dt": 0.016, "events": [ { "type": "key_pressed", "key": "w" } ] },
//!     { "dt": 0.016 }
//! ] }
//! ```

use eyeline_camera::Camera;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::state::{InputEvent, InputState};

/// Errors from loading an input script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame {index} has invalid dt {dt}")]
    InvalidFrame { index: usize, dt: f32 },
}

/// One frame of recorded input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptFrame {
    /// Elapsed seconds for this frame.
    pub dt: f32,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub frames: Vec<ScriptFrame>,
}

impl InputScript {
    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let script = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            frames = script.frames.len(),
            "loaded input script"
        );
        Ok(script)
    }

    /// Every frame needs a finite, non-negative `dt`.
    pub fn validate(&self) -> Result<(), ScriptError> {
        for (index, frame) in self.frames.iter().enumerate() {
            if !frame.dt.is_finite() || frame.dt < 0.0 {
                return Err(ScriptError::InvalidFrame {
                    index,
                    dt: frame.dt,
                });
            }
        }
        Ok(())
    }

    /// Feed each frame through `state` and apply its actions to `camera`.
    ///
    /// `on_frame` sees the camera after every frame. Replay stops after the
    /// frame in which Escape was pressed. Returns the number of frames run.
    pub fn run<F>(&self, state: &mut InputState, camera: &mut Camera, mut on_frame: F) -> usize
    where
        F: FnMut(usize, &Camera),
    {
        let _span = tracing::info_span!("script_replay", frames = self.frames.len()).entered();
        let mut ran = 0;

        for (index, frame) in self.frames.iter().enumerate() {
            for event in &frame.events {
                state.handle(*event);
            }
            state.apply_frame(camera, frame.dt);
            on_frame(index, camera);
            ran += 1;

            if state.quit_requested() {
                tracing::info!(frame = index, "replay stopped by quit request");
                break;
            }
        }

        ran
    }
}
