//! Input handling: raw window-agnostic events in, camera actions out.
//!
//! # Invariants
//! - The camera is only mutated through `CameraAction::apply`.
//! - The first cursor sample after start or focus loss produces no look delta.
//! - Windowing backends are optional adapters (`winit` feature) and do not
//!   change how events map to actions.

pub mod action;
#[cfg(feature = "winit")]
pub mod platform;
pub mod script;
pub mod state;

pub use action::CameraAction;
pub use script::{InputScript, ScriptError, ScriptFrame};
pub use state::{CursorTracker, InputEvent, InputState, Key, KeyBindings};

pub fn crate_info() -> &'static str {
    "eyeline-input v0.1.0"
}
