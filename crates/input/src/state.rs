use std::collections::{HashMap, HashSet};

use eyeline_camera::{Camera, Movement};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::action::CameraAction;

/// Keys the camera layer knows about. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

/// Platform-agnostic input event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    KeyPressed { key: Key },
    KeyReleased { key: Key },
    /// Cursor position in window pixels, y growing downward.
    CursorMoved { x: f32, y: f32 },
    /// Vertical wheel movement in lines.
    Scrolled { delta: f32 },
    FocusLost,
}

/// Key to movement-direction mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    bindings: HashMap<Key, Movement>,
}

impl Default for KeyBindings {
    /// WASD plus arrow keys.
    fn default() -> Self {
        let bindings = [
            (Key::W, Movement::Forward),
            (Key::S, Movement::Backward),
            (Key::A, Movement::Left),
            (Key::D, Movement::Right),
            (Key::ArrowUp, Movement::Forward),
            (Key::ArrowDown, Movement::Backward),
            (Key::ArrowLeft, Movement::Left),
            (Key::ArrowRight, Movement::Right),
        ]
        .into_iter()
        .collect();
        Self { bindings }
    }
}

impl KeyBindings {
    /// Bindings with nothing mapped.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn bind(&mut self, key: Key, direction: Movement) {
        self.bindings.insert(key, direction);
    }

    pub fn unbind(&mut self, key: Key) -> Option<Movement> {
        self.bindings.remove(&key)
    }

    pub fn get(&self, key: Key) -> Option<Movement> {
        self.bindings.get(&key).copied()
    }
}

/// Converts absolute cursor positions into look deltas.
///
/// The first sample only records a position; the delta from a stale or
/// unknown position would snap the view.
#[derive(Debug, Clone, Default)]
pub struct CursorTracker {
    last: Option<Vec2>,
}

impl CursorTracker {
    /// Returns `(dx, dy)` with dy reversed, since screen y grows downward.
    pub fn delta(&mut self, x: f32, y: f32) -> Option<Vec2> {
        let pos = Vec2::new(x, y);
        let delta = self.last.map(|last| Vec2::new(pos.x - last.x, last.y - pos.y));
        self.last = Some(pos);
        delta
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Current input state: held keys, cursor tracking, and per-frame
/// accumulated look and scroll deltas.
#[derive(Debug, Default)]
pub struct InputState {
    bindings: KeyBindings,
    keys_down: HashSet<Key>,
    cursor: CursorTracker,
    pending_look: Option<Vec2>,
    pending_scroll: Option<f32>,
    quit_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Set once Escape is pressed. The host decides when to close.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyPressed { key } => {
                if key == Key::Escape {
                    tracing::debug!("quit requested");
                    self.quit_requested = true;
                }
                self.keys_down.insert(key);
            }
            InputEvent::KeyReleased { key } => {
                self.keys_down.remove(&key);
            }
            InputEvent::CursorMoved { x, y } => {
                if let Some(delta) = self.cursor.delta(x, y) {
                    *self.pending_look.get_or_insert(Vec2::ZERO) += delta;
                }
            }
            InputEvent::Scrolled { delta } => {
                *self.pending_scroll.get_or_insert(0.0) += delta;
            }
            InputEvent::FocusLost => {
                // Avoid stuck keys and a cursor jump when focus returns.
                self.keys_down.clear();
                self.cursor.reset();
            }
        }
    }

    /// Drain this frame's actions.
    ///
    /// One `Move` per direction with a held bound key (forward, backward,
    /// left, right order), then the accumulated `Look`, then the `Zoom`.
    pub fn take_actions(&mut self, dt: f32) -> Vec<CameraAction> {
        let mut actions = Vec::new();

        for direction in [
            Movement::Forward,
            Movement::Backward,
            Movement::Left,
            Movement::Right,
        ] {
            let held = self
                .keys_down
                .iter()
                .any(|key| self.bindings.get(*key) == Some(direction));
            if held {
                actions.push(CameraAction::Move { direction, dt });
            }
        }

        if let Some(look) = self.pending_look.take() {
            actions.push(CameraAction::Look {
                dx: look.x,
                dy: look.y,
            });
        }

        if let Some(delta) = self.pending_scroll.take() {
            actions.push(CameraAction::Zoom(delta));
        }

        tracing::trace!(count = actions.len(), dt, "frame actions");
        actions
    }

    /// Drain this frame's actions and apply them to `camera`.
    pub fn apply_frame(&mut self, camera: &mut Camera, dt: f32) -> usize {
        let actions = self.take_actions(dt);
        for action in &actions {
            action.apply(camera);
        }
        actions.len()
    }
}
