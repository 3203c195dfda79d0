use ::winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use ::winit::keyboard::{KeyCode, PhysicalKey};

use crate::state::{InputEvent, Key};

/// Pixel scroll distance treated as one wheel line.
const PIXELS_PER_LINE: f64 = 40.0;

/// Translates a winit `WindowEvent` into an `InputEvent`.
///
/// Returns `None` for events the camera does not care about, including key
/// auto-repeat.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            if event.repeat {
                return None;
            }
            let key = map_key(event.physical_key);
            Some(match event.state {
                ElementState::Pressed => InputEvent::KeyPressed { key },
                ElementState::Released => InputEvent::KeyReleased { key },
            })
        }
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::CursorMoved {
            x: position.x as f32,
            y: position.y as f32,
        }),
        WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Scrolled {
            delta: scroll_lines(*delta),
        }),
        WindowEvent::Focused(false) => Some(InputEvent::FocusLost),
        _ => None,
    }
}

fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_LINE) as f32,
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::KeyW => Key::W,
            KeyCode::KeyA => Key::A,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyD => Key::D,
            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,
            KeyCode::Escape => Key::Escape,
            _ => Key::Other,
        },
        PhysicalKey::Unidentified(_) => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::winit::dpi::PhysicalPosition;

    #[test]
    fn wasd_and_escape_map() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyW)), Key::W);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyD)), Key::D);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Other);
    }

    #[test]
    fn pixel_scroll_is_converted_to_lines() {
        assert_eq!(scroll_lines(MouseScrollDelta::LineDelta(0.0, 2.0)), 2.0);
        let px = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 80.0));
        assert_eq!(scroll_lines(px), 2.0);
    }
}
