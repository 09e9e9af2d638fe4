use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

use crate::renderer::camera::CameraController;

/// What the app must do with the window after an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Exit,
    ToggleHud,
    CaptureCursor,
    ReleaseCursor,
}

/// Decides where keyboard and pointer input goes and tracks cursor capture.
/// Window-side effects (grab, visibility) are left to the caller.
#[derive(Debug, Default)]
pub struct InputRouter {
    cursor_captured: bool,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Record the outcome of a grab or release on the window
    pub fn set_cursor_captured(&mut self, captured: bool) {
        self.cursor_captured = captured;
    }

    pub fn on_key(
        &mut self,
        camera: &mut CameraController,
        code: KeyCode,
        pressed: bool,
        repeat: bool,
    ) -> InputAction {
        match code {
            KeyCode::Escape if pressed => InputAction::Exit,
            KeyCode::F1 if pressed && !repeat => InputAction::ToggleHud,
            KeyCode::F1 => InputAction::None,
            _ => {
                camera.on_key(code, pressed);
                InputAction::None
            }
        }
    }

    /// A left press on the scene asks for capture; clicks egui claims are ignored
    pub fn on_mouse_button(
        &self,
        button: MouseButton,
        state: ElementState,
        overlay_wants_pointer: bool,
    ) -> InputAction {
        if overlay_wants_pointer || self.cursor_captured {
            return InputAction::None;
        }
        if button == MouseButton::Left && state == ElementState::Pressed {
            InputAction::CaptureCursor
        } else {
            InputAction::None
        }
    }

    /// Raw pointer motion steers the camera only while the cursor is captured
    pub fn on_mouse_motion(&self, camera: &mut CameraController, delta: (f64, f64)) {
        if self.cursor_captured {
            camera.on_pointer_delta(delta.0 as f32, delta.1 as f32);
        }
    }

    pub fn on_focus_lost(&mut self, camera: &mut CameraController) -> InputAction {
        camera.release_all();
        if !self.cursor_captured {
            return InputAction::None;
        }
        self.cursor_captured = false;
        InputAction::ReleaseCursor
    }
}
