use std::collections::HashSet;

use winit::keyboard::KeyCode;

use super::CameraState;
use crate::settings::CameraSettings;

/// Turns raw pointer deltas, scroll offsets and held keys into camera motion
pub struct CameraController {
    state: CameraState,
    sensitivity: f32,
    move_speed: f32,
    turn_rate: f32,
    held_keys: HashSet<KeyCode>,
}

impl CameraController {
    pub fn new(state: CameraState, settings: &CameraSettings) -> Self {
        Self {
            state,
            sensitivity: settings.sensitivity,
            move_speed: settings.move_speed,
            turn_rate: settings.turn_rate,
            held_keys: HashSet::new(),
        }
    }

    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self::new(CameraState::from_settings(settings), settings)
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Track press/release of movement and turn keys.
    /// Returns false for keys the camera does not use.
    pub fn on_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        if !is_camera_key(key) {
            return false;
        }
        if pressed {
            self.held_keys.insert(key);
        } else {
            self.held_keys.remove(&key);
        }
        true
    }

    /// Raw pointer delta in pixels; screen y grows downward
    pub fn on_pointer_delta(&mut self, delta_x: f32, delta_y: f32) {
        self.state
            .rotate(delta_x * self.sensitivity, -delta_y * self.sensitivity);
    }

    pub fn on_scroll(&mut self, offset: f32) {
        self.state.zoom(offset);
    }

    /// Drop every held key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held_keys.clear();
    }

    /// Advance by one frame of `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let turn = self.turn_rate * dt;
        let yaw_axis = self.axis(KeyCode::ArrowRight, KeyCode::ArrowLeft);
        let pitch_axis = self.axis(KeyCode::ArrowUp, KeyCode::ArrowDown);
        if yaw_axis != 0.0 || pitch_axis != 0.0 {
            self.state.rotate(yaw_axis * turn, pitch_axis * turn);
        }

        let forward = self.axis(KeyCode::KeyW, KeyCode::KeyS);
        let strafe = self.axis(KeyCode::KeyD, KeyCode::KeyA);
        if forward != 0.0 || strafe != 0.0 {
            let velocity = self.move_speed * dt;
            let direction = self.state.front() * forward + self.state.right() * strafe;
            self.state.position += direction * velocity;
        }
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.held_keys.clear();
    }

    fn axis(&self, positive: KeyCode, negative: KeyCode) -> f32 {
        let mut value = 0.0;
        if self.held_keys.contains(&positive) {
            value += 1.0;
        }
        if self.held_keys.contains(&negative) {
            value -= 1.0;
        }
        value
    }
}

fn is_camera_key(key: KeyCode) -> bool {
    matches!(
        key,
        KeyCode::KeyW
            | KeyCode::KeyA
            | KeyCode::KeyS
            | KeyCode::KeyD
            | KeyCode::ArrowUp
            | KeyCode::ArrowDown
            | KeyCode::ArrowLeft
            | KeyCode::ArrowRight
    )
}
