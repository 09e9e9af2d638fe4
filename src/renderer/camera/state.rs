use nalgebra_glm::{Mat4, Vec3};

use crate::settings::CameraSettings;

/// Pitch is kept strictly inside +-90 degrees so `front` never lines up with world up
pub const PITCH_LIMIT: f32 = 89.0;
pub const FOV_MIN: f32 = 1.0;
pub const FOV_MAX: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

pub fn world_up() -> Vec3 {
    nalgebra_glm::vec3(0.0, 1.0, 0.0)
}

/// First-person camera: position plus yaw/pitch in degrees, Y-up
#[derive(Debug, Clone)]
pub struct CameraState {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    default_position: Vec3,
    default_yaw: f32,
    default_pitch: f32,
    default_fov: f32,
}

impl CameraState {
    pub fn new(position: Vec3, yaw: f32, pitch: f32, fov: f32) -> Self {
        let pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        let fov = fov.clamp(FOV_MIN, FOV_MAX);
        let mut state = Self {
            position,
            yaw,
            pitch,
            fov,
            front: Vec3::zeros(),
            right: Vec3::zeros(),
            up: Vec3::zeros(),
            default_position: position,
            default_yaw: yaw,
            default_pitch: pitch,
            default_fov: fov,
        };
        state.update_vectors();
        state
    }

    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self::new(
            nalgebra_glm::make_vec3(&settings.start_position),
            settings.start_yaw,
            settings.start_pitch,
            settings.fov,
        )
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Add to yaw/pitch (degrees). Pitch is clamped after accumulation.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Narrow or widen the field of view; positive delta zooms in
    pub fn zoom(&mut self, delta: f32) {
        self.fov = (self.fov - delta).clamp(FOV_MIN, FOV_MAX);
    }

    pub fn reset(&mut self) {
        self.position = self.default_position;
        self.yaw = self.default_yaw;
        self.pitch = self.default_pitch;
        self.fov = self.default_fov;
        self.update_vectors();
    }

    pub fn view_matrix(&self) -> Mat4 {
        nalgebra_glm::look_at(&self.position, &(self.position + self.front()), &self.up())
    }

    /// Right-handed projection with [0, 1] depth, matching wgpu clip space
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        nalgebra_glm::perspective_rh_zo(aspect, self.fov.to_radians(), NEAR_PLANE, FAR_PLANE)
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let front = nalgebra_glm::vec3(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );
        self.front = nalgebra_glm::normalize(&front);
        self.right = nalgebra_glm::normalize(&nalgebra_glm::cross(&self.front, &world_up()));
        self.up = nalgebra_glm::normalize(&nalgebra_glm::cross(&self.right, &self.front));
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = CameraState::default();
        let front = camera.front();
        assert_relative_eq!(front.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(front.y, 0.0, epsilon = EPSILON);
        assert_relative_eq!(front.z, -1.0, epsilon = EPSILON);

        let right = camera.right();
        assert_relative_eq!(right.x, 1.0, epsilon = EPSILON);
        assert_relative_eq!(right.z, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn basis_stays_orthonormal() {
        let mut camera = CameraState::default();
        for step in 0..50 {
            camera.rotate(37.0, if step % 2 == 0 { 23.0 } else { -41.0 });
            let (f, r, u) = (camera.front(), camera.right(), camera.up());
            assert_relative_eq!(f.norm(), 1.0, epsilon = EPSILON);
            assert_relative_eq!(r.norm(), 1.0, epsilon = EPSILON);
            assert_relative_eq!(u.norm(), 1.0, epsilon = EPSILON);
            assert_relative_eq!(f.dot(&r), 0.0, epsilon = EPSILON);
            assert_relative_eq!(f.dot(&u), 0.0, epsilon = EPSILON);
            assert_relative_eq!(r.dot(&u), 0.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn constructor_clamps_out_of_range_values() {
        let camera = CameraState::new(Vec3::zeros(), 0.0, 120.0, 90.0);
        assert_eq!(camera.pitch(), PITCH_LIMIT);
        assert_eq!(camera.fov(), FOV_MAX);
    }

    #[test]
    fn reset_restores_starting_pose() {
        let mut camera = CameraState::default();
        camera.rotate(45.0, 30.0);
        camera.zoom(20.0);
        camera.position += nalgebra_glm::vec3(3.0, 0.0, -2.0);

        camera.reset();
        let fresh = CameraState::default();
        assert_eq!(camera.position, fresh.position);
        assert_eq!(camera.yaw(), fresh.yaw());
        assert_eq!(camera.pitch(), fresh.pitch());
        assert_eq!(camera.fov(), fresh.fov());
    }

    #[test]
    fn view_matrix_moves_eye_to_origin() {
        let camera = CameraState::default();
        let eye = camera.position;
        let p = camera.view_matrix() * nalgebra_glm::vec4(eye.x, eye.y, eye.z, 1.0);
        assert_relative_eq!(p.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(p.y, 0.0, epsilon = EPSILON);
        assert_relative_eq!(p.z, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn projection_maps_near_plane_to_zero_depth() {
        let camera = CameraState::default();
        let clip = camera.projection_matrix(1.0) * nalgebra_glm::vec4(0.0, 0.0, -NEAR_PLANE, 1.0);
        assert_relative_eq!(clip.z / clip.w, 0.0, epsilon = EPSILON);
    }
}
