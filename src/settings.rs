use crate::CONFY_APP_NAME;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Degrees of rotation per pixel of pointer movement
    pub sensitivity: f32,
    /// World units per second
    pub move_speed: f32,
    /// Degrees per second while an arrow key is held
    pub turn_rate: f32,
    pub start_position: [f32; 3],
    pub start_yaw: f32,
    pub start_pitch: f32,
    pub fov: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            sensitivity: 0.1,
            move_speed: 2.5,
            turn_rate: 180.0,
            start_position: [0.0, 1.6, 4.0],
            start_yaw: -90.0,
            start_pitch: 0.0,
            fov: 45.0,
        }
    }
}

impl CameraSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "camera").unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub show_hud: bool,
    pub clear_color: [f32; 3],
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            vsync: true,
            show_hud: true,
            clear_color: [0.0, 0.0, 0.0],
        }
    }
}

impl DisplaySettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "display").unwrap_or_default()
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(CONFY_APP_NAME, "display", self) {
            log::warn!("Failed to save display settings: {}", e);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GallerySettings {
    pub room_count: usize,
    pub spacing: f32,
    pub origin: [f32; 3],
    /// Rotation of the whole gallery around +Y, in degrees
    pub rotation_deg: f32,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            room_count: 4,
            spacing: 13.0,
            origin: [0.0, 0.0, 0.0],
            rotation_deg: 0.0,
        }
    }
}

impl GallerySettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "gallery").unwrap_or_default()
    }

    /// Root transform every scene placement is chained from
    pub fn root_transform(&self) -> nalgebra_glm::Mat4 {
        let origin = nalgebra_glm::make_vec3(&self.origin);
        let root = nalgebra_glm::translate(&nalgebra_glm::Mat4::identity(), &origin);
        nalgebra_glm::rotate_y(&root, self.rotation_deg.to_radians())
    }
}

// Aggregate struct for convenience
pub struct Settings {
    pub camera: CameraSettings,
    pub display: DisplaySettings,
    pub gallery: GallerySettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            camera: CameraSettings::load(),
            display: DisplaySettings::load(),
            gallery: GallerySettings::load(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_root_is_identity() {
        let root = GallerySettings::default().root_transform();
        assert_eq!(root, nalgebra_glm::Mat4::identity());
    }

    #[test]
    fn root_applies_origin_then_rotation() {
        let settings = GallerySettings {
            origin: [1.0, 2.0, 3.0],
            rotation_deg: 90.0,
            ..GallerySettings::default()
        };
        let root = settings.root_transform();
        let p = root * nalgebra_glm::vec4(1.0, 0.0, 0.0, 1.0);

        // +X rotated 90 degrees around +Y lands on -Z, then offset by the origin
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn camera_defaults_match_documented_constants() {
        let camera = CameraSettings::default();
        assert_eq!(camera.sensitivity, 0.1);
        assert_eq!(camera.move_speed, 2.5);
        assert_eq!(camera.turn_rate, 180.0);
        assert_eq!(camera.fov, 45.0);
    }
}
