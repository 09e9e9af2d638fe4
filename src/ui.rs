use nalgebra_glm::Vec3;

/// Snapshot of what the overlay displays for one frame
pub struct HudInfo {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub fps: f32,
    pub room: Option<usize>,
    pub room_count: usize,
    pub element_count: usize,
    pub cursor_captured: bool,
}

pub struct Hud {
    pub visible: bool,
}

impl Hud {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }

    /// Draw the overlay. Returns true when "Reset camera" was clicked.
    pub fn show(&mut self, ctx: &egui::Context, info: &HudInfo) -> bool {
        if !self.visible {
            return false;
        }

        let mut reset_camera = false;
        egui::Window::new("Gallery")
            .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label(format!("{:.0} fps", info.fps));
                ui.separator();

                ui.label(format!(
                    "Position: {:.2}, {:.2}, {:.2}",
                    info.position.x, info.position.y, info.position.z
                ));
                ui.label(format!("Yaw: {:.1}°  Pitch: {:.1}°", info.yaw, info.pitch));
                ui.label(format!("FOV: {:.1}°", info.fov));
                ui.label(room_label(info.room, info.room_count));
                ui.label(format!("Elements: {}", info.element_count));
                ui.separator();

                if info.cursor_captured {
                    ui.label("WASD move · arrows turn · scroll zoom");
                } else {
                    ui.label("Click the scene to look around");
                }
                ui.label("F1 hide overlay · Esc quit");

                if ui.button("Reset camera").clicked() {
                    reset_camera = true;
                }
            });
        reset_camera
    }
}

fn room_label(room: Option<usize>, room_count: usize) -> String {
    match room {
        Some(index) => format!("Room {} of {}", index + 1, room_count),
        None => "Corridor".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_label_is_one_based() {
        assert_eq!(room_label(Some(0), 4), "Room 1 of 4");
        assert_eq!(room_label(Some(3), 4), "Room 4 of 4");
        assert_eq!(room_label(None, 4), "Corridor");
    }

    #[test]
    fn hidden_hud_draws_nothing() {
        let ctx = egui::Context::default();
        let mut hud = Hud::new(false);
        let info = HudInfo {
            position: Vec3::zeros(),
            yaw: -90.0,
            pitch: 0.0,
            fov: 45.0,
            fps: 60.0,
            room: Some(0),
            room_count: 4,
            element_count: 80,
            cursor_captured: false,
        };
        let mut reset = true;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            reset = hud.show(ctx, &info);
        });
        assert!(!reset);
    }
}
