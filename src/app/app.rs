use std::path::Path;
use std::sync::Arc;

use egui_wgpu::ScreenDescriptor;
use egui_winit::State;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window};

use crate::app::clock::FrameClock;
use crate::app::input::{InputAction, InputRouter};
use crate::error::GalleryError;
use crate::renderer::camera::CameraController;
use crate::renderer::{FrameContext, Renderer};
use crate::scene::{Gallery, SceneElement};
use crate::settings::Settings;
use crate::texture::{self, TEXTURE_DIR, TextureTable};
use crate::ui::{Hud, HudInfo};

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

pub struct App {
    pub window: Arc<Window>,
    renderer: Renderer,
    camera_controller: CameraController,
    gallery: Gallery,
    root: nalgebra_glm::Mat4,
    // Placements never change after startup
    elements: Vec<SceneElement>,
    textures: TextureTable,
    hud: Hud,
    egui_state: State,
    egui_wants_pointer: bool,
    input: InputRouter,
    clock: FrameClock,
    settings: Settings,
}

impl App {
    pub async fn new(window: Arc<Window>, settings: Settings) -> Result<Self, GalleryError> {
        let renderer = Renderer::new(window.clone(), settings.display.vsync).await?;

        // Every asset must load; a missing texture ends startup
        let images = texture::load_all(Path::new(TEXTURE_DIR)).await?;
        let textures = renderer.create_texture_table(&images);
        log::info!("Uploaded {} textures", textures.len());

        let egui_ctx = renderer.egui_context();
        let egui_state = State::new(
            egui_ctx,
            egui::viewport::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        let gallery = Gallery::from_settings(&settings.gallery);
        let root = settings.gallery.root_transform();
        let elements = gallery.placements(&root);
        log::info!(
            "Gallery has {} rooms, {} elements",
            gallery.layout().room_count,
            elements.len()
        );

        Ok(Self {
            camera_controller: CameraController::from_settings(&settings.camera),
            hud: Hud::new(settings.display.show_hud),
            window,
            renderer,
            gallery,
            root,
            elements,
            textures,
            egui_state,
            egui_wants_pointer: false,
            input: InputRouter::new(),
            clock: FrameClock::new(),
            settings,
        })
    }

    pub fn handle_event(&mut self, event: &WindowEvent) -> EventResponse {
        // Let egui handle the event first
        let egui_response = self.egui_state.on_window_event(&self.window, event);
        let ignored = EventResponse {
            repaint: egui_response.repaint,
            exit: false,
        };

        let action = match event {
            WindowEvent::CloseRequested => InputAction::Exit,
            WindowEvent::KeyboardInput { event, .. } => {
                if egui_response.consumed {
                    return ignored;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return ignored;
                };
                let pressed = event.state == ElementState::Pressed;
                self.input
                    .on_key(&mut self.camera_controller, code, pressed, event.repeat)
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(*size);
                InputAction::None
            }
            WindowEvent::Focused(false) => self.input.on_focus_lost(&mut self.camera_controller),
            // Clicks on the overlay belong to egui
            WindowEvent::MouseInput { state, button, .. } => self
                .input
                .on_mouse_button(*button, *state, self.egui_wants_pointer),
            WindowEvent::MouseWheel { delta, .. } => {
                if !self.egui_wants_pointer {
                    let offset = match delta {
                        MouseScrollDelta::LineDelta(_, y) => *y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                    };
                    self.camera_controller.on_scroll(offset);
                }
                InputAction::None
            }
            _ => InputAction::None,
        };

        match action {
            InputAction::Exit => {
                return EventResponse {
                    repaint: false,
                    exit: true,
                };
            }
            InputAction::ToggleHud => self.toggle_hud(),
            InputAction::CaptureCursor => self.set_cursor_captured(true),
            InputAction::ReleaseCursor => self.set_cursor_captured(false),
            InputAction::None => {}
        }

        ignored
    }

    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        self.input.on_mouse_motion(&mut self.camera_controller, delta);
    }

    pub fn resize_to_window(&mut self) {
        self.renderer.resize(self.window.inner_size());
    }

    /// Advance input by the elapsed frame time, then draw the scene and overlay
    pub fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let dt = self.clock.tick();
        self.camera_controller.update(dt);

        let camera = self.camera_controller.state();
        let info = HudInfo {
            position: camera.position,
            yaw: camera.yaw(),
            pitch: camera.pitch(),
            fov: camera.fov(),
            fps: self.clock.fps(),
            room: self.gallery.room_at(&self.root, &camera.position),
            room_count: self.gallery.layout().room_count,
            element_count: self.elements.len(),
            cursor_captured: self.input.cursor_captured(),
        };

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let egui_ctx = self.renderer.egui_context();
        let mut reset_camera = false;
        let full_output = egui_ctx.run(raw_input, |ctx| {
            reset_camera = self.hud.show(ctx, &info);
        });

        // Update egui pointer state for next frame
        self.egui_wants_pointer = egui_ctx.wants_pointer_input();

        if reset_camera {
            self.camera_controller.reset();
        }

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let size = self.window.inner_size();
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let frame = FrameContext {
            camera: self.camera_controller.state(),
            elements: &self.elements,
            textures: &self.textures,
            clear_color: self.settings.display.clear_color,
        };
        self.renderer.render(
            &frame,
            paint_jobs,
            full_output.textures_delta,
            screen_descriptor,
        )
    }

    fn toggle_hud(&mut self) {
        self.hud.visible = !self.hud.visible;
        self.settings.display.show_hud = self.hud.visible;
        self.settings.display.save();
    }

    /// Apply a capture change to the window. The router is told the outcome;
    /// a failed grab leaves the cursor free.
    fn set_cursor_captured(&mut self, captured: bool) {
        if captured {
            let grabbed = self
                .window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                log::warn!("Could not capture cursor: {}", e);
                self.input.set_cursor_captured(false);
                return;
            }
        } else if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("Could not release cursor: {}", e);
        }

        self.window.set_cursor_visible(!captured);
        self.input.set_cursor_captured(captured);
        log::debug!("Cursor captured: {}", captured);
    }
}
