use std::sync::Arc;
use tokio::runtime::Runtime;
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::app::app::App;
use crate::error::GalleryError;
use crate::settings::Settings;

pub struct AppHandler {
    pub app: Option<App>,
    pub runtime: Runtime,
    /// Set when startup fails; `main` reports it after the loop exits
    pub startup_error: Option<GalleryError>,
}

impl AppHandler {
    pub fn new(runtime: Runtime) -> Self {
        Self {
            app: None,
            runtime,
            startup_error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<App, GalleryError> {
        let settings = Settings::load();
        let window_attrs = Window::default_attributes()
            .with_title("Gallery")
            .with_inner_size(winit::dpi::LogicalSize::new(
                settings.display.width,
                settings.display.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.runtime.block_on(App::new(window, settings))
    }
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() || self.startup_error.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(app) => self.app = Some(app),
            Err(e) => {
                log::error!("Startup failed: {}", e);
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(app) = &mut self.app {
            let response = app.handle_event(&event);
            if response.repaint {
                app.window.request_redraw();
            }
            if response.exit {
                event_loop.exit();
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let (Some(app), DeviceEvent::MouseMotion { delta }) = (&mut self.app, event) {
            app.handle_mouse_motion(delta);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(app) = &mut self.app {
            match app.frame() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    app.resize_to_window();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory, exiting");
                    event_loop.exit();
                }
                Err(e) => log::warn!("Skipped frame: {:?}", e),
            }
            app.window.request_redraw();
        }
    }
}
