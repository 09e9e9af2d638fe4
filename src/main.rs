use winit::event_loop::{ControlFlow, EventLoop};

mod app;
mod error;
mod renderer;
mod scene;
mod settings;
mod texture;
mod ui;

pub const CONFY_APP_NAME: &str = "gallery-rs";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = app::AppHandler::new(tokio::runtime::Runtime::new()?);
    event_loop.run_app(&mut handler)?;

    if let Some(err) = handler.startup_error.take() {
        return Err(err.into());
    }
    Ok(())
}
