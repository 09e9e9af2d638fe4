pub mod camera;
pub mod primitives;
pub mod render;
pub mod renderer;
pub mod uniforms;
pub mod vertex;

pub use render::FrameContext;
pub use renderer::Renderer;
