pub mod app;
pub mod clock;
pub mod handler;
pub mod input;

pub use handler::AppHandler;
