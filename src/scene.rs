pub mod element;
pub mod gallery;

pub use element::{Primitive, SceneElement, Surface};
pub use gallery::Gallery;
