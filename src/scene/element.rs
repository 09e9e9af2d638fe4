use nalgebra_glm::Mat4;

use crate::texture::TextureKey;

/// Built-in drawable shapes. Sizes are fixed; placement scales them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Spans [-1, 1] on every axis
    Cube,
    /// Unit radius
    Sphere,
    /// Major radius 0.3, minor radius 0.1, lying in the XZ plane
    Torus,
}

impl Primitive {
    pub const ALL: [Primitive; 3] = [Primitive::Cube, Primitive::Sphere, Primitive::Torus];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    Textured(TextureKey),
    Color([f32; 4]),
}

/// One primitive placement: what to draw, where, and with which surface
#[derive(Debug, Clone, PartialEq)]
pub struct SceneElement {
    pub primitive: Primitive,
    pub transform: Mat4,
    pub surface: Surface,
}
