//! Per-frame and per-draw uniform layouts shared with `shader.wgsl`
use bytemuck::{Pod, Zeroable};

use crate::renderer::camera::CameraState;
use crate::scene::{SceneElement, Surface};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4], // position.xyz + padding
}

impl CameraUniform {
    pub fn new(camera: &CameraState, aspect: f32) -> Self {
        let view_proj = camera.projection_matrix(aspect) * camera.view_matrix();
        let eye = camera.position;
        Self {
            view_proj: view_proj.into(),
            eye: [eye.x, eye.y, eye.z, 1.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub params: [f32; 4], // x = sample texture (1.0) or use flat color (0.0)
}

impl DrawUniform {
    pub fn from_element(element: &SceneElement) -> Self {
        let (color, textured) = match element.surface {
            Surface::Textured(_) => ([1.0, 1.0, 1.0, 1.0], 1.0),
            Surface::Color(color) => (color, 0.0),
        };
        Self {
            model: element.transform.into(),
            normal: nalgebra_glm::inverse_transpose(element.transform).into(),
            color,
            params: [textured, 0.0, 0.0, 0.0],
        }
    }
}
