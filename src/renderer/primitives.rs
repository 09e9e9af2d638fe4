use std::f32::consts::{PI, TAU};

use nalgebra_glm::{Vec3, vec3};

use crate::renderer::vertex::Vertex;
use crate::scene::Primitive;

pub const SPHERE_STACKS: u32 = 16;
pub const SPHERE_SLICES: u32 = 24;
pub const TORUS_MAJOR_RADIUS: f32 = 0.3;
pub const TORUS_MINOR_RADIUS: f32 = 0.1;
pub const TORUS_RINGS: u32 = 12;
pub const TORUS_SIDES: u32 = 12;

#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Slice of the shared index buffer holding one primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshRange {
    pub index_start: u32,
    pub index_count: u32,
}

fn vertex(position: Vec3, normal: Vec3, uv: [f32; 2]) -> Vertex {
    Vertex {
        position: position.into(),
        normal: normal.into(),
        uv,
    }
}

/// Cube spanning [-1, 1], four vertices per face so normals stay flat
pub fn cube() -> MeshData {
    // (normal, u axis, v axis) with u x v == normal for counter-clockwise faces
    let faces = [
        (vec3(1.0, 0.0, 0.0), vec3(0.0, 0.0, -1.0), vec3(0.0, 1.0, 0.0)),
        (vec3(-1.0, 0.0, 0.0), vec3(0.0, 0.0, 1.0), vec3(0.0, 1.0, 0.0)),
        (vec3(0.0, 1.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(0.0, 0.0, -1.0)),
        (vec3(0.0, -1.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(0.0, 0.0, 1.0)),
        (vec3(0.0, 0.0, 1.0), vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)),
        (vec3(0.0, 0.0, -1.0), vec3(-1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)),
    ];

    let mut mesh = MeshData::default();
    for (normal, u, v) in faces {
        let base = mesh.vertices.len() as u32;
        mesh.vertices.extend([
            vertex(normal - u - v, normal, [0.0, 1.0]),
            vertex(normal + u - v, normal, [1.0, 1.0]),
            vertex(normal + u + v, normal, [1.0, 0.0]),
            vertex(normal - u + v, normal, [0.0, 0.0]),
        ]);
        mesh.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Unit UV sphere centred on the origin
pub fn sphere(stacks: u32, slices: u32) -> MeshData {
    let mut mesh = MeshData::default();
    for i in 0..=stacks {
        let phi = PI * i as f32 / stacks as f32;
        for j in 0..=slices {
            let theta = TAU * j as f32 / slices as f32;
            let p = vec3(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            let uv = [j as f32 / slices as f32, i as f32 / stacks as f32];
            mesh.vertices.push(vertex(p, p, uv));
        }
    }
    grid_indices(&mut mesh.indices, stacks, slices);
    mesh
}

/// Torus around +Y; `rings` segments around the hole, `sides` around the tube
pub fn torus(major: f32, minor: f32, rings: u32, sides: u32) -> MeshData {
    let mut mesh = MeshData::default();
    for i in 0..=rings {
        let u = TAU * i as f32 / rings as f32;
        let center = vec3(major * u.cos(), 0.0, major * u.sin());
        for j in 0..=sides {
            let v = TAU * j as f32 / sides as f32;
            let normal = vec3(v.cos() * u.cos(), v.sin(), v.cos() * u.sin());
            let uv = [i as f32 / rings as f32, j as f32 / sides as f32];
            mesh.vertices.push(vertex(center + normal * minor, normal, uv));
        }
    }
    grid_indices(&mut mesh.indices, rings, sides);
    mesh
}

/// Two triangles per cell of a (rows + 1) x (cols + 1) vertex grid
fn grid_indices(indices: &mut Vec<u32>, rows: u32, cols: u32) {
    let stride = cols + 1;
    for i in 0..rows {
        for j in 0..cols {
            let a = i * stride + j;
            let b = a + stride;
            indices.extend([a, b, a + 1, a + 1, b, b + 1]);
        }
    }
}

pub fn mesh_for(primitive: Primitive) -> MeshData {
    match primitive {
        Primitive::Cube => cube(),
        Primitive::Sphere => sphere(SPHERE_STACKS, SPHERE_SLICES),
        Primitive::Torus => torus(
            TORUS_MAJOR_RADIUS,
            TORUS_MINOR_RADIUS,
            TORUS_RINGS,
            TORUS_SIDES,
        ),
    }
}

/// Pack every primitive into one vertex/index pair, indexed by `Primitive::index`
pub fn build_primitive_meshes() -> (MeshData, [MeshRange; 3]) {
    let mut combined = MeshData::default();
    let mut ranges = [MeshRange::default(); 3];
    for primitive in Primitive::ALL {
        let mesh = mesh_for(primitive);
        let base_vertex = combined.vertices.len() as u32;
        ranges[primitive.index()] = MeshRange {
            index_start: combined.indices.len() as u32,
            index_count: mesh.indices.len() as u32,
        };
        combined.vertices.extend(mesh.vertices);
        combined
            .indices
            .extend(mesh.indices.iter().map(|i| i + base_vertex));
    }
    (combined, ranges)
}
