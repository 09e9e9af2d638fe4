use nalgebra_glm::{Mat4, Vec3, vec3};

use super::element::{Primitive, SceneElement, Surface};
use crate::settings::GallerySettings;
use crate::texture::TextureKey;

pub const ROOM_HALF_EXTENT: f32 = 5.0;
pub const WALL_HEIGHT: f32 = 4.0;
pub const DOOR_HALF_WIDTH: f32 = 1.5;
pub const DOOR_HEIGHT: f32 = 3.0;
const WALL_HALF_THICKNESS: f32 = 0.05;
const SLAB_HALF_THICKNESS: f32 = 0.05;
const PEDESTAL_HEIGHT: f32 = 1.0;
/// Outer radius of the torus exhibit after its 2x scale
const TORUS_EXHIBIT_RADIUS: f32 = 0.8;

const SHIRT: [f32; 4] = [0.2, 0.3, 0.7, 1.0];
const TROUSERS: [f32; 4] = [0.15, 0.15, 0.2, 1.0];
const MARBLE: [f32; 4] = [0.9, 0.9, 0.88, 1.0];
const MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
const GOLD: [f32; 4] = [0.85, 0.65, 0.2, 1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalleryLayout {
    pub room_count: usize,
    /// Distance between neighbouring room centres along +X
    pub spacing: f32,
}

impl Default for GalleryLayout {
    fn default() -> Self {
        Self {
            room_count: 4,
            spacing: 13.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exhibit {
    Figure,
    Torus,
    Sphere,
}

impl Exhibit {
    fn for_room(room: usize) -> Self {
        match room % 3 {
            0 => Exhibit::Figure,
            1 => Exhibit::Torus,
            _ => Exhibit::Sphere,
        }
    }
}

/// Static description of the gallery: rooms strung along +X joined by corridors.
///
/// Every placement is a pure function of the root transform, the layout and the
/// room index, so the same list comes back on every call.
#[derive(Debug, Clone)]
pub struct Gallery {
    layout: GalleryLayout,
}

impl Gallery {
    pub fn new(layout: GalleryLayout) -> Self {
        Self { layout }
    }

    pub fn from_settings(settings: &GallerySettings) -> Self {
        Self::new(GalleryLayout {
            room_count: settings.room_count,
            spacing: settings.spacing,
        })
    }

    pub fn layout(&self) -> &GalleryLayout {
        &self.layout
    }

    /// All placements for every room, in room order
    pub fn placements(&self, root: &Mat4) -> Vec<SceneElement> {
        let mut elements = Vec::new();
        for room in 0..self.layout.room_count {
            elements.extend(self.room_placements(root, room));
        }
        elements
    }

    /// Placements belonging to one room, including the corridor to the next room
    pub fn room_placements(&self, root: &Mat4, room: usize) -> Vec<SceneElement> {
        let mut placer = Placer::new(root);
        let x0 = room as f32 * self.layout.spacing;
        let last = room + 1 >= self.layout.room_count;

        // Floor and ceiling
        placer.block(
            vec3(x0, -SLAB_HALF_THICKNESS, 0.0),
            vec3(ROOM_HALF_EXTENT, SLAB_HALF_THICKNESS, ROOM_HALF_EXTENT),
            Surface::Textured(TextureKey::Floor),
        );
        placer.block(
            vec3(x0, WALL_HEIGHT + SLAB_HALF_THICKNESS, 0.0),
            vec3(ROOM_HALF_EXTENT, SLAB_HALF_THICKNESS, ROOM_HALF_EXTENT),
            Surface::Textured(TextureKey::Ceiling),
        );

        // Back and front walls
        for side in [-1.0, 1.0] {
            placer.block(
                vec3(
                    x0,
                    WALL_HEIGHT / 2.0,
                    side * (ROOM_HALF_EXTENT + WALL_HALF_THICKNESS),
                ),
                vec3(ROOM_HALF_EXTENT, WALL_HEIGHT / 2.0, WALL_HALF_THICKNESS),
                Surface::Textured(TextureKey::Wall),
            );
        }

        // West and east walls, with a doorway toward any neighbour
        let wall_x = ROOM_HALF_EXTENT + WALL_HALF_THICKNESS;
        placer.side_wall(x0 - wall_x, room == 0);
        placer.side_wall(x0 + wall_x, last);

        // Paintings on the back and front walls
        placer.painting(x0, -1.0, TextureKey::painting(2 * room));
        placer.painting(x0, 1.0, TextureKey::painting(2 * room + 1));

        match Exhibit::for_room(room) {
            Exhibit::Figure => placer.figure(x0),
            Exhibit::Torus => placer.pedestal(x0, Primitive::Torus),
            Exhibit::Sphere => placer.pedestal(x0, Primitive::Sphere),
        }

        if !last {
            placer.corridor(x0 + self.layout.spacing / 2.0, self.corridor_half_length());
        }

        placer.finish()
    }

    /// Which room footprint contains the world-space `point`, if any
    pub fn room_at(&self, root: &Mat4, point: &Vec3) -> Option<usize> {
        if self.layout.room_count == 0 || self.layout.spacing <= 0.0 {
            return None;
        }
        let local = nalgebra_glm::inverse(root) * nalgebra_glm::vec4(point.x, point.y, point.z, 1.0);
        let index = (local.x / self.layout.spacing).round();
        if index < 0.0 || index >= self.layout.room_count as f32 {
            return None;
        }
        let dx = local.x - index * self.layout.spacing;
        if dx.abs() <= ROOM_HALF_EXTENT && local.z.abs() <= ROOM_HALF_EXTENT {
            Some(index as usize)
        } else {
            None
        }
    }

    /// Half-length of the corridor floor, which runs edge to edge between room floors
    fn corridor_half_length(&self) -> f32 {
        self.layout.spacing / 2.0 - ROOM_HALF_EXTENT
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new(GalleryLayout::default())
    }
}

/// Accumulates placements chained from a shared root transform
struct Placer<'a> {
    root: &'a Mat4,
    elements: Vec<SceneElement>,
}

impl<'a> Placer<'a> {
    fn new(root: &'a Mat4) -> Self {
        Self {
            root,
            elements: Vec::new(),
        }
    }

    fn finish(self) -> Vec<SceneElement> {
        self.elements
    }

    fn push(&mut self, primitive: Primitive, local: Mat4, surface: Surface) {
        self.elements.push(SceneElement {
            primitive,
            transform: self.root * local,
            surface,
        });
    }

    /// Axis-aligned cube centred at `center` with the given half extents
    fn block(&mut self, center: Vec3, half_extents: Vec3, surface: Surface) {
        self.push(Primitive::Cube, box_transform(center, half_extents), surface);
    }

    fn side_wall(&mut self, x: f32, solid: bool) {
        let wall = Surface::Textured(TextureKey::Wall);
        if solid {
            self.block(
                vec3(x, WALL_HEIGHT / 2.0, 0.0),
                vec3(WALL_HALF_THICKNESS, WALL_HEIGHT / 2.0, ROOM_HALF_EXTENT),
                wall,
            );
            return;
        }

        let segment_half = (ROOM_HALF_EXTENT - DOOR_HALF_WIDTH) / 2.0;
        for side in [-1.0, 1.0] {
            self.block(
                vec3(x, WALL_HEIGHT / 2.0, side * (DOOR_HALF_WIDTH + segment_half)),
                vec3(WALL_HALF_THICKNESS, WALL_HEIGHT / 2.0, segment_half),
                wall,
            );
        }

        let lintel_half = (WALL_HEIGHT - DOOR_HEIGHT) / 2.0;
        self.block(
            vec3(x, DOOR_HEIGHT + lintel_half, 0.0),
            vec3(WALL_HALF_THICKNESS, lintel_half, DOOR_HALF_WIDTH),
            wall,
        );
    }

    /// Framed canvas hung on the back (`side` = -1) or front (`side` = 1) wall
    fn painting(&mut self, x: f32, side: f32, canvas: TextureKey) {
        let height = 2.0;
        self.block(
            vec3(x, height, side * (ROOM_HALF_EXTENT - 0.02)),
            vec3(1.3, 0.9, 0.02),
            Surface::Textured(TextureKey::Frame),
        );
        self.block(
            vec3(x, height, side * (ROOM_HALF_EXTENT - 0.05)),
            vec3(1.2, 0.8, 0.02),
            Surface::Textured(canvas),
        );
    }

    /// Humanoid built from a figure root: torso, head, then limbs hung from joints
    fn figure(&mut self, x: f32) {
        let figure_root = nalgebra_glm::translate(&Mat4::identity(), &vec3(x, 0.0, 0.0));
        let skin = Surface::Textured(TextureKey::Skin);

        let torso = nalgebra_glm::translate(&figure_root, &vec3(0.0, 1.15, 0.0));
        self.push(
            Primitive::Cube,
            nalgebra_glm::scale(&torso, &vec3(0.25, 0.35, 0.12)),
            Surface::Color(SHIRT),
        );

        let neck = nalgebra_glm::translate(&torso, &vec3(0.0, 0.35, 0.0));
        let head = nalgebra_glm::translate(&neck, &vec3(0.0, 0.22, 0.0));
        self.push(
            Primitive::Sphere,
            nalgebra_glm::scale(&head, &vec3(0.18, 0.2, 0.18)),
            skin,
        );

        for side in [-1.0, 1.0] {
            let shoulder = nalgebra_glm::translate(&torso, &vec3(side * 0.33, 0.3, 0.0));
            let shoulder = nalgebra_glm::rotate_z(&shoulder, side * 0.1);
            let arm = nalgebra_glm::translate(&shoulder, &vec3(0.0, -0.3, 0.0));
            self.push(
                Primitive::Cube,
                nalgebra_glm::scale(&arm, &vec3(0.07, 0.3, 0.07)),
                skin,
            );

            let hip = nalgebra_glm::translate(&torso, &vec3(side * 0.12, -0.35, 0.0));
            let leg = nalgebra_glm::translate(&hip, &vec3(0.0, -0.4, 0.0));
            self.push(
                Primitive::Cube,
                nalgebra_glm::scale(&leg, &vec3(0.09, 0.4, 0.09)),
                Surface::Color(TROUSERS),
            );
        }
    }

    fn pedestal(&mut self, x: f32, exhibit: Primitive) {
        self.block(
            vec3(x, PEDESTAL_HEIGHT / 2.0, 0.0),
            vec3(0.4, PEDESTAL_HEIGHT / 2.0, 0.4),
            Surface::Color(MARBLE),
        );

        // Exhibits stand clear of the pedestal top
        let local = match exhibit {
            Primitive::Torus => {
                let center = vec3(x, PEDESTAL_HEIGHT + TORUS_EXHIBIT_RADIUS + 0.1, 0.0);
                let upright = nalgebra_glm::rotate_x(
                    &nalgebra_glm::translate(&Mat4::identity(), &center),
                    std::f32::consts::FRAC_PI_2,
                );
                nalgebra_glm::scale(&upright, &vec3(2.0, 2.0, 2.0))
            }
            _ => box_transform(vec3(x, PEDESTAL_HEIGHT + 0.4, 0.0), vec3(0.4, 0.4, 0.4)),
        };
        let color = if exhibit == Primitive::Torus { MAGENTA } else { GOLD };
        self.push(exhibit, local, Surface::Color(color));
    }

    /// Floor spans `floor_half_length` either side of `x`; ceiling and side walls
    /// fill the gap between the two rooms' end walls
    fn corridor(&mut self, x: f32, floor_half_length: f32) {
        let half_length = floor_half_length - 2.0 * WALL_HALF_THICKNESS;
        if half_length <= 0.0 {
            return;
        }
        self.block(
            vec3(x, -SLAB_HALF_THICKNESS, 0.0),
            vec3(floor_half_length, SLAB_HALF_THICKNESS, DOOR_HALF_WIDTH),
            Surface::Textured(TextureKey::Floor),
        );
        self.block(
            vec3(x, DOOR_HEIGHT + SLAB_HALF_THICKNESS, 0.0),
            vec3(half_length, SLAB_HALF_THICKNESS, DOOR_HALF_WIDTH),
            Surface::Textured(TextureKey::Ceiling),
        );
        for side in [-1.0, 1.0] {
            self.block(
                vec3(
                    x,
                    DOOR_HEIGHT / 2.0,
                    side * (DOOR_HALF_WIDTH + WALL_HALF_THICKNESS),
                ),
                vec3(half_length, DOOR_HEIGHT / 2.0, WALL_HALF_THICKNESS),
                Surface::Textured(TextureKey::Wall),
            );
        }
    }
}

fn box_transform(center: Vec3, half_extents: Vec3) -> Mat4 {
    let moved = nalgebra_glm::translate(&Mat4::identity(), &center);
    nalgebra_glm::scale(&moved, &half_extents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// World-space position of the element's local origin
    fn center(element: &SceneElement) -> Vec3 {
        let origin = element.transform.column(3);
        vec3(origin[0], origin[1], origin[2])
    }

    fn count_corridor_floors(elements: &[SceneElement]) -> usize {
        elements
            .iter()
            .filter(|e| {
                e.surface == Surface::Textured(TextureKey::Floor)
                    && center(e).x.rem_euclid(13.0) > ROOM_HALF_EXTENT
            })
            .count()
    }

    #[test]
    fn placements_are_deterministic() {
        let gallery = Gallery::default();
        let root = nalgebra_glm::rotate_y(&Mat4::identity(), 0.7);
        for room in 0..4 {
            assert_eq!(
                gallery.room_placements(&root, room),
                gallery.room_placements(&root, room)
            );
        }
        assert_eq!(gallery.placements(&root), gallery.placements(&root));
    }

    #[test]
    fn full_list_is_rooms_in_order() {
        let gallery = Gallery::default();
        let root = Mat4::identity();
        let mut expected = Vec::new();
        for room in 0..gallery.layout().room_count {
            expected.extend(gallery.room_placements(&root, room));
        }
        assert_eq!(gallery.placements(&root), expected);
    }

    #[test]
    fn element_counts_per_room() {
        let gallery = Gallery::default();
        let root = Mat4::identity();
        // Figure room at the west end: solid west wall, doorway east, corridor
        assert_eq!(gallery.room_placements(&root, 0).len(), 22);
        // Middle rooms: two doorways, a pedestal exhibit, corridor
        assert_eq!(gallery.room_placements(&root, 1).len(), 20);
        assert_eq!(gallery.room_placements(&root, 2).len(), 20);
        // Figure room at the east end: no corridor
        assert_eq!(gallery.room_placements(&root, 3).len(), 18);
    }

    #[test]
    fn only_non_final_rooms_emit_corridors() {
        let gallery = Gallery::default();
        let root = Mat4::identity();
        for room in 0..4 {
            let corridors = count_corridor_floors(&gallery.room_placements(&root, room));
            assert_eq!(corridors, if room < 3 { 1 } else { 0 }, "room {room}");
        }
    }

    #[test]
    fn single_room_gallery_is_closed() {
        let gallery = Gallery::new(GalleryLayout {
            room_count: 1,
            spacing: 13.0,
        });
        let elements = gallery.placements(&Mat4::identity());
        assert_eq!(elements.len(), 16);
        assert_eq!(count_corridor_floors(&elements), 0);
    }

    #[test]
    fn root_translation_moves_every_element() {
        let gallery = Gallery::default();
        let offset = vec3(3.0, -1.0, 7.5);
        let moved_root = nalgebra_glm::translate(&Mat4::identity(), &offset);

        let base = gallery.placements(&Mat4::identity());
        let moved = gallery.placements(&moved_root);
        assert_eq!(base.len(), moved.len());
        for (a, b) in base.iter().zip(&moved) {
            assert_eq!(a.primitive, b.primitive);
            assert_eq!(a.surface, b.surface);
            let shift = center(b) - center(a);
            assert_relative_eq!(shift.x, offset.x, epsilon = 1e-4);
            assert_relative_eq!(shift.y, offset.y, epsilon = 1e-4);
            assert_relative_eq!(shift.z, offset.z, epsilon = 1e-4);
        }
    }

    #[test]
    fn rooms_sit_at_spacing_intervals() {
        let gallery = Gallery::default();
        let root = Mat4::identity();
        for room in 0..4 {
            let floor = &gallery.room_placements(&root, room)[0];
            assert_eq!(floor.surface, Surface::Textured(TextureKey::Floor));
            assert_relative_eq!(center(floor).x, room as f32 * 13.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn paintings_cycle_through_every_canvas() {
        let gallery = Gallery::default();
        let elements = gallery.placements(&Mat4::identity());
        for n in 0..4 {
            let key = TextureKey::painting(n);
            assert!(
                elements.iter().any(|e| e.surface == Surface::Textured(key)),
                "{key:?} never placed"
            );
        }
    }

    #[test]
    fn exhibits_rotate_with_room_index() {
        let gallery = Gallery::default();
        let root = Mat4::identity();
        let has = |room: usize, primitive: Primitive| {
            gallery
                .room_placements(&root, room)
                .iter()
                .any(|e| e.primitive == primitive)
        };
        assert!(has(0, Primitive::Sphere) && !has(0, Primitive::Torus));
        assert!(has(1, Primitive::Torus));
        assert!(has(2, Primitive::Sphere) && !has(2, Primitive::Torus));
    }

    #[test]
    fn floor_is_continuous_from_first_room_to_last() {
        let gallery = Gallery::default();
        let mut spans: Vec<(f32, f32)> = gallery
            .placements(&Mat4::identity())
            .iter()
            .filter(|e| e.surface == Surface::Textured(TextureKey::Floor))
            .map(|e| {
                let half = e.transform[(0, 0)];
                (center(e).x - half, center(e).x + half)
            })
            .collect();
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));

        assert_relative_eq!(spans[0].0, -ROOM_HALF_EXTENT, epsilon = 1e-4);
        let mut reach = spans[0].1;
        for (start, end) in &spans[1..] {
            assert!(*start <= reach + 1e-4, "gap in floor between {reach} and {start}");
            reach = reach.max(*end);
        }
        assert_relative_eq!(reach, 39.0 + ROOM_HALF_EXTENT, epsilon = 1e-4);
    }

    #[test]
    fn exhibits_rest_above_the_pedestal() {
        let gallery = Gallery::default();
        let torus_mesh = crate::renderer::primitives::mesh_for(Primitive::Torus);
        let sphere_mesh = crate::renderer::primitives::mesh_for(Primitive::Sphere);
        for room in [1, 2] {
            let exhibit = gallery
                .room_placements(&Mat4::identity(), room)
                .into_iter()
                .find(|e| matches!(e.primitive, Primitive::Torus | Primitive::Sphere))
                .unwrap();
            let mesh = if exhibit.primitive == Primitive::Torus {
                &torus_mesh
            } else {
                &sphere_mesh
            };
            let lowest = mesh
                .vertices
                .iter()
                .map(|v| {
                    let p = nalgebra_glm::make_vec3(&v.position);
                    (exhibit.transform * nalgebra_glm::vec4(p.x, p.y, p.z, 1.0)).y
                })
                .fold(f32::INFINITY, f32::min);
            assert!(lowest >= PEDESTAL_HEIGHT - 1e-4, "room {room}: lowest point {lowest}");
        }
    }

    #[test]
    fn textured_elements_use_listed_assets() {
        let gallery = Gallery::default();
        for element in gallery.placements(&Mat4::identity()) {
            if let Surface::Textured(key) = element.surface {
                assert!(TextureKey::ALL.contains(&key), "{key:?}");
            }
        }
    }

    #[test]
    fn room_at_finds_room_footprints() {
        let gallery = Gallery::default();
        let root = Mat4::identity();
        assert_eq!(gallery.room_at(&root, &vec3(0.0, 1.6, 4.0)), Some(0));
        assert_eq!(gallery.room_at(&root, &vec3(13.0, 1.6, -2.0)), Some(1));
        assert_eq!(gallery.room_at(&root, &vec3(39.0, 1.6, 0.0)), Some(3));
        // Inside a corridor
        assert_eq!(gallery.room_at(&root, &vec3(6.5, 1.6, 0.0)), None);
        // Past the last room and behind the first
        assert_eq!(gallery.room_at(&root, &vec3(52.0, 1.6, 0.0)), None);
        assert_eq!(gallery.room_at(&root, &vec3(-9.0, 1.6, 0.0)), None);
    }

    #[test]
    fn room_at_respects_root_transform() {
        let gallery = Gallery::default();
        let root = nalgebra_glm::translate(&Mat4::identity(), &vec3(100.0, 0.0, 0.0));
        assert_eq!(gallery.room_at(&root, &vec3(113.0, 1.0, 0.0)), Some(1));
        assert_eq!(gallery.room_at(&root, &vec3(13.0, 1.0, 0.0)), None);
    }
}
