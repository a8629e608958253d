//! Per-frame 3D scene assembly: room shell, placed furniture, lights and the selection label.
//!
//! Everything here is recomputed from `(items, selection, settings, elapsed)`; nothing carries
//! over between frames.

use std::time::Instant;

use glam::{Mat4, Vec3};
use shared::{FurnitureItem, Rgb, RoomSettings, ShapeVariant, Theme, ThemeRegistry};

use crate::geometry::{FrameParams, PlacedModel};
use crate::lighting::{brightness_factor, SceneLighting, CEILING_LIGHTS, CEILING_RANGE};
use crate::mapping::item_anchor;
use crate::viewport::mesh::{self, LineMeshData, MeshData};
use crate::viewport::picking::{self, Aabb, Pickable, Ray};

/// Half extent of the square room in world units
pub const ROOM_HALF: f32 = 10.0;
pub const ROOM_HEIGHT: f32 = 10.0;
/// Height of the selection label above the item anchor
pub const LABEL_HEIGHT: f32 = 3.0;
pub const LABEL_COLOR: Rgb = Rgb::new(0xff, 0xaa, 0x00);
/// Initial camera eye, outside the open front corner of the room
pub const DEFAULT_EYE: Vec3 = Vec3::new(12.0, 8.0, 12.0);

const BASEBOARD: Rgb = Rgb::new(0xe8, 0xe8, 0xe8);
const MOLDING: Rgb = Rgb::new(0xf0, 0xf0, 0xf0);

/// Wall-clock source for animation; every animated value is a function of `elapsed()`
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }

    /// Seconds since the clock started
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    pub fn restart(&mut self) {
        self.start = Instant::now();
    }
}

/// Light in world space
#[derive(Debug, Clone, PartialEq)]
pub struct WorldLight {
    pub position: Vec3,
    pub color: Rgb,
    pub intensity: f32,
    pub range: f32,
}

/// One item as placed in this frame
#[derive(Debug, Clone)]
pub struct ItemInstance {
    /// Position in the item list
    pub index: usize,
    pub variant: ShapeVariant,
    /// World-space triangles of every part
    pub mesh: MeshData,
    /// World-space bounds, one per part
    pub part_bounds: Vec<Aabb>,
}

impl ItemInstance {
    pub fn bounds(&self) -> Aabb {
        self.part_bounds.iter().fold(Aabb::EMPTY, |acc, b| acc.union(b))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneLabel {
    pub text: String,
    pub position: Vec3,
    pub color: Rgb,
}

#[derive(Debug, Clone)]
pub struct SceneFrame {
    pub items: Vec<ItemInstance>,
    pub room: MeshData,
    pub grid: Option<LineMeshData>,
    pub lighting: SceneLighting,
    pub point_lights: Vec<WorldLight>,
    pub background: Rgb,
    pub label: Option<SceneLabel>,
}

impl SceneFrame {
    /// Index of the item owning the nearest part under the ray.
    pub fn pick(&self, ray: &Ray) -> Option<usize> {
        let candidates = self.items.iter().map(|inst| Pickable {
            bounds: &inst.part_bounds,
            mesh: &inst.mesh,
        });
        let hit = picking::pick_nearest(ray, candidates).map(|i| self.items[i].index);
        tracing::debug!(?hit, "3d pick");
        hit
    }

    pub fn item(&self, index: usize) -> Option<&ItemInstance> {
        self.items.iter().find(|inst| inst.index == index)
    }

    /// Room and items merged into one mesh for upload
    pub fn merged_mesh(&self) -> MeshData {
        let mut out = self.room.clone();
        for inst in &self.items {
            out.append(&inst.mesh);
        }
        out
    }

    pub fn triangle_count(&self) -> usize {
        self.room.triangle_count() + self.items.iter().map(|i| i.mesh.triangle_count()).sum::<usize>()
    }
}

/// Tessellate one item in world space
pub fn place_item(index: usize, item: &FurnitureItem, params: &FrameParams) -> Option<(ItemInstance, Option<WorldLight>)> {
    let placed = PlacedModel::place(item, params)?;

    let mut mesh = MeshData::new();
    let mut part_bounds = Vec::with_capacity(placed.model.parts.len());
    for (part, transform) in placed.part_transforms() {
        let mut world = MeshData::new();
        world.append_transformed(&part.solid.mesh(part.color), transform);
        part_bounds.push(Aabb::from_mesh(&world));
        mesh.append(&world);
    }

    let light = match (&placed.model.light, placed.light_position()) {
        (Some(l), Some(position)) => Some(WorldLight {
            position,
            color: l.color,
            intensity: l.intensity,
            range: l.range,
        }),
        _ => None,
    };

    let instance = ItemInstance {
        index,
        variant: placed.model.variant,
        mesh,
        part_bounds,
    };
    Some((instance, light))
}

/// Build the whole frame. `eye` decides which single-sided walls are emitted.
pub fn build_scene(
    items: &[FurnitureItem],
    selected: Option<usize>,
    settings: &RoomSettings,
    themes: &ThemeRegistry,
    elapsed: f32,
    eye: Vec3,
) -> SceneFrame {
    let theme = themes.get(settings.theme);
    let factor = brightness_factor(theme, settings);
    let lighting = SceneLighting::new(factor);

    let mut point_lights: Vec<WorldLight> = CEILING_LIGHTS
        .iter()
        .map(|&position| WorldLight {
            position,
            color: lighting.color,
            intensity: lighting.ceiling,
            range: CEILING_RANGE,
        })
        .collect();

    let mut instances = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let params = FrameParams {
            elapsed,
            selected: selected == Some(index),
            light_factor: factor,
        };
        if let Some((instance, light)) = place_item(index, item, &params) {
            instances.push(instance);
            point_lights.extend(light);
        }
    }

    let label = selected.and_then(|i| items.get(i)).map(|item| SceneLabel {
        text: item.name.clone(),
        position: item_anchor(item) + Vec3::Y * LABEL_HEIGHT,
        color: LABEL_COLOR,
    });

    SceneFrame {
        items: instances,
        room: room_shell(theme, eye),
        grid: settings.show_grid.then(|| mesh::grid(ROOM_HALF as i32, 1.0, 0.25)),
        lighting,
        point_lights,
        background: theme.background,
        label,
    }
}

/// Floor, walls, ceiling and trim. Walls are single-sided: each is emitted only while the
/// eye is on its inner side, so an orbiting camera outside the room sees straight in.
pub fn room_shell(theme: &Theme, eye: Vec3) -> MeshData {
    let h = ROOM_HALF;
    let top = ROOM_HEIGHT;
    let mut out = MeshData::new();

    let floor = theme.floor.to_unit();
    out.append(&mesh::quad(
        [Vec3::new(-h, 0.0, h), Vec3::new(h, 0.0, h), Vec3::new(h, 0.0, -h), Vec3::new(-h, 0.0, -h)],
        Vec3::Y,
        floor,
    ));
    let plank = theme.floor.scaled(0.8).to_unit();
    for i in 0..10 {
        let z = -9.0 + i as f32 * 2.0;
        add_box(&mut out, Vec3::new(20.0, 0.02, 0.1), Vec3::new(0.0, 0.01, z), plank);
    }

    if eye.z > -h {
        let accent = theme.accent.to_unit();
        out.append(&mesh::quad(
            [Vec3::new(-h, 0.0, -h), Vec3::new(h, 0.0, -h), Vec3::new(h, top, -h), Vec3::new(-h, top, -h)],
            Vec3::Z,
            accent,
        ));
        let texture = theme.accent.scaled(0.9).to_unit();
        for i in 0..8 {
            add_box(&mut out, Vec3::new(0.05, 8.0, 0.05), Vec3::new(-8.0 + i as f32 * 2.0, 4.0, -9.95), texture);
        }
        add_box(&mut out, Vec3::new(20.0, 0.3, 0.2), Vec3::new(0.0, 0.15, -9.9), BASEBOARD.to_unit());
        add_box(&mut out, Vec3::new(20.0, 0.2, 0.3), Vec3::new(0.0, 9.9, -h), MOLDING.to_unit());
    }

    let wall = theme.wall.to_unit();
    if eye.x > -h {
        out.append(&mesh::quad(
            [Vec3::new(-h, 0.0, h), Vec3::new(-h, 0.0, -h), Vec3::new(-h, top, -h), Vec3::new(-h, top, h)],
            Vec3::X,
            wall,
        ));
        add_box(&mut out, Vec3::new(0.2, 0.3, 20.0), Vec3::new(-9.9, 0.15, 0.0), BASEBOARD.to_unit());
        add_box(&mut out, Vec3::new(0.3, 0.2, 20.0), Vec3::new(-h, 9.9, 0.0), MOLDING.to_unit());
    }
    if eye.x < h {
        out.append(&mesh::quad(
            [Vec3::new(h, 0.0, -h), Vec3::new(h, 0.0, h), Vec3::new(h, top, h), Vec3::new(h, top, -h)],
            Vec3::NEG_X,
            wall,
        ));
        add_box(&mut out, Vec3::new(0.2, 0.3, 20.0), Vec3::new(9.9, 0.15, 0.0), BASEBOARD.to_unit());
        add_box(&mut out, Vec3::new(0.3, 0.2, 20.0), Vec3::new(h, 9.9, 0.0), MOLDING.to_unit());
    }
    if eye.y < top {
        out.append(&mesh::quad(
            [Vec3::new(-h, top, -h), Vec3::new(h, top, -h), Vec3::new(h, top, h), Vec3::new(-h, top, h)],
            Vec3::NEG_Y,
            wall,
        ));
        let disc = mesh::cylinder(0.8, 0.1, 8, Rgb::WHITE.to_unit());
        for light in CEILING_LIGHTS {
            out.append_transformed(&disc, Mat4::from_translation(Vec3::new(light.x, 9.8, light.z)));
        }
    }

    out
}

fn add_box(out: &mut MeshData, size: Vec3, center: Vec3, color: [f32; 3]) {
    out.append_transformed(&mesh::cube(size.x, size.y, size.z, color), Mat4::from_translation(center));
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ThemeName;

    const OUTSIDE_EYE: Vec3 = DEFAULT_EYE;

    fn item(id: &str, x: f32, y: f32) -> FurnitureItem {
        FurnitureItem::new(id, id, x, y, 50.0, 50.0).with_color("#aa5533")
    }

    #[test]
    fn test_items_follow_mapping() {
        let themes = ThemeRegistry::builtin();
        let items = vec![item("rug_1", 400.0, 300.0)];
        let frame = build_scene(&items, None, &RoomSettings::default(), &themes, 0.0, OUTSIDE_EYE);
        let b = frame.items[0].bounds();
        // Unit cube resting on the floor at the origin
        assert!((b.center() - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_skips_items_without_area() {
        let themes = ThemeRegistry::builtin();
        let mut flat = item("desk_1", 100.0, 100.0);
        flat.width = 0.0;
        let items = vec![flat, item("chair_2", 300.0, 300.0)];
        let frame = build_scene(&items, None, &RoomSettings::default(), &themes, 0.0, OUTSIDE_EYE);
        assert_eq!(frame.items.len(), 1);
        assert_eq!(frame.items[0].index, 1);
    }

    #[test]
    fn test_lights_scale_with_factor() {
        let themes = ThemeRegistry::builtin();
        let settings = RoomSettings { theme: ThemeName::Warm, lighting: 40, ..RoomSettings::default() };
        let items = vec![item("lamp_1", 400.0, 300.0)];
        let frame = build_scene(&items, None, &settings, &themes, 0.0, OUTSIDE_EYE);
        assert!((frame.lighting.ambient - 0.4 * 0.4).abs() < 1e-6);
        // Four ceiling lights plus the lamp
        assert_eq!(frame.point_lights.len(), 5);
        let lamp = frame.point_lights.last().unwrap();
        assert!((lamp.intensity - 0.4 * 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_label_above_selected_item() {
        let themes = ThemeRegistry::builtin();
        let items = vec![item("desk_1", 500.0, 300.0)];
        let frame = build_scene(&items, Some(0), &RoomSettings::default(), &themes, 0.0, OUTSIDE_EYE);
        let label = frame.label.unwrap();
        assert_eq!(label.text, "desk_1");
        assert_eq!(label.position, Vec3::new(1.0, 3.0, 0.0));

        let frame = build_scene(&items, Some(4), &RoomSettings::default(), &themes, 0.0, OUTSIDE_EYE);
        assert!(frame.label.is_none());
    }

    #[test]
    fn test_walls_hidden_from_outside() {
        let theme = ThemeRegistry::builtin().get(ThemeName::Dark).clone();
        let outside = room_shell(&theme, OUTSIDE_EYE);
        let inside = room_shell(&theme, Vec3::new(0.0, 5.0, 0.0));
        assert!(inside.triangle_count() > outside.triangle_count());
    }

    #[test]
    fn test_pick_selects_item_under_ray() {
        let themes = ThemeRegistry::builtin();
        let items = vec![item("rug_1", 400.0, 300.0), item("rug_2", 600.0, 300.0)];
        let frame = build_scene(&items, None, &RoomSettings::default(), &themes, 0.0, OUTSIDE_EYE);

        let down = Ray::new(Vec3::new(2.1, 5.0, 0.13), Vec3::NEG_Y);
        assert_eq!(frame.pick(&down), Some(1));

        let miss = Ray::new(Vec3::new(-3.0, 5.0, 0.0), Vec3::NEG_Y);
        assert_eq!(frame.pick(&miss), None);
    }

    #[test]
    fn test_grid_only_when_enabled() {
        let themes = ThemeRegistry::builtin();
        let mut settings = RoomSettings::default();
        assert!(build_scene(&[], None, &settings, &themes, 0.0, OUTSIDE_EYE).grid.is_none());
        settings.show_grid = true;
        assert!(build_scene(&[], None, &settings, &themes, 0.0, OUTSIDE_EYE).grid.is_some());
    }

    #[test]
    fn test_frame_clock_is_monotonic() {
        let clock = FrameClock::new();
        let a = clock.elapsed();
        let b = clock.elapsed();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
