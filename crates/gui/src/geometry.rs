//! Procedural 3D furniture models.
//!
//! A model is a list of primitive solids in the item's local frame (y-up, origin on the
//! floor at the item anchor). Placement, animation and tessellation happen later so the
//! same model can be inspected, picked and rendered.

use glam::{Mat4, Vec3};
use shared::{FurnitureItem, Rgb, ShapeVariant};

use crate::lighting::{adjust_brightness, lamp_intensity};
use crate::mapping::item_anchor;
use crate::shapes::{self, BOOK_PALETTE, LAMP_BASE_BROWN, POT_BROWN};
use crate::viewport::mesh::{self, MeshData};

/// World units per model unit, applied uniformly to every item
pub const WORLD_UNIT: f32 = 1.0;

/// Desk spin rate while selected (radians per second)
pub const DESK_SPIN_RATE: f32 = 0.6;
/// Chair bob: angular rate and amplitude
pub const CHAIR_BOB_RATE: f32 = 3.0;
pub const CHAIR_BOB_AMPLITUDE: f32 = 0.05;
/// Plant sway: angular rate and amplitude (radians)
pub const PLANT_SWAY_RATE: f32 = 0.5;
pub const PLANT_SWAY_AMPLITUDE: f32 = 0.1;

const SEGMENTS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solid {
    Box { size: Vec3 },
    /// Frustum; a cylinder when both radii match
    Cylinder { radius_top: f32, radius_bottom: f32, height: f32 },
    Cone { radius: f32, height: f32 },
    Sphere { radius: f32 },
}

impl Solid {
    /// Tessellate around the local origin
    pub fn mesh(&self, color: Rgb) -> MeshData {
        let c = color.to_unit();
        match *self {
            Solid::Box { size } => mesh::cube(size.x, size.y, size.z, c),
            Solid::Cylinder { radius_top, radius_bottom, height } => {
                mesh::frustum(radius_top, radius_bottom, height, SEGMENTS, c)
            }
            Solid::Cone { radius, height } => mesh::cone(radius, height, SEGMENTS, c),
            Solid::Sphere { radius } => mesh::sphere(radius, 8, SEGMENTS, c),
        }
    }
}

/// Parts in the foliage group follow the plant sway; body parts do not
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartGroup {
    Body,
    Foliage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Part3D {
    pub name: &'static str,
    pub solid: Solid,
    /// Solid center in the model frame
    pub center: Vec3,
    pub color: Rgb,
    pub group: PartGroup,
}

impl Part3D {
    fn body(name: &'static str, solid: Solid, center: Vec3, color: Rgb) -> Self {
        Self { name, solid, center, color, group: PartGroup::Body }
    }
}

/// Point light carried by a model (lamp bulb)
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    /// Position in the model frame
    pub offset: Vec3,
    pub color: Rgb,
    pub intensity: f32,
    /// Distance at which the light has faded out
    pub range: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FurnitureModel {
    pub variant: ShapeVariant,
    pub parts: Vec<Part3D>,
    pub light: Option<PointLight>,
}

impl FurnitureModel {
    fn new(variant: ShapeVariant) -> Self {
        Self { variant, parts: Vec::new(), light: None }
    }

    pub fn count(&self, name: &str) -> usize {
        self.parts.iter().filter(|p| p.name == name).count()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.parts.iter().map(|p| p.name).collect()
    }
}

/// Per-frame inputs to model building and animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// Seconds since the scene clock started
    pub elapsed: f32,
    pub selected: bool,
    /// Effective brightness factor
    pub light_factor: f32,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self { elapsed: 0.0, selected: false, light_factor: 1.0 }
    }
}

/// Animated offsets, each a pure function of elapsed time
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose {
    /// Vertical offset of the whole model
    pub lift: f32,
    /// Rotation of the whole model about +Y
    pub yaw: f32,
    /// Rotation of foliage parts about +Y
    pub sway: f32,
}

pub fn pose(variant: ShapeVariant, elapsed: f32, selected: bool) -> Pose {
    match variant {
        ShapeVariant::Desk if selected => Pose { yaw: elapsed * DESK_SPIN_RATE, ..Pose::default() },
        ShapeVariant::Chair if selected => Pose {
            lift: (elapsed * CHAIR_BOB_RATE).sin() * CHAIR_BOB_AMPLITUDE,
            ..Pose::default()
        },
        ShapeVariant::Plant => Pose {
            sway: (elapsed * PLANT_SWAY_RATE).sin() * PLANT_SWAY_AMPLITUDE,
            ..Pose::default()
        },
        _ => Pose::default(),
    }
}

// ── Per-variant builders ─────────────────────────────────────

pub fn build_desk(color: Rgb, _params: &FrameParams) -> FurnitureModel {
    let mut m = FurnitureModel::new(ShapeVariant::Desk);
    m.parts.push(Part3D::body("top", Solid::Box { size: Vec3::new(2.0, 0.1, 1.0) }, Vec3::new(0.0, 0.9, 0.0), color));
    for (x, z) in [(-0.8, -0.4), (0.8, -0.4), (-0.8, 0.4), (0.8, 0.4)] {
        m.parts.push(Part3D::body(
            "leg",
            Solid::Box { size: Vec3::new(0.1, 0.8, 0.1) },
            Vec3::new(x, 0.4, z),
            color,
        ));
    }
    m.parts.push(Part3D::body(
        "drawer",
        Solid::Box { size: Vec3::new(0.6, 0.15, 0.4) },
        Vec3::new(0.5, 0.8, 0.0),
        adjust_brightness(color, 0.8),
    ));
    m
}

pub fn build_chair(color: Rgb, _params: &FrameParams) -> FurnitureModel {
    let mut m = FurnitureModel::new(ShapeVariant::Chair);
    m.parts.push(Part3D::body("seat", Solid::Box { size: Vec3::new(0.6, 0.1, 0.6) }, Vec3::new(0.0, 0.5, 0.0), color));
    m.parts.push(Part3D::body(
        "backrest",
        Solid::Box { size: Vec3::new(0.6, 0.8, 0.1) },
        Vec3::new(0.0, 0.8, -0.25),
        color,
    ));
    let leg_color = adjust_brightness(color, 0.7);
    for (x, z) in [(-0.25, -0.25), (0.25, -0.25), (-0.25, 0.25), (0.25, 0.25)] {
        m.parts.push(Part3D::body(
            "leg",
            Solid::Box { size: Vec3::new(0.05, 0.5, 0.05) },
            Vec3::new(x, 0.25, z),
            leg_color,
        ));
    }
    m
}

pub fn build_bookshelf(color: Rgb, _params: &FrameParams) -> FurnitureModel {
    let mut m = FurnitureModel::new(ShapeVariant::Bookshelf);
    m.parts.push(Part3D::body("frame", Solid::Box { size: Vec3::new(1.5, 2.0, 0.4) }, Vec3::new(0.0, 1.0, 0.0), color));

    // Shelves and books sit slightly proud of the solid frame so they stay visible
    let shelf_color = adjust_brightness(color, 0.9);
    for y in [0.3, 0.8, 1.3, 1.8] {
        m.parts.push(Part3D::body(
            "shelf",
            Solid::Box { size: Vec3::new(1.4, 0.05, 0.35) },
            Vec3::new(0.0, y, 0.05),
            shelf_color,
        ));
    }
    for i in 0..20 {
        let col = (i % 5) as f32;
        let row = (i / 5) as f32;
        m.parts.push(Part3D::body(
            "book",
            Solid::Box { size: Vec3::new(0.08, 0.25, 0.15) },
            Vec3::new(-0.6 + col * 0.3, 0.45 + row * 0.5, 0.2),
            BOOK_PALETTE[i % 5],
        ));
    }
    m
}

/// Leaves around the plant stem
pub const LEAF_COUNT: usize = 8;
const LEAF_RING_RADIUS: f32 = 0.4;
const LEAF_RING_HEIGHT: f32 = 0.6;
const LEAF_RING_RISE: f32 = 0.2;

pub fn build_plant(color: Rgb, _params: &FrameParams) -> FurnitureModel {
    let mut m = FurnitureModel::new(ShapeVariant::Plant);
    m.parts.push(Part3D::body(
        "pot",
        Solid::Cylinder { radius_top: 0.3, radius_bottom: 0.25, height: 0.4 },
        Vec3::new(0.0, 0.2, 0.0),
        POT_BROWN,
    ));
    for i in 0..LEAF_COUNT {
        let angle = i as f32 / LEAF_COUNT as f32 * std::f32::consts::TAU;
        m.parts.push(Part3D {
            name: "leaf",
            solid: Solid::Sphere { radius: 0.15 },
            center: Vec3::new(
                angle.cos() * LEAF_RING_RADIUS,
                LEAF_RING_HEIGHT + angle.sin() * LEAF_RING_RISE,
                angle.sin() * LEAF_RING_RADIUS,
            ),
            color,
            group: PartGroup::Foliage,
        });
    }
    m
}

/// Lamp bulb color and reach
pub const LAMP_LIGHT_COLOR: Rgb = Rgb::new(0xff, 0xaa, 0x66);
pub const LAMP_LIGHT_RANGE: f32 = 5.0;

pub fn build_lamp(color: Rgb, params: &FrameParams) -> FurnitureModel {
    let mut m = FurnitureModel::new(ShapeVariant::Lamp);
    m.parts.push(Part3D::body(
        "base",
        Solid::Cylinder { radius_top: 0.15, radius_bottom: 0.2, height: 0.1 },
        Vec3::new(0.0, 0.05, 0.0),
        LAMP_BASE_BROWN,
    ));
    m.parts.push(Part3D::body(
        "pole",
        Solid::Cylinder { radius_top: 0.02, radius_bottom: 0.02, height: 0.8 },
        Vec3::new(0.0, 0.5, 0.0),
        LAMP_BASE_BROWN,
    ));
    m.parts.push(Part3D::body("shade", Solid::Cone { radius: 0.3, height: 0.4 }, Vec3::new(0.0, 1.0, 0.0), color));
    m.light = Some(PointLight {
        offset: Vec3::new(0.0, 0.8, 0.0),
        color: LAMP_LIGHT_COLOR,
        intensity: lamp_intensity(params.light_factor, params.elapsed),
        range: LAMP_LIGHT_RANGE,
    });
    m
}

pub fn build_default(color: Rgb, _params: &FrameParams) -> FurnitureModel {
    let mut m = FurnitureModel::new(ShapeVariant::Default);
    // Lifted by half its height so it rests on the floor
    m.parts.push(Part3D::body("body", Solid::Box { size: Vec3::ONE }, Vec3::new(0.0, 0.5, 0.0), color));
    m
}

// ── Placement ────────────────────────────────────────────────

/// Build the model for `item`, or `None` when it has no positive footprint.
pub fn build_model(item: &FurnitureItem, params: &FrameParams) -> Option<FurnitureModel> {
    if !item.has_area() {
        return None;
    }
    let routines = shapes::routines(item.variant());
    Some((routines.build)(item.resolved_color(), params))
}

/// Model frame -> world transform for the whole item
pub fn model_transform(item: &FurnitureItem, pose: &Pose) -> Mat4 {
    let anchor = item_anchor(item) + Vec3::Y * pose.lift;
    Mat4::from_translation(anchor) * Mat4::from_rotation_y(pose.yaw) * Mat4::from_scale(Vec3::splat(WORLD_UNIT))
}

/// Part frame -> world transform
pub fn part_transform(model: Mat4, part: &Part3D, pose: &Pose) -> Mat4 {
    let sway = match part.group {
        PartGroup::Foliage => Mat4::from_rotation_y(pose.sway),
        PartGroup::Body => Mat4::IDENTITY,
    };
    model * sway * Mat4::from_translation(part.center)
}

/// A model placed in the world for one frame
pub struct PlacedModel {
    pub model: FurnitureModel,
    pub pose: Pose,
    pub transform: Mat4,
}

impl PlacedModel {
    pub fn place(item: &FurnitureItem, params: &FrameParams) -> Option<Self> {
        let model = build_model(item, params)?;
        let pose = pose(model.variant, params.elapsed, params.selected);
        let transform = model_transform(item, &pose);
        Some(Self { model, pose, transform })
    }

    pub fn part_transforms(&self) -> impl Iterator<Item = (&Part3D, Mat4)> + '_ {
        self.model
            .parts
            .iter()
            .map(|p| (p, part_transform(self.transform, p, &self.pose)))
    }

    /// World position of the carried light, if any
    pub fn light_position(&self) -> Option<Vec3> {
        self.model
            .light
            .as_ref()
            .map(|l| self.transform.transform_point3(l.offset))
    }
}
