//! Layout space (800x600, y-down, origin top-left) <-> world space (y-up, ground plane at y = 0).
//!
//! Both directions are kept as pure functions so they can never drift apart.

use glam::{Vec2, Vec3};
use shared::FurnitureItem;

/// Width of the layout canvas in layout units
pub const LAYOUT_WIDTH: f32 = 800.0;
/// Height of the layout canvas in layout units
pub const LAYOUT_HEIGHT: f32 = 600.0;
/// Layout units per world unit
pub const LAYOUT_UNITS_PER_WORLD: f32 = 100.0;

/// Layout position -> world position on the ground plane
pub fn to_world(x: f32, y: f32) -> Vec3 {
    Vec3::new(
        (x - LAYOUT_WIDTH * 0.5) / LAYOUT_UNITS_PER_WORLD,
        0.0,
        (y - LAYOUT_HEIGHT * 0.5) / LAYOUT_UNITS_PER_WORLD,
    )
}

/// World position -> layout position (height above the floor is dropped)
pub fn to_layout(world: Vec3) -> Vec2 {
    Vec2::new(
        LAYOUT_UNITS_PER_WORLD * world.x + LAYOUT_WIDTH * 0.5,
        LAYOUT_UNITS_PER_WORLD * world.z + LAYOUT_HEIGHT * 0.5,
    )
}

/// World anchor of an item (its layout origin mapped onto the floor)
pub fn item_anchor(item: &FurnitureItem) -> Vec3 {
    to_world(item.x, item.y)
}

/// The whole layout canvas as an egui rect in layout units
pub fn layout_rect() -> egui::Rect {
    egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(LAYOUT_WIDTH, LAYOUT_HEIGHT))
}
