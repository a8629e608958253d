//! Factory functions for test rooms and items.

use shared::{FurnitureItem, RoomSettings, ThemeName};

use crate::catalog;

/// Item of the given kind with catalog size and color at a fixed position
pub fn catalog_item(kind: &str, stamp: u64, x: f32, y: f32) -> FurnitureItem {
    match catalog::find(kind) {
        Some(entry) => FurnitureItem::new(format!("{kind}_{stamp}"), entry.name, x, y, entry.width, entry.height)
            .with_color(entry.color),
        None => FurnitureItem::new(format!("{kind}_{stamp}"), kind, x, y, 40.0, 40.0),
    }
}

pub fn desk_at(x: f32, y: f32) -> FurnitureItem {
    catalog_item("desk", 1, x, y)
}

pub fn chair_at(x: f32, y: f32) -> FurnitureItem {
    catalog_item("chair", 2, x, y)
}

pub fn bookshelf_at(x: f32, y: f32) -> FurnitureItem {
    catalog_item("bookshelf", 3, x, y)
}

pub fn plant_at(x: f32, y: f32) -> FurnitureItem {
    catalog_item("plant", 4, x, y)
}

pub fn lamp_at(x: f32, y: f32) -> FurnitureItem {
    catalog_item("lamp", 5, x, y)
}

/// Plain box with an arbitrary footprint and no color
pub fn boxed(id: &str, x: f32, y: f32, width: f32, height: f32) -> FurnitureItem {
    FurnitureItem::new(id, id, x, y, width, height)
}

/// One of every shape variant plus a rug, spread over the layout
pub fn sample_room() -> Vec<FurnitureItem> {
    vec![
        desk_at(100.0, 120.0),
        chair_at(130.0, 180.0),
        bookshelf_at(650.0, 80.0),
        plant_at(560.0, 420.0),
        lamp_at(250.0, 110.0),
        catalog_item("rug", 6, 340.0, 380.0),
    ]
}

pub fn settings(theme: ThemeName, lighting: u8) -> RoomSettings {
    RoomSettings {
        theme,
        lighting,
        ..RoomSettings::default()
    }
}
