//! Static furniture library and item instantiation.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use shared::{FurnitureItem, ID_SEPARATOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Furniture,
    Decor,
    Lighting,
    Accessories,
    Structure,
}

impl Category {
    pub fn key(self) -> &'static str {
        match self {
            Category::Furniture => "furniture",
            Category::Decor => "decor",
            Category::Lighting => "lighting",
            Category::Accessories => "accessories",
            Category::Structure => "structure",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    /// Id prefix; also selects the shape variant
    pub kind: &'static str,
    pub name: &'static str,
    pub width: f32,
    pub height: f32,
    pub color: &'static str,
    pub category: Category,
}

pub static CATALOG: [CatalogEntry; 8] = [
    CatalogEntry { kind: "desk", name: "Desk", width: 80.0, height: 40.0, color: "#8B4513", category: Category::Furniture },
    CatalogEntry { kind: "chair", name: "Chair", width: 40.0, height: 50.0, color: "#654321", category: Category::Furniture },
    CatalogEntry {
        kind: "bookshelf",
        name: "Bookshelf",
        width: 50.0,
        height: 120.0,
        color: "#A0522D",
        category: Category::Furniture,
    },
    CatalogEntry { kind: "plant", name: "Plant", width: 25.0, height: 35.0, color: "#228B22", category: Category::Decor },
    CatalogEntry { kind: "lamp", name: "Lamp", width: 20.0, height: 45.0, color: "#FFD700", category: Category::Lighting },
    CatalogEntry {
        kind: "coffee",
        name: "Coffee Cup",
        width: 15.0,
        height: 15.0,
        color: "#8B4513",
        category: Category::Accessories,
    },
    CatalogEntry { kind: "window", name: "Window", width: 60.0, height: 80.0, color: "#87CEEB", category: Category::Structure },
    CatalogEntry { kind: "rug", name: "Rug", width: 120.0, height: 80.0, color: "#DC143C", category: Category::Decor },
];

/// Spawn area in layout units: x in [50, 350), y in [100, 300)
pub const SPAWN_X: std::ops::Range<f32> = 50.0..350.0;
pub const SPAWN_Y: std::ops::Range<f32> = 100.0..300.0;

pub fn entries() -> &'static [CatalogEntry] {
    &CATALOG
}

pub fn find(kind: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.kind == kind)
}

/// Categories in first-appearance order
pub fn categories() -> Vec<Category> {
    let mut out = Vec::new();
    for entry in &CATALOG {
        if !out.contains(&entry.category) {
            out.push(entry.category);
        }
    }
    out
}

pub fn in_category(category: Category) -> impl Iterator<Item = &'static CatalogEntry> {
    CATALOG.iter().filter(move |e| e.category == category)
}

impl CatalogEntry {
    /// Item with id `<kind>_<stamp>` at a random spawn position
    pub fn instantiate(&self, rng: &mut impl Rng, stamp: u128) -> FurnitureItem {
        let x = rng.random_range(SPAWN_X);
        let y = rng.random_range(SPAWN_Y);
        FurnitureItem::new(
            format!("{}{}{}", self.kind, ID_SEPARATOR, stamp),
            self.name,
            x,
            y,
            self.width,
            self.height,
        )
        .with_color(self.color)
    }

    /// Instantiate with the current time as stamp, bumped past any id already in `existing`
    pub fn spawn(&self, existing: &[FurnitureItem]) -> FurnitureItem {
        let mut stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        while existing.iter().any(|i| i.id == format!("{}{}{}", self.kind, ID_SEPARATOR, stamp)) {
            stamp += 1;
        }
        self.instantiate(&mut rand::rng(), stamp)
    }
}
