//! Variant dispatch: one table row per shape variant, shared by both presentations.

use shared::{FurnitureItem, Rgb, ShapeVariant};

use crate::draw2d::{self, Drawing};
use crate::geometry::{self, FrameParams, FurnitureModel};

/// Pot and shelf-strip brown
pub const POT_BROWN: Rgb = Rgb::new(0x8b, 0x45, 0x13);
/// Lamp base, pole and drawer-outline brown
pub const LAMP_BASE_BROWN: Rgb = Rgb::new(0x65, 0x43, 0x21);
/// Book colors; the 3D shelf uses the first five
pub const BOOK_PALETTE: [Rgb; 6] = [
    Rgb::new(0xff, 0x6b, 0x6b),
    Rgb::new(0x4e, 0xcd, 0xc4),
    Rgb::new(0x45, 0xb7, 0xd1),
    Rgb::new(0x96, 0xce, 0xb4),
    Rgb::new(0xff, 0xea, 0xa7),
    Rgb::new(0xdd, 0xa0, 0xdd),
];

pub type DrawFn = fn(&mut Drawing, &FurnitureItem, Rgb);
pub type BuildFn = fn(Rgb, &FrameParams) -> FurnitureModel;

pub struct ShapeRoutines {
    pub variant: ShapeVariant,
    pub draw: DrawFn,
    pub build: BuildFn,
}

/// Indexed by [`ShapeVariant::index`]
static ROUTINES: [ShapeRoutines; 6] = [
    ShapeRoutines { variant: ShapeVariant::Desk, draw: draw2d::draw_desk, build: geometry::build_desk },
    ShapeRoutines { variant: ShapeVariant::Chair, draw: draw2d::draw_chair, build: geometry::build_chair },
    ShapeRoutines {
        variant: ShapeVariant::Bookshelf,
        draw: draw2d::draw_bookshelf,
        build: geometry::build_bookshelf,
    },
    ShapeRoutines { variant: ShapeVariant::Plant, draw: draw2d::draw_plant, build: geometry::build_plant },
    ShapeRoutines { variant: ShapeVariant::Lamp, draw: draw2d::draw_lamp, build: geometry::build_lamp },
    ShapeRoutines { variant: ShapeVariant::Default, draw: draw2d::draw_default, build: geometry::build_default },
];

pub fn routines(variant: ShapeVariant) -> &'static ShapeRoutines {
    &ROUTINES[variant.index()]
}
