//! Procedural top-down drawing of the room and its furniture.
//!
//! Every routine emits named primitive parts in layout units. A [`Drawing`] is plain data:
//! it can be inspected in tests and painted onto any egui painter through a layout-to-screen
//! transform.

use std::hash::{DefaultHasher, Hash, Hasher};

use egui::{emath::RectTransform, Align2, Color32, FontId, Pos2, Rect, Stroke};
use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::{FurnitureItem, Rgb, RoomSettings, ThemeName, ThemeRegistry};

use crate::lighting::{adjust_brightness, dark_overlay_alpha, ThemePalette};
use crate::mapping::{LAYOUT_HEIGHT, LAYOUT_WIDTH};
use crate::shapes::{self, BOOK_PALETTE, LAMP_BASE_BROWN, POT_BROWN};

/// Fraction of the canvas height taken by the floor band
pub const FLOOR_BAND: f32 = 0.3;
/// Grid spacing in layout units
pub const GRID_STEP: f32 = 50.0;
/// Selection outline: color, width and outset from the item box
pub const SELECTION_COLOR: Rgb = Rgb::new(0xff, 0xaa, 0x00);
pub const SELECTION_WIDTH: f32 = 3.0;
pub const SELECTION_OUTSET: f32 = 5.0;
/// Label font size and baseline offset below the footprint
pub const LABEL_SIZE: f32 = 12.0;
pub const LABEL_OFFSET: f32 = 15.0;

const SKY: Rgb = Rgb::new(0x87, 0xce, 0xeb);

pub fn color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

/// One primitive in layout units
#[derive(Debug, Clone, PartialEq)]
pub enum Shape2D {
    FillRect { rect: Rect, color: Color32 },
    StrokeRect { rect: Rect, color: Color32, width: f32 },
    FillCircle { center: Pos2, radius: f32, color: Color32 },
    /// Convex polygon, points in winding order
    FillPolygon { points: Vec<Pos2>, color: Color32 },
    Line { from: Pos2, to: Pos2, color: Color32, width: f32 },
    /// Text centered horizontally on `pos`, baseline at `pos.y`
    Text { pos: Pos2, text: String, size: f32, color: Color32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Part2D {
    pub name: &'static str,
    pub shape: Shape2D,
}

/// Ordered list of named parts; later parts paint over earlier ones
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    pub parts: Vec<Part2D>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, shape: Shape2D) {
        self.parts.push(Part2D { name, shape });
    }

    pub fn fill_rect(&mut self, name: &'static str, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.push(
            name,
            Shape2D::FillRect {
                rect: Rect::from_min_size(Pos2::new(x, y), egui::vec2(w, h)),
                color: color32(color),
            },
        );
    }

    pub fn stroke_rect(&mut self, name: &'static str, x: f32, y: f32, w: f32, h: f32, color: Rgb, width: f32) {
        self.push(
            name,
            Shape2D::StrokeRect {
                rect: Rect::from_min_size(Pos2::new(x, y), egui::vec2(w, h)),
                color: color32(color),
                width,
            },
        );
    }

    pub fn fill_circle(&mut self, name: &'static str, cx: f32, cy: f32, radius: f32, color: Rgb) {
        self.push(
            name,
            Shape2D::FillCircle {
                center: Pos2::new(cx, cy),
                radius,
                color: color32(color),
            },
        );
    }

    pub fn extend(&mut self, other: Drawing) {
        self.parts.extend(other.parts);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.parts.iter().map(|p| p.name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.parts.iter().filter(|p| p.name == name).count()
    }

    pub fn find(&self, name: &str) -> Option<&Part2D> {
        self.parts.iter().find(|p| p.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Paint every part, mapping layout units to screen points with `to_screen`.
    pub fn paint(&self, painter: &egui::Painter, to_screen: RectTransform) {
        let scale = to_screen.scale().x;
        for part in &self.parts {
            match &part.shape {
                Shape2D::FillRect { rect, color } => {
                    painter.rect_filled(to_screen.transform_rect(*rect), 0.0, *color);
                }
                Shape2D::StrokeRect { rect, color, width } => {
                    painter.rect_stroke(
                        to_screen.transform_rect(*rect),
                        0.0,
                        Stroke::new(width * scale, *color),
                        egui::StrokeKind::Middle,
                    );
                }
                Shape2D::FillCircle { center, radius, color } => {
                    painter.circle_filled(to_screen.transform_pos(*center), radius * scale, *color);
                }
                Shape2D::FillPolygon { points, color } => {
                    let pts = points.iter().map(|p| to_screen.transform_pos(*p)).collect();
                    painter.add(egui::Shape::convex_polygon(pts, *color, Stroke::NONE));
                }
                Shape2D::Line { from, to, color, width } => {
                    painter.line_segment(
                        [to_screen.transform_pos(*from), to_screen.transform_pos(*to)],
                        Stroke::new(width * scale, *color),
                    );
                }
                Shape2D::Text { pos, text, size, color } => {
                    painter.text(
                        to_screen.transform_pos(*pos),
                        Align2::CENTER_BOTTOM,
                        text,
                        FontId::proportional(size * scale),
                        *color,
                    );
                }
            }
        }
    }
}

// ── Per-variant routines ─────────────────────────────────────

pub fn draw_desk(d: &mut Drawing, item: &FurnitureItem, color: Rgb) {
    let FurnitureItem { x, y, width: w, height: h, .. } = *item;
    d.fill_rect("surface", x, y, w, h * 0.2, color);

    let leg_w = w * 0.1;
    let leg_h = h * 0.8;
    d.fill_rect("leg", x + 5.0, y + h * 0.2, leg_w, leg_h, color);
    d.fill_rect("leg", x + w - leg_w - 5.0, y + h * 0.2, leg_w, leg_h, color);

    d.stroke_rect("drawer_outline", x + w * 0.6, y + h * 0.05, w * 0.35, h * 0.1, LAMP_BASE_BROWN, 1.0);
}

pub fn draw_chair(d: &mut Drawing, item: &FurnitureItem, color: Rgb) {
    let FurnitureItem { x, y, width: w, height: h, .. } = *item;
    d.fill_rect("seat", x, y + h * 0.4, w, h * 0.2, color);
    d.fill_rect("backrest", x + w * 0.1, y, w * 0.1, h * 0.6, color);

    // Full-height legs, then a shorter and slightly thicker back-support pair
    let leg = w * 0.08;
    d.fill_rect("leg", x + 2.0, y + h * 0.6, leg, h * 0.4, color);
    d.fill_rect("leg", x + w - leg - 2.0, y + h * 0.6, leg, h * 0.4, color);
    let support = leg * 1.2;
    d.fill_rect("leg", x + 2.0, y + h * 0.9, support, h * 0.1, color);
    d.fill_rect("leg", x + w - support - 2.0, y + h * 0.9, support, h * 0.1, color);

    let inset = 3.0;
    let cushion_h = h * 0.2 - 2.0 * inset;
    if w > 2.0 * inset && cushion_h > 0.0 {
        d.stroke_rect(
            "cushion",
            x + inset,
            y + h * 0.4 + inset,
            w - 2.0 * inset,
            cushion_h,
            adjust_brightness(color, 0.8),
            1.0,
        );
    }
}

/// Number of compartments in a bookshelf
pub const SHELF_COUNT: usize = 4;

pub fn draw_bookshelf(d: &mut Drawing, item: &FurnitureItem, color: Rgb) {
    let FurnitureItem { x, y, width: w, height: h, .. } = *item;
    d.fill_rect("frame", x, y, w, h, color);

    let compartment = h / SHELF_COUNT as f32;
    for i in 0..SHELF_COUNT {
        let bottom = y + compartment * (i + 1) as f32;
        d.fill_rect("shelf", x + 2.0, bottom - 4.0, w - 4.0, 4.0, POT_BROWN);
    }

    // Widths are random but stable per item
    let mut rng = StdRng::seed_from_u64(id_seed(&item.id));
    let book_h = compartment - 12.0;
    if book_h <= 0.0 {
        return;
    }
    // Packing runs in shelf-relative offsets so far-away items still make progress
    let row = w - 10.0;
    let max_books = (row / 5.0).ceil().max(0.0) as usize;
    for i in 0..SHELF_COUNT {
        let top = y + compartment * i as f32 + 8.0;
        let mut offset = 0.0_f32;
        for n in 0..max_books {
            let book_w: f32 = rng.random_range(4.0..12.0);
            if offset + book_w > row {
                break;
            }
            d.fill_rect("book", x + 5.0 + offset, top, book_w, book_h, BOOK_PALETTE[n % BOOK_PALETTE.len()]);
            offset += book_w + 1.0;
        }
    }
}

fn id_seed(id: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    hasher.finish()
}

pub fn draw_plant(d: &mut Drawing, item: &FurnitureItem, color: Rgb) {
    let FurnitureItem { x, y, width: w, height: h, .. } = *item;
    d.push(
        "pot",
        Shape2D::FillPolygon {
            points: vec![
                Pos2::new(x + w * 0.2, y + h * 0.7),
                Pos2::new(x + w * 0.8, y + h * 0.7),
                Pos2::new(x + w * 0.7, y + h),
                Pos2::new(x + w * 0.3, y + h),
            ],
            color: color32(POT_BROWN),
        },
    );
    d.fill_rect("stem", x + w * 0.45, y + h * 0.3, w * 0.1, h * 0.4, color);

    d.fill_circle("leaf", x + w * 0.3, y + h * 0.2, w * 0.15, color);
    d.fill_circle("leaf", x + w * 0.7, y + h * 0.25, w * 0.12, color);
    d.fill_circle("leaf", x + w * 0.5, y + h * 0.1, w * 0.18, color);
}

pub fn draw_lamp(d: &mut Drawing, item: &FurnitureItem, color: Rgb) {
    let FurnitureItem { x, y, width: w, height: h, .. } = *item;
    d.fill_rect("base", x + w * 0.3, y + h * 0.8, w * 0.4, h * 0.2, LAMP_BASE_BROWN);
    d.fill_rect("pole", x + w * 0.45, y + h * 0.2, w * 0.1, h * 0.6, LAMP_BASE_BROWN);
    d.fill_rect("shade", x + w * 0.1, y, w * 0.8, h * 0.3, color);
}

pub fn draw_default(d: &mut Drawing, item: &FurnitureItem, color: Rgb) {
    d.fill_rect("body", item.x, item.y, item.width, item.height, color);
}

// ── Item and room composition ────────────────────────────────

/// Draw one item: its variant shape, the selection outline when selected, then its label.
/// Items without a positive footprint produce nothing.
pub fn draw_item(item: &FurnitureItem, selected: bool) -> Drawing {
    let mut d = Drawing::new();
    if !item.has_area() {
        return d;
    }

    let routines = shapes::routines(item.variant());
    (routines.draw)(&mut d, item, item.resolved_color());

    if selected {
        d.stroke_rect(
            "selection_outline",
            item.x - SELECTION_OUTSET,
            item.y - SELECTION_OUTSET,
            item.width + 2.0 * SELECTION_OUTSET,
            item.height + 2.0 * SELECTION_OUTSET,
            SELECTION_COLOR,
            SELECTION_WIDTH,
        );
    }

    d.push(
        "label",
        Shape2D::Text {
            pos: Pos2::new(item.x + item.width / 2.0, item.y + item.height + LABEL_OFFSET),
            text: item.name.clone(),
            size: LABEL_SIZE,
            color: Color32::WHITE,
        },
    );
    d
}

/// Background, floor band, grid and themed decoration
pub fn draw_backdrop(palette: &ThemePalette, theme: ThemeName, show_grid: bool) -> Drawing {
    let mut d = Drawing::new();
    d.fill_rect("background", 0.0, 0.0, LAYOUT_WIDTH, LAYOUT_HEIGHT, palette.background);

    let floor_top = LAYOUT_HEIGHT * (1.0 - FLOOR_BAND);
    d.fill_rect("floor", 0.0, floor_top, LAYOUT_WIDTH, LAYOUT_HEIGHT * FLOOR_BAND, palette.floor);

    if show_grid {
        let grid = Color32::from_white_alpha(20);
        let mut gx = GRID_STEP;
        while gx < LAYOUT_WIDTH {
            d.push(
                "grid_line",
                Shape2D::Line { from: Pos2::new(gx, 0.0), to: Pos2::new(gx, LAYOUT_HEIGHT), color: grid, width: 1.0 },
            );
            gx += GRID_STEP;
        }
        let mut gy = GRID_STEP;
        while gy < LAYOUT_HEIGHT {
            d.push(
                "grid_line",
                Shape2D::Line { from: Pos2::new(0.0, gy), to: Pos2::new(LAYOUT_WIDTH, gy), color: grid, width: 1.0 },
            );
            gy += GRID_STEP;
        }
    }

    match theme {
        ThemeName::Warm | ThemeName::Nature => draw_window(&mut d, palette),
        ThemeName::Minimal => {
            d.fill_rect("accent_strip", 0.0, floor_top - 4.0, LAYOUT_WIDTH, 4.0, palette.accent);
        }
        ThemeName::Dark => {}
    }
    d
}

fn draw_window(d: &mut Drawing, palette: &ThemePalette) {
    let (x, y, w, h) = (600.0, 60.0, 150.0, 120.0);
    let border = 6.0;
    d.fill_rect("window_frame", x, y, w, h, palette.accent);

    let pane = adjust_brightness(SKY, palette.factor);
    let pane_w = (w - 3.0 * border) / 2.0;
    let pane_h = (h - 3.0 * border) / 2.0;
    for row in 0..2 {
        for col in 0..2 {
            d.fill_rect(
                "window_pane",
                x + border + col as f32 * (pane_w + border),
                y + border + row as f32 * (pane_h + border),
                pane_w,
                pane_h,
                pane,
            );
        }
    }
}

/// Full top-down frame: backdrop, items in list order, then the dimming overlay.
pub fn draw_room(
    items: &[FurnitureItem],
    selected: Option<usize>,
    settings: &RoomSettings,
    themes: &ThemeRegistry,
) -> Drawing {
    let palette = ThemePalette::resolve(themes.get(settings.theme), settings);
    let mut d = draw_backdrop(&palette, settings.theme, settings.show_grid);

    for (i, item) in items.iter().enumerate() {
        d.extend(draw_item(item, selected == Some(i)));
    }

    if let Some(alpha) = dark_overlay_alpha(settings.lighting) {
        d.push(
            "dim_overlay",
            Shape2D::FillRect {
                rect: crate::mapping::layout_rect(),
                color: Color32::from_black_alpha((alpha * 255.0).round() as u8),
            },
        );
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, w: f32, h: f32) -> FurnitureItem {
        FurnitureItem::new(id, "Thing", 100.0, 100.0, w, h).with_color("#8B4513")
    }

    fn rect_of(part: &Part2D) -> Rect {
        match &part.shape {
            Shape2D::FillRect { rect, .. } | Shape2D::StrokeRect { rect, .. } => *rect,
            other => panic!("not a rect: {other:?}"),
        }
    }

    #[test]
    fn test_desk_parts() {
        let d = draw_item(&item("desk_1", 120.0, 60.0), false);
        assert_eq!(d.count("surface"), 1);
        assert_eq!(d.count("leg"), 2);
        assert_eq!(d.count("drawer_outline"), 1);
        assert_eq!(d.count("selection_outline"), 0);
        assert_eq!(d.count("label"), 1);

        let surface = rect_of(d.find("surface").unwrap());
        assert_eq!(surface.height(), 12.0);
        let drawer = rect_of(d.find("drawer_outline").unwrap());
        assert!((drawer.min.x - 172.0).abs() < 1e-4);
        assert!((drawer.width() - 42.0).abs() < 1e-4);
    }

    #[test]
    fn test_chair_parts() {
        let d = draw_item(&item("chair_1", 40.0, 40.0), false);
        assert_eq!(d.count("seat"), 1);
        assert_eq!(d.count("backrest"), 1);
        assert_eq!(d.count("leg"), 4);
        assert_eq!(d.count("cushion"), 1);

        let legs: Vec<Rect> = d.parts.iter().filter(|p| p.name == "leg").map(rect_of).collect();
        assert!(legs[2].width() > legs[0].width());
    }

    #[test]
    fn test_bookshelf_parts() {
        let d = draw_item(&item("bookshelf_1", 60.0, 100.0), false);
        assert_eq!(d.count("frame"), 1);
        assert_eq!(d.count("shelf"), SHELF_COUNT);
        assert!(d.count("book") >= SHELF_COUNT * 3);

        for part in d.parts.iter().filter(|p| p.name == "book") {
            let r = rect_of(part);
            assert!((4.0..12.0).contains(&r.width()));
            assert!(r.max.x <= 100.0 + 60.0 - 5.0 + 1e-3);
        }
    }

    #[test]
    fn test_bookshelf_is_stable_per_id() {
        let a = draw_item(&item("bookshelf_42", 60.0, 100.0), false);
        let b = draw_item(&item("bookshelf_42", 60.0, 100.0), false);
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_bookshelf_has_no_books() {
        let d = draw_item(&item("bookshelf_1", 60.0, 40.0), false);
        assert_eq!(d.count("shelf"), SHELF_COUNT);
        assert_eq!(d.count("book"), 0);
    }

    #[test]
    fn test_plant_parts() {
        let d = draw_item(&item("plant_1", 25.0, 35.0), false);
        assert_eq!(d.count("pot"), 1);
        assert_eq!(d.count("stem"), 1);
        assert_eq!(d.count("leaf"), 3);
        match &d.find("pot").unwrap().shape {
            Shape2D::FillPolygon { points, .. } => assert_eq!(points.len(), 4),
            other => panic!("pot is {other:?}"),
        }
    }

    #[test]
    fn test_lamp_parts() {
        let d = draw_item(&item("lamp_1", 20.0, 40.0), false);
        assert_eq!(d.names(), vec!["base", "pole", "shade", "label"]);
        match &d.find("shade").unwrap().shape {
            Shape2D::FillRect { color, .. } => assert_eq!(*color, Color32::from_rgb(0x8b, 0x45, 0x13)),
            other => panic!("shade is {other:?}"),
        }
    }

    #[test]
    fn test_unknown_prefix_is_default() {
        for id in ["rug_1", "coffee_2", "window_3", "nonsense"] {
            let d = draw_item(&item(id, 30.0, 30.0), false);
            assert_eq!(d.names(), vec!["body", "label"], "{id}");
        }
    }

    #[test]
    fn test_missing_color_is_gray() {
        let d = draw_item(&FurnitureItem::new("rug_1", "Rug", 0.0, 0.0, 10.0, 10.0), false);
        match &d.find("body").unwrap().shape {
            Shape2D::FillRect { color, .. } => assert_eq!(*color, color32(Rgb::NEUTRAL_GRAY)),
            other => panic!("body is {other:?}"),
        }
    }

    #[test]
    fn test_selection_outline_and_label_placement() {
        let it = FurnitureItem::new("desk_1", "Desk", 10.0, 20.0, 100.0, 50.0);
        let d = draw_item(&it, true);
        let outline = rect_of(d.find("selection_outline").unwrap());
        assert_eq!(outline, Rect::from_min_size(Pos2::new(5.0, 15.0), egui::vec2(110.0, 60.0)));

        match &d.parts.last().unwrap().shape {
            Shape2D::Text { pos, text, .. } => {
                assert_eq!(*pos, Pos2::new(60.0, 85.0));
                assert_eq!(text, "Desk");
            }
            other => panic!("last part is {other:?}"),
        }
    }

    #[test]
    fn test_non_positive_size_draws_nothing() {
        assert!(draw_item(&item("desk_1", 0.0, 40.0), true).is_empty());
        assert!(draw_item(&item("chair_1", 40.0, -1.0), true).is_empty());
    }

    #[test]
    fn test_room_overlay_only_when_dim() {
        let themes = ThemeRegistry::builtin();
        let mut settings = RoomSettings { lighting: 20, ..RoomSettings::default() };
        let d = draw_room(&[], None, &settings, &themes);
        match &d.parts.last().unwrap().shape {
            Shape2D::FillRect { color, .. } => assert_eq!(color.a(), 46),
            other => panic!("overlay is {other:?}"),
        }

        settings.lighting = 50;
        assert_eq!(draw_room(&[], None, &settings, &themes).count("dim_overlay"), 0);
        settings.lighting = 80;
        assert_eq!(draw_room(&[], None, &settings, &themes).count("dim_overlay"), 0);
    }

    #[test]
    fn test_room_backdrop_and_decor() {
        let themes = ThemeRegistry::builtin();
        let mut settings = RoomSettings { theme: ThemeName::Minimal, ..RoomSettings::default() };
        let d = draw_room(&[], None, &settings, &themes);
        assert_eq!(d.names()[..2], ["background", "floor"]);
        assert_eq!(d.count("accent_strip"), 1);
        match &d.parts[0].shape {
            Shape2D::FillRect { color, .. } => assert_eq!(*color, Color32::from_rgb(148, 148, 147)),
            other => panic!("background is {other:?}"),
        }

        settings.theme = ThemeName::Warm;
        let d = draw_room(&[], None, &settings, &themes);
        assert_eq!(d.count("window_frame"), 1);
        assert_eq!(d.count("window_pane"), 4);

        settings.theme = ThemeName::Dark;
        settings.show_grid = true;
        let d = draw_room(&[], None, &settings, &themes);
        assert_eq!(d.count("window_frame") + d.count("accent_strip"), 0);
        // 15 vertical + 11 horizontal
        assert_eq!(d.count("grid_line"), 26);
    }

    #[test]
    fn test_room_draws_items_in_list_order() {
        let themes = ThemeRegistry::builtin();
        let items = vec![item("lamp_1", 20.0, 40.0), item("rug_2", 50.0, 50.0)];
        let d = draw_room(&items, Some(1), &RoomSettings::default(), &themes);
        let names = d.names();
        let shade = names.iter().position(|n| *n == "shade").unwrap();
        let body = names.iter().position(|n| *n == "body").unwrap();
        assert!(shade < body);
        assert_eq!(d.count("selection_outline"), 1);
        assert_eq!(d.count("label"), 2);
    }

    #[test]
    fn test_bookshelf_far_from_origin_terminates() {
        for x in [1.0e9, -1.0e9] {
            let shelf = FurnitureItem::new("bookshelf_1", "Bookshelf", x, 100.0, 50.0, 120.0);
            let d = draw_item(&shelf, false);
            assert_eq!(d.count("shelf"), SHELF_COUNT);
            // 40 units of row fit at most 8 books per shelf
            assert!(d.count("book") <= SHELF_COUNT * 8, "{} books at x = {x}", d.count("book"));
            assert!(d.count("book") > 0);
        }
    }

    #[test]
    fn test_wide_bookshelf_book_count_is_bounded() {
        let shelf = FurnitureItem::new("bookshelf_1", "Bookshelf", 0.0, 0.0, 1.0e6, 120.0);
        let d = draw_item(&shelf, false);
        let per_shelf = ((1.0e6_f32 - 10.0) / 5.0).ceil() as usize;
        assert!(d.count("book") <= SHELF_COUNT * per_shelf);
        // At most 13 units per book including the gap
        assert!(d.count("book") >= SHELF_COUNT * 50_000);
    }
}
