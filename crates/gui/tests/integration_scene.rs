//! Integration tests for the two presentations: the top-down drawing and the 3D frame,
//! both built from the same room.

use glam::Vec3;
use shared::{Rgb, ShapeVariant, ThemeName, ThemeRegistry};
use studyroom_gui_lib::draw2d::{draw_item, Shape2D};
use studyroom_gui_lib::fixtures::{self, boxed};
use studyroom_gui_lib::harness::RoomHarness;
use studyroom_gui_lib::lighting::{brightness_factor, ThemePalette};
use studyroom_gui_lib::mapping::{item_anchor, to_layout, to_world};
use studyroom_gui_lib::scene3d::{LABEL_HEIGHT, ROOM_HALF};
use studyroom_gui_lib::validation::MeshValidator;
use studyroom_gui_lib::viewport::picking::Ray;

// ── Top-down drawing ─────────────────────────────────────────

#[test]
fn test_desk_draws_named_parts() {
    let d = draw_item(&fixtures::desk_at(100.0, 100.0), false);
    assert_eq!(d.count("surface"), 1);
    assert_eq!(d.count("leg"), 2);
    assert_eq!(d.count("drawer_outline"), 1);
    assert_eq!(d.count("label"), 1);
    assert_eq!(d.count("selection_outline"), 0);
}

#[test]
fn test_unknown_prefix_draws_plain_rect() {
    let d = draw_item(&boxed("rug_6", 10.0, 10.0, 120.0, 80.0), false);
    assert_eq!(d.names(), vec!["body", "label"]);
}

#[test]
fn test_selected_item_gets_outline() {
    let mut h = RoomHarness::with_items(fixtures::sample_room());
    assert_eq!(h.draw_2d().count("selection_outline"), 0);

    h.pointer_down(110.0, 125.0);
    assert_eq!(h.selected(), Some(0));
    assert_eq!(h.draw_2d().count("selection_outline"), 1);
}

#[test]
fn test_dim_overlay_only_below_half_light() {
    let mut h = RoomHarness::with_items(fixtures::sample_room());

    h.set_lighting(20);
    let overlay = h.draw_2d().find("dim_overlay").cloned().expect("overlay at lighting 20");
    match overlay.shape {
        // 0.18 of full opacity
        Shape2D::FillRect { color, .. } => assert_eq!(color.a(), 46),
        other => panic!("Unexpected overlay shape: {other:?}"),
    }
    let names = h.draw_2d().names();
    assert_eq!(names.last(), Some(&"dim_overlay"));

    h.set_lighting(50);
    assert!(h.draw_2d().find("dim_overlay").is_none());
    h.set_lighting(80);
    assert!(h.draw_2d().find("dim_overlay").is_none());
}

#[test]
fn test_minimal_theme_at_half_light() {
    let themes = ThemeRegistry::builtin();
    let settings = fixtures::settings(ThemeName::Minimal, 50);
    let theme = themes.get(ThemeName::Minimal);

    assert!((brightness_factor(theme, &settings) - 0.6).abs() < 1e-6);
    let palette = ThemePalette::resolve(theme, &settings);
    // #f7f7f5 * 0.6
    assert_eq!(palette.background, Rgb::new(148, 148, 147));
}

#[test]
fn test_grid_and_decor_follow_settings() {
    let mut h = RoomHarness::new();
    assert_eq!(h.draw_2d().count("grid_line"), 0);
    assert_eq!(h.draw_2d().count("window_frame"), 0);

    h.set_show_grid(true);
    h.set_theme(ThemeName::Warm);
    let d = h.draw_2d();
    assert!(d.count("grid_line") > 0);
    assert_eq!(d.count("window_frame"), 1);
}

// ── Coordinate mapping ───────────────────────────────────────

#[test]
fn test_layout_center_is_world_origin() {
    let item = boxed("desk_1", 400.0, 300.0, 80.0, 40.0);
    assert_eq!(item_anchor(&item), Vec3::ZERO);
    assert_eq!(to_world(400.0, 300.0), Vec3::ZERO);
}

#[test]
fn test_mapping_round_trips_over_layout() {
    for x in (0..=800).step_by(37) {
        for y in (0..=600).step_by(29) {
            let (x, y) = (x as f32 + 0.25, y as f32 + 0.5);
            let back = to_layout(to_world(x, y));
            assert!((back.x - x).abs() < 1e-3 && (back.y - y).abs() < 1e-3, "({x}, {y}) -> {back:?}");
        }
    }
}

// ── 3D frame ─────────────────────────────────────────────────

#[test]
fn test_sample_room_builds_valid_meshes_in_every_theme() {
    let mut h = RoomHarness::with_items(fixtures::sample_room());
    for &theme in ThemeName::all() {
        h.set_theme(theme);
        for elapsed in [0.0, 0.4, 3.7] {
            let errors = h.validate_3d(elapsed);
            assert!(errors.is_empty(), "{theme:?} at {elapsed}s: {errors:?}");
        }
    }
}

#[test]
fn test_every_item_is_placed_once() {
    let h = RoomHarness::with_items(fixtures::sample_room());
    let frame = h.build_3d(0.0);

    assert_eq!(frame.items.len(), 6);
    let variants: Vec<ShapeVariant> = frame.items.iter().map(|i| i.variant).collect();
    assert_eq!(
        variants,
        vec![
            ShapeVariant::Desk,
            ShapeVariant::Chair,
            ShapeVariant::Bookshelf,
            ShapeVariant::Plant,
            ShapeVariant::Lamp,
            ShapeVariant::Default,
        ]
    );
}

#[test]
fn test_desk_rests_on_floor_at_mapped_anchor() {
    let h = RoomHarness::with_items(vec![fixtures::desk_at(400.0, 300.0)]);
    let frame = h.build_3d(0.0);
    let desk = frame.item(0).unwrap();

    let v = MeshValidator::new(&desk.mesh);
    assert!(v.validate_all().is_empty());
    assert!(v.min_y().unwrap().abs() < 1e-5);
    assert!(v.dimensions_approx([2.0, 0.95, 1.0], 1e-4), "{:?}", v.dimensions());
    assert!((v.aabb().center() - Vec3::new(0.0, 0.475, 0.0)).length() < 1e-4);
}

#[test]
fn test_zero_area_items_are_skipped() {
    let h = RoomHarness::with_items(vec![boxed("desk_1", 10.0, 10.0, 0.0, 40.0), fixtures::lamp_at(400.0, 300.0)]);
    let frame = h.build_3d(0.0);
    assert_eq!(frame.items.len(), 1);
    assert_eq!(frame.items[0].index, 1);
}

#[test]
fn test_lamp_adds_point_light() {
    let h = RoomHarness::with_items(vec![fixtures::lamp_at(400.0, 300.0)]);
    let frame = h.build_3d(0.0);

    // Four ceiling lights plus the lamp bulb
    assert_eq!(frame.point_lights.len(), 5);
    let bulb = frame.point_lights.last().unwrap();
    assert!((bulb.position - Vec3::new(0.0, 0.8, 0.0)).length() < 1e-5);
}

#[test]
fn test_lighting_scales_scene_rig() {
    let mut h = RoomHarness::new();
    h.set_theme(ThemeName::Warm);
    h.set_lighting(100);
    let bright = h.build_3d(0.0).lighting;
    h.set_lighting(25);
    let dim = h.build_3d(0.0).lighting;

    assert!((dim.ambient * 4.0 - bright.ambient).abs() < 1e-5);
    assert!((dim.directional * 4.0 - bright.directional).abs() < 1e-5);
}

#[test]
fn test_label_floats_above_selected_item() {
    let mut h = RoomHarness::with_items(fixtures::sample_room());
    assert!(h.build_3d(0.0).label.is_none());

    h.select(Some(4));
    let label = h.build_3d(0.0).label.unwrap();
    assert_eq!(label.text, "Lamp");
    let expected = to_world(250.0, 110.0) + Vec3::Y * LABEL_HEIGHT;
    assert!((label.position - expected).length() < 1e-5);
}

#[test]
fn test_click_from_above_selects_desk() {
    let mut h = RoomHarness::with_items(fixtures::sample_room());
    // Desk top spans x -4..-2, z -2.3..-1.3
    let ray = Ray::new(Vec3::new(-3.47, 20.0, -1.93), Vec3::NEG_Y);

    assert_eq!(h.click_3d(&ray, 0.0), Some(0));
    assert_eq!(h.selected(), Some(0));
}

#[test]
fn test_missed_click_keeps_selection() {
    let mut h = RoomHarness::with_items(fixtures::sample_room());
    h.select(Some(2));

    let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
    assert_eq!(h.click_3d(&ray, 0.0), None);
    assert_eq!(h.selected(), Some(2));
}

#[test]
fn test_room_shell_fits_inside_room() {
    let h = RoomHarness::new();
    let frame = h.build_3d(0.0);
    let v = MeshValidator::new(&frame.room);

    assert!(v.validate_all().is_empty());
    let aabb = v.aabb();
    // Crown molding overhangs the wall plane slightly
    assert!(aabb.min.x >= -ROOM_HALF - 0.2 && aabb.max.x <= ROOM_HALF + 0.2);
    assert!(aabb.min.z >= -ROOM_HALF - 0.2 && aabb.max.z <= ROOM_HALF + 0.2);
    assert!(aabb.min.y.abs() < 1e-5);
}

#[test]
fn test_brightness_scaling() {
    use studyroom_gui_lib::lighting::{adjust_brightness, adjust_hex};

    let base = Rgb::new(200, 100, 50);
    assert_eq!(adjust_brightness(base, 0.0), Rgb::new(0, 0, 0));
    assert_eq!(adjust_brightness(base, 2.0), Rgb::new(255, 200, 100));

    let mut last = 0;
    for step in 0..=20 {
        let c = adjust_brightness(base, step as f32 * 0.1);
        assert!(c.r >= last);
        last = c.r;
    }
    assert!(adjust_hex("not-a-color", 0.5).is_err());
}
