//! Headless harness: the full room model, both presentations and the pointer state machine,
//! without a window.

use glam::{Vec2, Vec3};
use shared::{FurnitureItem, ThemeName};

use crate::catalog;
use crate::draw2d::{self, Drawing};
use crate::interaction::{PointerEvent, Report};
use crate::scene3d::{self, SceneFrame, DEFAULT_EYE};
use crate::state::{AppState, ItemEdit, RoomEvents};
use crate::validation::MeshValidator;
use crate::viewport::picking::Ray;

pub struct RoomHarness {
    pub state: AppState,
    /// Eye used for wall culling when building 3D frames
    pub eye: Vec3,
}

impl Default for RoomHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomHarness {
    /// Empty room with default settings; never touches saved preferences
    pub fn new() -> Self {
        Self {
            state: AppState::default(),
            eye: DEFAULT_EYE,
        }
    }

    pub fn with_items(items: Vec<FurnitureItem>) -> Self {
        let mut h = Self::new();
        for item in items {
            h.add(item);
        }
        h
    }

    // ── Items ────────────────────────────────────────────────

    pub fn items(&self) -> &[FurnitureItem] {
        &self.state.room.items
    }

    pub fn item(&self, index: usize) -> Option<&FurnitureItem> {
        self.state.room.items.get(index)
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.room.selected
    }

    pub fn add(&mut self, item: FurnitureItem) -> usize {
        self.state.room.add_item(item)
    }

    /// Spawn a catalog template; `None` for an unknown kind
    pub fn add_from_catalog(&mut self, kind: &str) -> Option<usize> {
        let entry = catalog::find(kind)?;
        let item = entry.spawn(&self.state.room.items);
        Some(self.add(item))
    }

    pub fn edit(&mut self, index: usize, edit: ItemEdit) -> bool {
        self.state.room.update_item(index, edit)
    }

    pub fn delete(&mut self, index: usize) -> Option<FurnitureItem> {
        let removed = self.state.room.delete_item(index);
        if removed.is_some() {
            self.state.interaction.reset();
        }
        removed
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.state.room.on_select(index);
    }

    // ── Pointer ──────────────────────────────────────────────

    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<Report> {
        self.state.pointer(PointerEvent::Down(Vec2::new(x, y)))
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> Option<Report> {
        self.state.pointer(PointerEvent::Move(Vec2::new(x, y)))
    }

    pub fn pointer_up(&mut self) -> Option<Report> {
        self.state.pointer(PointerEvent::Up)
    }

    pub fn pointer_leave(&mut self) -> Option<Report> {
        self.state.pointer(PointerEvent::Leave)
    }

    /// Press at `from`, move to `to`, release
    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.pointer_down(from.0, from.1);
        self.pointer_move(to.0, to.1);
        self.pointer_up();
    }

    // ── Settings ─────────────────────────────────────────────

    pub fn set_theme(&mut self, theme: ThemeName) {
        self.state.room.set_theme(theme);
    }

    pub fn set_lighting(&mut self, lighting: i32) {
        self.state.room.set_lighting(lighting);
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.state.room.set_show_grid(show);
    }

    // ── Presentations ────────────────────────────────────────

    pub fn draw_2d(&self) -> Drawing {
        let room = &self.state.room;
        draw2d::draw_room(&room.items, room.selected, &room.settings, &self.state.themes)
    }

    pub fn build_3d(&self, elapsed: f32) -> SceneFrame {
        let room = &self.state.room;
        scene3d::build_scene(&room.items, room.selected, &room.settings, &self.state.themes, elapsed, self.eye)
    }

    /// Click in the 3D view along `ray`; returns what was hit
    pub fn click_3d(&mut self, ray: &Ray, elapsed: f32) -> Option<usize> {
        let hit = self.build_3d(elapsed).pick(ray);
        self.state.pick_3d(hit);
        hit
    }

    /// Mesh integrity problems of the 3D frame at `elapsed`
    pub fn validate_3d(&self, elapsed: f32) -> Vec<String> {
        let mesh = self.build_3d(elapsed).merged_mesh();
        MeshValidator::new(&mesh).validate_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_drag_scenario() {
        let mut h = RoomHarness::with_items(vec![fixtures::boxed("desk_1", 10.0, 10.0, 80.0, 40.0)]);
        assert_eq!(h.pointer_down(15.0, 15.0), Some(Report::Select(Some(0))));
        h.pointer_move(40.0, 40.0);
        let item = h.item(0).unwrap();
        assert_eq!((item.x, item.y), (35.0, 35.0));
    }

    #[test]
    fn test_add_from_catalog() {
        let mut h = RoomHarness::new();
        let idx = h.add_from_catalog("lamp").unwrap();
        assert!(h.item(idx).unwrap().id.starts_with("lamp_"));
        assert!(h.add_from_catalog("spaceship").is_none());
    }

    #[test]
    fn test_sample_room_is_valid_in_3d() {
        let h = RoomHarness::with_items(fixtures::sample_room());
        assert!(h.validate_3d(1.7).is_empty());
    }
}
