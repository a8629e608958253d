//! Owner of the item list, the selection index and the room settings.

use glam::Vec2;
use shared::{AmbientSound, FurnitureItem, RoomSettings, ThemeName};

use super::selection::{self, RoomEvents};

/// Width and height bounds applied through the item editor
pub const MIN_ITEM_SIZE: f32 = 10.0;
pub const MAX_ITEM_SIZE: f32 = 200.0;

/// Field-level edit of one item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemEdit {
    Position { x: f32, y: f32 },
    Size { width: f32, height: f32 },
    Color(String),
    Name(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomState {
    pub items: Vec<FurnitureItem>,
    pub selected: Option<usize>,
    pub settings: RoomSettings,
}

impl RoomState {
    pub fn new(settings: RoomSettings) -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            settings,
        }
    }

    pub fn selected_item(&self) -> Option<&FurnitureItem> {
        selection::resolve(&self.items, self.selected)
    }

    /// Append an item and return its index
    pub fn add_item(&mut self, item: FurnitureItem) -> usize {
        tracing::info!(id = %item.id, "item added");
        self.items.push(item);
        self.items.len() - 1
    }

    /// Apply an edit; returns false for an index outside the list
    pub fn update_item(&mut self, index: usize, edit: ItemEdit) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        match edit {
            ItemEdit::Position { x, y } => {
                item.x = x;
                item.y = y;
            }
            ItemEdit::Size { width, height } => {
                item.width = width.clamp(MIN_ITEM_SIZE, MAX_ITEM_SIZE);
                item.height = height.clamp(MIN_ITEM_SIZE, MAX_ITEM_SIZE);
            }
            ItemEdit::Color(hex) => item.color = Some(hex),
            ItemEdit::Name(name) => item.name = name,
        }
        true
    }

    /// Remove an item; the selection is always cleared
    pub fn delete_item(&mut self, index: usize) -> Option<FurnitureItem> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.selected = None;
        tracing::info!(id = %removed.id, "item removed");
        Some(removed)
    }

    pub fn delete_selected(&mut self) -> Option<FurnitureItem> {
        self.selected.and_then(|i| self.delete_item(i))
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
    }

    // ── Settings ─────────────────────────────────────────────

    pub fn set_theme(&mut self, theme: ThemeName) {
        if self.settings.theme != theme {
            tracing::info!(theme = theme.key(), "theme changed");
            self.settings.theme = theme;
        }
    }

    pub fn set_lighting(&mut self, lighting: i32) {
        let lighting = lighting.clamp(0, 100) as u8;
        if self.settings.lighting != lighting {
            tracing::info!(lighting, "lighting changed");
            self.settings.lighting = lighting;
        }
    }

    pub fn set_music_volume(&mut self, volume: i32) {
        self.settings.music_volume = volume.clamp(0, 100) as u8;
    }

    pub fn set_ambient_sound(&mut self, sound: AmbientSound) {
        self.settings.ambient_sound = sound;
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.settings.show_grid = show;
    }
}

impl RoomEvents for RoomState {
    fn on_select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.items.len());
    }

    fn on_move(&mut self, index: usize, position: Vec2) {
        self.update_item(index, ItemEdit::Position { x: position.x, y: position.y });
    }
}
