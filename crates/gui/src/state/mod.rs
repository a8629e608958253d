pub mod room;
pub mod selection;
pub mod settings;

use shared::ThemeRegistry;

use crate::interaction::{CanvasInteraction, PointerEvent, Report};
pub use room::{ItemEdit, RoomState};
pub use selection::RoomEvents;
pub use settings::{Language, Preferences, PreferencesError, UiSettings, ViewMode};

/// Combined application state
pub struct AppState {
    pub room: RoomState,
    /// Drag session of the top-down surface
    pub interaction: CanvasInteraction,
    pub themes: ThemeRegistry,
    pub preferences: Preferences,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Preferences::default())
    }
}

impl AppState {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            room: RoomState::new(preferences.room.clone()),
            interaction: CanvasInteraction::new(),
            themes: ThemeRegistry::builtin(),
            preferences,
        }
    }

    /// Feed one pointer event from the top-down surface and apply the resulting report
    pub fn pointer(&mut self, event: PointerEvent) -> Option<Report> {
        let report = self.interaction.handle(event, &self.room.items)?;
        selection::dispatch(report, &mut self.room);
        Some(report)
    }

    /// Selection coming from the 3D view; a miss reports nothing and changes nothing
    pub fn pick_3d(&mut self, hit: Option<usize>) {
        if let Some(index) = hit {
            self.room.on_select(Some(index));
        }
    }

    pub fn delete_selected(&mut self) {
        if self.room.delete_selected().is_some() {
            self.interaction.reset();
        }
    }

    /// Copy the live room settings into the preferences; true when they changed
    pub fn sync_preferences(&mut self) -> bool {
        if self.preferences.room == self.room.settings {
            return false;
        }
        self.preferences.room = self.room.settings.clone();
        true
    }
}
