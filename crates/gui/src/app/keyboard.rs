//! Keyboard shortcut handling

use eframe::egui;

use crate::state::{AppState, RoomEvents, ViewMode};
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState, viewport: &mut ViewportPanel) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        // Escape: deselect
        if i.key_pressed(egui::Key::Escape) {
            state.room.on_select(None);
        }
        // Delete / Backspace: remove the selected item
        if i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace) {
            state.delete_selected();
        }
        // 1/2/3: view mode
        for (key, mode) in [
            (egui::Key::Num1, ViewMode::TwoD),
            (egui::Key::Num2, ViewMode::ThreeD),
            (egui::Key::Num3, ViewMode::Split),
        ] {
            if i.key_pressed(key) && !i.modifiers.command {
                state.preferences.view_mode = mode;
            }
        }
        // Home: reset the 3D camera
        if i.key_pressed(egui::Key::Home) {
            viewport.reset_camera();
        }
    });
}
