//! Application menu bar

use eframe::egui;
use studyroom_gui_lib::fixtures;

use crate::i18n::{lang, set_lang, t};
use crate::state::{AppState, Language, RoomEvents, ViewMode};
use crate::viewport::ViewportPanel;

/// Show the room menu
pub fn room_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.room"), |ui| {
        if ui.button(t("menu.new_room")).clicked() {
            state.room.clear();
            state.interaction.reset();
            ui.close_menu();
        }
        if ui.button(t("menu.demo_room")).clicked() {
            load_demo_room(state);
            ui.close_menu();
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Replace the room contents with the sample layout
pub fn load_demo_room(state: &mut AppState) {
    state.room.clear();
    state.interaction.reset();
    for item in fixtures::sample_room() {
        state.room.add_item(item);
    }
    tracing::info!(items = state.room.items.len(), "demo room loaded");
}

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.edit"), |ui| {
        let has_selection = state.room.selected_item().is_some();
        if ui.add_enabled(has_selection, egui::Button::new(t("menu.delete"))).clicked() {
            state.delete_selected();
            ui.close_menu();
        }
        if ui.add_enabled(has_selection, egui::Button::new(t("menu.deselect"))).clicked() {
            state.room.on_select(None);
            ui.close_menu();
        }
    });
}

pub fn view_mode_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::TwoD => t("view.2d"),
        ViewMode::ThreeD => t("view.3d"),
        ViewMode::Split => t("view.split"),
    }
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.view"), |ui| {
        for &mode in ViewMode::all() {
            if ui.radio_value(&mut state.preferences.view_mode, mode, view_mode_label(mode)).clicked() {
                ui.close_menu();
            }
        }
        ui.separator();
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
        ui.separator();
        ui.horizontal(|ui| {
            ui.label(t("menu.font_size"));
            ui.add(
                egui::DragValue::new(&mut state.preferences.ui.font_size)
                    .speed(0.5)
                    .range(8.0..=24.0)
                    .suffix(" pt"),
            );
        });
        ui.menu_button(t("menu.language"), |ui| {
            for (language, name) in [(Language::En, "English"), (Language::Ru, "Русский")] {
                if ui.selectable_label(lang() == language, name).clicked() {
                    set_lang(language);
                    state.preferences.language = language;
                    ui.close_menu();
                }
            }
        });
    });
}
