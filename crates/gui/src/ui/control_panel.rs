//! Room and item controls

use egui::Ui;
use shared::{AmbientSound, Rgb, ThemeName};

use crate::i18n::t;
use crate::state::room::{MAX_ITEM_SIZE, MIN_ITEM_SIZE};
use crate::state::{AppState, ItemEdit};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum ControlTab {
    #[default]
    Room,
    Item,
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    let id = ui.id().with("control_tab");
    let mut tab = ui.data_mut(|d| *d.get_temp_mut_or_default::<ControlTab>(id));

    ui.horizontal(|ui| {
        ui.selectable_value(&mut tab, ControlTab::Room, t("tab.room"));
        ui.selectable_value(&mut tab, ControlTab::Item, t("tab.item"));
    });
    ui.separator();

    match tab {
        ControlTab::Room => show_room_tab(ui, state),
        ControlTab::Item => show_item_tab(ui, state),
    }

    ui.data_mut(|d| d.insert_temp(id, tab));
}

fn theme_label(theme: ThemeName) -> &'static str {
    t(&format!("theme.{}", theme.key()))
}

fn sound_label(sound: AmbientSound) -> &'static str {
    match sound {
        AmbientSound::None => t("sound.none"),
        AmbientSound::Rain => t("sound.rain"),
        AmbientSound::Fire => t("sound.fire"),
        AmbientSound::Cafe => t("sound.cafe"),
        AmbientSound::Forest => t("sound.forest"),
    }
}

fn show_room_tab(ui: &mut Ui, state: &mut AppState) {
    let settings = state.room.settings.clone();

    egui::Grid::new("room_settings")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label(t("room.theme"));
            let mut theme = settings.theme;
            egui::ComboBox::from_id_salt("theme_combo")
                .selected_text(theme_label(theme))
                .show_ui(ui, |ui| {
                    for &name in ThemeName::all() {
                        ui.selectable_value(&mut theme, name, theme_label(name));
                    }
                });
            if theme != settings.theme {
                state.room.set_theme(theme);
            }
            ui.end_row();

            ui.label(t("room.lighting"));
            let mut lighting = settings.lighting as i32;
            if ui.add(egui::Slider::new(&mut lighting, 0..=100).suffix("%")).changed() {
                state.room.set_lighting(lighting);
            }
            ui.end_row();

            ui.label(t("room.music"));
            let mut volume = settings.music_volume as i32;
            if ui.add(egui::Slider::new(&mut volume, 0..=100).suffix("%")).changed() {
                state.room.set_music_volume(volume);
            }
            ui.end_row();

            ui.label(t("room.ambient"));
            let mut sound = settings.ambient_sound;
            egui::ComboBox::from_id_salt("ambient_combo")
                .selected_text(sound_label(sound))
                .show_ui(ui, |ui| {
                    for &s in AmbientSound::all() {
                        ui.selectable_value(&mut sound, s, sound_label(s));
                    }
                });
            if sound != settings.ambient_sound {
                state.room.set_ambient_sound(sound);
            }
            ui.end_row();
        });

    ui.add_space(4.0);
    let mut show_grid = settings.show_grid;
    if ui.checkbox(&mut show_grid, t("room.grid")).changed() {
        state.room.set_show_grid(show_grid);
    }
}

fn show_item_tab(ui: &mut Ui, state: &mut AppState) {
    let (index, item) = match state.room.selected.zip(state.room.selected_item().cloned()) {
        Some(pair) => pair,
        None => {
            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                ui.weak(t("item.none"));
            });
            return;
        }
    };

    let mut edits = Vec::new();

    egui::Grid::new("item_props")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("ID:");
            ui.monospace(&item.id);
            ui.end_row();

            ui.label(t("item.name"));
            let mut name = item.name.clone();
            if ui.text_edit_singleline(&mut name).changed() {
                edits.push(ItemEdit::Name(name));
            }
            ui.end_row();

            ui.label(t("item.color"));
            let color = item.resolved_color();
            let mut rgb = [color.r, color.g, color.b];
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                edits.push(ItemEdit::Color(Rgb::from_array(rgb).to_hex()));
            }
            ui.end_row();

            ui.label(t("item.width"));
            let mut width = item.width;
            let w_changed = ui
                .add(egui::DragValue::new(&mut width).speed(1.0).range(MIN_ITEM_SIZE..=MAX_ITEM_SIZE))
                .changed();
            ui.end_row();

            ui.label(t("item.height"));
            let mut height = item.height;
            let h_changed = ui
                .add(egui::DragValue::new(&mut height).speed(1.0).range(MIN_ITEM_SIZE..=MAX_ITEM_SIZE))
                .changed();
            ui.end_row();
            if w_changed || h_changed {
                edits.push(ItemEdit::Size { width, height });
            }

            ui.label(t("item.position"));
            let (mut x, mut y) = (item.x, item.y);
            ui.horizontal(|ui| {
                let x_changed = ui.add(egui::DragValue::new(&mut x).speed(1.0).prefix("x: ")).changed();
                let y_changed = ui.add(egui::DragValue::new(&mut y).speed(1.0).prefix("y: ")).changed();
                if x_changed || y_changed {
                    edits.push(ItemEdit::Position { x, y });
                }
            });
            ui.end_row();
        });

    for edit in edits {
        state.room.update_item(index, edit);
    }

    ui.add_space(8.0);
    if ui.button(t("item.delete")).clicked() {
        state.delete_selected();
    }
}
