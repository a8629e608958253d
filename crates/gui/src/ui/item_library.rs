//! Item library: catalog templates grouped by category, click to add

use egui::Ui;
use shared::Rgb;
use studyroom_gui_lib::catalog::{self, CatalogEntry};

use crate::i18n::t;
use crate::state::{AppState, RoomEvents};

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading(t("lib.title"));
    ui.weak(t("lib.add_hint"));
    ui.separator();

    for category in catalog::categories() {
        egui::CollapsingHeader::new(t(&format!("cat.{}", category.key())))
            .id_salt(category.key())
            .default_open(true)
            .show(ui, |ui| {
                for entry in catalog::in_category(category) {
                    if entry_button(ui, entry).clicked() {
                        add_entry(state, entry);
                    }
                }
            });
    }
}

fn entry_button(ui: &mut Ui, entry: &CatalogEntry) -> egui::Response {
    let swatch = Rgb::from_hex(entry.color).unwrap_or(Rgb::NEUTRAL_GRAY);
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 2.0, egui::Color32::from_rgb(swatch.r, swatch.g, swatch.b));
        ui.button(entry.name)
            .on_hover_text(format!("{} × {}", entry.width, entry.height))
    })
    .inner
}

/// Spawn the template and select the new item
fn add_entry(state: &mut AppState, entry: &CatalogEntry) {
    let item = entry.spawn(&state.room.items);
    let index = state.room.add_item(item);
    state.room.on_select(Some(index));
}
