use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        let item_count = state.room.items.len();
        ui.weak(format!("{}: {item_count}", t("status.items")));

        ui.separator();

        match state.room.selected_item() {
            Some(item) => {
                ui.label(format!("{}: {}", t("status.selected"), item.name));
                if state.interaction.is_dragging() {
                    ui.separator();
                    ui.colored_label(
                        egui::Color32::from_rgb(255, 170, 0),
                        format!("{} ({:.0}, {:.0})", t("status.dragging"), item.x, item.y),
                    );
                }
            }
            None => {
                ui.weak(t("status.ready"));
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(concat!("Study Room v", env!("CARGO_PKG_VERSION")));
        });
    });
}
