//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;
use shared::ThemeName;

use crate::canvas::RoomCanvas;
use crate::state::{AppState, Preferences, ViewMode};
use crate::ui::{control_panel, item_library, status_bar};
use crate::viewport::ViewportPanel;

/// Main application
pub struct StudyRoomApp {
    state: AppState,
    canvas: RoomCanvas,
    viewport: ViewportPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
    /// Last applied theme (to retint the UI accent)
    last_theme: ThemeName,
    /// Preferences as last written to disk
    last_saved: Preferences,
}

impl StudyRoomApp {
    pub fn new(cc: &eframe::CreationContext<'_>, preferences: Preferences, demo: bool) -> Self {
        crate::i18n::set_lang(preferences.language);

        let mut state = AppState::new(preferences);
        if demo {
            menus::load_demo_room(&mut state);
        }

        let theme = state.room.settings.theme;
        styles::configure_styles(&cc.egui_ctx, state.preferences.ui.font_size, state.themes.get(theme).accent);

        let mut viewport = ViewportPanel::new();

        // Initialize GL renderer if glow context is available
        if let Some(gl) = cc.gl.as_ref() {
            viewport.init_gl(gl);
        }

        let last_font_size = state.preferences.ui.font_size;
        let last_saved = state.preferences.clone();

        Self {
            state,
            canvas: RoomCanvas::new(),
            viewport,
            last_font_size,
            last_theme: theme,
            last_saved,
        }
    }

    fn apply_style_changes(&mut self, ctx: &egui::Context) {
        if self.state.preferences.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.preferences.ui.font_size);
            self.last_font_size = self.state.preferences.ui.font_size;
        }

        let theme = self.state.room.settings.theme;
        if theme != self.last_theme {
            styles::apply_accent(ctx, self.state.themes.get(theme).accent);
            self.last_theme = theme;
        }
    }

    /// Write preferences once they differ from disk and no slider is mid-drag
    fn save_preferences_if_changed(&mut self, ctx: &egui::Context) {
        self.state.sync_preferences();
        if self.state.preferences == self.last_saved || ctx.input(|i| i.pointer.any_down()) {
            return;
        }
        match self.state.preferences.save() {
            Ok(()) => self.last_saved = self.state.preferences.clone(),
            Err(e) => {
                tracing::warn!("Failed to save preferences: {e}");
                // Don't retry every frame
                self.last_saved = self.state.preferences.clone();
            }
        }
    }
}

impl eframe::App for StudyRoomApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_style_changes(ctx);
        self.save_preferences_if_changed(ctx);

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::room_menu(ui, &mut self.state);
                menus::edit_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);

                ui.separator();
                for &mode in ViewMode::all() {
                    ui.selectable_value(&mut self.state.preferences.view_mode, mode, menus::view_mode_label(mode));
                }
            });
        });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)))
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Left panel: item library ─────────────────────────
        egui::SidePanel::left("item_library")
            .default_width(190.0)
            .width_range(140.0..=320.0)
            .resizable(true)
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)))
            .show(ctx, |ui| {
                item_library::show(ui, &mut self.state);
            });

        // ── Right panel: room & item controls ────────────────
        egui::SidePanel::right("control_panel")
            .default_width(260.0)
            .width_range(200.0..=420.0)
            .resizable(true)
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().id_salt("controls_scroll").show(ui, |ui| {
                    control_panel::show(ui, &mut self.state);
                });
            });

        // ── Central panel: 2D plan and/or 3D view ────────────
        egui::CentralPanel::default().frame(egui::Frame::NONE).show(ctx, |ui| {
            match self.state.preferences.view_mode {
                ViewMode::TwoD => self.canvas.show(ui, &mut self.state),
                ViewMode::ThreeD => self.viewport.show(ui, &mut self.state),
                ViewMode::Split => {
                    ui.columns(2, |columns| {
                        self.canvas.show(&mut columns[0], &mut self.state);
                        self.viewport.show(&mut columns[1], &mut self.state);
                    });
                }
            }
        });
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let Some(gl) = gl {
            self.viewport.destroy_gl(gl);
        }
        self.state.sync_preferences();
        if let Err(e) = self.state.preferences.save() {
            tracing::warn!("Failed to save preferences: {e}");
        }
    }
}
