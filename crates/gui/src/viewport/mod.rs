//! 3D room view with OpenGL rendering

mod camera;
mod gl_renderer;
pub use studyroom_gui_lib::viewport::{mesh, picking};
mod renderer;

use std::sync::{Arc, Mutex};

use egui::Ui;
use studyroom_gui_lib::draw2d::color32;
use studyroom_gui_lib::scene3d::{self, FrameClock, SceneFrame};

use crate::i18n::t;
use crate::state::AppState;
use camera::OrbitCamera;
use gl_renderer::GlRenderer;

/// Degrees of orbit per dragged pixel
const ROTATE_SPEED: f32 = 0.5;
const PAN_SPEED: f32 = 0.01;
const ZOOM_SPEED: f32 = 0.01;

/// 3D viewport panel with OpenGL rendering
pub struct ViewportPanel {
    camera: OrbitCamera,
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
    clock: FrameClock,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: OrbitCamera::new(),
            gl_renderer: None,
            clock: FrameClock::new(),
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context) {
        match GlRenderer::new(gl) {
            Ok(renderer) => self.gl_renderer = Some(Arc::new(Mutex::new(renderer))),
            Err(e) => tracing::warn!("GL renderer unavailable, using software fallback: {e}"),
        }
    }

    /// Release GPU resources
    pub fn destroy_gl(&mut self, gl: &glow::Context) {
        if let Some(renderer) = self.gl_renderer.take() {
            if let Ok(r) = renderer.lock() {
                r.destroy(gl);
            }
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = OrbitCamera::new();
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        self.handle_camera(&response, ui);

        let room = &state.room;
        let frame = scene3d::build_scene(
            &room.items,
            room.selected,
            &room.settings,
            &state.themes,
            self.clock.elapsed(),
            self.camera.eye_position(),
        );

        self.handle_selection(&response, rect, &frame, state);

        if !ui.is_rect_visible(rect) {
            return;
        }
        // Animation is a function of the clock, so keep frames coming while visible
        ui.ctx().request_repaint();

        let frame = Arc::new(frame);
        self.render_gl(ui, rect, &frame);
        self.draw_overlays(ui, rect, &frame, state);
    }

    fn handle_camera(&mut self, response: &egui::Response, ui: &Ui) {
        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            self.camera.rotate(-delta.x * ROTATE_SPEED, delta.y * ROTATE_SPEED);
        }

        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            self.camera.pan(-delta.x * PAN_SPEED, delta.y * PAN_SPEED);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll * ZOOM_SPEED);
            }
        }
    }

    fn handle_selection(&self, response: &egui::Response, rect: egui::Rect, frame: &SceneFrame, state: &mut AppState) {
        if !response.clicked_by(egui::PointerButton::Primary) {
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };

        let ray = self.camera.screen_ray(pos, rect);
        state.pick_3d(frame.pick(&ray));
    }

    fn render_gl(&self, ui: &mut Ui, rect: egui::Rect, frame: &Arc<SceneFrame>) {
        if let Some(gl_renderer) = &self.gl_renderer {
            let renderer_clone = gl_renderer.clone();
            let camera = self.camera;
            let frame = frame.clone();
            let bg_color = frame.background.to_array();

            let callback = egui::PaintCallback {
                rect,
                callback: Arc::new(egui_glow::CallbackFn::new(move |info, painter| {
                    let gl = painter.gl();

                    let clip = info.clip_rect_in_pixels();
                    let viewport = [
                        clip.left_px as f32,
                        clip.from_bottom_px as f32,
                        clip.width_px as f32,
                        clip.height_px as f32,
                    ];

                    if let Ok(mut r) = renderer_clone.lock() {
                        r.sync_frame(gl, &frame);
                        let render_params = gl_renderer::RenderParams { viewport, bg_color };
                        r.paint(gl, &camera, &render_params);
                    }
                })),
            };

            ui.painter().add(callback);
        } else {
            renderer::paint_viewport(ui, rect, &self.camera, frame);
        }
    }

    fn draw_overlays(&self, ui: &mut Ui, rect: egui::Rect, frame: &SceneFrame, state: &AppState) {
        let painter = ui.painter_at(rect);

        if let Some(ref label) = frame.label {
            if let Some(pos) = self.camera.project(label.position, rect) {
                let font = egui::FontId::proportional(14.0);
                let galley = painter.layout_no_wrap(label.text.clone(), font, color32(label.color));
                let bg = egui::Rect::from_center_size(pos, galley.size() + egui::vec2(12.0, 6.0));
                painter.rect_filled(bg, 4.0, egui::Color32::from_rgba_unmultiplied(0, 0, 0, 170));
                painter.galley(bg.min + egui::vec2(6.0, 3.0), galley, color32(label.color));
            }
        }

        self.draw_camera_info(&painter, rect);

        if state.room.items.is_empty() {
            painter.text(
                egui::pos2(rect.center().x, rect.bottom() - 20.0),
                egui::Align2::CENTER_BOTTOM,
                t("viewport.nav_hint"),
                egui::FontId::proportional(11.0),
                egui::Color32::from_rgb(100, 100, 110),
            );
        }
    }

    fn draw_camera_info(&self, painter: &egui::Painter, rect: egui::Rect) {
        let overlay_rect = egui::Rect::from_min_size(
            egui::pos2(rect.right() - 140.0, rect.top() + 4.0),
            egui::vec2(136.0, 44.0),
        );
        painter.rect_filled(overlay_rect, 4.0, egui::Color32::from_rgba_premultiplied(0, 0, 0, 140));
        painter.text(
            overlay_rect.min + egui::vec2(6.0, 4.0),
            egui::Align2::LEFT_TOP,
            format!(
                "Dist: {:.1}\nYaw: {:.0}  Pitch: {:.0}",
                self.camera.distance,
                self.camera.yaw.to_degrees(),
                self.camera.pitch.to_degrees(),
            ),
            egui::FontId::monospace(10.0),
            egui::Color32::from_rgb(160, 160, 170),
        );
    }
}
