//! Top-down room surface: paints the layout drawing and turns egui pointer input into
//! layout-space pointer events.

use egui::emath::RectTransform;
use egui::{Rect, Ui};
use glam::Vec2;
use studyroom_gui_lib::draw2d;
use studyroom_gui_lib::interaction::PointerEvent;
use studyroom_gui_lib::mapping::{layout_rect, LAYOUT_HEIGHT, LAYOUT_WIDTH};

use crate::state::AppState;

/// Largest rect with the layout aspect ratio centered inside `available`
pub fn fit_layout(available: Rect) -> Rect {
    let scale = (available.width() / LAYOUT_WIDTH).min(available.height() / LAYOUT_HEIGHT).max(0.0);
    Rect::from_center_size(available.center(), egui::vec2(LAYOUT_WIDTH * scale, LAYOUT_HEIGHT * scale))
}

#[derive(Default)]
pub struct RoomCanvas {
    /// Pointer was over the surface last frame
    hovered: bool,
}

impl RoomCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let available = ui.available_rect_before_wrap();
        let (_, response) = ui.allocate_exact_size(available.size(), egui::Sense::click_and_drag());
        let rect = fit_layout(available);
        if rect.width() < 1.0 || rect.height() < 1.0 {
            return;
        }

        let to_screen = RectTransform::from_to(layout_rect(), rect);
        let from_screen = to_screen.inverse();

        for event in self.collect_events(ui, &response, rect, from_screen) {
            state.pointer(event);
        }

        let room = &state.room;
        let drawing = draw2d::draw_room(&room.items, room.selected, &room.settings, &state.themes);
        let painter = ui.painter_at(rect);
        drawing.paint(&painter, to_screen);
    }

    fn collect_events(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        rect: Rect,
        from_screen: RectTransform,
    ) -> Vec<PointerEvent> {
        let (latest, pressed, released, moved) = ui.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.delta() != egui::Vec2::ZERO,
            )
        });

        let inside = latest.filter(|p| rect.contains(*p));
        let to_layout = |p: egui::Pos2| {
            let l = from_screen.transform_pos(p);
            Vec2::new(l.x, l.y)
        };

        let mut events = Vec::new();
        match inside {
            Some(pos) => {
                if pressed && response.is_pointer_button_down_on() {
                    events.push(PointerEvent::Down(to_layout(pos)));
                } else if moved {
                    events.push(PointerEvent::Move(to_layout(pos)));
                }
                if released {
                    events.push(PointerEvent::Up);
                }
            }
            None if self.hovered => events.push(PointerEvent::Leave),
            None => {}
        }
        self.hovered = inside.is_some();
        events
    }
}
