//! Pointer-driven drag and selection on the top-down layout.
//!
//! Positions are in layout units. The machine never mutates items; it reports select and
//! move intents for the owner of the item list to apply.

use glam::Vec2;
use shared::FurnitureItem;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
    /// The pointer left the drawing surface
    Leave,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        index: usize,
        /// Pointer position minus item origin at pointer-down
        offset: Vec2,
    },
}

/// Intent reported to the item owner
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Report {
    Select(Option<usize>),
    Move { index: usize, position: Vec2 },
}

/// Index of the first item whose box contains `p` (bounds inclusive), in list order.
/// Items without a positive footprint are not drawn and cannot be hit.
///
/// Later items paint over earlier ones, so with overlapping items this can select an item
/// that is visually underneath. Kept for compatibility with existing layouts.
pub fn hit_test(items: &[FurnitureItem], p: Vec2) -> Option<usize> {
    items.iter().position(|item| item.has_area() && item.contains(p.x, p.y))
}

#[derive(Debug, Clone, Default)]
pub struct CanvasInteraction {
    state: DragState,
}

impl CanvasInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn handle(&mut self, event: PointerEvent, items: &[FurnitureItem]) -> Option<Report> {
        match (event, self.state) {
            // A new press always re-targets, whether idle or mid-drag
            (PointerEvent::Down(p), _) => match hit_test(items, p) {
                Some(index) => {
                    let item = &items[index];
                    let offset = p - Vec2::new(item.x, item.y);
                    self.state = DragState::Dragging { index, offset };
                    tracing::debug!(index, id = %item.id, "drag start");
                    Some(Report::Select(Some(index)))
                }
                None => {
                    self.state = DragState::Idle;
                    Some(Report::Select(None))
                }
            },
            (PointerEvent::Move(p), DragState::Dragging { index, offset }) => {
                if index >= items.len() {
                    // Item removed under the drag
                    self.state = DragState::Idle;
                    return None;
                }
                Some(Report::Move { index, position: p - offset })
            }
            (PointerEvent::Up | PointerEvent::Leave, DragState::Dragging { index, .. }) => {
                tracing::debug!(index, "drag end");
                self.state = DragState::Idle;
                None
            }
            (PointerEvent::Move(_) | PointerEvent::Up | PointerEvent::Leave, DragState::Idle) => None,
        }
    }

    /// Drop any drag in progress (e.g. the item list was replaced)
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}
