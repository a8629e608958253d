use glam::Vec2;
use shared::FurnitureItem;

use crate::interaction::Report;

/// Sink for select and move intents coming out of either presentation
pub trait RoomEvents {
    fn on_select(&mut self, index: Option<usize>);
    fn on_move(&mut self, index: usize, position: Vec2);
}

/// Forward a pointer report to the sink
pub fn dispatch(report: Report, sink: &mut impl RoomEvents) {
    match report {
        Report::Select(index) => sink.on_select(index),
        Report::Move { index, position } => sink.on_move(index, position),
    }
}

/// The selected item, if the index still points into the list
pub fn resolve(items: &[FurnitureItem], selected: Option<usize>) -> Option<&FurnitureItem> {
    selected.and_then(|i| items.get(i))
}
