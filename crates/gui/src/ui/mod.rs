pub mod control_panel;
pub mod item_library;
pub mod status_bar;
