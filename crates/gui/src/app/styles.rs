//! Application style configuration

use eframe::egui;
use shared::Rgb;

/// Configure initial application styles with given font size and theme accent
pub fn configure_styles(ctx: &egui::Context, font_size: f32, accent: Rgb) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::dark();

    style.visuals.window_corner_radius = egui::CornerRadius::same(6);
    style.visuals.menu_corner_radius = egui::CornerRadius::same(4);
    for widgets in [
        &mut style.visuals.widgets.noninteractive,
        &mut style.visuals.widgets.inactive,
        &mut style.visuals.widgets.hovered,
        &mut style.visuals.widgets.active,
    ] {
        widgets.corner_radius = egui::CornerRadius::same(3);
    }

    style.spacing.item_spacing = egui::vec2(6.0, 4.0);
    style.spacing.button_padding = egui::vec2(6.0, 3.0);
    style.spacing.menu_margin = egui::Margin::same(4);
    style.spacing.slider_width = 160.0;

    style.visuals.panel_fill = egui::Color32::from_rgb(30, 30, 34);
    style.visuals.window_fill = egui::Color32::from_rgb(35, 35, 40);

    apply_accent_to(&mut style, accent);
    apply_text_styles(&mut style, font_size);

    ctx.set_style(style);
}

/// Apply font size to all text styles
pub fn apply_font_size(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();
    apply_text_styles(&mut style, font_size);
    ctx.set_style(style);
}

/// Tint selection highlights with the room theme's accent color
pub fn apply_accent(ctx: &egui::Context, accent: Rgb) {
    let mut style = (*ctx.style()).clone();
    apply_accent_to(&mut style, accent);
    ctx.set_style(style);
}

fn apply_accent_to(style: &mut egui::Style, accent: Rgb) {
    let fill = accent.scaled(0.55);
    style.visuals.selection.bg_fill = egui::Color32::from_rgb(fill.r, fill.g, fill.b);
    style.visuals.selection.stroke.color = egui::Color32::from_rgb(accent.r, accent.g, accent.b);
}

fn apply_text_styles(style: &mut egui::Style, font_size: f32) {
    style.text_styles.insert(egui::TextStyle::Body, egui::FontId::proportional(font_size));
    style.text_styles.insert(egui::TextStyle::Button, egui::FontId::proportional(font_size));
    style.text_styles.insert(egui::TextStyle::Small, egui::FontId::proportional(font_size * 0.85));
    style.text_styles.insert(egui::TextStyle::Heading, egui::FontId::proportional(font_size * 1.3));
    style.text_styles.insert(egui::TextStyle::Monospace, egui::FontId::monospace(font_size));
}
